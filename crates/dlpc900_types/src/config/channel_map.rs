//! Symbolic channel/mode → firmware pattern index resolution.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Mode name every channel must define.
pub const DEFAULT_MODE: &str = "default";

/// `{channel: {mode: [firmware indices...]}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMap(HashMap<String, HashMap<String, Vec<u32>>>);

impl ChannelMap {
	/// Wraps a raw channel/mode/index table without validating it.
	pub fn new(channels: HashMap<String, HashMap<String, Vec<u32>>>) -> Self {
		Self(channels)
	}

	/// Confirms every channel defines a non-empty `"default"` mode.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::MissingDefaultKey`] if a channel is missing
	/// the `"default"` mode or that mode's index list is empty.
	pub fn validate(&self) -> Result<(), ConfigError> {
		for (channel, modes) in &self.0 {
			match modes.get(DEFAULT_MODE) {
				Some(indices) if !indices.is_empty() => {}
				_ => return Err(ConfigError::MissingDefaultKey(channel.clone())),
			}
		}
		Ok(())
	}

	/// Looks up the firmware index list for `(channel, mode)`.
	pub fn get(&self, channel: &str, mode: &str) -> Option<&[u32]> {
		self.0.get(channel).and_then(|modes| modes.get(mode)).map(Vec::as_slice)
	}

	/// Looks up a channel's `"default"` (i.e. "off") index list by name.
	pub fn mode_or_default<'a>(&'a self, channel: &str, mode: &str) -> Option<&'a [u32]> {
		self.get(channel, mode).or_else(|| self.get(channel, DEFAULT_MODE))
	}

	/// Iterates over every defined channel name.
	pub fn channels(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}
}
