//! The persisted pattern/preset configuration: timestamp, per-pattern
//! metadata, channel map, and optional device path / pattern array.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::archive;
use super::channel_map::ChannelMap;
use super::error::ConfigError;
use super::pattern_array::PatternArray;
use super::pattern_info::PatternInfo;

/// The full on-disk configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
	timestamp: DateTime<Utc>,
	firmware_pattern_data: Vec<PatternInfo>,
	channel_map: ChannelMap,
	#[serde(skip_serializing_if = "Option::is_none")]
	hid_path: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	firmware_patterns: Option<PatternArray>,
}

impl Config {
	/// Builds a config document from its required and optional fields.
	pub fn new(
		timestamp: DateTime<Utc>,
		firmware_pattern_data: Vec<PatternInfo>,
		channel_map: ChannelMap,
		hid_path: Option<String>,
		firmware_patterns: Option<PatternArray>,
	) -> Self {
		Self {
			timestamp,
			firmware_pattern_data,
			channel_map,
			hid_path,
			firmware_patterns,
		}
	}

	/// Document creation timestamp.
	pub fn timestamp(&self) -> DateTime<Utc> {
		self.timestamp
	}

	/// Per-pattern metadata, indexed by firmware pattern position.
	pub fn firmware_pattern_data(&self) -> &[PatternInfo] {
		&self.firmware_pattern_data
	}

	/// The symbolic channel/mode → firmware index map.
	pub fn channel_map(&self) -> &ChannelMap {
		&self.channel_map
	}

	/// The saved OS-specific HID device path, if one was recorded.
	pub fn hid_path(&self) -> Option<&str> {
		self.hid_path.as_deref()
	}

	/// The optional bit-packable N×H×W pattern array.
	pub fn firmware_patterns(&self) -> Option<&PatternArray> {
		self.firmware_patterns.as_ref()
	}

	/// Validates the channel map (every channel has a non-empty `"default"`
	/// mode).
	///
	/// # Errors
	///
	/// Returns [`ConfigError::MissingDefaultKey`] if validation fails.
	pub fn validate(&self) -> Result<(), ConfigError> {
		self.channel_map.validate()
	}

	/// Loads a config document, dispatching on the path's extension:
	/// `.json` for the structured text document, `.dmdcfg` for the bit-packed
	/// binary columnar archive.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::UnsupportedExtension`] for any other
	/// extension, or a format-specific parse error.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		match path.extension().and_then(|ext| ext.to_str()) {
			Some("json") => {
				let bytes = std::fs::read(path)?;
				let config: Self = serde_json::from_slice(&bytes)?;
				config.validate()?;
				Ok(config)
			}
			Some("dmdcfg") => {
				let bytes = std::fs::read(path)?;
				let config = archive::from_bytes(&bytes)?;
				config.validate()?;
				Ok(config)
			}
			other => Err(ConfigError::UnsupportedExtension(
				other.unwrap_or_default().to_string(),
			)),
		}
	}

	/// Saves a config document, dispatching on the path's extension exactly
	/// as [`Config::open`] does.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::UnsupportedExtension`] for any other
	/// extension, or an I/O error.
	pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
		let path = path.as_ref();
		match path.extension().and_then(|ext| ext.to_str()) {
			Some("json") => {
				let bytes = serde_json::to_vec_pretty(self)?;
				std::fs::write(path, bytes)?;
				Ok(())
			}
			Some("dmdcfg") => {
				let bytes = archive::to_bytes(self);
				std::fs::write(path, bytes)?;
				Ok(())
			}
			other => Err(ConfigError::UnsupportedExtension(
				other.unwrap_or_default().to_string(),
			)),
		}
	}
}
