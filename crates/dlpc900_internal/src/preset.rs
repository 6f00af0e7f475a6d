//! Channel/mode preset resolution: turns a list of requested
//! channel/mode pairs into the flat list of firmware pattern indices
//! `ControllerHandle::program_preset_sequence` programs.
//!
//! Grounded on `get_dmd_sequence`: each entry's firmware indices are
//! sliced, repeated, optionally padded with the channel's `"off"` mode
//! before/after, and optionally interleaved with `"off"` frames to blank
//! between patterns. Resolves against the same
//! [`dlpc900_types::config::ChannelMap`] a persisted [`dlpc900_types::config::Config`]
//! carries, rather than its own parallel table.

use thiserror::Error;

use dlpc900_types::config::ChannelMap;

/// Mode name `off_before`/`off_after`/`blank` pad and interleave with.
const OFF_MODE: &str = "off";

/// Errors resolving a [`PresetEntry`] list against a [`ChannelMap`].
#[derive(Debug, Error)]
pub enum PresetError {
	/// The requested channel/mode pair has no entry in the map.
	#[error("channel {channel:?} has no mode {mode:?}")]
	UnknownMode {
		/// Channel that was queried.
		channel: String,
		/// Mode that was missing.
		mode: String,
	},

	/// Off-padding or blanking was requested, but the channel has no
	/// `"off"` mode.
	#[error("channel {0:?} has no \"off\" mode to pad/blank with")]
	MissingOffMode(String),

	/// `pattern_indices` referenced a position past the mode's pattern
	/// list.
	#[error("pattern index {index} is out of range for channel {channel:?} mode {mode:?} (len {len})")]
	IndexOutOfRange {
		/// Channel that was queried.
		channel: String,
		/// Mode that was queried.
		mode: String,
		/// Index that was out of range.
		index: usize,
		/// Number of patterns the mode actually has.
		len: usize,
	},
}

/// One channel/mode entry in a multi-entry preset request.
#[derive(Debug, Clone)]
pub struct PresetEntry {
	/// Channel name, looked up in the [`ChannelMap`].
	pub channel: String,
	/// Mode name within the channel.
	pub mode: String,
	/// Which of the mode's patterns to include, in order; `None` means all
	/// of them, in their stored order.
	pub pattern_indices: Option<Vec<usize>>,
	/// How many times to repeat the (possibly sliced) pattern list.
	pub repeat: usize,
	/// Number of `"off"` frames to prepend.
	pub off_before: usize,
	/// Number of `"off"` frames to append.
	pub off_after: usize,
	/// Interleave an `"off"` frame after every pattern.
	pub blank: bool,
}

impl PresetEntry {
	/// A minimal entry: every pattern in `mode`, once, no padding.
	pub fn new(channel: impl Into<String>, mode: impl Into<String>) -> Self {
		Self {
			channel: channel.into(),
			mode: mode.into(),
			pattern_indices: None,
			repeat: 1,
			off_before: 0,
			off_after: 0,
			blank: false,
		}
	}
}

fn off_index(map: &ChannelMap, channel: &str) -> Result<u32, PresetError> {
	let off = map.get(channel, OFF_MODE).ok_or_else(|| PresetError::MissingOffMode(channel.to_string()))?;
	Ok(off.first().copied().unwrap_or(0))
}

/// Resolves a list of [`PresetEntry`] values against a [`ChannelMap`] into
/// one flat firmware-index sequence, concatenated in entry order.
pub fn resolve(map: &ChannelMap, entries: &[PresetEntry]) -> Result<Vec<u32>, PresetError> {
	let mut out = Vec::new();

	for entry in entries {
		let base = map
			.get(&entry.channel, &entry.mode)
			.ok_or_else(|| PresetError::UnknownMode { channel: entry.channel.clone(), mode: entry.mode.clone() })?;

		let selected: Vec<u32> = match &entry.pattern_indices {
			Some(indices) => {
				let mut selected = Vec::with_capacity(indices.len());
				for &i in indices {
					let value = base.get(i).copied().ok_or_else(|| PresetError::IndexOutOfRange {
						channel: entry.channel.clone(),
						mode: entry.mode.clone(),
						index: i,
						len: base.len(),
					})?;
					selected.push(value);
				}
				selected
			}
			None => base.to_vec(),
		};

		let repeated: Vec<u32> = selected.iter().copied().cycle().take(selected.len() * entry.repeat.max(1)).collect();

		let mut padded = repeated;
		if entry.off_before != 0 || entry.off_after != 0 {
			let off = off_index(map, &entry.channel)?;
			let mut with_padding = vec![off; entry.off_before];
			with_padding.extend(padded);
			with_padding.extend(vec![off; entry.off_after]);
			padded = with_padding;
		}

		if entry.blank {
			let off = off_index(map, &entry.channel)?;
			let mut interleaved = Vec::with_capacity(padded.len() * 2);
			for value in padded {
				interleaved.push(value);
				interleaved.push(off);
			}
			padded = interleaved;
		}

		out.extend(padded);
	}

	Ok(out)
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;

	fn map_with(channel: &str, modes: &[(&str, Vec<u32>)]) -> ChannelMap {
		let mut channels = HashMap::new();
		channels.insert(channel.to_string(), modes.iter().cloned().map(|(m, v)| (m.to_string(), v)).collect());
		ChannelMap::new(channels)
	}

	fn table() -> ChannelMap {
		map_with("red", &[("solid", vec![1, 2, 3]), ("off", vec![0])])
	}

	#[test]
	fn resolves_plain_sequence() {
		let t = table();
		let indices = resolve(&t, &[PresetEntry::new("red", "solid")]).unwrap();
		assert_eq!(indices, vec![1, 2, 3]);
	}

	#[test]
	fn repeats_sequence() {
		let t = table();
		let mut entry = PresetEntry::new("red", "solid");
		entry.repeat = 2;
		let indices = resolve(&t, &[entry]).unwrap();
		assert_eq!(indices, vec![1, 2, 3, 1, 2, 3]);
	}

	#[test]
	fn pads_with_off_before_and_after() {
		let t = table();
		let mut entry = PresetEntry::new("red", "solid");
		entry.off_before = 1;
		entry.off_after = 2;
		let indices = resolve(&t, &[entry]).unwrap();
		assert_eq!(indices, vec![0, 1, 2, 3, 0, 0]);
	}

	#[test]
	fn blank_interleaves_off_after_each_pattern() {
		let t = table();
		let mut entry = PresetEntry::new("red", "solid");
		entry.blank = true;
		let indices = resolve(&t, &[entry]).unwrap();
		assert_eq!(indices, vec![1, 0, 2, 0, 3, 0]);
	}

	#[test]
	fn unknown_channel_errors() {
		let t = table();
		let err = resolve(&t, &[PresetEntry::new("blue", "solid")]).unwrap_err();
		assert!(matches!(err, PresetError::UnknownMode { ref channel, .. } if channel == "blue"));
	}

	#[test]
	fn missing_off_mode_errors_when_padding_requested() {
		let t = map_with("green", &[("solid", vec![5])]);
		let mut entry = PresetEntry::new("green", "solid");
		entry.off_before = 1;
		let err = resolve(&t, &[entry]).unwrap_err();
		assert!(matches!(err, PresetError::MissingOffMode(ref c) if c == "green"));
	}
}
