//! `.dmdcfg`: a small bit-packed binary columnar archive.
//!
//! A 4-byte little-endian header length, a JSON-encoded header
//! carrying every field except `firmware_patterns`' boolean payload, and
//! (if the config has a pattern array) the array's `{false,true}` values
//! packed 8-to-a-byte, row-major, LSB first.

use serde::{Deserialize, Serialize};

use super::channel_map::ChannelMap;
use super::config::Config;
use super::error::ConfigError;
use super::pattern_array::PatternArray;
use super::pattern_info::PatternInfo;
use chrono::{DateTime, Utc};

#[derive(Serialize, Deserialize)]
struct Header {
	timestamp: DateTime<Utc>,
	firmware_pattern_data: Vec<PatternInfo>,
	channel_map: ChannelMap,
	hid_path: Option<String>,
	pattern_shape: Option<(usize, usize, usize)>,
}

fn pack_bits(values: &[bool]) -> Vec<u8> {
	let mut out = vec![0u8; values.len().div_ceil(8)];
	for (i, &value) in values.iter().enumerate() {
		if value {
			out[i / 8] |= 1 << (i % 8);
		}
	}
	out
}

fn unpack_bits(bytes: &[u8], count: usize) -> Vec<bool> {
	(0..count).map(|i| (bytes[i / 8] >> (i % 8)) & 1 != 0).collect()
}

/// Serializes a [`Config`] to the `.dmdcfg` binary layout.
pub fn to_bytes(config: &Config) -> Vec<u8> {
	let pattern_shape = config
		.firmware_patterns()
		.map(|array| (array.count(), array.width(), array.height()));

	let header = Header {
		timestamp: config.timestamp(),
		firmware_pattern_data: config.firmware_pattern_data().to_vec(),
		channel_map: config.channel_map().clone(),
		hid_path: config.hid_path().map(str::to_string),
		pattern_shape,
	};

	let header_bytes = serde_json::to_vec(&header).expect("header fields are always representable as JSON");
	let mut out = Vec::with_capacity(4 + header_bytes.len());
	out.extend((header_bytes.len() as u32).to_le_bytes());
	out.extend(header_bytes);

	if let Some(array) = config.firmware_patterns() {
		out.extend(pack_bits(array.values()));
	}

	out
}

/// Parses a `.dmdcfg` byte buffer back into a [`Config`].
///
/// # Errors
///
/// Returns [`ConfigError::ArchiveTruncated`] if the buffer is shorter than
/// the header length field declares, or a JSON parse error for a malformed
/// header.
pub fn from_bytes(data: &[u8]) -> Result<Config, ConfigError> {
	if data.len() < 4 {
		return Err(ConfigError::ArchiveTruncated {
			expected: 4,
			actual: data.len(),
		});
	}
	let header_len = u32::from_le_bytes(data[0..4].try_into().expect("checked above")) as usize;
	if data.len() < 4 + header_len {
		return Err(ConfigError::ArchiveTruncated {
			expected: 4 + header_len,
			actual: data.len(),
		});
	}

	let header: Header = serde_json::from_slice(&data[4..4 + header_len])?;
	let body = &data[4 + header_len..];

	let firmware_patterns = match header.pattern_shape {
		Some((count, width, height)) => {
			let nvalues = count * width * height;
			let expected_bytes = nvalues.div_ceil(8);
			if body.len() < expected_bytes {
				return Err(ConfigError::ArchiveTruncated {
					expected: 4 + header_len + expected_bytes,
					actual: data.len(),
				});
			}
			Some(PatternArray::new(count, width, height, unpack_bits(body, nvalues))?)
		}
		None => None,
	};

	Ok(Config::new(
		header.timestamp,
		header.firmware_pattern_data,
		header.channel_map,
		header.hid_path,
		firmware_patterns,
	))
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;

	fn sample_config(with_patterns: bool) -> Config {
		let mut modes = HashMap::new();
		modes.insert("default".to_string(), vec![0u32, 1]);
		let mut channels = HashMap::new();
		channels.insert("widefield".to_string(), modes);

		let patterns = with_patterns.then(|| {
			PatternArray::new(2, 2, 2, vec![true, false, false, true, true, true, false, false]).unwrap()
		});

		Config::new(
			DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap(),
			vec![PatternInfo::new()],
			ChannelMap::new(channels),
			Some("/dev/hidraw3".to_string()),
			patterns,
		)
	}

	#[test]
	fn round_trips_without_pattern_array() {
		let config = sample_config(false);
		let bytes = to_bytes(&config);
		let parsed = from_bytes(&bytes).unwrap();
		assert_eq!(parsed, config);
	}

	#[test]
	fn round_trips_with_pattern_array() {
		let config = sample_config(true);
		let bytes = to_bytes(&config);
		let parsed = from_bytes(&bytes).unwrap();
		assert_eq!(parsed, config);
	}

	#[test]
	fn truncated_archive_errors() {
		let config = sample_config(true);
		let bytes = to_bytes(&config);
		assert!(matches!(
			from_bytes(&bytes[..bytes.len() - 1]),
			Err(ConfigError::ArchiveTruncated { .. })
		));
	}

	#[test]
	fn bit_packing_is_byte_exact() {
		let values = vec![true, false, true, false, false, false, false, false, true];
		let packed = pack_bits(&values);
		assert_eq!(packed, vec![0b0000_0101, 0b0000_0001]);
		assert_eq!(unpack_bits(&packed, values.len()), values);
	}
}
