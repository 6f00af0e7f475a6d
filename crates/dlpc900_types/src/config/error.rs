//! Error type for the on-disk pattern/preset configuration formats.

use thiserror::Error;

/// Errors raised loading, validating, or saving a [`super::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
	/// A channel in the channel map has no `"default"` mode.
	#[error("channel {0:?} has no \"default\" mode")]
	MissingDefaultKey(String),

	/// A channel mode's index list was not one-dimensional.
	#[error("channel {channel:?} mode {mode:?} is not a 1-D index list")]
	NotOneDimensional {
		/// Channel name.
		channel: String,
		/// Mode name within the channel.
		mode: String,
	},

	/// The config file's extension did not match a known format.
	#[error("unsupported config file extension: {0:?}")]
	UnsupportedExtension(String),

	/// A pattern array's data length didn't match `count * width * height`.
	#[error("pattern array expected {expected} values, got {actual}")]
	PatternArrayShapeMismatch {
		/// Values the declared shape requires.
		expected: usize,
		/// Values actually supplied.
		actual: usize,
	},

	/// The `.dmdcfg` archive's header or body was shorter than declared.
	#[error("dmdcfg archive truncated: expected {expected} bytes, found {actual}")]
	ArchiveTruncated {
		/// Bytes the header declared.
		expected: usize,
		/// Bytes actually present.
		actual: usize,
	},

	/// Underlying I/O failure reading or writing a config file.
	#[error(transparent)]
	Io(#[from] std::io::Error),

	/// Underlying JSON (de)serialization failure.
	#[error(transparent)]
	Json(#[from] serde_json::Error),
}
