//! Validation and top-level error types for the driver.

use thiserror::Error;

use dlpc900_types::config::ConfigError;
use dlpc900_types::{CompressionMode, ModelError};

use crate::transport::TransportError;

/// Input validation failures the orchestrator and controller façade raise
/// before ever touching the wire.
#[derive(Debug, Error)]
pub enum ValidationError {
	/// A pattern's exposure time was below the device's 105us minimum.
	#[error("exposure {0}us is below the minimum of 105us")]
	ExposureTooShort(u32),

	/// A pattern byte value was not 0 or 1.
	#[error("pattern value {0} is not binary (0 or 1)")]
	PatternValueInvalid(u8),

	/// A run or row length exceeded the codec's encodable range.
	#[error("length {0} exceeds the encodable range 0..=32767")]
	LengthTooLarge(i64),

	/// A requested compression mode has no working encoder (only ERLE and
	/// RLE do).
	#[error("compression mode {0:?} is not implemented")]
	CompressionUnsupported(CompressionMode),

	/// A LUT sequence index did not fit the 512-entry table.
	#[error("LUT index {0} is out of range (must be < 512)")]
	LutIndexOutOfRange(u16),

	/// A trigger output delay fell outside -20..=20000us.
	#[error("trigger delay {0}us is out of range (-20..=20000)")]
	TriggerDelayOutOfRange(i32),

	/// An inverted trigger output had its rising delay shorter than its
	/// falling delay.
	#[error("inverted trigger requires rising delay ({rising}us) >= falling delay ({falling}us)")]
	TriggerDelayOrdering {
		/// Configured rising-edge delay.
		rising: i32,
		/// Configured falling-edge delay.
		falling: i32,
	},

	/// A scalar-broadcast input (exposure/dark times) didn't match the
	/// pattern count after broadcasting.
	#[error("expected {expected} entries after broadcast, got {actual}")]
	BroadcastLengthMismatch {
		/// Pattern count the broadcast should have produced.
		expected: usize,
		/// Length actually supplied.
		actual: usize,
	},
}

impl From<ModelError> for ValidationError {
	fn from(err: ModelError) -> Self {
		match err {
			ModelError::ExposureTooShort(us) => Self::ExposureTooShort(us),
			ModelError::SequenceIndexOutOfRange(idx) => Self::LutIndexOutOfRange(idx),
			ModelError::UnsupportedBitDepth(_) | ModelError::StoredBitIndexOutOfRange(_) => {
				Self::CompressionUnsupported(CompressionMode::None)
			}
		}
	}
}

/// The top-level error every public `ControllerHandle`/orchestrator/preset
/// resolver operation returns.
#[derive(Debug, Error)]
pub enum DmdError {
	/// A codec (compress/decompress, combine/split) operation failed.
	#[error(transparent)]
	Codec(#[from] dlpc900_types::codec::CodecError),

	/// A persisted configuration document failed to load or validate.
	#[error(transparent)]
	Config(#[from] ConfigError),

	/// The HID transport failed to open, write, or read.
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// An input failed validation before any command was sent.
	#[error(transparent)]
	Validation(#[from] ValidationError),

	/// The device returned an empty or malformed reply.
	#[error("malformed reply payload")]
	BadPayload,

	/// The device flagged an error on a reply; `description` is populated
	/// by following up with a `read_error_description` call where the
	/// caller has requested it.
	#[error("device reported error {code}{}", description.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
	DeviceError {
		/// Raw device error code (see [`crate::controller::error_description`]).
		code: u8,
		/// Human-readable description, if one was fetched.
		description: Option<String>,
	},
}
