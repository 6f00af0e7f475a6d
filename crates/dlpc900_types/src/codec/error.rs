//! Error types for the ERLE/RLE codec and 24-plane combine/split.

use thiserror::Error;

/// Errors that can occur while encoding or decoding DMD pattern data.
#[derive(Debug, Error)]
pub enum CodecError {
	/// A run/row length fell outside the encodable range (0..=32767).
	#[error("length {0} is out of the encodable range 0..=32767")]
	LengthOutOfRange(i64),

	/// The byte stream ended before the target resolution was fully decoded.
	#[error("pattern stream truncated: produced {produced} of {expected} rows")]
	Truncated {
		/// Rows actually produced before the stream ran out.
		produced: usize,
		/// Rows the target resolution requires.
		expected: usize,
	},

	/// The byte stream ended without the required terminator sequence.
	#[error("pattern stream missing terminator")]
	MissingTerminator,

	/// `combine`/`split` was called with an image whose shape does not match
	/// the documented 3×H×W (or 2×H×W) plane layout.
	#[error("expected {expected} planes, got {actual}")]
	ShapeMismatch {
		/// Number of planes the operation requires.
		expected: usize,
		/// Number of planes actually supplied.
		actual: usize,
	},

	/// `combine` was given a pattern containing a value other than 0 or 1.
	#[error("pattern value {0} is not binary (0 or 1)")]
	NotBinary(u8),
}
