//! ERLE (enhanced run-length) encoder.
//!
//! Row-copy lengths use the full variable-length
//! [`super::length::len_to_bytes`] encoding (one or two bytes), so row
//! copies stay correct for widths below 128 too.

use super::error::CodecError;
use super::length::len_to_bytes;
use super::planes::CombinedFrame;

/// An ERLE- or RLE-encoded byte stream, always ending in its format's
/// terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPattern(Vec<u8>);

impl EncodedPattern {
	/// Borrows the encoded bytes.
	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}

	/// Consumes `self`, returning the encoded bytes.
	pub fn into_bytes(self) -> Vec<u8> {
		self.0
	}

	pub(super) fn from_bytes(bytes: Vec<u8>) -> Self {
		Self(bytes)
	}
}

/// Finds `(start, length)` runs of equal RGB triples within one row.
fn runs(row: &[[u8; 3]]) -> Vec<(usize, usize)> {
	let mut out = Vec::new();
	let mut start = 0;
	for i in 1..row.len() {
		if row[i] != row[start] {
			out.push((start, i - start));
			start = i;
		}
	}
	out.push((start, row.len() - start));
	out
}

fn row_triples(frame: &CombinedFrame, row: usize) -> Vec<[u8; 3]> {
	let width = frame.width();
	(0..width)
		.map(|col| {
			let idx = row * width + col;
			[frame.red()[idx], frame.green()[idx], frame.blue()[idx]]
		})
		.collect()
}

/// Encodes a combined frame using ERLE.
///
/// # Errors
///
/// Returns [`CodecError::LengthOutOfRange`] if any run or the row width
/// exceeds the length codec's `0..=32767` range.
pub fn encode_erle(frame: &CombinedFrame) -> Result<EncodedPattern, CodecError> {
	let width = frame.width();
	let height = frame.height();
	let mut out = Vec::new();

	let mut prev_row: Option<Vec<[u8; 3]>> = None;
	for row_idx in 0..height {
		let row = row_triples(frame, row_idx);

		if prev_row.as_deref() == Some(row.as_slice()) {
			out.push(0x00);
			out.push(0x01);
			out.extend(len_to_bytes(width as u32)?);
		} else {
			for (start, len) in runs(&row) {
				out.extend(len_to_bytes(len as u32)?);
				out.extend_from_slice(&row[start]);
			}
		}

		prev_row = Some(row);
	}

	out.extend([0x00, 0x01, 0x00]);
	Ok(EncodedPattern::from_bytes(out))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::codec::planes::CombinedFrame;

	fn frame_from_rows(width: usize, rows: &[Vec<[u8; 3]>]) -> CombinedFrame {
		let height = rows.len();
		let mut rgb = Vec::with_capacity(width * height * 3);
		for row in rows {
			for px in row {
				rgb.extend_from_slice(px);
			}
		}
		CombinedFrame::from_rgb_interleaved(width, height, &rgb).unwrap()
	}

	#[test]
	fn e1_single_row_two_runs() {
		// [0,0,0,0,1,1] promoted to RGB with R=G=0, B=pattern.
		let row: Vec<[u8; 3]> = vec![
			[0, 0, 0],
			[0, 0, 0],
			[0, 0, 0],
			[0, 0, 0],
			[0, 0, 1],
			[0, 0, 1],
		];
		let frame = frame_from_rows(6, &[row]);
		let encoded = encode_erle(&frame).unwrap();
		assert_eq!(
			encoded.as_bytes(),
			&[4, 0, 0, 0, 2, 0, 0, 1, 0x00, 0x01, 0x00]
		);
	}

	#[test]
	fn e2_row_copy_with_wide_width() {
		let row = vec![[0u8, 0, 0]; 200];
		let frame = frame_from_rows(200, &[row.clone(), row]);
		let encoded = encode_erle(&frame).unwrap();
		// first row: one run of length 200 (two-byte length)
		assert_eq!(&encoded.as_bytes()[0..5], &[0xC8, 0x01, 0, 0, 0]);
		// second row: row-copy of length 200
		assert_eq!(&encoded.as_bytes()[5..9], &[0x00, 0x01, 0xC8, 0x01]);
		assert_eq!(&encoded.as_bytes()[9..], &[0x00, 0x01, 0x00]);
	}
}
