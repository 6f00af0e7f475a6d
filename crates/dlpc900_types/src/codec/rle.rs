//! RLE (run-length) encoder.
//!
//! Differs from [`super::erle`] only in how runs
//! are emitted: RLE runs are capped at 255 pixels (chopped into 255-pixel
//! chunks with a single-byte length), and the terminator is a single `0x00`.

use super::error::CodecError;
use super::erle::EncodedPattern;
use super::length::len_to_bytes;
use super::planes::CombinedFrame;

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

/// Encodes a combined frame using RLE.
///
/// # Errors
///
/// Returns [`CodecError::LengthOutOfRange`] if the row width exceeds the
/// length codec's `0..=32767` range (used for the row-copy opcode only;
/// per-run lengths are always chopped to fit a single byte).
pub fn encode_rle(frame: &CombinedFrame) -> Result<EncodedPattern, CodecError> {
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
				let mut remaining = len;
				let mut offset = start;
				while remaining > 0 {
					let chunk = remaining.min(255);
					out.push(chunk as u8);
					out.extend_from_slice(&row[offset]);
					remaining -= chunk;
					offset += chunk;
				}
			}
		}

		prev_row = Some(row);
	}

	out.push(0x00);
	Ok(EncodedPattern::from_bytes(out))
}
