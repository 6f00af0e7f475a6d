//! Shared ERLE/RLE decoder.
//!
//! Works against a target resolution; both formats share the same control
//! byte grammar, and a plain RLE stream's single `0x00` terminator is just
//! the degenerate case of the "last byte is zero" end condition this
//! decoder already checks for on every iteration.

use super::error::CodecError;
use super::length::bytes_to_len_long;
use super::planes::CombinedFrame;

fn byte_at(data: &[u8], idx: usize, expected_rows: usize, produced_rows: usize) -> Result<u8, CodecError> {
	data.get(idx).copied().ok_or(CodecError::Truncated {
		produced: produced_rows,
		expected: expected_rows,
	})
}

/// Decodes an ERLE or RLE byte stream into a [`CombinedFrame`] of the given
/// resolution.
///
/// # Errors
///
/// Returns [`CodecError::Truncated`] if the stream ends before `height` rows
/// have been produced, or [`CodecError::MissingTerminator`] if the final
/// byte of the stream is present but nonzero.
pub fn decode(data: &[u8], width: usize, height: usize) -> Result<CombinedFrame, CodecError> {
	let mut rows: Vec<Vec<[u8; 3]>> = Vec::with_capacity(height);
	let mut current = vec![[0u8; 3]; width];
	let mut line_pos = 0usize;
	let mut ii = 0usize;

	while ii < data.len() {
		if line_pos == width {
			rows.push(current);
			current = vec![[0u8; 3]; width];
			line_pos = 0;
		}

		if ii == data.len() - 1 {
			if byte_at(data, ii, height, rows.len())? == 0 {
				break;
			}
			return Err(CodecError::MissingTerminator);
		}

		let b0 = byte_at(data, ii, height, rows.len())?;

		if b0 == 0 {
			let b1 = byte_at(data, ii + 1, height, rows.len())?;
			if b1 == 0 {
				ii += 1;
				continue;
			} else if b1 == 1 {
				let b2 = byte_at(data, ii + 2, height, rows.len())?;
				let (n, consumed) = if b2 < 128 {
					(usize::from(b2), 3)
				} else {
					let b3 = byte_at(data, ii + 3, height, rows.len())?;
					(bytes_to_len_long(b2, b3) as usize, 4)
				};
				ii += consumed;

				if n > 0 {
					let prev = rows.last().ok_or(CodecError::Truncated {
						produced: rows.len(),
						expected: height,
					})?;
					if line_pos + n > width {
						return Err(CodecError::Truncated {
							produced: rows.len(),
							expected: height,
						});
					}
					current[line_pos..line_pos + n].copy_from_slice(&prev[line_pos..line_pos + n]);
					line_pos += n;
				}
			} else {
				let (n, mut consumed) = if b1 < 128 {
					(usize::from(b1), 2usize)
				} else {
					let b2 = byte_at(data, ii + 2, height, rows.len())?;
					(bytes_to_len_long(b1, b2) as usize, 3)
				};
				if line_pos + n > width {
					return Err(CodecError::Truncated {
						produced: rows.len(),
						expected: height,
					});
				}
				for jj in 0..n {
					let base = ii + consumed + 3 * jj;
					let r = byte_at(data, base, height, rows.len())?;
					let g = byte_at(data, base + 1, height, rows.len())?;
					let b = byte_at(data, base + 2, height, rows.len())?;
					current[line_pos + jj] = [r, g, b];
				}
				consumed += 3 * n;
				ii += consumed;
				line_pos += n;
			}
			continue;
		}

		let (block_len, consumed) = if b0 < 128 {
			(usize::from(b0), 1usize)
		} else {
			let b1 = byte_at(data, ii + 1, height, rows.len())?;
			(bytes_to_len_long(b0, b1) as usize, 2)
		};
		let r = byte_at(data, ii + consumed, height, rows.len())?;
		let g = byte_at(data, ii + consumed + 1, height, rows.len())?;
		let b = byte_at(data, ii + consumed + 2, height, rows.len())?;

		if line_pos + block_len > width {
			return Err(CodecError::Truncated {
				produced: rows.len(),
				expected: height,
			});
		}
		for px in current.iter_mut().skip(line_pos).take(block_len) {
			*px = [r, g, b];
		}
		line_pos += block_len;
		ii += consumed + 3;
	}

	if rows.len() != height {
		return Err(CodecError::Truncated {
			produced: rows.len(),
			expected: height,
		});
	}

	let mut rgb = Vec::with_capacity(width * height * 3);
	for row in &rows {
		for px in row {
			rgb.extend_from_slice(px);
		}
	}
	CombinedFrame::from_rgb_interleaved(width, height, &rgb)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::codec::erle::encode_erle;
	use crate::codec::rle::encode_rle;

	fn checker_frame(width: usize, height: usize) -> CombinedFrame {
		let mut rgb = Vec::with_capacity(width * height * 3);
		for row in 0..height {
			for col in 0..width {
				let v = if (row + col) % 2 == 0 { 0xAB } else { 0x03 };
				rgb.extend_from_slice(&[v, v.wrapping_add(1), v.wrapping_add(2)]);
			}
		}
		CombinedFrame::from_rgb_interleaved(width, height, &rgb).unwrap()
	}

	#[test]
	fn erle_round_trip() {
		let frame = checker_frame(37, 13);
		let encoded = encode_erle(&frame).unwrap();
		let decoded = decode(encoded.as_bytes(), 37, 13).unwrap();
		assert_eq!(decoded, frame);
	}

	#[test]
	fn rle_round_trip() {
		let frame = checker_frame(37, 13);
		let encoded = encode_rle(&frame).unwrap();
		let decoded = decode(encoded.as_bytes(), 37, 13).unwrap();
		assert_eq!(decoded, frame);
	}

	#[test]
	fn repeated_row_round_trips() {
		let mut rgb = vec![0u8; 200 * 2 * 3];
		for px in rgb.chunks_mut(3) {
			px.copy_from_slice(&[1, 2, 3]);
		}
		let frame = CombinedFrame::from_rgb_interleaved(200, 2, &rgb).unwrap();
		let encoded = encode_erle(&frame).unwrap();
		let decoded = decode(encoded.as_bytes(), 200, 2).unwrap();
		assert_eq!(decoded, frame);
	}

	#[test]
	fn truncated_stream_errors() {
		let frame = checker_frame(8, 4);
		let encoded = encode_erle(&frame).unwrap();
		let bytes = encoded.as_bytes();
		let truncated = &bytes[..bytes.len() / 2];
		assert!(matches!(
			decode(truncated, 8, 4),
			Err(CodecError::Truncated { .. })
		));
	}

	#[test]
	fn missing_terminator_errors() {
		// A single nonzero byte never resolves to a complete row.
		assert!(matches!(decode(&[5], 1, 1), Err(CodecError::Truncated { .. })));
	}
}
