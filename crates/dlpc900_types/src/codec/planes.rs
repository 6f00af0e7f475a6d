//! 24-plane bit-packing: folding up to 24 binary frames into one RGB image.
//!
//! Combined frame byte layout, for pattern offset `i` within a group of 24:
//! `i` in `0..8`   -> plane B, bit `i`
//! `i` in `8..16`  -> plane G, bit `i-8`
//! `i` in `16..24` -> plane R, bit `i-16`

use super::error::CodecError;

/// A single H×W binary frame, values restricted to `{0, 1}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryPattern {
	width: usize,
	height: usize,
	data: Vec<u8>,
}

impl BinaryPattern {
	/// Builds a pattern from a row-major `{0,1}` buffer.
	///
	/// # Errors
	///
	/// Returns [`CodecError::NotBinary`] if any value is not 0 or 1, or
	/// [`CodecError::ShapeMismatch`] if `data.len() != width * height`.
	pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, CodecError> {
		if data.len() != width * height {
			return Err(CodecError::ShapeMismatch {
				expected: width * height,
				actual: data.len(),
			});
		}
		if let Some(&bad) = data.iter().find(|&&v| v > 1) {
			return Err(CodecError::NotBinary(bad));
		}
		Ok(Self { width, height, data })
	}

	/// Frame width in pixels.
	pub fn width(&self) -> usize {
		self.width
	}

	/// Frame height in pixels.
	pub fn height(&self) -> usize {
		self.height
	}

	/// Row-major `{0,1}` pixel buffer.
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	fn at(&self, row: usize, col: usize) -> u8 {
		self.data[row * self.width + col]
	}
}

/// Up to 24 binary patterns packed bitwise into a 3×H×W RGB byte image.
///
/// Planes are stored in `[R, G, B]` order, each `H*W` bytes, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedFrame {
	width: usize,
	height: usize,
	planes: [Vec<u8>; 3],
}

const PLANE_R: usize = 0;
const PLANE_G: usize = 1;
const PLANE_B: usize = 2;

impl CombinedFrame {
	/// Width shared by every plane.
	pub fn width(&self) -> usize {
		self.width
	}

	/// Height shared by every plane.
	pub fn height(&self) -> usize {
		self.height
	}

	/// Red plane, row-major, `H*W` bytes.
	pub fn red(&self) -> &[u8] {
		&self.planes[PLANE_R]
	}

	/// Green plane, row-major, `H*W` bytes.
	pub fn green(&self) -> &[u8] {
		&self.planes[PLANE_G]
	}

	/// Blue plane, row-major, `H*W` bytes.
	pub fn blue(&self) -> &[u8] {
		&self.planes[PLANE_B]
	}

	/// Interleaved `3*H*W` RGB-triple buffer, the layout the codec row-copy
	/// logic and the BMP payload both expect.
	pub fn to_rgb_interleaved(&self) -> Vec<u8> {
		let mut out = Vec::with_capacity(self.width * self.height * 3);
		for px in 0..self.width * self.height {
			out.push(self.planes[PLANE_R][px]);
			out.push(self.planes[PLANE_G][px]);
			out.push(self.planes[PLANE_B][px]);
		}
		out
	}

	/// Builds a [`CombinedFrame`] from an interleaved `3*H*W` RGB buffer.
	///
	/// # Errors
	///
	/// Returns [`CodecError::ShapeMismatch`] if `rgb.len() != 3 * width *
	/// height`.
	pub fn from_rgb_interleaved(
		width: usize,
		height: usize,
		rgb: &[u8],
	) -> Result<Self, CodecError> {
		let npixels = width * height;
		if rgb.len() != npixels * 3 {
			return Err(CodecError::ShapeMismatch {
				expected: npixels * 3,
				actual: rgb.len(),
			});
		}

		let mut planes = [vec![0u8; npixels], vec![0u8; npixels], vec![0u8; npixels]];
		for px in 0..npixels {
			planes[PLANE_R][px] = rgb[px * 3];
			planes[PLANE_G][px] = rgb[px * 3 + 1];
			planes[PLANE_B][px] = rgb[px * 3 + 2];
		}

		Ok(Self {
			width,
			height,
			planes,
		})
	}
}

/// Folds `patterns` (all the same H×W) into `ceil(N/24)` [`CombinedFrame`]s.
///
/// Missing patterns at the tail of the last group contribute zero bits.
///
/// # Errors
///
/// Returns [`CodecError::ShapeMismatch`] if `patterns` is empty or the
/// patterns do not share a common width/height.
pub fn combine(patterns: &[BinaryPattern]) -> Result<Vec<CombinedFrame>, CodecError> {
	let Some(first) = patterns.first() else {
		return Err(CodecError::ShapeMismatch {
			expected: 1,
			actual: 0,
		});
	};
	let (width, height) = (first.width(), first.height());
	for p in patterns {
		if p.width() != width || p.height() != height {
			return Err(CodecError::ShapeMismatch {
				expected: width * height,
				actual: p.width() * p.height(),
			});
		}
	}

	let npixels = width * height;
	let ngroups = patterns.len().div_ceil(24);
	let mut groups = Vec::with_capacity(ngroups);

	for group in 0..ngroups {
		let mut planes = [vec![0u8; npixels], vec![0u8; npixels], vec![0u8; npixels]];
		let base = group * 24;
		let count = 24.min(patterns.len() - base);

		for i in 0..count {
			let pattern = &patterns[base + i];
			let (plane, bit) = if i < 8 {
				(PLANE_B, i)
			} else if i < 16 {
				(PLANE_G, i - 8)
			} else {
				(PLANE_R, i - 16)
			};

			for row in 0..height {
				for col in 0..width {
					if pattern.at(row, col) != 0 {
						planes[plane][row * width + col] |= 1 << bit;
					}
				}
			}
		}

		groups.push(CombinedFrame {
			width,
			height,
			planes,
		});
	}

	Ok(groups)
}

/// Splits a [`CombinedFrame`] back into its up to 24 [`BinaryPattern`]s.
///
/// Exact inverse of [`combine`]: the red plane is shifted right by
/// `i - 16`, matching the bit position each pattern was packed at.
pub fn split(frame: &CombinedFrame) -> [BinaryPattern; 24] {
	let (width, height) = (frame.width(), frame.height());
	std::array::from_fn(|i| {
		let (plane, bit) = if i < 8 {
			(frame.blue(), i)
		} else if i < 16 {
			(frame.green(), i - 8)
		} else {
			(frame.red(), i - 16)
		};

		let data = plane.iter().map(|&byte| (byte >> bit) & 1).collect();
		BinaryPattern::new(width, height, data).expect("split always produces binary data")
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn solid(width: usize, height: usize, value: u8) -> BinaryPattern {
		BinaryPattern::new(width, height, vec![value; width * height]).unwrap()
	}

	#[test]
	fn combine_25_ones_produces_two_frames_with_expected_bytes() {
		let patterns: Vec<_> = (0..25).map(|_| solid(1, 1, 1)).collect();
		let frames = combine(&patterns).unwrap();
		assert_eq!(frames.len(), 2);

		assert_eq!(frames[0].red()[0], 0x01);
		assert_eq!(frames[0].green()[0], 0xFF);
		assert_eq!(frames[0].blue()[0], 0xFF);

		assert_eq!(frames[1].red()[0], 0x00);
		assert_eq!(frames[1].green()[0], 0x00);
		assert_eq!(frames[1].blue()[0], 0x01);
	}

	#[test]
	fn split_is_exact_inverse_of_combine() {
		let patterns: Vec<_> = (0..24)
			.map(|i| solid(4, 3, if i % 2 == 0 { 1 } else { 0 }))
			.collect();
		let frames = combine(&patterns).unwrap();
		let split_back = split(&frames[0]);
		for (original, recovered) in patterns.iter().zip(split_back.iter()) {
			assert_eq!(original.data(), recovered.data());
		}
	}

	#[test]
	fn split_combine_round_trip_tail_padding_is_zero() {
		let patterns: Vec<_> = (0..5).map(|_| solid(2, 2, 1)).collect();
		let frames = combine(&patterns).unwrap();
		assert_eq!(frames.len(), 1);
		let split_back = split(&frames[0]);
		for recovered in split_back.iter().take(5) {
			assert!(recovered.data().iter().all(|&v| v == 1));
		}
		for recovered in split_back.iter().skip(5) {
			assert!(recovered.data().iter().all(|&v| v == 0));
		}
	}

	#[test]
	fn rejects_non_binary_values() {
		assert!(matches!(
			BinaryPattern::new(1, 1, vec![2]),
			Err(CodecError::NotBinary(2))
		));
	}

	#[test]
	fn rejects_mismatched_shapes() {
		let patterns = vec![solid(1, 1, 1), solid(2, 2, 1)];
		assert!(matches!(
			combine(&patterns),
			Err(CodecError::ShapeMismatch { .. })
		));
	}
}
