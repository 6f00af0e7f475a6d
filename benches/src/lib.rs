//! Benchmark helper utilities for `dlpc900-rs`.
//!
//! Generates synthetic binary patterns that exercise the codec's
//! row-copy, run-encoding, and literal-triple paths, since benchmarking
//! against real captured frames isn't practical for a hardware driver.

use dlpc900_types::codec::BinaryPattern;

/// A single solid-value pattern: every pixel `value`.
pub fn solid(width: usize, height: usize, value: u8) -> BinaryPattern {
	BinaryPattern::new(width, height, vec![value; width * height]).expect("solid patterns are always valid")
}

/// A pattern with long horizontal runs (half the row one value, half the
/// other), exercising the row-copy and long-run encode paths.
pub fn half_split(width: usize, height: usize) -> BinaryPattern {
	let mut data = Vec::with_capacity(width * height);
	for _ in 0..height {
		for col in 0..width {
			data.push(if col < width / 2 { 1 } else { 0 });
		}
	}
	BinaryPattern::new(width, height, data).expect("half_split patterns are always valid")
}

/// A checkerboard pattern, worst-case for run-length encoding: every run
/// has length 1.
pub fn checkerboard(width: usize, height: usize) -> BinaryPattern {
	let mut data = Vec::with_capacity(width * height);
	for row in 0..height {
		for col in 0..width {
			data.push(((row + col) % 2) as u8);
		}
	}
	BinaryPattern::new(width, height, data).expect("checkerboard patterns are always valid")
}

/// Common benchmark sizes.
pub mod sizes {
	/// Tiny pattern: 64x64.
	pub const TINY: (usize, usize) = (64, 64);
	/// DLP6500-sized pattern: 1920x1080.
	pub const DLP6500: (usize, usize) = (1920, 1080);
	/// DLP9000-sized pattern (full width; per-controller is half): 2560x1600.
	pub const DLP9000: (usize, usize) = (2560, 1600);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn solid_pattern_has_expected_shape() {
		let p = solid(4, 3, 1);
		assert_eq!(p.width(), 4);
		assert_eq!(p.height(), 3);
		assert!(p.data().iter().all(|&v| v == 1));
	}

	#[test]
	fn checkerboard_alternates() {
		let p = checkerboard(2, 1);
		assert_eq!(p.data(), &[0, 1]);
	}
}
