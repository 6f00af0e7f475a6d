//! Shared data-model types that don't belong to the codec or to persisted
//! configuration: lookup-table entries and the pattern compression mode
//! vocabulary consulted by both the codec and the orchestration layer.

use thiserror::Error;

/// Errors raised validating a [`LutEntry`] before serialization.
#[derive(Debug, Error)]
pub enum ModelError {
	/// `exposure_us` was below the device's minimum dwell time.
	#[error("exposure {0}us is below the minimum of 105us")]
	ExposureTooShort(u32),

	/// `sequence_index` did not fit the LUT's 512 slots.
	#[error("sequence index {0} is out of range (must be < 512)")]
	SequenceIndexOutOfRange(u16),

	/// `bit_depth` was not 1 (the only value the on-chip LUT supports).
	#[error("bit depth {0} is unsupported (only 1 is supported)")]
	UnsupportedBitDepth(u8),

	/// `stored_bit_index` did not fit one 24-plane group.
	#[error("stored bit index {0} is out of range (must be < 24)")]
	StoredBitIndexOutOfRange(u8),
}

/// Pattern payload compression scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
	/// Uncompressed payload.
	None,
	/// Run-length encoding.
	Rle,
	/// Enhanced run-length encoding.
	Erle,
}

/// One slot in the DMD's on-chip display lookup table.
///
/// Serializes to the 12-byte MBOX_DATA payload the LUT entry definition
/// command expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LutEntry {
	sequence_index: u16,
	exposure_us: u32,
	dark_us: u32,
	wait_for_trigger: bool,
	clear_after_trigger: bool,
	bit_depth: u8,
	trigger2_output_enabled: bool,
	stored_image_index: u8,
	stored_bit_index: u8,
}

impl LutEntry {
	/// Builds a LUT entry, validating every field invariant up front.
	///
	/// # Errors
	///
	/// Returns the first violated [`ModelError`] invariant: exposure below
	/// 105us, sequence index >= 512, bit depth other than 1, or stored bit
	/// index >= 24.
	#[allow(clippy::too_many_arguments)]
	pub fn new(
		sequence_index: u16,
		exposure_us: u32,
		dark_us: u32,
		wait_for_trigger: bool,
		clear_after_trigger: bool,
		bit_depth: u8,
		trigger2_output_enabled: bool,
		stored_image_index: u8,
		stored_bit_index: u8,
	) -> Result<Self, ModelError> {
		if exposure_us < 105 {
			return Err(ModelError::ExposureTooShort(exposure_us));
		}
		if sequence_index >= 512 {
			return Err(ModelError::SequenceIndexOutOfRange(sequence_index));
		}
		if bit_depth != 1 {
			return Err(ModelError::UnsupportedBitDepth(bit_depth));
		}
		if stored_bit_index >= 24 {
			return Err(ModelError::StoredBitIndexOutOfRange(stored_bit_index));
		}

		Ok(Self {
			sequence_index,
			exposure_us,
			dark_us,
			wait_for_trigger,
			clear_after_trigger,
			bit_depth,
			trigger2_output_enabled,
			stored_image_index,
			stored_bit_index,
		})
	}

	/// Sequence position this entry occupies.
	pub fn sequence_index(&self) -> u16 {
		self.sequence_index
	}

	/// Serializes to the 12-byte MBOX_DATA payload.
	pub fn to_payload(&self) -> [u8; 12] {
		let idx = self.sequence_index.to_le_bytes();
		let exposure = self.exposure_us.to_le_bytes();
		let dark = self.dark_us.to_le_bytes();

		let misc = (self.wait_for_trigger as u8)
			| (0b100 << 1)
			| ((self.clear_after_trigger as u8) << 7);

		[
			idx[0],
			idx[1],
			exposure[0],
			exposure[1],
			exposure[2],
			misc,
			dark[0],
			dark[1],
			dark[2],
			self.trigger2_output_enabled as u8,
			self.stored_image_index,
			self.stored_bit_index * 8,
		]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn e6_reference_payload() {
		let entry = LutEntry::new(0, 105, 0, true, false, 1, false, 0, 0).unwrap();
		assert_eq!(
			entry.to_payload(),
			[0x00, 0x00, 0x69, 0x00, 0x00, 0b0000_1001, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
		);
	}

	#[test]
	fn rejects_short_exposure() {
		assert!(matches!(
			LutEntry::new(0, 104, 0, false, false, 1, false, 0, 0),
			Err(ModelError::ExposureTooShort(104))
		));
	}

	#[test]
	fn rejects_out_of_range_sequence_index() {
		assert!(matches!(
			LutEntry::new(512, 105, 0, false, false, 1, false, 0, 0),
			Err(ModelError::SequenceIndexOutOfRange(512))
		));
	}

	#[test]
	fn rejects_unsupported_bit_depth() {
		assert!(matches!(
			LutEntry::new(0, 105, 0, false, false, 2, false, 0, 0),
			Err(ModelError::UnsupportedBitDepth(2))
		));
	}

	#[test]
	fn stored_bit_index_is_scaled_by_eight() {
		let entry = LutEntry::new(0, 105, 0, false, false, 1, false, 0, 3).unwrap();
		assert_eq!(entry.to_payload()[11], 24);
	}

	#[test]
	fn accepts_stored_bit_index_up_to_23() {
		let entry = LutEntry::new(0, 105, 0, false, false, 1, false, 0, 23).unwrap();
		assert_eq!(entry.to_payload()[11], 184);
	}

	#[test]
	fn rejects_stored_bit_index_at_24() {
		assert!(matches!(
			LutEntry::new(0, 105, 0, false, false, 1, false, 0, 24),
			Err(ModelError::StoredBitIndexOutOfRange(24))
		));
	}
}
