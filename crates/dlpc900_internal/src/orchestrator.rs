//! High-level pattern upload flows: on-the-fly and pre-stored sequences,
//! plus a preset-sequence convenience composition.

use std::time::Duration;

use log::info;

use dlpc900_types::codec::{combine, encode_erle, BinaryPattern, CombinedFrame};
use dlpc900_types::{CompressionMode, LutEntry};

use crate::controller::{ControllerHandle, ControllerSelect, PatternMode, SequenceCommand, TriggerEdge};
use crate::error::{DmdError, ValidationError};
use crate::transport::Transport;

/// Settling delay between stopping the sequencer and beginning a fresh
/// upload, to let the device's internal state machine re-arm.
pub const REOPEN_SETTLING_DELAY: Duration = Duration::from_millis(50);

fn index_to_pic_bit(index: usize) -> (u8, u8) {
	((index / 24) as u8, (index % 24) as u8)
}

/// Splits a combined frame's columns in half, for dual-controller models
/// that load each half onto a separate physical controller.
fn split_columns(frame: &CombinedFrame) -> Result<(CombinedFrame, CombinedFrame), DmdError> {
	let (width, height) = (frame.width(), frame.height());
	let half = width / 2;
	let rgb = frame.to_rgb_interleaved();

	let mut left = Vec::with_capacity(half * height * 3);
	let mut right = Vec::with_capacity(half * height * 3);
	for row in 0..height {
		let row_start = row * width * 3;
		left.extend_from_slice(&rgb[row_start..row_start + half * 3]);
		right.extend_from_slice(&rgb[row_start + half * 3..row_start + width * 3]);
	}

	Ok((
		CombinedFrame::from_rgb_interleaved(half, height, &left)?,
		CombinedFrame::from_rgb_interleaved(half, height, &right)?,
	))
}

fn encode(frame: &CombinedFrame, mode: CompressionMode) -> Result<Vec<u8>, DmdError> {
	match mode {
		CompressionMode::Erle => Ok(encode_erle(frame)?.into_bytes()),
		CompressionMode::Rle => Ok(dlpc900_types::codec::encode_rle(frame)?.into_bytes()),
		CompressionMode::None => Err(ValidationError::CompressionUnsupported(mode).into()),
	}
}

/// Broadcasts a single scalar to `count` entries, or validates an
/// already-matching-length list.
fn broadcast(values: &[u32], count: usize) -> Result<Vec<u32>, DmdError> {
	match values.len() {
		1 => Ok(vec![values[0]; count]),
		n if n == count => Ok(values.to_vec()),
		actual => Err(ValidationError::BroadcastLengthMismatch { expected: count, actual }.into()),
	}
}

impl<T: Transport> ControllerHandle<T> {
	/// Uploads an on-the-fly pattern sequence: defines one LUT entry per
	/// pattern, then writes each 24-pattern-group BMP in reverse order.
	///
	/// Only [`CompressionMode::Erle`] and [`CompressionMode::Rle`] have a
	/// working encoder; `compression_mode` of [`CompressionMode::None`]
	/// returns [`ValidationError::CompressionUnsupported`].
	pub fn upload_pattern_sequence(
		&mut self,
		patterns: &[BinaryPattern],
		exposures_us: &[u32],
		dark_times_us: &[u32],
		triggered: bool,
		clear_pattern_after_trigger: bool,
		num_repeats: u32,
		compression_mode: CompressionMode,
	) -> Result<(), DmdError> {
		let npatterns = patterns.len();
		let exposures = broadcast(exposures_us, npatterns)?;
		let dark_times = broadcast(dark_times_us, npatterns)?;

		self.start_stop_sequence(SequenceCommand::Stop)?;
		self.set_pattern_mode(PatternMode::OnTheFly)?;
		self.start_stop_sequence(SequenceCommand::Stop)?;

		for (i, (exposure, dark)) in exposures.iter().zip(dark_times.iter()).enumerate() {
			let (pic, bit) = index_to_pic_bit(i);
			let entry = LutEntry::new(i as u16, *exposure, *dark, triggered, clear_pattern_after_trigger, 1, false, pic, bit)
				.map_err(ValidationError::from)?;
			self.pattern_display_lut_definition(&entry)?;
		}

		self.pattern_display_lut_configuration(npatterns as u16, num_repeats)?;

		let groups = combine(patterns)?;
		for (i, group) in groups.iter().enumerate().rev() {
			info!("sending pattern group {}/{}", i + 1, groups.len());
			if self.profile().model.dual_controller() {
				let (left, right) = split_columns(group)?;
				let encoded_left = encode(&left, compression_mode)?;
				let encoded_right = encode(&right, compression_mode)?;
				self.init_pattern_bmp_load(encoded_left.len() as u32 + 48, i as u16, ControllerSelect::Primary)?;
				self.pattern_bmp_load(&encoded_left, compression_mode, ControllerSelect::Primary)?;
				self.init_pattern_bmp_load(encoded_right.len() as u32 + 48, i as u16, ControllerSelect::Secondary)?;
				self.pattern_bmp_load(&encoded_right, compression_mode, ControllerSelect::Secondary)?;
			} else {
				let encoded = encode(group, compression_mode)?;
				self.init_pattern_bmp_load(encoded.len() as u32 + 48, i as u16, ControllerSelect::Primary)?;
				self.pattern_bmp_load(&encoded, compression_mode, ControllerSelect::Primary)?;
			}
		}

		self.pattern_display_lut_configuration(npatterns as u16, num_repeats)?;
		self.start_stop_sequence(SequenceCommand::Start)?;
		if triggered {
			self.start_stop_sequence(SequenceCommand::Stop)?;
		}

		Ok(())
	}

	/// Configures a sequence from patterns already resident in on-chip
	/// flash (BMPs loaded by a prior [`Self::upload_pattern_sequence`] call
	/// or preloaded firmware patterns), addressing each by its firmware
	/// index.
	pub fn set_pattern_sequence(
		&mut self,
		pattern_indices: &[u32],
		exposures_us: &[u32],
		dark_times_us: &[u32],
		triggered: bool,
		clear_pattern_after_trigger: bool,
		num_repeats: u32,
		mode: PatternMode,
	) -> Result<(), DmdError> {
		let nimgs = pattern_indices.len();
		let exposures = broadcast(exposures_us, nimgs)?;
		let dark_times = broadcast(dark_times_us, nimgs)?;

		self.start_stop_sequence(SequenceCommand::Stop)?;
		self.set_pattern_mode(mode)?;
		self.start_stop_sequence(SequenceCommand::Stop)?;

		for (i, ((&fw_index, exposure), dark)) in pattern_indices.iter().zip(exposures.iter()).zip(dark_times.iter()).enumerate() {
			let (pic, bit) = index_to_pic_bit(fw_index as usize);
			let entry = LutEntry::new(i as u16, *exposure, *dark, triggered, clear_pattern_after_trigger, 1, false, pic, bit)
				.map_err(ValidationError::from)?;
			self.pattern_display_lut_definition(&entry)?;
		}

		self.pattern_display_lut_configuration(nimgs as u16, num_repeats)?;
		self.start_stop_sequence(SequenceCommand::Start)?;
		if triggered {
			self.start_stop_sequence(SequenceCommand::Stop)?;
		}

		Ok(())
	}

	/// Stops the sequencer and programs a pre-stored sequence by firmware
	/// index. Reads back the current trigger-in configuration first so
	/// callers can log or sanity-check it; this call doesn't otherwise
	/// use the values.
	pub fn program_preset_sequence(
		&mut self,
		firmware_indices: &[u32],
		exposure_us: Option<u32>,
		triggered: bool,
		clear_pattern_after_trigger: bool,
	) -> Result<((u16, u8), u8), DmdError> {
		self.start_stop_sequence(SequenceCommand::Stop)?;

		let trig1 = self.get_trigger_in1()?;
		let trig2 = self.get_trigger_in2()?;

		let exposure = exposure_us.unwrap_or(crate::controller::MIN_TIME_US);
		let exposures = vec![exposure; firmware_indices.len()];
		let dark_times = vec![0u32; firmware_indices.len()];

		self.set_pattern_sequence(
			firmware_indices,
			&exposures,
			&dark_times,
			triggered,
			clear_pattern_after_trigger,
			0,
			PatternMode::PreStored,
		)?;

		Ok((trig1, trig2))
	}

	/// Sets the advance-frame trigger edge, used before an on-the-fly or
	/// pre-stored upload that should wait for an external trigger.
	pub fn arm_trigger_in1(&mut self, delay_us: u32, edge: TriggerEdge) -> Result<(), DmdError> {
		self.set_trigger_in1(delay_us, edge)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::controller::{DeviceProfile, DmdModel};
	use crate::transport::mock::MockTransport;

	fn solid(width: usize, height: usize, value: u8) -> BinaryPattern {
		BinaryPattern::new(width, height, vec![value; width * height]).unwrap()
	}

	#[test]
	fn upload_rejects_mismatched_broadcast_length() {
		let profile = DeviceProfile::from_model(DmdModel::Dlp6500).unwrap();
		let mut handle = ControllerHandle::new(MockTransport::new(), profile);
		let patterns = vec![solid(4, 4, 1), solid(4, 4, 0)];
		let err = handle
			.upload_pattern_sequence(&patterns, &[105, 200, 300], &[0], false, false, 0, CompressionMode::Erle)
			.unwrap_err();
		assert!(matches!(
			err,
			DmdError::Validation(ValidationError::BroadcastLengthMismatch { expected: 2, actual: 3 })
		));
	}

	#[test]
	fn upload_rejects_none_compression() {
		let profile = DeviceProfile::from_model(DmdModel::Dlp6500).unwrap();
		let mut handle = ControllerHandle::new(MockTransport::new(), profile);
		let patterns = vec![solid(2, 2, 1)];
		let err = handle
			.upload_pattern_sequence(&patterns, &[105], &[0], false, false, 0, CompressionMode::None)
			.unwrap_err();
		assert!(matches!(
			err,
			DmdError::Validation(ValidationError::CompressionUnsupported(CompressionMode::None))
		));
	}

	#[test]
	fn split_columns_halves_width() {
		let patterns = vec![solid(4, 2, 1)];
		let frames = combine(&patterns).unwrap();
		let (left, right) = split_columns(&frames[0]).unwrap();
		assert_eq!(left.width(), 2);
		assert_eq!(right.width(), 2);
		assert_eq!(left.height(), 2);
	}

	#[test]
	fn index_to_pic_bit_wraps_every_24() {
		assert_eq!(index_to_pic_bit(0), (0, 0));
		assert_eq!(index_to_pic_bit(23), (0, 23));
		assert_eq!(index_to_pic_bit(24), (1, 0));
	}

	#[test]
	fn upload_of_thirty_patterns_does_not_reject_bit_indices_past_seven() {
		let profile = DeviceProfile::from_model(DmdModel::Dlp6500).unwrap();

		// set_pattern_mode + 30 LUT definitions + 2 LUT configurations + 2
		// init_pattern_bmp_load calls (ceil(30/24) groups, single controller)
		// each read a reply; every other command in the flow doesn't.
		let mut transport = MockTransport::new();
		for _ in 0..35 {
			transport.push_reply([0u8; crate::transport::PACKET_SIZE]);
		}
		let mut handle = ControllerHandle::new(transport, profile);

		let patterns: Vec<_> = (0..30).map(|i| solid(2, 2, (i % 2) as u8)).collect();
		let exposures = vec![105u32];
		let dark_times = vec![0u32];

		handle
			.upload_pattern_sequence(&patterns, &exposures, &dark_times, false, false, 0, CompressionMode::Erle)
			.expect("pattern 8 onward must not trip StoredBitIndexOutOfRange");
	}
}
