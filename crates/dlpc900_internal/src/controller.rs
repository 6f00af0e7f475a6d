//! Device profile metadata and typed command wrappers sitting directly on
//! top of the command framer.

use log::{debug, warn};

use dlpc900_types::{CompressionMode, LutEntry};

use crate::error::{DmdError, ValidationError};
use crate::framer::{Framer, RwMode};
use crate::transport::Transport;

/// Maximum LUT sequence position the on-chip table supports.
pub const MAX_LUT_INDEX: u16 = 511;
/// Minimum exposure/trigger dwell time the device will accept.
pub const MIN_TIME_US: u32 = 105;
/// Largest payload one `MBOX_DATA`/`PATMEM_LOAD_DATA_*` write may carry
/// before it must be split into another command.
const MAX_CMD_PAYLOAD: usize = 504;

mod opcode {
	pub const READ_ERROR_CODE: u16 = 0x0100;
	pub const READ_ERROR_DESCRIPTION: u16 = 0x0101;
	pub const GET_HARDWARE_STATUS: u16 = 0x1A0A;
	pub const GET_SYSTEM_STATUS: u16 = 0x1A0B;
	pub const GET_MAIN_STATUS: u16 = 0x1A0C;
	pub const GET_FIRMWARE_VERSION: u16 = 0x0205;
	pub const GET_FIRMWARE_TYPE: u16 = 0x0206;
	pub const GET_FIRMWARE_BATCH_FILE_NAME: u16 = 0x1A14;
	pub const EXECUTE_FIRMWARE_BATCH_FILE: u16 = 0x1A15;
	pub const PAT_START_STOP: u16 = 0x1A24;
	pub const DISP_MODE: u16 = 0x1A1B;
	pub const MBOX_DATA: u16 = 0x1A34;
	pub const PAT_CONFIG: u16 = 0x1A31;
	pub const PATMEM_LOAD_INIT_MASTER: u16 = 0x1A2A;
	pub const PATMEM_LOAD_DATA_MASTER: u16 = 0x1A2B;
	pub const PATMEM_LOAD_INIT_SECONDARY: u16 = 0x1A2C;
	pub const PATMEM_LOAD_DATA_SECONDARY: u16 = 0x1A2D;
	pub const TRIG_OUT1_CTL: u16 = 0x1A1D;
	pub const TRIG_OUT2_CTL: u16 = 0x1A1E;
	pub const TRIG_IN1_CTL: u16 = 0x1A35;
	pub const TRIG_IN2_CTL: u16 = 0x1A36;
}

/// Human-readable text for each device error code.
///
/// Mirrors the 0..=17 + 255 error table; unknown codes are reported as
/// `"not defined"` by [`error_description`].
const ERROR_TABLE: &[(u8, &str)] = &[
	(0, "no error"),
	(1, "batch file checksum error"),
	(2, "device failure"),
	(3, "invalid command number"),
	(4, "incompatible controller/dmd"),
	(5, "command not allowed in current mode"),
	(6, "invalid command parameter"),
	(7, "item referred by the parameter is not present"),
	(8, "out of resource (RAM/flash)"),
	(9, "invalid BMP compression type"),
	(10, "pattern bit number out of range"),
	(11, "pattern BMP not present in flash"),
	(12, "pattern dark time is out of range"),
	(13, "signal delay parameter is out of range"),
	(14, "pattern exposure time is out of range"),
	(15, "pattern number is out of range"),
	(16, "invalid pattern definition"),
	(17, "pattern image memory address is out of range"),
	(255, "internal error"),
];

/// Looks up an error code's description, falling back to `"not defined"`.
pub fn error_description(code: u8) -> &'static str {
	ERROR_TABLE
		.iter()
		.find(|(c, _)| *c == code)
		.map_or("not defined", |(_, desc)| desc)
}

const MAIN_STATUS_BITS: [&str; 8] = [
	"DMD micromirrors are parked",
	"sequencer is running normally",
	"video is frozen",
	"external video source is locked",
	"port 1 syncs valid",
	"port 2 syncs valid",
	"reserved",
	"reserved",
];

const HW_STATUS_BITS: [&str; 8] = [
	"internal initialization success",
	"incompatible controller or DMD",
	"DMD rest controller error",
	"forced swap error",
	"slave controller present",
	"reserved",
	"sequence abort status error",
	"sequencer error",
];

/// Decodes one status byte into its eight named boolean flags, in bit
/// order 0..=7.
fn decode_status_bits(byte: u8, names: &[&'static str; 8]) -> Vec<(&'static str, bool)> {
	names.iter().enumerate().map(|(bit, name)| (*name, byte & (1 << bit) != 0)).collect()
}

/// Known DLPC900-family DMD chipsets, with the fixed geometry two of them
/// ship with.
///
/// A value type rather than a trait object: every profile exposes the same
/// small set of fields, so a fixed enum is all a caller ever needs to match
/// on, and it keeps `ControllerHandle` free of dynamic dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DmdModel {
	/// 1920x1080, single controller.
	Dlp6500,
	/// 2560x1600, dual controller (each half drives 1280 columns).
	Dlp9000,
	/// Recognized but not carrying a fixed resolution; callers must supply
	/// one out of band, e.g. via [`DeviceProfile::with_resolution`].
	Dlp670S,
	/// As [`Self::Dlp670S`].
	Dlp500Yx,
	/// As [`Self::Dlp670S`].
	Dlp5500,
	/// A `Get_Firmware_Type` reply carried a code outside 0..=5.
	Unknown(u8),
}

impl DmdModel {
	/// Maps a `Get_Firmware_Type` reply byte to a model.
	pub fn from_code(code: u8) -> Self {
		match code {
			1 => Self::Dlp6500,
			2 => Self::Dlp9000,
			3 => Self::Dlp670S,
			4 => Self::Dlp500Yx,
			5 => Self::Dlp5500,
			other => Self::Unknown(other),
		}
	}

	/// Fixed micromirror array geometry, where the chipset has one.
	///
	/// Only [`DmdModel::Dlp6500`] and [`DmdModel::Dlp9000`] have a
	/// hard-coded resolution and return `Some`; the rest require the
	/// caller to supply geometry explicitly (for instance from
	/// a persisted `Config`).
	pub fn resolution(&self) -> Option<(u32, u32)> {
		match self {
			Self::Dlp6500 => Some((1920, 1080)),
			Self::Dlp9000 => Some((2560, 1600)),
			_ => None,
		}
	}

	/// Whether this model splits each pattern across two physical
	/// controllers (and therefore across two `PATMEM_LOAD_*` command
	/// pairs).
	pub fn dual_controller(&self) -> bool {
		matches!(self, Self::Dlp9000)
	}
}

/// A fully resolved device geometry: a [`DmdModel`] paired with the width
/// and height the caller intends to drive it at.
///
/// Constructing one is the point where an `Unknown`/unresolved-geometry
/// model is turned into concrete numbers, either from [`DmdModel::resolution`]
/// or from an explicit override the caller supplies (for `Dlp670S`/`Dlp500Yx`/
/// `Dlp5500`, or to override the fixed profiles).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceProfile {
	/// Chipset this profile describes.
	pub model: DmdModel,
	/// Pattern width in pixels.
	pub width: u32,
	/// Pattern height in pixels.
	pub height: u32,
}

impl DeviceProfile {
	/// Builds a profile from a model's built-in resolution.
	///
	/// Returns `None` for models with no fixed geometry; use
	/// [`Self::with_resolution`] for those.
	pub fn from_model(model: DmdModel) -> Option<Self> {
		let (width, height) = model.resolution()?;
		Some(Self { model, width, height })
	}

	/// Builds a profile with an explicit, caller-supplied resolution.
	pub fn with_resolution(model: DmdModel, width: u32, height: u32) -> Self {
		Self { model, width, height }
	}

	/// Per-controller pattern width: half of `width` on dual-controller
	/// models, `width` otherwise.
	pub fn controller_width(&self) -> u32 {
		if self.model.dual_controller() {
			self.width / 2
		} else {
			self.width
		}
	}
}

/// A decoded `Get_Firmware_Version` reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirmwareVersion {
	/// Application firmware version, `major.minor.patch`.
	pub app_version: (u8, u8, u16),
	/// API version, `major.minor.patch`.
	pub api_version: (u8, u8, u16),
	/// Software configuration revision, `major.minor.patch`.
	pub software_config_revision: (u8, u8, u16),
	/// Sequencer configuration revision, `major.minor.patch`.
	pub sequencer_config_revision: (u8, u8, u16),
}

fn decode_version_quad(bytes: &[u8]) -> (u8, u8, u16) {
	let patch = u16::from_le_bytes([bytes[0], bytes[1]]);
	(bytes[3], bytes[2], patch)
}

/// A decoded `Get_Firmware_Type` reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirmwareType {
	/// Chipset the firmware reports.
	pub model: DmdModel,
	/// NUL-terminated firmware tag string.
	pub firmware_tag: String,
}

fn decode_nul_terminated(bytes: &[u8]) -> String {
	bytes.iter().take_while(|b| **b != 0).map(|b| *b as char).collect()
}

/// A pattern advance/start trigger edge polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEdge {
	/// Byte value 0x00.
	Rising,
	/// Byte value 0x01.
	Falling,
}

impl TriggerEdge {
	fn to_byte(self) -> u8 {
		match self {
			Self::Rising => 0x00,
			Self::Falling => 0x01,
		}
	}
}

/// Display mode the `DISP_MODE` command selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternMode {
	/// Byte 0x00.
	Video,
	/// Byte 0x01: sequence built from previously stored BMPs.
	PreStored,
	/// Byte 0x02.
	VideoPattern,
	/// Byte 0x03: sequence uploaded fresh each run.
	OnTheFly,
}

impl PatternMode {
	fn to_byte(self) -> u8 {
		match self {
			Self::Video => 0x00,
			Self::PreStored => 0x01,
			Self::VideoPattern => 0x02,
			Self::OnTheFly => 0x03,
		}
	}
}

/// A sequencer start/stop/pause command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceCommand {
	/// Data byte 0x02, sequence byte 0x08.
	Start,
	/// Data byte 0x00, sequence byte 0x05.
	Stop,
	/// Data byte 0x01, sequence byte 0x00.
	Pause,
}

impl SequenceCommand {
	fn bytes(self) -> (u8, u8) {
		match self {
			Self::Start => (0x02, 0x08),
			Self::Stop => (0x00, 0x05),
			Self::Pause => (0x01, 0x00),
		}
	}
}

/// Which physical controller a BMP load targets on dual-controller models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerSelect {
	/// Master/primary controller.
	Primary,
	/// Slave/secondary controller (dual-controller models only).
	Secondary,
}

/// A thin, typed wrapper over a [`Framer`]: one method per device command,
/// translating to and from the wire payloads the driver's opcode table
/// describes.
pub struct ControllerHandle<T: Transport> {
	framer: Framer<T>,
	profile: DeviceProfile,
}

impl<T: Transport> ControllerHandle<T> {
	/// Wraps an already-open transport with a resolved device profile,
	/// using [`crate::framer::DEFAULT_TIMEOUT_MS`] for reply reads.
	pub fn new(transport: T, profile: DeviceProfile) -> Self {
		Self { framer: Framer::new(transport), profile }
	}

	/// As [`Self::new`], but reads wait up to `timeout_ms` instead of the
	/// default — the value a caller would load from a
	/// [`crate::settings::Settings::hid_read_timeout_ms`].
	pub fn with_timeout_ms(transport: T, profile: DeviceProfile, timeout_ms: u32) -> Self {
		Self { framer: Framer::with_timeout_ms(transport, timeout_ms), profile }
	}

	/// Changes the reply read timeout used by subsequent commands.
	pub fn set_timeout_ms(&mut self, timeout_ms: u32) {
		self.framer.set_timeout_ms(timeout_ms);
	}

	/// The geometry this handle was opened with.
	pub fn profile(&self) -> DeviceProfile {
		self.profile
	}

	/// `Read_Error_Code`: the error code from the last executed command.
	pub fn read_error_code(&mut self) -> Result<u8, DmdError> {
		let data = self.framer.send(RwMode::Read, true, opcode::READ_ERROR_CODE, &[])?;
		data.first().copied().ok_or(DmdError::BadPayload)
	}

	/// `Read_Error_Description`: human-readable text for the last error.
	pub fn read_error_description(&mut self) -> Result<String, DmdError> {
		let data = self.framer.send(RwMode::Read, true, opcode::READ_ERROR_DESCRIPTION, &[])?;
		Ok(decode_nul_terminated(&data))
	}

	/// `Get_Hardware_Status`: eight named hardware fault flags.
	pub fn hardware_status(&mut self) -> Result<Vec<(&'static str, bool)>, DmdError> {
		let data = self.framer.send(RwMode::Read, true, opcode::GET_HARDWARE_STATUS, &[])?;
		let byte = data.first().copied().ok_or(DmdError::BadPayload)?;
		Ok(decode_status_bits(byte, &HW_STATUS_BITS))
	}

	/// `Get_System_Status`: whether the internal memory test passed.
	pub fn system_status(&mut self) -> Result<bool, DmdError> {
		let data = self.framer.send(RwMode::Read, true, opcode::GET_SYSTEM_STATUS, &[])?;
		Ok(data.first().copied().ok_or(DmdError::BadPayload)? != 0)
	}

	/// `Get_Main_Status`: eight named sequencer/video status flags.
	pub fn main_status(&mut self) -> Result<Vec<(&'static str, bool)>, DmdError> {
		let data = self.framer.send(RwMode::Read, true, opcode::GET_MAIN_STATUS, &[])?;
		let byte = data.first().copied().ok_or(DmdError::BadPayload)?;
		Ok(decode_status_bits(byte, &MAIN_STATUS_BITS))
	}

	/// `Get_Firmware_Version`: the four version quadruplets.
	pub fn firmware_version(&mut self) -> Result<FirmwareVersion, DmdError> {
		let data = self.framer.send(RwMode::Read, true, opcode::GET_FIRMWARE_VERSION, &[])?;
		if data.len() < 16 {
			return Err(DmdError::BadPayload);
		}
		Ok(FirmwareVersion {
			app_version: decode_version_quad(&data[0..4]),
			api_version: decode_version_quad(&data[4..8]),
			software_config_revision: decode_version_quad(&data[8..12]),
			sequencer_config_revision: decode_version_quad(&data[12..16]),
		})
	}

	/// `Get_Firmware_Type`: chipset model and firmware tag.
	pub fn firmware_type(&mut self) -> Result<FirmwareType, DmdError> {
		let data = self.framer.send(RwMode::Read, true, opcode::GET_FIRMWARE_TYPE, &[])?;
		let code = data.first().copied().ok_or(DmdError::BadPayload)?;
		Ok(FirmwareType { model: DmdModel::from_code(code), firmware_tag: decode_nul_terminated(&data[1..]) })
	}

	/// `TRIG_OUT1_CTL`/`TRIG_OUT2_CTL`: output trigger polarity and delays.
	/// Trigger 1 is "advance frame", trigger 2 is "enable".
	///
	/// # Errors
	///
	/// Returns [`ValidationError::TriggerDelayOutOfRange`] if either delay
	/// falls outside -20..=20000us, or
	/// [`ValidationError::TriggerDelayOrdering`] if `invert` is set and the
	/// rising delay is shorter than the falling delay.
	pub fn set_trigger_out(
		&mut self,
		trigger_number: u8,
		invert: bool,
		rising_edge_delay_us: i32,
		falling_edge_delay_us: i32,
	) -> Result<(), DmdError> {
		for delay in [rising_edge_delay_us, falling_edge_delay_us] {
			if !(-20..=20_000).contains(&delay) {
				return Err(ValidationError::TriggerDelayOutOfRange(delay).into());
			}
		}
		if invert && rising_edge_delay_us < falling_edge_delay_us {
			return Err(ValidationError::TriggerDelayOrdering {
				rising: rising_edge_delay_us,
				falling: falling_edge_delay_us,
			}
			.into());
		}

		let mut data = vec![invert as u8];
		data.extend((rising_edge_delay_us as i16).to_le_bytes());
		data.extend((falling_edge_delay_us as i16).to_le_bytes());

		let op = match trigger_number {
			1 => opcode::TRIG_OUT1_CTL,
			2 => opcode::TRIG_OUT2_CTL,
			_ => return Err(DmdError::BadPayload),
		};
		self.framer.send(RwMode::Write, true, op, &data)?;
		Ok(())
	}

	/// `TRIG_IN1_CTL` read: `(delay_us, mode_byte)` for the advance-frame
	/// input trigger.
	pub fn get_trigger_in1(&mut self) -> Result<(u16, u8), DmdError> {
		let data = self.framer.send(RwMode::Read, true, opcode::TRIG_IN1_CTL, &[])?;
		if data.len() < 3 {
			return Err(DmdError::BadPayload);
		}
		Ok((u16::from_le_bytes([data[0], data[1]]), data[2]))
	}

	/// `TRIG_IN1_CTL` write: delay and advance edge for trigger input 1.
	///
	/// # Errors
	///
	/// Returns [`ValidationError::TriggerDelayOutOfRange`] if `delay_us` is
	/// below the 104us floor enforced for this input.
	pub fn set_trigger_in1(&mut self, delay_us: u32, edge_to_advance: TriggerEdge) -> Result<(), DmdError> {
		if delay_us < 104 {
			return Err(ValidationError::TriggerDelayOutOfRange(delay_us as i32).into());
		}
		let mut data = (delay_us as u16).to_le_bytes().to_vec();
		data.push(edge_to_advance.to_byte());
		self.framer.send(RwMode::Write, true, opcode::TRIG_IN1_CTL, &data)?;
		Ok(())
	}

	/// `TRIG_IN2_CTL` read: the start/stop polarity mode byte.
	pub fn get_trigger_in2(&mut self) -> Result<u8, DmdError> {
		let data = self.framer.send(RwMode::Read, true, opcode::TRIG_IN2_CTL, &[])?;
		data.first().copied().ok_or(DmdError::BadPayload)
	}

	/// `TRIG_IN2_CTL` write: start/stop polarity for input trigger 2.
	pub fn set_trigger_in2(&mut self, edge_to_start: TriggerEdge) -> Result<(), DmdError> {
		self.framer.send(RwMode::Write, false, opcode::TRIG_IN2_CTL, &[edge_to_start.to_byte()])?;
		Ok(())
	}

	/// `DISP_MODE`: selects the display mode.
	pub fn set_pattern_mode(&mut self, mode: PatternMode) -> Result<(), DmdError> {
		self.framer.send(RwMode::Write, true, opcode::DISP_MODE, &[mode.to_byte()])?;
		Ok(())
	}

	/// `PAT_START_STOP`: start, stop, or pause the sequencer. The sequence
	/// byte doubles as a sub-command selector here, so it bypasses the
	/// framer's normal auto-increment.
	pub fn start_stop_sequence(&mut self, cmd: SequenceCommand) -> Result<(), DmdError> {
		let (data_byte, seq_byte) = cmd.bytes();
		self.framer.send_with_sequence(RwMode::Write, false, opcode::PAT_START_STOP, &[data_byte], Some(seq_byte))?;
		Ok(())
	}

	/// `Get_Firmware_Batch_File_Name`: the name stored at `batch_index`.
	pub fn fwbatch_name(&mut self, batch_index: u8) -> Result<String, DmdError> {
		let data = self.framer.send(RwMode::Read, true, opcode::GET_FIRMWARE_BATCH_FILE_NAME, &[batch_index])?;
		Ok(decode_nul_terminated(&data))
	}

	/// `Execute_Firmware_Batch_File`: runs the batch file at `batch_index`.
	pub fn execute_fwbatch(&mut self, batch_index: u8) -> Result<(), DmdError> {
		self.framer.send(RwMode::Write, true, opcode::EXECUTE_FIRMWARE_BATCH_FILE, &[batch_index])?;
		Ok(())
	}

	/// `PAT_CONFIG`: how many LUT entries the sequencer walks, and how
	/// many times to repeat (0 = infinite).
	///
	/// # Errors
	///
	/// Returns [`ValidationError::LutIndexOutOfRange`] if `num_patterns`
	/// exceeds [`MAX_LUT_INDEX`].
	pub fn pattern_display_lut_configuration(&mut self, num_patterns: u16, num_repeat: u32) -> Result<(), DmdError> {
		if num_patterns > MAX_LUT_INDEX {
			return Err(ValidationError::LutIndexOutOfRange(num_patterns).into());
		}
		let mut data = num_patterns.to_le_bytes().to_vec();
		data.extend(num_repeat.to_le_bytes());
		self.framer.send(RwMode::Write, true, opcode::PAT_CONFIG, &data)?;
		Ok(())
	}

	/// `MBOX_DATA`: writes one LUT entry definition.
	pub fn pattern_display_lut_definition(&mut self, entry: &LutEntry) -> Result<(), DmdError> {
		self.framer.send(RwMode::Write, true, opcode::MBOX_DATA, &entry.to_payload())?;
		Ok(())
	}

	/// `PATMEM_LOAD_INIT_MASTER`/`_SECONDARY`: announces the byte length of
	/// the compressed pattern about to follow.
	pub fn init_pattern_bmp_load(
		&mut self,
		pattern_length: u32,
		pattern_index: u16,
		controller: ControllerSelect,
	) -> Result<(), DmdError> {
		let mut data = pattern_index.to_le_bytes().to_vec();
		data.extend(pattern_length.to_le_bytes());
		let op = match controller {
			ControllerSelect::Primary => opcode::PATMEM_LOAD_INIT_MASTER,
			ControllerSelect::Secondary => opcode::PATMEM_LOAD_INIT_SECONDARY,
		};
		self.framer.send(RwMode::Write, true, op, &data)?;
		Ok(())
	}

	/// `PATMEM_LOAD_DATA_MASTER`/`_SECONDARY`: loads one compressed pattern
	/// (48-byte BMP header + compressed payload), chunked across as many
	/// writes as [`MAX_CMD_PAYLOAD`] requires. Pairs with a preceding call
	/// to [`Self::init_pattern_bmp_load`].
	pub fn pattern_bmp_load(
		&mut self,
		compressed_pattern: &[u8],
		compression_mode: CompressionMode,
		controller: ControllerSelect,
	) -> Result<(), DmdError> {
		let width = self.profile.controller_width();
		let height = self.profile.height;

		let mut general_data = Vec::with_capacity(48);
		general_data.extend([0x53, 0x70, 0x6C, 0x64]); // "Spld"
		general_data.extend((width as u16).to_le_bytes());
		general_data.extend((height as u16).to_le_bytes());
		general_data.extend((compressed_pattern.len() as u32).to_le_bytes());
		general_data.extend([0xFF; 8]);
		general_data.extend([0x00; 4]);
		general_data.push(0x01);
		general_data.push(match compression_mode {
			CompressionMode::None => 0x00,
			CompressionMode::Rle => 0x01,
			CompressionMode::Erle => 0x02,
		});
		general_data.push(0x01);
		general_data.extend([0x00; 2]);
		general_data.push(0x01);
		general_data.extend([0x00; 18]);

		let mut data = general_data;
		data.extend_from_slice(compressed_pattern);

		let op = match controller {
			ControllerSelect::Primary => opcode::PATMEM_LOAD_DATA_MASTER,
			ControllerSelect::Secondary => opcode::PATMEM_LOAD_DATA_SECONDARY,
		};

		let mut offset = 0;
		while offset < data.len() {
			let end = (offset + MAX_CMD_PAYLOAD).min(data.len());
			let chunk = &data[offset..end];
			let mut payload = (chunk.len() as u16).to_le_bytes().to_vec();
			payload.extend_from_slice(chunk);
			self.framer.send(RwMode::Write, false, op, &payload)?;
			offset = end;
		}

		debug!("loaded {} compressed bytes onto {:?} controller", compressed_pattern.len(), controller);
		Ok(())
	}

	/// Reads back the last error and logs its description at `warn`, used
	/// after a write whose reply carried the device error flag.
	pub fn log_last_error(&mut self) {
		match self.read_error_description() {
			Ok(desc) => warn!("device reported error: {desc}"),
			Err(err) => warn!("device reported an error, and fetching its description failed: {err}"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::transport::mock::MockTransport;

	fn handle_with(profile: DeviceProfile) -> ControllerHandle<MockTransport> {
		ControllerHandle::new(MockTransport::new(), profile)
	}

	#[test]
	fn dlp6500_resolution_is_fixed() {
		let profile = DeviceProfile::from_model(DmdModel::Dlp6500).unwrap();
		assert_eq!((profile.width, profile.height), (1920, 1080));
		assert_eq!(profile.controller_width(), 1920);
	}

	#[test]
	fn dlp9000_splits_controller_width() {
		let profile = DeviceProfile::from_model(DmdModel::Dlp9000).unwrap();
		assert_eq!(profile.controller_width(), 1280);
	}

	#[test]
	fn unresolved_models_require_explicit_resolution() {
		assert!(DeviceProfile::from_model(DmdModel::Dlp670S).is_none());
		let profile = DeviceProfile::with_resolution(DmdModel::Dlp670S, 1024, 768);
		assert_eq!((profile.width, profile.height), (1024, 768));
	}

	#[test]
	fn set_trigger_out_rejects_out_of_range_delay() {
		let mut handle = handle_with(DeviceProfile::from_model(DmdModel::Dlp6500).unwrap());
		let err = handle.set_trigger_out(1, false, 30_000, 0).unwrap_err();
		assert!(matches!(err, DmdError::Validation(ValidationError::TriggerDelayOutOfRange(30_000))));
	}

	#[test]
	fn set_trigger_out_rejects_inverted_ordering() {
		let mut handle = handle_with(DeviceProfile::from_model(DmdModel::Dlp6500).unwrap());
		let err = handle.set_trigger_out(1, true, 10, 20).unwrap_err();
		assert!(matches!(err, DmdError::Validation(ValidationError::TriggerDelayOrdering { .. })));
	}

	#[test]
	fn pattern_lut_configuration_rejects_overflow() {
		let mut handle = handle_with(DeviceProfile::from_model(DmdModel::Dlp6500).unwrap());
		let err = handle.pattern_display_lut_configuration(600, 0).unwrap_err();
		assert!(matches!(err, DmdError::Validation(ValidationError::LutIndexOutOfRange(600))));
	}

	#[test]
	fn error_table_falls_back_to_not_defined() {
		assert_eq!(error_description(0), "no error");
		assert_eq!(error_description(250), "not defined");
	}

	#[test]
	fn firmware_type_from_code_unknown_is_preserved() {
		assert_eq!(DmdModel::from_code(9), DmdModel::Unknown(9));
	}
}
