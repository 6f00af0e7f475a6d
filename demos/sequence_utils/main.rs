//! DLPC900 sequence upload CLI utility.
//!
//! Drives a real or `--dry-run` controller through an on-the-fly or
//! pre-stored pattern sequence upload, and prints basic device status.
//!
//! # Usage
//!
//! ```bash
//! # Print status/firmware info for the first enumerated device
//! cargo run --example sequence_utils -- status
//!
//! # Upload BMP files as an on-the-fly sequence without touching hardware
//! cargo run --example sequence_utils -- upload a.bmp b.bmp --dry-run
//!
//! # Program a pre-stored sequence by firmware index
//! cargo run --example sequence_utils -- set 0 1 2 --exposure-us 8000
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dlpc900_rs::dlpc900_types::codec::CombinedFrame;
use dlpc900_rs::dlpc900_types::CompressionMode;
use dlpc900_rs::prelude::*;

#[derive(Parser)]
#[command(name = "sequence_utils")]
#[command(author = "dlpc900-rs project")]
#[command(version = "1.0")]
#[command(about = "DLPC900 sequence upload utility - drive a controller through an upload, or inspect status", long_about = None)]
struct Cli {
	/// Use an in-memory transport instead of a real HID device, logging
	/// every command the orchestrator would have sent.
	#[arg(long, global = true)]
	dry_run: bool,

	/// USB vendor id to search for.
	#[arg(long, default_value_t = DEFAULT_VENDOR_ID)]
	vendor_id: u16,

	/// USB product id to search for.
	#[arg(long, default_value_t = DEFAULT_PRODUCT_ID)]
	product_id: u16,

	/// Which enumerated device to open.
	#[arg(long, default_value_t = 0)]
	dmd_index: usize,

	/// DMD model to resolve the device profile against.
	#[arg(long, default_value = "dlp6500")]
	model: String,

	/// HID reply read timeout, in milliseconds.
	#[arg(long, default_value_t = dlpc900_rs::framer::DEFAULT_TIMEOUT_MS)]
	timeout_ms: u32,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Print hardware/system/main status and firmware version
	Status,

	/// Upload BMP files as an on-the-fly pattern sequence
	Upload {
		/// BMP files, each one 24-pattern plane group's packed RGB image
		patterns: Vec<PathBuf>,

		/// Exposure time per pattern, in microseconds
		#[arg(long, default_value_t = 8_000)]
		exposure_us: u32,

		/// Number of times to repeat the sequence, 0 for indefinitely
		#[arg(long, default_value_t = 0)]
		repeat: u32,
	},

	/// Program a pre-stored sequence by firmware pattern index
	Set {
		/// Firmware pattern indices, in display order
		indices: Vec<u32>,

		/// Exposure time per pattern, in microseconds
		#[arg(long, default_value_t = 8_000)]
		exposure_us: u32,
	},
}

fn parse_model(name: &str) -> DmdModel {
	match name.to_ascii_lowercase().as_str() {
		"dlp6500" => DmdModel::Dlp6500,
		"dlp9000" => DmdModel::Dlp9000,
		"dlp670s" => DmdModel::Dlp670S,
		"dlp500yx" => DmdModel::Dlp500Yx,
		"dlp5500" => DmdModel::Dlp5500,
		other => DmdModel::Unknown(other.parse::<u8>().unwrap_or(0)),
	}
}

/// A [`Transport`] that logs every packet instead of touching hardware,
/// for `--dry-run` invocations.
struct DryRunTransport;

impl Transport for DryRunTransport {
	fn write_packet(&mut self, packet: &[u8; dlpc900_rs::transport::PACKET_SIZE]) -> Result<(), TransportError> {
		log::info!("dry-run write: {} bytes, flag=0x{:02X}, seq={}", packet.len(), packet[0], packet[1]);
		Ok(())
	}

	fn read_packet(&mut self, _timeout_ms: u32) -> Result<Option<[u8; dlpc900_rs::transport::PACKET_SIZE]>, TransportError> {
		log::info!("dry-run read: returning an empty success reply");
		let mut reply = [0u8; 64];
		reply[2..4].copy_from_slice(&1u16.to_le_bytes());
		reply[6] = 0;
		Ok(Some(reply))
	}
}

fn open_handle(cli: &Cli) -> Result<ControllerHandle<Box<dyn Transport>>, Box<dyn std::error::Error>> {
	let model = parse_model(&cli.model);
	let profile = DeviceProfile::from_model(model).unwrap_or_else(|| DeviceProfile::with_resolution(model, 1920, 1080));

	let transport: Box<dyn Transport> = if cli.dry_run {
		Box::new(DryRunTransport)
	} else {
		let api = hidapi::HidApi::new()?;
		Box::new(HidTransport::open_by_index(&api, cli.vendor_id, cli.product_id, cli.dmd_index)?)
	};

	Ok(ControllerHandle::with_timeout_ms(transport, profile, cli.timeout_ms))
}

impl Transport for Box<dyn Transport> {
	fn write_packet(&mut self, packet: &[u8; dlpc900_rs::transport::PACKET_SIZE]) -> Result<(), TransportError> {
		(**self).write_packet(packet)
	}

	fn read_packet(&mut self, timeout_ms: u32) -> Result<Option<[u8; dlpc900_rs::transport::PACKET_SIZE]>, TransportError> {
		(**self).read_packet(timeout_ms)
	}
}

fn load_pattern_frame(path: &PathBuf) -> Result<CombinedFrame, Box<dyn std::error::Error>> {
	let img = image::open(path)?.to_rgb8();
	let (width, height) = img.dimensions();
	Ok(CombinedFrame::from_rgb_interleaved(width as usize, height as usize, &img.into_raw())?)
}

fn handle_status(handle: &mut ControllerHandle<Box<dyn Transport>>) -> Result<(), Box<dyn std::error::Error>> {
	let hw = handle.hardware_status()?;
	println!("hardware status:");
	for (name, set) in hw {
		println!("  {name}: {set}");
	}

	let main = handle.main_status()?;
	println!("main status:");
	for (name, set) in main {
		println!("  {name}: {set}");
	}

	let version = handle.firmware_version()?;
	println!("firmware version: app={:?} api={:?}", version.app_version, version.api_version);

	let firmware_type = handle.firmware_type()?;
	println!("firmware type: {:?} ({})", firmware_type.model, firmware_type.firmware_tag);

	Ok(())
}

fn handle_upload(
	handle: &mut ControllerHandle<Box<dyn Transport>>,
	patterns: Vec<PathBuf>,
	exposure_us: u32,
	repeat: u32,
) -> Result<(), Box<dyn std::error::Error>> {
	if patterns.is_empty() {
		return Err("at least one pattern BMP is required".into());
	}

	// Each BMP is an already-packed 24-plane group; split it back into its
	// up to 24 individual binary patterns so upload_pattern_sequence can
	// re-pack and re-encode it per the orchestrator's own LUT bookkeeping.
	let mut flat = Vec::new();
	for path in &patterns {
		let frame = load_pattern_frame(path)?;
		flat.extend(dlpc900_rs::dlpc900_types::codec::split(&frame));
	}

	let npatterns = flat.len();
	let exposures = vec![exposure_us; npatterns];
	let dark_times = vec![0u32; npatterns];

	handle.upload_pattern_sequence(&flat, &exposures, &dark_times, false, false, repeat, CompressionMode::Erle)?;

	println!("uploaded {npatterns} pattern(s) from {} file(s)", patterns.len());
	Ok(())
}

fn handle_set(
	handle: &mut ControllerHandle<Box<dyn Transport>>,
	indices: Vec<u32>,
	exposure_us: u32,
) -> Result<(), Box<dyn std::error::Error>> {
	if indices.is_empty() {
		return Err("at least one firmware pattern index is required".into());
	}

	let (trig1, trig2) = handle.program_preset_sequence(&indices, Some(exposure_us), false, false)?;
	println!("programmed {} pre-stored pattern(s), trigger_in1={trig1:?}, trigger_in2={trig2}", indices.len());
	Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
	let mut handle = open_handle(&cli)?;

	match cli.command {
		Commands::Status => handle_status(&mut handle),
		Commands::Upload { patterns, exposure_us, repeat } => handle_upload(&mut handle, patterns, exposure_us, repeat),
		Commands::Set { indices, exposure_us } => handle_set(&mut handle, indices, exposure_us),
	}
}

fn main() {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	if let Err(e) = run(cli) {
		eprintln!("error: {e}");
		std::process::exit(1);
	}
}
