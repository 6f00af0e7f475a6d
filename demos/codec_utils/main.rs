//! DLPC900 pattern codec CLI utility.
//!
//! A command-line tool for encoding, decoding, and verifying the ERLE/RLE
//! bit-packed pattern format the DLPC900 firmware consumes, using ordinary
//! BMP files as the packed-plane representation (the same 24-bit RGB BMP
//! layout `pattern_bmp_load` sends over the wire).
//!
//! # Usage
//!
//! ```bash
//! # Encode a BMP into an ERLE-compressed pattern file
//! cargo run --example codec_utils -- encode input.bmp output.erle
//!
//! # Decode a pattern file back to BMP
//! cargo run --example codec_utils -- decode output.erle decoded.bmp --width 1920 --height 1080
//!
//! # Verify encoder/decoder round-trip accuracy
//! cargo run --example codec_utils -- verify input.bmp
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use dlpc900_rs::dlpc900_types::codec::{decode, encode_erle, encode_rle, CombinedFrame};
use image::{ImageBuffer, RgbImage};

#[derive(Parser)]
#[command(name = "codec_utils")]
#[command(author = "dlpc900-rs project")]
#[command(version = "1.0")]
#[command(about = "DLPC900 pattern codec utility - encode, decode, and verify pattern round-trips", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
	/// Enhanced run-length encoding.
	Erle,
	/// Plain run-length encoding.
	Rle,
}

#[derive(Subcommand)]
enum Commands {
	/// Encode a BMP file into a compressed pattern file
	Encode {
		/// Input BMP file path
		input: PathBuf,

		/// Output pattern file path
		output: PathBuf,

		/// Compression mode
		#[arg(short, long, value_enum, default_value = "erle")]
		mode: Mode,

		/// Show verbose output
		#[arg(short, long)]
		verbose: bool,
	},

	/// Decode a compressed pattern file into a BMP file
	Decode {
		/// Input pattern file path
		input: PathBuf,

		/// Output BMP file path
		output: PathBuf,

		/// Pattern width in pixels
		#[arg(long)]
		width: usize,

		/// Pattern height in pixels
		#[arg(long)]
		height: usize,

		/// Show verbose output
		#[arg(short, long)]
		verbose: bool,
	},

	/// Verify encoder/decoder round-trip accuracy against a BMP file
	Verify {
		/// Input BMP file path
		input: PathBuf,

		/// Compression mode
		#[arg(short, long, value_enum, default_value = "erle")]
		mode: Mode,

		/// Show verbose output
		#[arg(short, long)]
		verbose: bool,
	},
}

fn load_bmp(path: &PathBuf) -> Result<CombinedFrame, Box<dyn std::error::Error>> {
	let img = image::open(path)?;
	let rgb_img: RgbImage = img.to_rgb8();
	let (width, height) = rgb_img.dimensions();
	let frame = CombinedFrame::from_rgb_interleaved(width as usize, height as usize, &rgb_img.into_raw())?;
	Ok(frame)
}

fn save_bmp(path: &PathBuf, frame: &CombinedFrame) -> Result<(), Box<dyn std::error::Error>> {
	let rgb = frame.to_rgb_interleaved();
	let img: RgbImage = ImageBuffer::from_raw(frame.width() as u32, frame.height() as u32, rgb)
		.ok_or("failed to build image buffer from decoded frame")?;
	img.save(path)?;
	Ok(())
}

fn encode_frame(frame: &CombinedFrame, mode: Mode) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
	match mode {
		Mode::Erle => Ok(encode_erle(frame)?.into_bytes()),
		Mode::Rle => Ok(encode_rle(frame)?.into_bytes()),
	}
}

fn handle_encode(input: PathBuf, output: PathBuf, mode: Mode, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
	let frame = load_bmp(&input)?;
	if verbose {
		log::info!("loaded {}x{} frame from {}", frame.width(), frame.height(), input.display());
	}

	let encoded = encode_frame(&frame, mode)?;
	let ratio = (encoded.len() as f64 / (frame.width() * frame.height() * 3) as f64) * 100.0;
	std::fs::write(&output, &encoded)?;

	println!(
		"encoded {} -> {} ({:.2}% of uncompressed size)",
		input.display(),
		output.display(),
		ratio
	);
	Ok(())
}

fn handle_decode(
	input: PathBuf,
	output: PathBuf,
	width: usize,
	height: usize,
	verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let encoded = std::fs::read(&input)?;
	if verbose {
		log::info!("decoding {} bytes as {}x{}", encoded.len(), width, height);
	}

	let frame = decode(&encoded, width, height)?;
	save_bmp(&output, &frame)?;

	println!("decoded {} -> {} ({}x{})", input.display(), output.display(), width, height);
	Ok(())
}

fn handle_verify(input: PathBuf, mode: Mode, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
	let frame = load_bmp(&input)?;
	if verbose {
		log::info!("verifying {}x{} frame against {:?} round-trip", frame.width(), frame.height(), mode);
	}

	let encoded = encode_frame(&frame, mode)?;
	let redecoded = decode(&encoded, frame.width(), frame.height())?;

	if redecoded == frame {
		println!(
			"verification PASSED: {}x{} pixel-perfect round-trip through {} encoded bytes",
			frame.width(),
			frame.height(),
			encoded.len()
		);
		Ok(())
	} else {
		Err("verification FAILED: decoded frame does not match the source BMP".into())
	}
}

fn main() {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();

	let result = match cli.command {
		Commands::Encode { input, output, mode, verbose } => handle_encode(input, output, mode, verbose),
		Commands::Decode { input, output, width, height, verbose } => handle_decode(input, output, width, height, verbose),
		Commands::Verify { input, mode, verbose } => handle_verify(input, mode, verbose),
	};

	if let Err(e) = result {
		eprintln!("error: {e}");
		std::process::exit(1);
	}
}
