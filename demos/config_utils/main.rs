//! DLPC900 config file CLI utility.
//!
//! Validates, inspects, and converts between the two on-disk config
//! formats: the structured `.json` document and the bit-packed `.dmdcfg`
//! binary archive.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example config_utils -- info config.json
//! cargo run --example config_utils -- validate config.dmdcfg
//! cargo run --example config_utils -- convert config.json config.dmdcfg
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dlpc900_rs::dlpc900_types::config::Config;

#[derive(Parser)]
#[command(name = "config_utils")]
#[command(author = "dlpc900-rs project")]
#[command(version = "1.0")]
#[command(about = "DLPC900 config file utility - validate, inspect, and convert .json/.dmdcfg documents", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Print a summary of a config document
	Info {
		/// Input .json or .dmdcfg file
		input: PathBuf,
	},

	/// Validate a config document's channel map
	Validate {
		/// Input .json or .dmdcfg file
		input: PathBuf,
	},

	/// Convert between .json and .dmdcfg, inferred from each path's extension
	Convert {
		/// Input .json or .dmdcfg file
		input: PathBuf,

		/// Output .json or .dmdcfg file
		output: PathBuf,
	},
}

fn handle_info(input: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
	let config = Config::open(&input)?;

	println!("timestamp: {}", config.timestamp());
	println!("hid_path: {}", config.hid_path().unwrap_or("(none)"));
	println!("firmware_pattern_data: {} entries", config.firmware_pattern_data().len());

	let channels: Vec<&str> = config.channel_map().channels().collect();
	println!("channels ({}): {}", channels.len(), channels.join(", "));

	match config.firmware_patterns() {
		Some(patterns) => println!(
			"firmware_patterns: {} pattern(s) at {}x{}",
			patterns.count(),
			patterns.width(),
			patterns.height()
		),
		None => println!("firmware_patterns: (none)"),
	}

	Ok(())
}

fn handle_validate(input: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
	let config = Config::open(&input)?;
	config.validate()?;
	println!("{} is valid: every channel defines a non-empty \"default\" mode", input.display());
	Ok(())
}

fn handle_convert(input: PathBuf, output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
	let config = Config::open(&input)?;
	config.validate()?;
	config.save(&output)?;
	println!("converted {} -> {}", input.display(), output.display());
	Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
	match cli.command {
		Commands::Info { input } => handle_info(input),
		Commands::Validate { input } => handle_validate(input),
		Commands::Convert { input, output } => handle_convert(input, output),
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
