//! DLPC900 preset resolution CLI utility.
//!
//! Resolves a list of channel/mode requests against a persisted config's
//! channel map, and prints the flat firmware pattern index sequence that
//! would result.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example preset_utils -- config.json widefield:solid repeat=2
//! cargo run --example preset_utils -- config.json widefield:solid off-before=1 off-after=1
//! ```

use std::path::PathBuf;

use clap::Parser;
use dlpc900_rs::dlpc900_types::config::Config;
use dlpc900_rs::prelude::{PresetEntry, PresetError};

#[derive(Parser)]
#[command(name = "preset_utils")]
#[command(author = "dlpc900-rs project")]
#[command(version = "1.0")]
#[command(about = "DLPC900 preset resolution utility - resolve channel/mode presets against a config", long_about = None)]
struct Cli {
	/// Path to a .json or .dmdcfg config file
	config: PathBuf,

	/// One or more `channel:mode[,key=value...]` preset requests
	///
	/// Supported keys: `repeat`, `off-before`, `off-after`, `blank`
	/// (a bare key, no value needed), `indices` (comma-separated).
	requests: Vec<String>,
}

fn parse_request(spec: &str) -> Result<PresetEntry, String> {
	let mut parts = spec.split(',');
	let head = parts.next().ok_or_else(|| format!("empty preset request {spec:?}"))?;
	let (channel, mode) = head.split_once(':').ok_or_else(|| format!("expected channel:mode in {head:?}"))?;

	let mut entry = PresetEntry::new(channel, mode);

	for kv in parts {
		match kv.split_once('=') {
			Some(("repeat", v)) => entry.repeat = v.parse().map_err(|_| format!("bad repeat value {v:?}"))?,
			Some(("off-before", v)) => entry.off_before = v.parse().map_err(|_| format!("bad off-before value {v:?}"))?,
			Some(("off-after", v)) => entry.off_after = v.parse().map_err(|_| format!("bad off-after value {v:?}"))?,
			Some(("indices", v)) => {
				let indices: Result<Vec<usize>, _> = v.split(';').map(str::parse).collect();
				entry.pattern_indices = Some(indices.map_err(|_| format!("bad indices value {v:?}"))?);
			}
			None if kv == "blank" => entry.blank = true,
			_ => return Err(format!("unrecognized preset key in {kv:?}")),
		}
	}

	Ok(entry)
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
	if cli.requests.is_empty() {
		return Err("at least one channel:mode request is required".into());
	}

	let config = Config::open(&cli.config)?;
	config.validate()?;

	let entries: Vec<PresetEntry> = cli
		.requests
		.iter()
		.map(|spec| parse_request(spec))
		.collect::<Result<_, _>>()?;

	match dlpc900_rs::preset::resolve(config.channel_map(), &entries) {
		Ok(indices) => {
			println!("resolved {} firmware pattern index/indices:", indices.len());
			println!("{indices:?}");
			Ok(())
		}
		Err(err) => Err(describe_preset_error(err).into()),
	}
}

fn describe_preset_error(err: PresetError) -> String {
	format!("preset resolution failed: {err}")
}

fn main() {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	if let Err(e) = run(cli) {
		eprintln!("error: {e}");
		std::process::exit(1);
	}
}
