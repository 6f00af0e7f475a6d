//! End-to-end smoke test for `dlpc900-rs`.
//!
//! Exercises the codec and configuration stack without touching real
//! hardware: encode/decode round trip, LUT entry serialization, and a
//! persisted config file round trip.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use dlpc900_rs::dlpc900_types::codec::{combine, decode, encode_erle, BinaryPattern};
use dlpc900_rs::dlpc900_types::config::{ChannelMap, Config};
use dlpc900_rs::LutEntry;

fn main() {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	codec_round_trip();
	config_round_trip();
	lut_entry_smoke();

	log::info!("smoke test passed");
}

fn codec_round_trip() {
	let (width, height) = (16, 9);
	let mut data = vec![0u8; width * height];
	for (i, v) in data.iter_mut().enumerate() {
		*v = (i % 2) as u8;
	}
	let pattern = BinaryPattern::new(width, height, data.clone()).expect("valid pattern");

	let frames = combine(&[pattern]).expect("combine succeeds for one pattern");
	let encoded = encode_erle(&frames[0]).expect("erle encode succeeds");
	let decoded = decode(encoded.as_bytes(), width, height).expect("erle decode succeeds");

	assert_eq!(decoded.red(), frames[0].red());
	assert_eq!(decoded.green(), frames[0].green());
	assert_eq!(decoded.blue(), frames[0].blue());

	log::info!("codec round trip: {} bytes -> {} encoded bytes", data.len(), encoded.as_bytes().len());
}

fn config_round_trip() {
	let mut modes = HashMap::new();
	modes.insert("default".to_string(), vec![0u32, 1, 2]);
	let mut channels = HashMap::new();
	channels.insert("red".to_string(), modes);
	let channel_map = ChannelMap::new(channels);

	let timestamp: DateTime<Utc> = DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp");
	let config = Config::new(timestamp, Vec::new(), channel_map, None, None);
	config.validate().expect("a populated channel map validates");

	let dir = std::env::temp_dir();
	let path = dir.join("dlpc900-rs-smoke-config.json");
	config.save(&path).expect("config saves");
	let loaded = Config::open(&path).expect("config loads");
	std::fs::remove_file(&path).ok();

	assert_eq!(loaded.timestamp(), config.timestamp());
	log::info!("config round trip through {}", path.display());
}

fn lut_entry_smoke() {
	let entry = LutEntry::new(0, 105, 0, true, false, 1, false, 0, 0).expect("valid LUT entry");
	let payload = entry.to_payload();
	assert_eq!(payload.len(), 12);
}
