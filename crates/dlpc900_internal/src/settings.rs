//! Runtime defaults: vendor/product id, HID read timeout, log filter.
//!
//! Loaded with the `config` crate from an optional TOML file plus
//! `DLPC900_`-prefixed environment overrides, the way a small CLI-facing
//! driver crate typically layers configuration.

use serde::Deserialize;

use crate::transport::{DEFAULT_PRODUCT_ID, DEFAULT_VENDOR_ID};

/// Environment variable prefix `config::Environment` strips before
/// matching a `Settings` field, e.g. `DLPC900_HID_READ_TIMEOUT_MS`.
const ENV_PREFIX: &str = "DLPC900";

/// Runtime defaults consulted when a caller doesn't override them
/// explicitly.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// USB vendor id to search for.
	pub vendor_id: u16,
	/// USB product id to search for.
	pub product_id: u16,
	/// Which enumerated DLPC900 device to open, if more than one matches.
	pub dmd_index: usize,
	/// HID read timeout, in milliseconds.
	pub hid_read_timeout_ms: u32,
	/// `env_logger` filter directive a CLI binary seeds
	/// `RUST_LOG` with if the caller hasn't already set it.
	pub log_filter: String,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			vendor_id: DEFAULT_VENDOR_ID,
			product_id: DEFAULT_PRODUCT_ID,
			dmd_index: 0,
			hid_read_timeout_ms: crate::framer::DEFAULT_TIMEOUT_MS,
			log_filter: "warn".to_string(),
		}
	}
}

impl Settings {
	/// Loads settings layered: built-in defaults, then an optional TOML
	/// file at `path` (missing files are silently skipped), then
	/// `DLPC900_*` environment variables.
	///
	/// # Errors
	///
	/// Returns a [`config::ConfigError`] if `path` exists but fails to
	/// parse, or if an environment override can't be coerced to its
	/// field's type.
	pub fn load(path: Option<&std::path::Path>) -> Result<Self, config::ConfigError> {
		let mut builder = config::Config::builder();

		if let Some(path) = path {
			builder = builder.add_source(config::File::from(path).required(false));
		}

		builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX).separator("_"));

		builder.build()?.try_deserialize()
	}
}
