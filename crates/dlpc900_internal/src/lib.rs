//! Internal crate for `dlpc900-rs`.
//!
//! This module is separated into its own crate to isolate the `hidapi`
//! dependency and the USB-HID transport from the pure data-model crate,
//! and should not be used directly.
//!
//! # Examples
//!
//! ```no_run
//! use dlpc900_internal::prelude::*;
//!
//! let api = hidapi::HidApi::new()?;
//! let transport = HidTransport::open_by_index(&api, DEFAULT_VENDOR_ID, DEFAULT_PRODUCT_ID, 0)?;
//! let profile = DeviceProfile::from_model(DmdModel::Dlp6500).expect("dlp6500 has a fixed resolution");
//! let mut controller = ControllerHandle::new(transport, profile);
//! controller.set_pattern_mode(PatternMode::PreStored)?;
//! # Ok::<(), dlpc900_internal::DmdError>(())
//! ```

pub mod controller;
pub mod error;
pub mod framer;
pub mod orchestrator;
pub mod preset;
pub mod settings;
pub mod transport;

/// `use dlpc900_internal::prelude::*;` to import commonly used items.
pub mod prelude;

pub use error::{DmdError, ValidationError};

// Re-export dlpc900_types for convenience.
pub use dlpc900_types;
