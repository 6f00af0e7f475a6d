#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `dlpc900-rs` drives a TI DLPC900 digital micromirror device controller
//! over USB-HID: device discovery, the command framing layer, typed
//! wrappers for every opcode, the on-the-fly/pre-stored pattern upload
//! flows, and the ERLE/RLE image codec the device expects patterns in.
//!
//! # Examples
//!
//! ```no_run
//! use dlpc900_rs::prelude::*;
//!
//! let api = hidapi::HidApi::new()?;
//! let transport = HidTransport::open_by_index(&api, DEFAULT_VENDOR_ID, DEFAULT_PRODUCT_ID, 0)?;
//! let profile = DeviceProfile::from_model(DmdModel::Dlp6500).expect("dlp6500 has a fixed resolution");
//! let mut controller = ControllerHandle::new(transport, profile);
//! controller.set_pattern_mode(PatternMode::PreStored)?;
//! # Ok::<(), dlpc900_rs::DmdError>(())
//! ```

pub use dlpc900_internal::*;
