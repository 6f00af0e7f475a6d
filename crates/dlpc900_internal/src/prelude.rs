//! Prelude module for `dlpc900_internal`.
//!
//! This module provides a convenient way to import commonly used types and
//! traits.
//!
//! # Examples
//!
//! ```no_run
//! use dlpc900_internal::prelude::*;
//!
//! let api = hidapi::HidApi::new()?;
//! let transport = HidTransport::open_by_index(&api, DEFAULT_VENDOR_ID, DEFAULT_PRODUCT_ID, 0)?;
//! # Ok::<(), dlpc900_internal::DmdError>(())
//! ```

#[doc(inline)]
pub use crate::controller::{
	ControllerHandle, ControllerSelect, DeviceProfile, DmdModel, FirmwareType, FirmwareVersion, PatternMode,
	SequenceCommand, TriggerEdge,
};
#[doc(inline)]
pub use crate::error::{DmdError, ValidationError};
#[doc(inline)]
pub use crate::framer::{DecodedReply, Framer, RwMode};
#[doc(inline)]
pub use crate::preset::{PresetEntry, PresetError};
#[doc(inline)]
pub use crate::settings::Settings;
#[doc(inline)]
pub use crate::transport::{HidTransport, Transport, TransportError, DEFAULT_PRODUCT_ID, DEFAULT_VENDOR_ID};

// Re-export the entire dlpc900_types module for advanced usage.
#[doc(inline)]
pub use dlpc900_types;
