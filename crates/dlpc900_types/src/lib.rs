//! Core data types for the `dlpc900-rs` project: the binary pattern codec,
//! the persisted pattern/preset configuration formats, and the shared data
//! model (lookup table entries, channel maps) used by the orchestration
//! layer in `dlpc900_internal`.
//!
//! # Examples
//!
//! ```rust
//! use dlpc900_types::codec::{combine, encode_erle, BinaryPattern};
//!
//! let pattern = BinaryPattern::new(2, 2, vec![1, 0, 0, 1]).unwrap();
//! let frames = combine(&[pattern]).unwrap();
//! let encoded = encode_erle(&frames[0]).unwrap();
//! assert!(!encoded.as_bytes().is_empty());
//! ```

pub mod codec;
pub mod config;
pub mod model;

pub use model::{CompressionMode, LutEntry, ModelError};
