//! Persisted pattern/preset configuration: the structured JSON document and
//! the bit-packed `.dmdcfg` binary archive, plus the channel-map type the
//! preset resolver consults.

mod archive;
mod channel_map;
#[allow(clippy::module_inception)]
mod config;
mod error;
mod pattern_array;
mod pattern_info;

pub use channel_map::{ChannelMap, DEFAULT_MODE};
pub use config::Config;
pub use error::ConfigError;
pub use pattern_array::PatternArray;
pub use pattern_info::PatternInfo;
