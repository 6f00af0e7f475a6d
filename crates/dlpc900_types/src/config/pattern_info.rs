//! Metadata for one firmware-stored pattern.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Caller-defined scalar/array metadata for a single firmware pattern slot.
///
/// Fields are free-form: callers attach arbitrary per-pattern bookkeeping
/// (wavelength, power, a note), so this wraps a sorted string-keyed map
/// rather than a fixed struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternInfo(BTreeMap<String, Value>);

impl PatternInfo {
	/// An empty metadata record.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets a field, returning the previous value if one was present.
	pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
		self.0.insert(key.into(), value.into())
	}

	/// Reads a field by name.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn set_and_get_round_trip() {
		let mut info = PatternInfo::new();
		info.set("wavelength_nm", 488);
		info.set("note", "widefield excitation");
		assert_eq!(info.get("wavelength_nm"), Some(&Value::from(488)));
		assert_eq!(info.get("note"), Some(&Value::from("widefield excitation")));
		assert_eq!(info.get("missing"), None);
	}

	#[test]
	fn serializes_as_plain_json_object() {
		let mut info = PatternInfo::new();
		info.set("channel", "widefield");
		let json = serde_json::to_string(&info).unwrap();
		assert_eq!(json, r#"{"channel":"widefield"}"#);
	}
}
