use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use solscope_api::DEFAULT_ORIGIN;

/// Settings of a [`SolidityManager`](super::SolidityManager).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ManagerConfig {
    /// Reuse a file's index when its content and compiler are unchanged.
    pub use_cache: bool,
    /// Origin of the line/column coordinates callers pass in and get back.
    pub line_origin: u32,
    /// Top-level keys merged over the generated solc standard-JSON input.
    pub standard_input: Value,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            use_cache: true,
            line_origin: DEFAULT_ORIGIN,
            standard_input: Value::Null,
        }
    }
}

impl ManagerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
