use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Ducking configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DuckingConfig {
    /// Ducked volume as a fraction of the pre-duck volume (0 < ratio <= 1)
    pub ratio: f64,

    /// Seconds the restore fade takes when ducking is disabled
    pub restore_secs: f64,
}

impl Default for DuckingConfig {
    fn default() -> Self {
        Self {
            ratio: 0.66,
            restore_secs: 3.0,
        }
    }
}
