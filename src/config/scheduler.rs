use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Time-event scheduler configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Position sampling cadence in milliseconds while the main player plays
    pub poll_interval_ms: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 500,
        }
    }
}
