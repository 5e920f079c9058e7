use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Volume fade configuration
///
/// One step count is shared by every fade in the app; fades differ only in
/// duration and target.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FadeConfig {
    /// Number of intermediate volume writes per fade
    pub steps: u32,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self { steps: 25 }
    }
}
