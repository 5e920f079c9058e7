use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Playback policy configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Seconds the background bed takes to fade out when the main player starts
    pub background_fade_down_secs: f64,

    /// Seconds the background bed takes to fade back in when the main player stops
    pub background_fade_up_secs: f64,

    /// Position (seconds) the main player resets to after reaching the end
    pub start_offset_secs: f64,

    /// Retry budget for playback commands blocked by autoplay policy
    pub autoplay_retries: u32,

    /// Backoff between autoplay retries, in milliseconds
    pub autoplay_backoff_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            background_fade_down_secs: 2.0,
            background_fade_up_secs: 1.0,
            start_offset_secs: 0.0,
            autoplay_retries: 3,
            autoplay_backoff_ms: 500,
        }
    }
}
