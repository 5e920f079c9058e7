use std::time::Duration;

use crate::services::player::RetryPolicy;

/// Timing and ratio knobs for the playback policy.
///
/// All fades use the one app-wide step count owned by the fader; these
/// settings pick the durations and levels each policy edge fades between.
#[derive(Debug, Clone, Copy)]
pub struct OrchestratorSettings {
    /// Background fade-out duration when the main player starts
    pub background_fade_down: Duration,

    /// Background fade-in duration when the main player stops
    pub background_fade_up: Duration,

    /// Position the main player is reset to after `Ended`
    pub start_offset: f64,

    /// Ducked volume as a fraction of the pre-duck volume
    pub duck_ratio: f64,

    /// Fade duration when ducking is disabled
    pub duck_restore: Duration,

    /// Retry budget for playback commands blocked by autoplay policy
    pub retry: RetryPolicy,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            background_fade_down: Duration::from_secs(2),
            background_fade_up: Duration::from_secs(1),
            start_offset: 0.0,
            duck_ratio: 0.66,
            duck_restore: Duration::from_secs(3),
            retry: RetryPolicy::default(),
        }
    }
}
