//! Configuration schema definitions and validation.
//!
//! Defines the complete configuration structure for showcue, covering fade
//! timing, scheduler cadence, ducking, PiP automation policy and the
//! declarative event schedule. All configurations are serializable to/from
//! TOML format.

mod ducking;
mod fade;
mod loading;
mod paths;
mod pip;
mod playback;
mod schedule;
mod scheduler;


pub use ducking::DuckingConfig;
pub use fade::FadeConfig;
pub use paths::ConfigPaths;
pub use pip::{PipConfig, PipWindowConfig};
pub use playback::PlaybackConfig;
pub use schedule::ScheduleEntry;
pub use scheduler::SchedulerConfig;

use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::{Result, ShowcueError};
use crate::services::orchestrator::OrchestratorSettings;
use crate::services::player::RetryPolicy;

/// Main configuration structure for showcue.
///
/// Represents the complete configuration schema that can be loaded from
/// TOML files. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
#[serde(default)]
pub struct Config {
    /// Playback policy settings.
    pub playback: PlaybackConfig,

    /// Fade step settings.
    pub fade: FadeConfig,

    /// Scheduler polling settings.
    pub scheduler: SchedulerConfig,

    /// Ducking ratio and restore fade.
    pub ducking: DuckingConfig,

    /// Picture-in-picture automation policy.
    pub pip: PipConfig,

    /// Declarative time-event schedule.
    pub schedule: Vec<ScheduleEntry>,
}

impl Config {
    /// Validate value ranges across all sections.
    ///
    /// # Errors
    ///
    /// Returns [`ShowcueError::ConfigValidation`] for the first field whose
    /// value is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.fade.steps == 0 {
            return Err(ShowcueError::validation("fade.steps", "must be at least 1"));
        }
        if self.scheduler.poll_interval_ms == 0 {
            return Err(ShowcueError::validation(
                "scheduler.poll_interval_ms",
                "must be at least 1",
            ));
        }
        if !(self.ducking.ratio > 0.0 && self.ducking.ratio <= 1.0) {
            return Err(ShowcueError::validation(
                "ducking.ratio",
                "must be within (0, 1]",
            ));
        }
        if !self.ducking.restore_secs.is_finite() || self.ducking.restore_secs < 0.0 {
            return Err(ShowcueError::validation(
                "ducking.restore_secs",
                "must be a non-negative number",
            ));
        }
        for (field, value) in [
            (
                "playback.background_fade_down_secs",
                self.playback.background_fade_down_secs,
            ),
            (
                "playback.background_fade_up_secs",
                self.playback.background_fade_up_secs,
            ),
            ("playback.start_offset_secs", self.playback.start_offset_secs),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ShowcueError::validation(field, "must be a non-negative number"));
            }
        }
        for entry in &self.schedule {
            if !entry.time_seconds.is_finite() || entry.time_seconds < 0.0 {
                return Err(ShowcueError::validation(
                    "schedule.time_seconds",
                    format!("{} is not a valid trigger time", entry.time_seconds),
                ));
            }
        }
        // surfaces weekday/time parse failures at load time, not showtime
        self.pip.policy()?;
        Ok(())
    }

    /// Resolve the orchestrator's timing settings from this configuration.
    pub fn orchestrator_settings(&self) -> OrchestratorSettings {
        OrchestratorSettings {
            background_fade_down: secs(self.playback.background_fade_down_secs),
            background_fade_up: secs(self.playback.background_fade_up_secs),
            start_offset: self.playback.start_offset_secs,
            duck_ratio: self.ducking.ratio,
            duck_restore: secs(self.ducking.restore_secs),
            retry: RetryPolicy {
                retries: self.playback.autoplay_retries,
                backoff: Duration::from_millis(self.playback.autoplay_backoff_ms),
            },
        }
    }

    /// Scheduler polling cadence as a duration.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.scheduler.poll_interval_ms)
    }
}

fn secs(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(Duration::ZERO)
}
