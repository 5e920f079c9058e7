use std::str::FromStr;
use std::time::Duration;

use chrono::{NaiveTime, Weekday};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::{Result, ShowcueError};
use crate::services::display::{PipPolicy, PipWindow};

/// Picture-in-picture automation configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PipConfig {
    /// Minimum content duration (seconds) before PiP automation applies
    pub min_duration_secs: u64,

    /// Operator-relevant wall-clock windows; empty means any time qualifies
    pub windows: Vec<PipWindowConfig>,
}

impl Default for PipConfig {
    fn default() -> Self {
        Self {
            // 65 minutes: long enough to be a full service, not ad hoc content
            min_duration_secs: 65 * 60,
            windows: Vec::new(),
        }
    }
}

/// One configured PiP window
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PipWindowConfig {
    /// Day of week ("sun", "sunday", ...)
    pub weekday: String,

    /// Window start, "HH:MM"
    pub start: String,

    /// Window end, "HH:MM"
    pub end: String,
}

impl PipConfig {
    /// Resolve the configuration into the policy the display service uses.
    ///
    /// # Errors
    ///
    /// Returns [`ShowcueError::ConfigValidation`] when a weekday or time
    /// string does not parse.
    pub fn policy(&self) -> Result<PipPolicy> {
        let mut windows = Vec::with_capacity(self.windows.len());
        for window in &self.windows {
            let weekday = Weekday::from_str(&window.weekday).map_err(|_| {
                ShowcueError::validation(
                    "pip.windows.weekday",
                    format!("unrecognized weekday '{}'", window.weekday),
                )
            })?;
            let start = parse_time("pip.windows.start", &window.start)?;
            let end = parse_time("pip.windows.end", &window.end)?;
            if end < start {
                return Err(ShowcueError::validation(
                    "pip.windows",
                    format!("window end {} precedes start {}", window.end, window.start),
                ));
            }
            windows.push(PipWindow {
                weekday,
                start,
                end,
            });
        }

        Ok(PipPolicy {
            min_duration: Duration::from_secs(self.min_duration_secs),
            windows,
        })
    }
}

fn parse_time(field: &str, value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|e| ShowcueError::validation(field, format!("'{value}' is not HH:MM ({e})")))
}
