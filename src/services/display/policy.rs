use std::time::Duration;

use chrono::{Datelike, NaiveDateTime, NaiveTime, Weekday};
use tracing::debug;

/// One operator-relevant window of wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipWindow {
    /// Day of week the window applies to
    pub weekday: Weekday,
    /// Window start (inclusive)
    pub start: NaiveTime,
    /// Window end (inclusive)
    pub end: NaiveTime,
}

impl PipWindow {
    fn contains(&self, now: NaiveDateTime) -> bool {
        now.weekday() == self.weekday && self.start <= now.time() && now.time() <= self.end
    }
}

/// Eligibility gate for scheduled PiP automation.
///
/// Scheduled PiP auto-enable/disable events are registered only for content
/// long enough to be a full service, and only inside the configured
/// operator-relevant windows. This keeps automation from firing during
/// short, ad hoc content.
#[derive(Debug, Clone)]
pub struct PipPolicy {
    /// Minimum content duration for PiP automation (default 65 minutes)
    pub min_duration: Duration,
    /// Wall-clock windows; empty means any time qualifies
    pub windows: Vec<PipWindow>,
}

impl Default for PipPolicy {
    fn default() -> Self {
        Self {
            min_duration: Duration::from_secs(65 * 60),
            windows: Vec::new(),
        }
    }
}

impl PipPolicy {
    /// Whether scheduled PiP events should be registered at all for content
    /// of `content_duration`, evaluated at local wall-clock `now`.
    pub fn eligible(&self, content_duration: Duration, now: NaiveDateTime) -> bool {
        if content_duration <= self.min_duration {
            debug!(
                "pip automation skipped: content {}s under the {}s threshold",
                content_duration.as_secs(),
                self.min_duration.as_secs()
            );
            return false;
        }
        if self.windows.is_empty() {
            return true;
        }
        let in_window = self.windows.iter().any(|window| window.contains(now));
        if !in_window {
            debug!("pip automation skipped: {now} outside every configured window");
        }
        in_window
    }
}
