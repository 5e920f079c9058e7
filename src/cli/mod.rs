//! Command-line interface for configuration management.
//!
//! Backs the `showcue` binary: validating a configuration file, previewing
//! the event plan that would be registered for content of a given length,
//! and emitting the configuration JSON schema.

use std::time::Duration;

use chrono::NaiveDateTime;

use crate::config::Config;
use crate::core::Result;
use crate::services::schedule::EventKind;


/// Human-readable validation summary for a loaded configuration.
pub fn validate_report(config: &Config) -> String {
    let mut lines = vec!["configuration OK".to_string()];
    lines.push(format!(
        "  fade: {} steps; scheduler: {}ms cadence",
        config.fade.steps, config.scheduler.poll_interval_ms
    ));
    lines.push(format!(
        "  ducking: ratio {}, restore over {}s",
        config.ducking.ratio, config.ducking.restore_secs
    ));
    lines.push(format!(
        "  pip: content over {}s, {} window(s)",
        config.pip.min_duration_secs,
        config.pip.windows.len()
    ));
    lines.push(format!("  schedule: {} entries", config.schedule.len()));
    lines.join("\n")
}

/// Preview of the event plan for content of `content_duration`, evaluated
/// at wall-clock `now` with the same resolution `apply_schedule` performs.
///
/// # Errors
///
/// Returns an error if the PiP policy configuration fails to resolve.
pub fn plan_report(
    config: &Config,
    content_duration: Duration,
    now: NaiveDateTime,
) -> Result<String> {
    let pip_eligible = config.pip.policy()?.eligible(content_duration, now);

    let mut entries: Vec<_> = config.schedule.iter().collect();
    entries.sort_by(|a, b| {
        a.time_seconds
            .partial_cmp(&b.time_seconds)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut lines = vec![format!(
        "event plan for {}s of content at {now}:",
        content_duration.as_secs()
    )];
    for entry in entries {
        let note = if entry.event == EventKind::Pip && !pip_eligible {
            "  (skipped: pip not eligible)"
        } else {
            ""
        };
        lines.push(format!(
            "  {:>8.1}s  {} {:?}{note}",
            entry.time_seconds, entry.event, entry.action
        ));
    }
    if config.schedule.is_empty() {
        lines.push("  (no entries)".to_string());
    }
    Ok(lines.join("\n"))
}

/// JSON schema of the configuration file format.
pub fn schema_json() -> String {
    let schema = schemars::schema_for!(Config);
    serde_json::to_string_pretty(&schema)
        .unwrap_or_else(|e| format!("{{\"error\": \"schema serialization failed: {e}\"}}"))
}
