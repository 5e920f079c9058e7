use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::services::schedule::types::{ActionKind, EventKind};

/// One declarative schedule entry.
///
/// The settings panel decides which times and actions to schedule; the core
/// only executes them. Classification is explicit at registration time,
/// never inferred from the action.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScheduleEntry {
    /// Trigger time in seconds from the start of the main timeline
    pub time_seconds: f64,

    /// Semantic category of the event
    pub event: EventKind,

    /// Enable/disable/one-time classification
    pub action: ActionKind,
}
