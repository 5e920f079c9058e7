use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Action fired when a time event triggers.
///
/// Actions are async thunks awaited from the poll loop; they are expected to
/// be idempotent state toggles, never frame-critical work, because polling
/// fires them slightly late by design.
pub type EventAction = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// Semantic category of a scheduled event.
///
/// Passed explicitly at registration time; the scheduler never infers what
/// an action does from the action itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Fullscreen enter/exit for the main video
    Fullscreen,

    /// Picture-in-picture enter/exit
    Pip,

    /// Ducking of the main player's volume
    Ducking,

    /// Pause the background bed
    Pause,

    /// Resume the background bed
    Unpause,

    /// Caller-defined action with no built-in policy
    Other,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fullscreen => "fullscreen",
            Self::Pip => "pip",
            Self::Ducking => "ducking",
            Self::Pause => "pause",
            Self::Unpause => "unpause",
            Self::Other => "other",
        };
        write!(f, "{name}")
    }
}

/// What a triggered event does to its target state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Turn the target state on
    Enable,

    /// Turn the target state off
    Disable,

    /// Fire once per forward pass with no enable/disable pairing
    OneTime,
}

/// One (time, action) entry on a player's timeline.
///
/// `triggered` flips when the entry fires and is re-armed automatically when
/// the timeline seeks backward past the entry's time.
pub struct TimeEvent {
    /// Trigger time in seconds from the start of the timeline
    pub time: f64,

    /// Semantic category of the event
    pub event: EventKind,

    /// Enable/disable/one-time classification
    pub act: ActionKind,

    pub(crate) action: EventAction,
    pub(crate) triggered: bool,
}

impl fmt::Debug for TimeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeEvent")
            .field("time", &self.time)
            .field("event", &self.event)
            .field("act", &self.act)
            .field("triggered", &self.triggered)
            .finish_non_exhaustive()
    }
}
