use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// Unique identifier for a media player
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create a PlayerId from the identifier the embedding UI assigned
    /// to the underlying player widget.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Logical role a player fills in the presentation.
///
/// The orchestrator never branches on the concrete player implementation,
/// only on the role its facade was registered under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerRole {
    /// The primary presentation video
    Main,

    /// The background audio/video bed
    Background,

    /// An auxiliary player (hidden note players and similar), keyed by name
    Aux(String),
}

impl fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => write!(f, "main"),
            Self::Background => write!(f, "background"),
            Self::Aux(name) => write!(f, "aux:{name}"),
        }
    }
}

/// Transport state of a logical player.
///
/// Driven by the underlying player's reported state changes and explicit
/// user commands; `Ended` transitions back to `Paused` after the automatic
/// seek to the configured start offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportState {
    /// Player has not started playback yet
    #[default]
    Unstarted,

    /// Player is currently playing
    Playing,

    /// Player is paused
    Paused,

    /// Player reached the end of its media
    Ended,
}

/// Volume of a player, as a percentage.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Volume(f64);

impl Volume {
    /// Create a new instance of a volume with safeguarded values.
    ///
    /// Non-finite inputs (a player mid-reload can report NaN) are treated
    /// as silence.
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value.clamp(0.0, 100.0))
        } else {
            Self(0.0)
        }
    }

    /// Get the volume rounded to the nearest whole percentage point.
    ///
    /// Players take integer-ish volume levels; fades round each step.
    pub fn rounded(&self) -> f64 {
        self.0.round()
    }

    /// Whether this volume is effectively silent.
    pub fn is_silent(&self) -> bool {
        self.0 <= 0.0
    }
}

impl Deref for Volume {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<f64> for Volume {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}
