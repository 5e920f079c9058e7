use super::PlayerId;

/// Errors that can occur when driving an externally-owned player
#[derive(thiserror::Error, Debug)]
pub enum PlayerError {
    /// No player is registered under the requested role
    #[error("no player registered for role '{0}'")]
    NotRegistered(String),

    /// The owning UI element unmounted; the facade is no longer live
    #[error("player {0:?} is detached")]
    Detached(PlayerId),

    /// A player command failed (player mid-reinitialization and similar)
    #[error("player command failed: {0}")]
    CommandFailed(String),

    /// The browser/platform rejected programmatic playback
    #[error("autoplay blocked for player {0:?}")]
    AutoplayBlocked(PlayerId),

    /// A queried value (time, volume) is currently unavailable
    #[error("player state unavailable: {0}")]
    Unavailable(String),
}
