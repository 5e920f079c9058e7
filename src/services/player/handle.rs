use async_trait::async_trait;

use super::{PlayerError, Volume};

/// Capability surface the core requires from any concrete player.
///
/// Implemented by the adapter layer around whatever widget actually plays
/// media (embedded video player, audio element, hidden note players). The
/// core only ever borrows this surface; lifetime of the underlying widget
/// belongs to the UI layer that created it. There is no explicit "closed"
/// signal: once the widget unmounts, methods return
/// [`PlayerError::Detached`] and callers degrade gracefully.
#[async_trait]
pub trait MediaPlayerHandle: Send + Sync {
    /// Begin or resume playback.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerError::AutoplayBlocked`] when platform policy rejects
    /// programmatic playback; the facade's retry path handles that case.
    async fn play(&self) -> Result<(), PlayerError>;

    /// Pause playback.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError` if the underlying player rejects the command.
    async fn pause(&self) -> Result<(), PlayerError>;

    /// Seek to an absolute position in seconds.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError` if the underlying player rejects the command.
    async fn seek_to(&self, seconds: f64) -> Result<(), PlayerError>;

    /// Current playback position in seconds.
    ///
    /// Position is polled on demand; the underlying players expose time
    /// only as a query, not a subscribable stream.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError` if the value cannot be read right now.
    async fn current_time(&self) -> Result<f64, PlayerError>;

    /// Total duration of the current media in seconds.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError` if the value cannot be read right now.
    async fn duration(&self) -> Result<f64, PlayerError>;

    /// Set the volume (0..=100).
    ///
    /// # Errors
    ///
    /// Returns `PlayerError` if the underlying player rejects the command.
    async fn set_volume(&self, volume: Volume) -> Result<(), PlayerError>;

    /// Current volume (0..=100). May report NaN mid-reload.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError` if the value cannot be read right now.
    async fn volume(&self) -> Result<f64, PlayerError>;

    /// Mute audio output.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError` if the underlying player rejects the command.
    async fn mute(&self) -> Result<(), PlayerError>;

    /// Unmute audio output.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError` if the underlying player rejects the command.
    async fn unmute(&self) -> Result<(), PlayerError>;

    /// Whether audio output is currently muted.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError` if the value cannot be read right now.
    async fn is_muted(&self) -> Result<bool, PlayerError>;

    /// Advance to the next playlist item.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError` if the underlying player rejects the command.
    async fn next_item(&self) -> Result<(), PlayerError>;

    /// Jump to the playlist item at `index`.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError` if the underlying player rejects the command.
    async fn play_item_at(&self, index: usize) -> Result<(), PlayerError>;

    /// The current playlist as opaque item identifiers.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError` if the value cannot be read right now.
    async fn playlist(&self) -> Result<Vec<String>, PlayerError>;
}
