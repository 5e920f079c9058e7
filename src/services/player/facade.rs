use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::{MediaPlayerHandle, PlayerError, PlayerId, PlayerRole, Volume};

/// Bounded retry policy for playback commands rejected by autoplay policy.
///
/// Retry-with-backoff lives behind the facade boundary; the orchestrator
/// only ever sees "play succeeded" or "retry budget exhausted".
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Number of attempts after the initial one
    pub retries: u32,
    /// Delay between attempts
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            backoff: Duration::from_millis(500),
        }
    }
}

/// Uniform command/query surface over one concrete player.
///
/// Built once the underlying player signals readiness and handed to the
/// orchestrator; every consumer-facing helper here degrades to a logged
/// no-op on failure, because a single failed player command must not crash
/// the orchestration loop governing the rest of the show.
#[derive(Clone)]
pub struct PlayerFacade {
    id: PlayerId,
    role: PlayerRole,
    handle: Arc<dyn MediaPlayerHandle>,
}

impl PlayerFacade {
    /// Wrap a concrete player handle under a logical role.
    pub fn new(id: PlayerId, role: PlayerRole, handle: Arc<dyn MediaPlayerHandle>) -> Self {
        Self { id, role, handle }
    }

    /// Identifier of the wrapped player.
    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    /// Logical role this facade was registered under.
    pub fn role(&self) -> &PlayerRole {
        &self.role
    }

    /// Begin or resume playback.
    ///
    /// # Errors
    ///
    /// Propagates the underlying player error.
    pub async fn play(&self) -> Result<(), PlayerError> {
        self.handle.play().await
    }

    /// Pause playback.
    ///
    /// # Errors
    ///
    /// Propagates the underlying player error.
    pub async fn pause(&self) -> Result<(), PlayerError> {
        self.handle.pause().await
    }

    /// Seek to an absolute position in seconds.
    ///
    /// # Errors
    ///
    /// Propagates the underlying player error.
    pub async fn seek_to(&self, seconds: f64) -> Result<(), PlayerError> {
        self.handle.seek_to(seconds).await
    }

    /// Current playback position in seconds.
    ///
    /// # Errors
    ///
    /// Propagates the underlying player error.
    pub async fn current_time(&self) -> Result<f64, PlayerError> {
        self.handle.current_time().await
    }

    /// Total duration of the current media in seconds.
    ///
    /// # Errors
    ///
    /// Propagates the underlying player error.
    pub async fn duration(&self) -> Result<f64, PlayerError> {
        self.handle.duration().await
    }

    /// Set the volume.
    ///
    /// # Errors
    ///
    /// Propagates the underlying player error.
    pub async fn set_volume(&self, volume: Volume) -> Result<(), PlayerError> {
        self.handle.set_volume(volume).await
    }

    /// Current volume (0..=100).
    ///
    /// # Errors
    ///
    /// Propagates the underlying player error.
    pub async fn volume(&self) -> Result<f64, PlayerError> {
        self.handle.volume().await
    }

    /// Mute audio output.
    ///
    /// # Errors
    ///
    /// Propagates the underlying player error.
    pub async fn mute(&self) -> Result<(), PlayerError> {
        self.handle.mute().await
    }

    /// Unmute audio output.
    ///
    /// # Errors
    ///
    /// Propagates the underlying player error.
    pub async fn unmute(&self) -> Result<(), PlayerError> {
        self.handle.unmute().await
    }

    /// Whether audio output is currently muted.
    ///
    /// # Errors
    ///
    /// Propagates the underlying player error.
    pub async fn is_muted(&self) -> Result<bool, PlayerError> {
        self.handle.is_muted().await
    }

    /// Advance to the next playlist item.
    ///
    /// # Errors
    ///
    /// Propagates the underlying player error.
    pub async fn next_item(&self) -> Result<(), PlayerError> {
        self.handle.next_item().await
    }

    /// Jump to the playlist item at `index`.
    ///
    /// # Errors
    ///
    /// Propagates the underlying player error.
    pub async fn play_item_at(&self, index: usize) -> Result<(), PlayerError> {
        self.handle.play_item_at(index).await
    }

    /// The current playlist as opaque item identifiers.
    ///
    /// # Errors
    ///
    /// Propagates the underlying player error.
    pub async fn playlist(&self) -> Result<Vec<String>, PlayerError> {
        self.handle.playlist().await
    }

    /// Best-effort play: failures are logged and swallowed.
    pub async fn try_play(&self) {
        if let Err(e) = self.handle.play().await {
            warn!("play on {} ({}) failed: {e}", self.id, self.role);
        }
    }

    /// Best-effort pause: failures are logged and swallowed.
    pub async fn try_pause(&self) {
        if let Err(e) = self.handle.pause().await {
            warn!("pause on {} ({}) failed: {e}", self.id, self.role);
        }
    }

    /// Best-effort seek: failures are logged and swallowed.
    pub async fn try_seek_to(&self, seconds: f64) {
        if let Err(e) = self.handle.seek_to(seconds).await {
            warn!("seek on {} ({}) failed: {e}", self.id, self.role);
        }
    }

    /// Best-effort volume set: failures are logged and swallowed.
    pub async fn try_set_volume(&self, volume: Volume) {
        if let Err(e) = self.handle.set_volume(volume).await {
            warn!("set_volume on {} ({}) failed: {e}", self.id, self.role);
        }
    }

    /// Best-effort mute: failures are logged and swallowed.
    pub async fn try_mute(&self) {
        if let Err(e) = self.handle.mute().await {
            warn!("mute on {} ({}) failed: {e}", self.id, self.role);
        }
    }

    /// Best-effort unmute: failures are logged and swallowed.
    pub async fn try_unmute(&self) {
        if let Err(e) = self.handle.unmute().await {
            warn!("unmute on {} ({}) failed: {e}", self.id, self.role);
        }
    }

    /// Current volume, with failed or NaN reads treated as 0.
    pub async fn volume_or_zero(&self) -> f64 {
        match self.handle.volume().await {
            Ok(v) if v.is_finite() => v.clamp(0.0, 100.0),
            Ok(_) => 0.0,
            Err(e) => {
                debug!("volume read on {} failed, treating as 0: {e}", self.id);
                0.0
            }
        }
    }

    /// Current position, with failed or NaN reads treated as 0.
    pub async fn position_or_zero(&self) -> f64 {
        match self.handle.current_time().await {
            Ok(t) if t.is_finite() => t.max(0.0),
            Ok(_) => 0.0,
            Err(e) => {
                debug!("position read on {} failed, treating as 0: {e}", self.id);
                0.0
            }
        }
    }

    /// Current mute flag, with failed reads treated as unmuted.
    pub async fn muted_or_false(&self) -> bool {
        self.handle.is_muted().await.unwrap_or(false)
    }

    /// Play, retrying a bounded number of times when autoplay policy blocks
    /// the command. Returns whether playback was started.
    pub async fn play_with_retry(&self, policy: RetryPolicy) -> bool {
        let mut attempts_left = policy.retries;
        loop {
            match self.handle.play().await {
                Ok(()) => return true,
                Err(PlayerError::AutoplayBlocked(_)) if attempts_left > 0 => {
                    attempts_left -= 1;
                    debug!(
                        "autoplay blocked on {}, retrying ({} attempts left)",
                        self.id, attempts_left
                    );
                    tokio::time::sleep(policy.backoff).await;
                }
                Err(e) => {
                    warn!("play on {} ({}) gave up: {e}", self.id, self.role);
                    return false;
                }
            }
        }
    }
}

/// Facades are equal when they wrap the same logical player: same id, same
/// role. The registry's observable list relies on this to skip redundant
/// notifications when a registration leaves the set unchanged.
impl PartialEq for PlayerFacade {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.role == other.role
    }
}

impl std::fmt::Debug for PlayerFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerFacade")
            .field("id", &self.id)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}
