use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::services::player::{PlayerError, PlayerFacade, PlayerId, Volume};

/// Callback invoked exactly once when a fade reaches its target.
///
/// Never invoked for a cancelled fade; invoked on the failure path too,
/// after the fade jumps to its final target.
pub type FadeCallback = Box<dyn FnOnce() + Send + 'static>;

struct ActiveFade {
    generation: u64,
    task: JoinHandle<()>,
}

type ActiveFades = Arc<Mutex<HashMap<PlayerId, ActiveFade>>>;

/// Produces cancellable, stepped volume transitions.
///
/// At most one fade is in flight per player: starting a new fade cancels any
/// fade already running on that player before the first step is scheduled,
/// so a stale step can never fire after a newer fade has started.
pub struct VolumeFader {
    steps: u32,
    active: ActiveFades,
    next_generation: AtomicU64,
}

impl VolumeFader {
    /// Create a fader using `steps` intermediate volume writes per fade.
    pub fn new(steps: u32) -> Self {
        Self {
            steps: steps.max(1),
            active: Arc::new(Mutex::new(HashMap::new())),
            next_generation: AtomicU64::new(1),
        }
    }

    /// Fade `player` from its current volume to `target` over `duration`.
    ///
    /// A zero `duration` applies the target immediately (mute when the target
    /// is silent, unmute-then-set otherwise) and fires `on_complete` before
    /// returning. Otherwise the transition is split into the configured step
    /// count, each step rounding toward the target; the final step force-sets
    /// the exact target so rounding drift cannot accumulate.
    ///
    /// The returned handle cancels the pending steps; it is idempotent and
    /// safe to call after completion.
    pub async fn fade(
        &self,
        player: &Arc<PlayerFacade>,
        target: Volume,
        duration: Duration,
        on_complete: Option<FadeCallback>,
    ) -> FadeHandle {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);

        // tear the previous fade down before sampling the start volume, so a
        // stale step cannot land between the sample and our first step
        self.cancel_active(player.id()).await;

        if duration.is_zero() {
            apply_level_best_effort(player, target.rounded()).await;
            if let Some(callback) = on_complete {
                callback();
            }
            return FadeHandle {
                player: player.id().clone(),
                generation,
                active: Arc::clone(&self.active),
            };
        }

        let start = player.volume_or_zero().await;
        let step_interval = duration / self.steps;
        let task = tokio::spawn(run_fade(
            Arc::clone(player),
            start,
            target,
            self.steps,
            step_interval,
            on_complete,
            Arc::clone(&self.active),
            generation,
        ));

        let mut active = self.active.lock().await;
        if let Some(previous) = active.insert(
            player.id().clone(),
            ActiveFade { generation, task },
        ) {
            // a concurrent fade() slipped in between the cancel and here
            previous.task.abort();
            debug!("superseded in-flight fade on {}", player.id());
        }

        FadeHandle {
            player: player.id().clone(),
            generation,
            active: Arc::clone(&self.active),
        }
    }

    /// Cancel whatever fade is currently running on `player`, if any.
    pub async fn cancel_active(&self, player: &PlayerId) {
        let mut active = self.active.lock().await;
        if let Some(previous) = active.remove(player) {
            previous.task.abort();
            debug!("cancelled in-flight fade on {player}");
        }
    }
}

/// Cancellation handle for one in-flight fade.
///
/// Cancelling clears the pending step timer. Calling it after the fade has
/// completed, or after a newer fade replaced this one, is a no-op. Dropping
/// the handle does not cancel; teardown goes through an explicit call.
pub struct FadeHandle {
    player: PlayerId,
    generation: u64,
    active: ActiveFades,
}

impl FadeHandle {
    /// Cancel the fade if it is still the active one on its player.
    pub async fn cancel(&self) {
        let mut active = self.active.lock().await;
        let matches = active
            .get(&self.player)
            .is_some_and(|entry| entry.generation == self.generation);
        if matches {
            if let Some(entry) = active.remove(&self.player) {
                entry.task.abort();
                debug!("fade on {} cancelled", self.player);
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_fade(
    player: Arc<PlayerFacade>,
    start: f64,
    target: Volume,
    steps: u32,
    step_interval: Duration,
    on_complete: Option<FadeCallback>,
    active: ActiveFades,
    generation: u64,
) {
    let final_level = target.rounded();
    let delta = final_level - start;

    for step in 1..=steps {
        tokio::time::sleep(step_interval).await;

        let level = if step == steps {
            final_level
        } else {
            (start + delta * f64::from(step) / f64::from(steps)).round()
        };

        if let Err(e) = apply_level(&player, level).await {
            // A half-faded player is worse than a hard cut: jump straight
            // to the final target and report completion.
            warn!("fade step on {} failed, jumping to target: {e}", player.id());
            apply_level_best_effort(&player, final_level).await;
            break;
        }
    }

    let mut map = active.lock().await;
    let still_ours = map
        .get(player.id())
        .is_some_and(|entry| entry.generation == generation);
    if still_ours {
        map.remove(player.id());
    }
    drop(map);

    if let Some(callback) = on_complete {
        callback();
    }
}

/// Write one volume level to a player.
///
/// A level of exactly 0 mutes instead of setting volume, because players may
/// not silence fully via volume alone; any nonzero level unmutes first when
/// the player is currently muted.
async fn apply_level(player: &PlayerFacade, level: f64) -> Result<(), PlayerError> {
    if level <= 0.0 {
        player.mute().await
    } else {
        if player.is_muted().await? {
            player.unmute().await?;
        }
        player.set_volume(Volume::new(level)).await
    }
}

async fn apply_level_best_effort(player: &PlayerFacade, level: f64) {
    if level <= 0.0 {
        player.try_mute().await;
    } else {
        if player.muted_or_false().await {
            player.try_unmute().await;
        }
        player.try_set_volume(Volume::new(level)).await;
    }
}
