use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::services::player::PlayerFacade;

use super::schedule::Schedule;
use super::types::{ActionKind, EventAction, EventKind};

/// Polls a player's timeline and fires registered time events.
///
/// The underlying players expose position only as a query, so the scheduler
/// samples at a fixed cadence while the owning player is playing. An event
/// falling between two samples still fires on the next one, slightly late;
/// acceptable because actions are idempotent state toggles.
///
/// The poll task exists only between [`start`](Self::start) and
/// [`stop`](Self::stop): while paused it is torn down, not merely skipped,
/// so no drift accumulates across a long-running session.
pub struct TimeEventScheduler {
    schedule: Arc<Mutex<Schedule>>,
    poll_interval: Duration,
    poll_task: Mutex<Option<JoinHandle<()>>>,
}

impl TimeEventScheduler {
    /// Create a scheduler polling at `poll_interval`.
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            schedule: Arc::new(Mutex::new(Schedule::new())),
            poll_interval,
            poll_task: Mutex::new(None),
        }
    }

    /// Register an event; duplicates of an existing `(time, event)` pair are
    /// ignored. Returns whether the event was inserted.
    pub async fn register_event(
        &self,
        time: f64,
        event: EventKind,
        act: ActionKind,
        action: EventAction,
    ) -> bool {
        self.schedule.lock().await.register(time, event, act, action)
    }

    /// Empty the schedule, dropping all trigger state.
    pub async fn clear_events(&self) {
        self.schedule.lock().await.clear();
    }

    /// Number of registered events.
    pub async fn event_count(&self) -> usize {
        self.schedule.lock().await.len()
    }

    /// Begin polling `player`'s position.
    ///
    /// Any previous poll loop is torn down first; there is never more than
    /// one loop sampling at a time.
    pub async fn start(&self, player: Arc<PlayerFacade>) {
        self.stop().await;

        let schedule = Arc::clone(&self.schedule);
        let interval = self.poll_interval;
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                tick(&schedule, &player).await;
            }
        });

        *self.poll_task.lock().await = Some(task);
        debug!("scheduler poll loop started ({interval:?} cadence)");
    }

    /// Tear down the poll loop, if one is running.
    pub async fn stop(&self) {
        if let Some(task) = self.poll_task.lock().await.take() {
            task.abort();
            debug!("scheduler poll loop torn down");
        }
    }
}

/// One poll iteration: sample the position, fire whatever is due.
///
/// A failed or non-finite position read skips the tick entirely. Coercing it
/// to 0 would look like a seek to the start and wrongly re-arm every event.
async fn tick(schedule: &Arc<Mutex<Schedule>>, player: &PlayerFacade) {
    let position = match player.current_time().await {
        Ok(time) if time.is_finite() => time.max(0.0),
        Ok(time) => {
            debug!("non-finite position {time} from {}, skipping tick", player.id());
            return;
        }
        Err(e) => {
            debug!("position read from {} failed, skipping tick: {e}", player.id());
            return;
        }
    };

    // Collect due actions under the lock, run them after releasing it, so a
    // slow action cannot block concurrent registration.
    let due: Vec<EventAction> = schedule.lock().await.advance_to(position);
    for action in due {
        action().await;
    }
}
