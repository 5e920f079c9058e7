use std::sync::{Arc, Weak};
use std::time::Duration;

use chrono::NaiveDateTime;
use futures::FutureExt;
use tracing::{debug, info, warn};

use crate::config::{Config, ScheduleEntry};
use crate::core::Result;
use crate::services::display::{FullscreenBackend, FullscreenPipController, RequestSource};
use crate::services::fade::VolumeFader;
use crate::services::orchestrator::{PlaybackOrchestrator, RebuildHook};
use crate::services::player::PlayerRegistry;
use crate::services::schedule::{ActionKind, EventAction, EventKind, TimeEventScheduler};

/// Container for all application services
///
/// Holds references to all initialized services that can be shared
/// across the application. Services are created once during startup
/// and then shared via Arc references.
pub struct Services {
    /// Role-keyed registry the embedding UI registers players into
    pub registry: Arc<PlayerRegistry>,
    /// The app-wide volume fader
    pub fader: Arc<VolumeFader>,
    /// Time-event scheduler polling the main player
    pub scheduler: Arc<TimeEventScheduler>,
    /// Fullscreen/PiP controller
    pub display: Arc<FullscreenPipController>,
    /// The playback policy engine
    pub orchestrator: Arc<PlaybackOrchestrator>,
    config: Config,
}

impl Services {
    /// Create all application services
    ///
    /// Initializes all required services using the provided configuration.
    /// The display backend is supplied by the embedding UI, like the player
    /// handles registered later.
    ///
    /// # Errors
    /// Returns error if the configuration fails validation
    pub fn new(config: Config, backend: Arc<dyn FullscreenBackend>) -> Result<Self> {
        config.validate()?;

        let registry = Arc::new(PlayerRegistry::new());
        let fader = Arc::new(VolumeFader::new(config.fade.steps));
        let scheduler = Arc::new(TimeEventScheduler::new(config.poll_interval()));
        let display = Arc::new(FullscreenPipController::new(backend));

        let orchestrator = Arc::new(PlaybackOrchestrator::new(
            Arc::clone(&registry),
            Arc::clone(&fader),
            Arc::clone(&scheduler),
            Arc::clone(&display),
            config.orchestrator_settings(),
        ));

        Ok(Self {
            registry,
            fader,
            scheduler,
            display,
            orchestrator,
            config,
        })
    }

    /// Shorthand for [`Services::new`] with the default configuration.
    ///
    /// # Errors
    /// Returns error if the default configuration fails validation
    pub fn with_defaults(backend: Arc<dyn FullscreenBackend>) -> Result<Self> {
        Self::new(Config::default(), backend)
    }

    /// Resolve the configured schedule for the loaded content and register
    /// it with the scheduler.
    ///
    /// PiP entries are registered only when the content duration and the
    /// wall clock pass the configured eligibility policy. The resolved plan
    /// is also installed as the orchestrator's rebuild hook so a restart
    /// replays it from scratch.
    ///
    /// # Errors
    /// Returns error if the PiP policy configuration fails to resolve
    pub async fn apply_schedule(
        &self,
        content_duration: Duration,
        now: NaiveDateTime,
    ) -> Result<()> {
        let pip_eligible = self.config.pip.policy()?.eligible(content_duration, now);

        let plan: Vec<ScheduleEntry> = self
            .config
            .schedule
            .iter()
            .filter(|entry| {
                if entry.event == EventKind::Pip && !pip_eligible {
                    info!(
                        "skipping pip {:?} event at {}s: content not eligible",
                        entry.action, entry.time_seconds
                    );
                    return false;
                }
                true
            })
            .cloned()
            .collect();

        let hook = rebuild_hook(
            Arc::clone(&self.scheduler),
            Arc::downgrade(&self.orchestrator),
            Arc::clone(&self.display),
            plan,
        );
        self.orchestrator.set_rebuild_hook(Arc::clone(&hook)).await;

        self.scheduler.clear_events().await;
        hook().await;

        debug!(
            "schedule applied: {} events registered",
            self.scheduler.event_count().await
        );
        Ok(())
    }
}

/// Build the closure that (re)registers the resolved plan.
///
/// Holds the orchestrator weakly: the scheduler's actions must not keep the
/// orchestrator alive through the reference cycle orchestrator → scheduler →
/// action → orchestrator.
fn rebuild_hook(
    scheduler: Arc<TimeEventScheduler>,
    orchestrator: Weak<PlaybackOrchestrator>,
    display: Arc<FullscreenPipController>,
    plan: Vec<ScheduleEntry>,
) -> RebuildHook {
    Arc::new(move || {
        let scheduler = Arc::clone(&scheduler);
        let orchestrator = orchestrator.clone();
        let display = Arc::clone(&display);
        let plan = plan.clone();
        async move {
            for entry in plan {
                let Some(action) =
                    bind_action(&orchestrator, &display, entry.event, entry.action)
                else {
                    warn!(
                        "no built-in action for {} {:?} at {}s, skipping",
                        entry.event, entry.action, entry.time_seconds
                    );
                    continue;
                };
                scheduler
                    .register_event(entry.time_seconds, entry.event, entry.action, action)
                    .await;
            }
        }
        .boxed()
    })
}

/// Map a configured (event, action) pair onto an orchestrator/display call.
fn bind_action(
    orchestrator: &Weak<PlaybackOrchestrator>,
    display: &Arc<FullscreenPipController>,
    event: EventKind,
    act: ActionKind,
) -> Option<EventAction> {
    let action: EventAction = match (event, act) {
        (EventKind::Fullscreen, ActionKind::Enable) => {
            let display = Arc::clone(display);
            Arc::new(move || {
                let display = Arc::clone(&display);
                async move {
                    display.request_fullscreen(RequestSource::Scheduled).await;
                }
                .boxed()
            })
        }
        (EventKind::Fullscreen, ActionKind::Disable) => {
            let display = Arc::clone(display);
            Arc::new(move || {
                let display = Arc::clone(&display);
                async move {
                    display.exit_fullscreen(RequestSource::Scheduled).await;
                }
                .boxed()
            })
        }
        (EventKind::Pip, ActionKind::Enable) => {
            let display = Arc::clone(display);
            Arc::new(move || {
                let display = Arc::clone(&display);
                async move {
                    display.enable_pip().await;
                }
                .boxed()
            })
        }
        (EventKind::Pip, ActionKind::Disable) => {
            let display = Arc::clone(display);
            Arc::new(move || {
                let display = Arc::clone(&display);
                async move {
                    display.disable_pip().await;
                }
                .boxed()
            })
        }
        (EventKind::Ducking, ActionKind::Enable) => {
            let orchestrator = orchestrator.clone();
            Arc::new(move || {
                let orchestrator = orchestrator.clone();
                async move {
                    if let Some(orchestrator) = orchestrator.upgrade() {
                        orchestrator.enable_ducking().await;
                    }
                }
                .boxed()
            })
        }
        (EventKind::Ducking, ActionKind::Disable) => {
            let orchestrator = orchestrator.clone();
            Arc::new(move || {
                let orchestrator = orchestrator.clone();
                async move {
                    if let Some(orchestrator) = orchestrator.upgrade() {
                        orchestrator.disable_ducking().await;
                    }
                }
                .boxed()
            })
        }
        (EventKind::Pause, _) => {
            let orchestrator = orchestrator.clone();
            Arc::new(move || {
                let orchestrator = orchestrator.clone();
                async move {
                    if let Some(orchestrator) = orchestrator.upgrade() {
                        orchestrator.pause_background().await;
                    }
                }
                .boxed()
            })
        }
        (EventKind::Unpause, _) => {
            let orchestrator = orchestrator.clone();
            Arc::new(move || {
                let orchestrator = orchestrator.clone();
                async move {
                    if let Some(orchestrator) = orchestrator.upgrade() {
                        orchestrator.resume_background().await;
                    }
                }
                .boxed()
            })
        }
        _ => return None,
    };
    Some(action)
}
