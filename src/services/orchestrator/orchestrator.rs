use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::future::BoxFuture;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::services::common::Property;
use crate::services::display::FullscreenPipController;
use crate::services::fade::{FadeCallback, VolumeFader};
use crate::services::player::{PlayerRegistry, TransportState, Volume};
use crate::services::schedule::TimeEventScheduler;

use super::OrchestratorSettings;

/// Hook that re-registers the event schedule from the current configuration.
///
/// Installed by the service wiring once the schedule is resolved; invoked on
/// restart so already-triggered one-shot events fire again on replay.
pub type RebuildHook = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// The top-level playback policy engine.
///
/// Constructed once and shared; holds all mutable playback state behind
/// narrow command methods, publishing read-only observable state through
/// [`Property`] signals. Every player command degrades to a logged no-op on
/// failure: a single bad callback must not halt the timers governing the
/// rest of a live, unattended presentation.
pub struct PlaybackOrchestrator {
    registry: Arc<PlayerRegistry>,
    fader: Arc<VolumeFader>,
    scheduler: Arc<TimeEventScheduler>,
    display: Arc<FullscreenPipController>,
    settings: OrchestratorSettings,

    main_state: Mutex<TransportState>,
    main_playing: Property<bool>,
    background_should_play: Property<bool>,
    ducking: Property<bool>,
    muted: Property<bool>,
    background_user_volume: Property<Volume>,

    /// One-shot marker: a manual background-volume change suppresses the
    /// automatic fade for the next main-player state transition only.
    manual_volume_change: AtomicBool,
    /// Meaningful only while ducking is enabled.
    pre_duck_volume: Mutex<Option<Volume>>,
    rebuild_schedule: Mutex<Option<RebuildHook>>,
}

impl PlaybackOrchestrator {
    /// Wire the orchestrator over its collaborators.
    pub fn new(
        registry: Arc<PlayerRegistry>,
        fader: Arc<VolumeFader>,
        scheduler: Arc<TimeEventScheduler>,
        display: Arc<FullscreenPipController>,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            registry,
            fader,
            scheduler,
            display,
            settings,
            main_state: Mutex::new(TransportState::Unstarted),
            main_playing: Property::new(false),
            background_should_play: Property::new(true),
            ducking: Property::new(false),
            muted: Property::new(false),
            background_user_volume: Property::new(Volume::new(100.0)),
            manual_volume_change: AtomicBool::new(false),
            pre_duck_volume: Mutex::new(None),
            rebuild_schedule: Mutex::new(None),
        }
    }

    /// Observable: whether the main player is playing.
    pub fn main_playing(&self) -> Property<bool> {
        self.main_playing.clone()
    }

    /// Observable: whether the background bed should be audible.
    pub fn background_should_play(&self) -> Property<bool> {
        self.background_should_play.clone()
    }

    /// Observable: whether ducking is currently applied.
    pub fn ducking(&self) -> Property<bool> {
        self.ducking.clone()
    }

    /// Observable: whether the main player is muted.
    pub fn muted(&self) -> Property<bool> {
        self.muted.clone()
    }

    /// Observable: the last user-set background volume.
    pub fn background_user_volume(&self) -> Property<Volume> {
        self.background_user_volume.clone()
    }

    /// Current transport state of the main player.
    pub async fn transport_state(&self) -> TransportState {
        *self.main_state.lock().await
    }

    /// Install the schedule rebuild hook used by [`restart`](Self::restart).
    pub async fn set_rebuild_hook(&self, hook: RebuildHook) {
        *self.rebuild_schedule.lock().await = Some(hook);
    }

    /// Drive the per-main-player state machine
    /// (`Unstarted → Paused ⇄ Playing → Ended → Paused`).
    ///
    /// Every edge triggers exactly one of: fade the background down, fade it
    /// up, or nothing. `Ended` additionally seeks back to the configured
    /// start offset and settles as `Paused`.
    #[instrument(skip(self))]
    pub async fn handle_main_transition(&self, next: TransportState) {
        let mut state = self.main_state.lock().await;
        let previous = *state;
        if previous == next {
            return;
        }

        match next {
            TransportState::Playing => {
                *state = TransportState::Playing;
                drop(state);
                self.on_main_playing().await;
            }
            TransportState::Paused => {
                *state = TransportState::Paused;
                drop(state);
                self.on_main_stopped().await;
            }
            TransportState::Ended => {
                // Ended settles as Paused once the position is reset
                *state = TransportState::Paused;
                drop(state);
                self.on_main_ended().await;
            }
            TransportState::Unstarted => {
                *state = TransportState::Unstarted;
            }
        }
    }

    async fn on_main_playing(&self) {
        info!("main player playing, attention goes to it");
        self.main_playing.set(true);

        if let Some(main) = self.registry.main().await {
            self.scheduler.start(main).await;
        }

        self.fade_background_down().await;
    }

    async fn on_main_stopped(&self) {
        info!("main player stopped, background bed returns");
        self.main_playing.set(false);
        self.scheduler.stop().await;
        self.fade_background_up().await;
    }

    async fn on_main_ended(&self) {
        info!("main player ended, resetting to start offset");
        self.main_playing.set(false);
        self.scheduler.stop().await;

        if let Some(main) = self.registry.main().await {
            main.try_seek_to(self.settings.start_offset).await;
        }

        // ended counts as paused for background-fade purposes
        self.fade_background_up().await;
    }

    /// Fade the background bed toward silence, pausing it once the fade
    /// actually reaches zero (and only if nothing re-enabled it meanwhile).
    async fn fade_background_down(&self) {
        self.background_should_play.set(false);
        if self.take_manual_suppression() {
            return;
        }

        let Some(background) = self.registry.background().await else {
            return;
        };

        let should_play = self.background_should_play.clone();
        let pause_target = Arc::clone(&background);
        let on_complete: FadeCallback = Box::new(move || {
            if should_play.get() {
                debug!("background re-enabled during fade-down, not pausing");
                return;
            }
            tokio::spawn(async move {
                pause_target.try_pause().await;
            });
        });

        self.fader
            .fade(
                &background,
                Volume::new(0.0),
                self.settings.background_fade_down,
                Some(on_complete),
            )
            .await;
    }

    /// Bring the background bed back: start playback and fade up to the
    /// last user-set volume.
    async fn fade_background_up(&self) {
        self.background_should_play.set(true);
        if self.take_manual_suppression() {
            return;
        }

        let Some(background) = self.registry.background().await else {
            return;
        };

        background.play_with_retry(self.settings.retry).await;
        self.fader
            .fade(
                &background,
                self.background_user_volume.get(),
                self.settings.background_fade_up,
                None,
            )
            .await;
    }

    /// Consume the one-shot manual-change marker.
    fn take_manual_suppression(&self) -> bool {
        let suppressed = self.manual_volume_change.swap(false, Ordering::SeqCst);
        if suppressed {
            debug!("manual background volume change suppresses this automatic fade");
        }
        suppressed
    }

    /// Record a user-initiated background volume change.
    ///
    /// Applies the volume immediately and flags the change so the next
    /// automatic fade does not immediately undo the operator's slider drag.
    pub async fn set_background_volume(&self, volume: Volume) {
        let volume = Volume::new(volume.rounded());
        self.background_user_volume.set(volume);
        self.manual_volume_change.store(true, Ordering::SeqCst);

        if let Some(background) = self.registry.background().await {
            self.fader.cancel_active(background.id()).await;
            if volume.is_silent() {
                background.try_mute().await;
            } else {
                if background.muted_or_false().await {
                    background.try_unmute().await;
                }
                background.try_set_volume(volume).await;
            }
        }
    }

    /// Duck the main player: snapshot its volume and drop it instantly to
    /// `duck_ratio` of the snapshot. Refused (no-op) while muted.
    #[instrument(skip(self))]
    pub async fn enable_ducking(&self) {
        if self.muted.get() {
            debug!("ducking refused while main player is muted");
            return;
        }
        if self.ducking.get() {
            debug!("ducking already enabled");
            return;
        }
        let Some(main) = self.registry.main().await else {
            return;
        };

        let snapshot = Volume::new(main.volume_or_zero().await.round());
        *self.pre_duck_volume.lock().await = Some(snapshot);

        let ducked = Volume::new((snapshot.rounded() * self.settings.duck_ratio).round());
        main.try_set_volume(ducked).await;
        self.ducking.set(true);
        info!(
            "ducking enabled: {} -> {}",
            snapshot.rounded(),
            ducked.rounded()
        );
    }

    /// Undo ducking: fade from the ducked level back to the exact pre-duck
    /// snapshot. A hard jump back would be audibly jarring, so this uses the
    /// same stepped fade as every other transition.
    #[instrument(skip(self))]
    pub async fn disable_ducking(&self) {
        let Some(snapshot) = self.pre_duck_volume.lock().await.take() else {
            debug!("ducking not enabled, disable is a no-op");
            return;
        };
        self.ducking.set(false);

        let Some(main) = self.registry.main().await else {
            return;
        };
        self.fader
            .fade(&main, snapshot, self.settings.duck_restore, None)
            .await;
        info!("ducking disabled, restoring to {}", snapshot.rounded());
    }

    /// Mute or unmute the main player.
    pub async fn set_muted(&self, muted: bool) {
        if let Some(main) = self.registry.main().await {
            if muted {
                main.try_mute().await;
            } else {
                main.try_unmute().await;
            }
        }
        self.muted.set(muted);
    }

    /// Toggle the main player's mute state.
    pub async fn toggle_mute(&self) {
        let muted = self.muted.get();
        self.set_muted(!muted).await;
    }

    /// Pause the background bed (scheduled `Pause` events land here).
    pub async fn pause_background(&self) {
        self.background_should_play.set(false);
        if let Some(background) = self.registry.background().await {
            self.fader.cancel_active(background.id()).await;
            background.try_pause().await;
        }
    }

    /// Resume the background bed, fading up to the user volume
    /// (scheduled `Unpause` events land here).
    pub async fn resume_background(&self) {
        self.background_should_play.set(true);
        let Some(background) = self.registry.background().await else {
            return;
        };
        background.play_with_retry(self.settings.retry).await;
        self.fader
            .fade(
                &background,
                self.background_user_volume.get(),
                self.settings.background_fade_up,
                None,
            )
            .await;
    }

    /// Restart the presentation from the top.
    ///
    /// Seeks to 0, forces playback, rebuilds the event schedule from the
    /// current configuration (so one-shot events fire again on replay), and
    /// clears the display controller's manual-exit suppression.
    #[instrument(skip(self))]
    pub async fn restart(&self) {
        info!("restarting presentation from the top");

        if let Some(main) = self.registry.main().await {
            main.try_seek_to(0.0).await;
            main.play_with_retry(self.settings.retry).await;
        }

        self.scheduler.clear_events().await;
        let hook = self.rebuild_schedule.lock().await.clone();
        if let Some(hook) = hook {
            hook().await;
        }

        self.display.clear_user_exited();
        self.handle_main_transition(TransportState::Playing).await;
    }
}
