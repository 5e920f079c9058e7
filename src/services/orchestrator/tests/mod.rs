//! Behavioral tests for the playback policy engine.
//!
//! Each test wires a real fader/scheduler/display over scriptable fake
//! players and drives main-player transitions on the paused tokio clock.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use futures::FutureExt;

use crate::services::display::{DisplayError, FullscreenBackend, FullscreenPipController};
use crate::services::fade::VolumeFader;
use crate::services::orchestrator::{OrchestratorSettings, PlaybackOrchestrator};
use crate::services::player::fake::FakePlayer;
use crate::services::player::{MediaPlayerHandle, PlayerId, PlayerRegistry, PlayerRole, TransportState, Volume};
use crate::services::schedule::TimeEventScheduler;

struct NoopBackend;

#[async_trait]
impl FullscreenBackend for NoopBackend {
    async fn enter_fullscreen(&self) -> Result<(), DisplayError> {
        Ok(())
    }

    async fn exit_fullscreen(&self) -> Result<(), DisplayError> {
        Ok(())
    }

    async fn enter_pip(&self) -> Result<(), DisplayError> {
        Ok(())
    }

    async fn exit_pip(&self) -> Result<(), DisplayError> {
        Ok(())
    }
}

struct Rig {
    main: Arc<FakePlayer>,
    background: Arc<FakePlayer>,
    display: Arc<FullscreenPipController>,
    orchestrator: PlaybackOrchestrator,
}

async fn rig() -> Rig {
    let registry = Arc::new(PlayerRegistry::new());
    let main = Arc::new(FakePlayer::with_volume("main", 80.0));
    let background = Arc::new(FakePlayer::with_volume("background", 40.0));

    registry
        .register(
            PlayerId::new("main"),
            PlayerRole::Main,
            Arc::clone(&main) as Arc<dyn MediaPlayerHandle>,
        )
        .await;
    registry
        .register(
            PlayerId::new("background"),
            PlayerRole::Background,
            Arc::clone(&background) as Arc<dyn MediaPlayerHandle>,
        )
        .await;

    let fader = Arc::new(VolumeFader::new(25));
    let scheduler = Arc::new(TimeEventScheduler::new(Duration::from_millis(500)));
    let display = Arc::new(FullscreenPipController::new(
        Arc::new(NoopBackend) as Arc<dyn FullscreenBackend>
    ));

    let orchestrator = PlaybackOrchestrator::new(
        registry,
        fader,
        scheduler,
        Arc::clone(&display),
        OrchestratorSettings::default(),
    );

    Rig {
        main,
        background,
        display,
        orchestrator,
    }
}

/// Let all in-flight fades and spawned follow-ups settle.
async fn settle() {
    tokio::time::sleep(Duration::from_secs(5)).await;
}

mod mutual_exclusion {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn main_playing_fades_background_out_and_pauses_it() {
        let rig = rig().await;
        rig.orchestrator
            .set_background_volume(Volume::new(40.0))
            .await;
        // the manual marker covers exactly one transition; consume it
        rig.orchestrator
            .handle_main_transition(TransportState::Paused)
            .await;
        settle().await;

        rig.orchestrator
            .handle_main_transition(TransportState::Playing)
            .await;
        settle().await;

        assert!(rig.orchestrator.main_playing().get());
        assert!(!rig.orchestrator.background_should_play().get());
        assert!(rig.background.muted());
        assert!(!rig.background.is_playing(), "pause follows fade reaching 0");
    }

    #[tokio::test(start_paused = true)]
    async fn main_paused_restores_background_to_user_volume() {
        let rig = rig().await;
        rig.orchestrator
            .set_background_volume(Volume::new(40.0))
            .await;
        rig.orchestrator
            .handle_main_transition(TransportState::Paused)
            .await;
        settle().await;

        rig.orchestrator
            .handle_main_transition(TransportState::Playing)
            .await;
        settle().await;
        rig.orchestrator
            .handle_main_transition(TransportState::Paused)
            .await;
        settle().await;

        assert!(rig.background.is_playing());
        assert_eq!(rig.background.current_volume(), 40.0);
        assert!(rig.orchestrator.background_should_play().get());
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_transition_reports_are_ignored() {
        let rig = rig().await;
        rig.orchestrator
            .handle_main_transition(TransportState::Playing)
            .await;
        settle().await;
        let writes = rig.background.volume_writes().len();

        // pollers can report the same state repeatedly
        rig.orchestrator
            .handle_main_transition(TransportState::Playing)
            .await;
        settle().await;

        assert_eq!(rig.background.volume_writes().len(), writes);
    }
}

mod manual_override {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn slider_drag_suppresses_one_automatic_fade() {
        let rig = rig().await;

        // operator drags the background slider to 70...
        rig.orchestrator
            .set_background_volume(Volume::new(70.0))
            .await;
        // ...and the very next transition must not undo it
        rig.orchestrator
            .handle_main_transition(TransportState::Playing)
            .await;
        settle().await;

        assert_eq!(rig.background.current_volume(), 70.0);
        assert!(!rig.background.muted());

        // the next organic transition pair fades automatically again
        rig.orchestrator
            .handle_main_transition(TransportState::Paused)
            .await;
        settle().await;
        rig.orchestrator
            .handle_main_transition(TransportState::Playing)
            .await;
        settle().await;

        assert!(rig.background.muted());
        assert!(!rig.background.is_playing());
    }
}

mod ducking {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn round_trip_restores_exact_pre_duck_volume() {
        let rig = rig().await;

        rig.orchestrator.enable_ducking().await;
        assert!(rig.orchestrator.ducking().get());
        // 80 * 0.66, rounded
        assert_eq!(rig.main.current_volume(), 53.0);

        rig.orchestrator.disable_ducking().await;
        settle().await;

        assert!(!rig.orchestrator.ducking().get());
        assert_eq!(rig.main.current_volume(), 80.0);
    }

    #[tokio::test(start_paused = true)]
    async fn duck_is_instant_but_restore_is_faded() {
        let rig = rig().await;

        rig.orchestrator.enable_ducking().await;
        // no fade on the way down: exactly one write
        assert_eq!(rig.main.volume_writes(), vec![53.0]);

        rig.orchestrator.disable_ducking().await;
        settle().await;

        // stepped fade on the way back up
        assert!(rig.main.volume_writes().len() > 2);
        assert_eq!(rig.main.volume_writes().last().copied(), Some(80.0));
    }

    #[tokio::test(start_paused = true)]
    async fn ducking_refused_while_muted() {
        let rig = rig().await;
        rig.orchestrator.set_muted(true).await;

        rig.orchestrator.enable_ducking().await;

        assert!(!rig.orchestrator.ducking().get());
        assert_eq!(rig.main.current_volume(), 80.0);
    }

    #[tokio::test(start_paused = true)]
    async fn double_enable_keeps_first_snapshot() {
        let rig = rig().await;

        rig.orchestrator.enable_ducking().await;
        rig.orchestrator.enable_ducking().await;
        rig.orchestrator.disable_ducking().await;
        settle().await;

        assert_eq!(rig.main.current_volume(), 80.0);
    }
}

mod end_of_media {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ended_seeks_to_start_offset_and_settles_paused() {
        let rig = rig().await;
        rig.main.set_position(300.0);

        rig.orchestrator
            .handle_main_transition(TransportState::Playing)
            .await;
        settle().await;
        rig.orchestrator
            .handle_main_transition(TransportState::Ended)
            .await;
        settle().await;

        assert_eq!(rig.orchestrator.transport_state().await, TransportState::Paused);
        assert!(!rig.orchestrator.main_playing().get());
        assert_eq!(rig.main.position(), 0.0);
        // background returns as if paused
        assert!(rig.background.is_playing());
    }
}

mod restart {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn restart_rebuilds_schedule_and_clears_user_exit() {
        let rig = rig().await;
        let rebuilds = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&rebuilds);
        rig.orchestrator
            .set_rebuild_hook(Arc::new(move || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                }
                .boxed()
            }))
            .await;

        // simulate the operator having escaped fullscreen earlier
        rig.display.handle_native_change(true);
        rig.display.handle_native_change(false);
        assert!(rig.display.user_exited());

        rig.orchestrator.restart().await;
        settle().await;

        assert_eq!(rebuilds.load(Ordering::SeqCst), 1);
        assert!(!rig.display.user_exited());
        assert!(rig.main.is_playing());
        assert_eq!(rig.orchestrator.transport_state().await, TransportState::Playing);
    }
}

mod degraded_players {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn failing_background_never_panics_the_policy() {
        let rig = rig().await;
        rig.background.set_failing(true);

        rig.orchestrator
            .handle_main_transition(TransportState::Playing)
            .await;
        settle().await;
        rig.orchestrator
            .handle_main_transition(TransportState::Paused)
            .await;
        settle().await;

        // commands degraded to logged no-ops; signals still advanced
        assert!(rig.orchestrator.background_should_play().get());
    }

    #[tokio::test(start_paused = true)]
    async fn autoplay_retry_eventually_starts_background() {
        let rig = rig().await;
        rig.background.block_autoplay(2);

        rig.orchestrator
            .handle_main_transition(TransportState::Paused)
            .await;
        settle().await;

        assert!(rig.background.is_playing());
        assert_eq!(rig.background.play_attempts_blocked(), 0);
    }
}
