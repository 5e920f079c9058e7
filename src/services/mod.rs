//! Reactive services for playback orchestration.

/// Common utilities and reactive primitives
pub mod common;
/// Fullscreen and picture-in-picture reconciliation
pub mod display;
/// Stepped, cancellable volume fades
pub mod fade;
/// Playback policy engine
pub mod orchestrator;
/// Player capability surface and facades
pub mod player;
/// Time-triggered event scheduling
pub mod schedule;

pub use common::Property;
pub use display::{FullscreenBackend, FullscreenPipController, PipPolicy, PipWindow};
pub use fade::{FadeHandle, VolumeFader};
pub use orchestrator::{OrchestratorSettings, PlaybackOrchestrator};
pub use player::{
    MediaPlayerHandle, PlayerError, PlayerFacade, PlayerId, PlayerRegistry, PlayerRole,
    TransportState, Volume,
};
pub use schedule::{ActionKind, EventKind, Schedule, TimeEventScheduler};
