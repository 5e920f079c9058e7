//! Playback policy engine.
//!
//! Keeps the main and background players mutually exclusive for the
//! listener's attention: when the main player speaks, the background bed
//! fades out and pauses; when the main player stops, the bed fades back in.
//! Also owns ducking, mute, end-of-media and restart policy, and publishes
//! the observable playback state the rest of the console reads.

mod orchestrator;
mod settings;

#[cfg(test)]
mod tests;

pub use orchestrator::{PlaybackOrchestrator, RebuildHook};
pub use settings::OrchestratorSettings;
