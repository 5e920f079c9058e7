//! Player capability surface and per-player facades.
//!
//! Normalizes heterogeneous concrete players (main video, background bed,
//! hidden note players) behind one command/query surface so the rest of the
//! core never branches on player type.

/// Player error types
pub mod error;
/// Uniform per-player command/query wrapper
pub mod facade;
/// Capability trait concrete players implement
pub mod handle;
/// Role-keyed registry of live facades
pub mod registry;
/// Player identifiers, roles, transport state and volume
pub mod types;

#[cfg(test)]
pub(crate) mod fake;


pub use error::PlayerError;
pub use facade::{PlayerFacade, RetryPolicy};
pub use handle::MediaPlayerHandle;
pub use registry::PlayerRegistry;
pub use types::{PlayerId, PlayerRole, TransportState, Volume};
