//! Fullscreen and picture-in-picture reconciliation.
//!
//! Three independent triggers target the same display state: explicit user
//! toggles, scheduled auto-enable/disable events, and native change
//! notifications (the user pressing Escape). The controller reconciles them,
//! honoring the operator's deliberate choices over automation.

mod controller;
/// PiP eligibility policy (duration threshold + operator time window)
pub mod policy;


pub use controller::{DisplayError, FullscreenBackend, FullscreenPipController, RequestSource};
pub use policy::{PipPolicy, PipWindow};
