//! Stepped, cancellable volume fades.
//!
//! The atomic primitive every other playback component builds on: a fade
//! walks a player's volume from its current level to a target over a fixed
//! number of steps, with cancel-before-start discipline guaranteeing at most
//! one in-flight fade per player.

mod fader;


pub use fader::{FadeCallback, FadeHandle, VolumeFader};
