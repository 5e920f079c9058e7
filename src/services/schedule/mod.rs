//! Time-triggered event scheduling against a player's timeline.
//!
//! A [`Schedule`] is the pure trigger core (explicit time feeds, no clocks);
//! the [`TimeEventScheduler`] drives one by polling a player's position while
//! it is playing.

mod schedule;
mod scheduler;
/// Event classifications and action thunks
pub mod types;

#[cfg(test)]
mod tests;

pub use schedule::Schedule;
pub use scheduler::TimeEventScheduler;
pub use types::{ActionKind, EventAction, EventKind, TimeEvent};
