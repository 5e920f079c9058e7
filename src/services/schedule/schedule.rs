use std::cmp::Ordering;
use std::sync::Arc;

use tracing::debug;

use super::types::{ActionKind, EventAction, EventKind, TimeEvent};

/// The pure trigger core: a list of time events against one timeline.
///
/// Holds no timers of its own; the owning scheduler feeds it sampled
/// positions through [`Schedule::advance_to`]. Keeping the trigger logic
/// free of clocks is what lets tests drive it with explicit time feeds.
#[derive(Default)]
pub struct Schedule {
    events: Vec<TimeEvent>,
    last_position: Option<f64>,
}

impl Schedule {
    /// Create an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an event.
    ///
    /// Returns `false` without inserting when the time is not a finite,
    /// non-negative number, or when an event with the same
    /// `(time, event kind)` pair is already registered. Duplicates are a
    /// scheduling conflict resolved by ignoring the newcomer, not an error.
    pub fn register(
        &mut self,
        time: f64,
        event: EventKind,
        act: ActionKind,
        action: EventAction,
    ) -> bool {
        if !time.is_finite() || time < 0.0 {
            debug!("rejecting event at invalid time {time}");
            return false;
        }
        if self
            .events
            .iter()
            .any(|existing| existing.time == time && existing.event == event)
        {
            debug!("ignoring duplicate {event} event at {time}s");
            return false;
        }

        self.events.push(TimeEvent {
            time,
            event,
            act,
            action,
            triggered: false,
        });
        true
    }

    /// Empty the schedule and forget the last observed position.
    pub fn clear(&mut self) {
        self.events.clear();
        self.last_position = None;
    }

    /// Number of registered events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no events are registered.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Feed one sampled timeline position; returns the actions now due,
    /// in ascending trigger-time order.
    ///
    /// Backward motion relative to the previous sample (a user seek) re-arms
    /// every triggered event that is now ahead of the position again, so it
    /// fires once more on the next forward pass.
    pub fn advance_to(&mut self, position: f64) -> Vec<EventAction> {
        if let Some(last) = self.last_position
            && position < last
        {
            for event in self
                .events
                .iter_mut()
                .filter(|event| event.triggered && event.time > position)
            {
                debug!("re-arming {} event at {}s after seek-back", event.event, event.time);
                event.triggered = false;
            }
        }
        self.last_position = Some(position);

        let mut due: Vec<&mut TimeEvent> = self
            .events
            .iter_mut()
            .filter(|event| !event.triggered && event.time <= position)
            .collect();
        due.sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap_or(Ordering::Equal));

        due.into_iter()
            .map(|event| {
                event.triggered = true;
                debug!("firing {} {:?} event at {}s", event.event, event.act, event.time);
                Arc::clone(&event.action)
            })
            .collect()
    }
}
