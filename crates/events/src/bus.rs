//! Event bus abstraction for decoupled event emission.
//!
//! The session core hands fully typed [`Event`]s to this trait instead of
//! calling into any UI framework directly, so the whole state machine can
//! run (and be asserted on) headless. Topics and JSON live on [`Event`]
//! itself; a sink that bridges to a frontend calls [`Event::topic`] and
//! [`Event::payload`] at its own boundary.

use std::sync::{Arc, Mutex};

use crate::Event;

/// Sink for events produced by the session core.
pub trait EventBus: Send + Sync {
    fn emit(&self, event: Event);
}

/// Type alias for shared event bus reference.
pub type EventBusRef = Arc<dyn EventBus>;

/// Event bus that captures typed events for later inspection.
/// Test-oriented, also used by the headless harness to print what happened.
#[derive(Default)]
pub struct RecordingEventBus {
    events: Mutex<Vec<Event>>,
}

impl RecordingEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured events in emission order.
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Captured events whose derived topic matches.
    pub fn events_for(&self, topic: &str) -> Vec<Event> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.topic() == topic)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }
}

impl EventBus for RecordingEventBus {
    fn emit(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

/// Event bus for hosts with no frontend attached. Discards everything.
pub struct NullEventBus;

impl EventBus for NullEventBus {
    fn emit(&self, _event: Event) {}
}
