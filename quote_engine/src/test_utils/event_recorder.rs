use std::sync::{Arc, Mutex};

use crate::events::{EventHookPublisher, SubmissionEvent};

/// A publisher that keeps every event it receives, in order.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Arc<Mutex<Vec<SubmissionEvent>>>,
}

impl EventRecorder {
    pub fn events(&self) -> Vec<SubmissionEvent> {
        self.events.lock().expect("event recorder lock poisoned").clone()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().expect("event recorder lock poisoned").iter().map(SubmissionEvent::name).collect()
    }

    pub fn count(&self, name: &str) -> usize {
        self.names().into_iter().filter(|n| *n == name).count()
    }

    /// The last event with the given name
    pub fn last(&self, name: &str) -> Option<SubmissionEvent> {
        self.events().into_iter().rev().find(|ev| ev.name() == name)
    }
}

impl EventHookPublisher for EventRecorder {
    fn dispatch(&self, event: SubmissionEvent) {
        self.events.lock().expect("event recorder lock poisoned").push(event);
    }
}
