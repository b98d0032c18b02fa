use std::{fmt::Debug, sync::Arc};

use log::*;

use crate::events::{NominalItemsSubmittedEvent, OrderSubmitEvent, SubmissionEvent};

/// A synchronous event handler
pub type Handler<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// Receives the submission lifecycle events.
///
/// `dispatch` is called inline by the workflow, which waits for it to return before carrying on. Any panic raised by a
/// listener is the publisher's concern; the engine does not catch it.
pub trait EventHookPublisher: Send + Sync {
    fn dispatch(&self, event: SubmissionEvent);
}

/// The no-op publisher
impl EventHookPublisher for () {
    fn dispatch(&self, event: SubmissionEvent) {
        trace!("🪝️ No publisher configured. Dropping {}", event.name());
    }
}

impl<P: EventHookPublisher> EventHookPublisher for Arc<P> {
    fn dispatch(&self, event: SubmissionEvent) {
        self.as_ref().dispatch(event)
    }
}

/// A registry of handlers for each submission event.
///
/// ```rust,ignore
/// let mut hooks = EventHooks::default();
/// hooks
///     .on_order_submit_success(|ev| info!("Order {:?} placed", ev.order.id()))
///     .on_order_submit_failure(|ev| warn!("Quote {} could not be placed", ev.quote.id));
/// let api = QuoteManagementApi::new(backend, hooks);
/// ```
#[derive(Default, Clone)]
pub struct EventHooks {
    pub on_nominal_items_submitted: Vec<Handler<NominalItemsSubmittedEvent>>,
    pub on_order_submit_before: Vec<Handler<OrderSubmitEvent>>,
    pub on_order_submit_success: Vec<Handler<OrderSubmitEvent>>,
    pub on_order_submit_failure: Vec<Handler<OrderSubmitEvent>>,
}

impl Debug for EventHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHooks")
            .field("on_nominal_items_submitted", &self.on_nominal_items_submitted.len())
            .field("on_order_submit_before", &self.on_order_submit_before.len())
            .field("on_order_submit_success", &self.on_order_submit_success.len())
            .field("on_order_submit_failure", &self.on_order_submit_failure.len())
            .finish()
    }
}

impl EventHooks {
    pub fn on_nominal_items_submitted<F>(&mut self, f: F) -> &mut Self
    where F: Fn(&NominalItemsSubmittedEvent) + Send + Sync + 'static {
        self.on_nominal_items_submitted.push(Arc::new(f));
        self
    }

    pub fn on_order_submit_before<F>(&mut self, f: F) -> &mut Self
    where F: Fn(&OrderSubmitEvent) + Send + Sync + 'static {
        self.on_order_submit_before.push(Arc::new(f));
        self
    }

    pub fn on_order_submit_success<F>(&mut self, f: F) -> &mut Self
    where F: Fn(&OrderSubmitEvent) + Send + Sync + 'static {
        self.on_order_submit_success.push(Arc::new(f));
        self
    }

    pub fn on_order_submit_failure<F>(&mut self, f: F) -> &mut Self
    where F: Fn(&OrderSubmitEvent) + Send + Sync + 'static {
        self.on_order_submit_failure.push(Arc::new(f));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.on_nominal_items_submitted.is_empty()
            && self.on_order_submit_before.is_empty()
            && self.on_order_submit_success.is_empty()
            && self.on_order_submit_failure.is_empty()
    }
}

fn notify<E>(name: &str, handlers: &[Handler<E>], event: &E) {
    if handlers.is_empty() {
        trace!("🪝️ No subscribers for {name}");
        return;
    }
    debug!("🪝️ Notifying {} subscriber(s) of {name}", handlers.len());
    for handler in handlers {
        (handler)(event);
    }
}

impl EventHookPublisher for EventHooks {
    fn dispatch(&self, event: SubmissionEvent) {
        let name = event.name();
        match &event {
            SubmissionEvent::NominalItemsSubmitted(ev) => notify(name, &self.on_nominal_items_submitted, ev),
            SubmissionEvent::OrderSubmitBefore(ev) => notify(name, &self.on_order_submit_before, ev),
            SubmissionEvent::OrderSubmitSuccess(ev) => notify(name, &self.on_order_submit_success, ev),
            SubmissionEvent::OrderSubmitFailure(ev) => notify(name, &self.on_order_submit_failure, ev),
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::Mutex;

    use super::*;
    use crate::quote_types::{Address, Payment, Quote, QuoteId};

    fn nominal_event(id: i64) -> SubmissionEvent {
        let quote = Quote::new(QuoteId(id), Address::default(), Payment::new("checkmo"));
        SubmissionEvent::NominalItemsSubmitted(NominalItemsSubmittedEvent::new(quote))
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let _ = env_logger::try_init();
        let calls = Arc::new(Mutex::new(Vec::new()));
        let (c1, c2) = (Arc::clone(&calls), Arc::clone(&calls));
        let mut hooks = EventHooks::default();
        hooks
            .on_nominal_items_submitted(move |ev| c1.lock().unwrap().push(format!("first:{}", ev.quote.id)))
            .on_nominal_items_submitted(move |ev| c2.lock().unwrap().push(format!("second:{}", ev.quote.id)));
        hooks.dispatch(nominal_event(5));
        hooks.dispatch(nominal_event(6));
        let calls = calls.lock().unwrap();
        assert_eq!(*calls, vec!["first:#5", "second:#5", "first:#6", "second:#6"]);
    }

    #[test]
    fn only_matching_handlers_are_called() {
        let calls = Arc::new(Mutex::new(0));
        let c = Arc::clone(&calls);
        let mut hooks = EventHooks::default();
        hooks.on_order_submit_success(move |_| *c.lock().unwrap() += 1);
        assert!(!hooks.is_empty());
        hooks.dispatch(nominal_event(1));
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn empty_registry_and_unit_publisher_are_no_ops() {
        let hooks = EventHooks::default();
        assert!(hooks.is_empty());
        hooks.dispatch(nominal_event(1));
        ().dispatch(nominal_event(1));
        assert_eq!(format!("{hooks:?}").matches(": 0").count(), 4);
    }
}
