//! Submission lifecycle events
//!
//! The engine notifies the outside world at four fixed points of the submission workflow. The event names and payloads
//! are a closed contract:
//!
//! | Event name                   | Variant                                         | Payload        |
//! |------------------------------|-------------------------------------------------|----------------|
//! | `quote.submit.nominal_items` | [`SubmissionEvent::NominalItemsSubmitted`]      | quote          |
//! | `order.submit.before`        | [`SubmissionEvent::OrderSubmitBefore`]          | order, quote   |
//! | `order.submit.success`       | [`SubmissionEvent::OrderSubmitSuccess`]         | order, quote   |
//! | `order.submit.failure`       | [`SubmissionEvent::OrderSubmitFailure`]         | order, quote   |
//!
//! Events are handed to an [`EventHookPublisher`] that is injected into the API. Dispatch is synchronous: the workflow
//! does not continue until the publisher returns. [`EventHooks`] is the bundled publisher, which calls the handlers
//! registered for each event in registration order.
mod event_types;
mod hooks;

pub use event_types::*;
pub use hooks::{EventHookPublisher, EventHooks, Handler};
