//! Quote Submission Engine
//!
//! The quote engine turns a shopping-cart aggregate (a [`Quote`](quote_types::Quote)) into an immutable, placed
//! [`Order`](order_types::Order). It owns the submission workflow only: deciding whether an order is produced at all,
//! converting the quote's item forest into an order item forest, and the event semantics around placement.
//!
//! The library is divided into these sections:
//! 1. The record types. [`mod@quote_types`] holds the mutable, caller-owned quote side, and [`mod@order_types`] holds
//!    the immutable order side.
//! 2. The collaborator contracts ([`mod@traits`]). Validation rules, customer population, record conversion and order
//!    placement are provided by the surrounding system. A backend implements these traits in order to drive the
//!    engine.
//! 3. The public API ([`QuoteManagementApi`]). This is the orchestrator of the submission workflow, and the
//!    [`ItemHierarchyResolver`] that it uses to materialize order items parent-first.
//!
//! The engine also publishes a fixed set of lifecycle events ([`mod@events`]) around submission. Handlers are
//! registered on an [`EventHooks`](events::EventHooks) instance that is handed to the API when it is created, and
//! are called synchronously.
mod helpers;

pub mod events;
pub mod order_types;
mod qe_api;
pub mod quote_types;
pub mod traits;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use qe_api::{
    config::SubmissionConfig,
    errors::QuoteSubmissionError,
    item_resolver::ItemHierarchyResolver,
    quote_management_api::QuoteManagementApi,
    submission_objects::SubmissionOutcome,
};
pub use traits::{
    ConversionError,
    CustomerManagement,
    OrderManagement,
    PlacementError,
    QuoteConverter,
    QuoteValidator,
    SubmissionBackend,
    ValidationError,
};
