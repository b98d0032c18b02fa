//! # Quote engine public API
//!
//! * [`quote_management_api`] is the orchestrator of the submission workflow. It decides whether an order is produced,
//!   assembles it, hands it to the placement backend and publishes the lifecycle events.
//! * [`item_resolver`] converts the quote's item forest into order items, parents first.
//!
//! The other submodules in this module are support types.
//!
//! # API usage
//!
//! An API instance is created by supplying a backend that implements [`SubmissionBackend`](crate::SubmissionBackend)
//! and a publisher for the lifecycle events:
//!
//! ```rust,ignore
//! use quote_engine::{events::EventHooks, QuoteManagementApi, SubmissionOutcome};
//! let mut hooks = EventHooks::default();
//! hooks.on_order_submit_success(|ev| notify_warehouse(&ev.order));
//! let api = QuoteManagementApi::new(my_backend, hooks);
//! match api.submit(&mut quote, &OverrideFields::new())? {
//!     SubmissionOutcome::Placed(order) => println!("Placed {:?}", order.id()),
//!     SubmissionOutcome::NoOrder => println!("Nothing to order"),
//! }
//! ```

pub mod config;
pub mod errors;
pub mod item_resolver;
pub mod quote_management_api;
pub mod submission_objects;
