//! # Collaborator contracts
//!
//! The engine only orchestrates. Everything that touches business rules, customer records, field-level record
//! conversion or order persistence is supplied by the surrounding system through the traits in this module.
//!
//! * [`QuoteValidator`] checks a quote against the business rules before it is submitted.
//! * [`CustomerManagement`] fills in the customer record on quotes that are not guest checkouts.
//! * [`QuoteConverter`] maps quote-side records (addresses, items, payments) onto their order-side counterparts.
//! * [`OrderManagement`] places a finalized order. It is the single source of truth for whether an order happened.
//!
//! [`SubmissionBackend`] bundles all four. Any `Send + Sync` type that implements the four traits is a backend and can
//! be handed to [`QuoteManagementApi`](crate::QuoteManagementApi), which can then be shared between threads.
mod converters;
mod customer_management;
mod order_management;
mod quote_validator;

pub use converters::{ConversionError, QuoteConverter};
pub use customer_management::CustomerManagement;
pub use order_management::{OrderManagement, PlacementError};
pub use quote_validator::{QuoteValidator, ValidationError};

/// The full set of collaborators that the submission workflow needs.
pub trait SubmissionBackend:
    QuoteValidator + CustomerManagement + QuoteConverter + OrderManagement + Send + Sync
{
}

impl<T> SubmissionBackend for T where
    T: QuoteValidator + CustomerManagement + QuoteConverter + OrderManagement + Send + Sync
{
}
