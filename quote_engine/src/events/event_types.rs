use serde::{Deserialize, Serialize};

use crate::{order_types::Order, quote_types::Quote};

pub const NOMINAL_ITEMS_SUBMITTED: &str = "quote.submit.nominal_items";
pub const ORDER_SUBMIT_BEFORE: &str = "order.submit.before";
pub const ORDER_SUBMIT_SUCCESS: &str = "order.submit.success";
pub const ORDER_SUBMIT_FAILURE: &str = "order.submit.failure";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NominalItemsSubmittedEvent {
    pub quote: Quote,
}

impl NominalItemsSubmittedEvent {
    pub fn new(quote: Quote) -> Self {
        Self { quote }
    }
}

/// Payload for all the order submission events.
///
/// For `order.submit.failure`, `order` is the order as it was before placement was attempted, i.e. it has no order
/// number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSubmitEvent {
    pub order: Order,
    pub quote: Quote,
}

impl OrderSubmitEvent {
    pub fn new(order: Order, quote: Quote) -> Self {
        Self { order, quote }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload")]
pub enum SubmissionEvent {
    #[serde(rename = "quote.submit.nominal_items")]
    NominalItemsSubmitted(NominalItemsSubmittedEvent),
    #[serde(rename = "order.submit.before")]
    OrderSubmitBefore(OrderSubmitEvent),
    #[serde(rename = "order.submit.success")]
    OrderSubmitSuccess(OrderSubmitEvent),
    #[serde(rename = "order.submit.failure")]
    OrderSubmitFailure(OrderSubmitEvent),
}

impl SubmissionEvent {
    /// The published name of the event
    pub fn name(&self) -> &'static str {
        match self {
            SubmissionEvent::NominalItemsSubmitted(_) => NOMINAL_ITEMS_SUBMITTED,
            SubmissionEvent::OrderSubmitBefore(_) => ORDER_SUBMIT_BEFORE,
            SubmissionEvent::OrderSubmitSuccess(_) => ORDER_SUBMIT_SUCCESS,
            SubmissionEvent::OrderSubmitFailure(_) => ORDER_SUBMIT_FAILURE,
        }
    }

    pub fn quote(&self) -> &Quote {
        match self {
            SubmissionEvent::NominalItemsSubmitted(ev) => &ev.quote,
            SubmissionEvent::OrderSubmitBefore(ev)
            | SubmissionEvent::OrderSubmitSuccess(ev)
            | SubmissionEvent::OrderSubmitFailure(ev) => &ev.quote,
        }
    }

    /// The order in the payload. `None` for `quote.submit.nominal_items`.
    pub fn order(&self) -> Option<&Order> {
        match self {
            SubmissionEvent::NominalItemsSubmitted(_) => None,
            SubmissionEvent::OrderSubmitBefore(ev)
            | SubmissionEvent::OrderSubmitSuccess(ev)
            | SubmissionEvent::OrderSubmitFailure(ev) => Some(&ev.order),
        }
    }
}
