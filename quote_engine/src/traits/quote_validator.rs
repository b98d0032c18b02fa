use thiserror::Error;

use crate::quote_types::{Quote, QuoteId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Quote {0} has no items to submit")]
    NoItems(QuoteId),
    #[error("Quote {0} has no payment method")]
    MissingPaymentMethod(QuoteId),
    #[error("The {address} address on quote {quote_id} is missing the '{field}' field")]
    IncompleteAddress { quote_id: QuoteId, address: &'static str, field: &'static str },
    #[error("Could not resolve the customer for the quote. {0}")]
    CustomerNotResolved(String),
    #[error("{0}")]
    RuleViolation(String),
}

/// Checks a quote against the business rules before it may be submitted.
///
/// Implementations must not reject a quote merely because it is inactive: the submission workflow inactivates the
/// quote before it validates it for the second time.
pub trait QuoteValidator {
    fn validate_before_submit(&self, quote: &Quote) -> Result<(), ValidationError>;
}
