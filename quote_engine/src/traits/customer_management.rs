use crate::{quote_types::Quote, traits::ValidationError};

/// Populates the customer identity on a quote for checkouts by registered (non-guest) customers.
pub trait CustomerManagement {
    /// Fills in `quote.customer`, creating the customer record first if the backend needs to.
    ///
    /// A customer that cannot be resolved is reported as a [`ValidationError`]; the quote cannot be submitted as-is.
    fn populate_customer_info(&self, quote: &mut Quote) -> Result<(), ValidationError>;
}
