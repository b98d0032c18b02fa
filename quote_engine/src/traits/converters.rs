use thiserror::Error;

use crate::{
    order_types::{OrderAddress, OrderBase, OrderItem, OrderItemId, OrderPayment, OverrideFields},
    quote_types::{Address, Payment, QuoteId, QuoteItem, QuoteItemId},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("Quote item {item} refers to parent item {parent}, which is not part of the quote")]
    MissingParentItem { item: QuoteItemId, parent: QuoteItemId },
    #[error("Quote item {0} appears more than once in the quote")]
    DuplicateItemId(QuoteItemId),
    #[error("The parent references of quote items {0:?} form a cycle")]
    CyclicItemHierarchy(Vec<QuoteItemId>),
    #[error("Quote {0} is not virtual, but has no shipping address")]
    MissingShippingAddress(QuoteId),
    #[error("Order item {item} refers to parent item {parent:?}, which is not part of the order")]
    BrokenItemLink { item: OrderItemId, parent: Option<OrderItemId> },
    #[error("Invalid order override. {0}")]
    InvalidOverride(String),
    #[error("Invalid record. {0}")]
    InvalidRecord(String),
}

/// Field-level conversion of quote-side records into their order-side counterparts.
///
/// Every method receives a set of override fields that take precedence over the values it would otherwise compute.
/// Conversions are expected to be pure: they read the source record and must not have side effects.
pub trait QuoteConverter {
    /// Converts the quote's primary address (the shipping address, or the billing address for virtual quotes) into the
    /// order header fields. `overrides` are the caller's order overrides.
    fn address_to_order(&self, address: &Address, overrides: &OverrideFields) -> Result<OrderBase, ConversionError>;

    /// Converts a quote address into an order address. `overrides` carries the `address_type` to tag the address with.
    fn address_to_order_address(
        &self,
        address: &Address,
        overrides: &OverrideFields,
    ) -> Result<OrderAddress, ConversionError>;

    /// Converts a quote line into an order line, assigning its order-side id. For child lines, `overrides` carries the
    /// order-side `parent_item_id`.
    fn item_to_order_item(&self, item: &QuoteItem, overrides: &OverrideFields) -> Result<OrderItem, ConversionError>;

    fn payment_to_order_payment(
        &self,
        payment: &Payment,
        overrides: &OverrideFields,
    ) -> Result<OrderPayment, ConversionError>;
}
