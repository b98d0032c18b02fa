use std::fmt::Debug;

use log::*;
use serde_json::Value;

use crate::{
    events::{EventHookPublisher, EventHooks, NominalItemsSubmittedEvent, OrderSubmitEvent, SubmissionEvent},
    order_types::{AddressType, Order, OrderAddress, OrderFields, OverrideFields},
    qe_api::{
        config::SubmissionConfig,
        errors::QuoteSubmissionError,
        item_resolver::ItemHierarchyResolver,
        submission_objects::SubmissionOutcome,
    },
    quote_types::{Address, Quote},
    traits::{ConversionError, SubmissionBackend},
};

/// `QuoteManagementApi` turns an active quote into a placed order.
///
/// The state of a quote across a single call to [`Self::submit`] moves through
///
/// ```text
/// Active ─▶ nominal items purged ─┬─▶ NoOrder (inactive)
///                                 └─▶ order attempted ─┬─▶ Placed (inactive)
///                                                      └─▶ placement failed
/// ```
///
/// and never returns to `Active`. Nothing is rolled back when a late step fails: items deleted and customer details
/// populated along the way stay on the quote.
///
/// The workflow is synchronous. The API takes `&mut Quote`, so a given quote can only be submitted by one caller at a
/// time; callers that share quotes between threads must provide their own locking.
pub struct QuoteManagementApi<B, P = EventHooks> {
    backend: B,
    hooks: P,
    config: SubmissionConfig,
}

impl<B, P> Debug for QuoteManagementApi<B, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "QuoteManagementApi")
    }
}

impl<B, P> QuoteManagementApi<B, P> {
    pub fn new(backend: B, hooks: P) -> Self {
        Self::with_config(backend, hooks, SubmissionConfig::default())
    }

    pub fn with_config(backend: B, hooks: P, config: SubmissionConfig) -> Self {
        Self { backend, hooks, config }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn hooks(&self) -> &P {
        &self.hooks
    }

    pub fn config(&self) -> &SubmissionConfig {
        &self.config
    }
}

impl<B, P> QuoteManagementApi<B, P>
where
    B: SubmissionBackend,
    P: EventHookPublisher,
{
    /// Submit a quote.
    ///
    /// Nominal items are submitted first (see [`Self::submit_nominal_items`]). If that leaves the quote without any
    /// visible items, the quote is inactivated and [`SubmissionOutcome::NoOrder`] is returned. Otherwise, the order is
    /// assembled and placed by [`Self::submit_order`].
    ///
    /// `order_overrides` are merged into the assembled order and take precedence over the computed values.
    pub fn submit(
        &self,
        quote: &mut Quote,
        order_overrides: &OverrideFields,
    ) -> Result<SubmissionOutcome, QuoteSubmissionError> {
        self.submit_nominal_items(quote)?;
        if !quote.has_visible_items() {
            quote.inactivate();
            debug!("🛒️ Quote {} has nothing left to order once nominal items are removed", quote.id);
            return Ok(SubmissionOutcome::NoOrder);
        }
        let order = self.submit_order(quote, order_overrides)?;
        Ok(SubmissionOutcome::Placed(order))
    }

    /// Validate the quote, publish `quote.submit.nominal_items`, inactivate the quote and delete its visible nominal
    /// items.
    ///
    /// Deleting nominal items is idempotent. Inactivation is one-way, so a second call leaves the quote inactive.
    pub fn submit_nominal_items(&self, quote: &mut Quote) -> Result<(), QuoteSubmissionError> {
        trace!("🛒️ Submitting nominal items for quote {}", quote.id);
        self.backend.validate_before_submit(quote)?;
        self.hooks.dispatch(SubmissionEvent::NominalItemsSubmitted(NominalItemsSubmittedEvent::new(quote.clone())));
        quote.inactivate();
        let deleted = quote.delete_nominal_items();
        debug!("🛒️ Nominal items submitted for quote {}. {deleted} item(s) removed", quote.id);
        Ok(())
    }

    /// Assemble an order from the quote and place it.
    ///
    /// Nominal items are removed (again), the quote is re-validated, and for non-guest checkouts the customer is
    /// populated. The order is then assembled from the quote's orderable items (see [`Quote::orderable_items`]),
    /// `order.submit.before` is published, and the order is handed to the placement backend.
    ///
    /// On success the quote is inactivated, `order.submit.success` is published and the placed order is returned.
    /// On failure, `order.submit.failure` is published with the unplaced order and the placement error is returned.
    /// The quote's active flag is not touched in that case.
    pub fn submit_order(
        &self,
        quote: &mut Quote,
        order_overrides: &OverrideFields,
    ) -> Result<Order, QuoteSubmissionError> {
        quote.delete_nominal_items();
        if self.config.revalidate_before_order {
            self.backend.validate_before_submit(quote)?;
        }
        if !quote.customer_is_guest {
            trace!("🛒️ Populating customer details for quote {}", quote.id);
            self.backend.populate_customer_info(quote)?;
        }
        let order = self.assemble_order(quote, order_overrides)?;
        debug!("📦️ Order for quote {} assembled with {} item(s)", quote.id, order.items().len());
        self.hooks.dispatch(SubmissionEvent::OrderSubmitBefore(OrderSubmitEvent::new(order.clone(), quote.clone())));
        match self.backend.place(order.clone()) {
            Ok(placed) => {
                quote.inactivate();
                info!("📦️ Quote {} was placed as order {:?}", quote.id, placed.id().map(|id| id.as_str()));
                self.hooks.dispatch(SubmissionEvent::OrderSubmitSuccess(OrderSubmitEvent::new(
                    placed.clone(),
                    quote.clone(),
                )));
                Ok(placed)
            },
            Err(e) => {
                error!("📦️ Could not place the order for quote {}. {e}", quote.id);
                self.hooks.dispatch(SubmissionEvent::OrderSubmitFailure(OrderSubmitEvent::new(order, quote.clone())));
                Err(e.into())
            },
        }
    }

    fn assemble_order(&self, quote: &Quote, order_overrides: &OverrideFields) -> Result<Order, ConversionError> {
        let mut addresses = Vec::with_capacity(2);
        let base = if quote.is_virtual {
            self.backend.address_to_order(&quote.billing_address, order_overrides)?
        } else {
            let shipping = quote.shipping_address.as_ref().ok_or(ConversionError::MissingShippingAddress(quote.id))?;
            let base = self.backend.address_to_order(shipping, order_overrides)?;
            addresses.push(self.convert_address(shipping, AddressType::Shipping)?);
            base
        };
        addresses.push(self.convert_address(&quote.billing_address, AddressType::Billing)?);
        let payment = self.backend.payment_to_order_payment(&quote.payment, &OverrideFields::new())?;
        let quote_items = quote.orderable_items().collect::<Vec<_>>();
        let items = ItemHierarchyResolver::new(&self.backend).resolve_items(&quote_items)?;
        let fields = OrderFields {
            quote_id: quote.id,
            customer_id: quote.customer.as_ref().map(|c| c.id),
            base,
            addresses,
            payment,
            items,
        };
        Order::materialize(fields, order_overrides)
    }

    fn convert_address(&self, address: &Address, address_type: AddressType) -> Result<OrderAddress, ConversionError> {
        let mut overrides = OverrideFields::new();
        overrides.insert("address_type".to_string(), Value::from(address_type.as_str()));
        let mut order_address = self.backend.address_to_order_address(address, &overrides)?;
        order_address.address_type = address_type;
        Ok(order_address)
    }
}
