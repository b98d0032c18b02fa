use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
    Mutex,
};

use chrono::Utc;
use log::*;

use crate::{
    order_types::{
        AddressType,
        Order,
        OrderAddress,
        OrderBase,
        OrderId,
        OrderItem,
        OrderItemId,
        OrderPayment,
        OverrideFields,
    },
    quote_types::{Address, Customer, Payment, Quote, QuoteId, QuoteItem},
    traits::{
        ConversionError,
        CustomerManagement,
        OrderManagement,
        PlacementError,
        QuoteConverter,
        QuoteValidator,
        ValidationError,
    },
};

/// A record of a call made into the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCall {
    Validate(QuoteId),
    PopulateCustomer(QuoteId),
    Place(QuoteId),
}

/// The converter method that received a set of overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConverterMethod {
    AddressToOrder,
    AddressToOrderAddress,
    ItemToOrderItem,
    PaymentToOrderPayment,
}

/// An in-memory [`SubmissionBackend`](crate::SubmissionBackend).
///
/// * Validation passes unless a failure has been configured with [`Self::failing_validation`].
/// * Customer population sets the customer given to [`Self::with_customer`], or fails with
///   [`ValidationError::CustomerNotResolved`] if there is none and the quote has no customer yet.
/// * Conversions copy fields across. Order item ids are assigned from a counter starting at 1001, so they never match
///   the quote item ids of small fixtures. Lines with a zero quantity are rejected.
/// * Placement assigns sequential order numbers (`000000001`, ...) unless a failure has been configured with
///   [`Self::failing_placement`].
///
/// Every converter call records the overrides it was handed; see [`Self::overrides_received`].
///
/// Clones share their call logs and counters.
#[derive(Debug, Clone)]
pub struct MockBackend {
    validation_failure: Option<ValidationError>,
    placement_failure: Option<PlacementError>,
    customer: Option<Customer>,
    calls: Arc<Mutex<Vec<BackendCall>>>,
    overrides: Arc<Mutex<Vec<(ConverterMethod, OverrideFields)>>>,
    next_item_id: Arc<AtomicI64>,
    next_order_number: Arc<AtomicI64>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            validation_failure: None,
            placement_failure: None,
            customer: None,
            calls: Arc::new(Mutex::new(Vec::new())),
            overrides: Arc::new(Mutex::new(Vec::new())),
            next_item_id: Arc::new(AtomicI64::new(1001)),
            next_order_number: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl MockBackend {
    pub fn failing_validation(mut self, error: ValidationError) -> Self {
        self.validation_failure = Some(error);
        self
    }

    pub fn failing_placement(mut self, error: PlacementError) -> Self {
        self.placement_failure = Some(error);
        self
    }

    pub fn with_customer(mut self, customer: Customer) -> Self {
        self.customer = Some(customer);
        self
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().expect("call log lock poisoned").clone()
    }

    pub fn call_count(&self, call: BackendCall) -> usize {
        self.calls().into_iter().filter(|c| *c == call).count()
    }

    /// The overrides handed to each call of `method`, in call order.
    pub fn overrides_received(&self, method: ConverterMethod) -> Vec<OverrideFields> {
        let log = self.overrides.lock().expect("override log lock poisoned");
        log.iter().filter(|(m, _)| *m == method).map(|(_, overrides)| overrides.clone()).collect()
    }

    fn record(&self, call: BackendCall) {
        trace!("🧪️ {call:?}");
        self.calls.lock().expect("call log lock poisoned").push(call);
    }

    fn record_overrides(&self, method: ConverterMethod, overrides: &OverrideFields) {
        trace!("🧪️ {method:?} received {} override(s)", overrides.len());
        self.overrides.lock().expect("override log lock poisoned").push((method, overrides.clone()));
    }
}

impl QuoteValidator for MockBackend {
    fn validate_before_submit(&self, quote: &Quote) -> Result<(), ValidationError> {
        self.record(BackendCall::Validate(quote.id));
        match &self.validation_failure {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

impl CustomerManagement for MockBackend {
    fn populate_customer_info(&self, quote: &mut Quote) -> Result<(), ValidationError> {
        self.record(BackendCall::PopulateCustomer(quote.id));
        match (&self.customer, &quote.customer) {
            (Some(customer), _) => {
                quote.customer = Some(customer.clone());
                Ok(())
            },
            (None, Some(_)) => Ok(()),
            (None, None) => Err(ValidationError::CustomerNotResolved(format!("no customer for quote {}", quote.id))),
        }
    }
}

impl QuoteConverter for MockBackend {
    fn address_to_order(&self, address: &Address, overrides: &OverrideFields) -> Result<OrderBase, ConversionError> {
        self.record_overrides(ConverterMethod::AddressToOrder, overrides);
        Ok(OrderBase {
            customer_email: address.email.clone(),
            customer_firstname: Some(address.firstname.clone()),
            customer_lastname: Some(address.lastname.clone()),
            shipping_method: address.shipping_method.clone(),
            shipping_description: address.shipping_description.clone(),
            ..Default::default()
        })
    }

    fn address_to_order_address(
        &self,
        address: &Address,
        overrides: &OverrideFields,
    ) -> Result<OrderAddress, ConversionError> {
        self.record_overrides(ConverterMethod::AddressToOrderAddress, overrides);
        let address_type = overrides
            .get("address_type")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ConversionError::InvalidRecord("address_type is required".to_string()))?
            .parse::<AddressType>()?;
        Ok(OrderAddress {
            address_type,
            firstname: address.firstname.clone(),
            lastname: address.lastname.clone(),
            street: address.street.clone(),
            city: address.city.clone(),
            region: address.region.clone(),
            postcode: address.postcode.clone(),
            country_id: address.country_id.clone(),
            telephone: address.telephone.clone(),
            email: address.email.clone(),
        })
    }

    fn item_to_order_item(&self, item: &QuoteItem, overrides: &OverrideFields) -> Result<OrderItem, ConversionError> {
        self.record_overrides(ConverterMethod::ItemToOrderItem, overrides);
        if item.qty == 0 {
            return Err(ConversionError::InvalidRecord(format!("quote item {} has no quantity", item.id)));
        }
        let parent_item_id = overrides.get("parent_item_id").and_then(|v| v.as_i64()).map(OrderItemId);
        Ok(OrderItem {
            id: OrderItemId(self.next_item_id.fetch_add(1, Ordering::SeqCst)),
            quote_item_id: item.id,
            parent_item_id,
            sku: item.sku.clone(),
            name: item.name.clone(),
            product_type: item.product_type.clone(),
            qty_ordered: item.qty,
        })
    }

    fn payment_to_order_payment(
        &self,
        payment: &Payment,
        overrides: &OverrideFields,
    ) -> Result<OrderPayment, ConversionError> {
        self.record_overrides(ConverterMethod::PaymentToOrderPayment, overrides);
        Ok(OrderPayment {
            method: payment.method.clone(),
            additional_information: payment.additional_information.clone(),
        })
    }
}

impl OrderManagement for MockBackend {
    fn place(&self, order: Order) -> Result<Order, PlacementError> {
        self.record(BackendCall::Place(order.quote_id()));
        if let Some(e) = &self.placement_failure {
            return Err(e.clone());
        }
        let number = self.next_order_number.fetch_add(1, Ordering::SeqCst);
        Ok(order.with_placement(OrderId(format!("{number:09}")), Utc::now()))
    }
}
