use crate::quote_types::{Address, Customer, CustomerId, Payment, Quote, QuoteId, QuoteItem, QuoteItemId};

/// A complete address for the given name
pub fn sample_address(name: &str) -> Address {
    Address {
        firstname: name.to_string(),
        lastname: "Tester".to_string(),
        street: vec!["1 Main St".to_string()],
        city: "Springfield".to_string(),
        region: Some("IL".to_string()),
        postcode: "62701".to_string(),
        country_id: "US".to_string(),
        telephone: Some("555-0100".to_string()),
        email: Some(format!("{}@example.com", name.to_lowercase())),
        shipping_method: None,
        shipping_description: None,
    }
}

/// Builds quotes for tests. By default the quote is an active, non-virtual guest checkout with a billing address
/// ("Billing"), a shipping address ("Shipping") using flat-rate shipping, a `checkmo` payment and no items.
#[derive(Debug, Clone)]
pub struct QuoteBuilder {
    quote: Quote,
}

impl QuoteBuilder {
    pub fn new(id: i64) -> Self {
        let mut quote = Quote::new(QuoteId(id), sample_address("Billing"), Payment::new("checkmo"));
        let mut shipping = sample_address("Shipping");
        shipping.shipping_method = Some("flatrate_flatrate".to_string());
        shipping.shipping_description = Some("Flat Rate - Fixed".to_string());
        quote.shipping_address = Some(shipping);
        quote.customer_is_guest = true;
        Self { quote }
    }

    /// A virtual quote has no shipping address
    pub fn virtual_quote(mut self) -> Self {
        self.quote.is_virtual = true;
        self.quote.shipping_address = None;
        self
    }

    pub fn registered(mut self) -> Self {
        self.quote.customer_is_guest = false;
        self
    }

    pub fn with_customer(mut self, id: i64) -> Self {
        self.quote.customer = Some(Customer {
            id: CustomerId(id),
            email: format!("customer{id}@example.com"),
            firstname: "Registered".to_string(),
            lastname: "Customer".to_string(),
        });
        self
    }

    pub fn without_shipping_address(mut self) -> Self {
        self.quote.shipping_address = None;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.quote.is_active = false;
        self
    }

    pub fn item(mut self, id: i64) -> Self {
        self.quote.items.push(QuoteItem::new(QuoteItemId(id), format!("sku-{id}")));
        self
    }

    pub fn child(mut self, id: i64, parent: i64) -> Self {
        self.quote.items.push(QuoteItem::new(QuoteItemId(id), format!("sku-{id}")).with_parent(QuoteItemId(parent)));
        self
    }

    pub fn nominal(mut self, id: i64) -> Self {
        self.quote.items.push(QuoteItem::new(QuoteItemId(id), format!("gift-{id}")).nominal());
        self
    }

    pub fn with_item(mut self, item: QuoteItem) -> Self {
        self.quote.items.push(item);
        self
    }

    pub fn build(self) -> Quote {
        self.quote
    }
}
