//! Order-side records.
//!
//! Unlike a quote, an [`Order`] is an immutable value. It is materialized exactly once from a fully assembled
//! [`OrderFields`] record (plus any caller overrides) by [`Order::materialize`], and the only way to obtain a changed
//! order afterwards is [`Order::with_placement`], which an order placement backend uses to stamp the id and time of
//! placement onto a new value.
//!
//! Orders read back with serde go through the same item link check as [`Order::materialize`], so a deserialized
//! order never has a child pointing at a missing parent.
use std::{collections::HashSet, fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use log::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    helpers::integer_id,
    quote_types::{CustomerId, QuoteId, QuoteItemId},
    traits::ConversionError,
};

/// Caller-supplied field values, keyed by field name. These take precedence over computed values.
pub type OverrideFields = Map<String, Value>;

integer_id!(
    /// The identifier of a line item within an order. Assigned during conversion, so it need not match the id of the
    /// quote item it came from.
    OrderItemId
);

//--------------------------------------        OrderId        ---------------------------------------------------------
/// The order number assigned when an order is placed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl FromStr for OrderId {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl OrderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------      AddressType      ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    Shipping,
    Billing,
}

impl AddressType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressType::Shipping => "shipping",
            AddressType::Billing => "billing",
        }
    }
}

impl Display for AddressType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AddressType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shipping" => Ok(AddressType::Shipping),
            "billing" => Ok(AddressType::Billing),
            _ => Err(ConversionError::InvalidRecord(format!("'{s}' is not an address type"))),
        }
    }
}

//--------------------------------------     OrderAddress      ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAddress {
    pub address_type: AddressType,
    pub firstname: String,
    pub lastname: String,
    pub street: Vec<String>,
    pub city: String,
    pub region: Option<String>,
    pub postcode: String,
    pub country_id: String,
    pub telephone: Option<String>,
    pub email: Option<String>,
}

//--------------------------------------     OrderPayment      ---------------------------------------------------------
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderPayment {
    pub method: String,
    pub additional_information: Map<String, Value>,
}

//--------------------------------------       OrderItem       ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    /// The quote line this item was converted from
    pub quote_item_id: QuoteItemId,
    /// The order-side id of the parent line, if any
    pub parent_item_id: Option<OrderItemId>,
    pub sku: String,
    pub name: String,
    pub product_type: String,
    pub qty_ordered: u32,
}

//--------------------------------------       OrderBase       ---------------------------------------------------------
/// The header fields of an order that are converted from the quote's primary address (the shipping address, or the
/// billing address for virtual quotes).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderBase {
    pub customer_email: Option<String>,
    pub customer_firstname: Option<String>,
    pub customer_lastname: Option<String>,
    pub shipping_method: Option<String>,
    pub shipping_description: Option<String>,
    /// Any other fields supplied by a converter or by caller overrides
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

//--------------------------------------      OrderFields      ---------------------------------------------------------
/// Everything computed from a quote, before overrides are applied and the order is materialized.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderFields {
    pub quote_id: QuoteId,
    pub customer_id: Option<CustomerId>,
    pub base: OrderBase,
    pub addresses: Vec<OrderAddress>,
    pub payment: OrderPayment,
    pub items: Vec<OrderItem>,
}

//--------------------------------------         Order         ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OrderRecord")]
pub struct Order {
    id: Option<OrderId>,
    quote_id: QuoteId,
    customer_id: Option<CustomerId>,
    #[serde(flatten)]
    base: OrderBase,
    addresses: Vec<OrderAddress>,
    payment: OrderPayment,
    items: Vec<OrderItem>,
    placed_at: Option<DateTime<Utc>>,
}

/// The serialized shape of an [`Order`], before its item links have been checked.
#[derive(Deserialize)]
struct OrderRecord {
    id: Option<OrderId>,
    quote_id: QuoteId,
    customer_id: Option<CustomerId>,
    #[serde(flatten)]
    base: OrderBase,
    addresses: Vec<OrderAddress>,
    payment: OrderPayment,
    items: Vec<OrderItem>,
    placed_at: Option<DateTime<Utc>>,
}

impl OrderRecord {
    fn into_order_unchecked(self) -> Order {
        let Self { id, quote_id, customer_id, base, addresses, payment, items, placed_at } = self;
        Order { id, quote_id, customer_id, base, addresses, payment, items, placed_at }
    }
}

impl TryFrom<OrderRecord> for Order {
    type Error = ConversionError;

    fn try_from(record: OrderRecord) -> Result<Self, Self::Error> {
        let order = record.into_order_unchecked();
        order.check_item_links()?;
        Ok(order)
    }
}

/// Fields that only an order placement backend may set.
const PLACEMENT_FIELDS: [&str; 2] = ["id", "placed_at"];

/// The named fields of [`Order`] and [`OrderBase`]. An [`OrderBase::extra`] entry with one of these names would shadow
/// the named field when the order is serialized.
const NAMED_FIELDS: [&str; 12] = [
    "id",
    "quote_id",
    "customer_id",
    "addresses",
    "payment",
    "items",
    "placed_at",
    "customer_email",
    "customer_firstname",
    "customer_lastname",
    "shipping_method",
    "shipping_description",
];

impl Order {
    /// Builds the immutable order value from the assembled fields. Each entry in `overrides` replaces the top-level
    /// field of the same name; names that are not order fields end up in [`OrderBase::extra`].
    ///
    /// Entries in `fields.base.extra` that reuse the name of an order field are dropped, so the computed fields stand
    /// whether or not any overrides are given.
    ///
    /// Fails if an override has the wrong shape, tries to set a placement-only field, or leaves an item pointing at a
    /// parent that is not part of the order.
    pub fn materialize(fields: OrderFields, overrides: &OverrideFields) -> Result<Self, ConversionError> {
        let OrderFields { quote_id, customer_id, mut base, addresses, payment, items } = fields;
        for name in NAMED_FIELDS {
            if base.extra.remove(name).is_some() {
                warn!("📦️ Dropping extra field '{name}' from the order for quote {quote_id}. The name is taken");
            }
        }
        let order = Self { id: None, quote_id, customer_id, base, addresses, payment, items, placed_at: None };
        let order = if overrides.is_empty() { order } else { order.merge_overrides(overrides)? };
        order.check_item_links()?;
        Ok(order)
    }

    fn merge_overrides(self, overrides: &OverrideFields) -> Result<Self, ConversionError> {
        if let Some(field) = PLACEMENT_FIELDS.iter().find(|f| overrides.contains_key(**f)) {
            return Err(ConversionError::InvalidOverride(format!("'{field}' is assigned when the order is placed")));
        }
        let mut fields = match serde_json::to_value(&self) {
            Ok(Value::Object(map)) => map,
            Ok(_) => return Err(ConversionError::InvalidOverride("order did not serialize to an object".into())),
            Err(e) => return Err(ConversionError::InvalidOverride(e.to_string())),
        };
        for (name, value) in overrides {
            fields.insert(name.clone(), value.clone());
        }
        serde_json::from_value::<OrderRecord>(Value::Object(fields))
            .map(OrderRecord::into_order_unchecked)
            .map_err(|e| ConversionError::InvalidOverride(e.to_string()))
    }

    fn check_item_links(&self) -> Result<(), ConversionError> {
        let ids = self.items.iter().map(|item| item.id).collect::<HashSet<_>>();
        match self.items.iter().find(|item| item.parent_item_id.is_some_and(|p| !ids.contains(&p))) {
            Some(item) => Err(ConversionError::BrokenItemLink { item: item.id, parent: item.parent_item_id }),
            None => Ok(()),
        }
    }

    /// Returns a copy of this order stamped with the number and time it was placed with.
    pub fn with_placement(self, id: OrderId, placed_at: DateTime<Utc>) -> Self {
        Self { id: Some(id), placed_at: Some(placed_at), ..self }
    }

    /// The order number. `None` until the order has been placed.
    pub fn id(&self) -> Option<&OrderId> {
        self.id.as_ref()
    }

    pub fn is_placed(&self) -> bool {
        self.id.is_some()
    }

    pub fn placed_at(&self) -> Option<DateTime<Utc>> {
        self.placed_at
    }

    pub fn quote_id(&self) -> QuoteId {
        self.quote_id
    }

    pub fn customer_id(&self) -> Option<CustomerId> {
        self.customer_id
    }

    pub fn base(&self) -> &OrderBase {
        &self.base
    }

    /// The order addresses: `[shipping, billing]`, or just `[billing]` for virtual orders.
    pub fn addresses(&self) -> &[OrderAddress] {
        &self.addresses
    }

    pub fn shipping_address(&self) -> Option<&OrderAddress> {
        self.addresses.iter().find(|a| a.address_type == AddressType::Shipping)
    }

    pub fn billing_address(&self) -> Option<&OrderAddress> {
        self.addresses.iter().find(|a| a.address_type == AddressType::Billing)
    }

    pub fn payment(&self) -> &OrderPayment {
        &self.payment
    }

    /// The order items, parents always ahead of their children.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn item_for_quote_item(&self, quote_item_id: QuoteItemId) -> Option<&OrderItem> {
        self.items.iter().find(|item| item.quote_item_id == quote_item_id)
    }
}
