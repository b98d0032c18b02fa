//! Quote-side records.
//!
//! A [`Quote`] is the mutable cart aggregate that the caller owns for its whole lifetime. The submission workflow
//! flips its `is_active` flag and the `deleted` markers of its items, and a [`CustomerManagement`] backend may fill in
//! its customer, but the engine never persists it.
//!
//! [`CustomerManagement`]: crate::traits::CustomerManagement
use std::collections::HashSet;

use log::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::helpers::integer_id;

integer_id!(
    /// The identifier of a quote
    QuoteId
);
integer_id!(
    /// The identifier of a line item within a quote
    QuoteItemId
);
integer_id!(
    /// The identifier of a registered customer
    CustomerId
);

//--------------------------------------       Address        ---------------------------------------------------------
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub firstname: String,
    pub lastname: String,
    pub street: Vec<String>,
    pub city: String,
    pub region: Option<String>,
    pub postcode: String,
    pub country_id: String,
    pub telephone: Option<String>,
    pub email: Option<String>,
    /// The carrier/method code selected for this address. Only meaningful on a shipping address.
    pub shipping_method: Option<String>,
    pub shipping_description: Option<String>,
}

//--------------------------------------       Payment        ---------------------------------------------------------
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// The payment method code, e.g. `checkmo`
    pub method: String,
    /// Method-specific data, carried over to the order untouched
    pub additional_information: Map<String, Value>,
}

impl Payment {
    pub fn new<S: Into<String>>(method: S) -> Self {
        Self { method: method.into(), additional_information: Map::new() }
    }
}

//--------------------------------------       Customer       ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
}

//--------------------------------------      QuoteItem       ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteItem {
    pub id: QuoteItemId,
    /// The id of the parent line within the same quote. Child lines (e.g. the options of a bundle) point at their
    /// parent by id only.
    pub parent_item_id: Option<QuoteItemId>,
    pub sku: String,
    pub name: String,
    pub product_type: String,
    pub qty: u32,
    /// A line with no shippable or priceable footprint, e.g. a free gift.
    pub is_nominal: bool,
    /// False for lines that only exist as child metadata of a visible line.
    pub visible: bool,
    /// Soft-delete marker
    pub deleted: bool,
}

impl QuoteItem {
    pub fn new<S: Into<String>>(id: QuoteItemId, sku: S) -> Self {
        let sku = sku.into();
        Self {
            id,
            parent_item_id: None,
            name: sku.clone(),
            sku,
            product_type: "simple".to_string(),
            qty: 1,
            is_nominal: false,
            visible: true,
            deleted: false,
        }
    }

    /// Makes this line a child of `parent`. Child lines are hidden by default.
    pub fn with_parent(mut self, parent: QuoteItemId) -> Self {
        self.parent_item_id = Some(parent);
        self.visible = false;
        self
    }

    pub fn with_qty(mut self, qty: u32) -> Self {
        self.qty = qty;
        self
    }

    pub fn with_product_type<S: Into<String>>(mut self, product_type: S) -> Self {
        self.product_type = product_type.into();
        self
    }

    pub fn with_visibility(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn nominal(mut self) -> Self {
        self.is_nominal = true;
        self
    }

    pub fn is_child(&self) -> bool {
        self.parent_item_id.is_some()
    }
}

//--------------------------------------        Quote         ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    pub items: Vec<QuoteItem>,
    pub billing_address: Address,
    /// Absent (or ignored) when the quote is virtual
    pub shipping_address: Option<Address>,
    pub payment: Payment,
    pub customer: Option<Customer>,
    pub is_virtual: bool,
    pub is_active: bool,
    pub customer_is_guest: bool,
}

impl Quote {
    /// Creates a new, active, non-virtual quote for a registered customer, with no items.
    pub fn new(id: QuoteId, billing_address: Address, payment: Payment) -> Self {
        Self {
            id,
            items: Vec::new(),
            billing_address,
            shipping_address: None,
            payment,
            customer: None,
            is_virtual: false,
            is_active: true,
            customer_is_guest: false,
        }
    }

    /// All items that have not been deleted, visible or not, in quote order.
    pub fn all_items(&self) -> impl Iterator<Item = &QuoteItem> {
        self.items.iter().filter(|item| !item.deleted)
    }

    /// All items that have not been deleted and are visible, in quote order.
    pub fn all_visible_items(&self) -> impl Iterator<Item = &QuoteItem> {
        self.all_items().filter(|item| item.visible)
    }

    /// Items that may become order lines, in quote order: not deleted, not nominal, and with no nominal line
    /// anywhere above them.
    ///
    /// Hidden nominal lines survive [`Self::delete_nominal_items`], which only looks at visible lines. They are
    /// filtered out here.
    pub fn orderable_items(&self) -> impl Iterator<Item = &QuoteItem> {
        let mut excluded = self.items.iter().filter(|item| item.is_nominal).map(|item| item.id).collect::<HashSet<_>>();
        loop {
            let below = self
                .items
                .iter()
                .filter(|item| !excluded.contains(&item.id))
                .filter(|item| item.parent_item_id.is_some_and(|parent| excluded.contains(&parent)))
                .map(|item| item.id)
                .collect::<Vec<_>>();
            if below.is_empty() {
                break;
            }
            excluded.extend(below);
        }
        self.all_items().filter(move |item| !excluded.contains(&item.id))
    }

    pub fn has_visible_items(&self) -> bool {
        self.all_visible_items().next().is_some()
    }

    pub fn item(&self, id: QuoteItemId) -> Option<&QuoteItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Marks the quote as inactive. There is no way back: a quote is never re-activated by the engine.
    pub fn inactivate(&mut self) {
        if self.is_active {
            trace!("🛒️ Quote {} is now inactive", self.id);
        }
        self.is_active = false;
    }

    /// Soft-deletes the item with the given id, along with every line below it in the item hierarchy.
    ///
    /// Returns the number of items that were newly marked as deleted.
    pub fn delete_item(&mut self, id: QuoteItemId) -> usize {
        let mut pending = vec![id];
        let mut seen = HashSet::new();
        let mut count = 0;
        while let Some(next) = pending.pop() {
            if !seen.insert(next) {
                continue;
            }
            for item in self.items.iter_mut() {
                if item.id == next && !item.deleted {
                    item.deleted = true;
                    count += 1;
                }
                if item.parent_item_id == Some(next) {
                    pending.push(item.id);
                }
            }
        }
        count
    }

    /// Soft-deletes every visible nominal item (and the lines below it). Calling this again is a no-op.
    ///
    /// Returns the number of items that were newly marked as deleted.
    pub fn delete_nominal_items(&mut self) -> usize {
        let nominal = self.all_visible_items().filter(|item| item.is_nominal).map(|item| item.id).collect::<Vec<_>>();
        nominal.into_iter().map(|id| self.delete_item(id)).sum()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn quote_with(items: Vec<QuoteItem>) -> Quote {
        let mut quote = Quote::new(QuoteId(1), Address::default(), Payment::new("checkmo"));
        quote.items = items;
        quote
    }

    #[test]
    fn visible_items_skip_children_and_deleted_lines() {
        let mut quote = quote_with(vec![
            QuoteItem::new(QuoteItemId(1), "bundle"),
            QuoteItem::new(QuoteItemId(2), "option").with_parent(QuoteItemId(1)),
            QuoteItem::new(QuoteItemId(3), "shirt"),
        ]);
        quote.items[2].deleted = true;
        let visible = quote.all_visible_items().map(|i| i.id).collect::<Vec<_>>();
        assert_eq!(visible, vec![QuoteItemId(1)]);
        let all = quote.all_items().map(|i| i.id).collect::<Vec<_>>();
        assert_eq!(all, vec![QuoteItemId(1), QuoteItemId(2)]);
    }

    #[test]
    fn deleting_a_parent_deletes_its_descendants() {
        let mut quote = quote_with(vec![
            QuoteItem::new(QuoteItemId(1), "bundle"),
            QuoteItem::new(QuoteItemId(2), "option").with_parent(QuoteItemId(1)),
            QuoteItem::new(QuoteItemId(3), "sub-option").with_parent(QuoteItemId(2)),
            QuoteItem::new(QuoteItemId(4), "shirt"),
        ]);
        assert_eq!(quote.delete_item(QuoteItemId(1)), 3);
        assert!(quote.items[..3].iter().all(|i| i.deleted));
        assert!(!quote.items[3].deleted);
        assert_eq!(quote.delete_item(QuoteItemId(1)), 0);
    }

    #[test]
    fn delete_item_survives_a_parent_cycle() {
        let mut quote = quote_with(vec![
            QuoteItem::new(QuoteItemId(1), "a").with_parent(QuoteItemId(2)),
            QuoteItem::new(QuoteItemId(2), "b").with_parent(QuoteItemId(1)),
        ]);
        assert_eq!(quote.delete_item(QuoteItemId(1)), 2);
    }

    #[test]
    fn nominal_deletion_is_idempotent() {
        let mut quote = quote_with(vec![
            QuoteItem::new(QuoteItemId(1), "gift").nominal(),
            QuoteItem::new(QuoteItemId(2), "gift-wrap").with_parent(QuoteItemId(1)),
            QuoteItem::new(QuoteItemId(3), "shirt"),
            QuoteItem::new(QuoteItemId(4), "hidden-nominal").nominal().with_visibility(false),
        ]);
        assert_eq!(quote.delete_nominal_items(), 2);
        assert_eq!(quote.delete_nominal_items(), 0);
        let remaining = quote.all_items().map(|i| i.id).collect::<Vec<_>>();
        assert_eq!(remaining, vec![QuoteItemId(3), QuoteItemId(4)]);
        assert!(quote.item(QuoteItemId(2)).is_some_and(|i| i.deleted && i.is_child()));
    }

    #[test]
    fn hidden_nominal_lines_and_their_children_are_not_orderable() {
        let quote = quote_with(vec![
            QuoteItem::new(QuoteItemId(1), "bundle").with_product_type("bundle"),
            QuoteItem::new(QuoteItemId(2), "free-option").with_parent(QuoteItemId(1)).nominal(),
            QuoteItem::new(QuoteItemId(3), "option-of-free-option").with_parent(QuoteItemId(2)),
            QuoteItem::new(QuoteItemId(4), "paid-option").with_parent(QuoteItemId(1)),
            QuoteItem::new(QuoteItemId(5), "hidden-gift").nominal().with_visibility(false),
        ]);
        let orderable = quote.orderable_items().map(|i| i.id).collect::<Vec<_>>();
        assert_eq!(orderable, vec![QuoteItemId(1), QuoteItemId(4)]);
        assert!(quote.item(QuoteItemId(4)).is_some_and(QuoteItem::is_child));
        assert!(!quote.item(QuoteItemId(1)).is_some_and(QuoteItem::is_child));
        assert_eq!(quote.item(QuoteItemId(1)).map(|i| i.product_type.as_str()), Some("bundle"));
    }

    #[test]
    fn orderable_items_survive_a_nominal_cycle() {
        let quote = quote_with(vec![
            QuoteItem::new(QuoteItemId(1), "a").with_parent(QuoteItemId(2)).nominal(),
            QuoteItem::new(QuoteItemId(2), "b").with_parent(QuoteItemId(1)),
            QuoteItem::new(QuoteItemId(3), "c"),
        ]);
        let orderable = quote.orderable_items().map(|i| i.id).collect::<Vec<_>>();
        assert_eq!(orderable, vec![QuoteItemId(3)]);
    }

    #[test]
    fn inactivation_is_one_way() {
        let mut quote = quote_with(vec![]);
        assert!(quote.is_active);
        quote.inactivate();
        quote.inactivate();
        assert!(!quote.is_active);
    }
}
