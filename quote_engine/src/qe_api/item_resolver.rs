//! Parent-first materialization of order items.
//!
//! Quote lines form a forest: bundles and configurable products have child lines that point at their parent by id.
//! Order lines must form the same forest in the order id space, which means a parent has to be converted (and its
//! order-side id known) before any of its children. The resolver computes a stable topological order of the quote
//! lines, converts them in that order and links every child to its parent's order item.
//!
//! Among lines that are ready at the same time, the one that comes first in the quote wins. A quote whose lines are
//! already listed parent-first therefore keeps its order exactly.
use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap},
};

use log::*;
use serde_json::Value;

use crate::{
    order_types::{OrderItem, OrderItemId, OverrideFields},
    quote_types::{QuoteItem, QuoteItemId},
    traits::{ConversionError, QuoteConverter},
};

pub struct ItemHierarchyResolver<'c, C> {
    converter: &'c C,
}

impl<'c, C> ItemHierarchyResolver<'c, C>
where C: QuoteConverter
{
    pub fn new(converter: &'c C) -> Self {
        Self { converter }
    }

    /// Converts `quote_items` into order items, parents ahead of children.
    ///
    /// The whole batch fails if any line refers to a parent that is not in `quote_items`, if two lines share an id, or
    /// if the parent references form a cycle. No partially linked result is ever returned.
    pub fn resolve_items(&self, quote_items: &[&QuoteItem]) -> Result<Vec<OrderItem>, ConversionError> {
        let sequence = materialization_order(quote_items)?;
        let mut order_items = Vec::with_capacity(quote_items.len());
        let mut converted = HashMap::<QuoteItemId, OrderItemId>::with_capacity(quote_items.len());
        for index in sequence {
            let item = quote_items[index];
            let parent_item_id = match item.parent_item_id {
                Some(parent) => Some(
                    *converted.get(&parent).ok_or(ConversionError::MissingParentItem { item: item.id, parent })?,
                ),
                None => None,
            };
            let mut overrides = OverrideFields::new();
            if let Some(parent) = parent_item_id {
                overrides.insert("parent_item_id".to_string(), Value::from(parent.value()));
            }
            let mut order_item = self.converter.item_to_order_item(item, &overrides)?;
            order_item.parent_item_id = parent_item_id;
            trace!("📦️ Quote item {} converted to order item {}", item.id, order_item.id);
            converted.insert(item.id, order_item.id);
            order_items.push(order_item);
        }
        Ok(order_items)
    }
}

/// Returns the indices of `items` in a parent-first order, breaking ties by position in `items`.
fn materialization_order(items: &[&QuoteItem]) -> Result<Vec<usize>, ConversionError> {
    let mut index_of = HashMap::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        if index_of.insert(item.id, index).is_some() {
            warn!("📦️ Quote item {} is listed more than once", item.id);
            return Err(ConversionError::DuplicateItemId(item.id));
        }
    }
    let mut children = vec![Vec::new(); items.len()];
    let mut ready = BinaryHeap::new();
    for (index, item) in items.iter().enumerate() {
        match item.parent_item_id {
            None => ready.push(Reverse(index)),
            Some(parent) => match index_of.get(&parent) {
                Some(&parent_index) => children[parent_index].push(index),
                None => {
                    warn!("📦️ Quote item {} refers to parent {parent}, which is not in the quote", item.id);
                    return Err(ConversionError::MissingParentItem { item: item.id, parent });
                },
            },
        }
    }
    let mut sequence = Vec::with_capacity(items.len());
    while let Some(Reverse(index)) = ready.pop() {
        sequence.push(index);
        ready.extend(children[index].iter().map(|&child| Reverse(child)));
    }
    if sequence.len() < items.len() {
        let mut placed = vec![false; items.len()];
        sequence.iter().for_each(|&i| placed[i] = true);
        let stuck =
            items.iter().zip(placed).filter_map(|(item, placed)| (!placed).then_some(item.id)).collect::<Vec<_>>();
        warn!("📦️ Quote items {stuck:?} can never be materialized because their parent references form a cycle");
        return Err(ConversionError::CyclicItemHierarchy(stuck));
    }
    Ok(sequence)
}
