use cucumber::{then, when};
use quote_engine::{
    order_types::OverrideFields,
    quote_types::QuoteItemId,
    ConversionError,
    QuoteSubmissionError,
    SubmissionOutcome,
};

use crate::cucumber::QuoteWorld;

#[when("I submit the quote")]
async fn submit_quote(world: &mut QuoteWorld) {
    let mut quote = world.take_quote();
    let result = world.api().submit(&mut quote, &OverrideFields::new());
    world.quote = Some(quote);
    world.result = Some(result);
}

#[when("I submit the order for the quote")]
async fn submit_order(world: &mut QuoteWorld) {
    let mut quote = world.take_quote();
    let result = world.api().submit_order(&mut quote, &OverrideFields::new()).map(SubmissionOutcome::Placed);
    world.quote = Some(quote);
    world.result = Some(result);
}

#[then("no order is produced")]
async fn no_order(world: &mut QuoteWorld) {
    assert!(matches!(world.result, Some(Ok(SubmissionOutcome::NoOrder))), "got {:?}", world.result);
}

#[then(expr = "an order is placed with number {string}")]
async fn order_placed(world: &mut QuoteWorld, number: String) {
    assert_eq!(world.order().id().map(|id| id.as_str()), Some(number.as_str()));
}

#[then(expr = "the order has {int} item(s)")]
async fn item_count(world: &mut QuoteWorld, count: usize) {
    assert_eq!(world.order().items().len(), count);
}

#[then(expr = "the order items come from quote items {string}")]
async fn item_sequence(world: &mut QuoteWorld, ids: String) {
    let expected = ids.split(',').map(|s| s.trim().parse::<i64>().expect("Not a number")).collect::<Vec<_>>();
    let actual = world.order().items().iter().map(|i| i.quote_item_id.value()).collect::<Vec<_>>();
    assert_eq!(actual, expected);
}

#[then(expr = "the order item for quote item {int} has no parent")]
async fn item_is_root(world: &mut QuoteWorld, id: i64) {
    let item = world.order().item_for_quote_item(QuoteItemId(id)).expect("No such order item");
    assert!(item.parent_item_id.is_none());
}

#[then(expr = "the order item for quote item {int} is a child of the order item for quote item {int}")]
async fn item_is_child(world: &mut QuoteWorld, child: i64, parent: i64) {
    let order = world.order();
    let child = order.item_for_quote_item(QuoteItemId(child)).expect("No such child item");
    let parent = order.item_for_quote_item(QuoteItemId(parent)).expect("No such parent item");
    assert_eq!(child.parent_item_id, Some(parent.id));
}

#[then(expr = "the order addresses are {string}")]
async fn address_types(world: &mut QuoteWorld, types: String) {
    let actual = world.order().addresses().iter().map(|a| a.address_type.as_str()).collect::<Vec<_>>().join(", ");
    assert_eq!(actual, types);
}

#[then(expr = "the order belongs to customer {int}")]
async fn order_customer(world: &mut QuoteWorld, customer_id: i64) {
    assert_eq!(world.order().customer_id().map(|c| c.value()), Some(customer_id));
}

#[then("the order has no customer")]
async fn order_without_customer(world: &mut QuoteWorld) {
    assert!(world.order().customer_id().is_none());
}

#[then(expr = "the order is linked to quote {int}")]
async fn order_quote(world: &mut QuoteWorld, quote_id: i64) {
    assert_eq!(world.order().quote_id().value(), quote_id);
}

#[then("the quote is inactive")]
async fn quote_inactive(world: &mut QuoteWorld) {
    assert!(!world.quote().is_active);
}

#[then("the quote is still active")]
async fn quote_active(world: &mut QuoteWorld) {
    assert!(world.quote().is_active);
}

#[then(expr = "the event {string} was published {int} time(s)")]
async fn event_count(world: &mut QuoteWorld, name: String, count: usize) {
    assert_eq!(world.events.count(&name), count, "events: {:?}", world.events.names());
}

#[then(expr = "the submission fails with a {word} error")]
async fn failure_kind(world: &mut QuoteWorld, kind: String) {
    let err = world.error();
    let matches = match kind.as_str() {
        "validation" => err.is_validation(),
        "conversion" => err.is_conversion(),
        "placement" => err.is_placement(),
        other => panic!("Unknown error kind {other}"),
    };
    assert!(matches, "got {err:?}");
}

#[then("the submission fails because the item hierarchy has a cycle")]
async fn cycle_error(world: &mut QuoteWorld) {
    assert!(matches!(world.error(), QuoteSubmissionError::Conversion(ConversionError::CyclicItemHierarchy(_))));
}
