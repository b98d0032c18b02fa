use cucumber::given;
use quote_engine::{
    quote_types::{Customer, CustomerId, QuoteItem, QuoteItemId},
    test_utils::QuoteBuilder,
    PlacementError,
    ValidationError,
};

use crate::cucumber::QuoteWorld;

#[given(expr = "a guest quote with id {int}")]
async fn guest_quote(world: &mut QuoteWorld, id: i64) {
    world.builder = Some(QuoteBuilder::new(id));
}

#[given(expr = "a quote with id {int} for registered customer {int}")]
async fn registered_quote(world: &mut QuoteWorld, id: i64, customer_id: i64) {
    world.builder = Some(QuoteBuilder::new(id).registered());
    world.backend = world.backend.clone().with_customer(Customer {
        id: CustomerId(customer_id),
        email: format!("customer{customer_id}@example.com"),
        firstname: "Registered".into(),
        lastname: "Customer".into(),
    });
}

#[given("the quote is virtual")]
async fn virtual_quote(world: &mut QuoteWorld) {
    world.edit_quote(QuoteBuilder::virtual_quote);
}

#[given(expr = "the quote has an item {int}")]
async fn add_item(world: &mut QuoteWorld, id: i64) {
    world.edit_quote(|q| q.item(id));
}

#[given(expr = "the quote has an item {int} with parent {int}")]
async fn add_child(world: &mut QuoteWorld, id: i64, parent: i64) {
    world.edit_quote(|q| q.child(id, parent));
}

#[given(expr = "the quote has a nominal item {int}")]
async fn add_nominal(world: &mut QuoteWorld, id: i64) {
    world.edit_quote(|q| q.nominal(id));
}

#[given(expr = "the quote has a hidden nominal item {int} with parent {int}")]
async fn add_hidden_nominal_child(world: &mut QuoteWorld, id: i64, parent: i64) {
    let item = QuoteItem::new(QuoteItemId(id), format!("free-{id}")).with_parent(QuoteItemId(parent)).nominal();
    world.edit_quote(|q| q.with_item(item));
}

#[given(expr = "order placement fails with {string}")]
async fn placement_fails(world: &mut QuoteWorld, reason: String) {
    world.backend = world.backend.clone().failing_placement(PlacementError::Rejected(reason));
}

#[given(expr = "quote validation fails with {string}")]
async fn validation_fails(world: &mut QuoteWorld, reason: String) {
    world.backend = world.backend.clone().failing_validation(ValidationError::RuleViolation(reason));
}
