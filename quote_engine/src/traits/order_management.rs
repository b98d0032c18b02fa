use thiserror::Error;

use crate::order_types::Order;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("The order was rejected. {0}")]
    Rejected(String),
    #[error("Order backend error: {0}")]
    BackendError(String),
}

/// Persists and places finalized orders.
pub trait OrderManagement {
    /// Places `order` and returns the placed order. The returned value carries the order number assigned by the
    /// backend (see [`Order::with_placement`]) along with any other placement-time fields.
    ///
    /// If this returns an error, the order did not happen.
    fn place(&self, order: Order) -> Result<Order, PlacementError>;
}
