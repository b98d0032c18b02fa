use crate::order_types::Order;

/// The successful outcomes of a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// Every visible item on the quote was nominal, so there was nothing left to order. The quote has been inactivated.
    NoOrder,
    /// The order was placed. This is the order returned by the placement backend.
    Placed(Order),
}

impl SubmissionOutcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, Self::Placed(_))
    }

    pub fn order(&self) -> Option<&Order> {
        match self {
            Self::Placed(order) => Some(order),
            Self::NoOrder => None,
        }
    }

    pub fn into_order(self) -> Option<Order> {
        match self {
            Self::Placed(order) => Some(order),
            Self::NoOrder => None,
        }
    }
}
