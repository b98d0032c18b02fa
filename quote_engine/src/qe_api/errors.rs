use thiserror::Error;

use crate::traits::{ConversionError, PlacementError, ValidationError};

/// The ways a submission can fail. Each variant carries the collaborator's error unchanged.
///
/// Note that a quote that ends up with nothing to order is not an error; see
/// [`SubmissionOutcome::NoOrder`](crate::SubmissionOutcome::NoOrder).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteSubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error(transparent)]
    Placement(#[from] PlacementError),
}

impl QuoteSubmissionError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_conversion(&self) -> bool {
        matches!(self, Self::Conversion(_))
    }

    pub fn is_placement(&self) -> bool {
        matches!(self, Self::Placement(_))
    }
}
