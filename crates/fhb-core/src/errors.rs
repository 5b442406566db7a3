use thiserror::Error;

use crate::{ids::TaskId, money::Money};

/// Everything here is recoverable: an error blocks one transition and is
/// surfaced to the caller for in-place correction. Nothing is fatal to the
/// engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BidError {
    #[error("missing or malformed field: {0}")]
    Validation(String),

    #[error("fixed amount {amount} outside allowed range (0, {max}]")]
    OutOfBounds { amount: Money, max: Money },

    #[error("invalid timeline: {0}")]
    InvalidTimeline(String),

    #[error("capacity of {capacity} submitted bids exhausted")]
    CapacityExceeded { capacity: usize },

    #[error("no bid found for task {0}")]
    NotFound(String),
}

impl BidError {
    pub fn not_found(task_id: &TaskId) -> Self {
        BidError::NotFound(task_id.as_str().to_string())
    }
}
