use serde::{Deserialize, Serialize};
use thiserror::Error;

use fhb_core::TaskId;

use crate::batch::BatchSubmission;

/// Transport-level failures of the outbound submission call. The engine's
/// own `BidError` taxonomy never appears here: by the time a batch exists,
/// every bid in it has already been validated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("submission timed out after {0} seconds")]
    Timeout(u64),

    #[error("submission rejected by server: {0}")]
    Rejected(String),

    #[error("submission partially accepted ({accepted} of {total} bids)")]
    Partial { accepted: usize, total: usize },
}

impl SubmitError {
    /// Only timeouts are worth retrying: a rejection is deterministic and a
    /// partial acceptance needs reconciliation, not a blind resend.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SubmitError::Timeout(_))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub batch_hash: String,
    pub accepted_tasks: Vec<TaskId>,
}

/// Single outbound seam to the bid-submission collaborator.
pub trait SubmissionClient: Send + Sync {
    fn send(&self, batch: &BatchSubmission) -> Result<SubmissionReceipt, SubmitError>;
}
