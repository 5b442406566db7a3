use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use fhb_core::{Money, PricedBid, PricingModel, Project, ProjectId, TaskId, Timeline};

/// One bid as it travels to the backend. A flattened copy of `PricedBid`
/// so the wire shape is decoupled from registry internals.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchBid {
    pub task_id: TaskId,
    pub model: PricingModel,
    pub total: Money,
    pub timeline: Timeline,
    pub notes: String,
    pub attachments: Vec<String>,
    pub portfolio_links: Vec<String>,
}

/// Immutable payload handed to the bid-submission collaborator in one call.
/// `batch_hash` doubles as an idempotency key when the send is retried.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchSubmission {
    pub project_id: ProjectId,
    pub compiled_at_unix: i64,
    pub batch_hash: String,
    pub bids: Vec<BatchBid>,
}

/// Compile all submitted bids into one batch, ordered by the project's task
/// order (bids for unknown tasks are dropped; the registry should never hold
/// any).
pub fn compile(project: &Project, bids: &[PricedBid], now_unix: i64) -> BatchSubmission {
    let mut ordered: Vec<BatchBid> = Vec::new();
    for task in &project.tasks {
        if let Some(bid) = bids.iter().find(|b| b.task_id == task.id) {
            ordered.push(BatchBid {
                task_id: bid.task_id.clone(),
                model: bid.model,
                total: bid.total,
                timeline: bid.timeline,
                notes: bid.notes.clone(),
                attachments: bid.attachments.clone(),
                portfolio_links: bid.portfolio_links.clone(),
            });
        }
    }

    let batch_hash = hash_bids(&project.id, &ordered);
    BatchSubmission {
        project_id: project.id.clone(),
        compiled_at_unix: now_unix,
        batch_hash,
        bids: ordered,
    }
}

fn hash_bids(project_id: &ProjectId, bids: &[BatchBid]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(project_id.as_str().as_bytes());
    // serde_json is stable for our own struct field order
    let bytes = serde_json::to_vec(bids).unwrap_or_default();
    hasher.update(&bytes);
    hex::encode(hasher.finalize())
}
