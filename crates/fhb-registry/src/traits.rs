use fhb_core::{BidDraft, BidError, PricedBid, Task, TaskId};

/// The single source of truth for how many capacity slots are used.
/// One store instance per freelancer-project session.
pub trait BidStore: Send + Sync {
    /// Validate, price and admit a draft. An existing bid for the same task
    /// is replaced in place and never charged a second slot; a bid for a new
    /// task is admitted only while `count() < capacity`.
    fn submit(&self, task: &Task, draft: BidDraft, today_unix: i64) -> Result<PricedBid, BidError>;

    /// Remove the stored bid for a task, freeing its slot.
    fn withdraw(&self, task_id: &TaskId) -> Result<PricedBid, BidError>;

    fn has_bid(&self, task_id: &TaskId) -> bool;

    /// Number of submitted bids currently held.
    fn count(&self) -> usize;

    /// Read-only copy of all stored bids, in submission order.
    fn snapshot(&self) -> Vec<PricedBid>;
}
