use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FreelancerTier {
    Starter,
    Pro,
    Elite,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PricingModel {
    Fixed,
    Hourly,
}

/// Stored per-task lifecycle phase. `Locked` is intentionally absent: it is
/// derived from capacity, never stored (see `lifecycle::display_state`).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BidPhase {
    Available,
    Drafting,
    Submitted,
    Withdrawn,
}

/// What a task shows to the caller once capacity is taken into account.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TaskDisplayState {
    Available,
    Locked,
    Drafting,
    Submitted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BidEvent {
    StartDraft,
    CancelDraft,
    Submit,
    Withdraw,
}
