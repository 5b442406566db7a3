use crate::{
    errors::BidError,
    model::{BidEvent, BidPhase, TaskDisplayState},
};

/// Capacity context for one task's transition, as seen at the moment the
/// event is applied. The shell builds this from the registry.
#[derive(Clone, Copy, Debug)]
pub struct TransitionCtx {
    pub capacity: usize,
    /// Submitted bids on tasks OTHER than this one. The task's own bid never
    /// counts against itself when re-bidding.
    pub submitted_others: usize,
    pub has_own_bid: bool,
}

impl TransitionCtx {
    /// Locked is derived, never stored: no bid of our own and every slot is
    /// taken by other tasks.
    pub fn is_locked(&self) -> bool {
        !self.has_own_bid && self.submitted_others >= self.capacity
    }
}

/// Pure reducer over the bid lifecycle. Drafting does NOT consume a capacity
/// slot; only the Submit transition checks the count.
pub fn step(phase: BidPhase, event: BidEvent, ctx: &TransitionCtx) -> Result<BidPhase, BidError> {
    match (phase, event) {
        (BidPhase::Available, BidEvent::StartDraft)
        | (BidPhase::Withdrawn, BidEvent::StartDraft) => {
            if ctx.is_locked() {
                return Err(BidError::CapacityExceeded {
                    capacity: ctx.capacity,
                });
            }
            Ok(BidPhase::Drafting)
        }
        // Re-entering a draft over an existing submitted bid (revision).
        (BidPhase::Submitted, BidEvent::StartDraft) => Ok(BidPhase::Drafting),
        // Cancelling a revision discards only the revision; the bid already
        // in the registry stands, so the phase must follow it back.
        (BidPhase::Drafting, BidEvent::CancelDraft) => {
            if ctx.has_own_bid {
                Ok(BidPhase::Submitted)
            } else {
                Ok(BidPhase::Available)
            }
        }
        (BidPhase::Drafting, BidEvent::Submit) => {
            if ctx.submitted_others >= ctx.capacity {
                return Err(BidError::CapacityExceeded {
                    capacity: ctx.capacity,
                });
            }
            Ok(BidPhase::Submitted)
        }
        (BidPhase::Submitted, BidEvent::Withdraw) => Ok(BidPhase::Withdrawn),
        (phase, event) => Err(BidError::Validation(format!(
            "cannot apply {:?} in phase {:?}",
            event, phase
        ))),
    }
}

/// Display state for one task. Withdrawn renders as Available again; Locked
/// overrides Available whenever capacity is exhausted elsewhere.
pub fn display_state(phase: BidPhase, ctx: &TransitionCtx) -> TaskDisplayState {
    match phase {
        BidPhase::Drafting => TaskDisplayState::Drafting,
        BidPhase::Submitted => TaskDisplayState::Submitted,
        BidPhase::Available | BidPhase::Withdrawn => {
            if ctx.is_locked() {
                TaskDisplayState::Locked
            } else {
                TaskDisplayState::Available
            }
        }
    }
}
