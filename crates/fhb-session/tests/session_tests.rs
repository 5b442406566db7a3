use fhb_core::{
    BidDraft, BidError, FreelancerTier, Money, PricingInput, Project, ProjectId, Task,
    TaskDisplayState, TaskId, TierLimits, Timeline,
};
use fhb_session::BiddingSession;
use fhb_submit::{RetryPolicy, SubmissionClient, SubmissionReceipt, SubmitError};

const TODAY: i64 = 1_000_000;

fn task(id: &str, budget_rupees: i64) -> Task {
    Task {
        id: TaskId::from_str(id),
        title: format!("Task {}", id),
        budget: Money::from_rupees(budget_rupees),
        estimated_hours: None,
        skills: vec![],
        milestones: vec![],
    }
}

fn project(task_ids: &[&str]) -> Project {
    Project {
        id: ProjectId::from_str("p1"),
        title: "AI model for data trends".to_string(),
        budget: Money::from_rupees(100_000),
        deadline_unix: TODAY + 30 * 86_400,
        tasks: task_ids.iter().map(|id| task(id, 100_000)).collect(),
    }
}

fn fixed_draft(id: &str, rupees: i64) -> BidDraft {
    BidDraft {
        task_id: TaskId::from_str(id),
        pricing: PricingInput::Fixed {
            amount: Money::from_rupees(rupees),
        },
        timeline: Timeline {
            proposed_start_unix: TODAY,
            proposed_end_unix: TODAY + 7 * 86_400,
        },
        notes: "approach attached".to_string(),
        attachments: vec![],
        portfolio_links: vec![],
    }
}

fn state_of(session: &BiddingSession, id: &str) -> TaskDisplayState {
    session
        .display_states()
        .into_iter()
        .find(|(tid, _)| tid.as_str() == id)
        .map(|(_, s)| s)
        .unwrap()
}

fn submit_task(session: &mut BiddingSession, id: &str, rupees: i64) {
    session.start_draft(&TaskId::from_str(id)).unwrap();
    session.submit(fixed_draft(id, rupees), TODAY).unwrap();
}

// Scenario 1: Starter tier, 4 tasks -> capacity 2; third/fourth task lock,
// then unlock on withdrawal.
#[test]
fn starter_locks_and_unlocks_remaining_tasks() {
    let limits = TierLimits::default();
    let mut session =
        BiddingSession::new(project(&["a", "b", "c", "d"]), FreelancerTier::Starter, &limits);
    assert_eq!(session.capacity(), 2);

    submit_task(&mut session, "a", 90_000);
    submit_task(&mut session, "b", 90_000);

    assert_eq!(state_of(&session, "c"), TaskDisplayState::Locked);
    assert_eq!(state_of(&session, "d"), TaskDisplayState::Locked);

    // a locked task cannot even enter drafting
    assert_eq!(
        session.start_draft(&TaskId::from_str("c")),
        Err(BidError::CapacityExceeded { capacity: 2 })
    );

    session.withdraw(&TaskId::from_str("a")).unwrap();
    assert_eq!(state_of(&session, "c"), TaskDisplayState::Available);
    assert_eq!(state_of(&session, "d"), TaskDisplayState::Available);
    assert_eq!(session.submitted_count(), 1);
}

// Scenario 2: fixed bid at exactly 1.5x the budget is accepted; one paisa
// over is rejected (covered at paisa precision in fhb-pricing).
#[test]
fn fixed_bid_boundary_through_session() {
    let limits = TierLimits::default();
    let mut session = BiddingSession::new(project(&["a"]), FreelancerTier::Pro, &limits);
    session.start_draft(&TaskId::from_str("a")).unwrap();

    let over = session.submit(fixed_draft("a", 150_001), TODAY);
    assert!(matches!(over, Err(BidError::OutOfBounds { .. })));
    // task stays in Drafting for in-place correction
    assert_eq!(state_of(&session, "a"), TaskDisplayState::Drafting);

    let ok = session.submit(fixed_draft("a", 150_000), TODAY).unwrap();
    assert_eq!(ok.total, Money::from_rupees(150_000));
}

// Scenario 3: hourly bids carry no cap relative to the task budget.
#[test]
fn hourly_bid_ignores_task_budget() {
    let limits = TierLimits::default();
    let mut session = BiddingSession::new(project(&["a"]), FreelancerTier::Pro, &limits);
    session.start_draft(&TaskId::from_str("a")).unwrap();

    let mut draft = fixed_draft("a", 0);
    draft.pricing = PricingInput::Hourly {
        hourly_rate: Money::from_rupees(500),
        estimated_hours: 10,
    };
    let bid = session.submit(draft, TODAY).unwrap();
    assert_eq!(bid.total, Money::from_rupees(5_000));
}

// Scenario 4: re-bidding replaces the stored bid; count unchanged.
#[test]
fn rebid_replaces_stored_bid() {
    let limits = TierLimits::default();
    let mut session = BiddingSession::new(project(&["a", "b"]), FreelancerTier::Starter, &limits);
    submit_task(&mut session, "a", 80_000);
    assert_eq!(session.submitted_count(), 1);

    // revise: back into drafting, submit a new amount
    session.start_draft(&TaskId::from_str("a")).unwrap();
    let revised = session.submit(fixed_draft("a", 95_000), TODAY).unwrap();
    assert_eq!(revised.total, Money::from_rupees(95_000));
    assert_eq!(session.submitted_count(), 1);

    let bids = session.bids();
    assert_eq!(bids.len(), 1);
    assert_eq!(bids[0].total, Money::from_rupees(95_000));
}

#[test]
fn cancelled_revision_keeps_prior_bid_withdrawable() {
    let limits = TierLimits::default();
    let mut session = BiddingSession::new(project(&["a", "b"]), FreelancerTier::Starter, &limits);
    submit_task(&mut session, "a", 80_000);

    let a = TaskId::from_str("a");
    session.start_draft(&a).unwrap();
    session.cancel_draft(&a).unwrap();

    // the original bid still stands and the phase follows it
    assert_eq!(state_of(&session, "a"), TaskDisplayState::Submitted);
    assert_eq!(session.submitted_count(), 1);
    let bids = session.bids();
    assert_eq!(bids[0].total, Money::from_rupees(80_000));

    // and it can still be withdrawn
    let bid = session.withdraw(&a).unwrap();
    assert_eq!(bid.total, Money::from_rupees(80_000));
    assert_eq!(session.submitted_count(), 0);
}

#[test]
fn capacity_invariant_holds_across_operations() {
    let limits = TierLimits::default();
    let mut session =
        BiddingSession::new(project(&["a", "b", "c", "d"]), FreelancerTier::Starter, &limits);

    submit_task(&mut session, "a", 50_000);
    assert!(session.submitted_count() <= session.capacity());
    submit_task(&mut session, "b", 50_000);
    assert!(session.submitted_count() <= session.capacity());
    session.withdraw(&TaskId::from_str("b")).unwrap();
    assert!(session.submitted_count() <= session.capacity());
    submit_task(&mut session, "c", 50_000);
    assert!(session.submitted_count() <= session.capacity());
    assert_eq!(session.submitted_count(), 2);
}

#[test]
fn cancel_draft_has_no_side_effects() {
    let limits = TierLimits::default();
    let mut session = BiddingSession::new(project(&["a", "b"]), FreelancerTier::Starter, &limits);
    let a = TaskId::from_str("a");
    session.start_draft(&a).unwrap();
    assert_eq!(state_of(&session, "a"), TaskDisplayState::Drafting);
    session.cancel_draft(&a).unwrap();
    assert_eq!(state_of(&session, "a"), TaskDisplayState::Available);
    assert_eq!(session.submitted_count(), 0);
}

#[test]
fn withdraw_without_bid_is_rejected() {
    let limits = TierLimits::default();
    let mut session = BiddingSession::new(project(&["a"]), FreelancerTier::Starter, &limits);
    assert!(matches!(
        session.withdraw(&TaskId::from_str("a")),
        Err(BidError::NotFound(_))
    ));
}

#[test]
fn restore_reconciles_phases_when_capacity_shrinks() {
    let limits = TierLimits::default();
    let mut session = BiddingSession::new(project(&["a", "b"]), FreelancerTier::Starter, &limits);
    submit_task(&mut session, "a", 50_000);
    submit_task(&mut session, "b", 50_000);

    // a tighter tier table arrives before the session is rebuilt
    let tight = TierLimits {
        starter: 1,
        pro: 4,
        elite: None,
    };
    let restored = BiddingSession::restore(
        project(&["a", "b"]),
        FreelancerTier::Starter,
        &tight,
        session.phases().clone(),
        session.bids(),
    );

    assert_eq!(restored.capacity(), 1);
    assert_eq!(restored.submitted_count(), 1);
    // the dropped bid's task no longer claims Submitted
    let dropped = restored
        .display_states()
        .into_iter()
        .filter(|(_, s)| *s == TaskDisplayState::Submitted)
        .count();
    assert_eq!(dropped, 1);
    assert_eq!(restored.phase(&TaskId::from_str("b")), fhb_core::BidPhase::Available);
    // no stranded bid: withdrawing the dropped task reports NotFound, not a
    // phase mismatch
    let mut restored = restored;
    assert!(matches!(
        restored.withdraw(&TaskId::from_str("b")),
        Err(BidError::NotFound(_))
    ));
    // and the surviving bid is still withdrawable
    restored.withdraw(&TaskId::from_str("a")).unwrap();
    assert_eq!(restored.submitted_count(), 0);
}

struct RecordingClient;

impl SubmissionClient for RecordingClient {
    fn send(&self, batch: &fhb_submit::BatchSubmission) -> Result<SubmissionReceipt, SubmitError> {
        Ok(SubmissionReceipt {
            batch_hash: batch.batch_hash.clone(),
            accepted_tasks: batch.bids.iter().map(|b| b.task_id.clone()).collect(),
        })
    }
}

#[test]
fn batch_compiles_in_task_order_and_sends() {
    let limits = TierLimits::default();
    let mut session =
        BiddingSession::new(project(&["a", "b", "c"]), FreelancerTier::Pro, &limits);
    // submit out of order
    submit_task(&mut session, "c", 10_000);
    submit_task(&mut session, "a", 10_000);

    let batch = session.compile_batch(TODAY);
    let ids: Vec<_> = batch
        .bids
        .iter()
        .map(|b| b.task_id.as_str().to_string())
        .collect();
    assert_eq!(ids, vec!["a", "c"]);

    let receipt = session
        .send_batch(&RecordingClient, &RetryPolicy::immediate(3), TODAY)
        .unwrap();
    assert_eq!(receipt.accepted_tasks.len(), 2);
    assert_eq!(receipt.batch_hash, batch.batch_hash);
}

#[test]
fn elite_tier_is_bounded_only_by_task_count() {
    let limits = TierLimits::default();
    let mut session =
        BiddingSession::new(project(&["a", "b", "c", "d"]), FreelancerTier::Elite, &limits);
    assert_eq!(session.capacity(), 4);
    for id in ["a", "b", "c", "d"] {
        submit_task(&mut session, id, 10_000);
    }
    assert_eq!(session.submitted_count(), 4);
}
