use std::collections::HashMap;

use fhb_core::{
    display_state, resolve_capacity, step, BidDraft, BidError, BidEvent, BidPhase, FreelancerTier,
    PricedBid, Project, TaskDisplayState, TaskId, TierLimits, TransitionCtx,
};
use fhb_registry::{BidStore, InMemoryRegistry};
use fhb_submit::{BatchSubmission, RetryPolicy, SubmissionClient, SubmissionReceipt, SubmitError};

/// One freelancer bidding on one project: the imperative shell over the pure
/// policy, reducer and pricing functions. Single-threaded from the caller's
/// perspective; the registry behind it is mutex-guarded.
pub struct BiddingSession {
    project: Project,
    tier: FreelancerTier,
    capacity: usize,
    registry: InMemoryRegistry,
    phases: HashMap<String, BidPhase>,
}

impl BiddingSession {
    pub fn new(project: Project, tier: FreelancerTier, limits: &TierLimits) -> Self {
        let capacity = resolve_capacity(limits, tier, project.tasks.len());
        tracing::debug!(
            project = project.id.as_str(),
            ?tier,
            capacity,
            "session opened"
        );
        Self {
            project,
            tier,
            capacity,
            registry: InMemoryRegistry::new(capacity),
            phases: HashMap::new(),
        }
    }

    /// Rebuild a session from previously stored bids (see `statefile`). The
    /// registry drops bids beyond capacity (a config may have lowered a tier
    /// limit since the state was saved), so phases are reconciled against the
    /// bids that actually survived: a Submitted phase with no backing bid
    /// resets to Available.
    pub fn restore(
        project: Project,
        tier: FreelancerTier,
        limits: &TierLimits,
        mut phases: HashMap<String, BidPhase>,
        bids: Vec<PricedBid>,
    ) -> Self {
        let capacity = resolve_capacity(limits, tier, project.tasks.len());
        let registry = InMemoryRegistry::restore(capacity, bids);
        for (task_id, phase) in phases.iter_mut() {
            if *phase == BidPhase::Submitted && !registry.has_bid(&TaskId::from_str(task_id.clone()))
            {
                tracing::warn!(task = task_id.as_str(), "dropping stale submitted phase");
                *phase = BidPhase::Available;
            }
        }
        Self {
            project,
            tier,
            capacity,
            registry,
            phases,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn tier(&self) -> FreelancerTier {
        self.tier
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn submitted_count(&self) -> usize {
        self.registry.count()
    }

    pub fn phase(&self, task_id: &TaskId) -> BidPhase {
        self.phases
            .get(task_id.as_str())
            .copied()
            .unwrap_or(BidPhase::Available)
    }

    fn ctx_for(&self, task_id: &TaskId) -> TransitionCtx {
        let has_own_bid = self.registry.has_bid(task_id);
        let submitted_others = self.registry.count() - usize::from(has_own_bid);
        TransitionCtx {
            capacity: self.capacity,
            submitted_others,
            has_own_bid,
        }
    }

    fn require_task(&self, task_id: &TaskId) -> Result<(), BidError> {
        if self.project.task(task_id).is_none() {
            return Err(BidError::Validation(format!(
                "unknown task: {}",
                task_id.as_str()
            )));
        }
        Ok(())
    }

    fn apply(&mut self, task_id: &TaskId, event: BidEvent) -> Result<BidPhase, BidError> {
        self.require_task(task_id)?;
        let next = step(self.phase(task_id), event, &self.ctx_for(task_id))?;
        self.phases.insert(task_id.as_str().to_string(), next);
        Ok(next)
    }

    /// `Available -> Drafting`. Refused while the task is Locked. No slot is
    /// consumed here.
    pub fn start_draft(&mut self, task_id: &TaskId) -> Result<(), BidError> {
        self.apply(task_id, BidEvent::StartDraft)?;
        Ok(())
    }

    /// `Drafting -> Available`, no side effects. Cancelling a revision of an
    /// already-submitted bid returns to `Submitted`: the stored bid stands.
    pub fn cancel_draft(&mut self, task_id: &TaskId) -> Result<(), BidError> {
        self.apply(task_id, BidEvent::CancelDraft)?;
        Ok(())
    }

    /// `Drafting -> Submitted`: prices the draft and admits it to the
    /// registry. On any error the task stays in Drafting so the caller can
    /// correct the draft in place.
    pub fn submit(&mut self, draft: BidDraft, today_unix: i64) -> Result<PricedBid, BidError> {
        let task_id = draft.task_id.clone();
        let task = self
            .project
            .task(&task_id)
            .cloned()
            .ok_or_else(|| BidError::Validation(format!("unknown task: {}", task_id.as_str())))?;
        step(
            self.phase(&task_id),
            BidEvent::Submit,
            &self.ctx_for(&task_id),
        )?;
        let bid = self.registry.submit(&task, draft, today_unix)?;
        self.phases
            .insert(task_id.as_str().to_string(), BidPhase::Submitted);
        tracing::info!(
            task = task_id.as_str(),
            total = %bid.total,
            used = self.registry.count(),
            capacity = self.capacity,
            "bid submitted"
        );
        Ok(bid)
    }

    /// `Submitted -> Withdrawn`: removes the bid and frees one slot. Every
    /// Locked task becomes Available the moment display states are read
    /// again, since Locked is derived, not stored.
    pub fn withdraw(&mut self, task_id: &TaskId) -> Result<PricedBid, BidError> {
        self.require_task(task_id)?;
        if !self.registry.has_bid(task_id) {
            return Err(BidError::not_found(task_id));
        }
        self.apply(task_id, BidEvent::Withdraw)?;
        let bid = self.registry.withdraw(task_id)?;
        tracing::info!(task = task_id.as_str(), "bid withdrawn");
        Ok(bid)
    }

    /// Per-task display states in project task order, with Locked
    /// recomputed from the current registry count.
    pub fn display_states(&self) -> Vec<(TaskId, TaskDisplayState)> {
        self.project
            .tasks
            .iter()
            .map(|t| {
                let state = display_state(self.phase(&t.id), &self.ctx_for(&t.id));
                (t.id.clone(), state)
            })
            .collect()
    }

    pub fn bids(&self) -> Vec<PricedBid> {
        self.registry.snapshot()
    }

    pub fn phases(&self) -> &HashMap<String, BidPhase> {
        &self.phases
    }

    /// Aggregate all submitted bids into one immutable batch payload.
    pub fn compile_batch(&self, now_unix: i64) -> BatchSubmission {
        fhb_submit::compile(&self.project, &self.registry.snapshot(), now_unix)
    }

    /// Compile and hand off to the submission collaborator with retries.
    pub fn send_batch(
        &self,
        client: &dyn SubmissionClient,
        policy: &RetryPolicy,
        now_unix: i64,
    ) -> Result<SubmissionReceipt, SubmitError> {
        let batch = self.compile_batch(now_unix);
        fhb_submit::send_with_retry(client, &batch, policy)
    }
}
