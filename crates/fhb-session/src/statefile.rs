use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use fhb_core::{BidPhase, FreelancerTier, PricedBid};

use crate::session::BiddingSession;

/// Serializable snapshot of one session so the CLI survives across
/// invocations. This is convenience persistence, not durable storage; the
/// registry itself stays in memory.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionState {
    pub tier: FreelancerTier,
    pub phases: HashMap<String, BidPhase>,
    pub bids: Vec<PricedBid>,
}

impl SessionState {
    pub fn of(session: &BiddingSession) -> Self {
        Self {
            tier: session.tier(),
            phases: session.phases().clone(),
            bids: session.bids(),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read session state {}", path.display()))?;
        let state: SessionState =
            serde_json::from_str(&s).with_context(|| "parse session state json")?;
        Ok(state)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let bytes = serde_json::to_vec_pretty(self)?;
        std::fs::write(path, bytes)
            .with_context(|| format!("write session state {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fhb_core::{Money, PricingInput, Project, ProjectId, Task, TaskId, TierLimits, Timeline};

    fn project() -> Project {
        Project {
            id: ProjectId::from_str("p1"),
            title: "P".to_string(),
            budget: Money::from_rupees(10_000),
            deadline_unix: 0,
            tasks: vec![Task {
                id: TaskId::from_str("a"),
                title: "A".to_string(),
                budget: Money::from_rupees(1_000),
                estimated_hours: None,
                skills: vec![],
                milestones: vec![],
            }],
        }
    }

    #[test]
    fn state_round_trips_through_json() {
        let limits = TierLimits::default();
        let mut session = BiddingSession::new(project(), FreelancerTier::Starter, &limits);
        let task_id = TaskId::from_str("a");
        session.start_draft(&task_id).unwrap();
        session
            .submit(
                fhb_core::BidDraft {
                    task_id: task_id.clone(),
                    pricing: PricingInput::Fixed {
                        amount: Money::from_rupees(900),
                    },
                    timeline: Timeline {
                        proposed_start_unix: 10,
                        proposed_end_unix: 20,
                    },
                    notes: "n".to_string(),
                    attachments: vec![],
                    portfolio_links: vec![],
                },
                10,
            )
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        SessionState::of(&session).save_to(&path).unwrap();
        let state = SessionState::load_from(&path).unwrap();

        let restored = BiddingSession::restore(
            project(),
            state.tier,
            &limits,
            state.phases,
            state.bids,
        );
        assert_eq!(restored.submitted_count(), 1);
        assert_eq!(restored.phase(&task_id), fhb_core::BidPhase::Submitted);
    }
}
