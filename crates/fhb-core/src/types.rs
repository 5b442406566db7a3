use serde::{Deserialize, Serialize};

use crate::{ids::*, model::*, money::Money};

/// Read-only project data supplied by the project-data collaborator.
/// This engine never mutates it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub budget: Money,
    pub deadline_unix: i64,
    pub tasks: Vec<Task>,
}

impl Project {
    pub fn task(&self, task_id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == task_id)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub budget: Money,
    #[serde(default)]
    pub estimated_hours: Option<u32>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

/// Milestone amounts are carried as-is; nothing reconciles them against the
/// task budget.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Milestone {
    pub title: String,
    pub amount: Money,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Timeline {
    pub proposed_start_unix: i64,
    pub proposed_end_unix: i64,
}

/// Pricing input as entered by the freelancer, before validation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PricingInput {
    Fixed { amount: Money },
    Hourly { hourly_rate: Money, estimated_hours: u32 },
}

impl PricingInput {
    pub fn model(&self) -> PricingModel {
        match self {
            PricingInput::Fixed { .. } => PricingModel::Fixed,
            PricingInput::Hourly { .. } => PricingModel::Hourly,
        }
    }
}

/// An in-progress bid for one task. At most one per task at any time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BidDraft {
    pub task_id: TaskId,
    pub pricing: PricingInput,
    pub timeline: Timeline,
    pub notes: String,
    /// Opaque references handed back by the file-upload collaborator.
    #[serde(default)]
    pub attachments: Vec<String>,
    #[serde(default)]
    pub portfolio_links: Vec<String>,
}

/// A validated, priced bid as stored by the registry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PricedBid {
    pub id: BidId,
    pub task_id: TaskId,
    pub model: PricingModel,
    pub pricing: PricingInput,
    pub total: Money,
    pub timeline: Timeline,
    pub notes: String,
    pub attachments: Vec<String>,
    pub portfolio_links: Vec<String>,
}
