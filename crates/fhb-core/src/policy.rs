use serde::{Deserialize, Serialize};

use crate::model::FreelancerTier;

/// Tier -> concurrent-bid limit table. Injectable so policy changes are a
/// config edit, not an engine change. `None` means unbounded (Elite).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TierLimits {
    pub starter: usize,
    pub pro: usize,
    #[serde(default)]
    pub elite: Option<usize>,
}

impl Default for TierLimits {
    fn default() -> Self {
        Self {
            starter: 2,
            pro: 4,
            elite: None,
        }
    }
}

impl TierLimits {
    pub fn limit_for(&self, tier: FreelancerTier) -> Option<usize> {
        match tier {
            FreelancerTier::Starter => Some(self.starter),
            FreelancerTier::Pro => Some(self.pro),
            FreelancerTier::Elite => self.elite,
        }
    }
}

/// Pure, total: `min(tier limit, total tasks)`. An unbounded tier is clamped
/// by the task count alone.
pub fn resolve_capacity(limits: &TierLimits, tier: FreelancerTier, total_tasks: usize) -> usize {
    match limits.limit_for(tier) {
        Some(limit) => limit.min(total_tasks),
        None => total_tasks,
    }
}
