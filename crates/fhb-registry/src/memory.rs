use std::collections::HashMap;
use std::sync::Mutex;

use fhb_core::{BidDraft, BidError, PricedBid, Task, TaskId};

use crate::traits::BidStore;

/// In-memory registry for one freelancer-project session. `submit` and
/// `withdraw` are read-modify-write against the shared slot count, so the
/// whole state sits behind one mutex.
pub struct InMemoryRegistry {
    capacity: usize,
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    bids: HashMap<String, PricedBid>,
    /// Task ids in first-submission order; re-bids keep their position.
    order: Vec<TaskId>,
}

impl InMemoryRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Rebuild a registry from already-priced bids (session restore). Bids
    /// beyond capacity are dropped rather than trusted.
    pub fn restore(capacity: usize, bids: Vec<PricedBid>) -> Self {
        let mut inner = Inner::default();
        for bid in bids.into_iter().take(capacity) {
            inner.order.push(bid.task_id.clone());
            inner.bids.insert(bid.task_id.as_str().to_string(), bid);
        }
        Self {
            capacity,
            inner: Mutex::new(inner),
        }
    }
}

impl BidStore for InMemoryRegistry {
    fn submit(&self, task: &Task, draft: BidDraft, today_unix: i64) -> Result<PricedBid, BidError> {
        let mut inner = self.inner.lock().unwrap();

        let replacing = inner.bids.contains_key(task.id.as_str());
        if !replacing && inner.bids.len() >= self.capacity {
            return Err(BidError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let bid = fhb_pricing::price(task, &draft, today_unix)?;
        if !replacing {
            inner.order.push(task.id.clone());
        }
        inner.bids.insert(task.id.as_str().to_string(), bid.clone());
        Ok(bid)
    }

    fn withdraw(&self, task_id: &TaskId) -> Result<PricedBid, BidError> {
        let mut inner = self.inner.lock().unwrap();
        let bid = inner
            .bids
            .remove(task_id.as_str())
            .ok_or_else(|| BidError::not_found(task_id))?;
        inner.order.retain(|id| id != task_id);
        Ok(bid)
    }

    fn has_bid(&self, task_id: &TaskId) -> bool {
        self.inner.lock().unwrap().bids.contains_key(task_id.as_str())
    }

    fn count(&self) -> usize {
        self.inner.lock().unwrap().bids.len()
    }

    fn snapshot(&self) -> Vec<PricedBid> {
        let inner = self.inner.lock().unwrap();
        inner
            .order
            .iter()
            .filter_map(|id| inner.bids.get(id.as_str()).cloned())
            .collect()
    }
}
