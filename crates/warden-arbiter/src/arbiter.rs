use std::collections::{BTreeMap, VecDeque};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use warden_core::{RequesterId, ResourceType};

use crate::{AuthorityManager, Priority};

/// "Produce `count` of `resource`", on behalf of `requester`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProductionRequest {
    pub resource: ResourceType,
    pub count: u32,
    pub requester: RequesterId,
    pub priority: Priority,
}

impl ProductionRequest {
    fn same_slot(&self, resource: &ResourceType, requester: &RequesterId) -> bool {
        self.resource == *resource && self.requester == *requester
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enqueued {
    Appended,
    /// An entry for the same (resource, requester) already sat in the bucket;
    /// its count was overwritten in place.
    Merged { previous: u32 },
}

/// Multi-level priority queue of pending production requests.
///
/// Lowest numeric bucket drains first, FIFO inside a bucket. Within one bucket
/// there is at most one entry per (resource, requester).
#[derive(Debug, Clone, Default)]
pub struct RequestArbiter {
    buckets: BTreeMap<Priority, VecDeque<ProductionRequest>>,
}

impl RequestArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a request, resolving a missing priority through `authority`.
    pub fn enqueue(
        &mut self,
        authority: &AuthorityManager,
        resource: ResourceType,
        count: u32,
        requester: RequesterId,
        priority: Option<Priority>,
    ) -> Enqueued {
        let priority = priority.unwrap_or_else(|| authority.get_authority_priority(&requester));
        self.enqueue_with_priority(resource, count, requester, priority)
    }

    pub fn enqueue_with_priority(
        &mut self,
        resource: ResourceType,
        count: u32,
        requester: RequesterId,
        priority: Priority,
    ) -> Enqueued {
        let bucket = self.buckets.entry(priority).or_default();
        if let Some(existing) = bucket
            .iter_mut()
            .find(|r| r.same_slot(&resource, &requester))
        {
            let previous = existing.count;
            existing.count = count;
            tracing::debug!(
                resource = %resource,
                requester = %requester,
                priority,
                previous,
                count,
                "merged duplicate request"
            );
            return Enqueued::Merged { previous };
        }

        bucket.push_back(ProductionRequest {
            resource,
            count,
            requester,
            priority,
        });
        Enqueued::Appended
    }

    pub fn peek_next(&self) -> Option<&ProductionRequest> {
        self.buckets.values().find_map(|b| b.front())
    }

    pub fn dequeue_next(&mut self) -> Option<ProductionRequest> {
        let (&priority, bucket) = self.buckets.iter_mut().find(|(_, b)| !b.is_empty())?;
        let next = bucket.pop_front();
        if bucket.is_empty() {
            self.buckets.remove(&priority);
        }
        next
    }

    /// Drains everything in priority order.
    pub fn drain(&mut self) -> impl Iterator<Item = ProductionRequest> + '_ {
        std::iter::from_fn(move || self.dequeue_next())
    }

    /// Drops `requester`'s entries from every bucket, or everything when
    /// `requester` is `None`. Returns how many entries were removed.
    pub fn clear(&mut self, requester: Option<&RequesterId>) -> usize {
        let before = self.len();
        match requester {
            Some(requester) => {
                for bucket in self.buckets.values_mut() {
                    bucket.retain(|r| r.requester != *requester);
                }
                self.buckets.retain(|_, b| !b.is_empty());
            }
            None => self.buckets.clear(),
        }
        before - self.len()
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Non-empty buckets and their sizes.
    pub fn depths(&self) -> BTreeMap<Priority, usize> {
        self.buckets
            .iter()
            .filter(|(_, b)| !b.is_empty())
            .map(|(p, b)| (*p, b.len()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductionRequest> {
        self.buckets.values().flatten()
    }
}
