//! Time-ordered queue of effects that fire after a delay.
//!
//! Entries carry the run epoch they were scheduled in. Entries from an older
//! epoch (before a restart) are dropped when they surface.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Work to perform once an entry comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Turn the flashlight back on, unless its switch changed since.
    RestoreFlashlight { generation: u32 },
    /// Finish the elevator ride and load the next floor.
    CompleteElevatorRide,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    fire_at: f64,
    seq: u64,
    epoch: u32,
    action: DeferredAction,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // Reversed so the max-heap pops the earliest (fire_at, seq) first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .fire_at
            .total_cmp(&self.fire_at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeferredQueue {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, fire_at: f64, epoch: u32, action: DeferredAction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            fire_at,
            seq,
            epoch,
            action,
        });
    }

    /// Pop every entry due at `now`, in firing order. Entries from other
    /// epochs are discarded.
    pub fn drain_due(&mut self, now: f64, epoch: u32) -> Vec<DeferredAction> {
        let mut due = Vec::new();
        while let Some(top) = self.heap.peek() {
            if top.fire_at > now {
                break;
            }
            let Some(entry) = self.heap.pop() else {
                break;
            };
            if entry.epoch == epoch {
                due.push(entry.action);
            } else {
                log::debug!("dropping stale deferred {:?} from epoch {}", entry.action, entry.epoch);
            }
        }
        due
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
