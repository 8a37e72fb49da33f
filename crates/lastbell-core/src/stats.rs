//! Run statistics read by the achievement evaluator.

use serde::{Deserialize, Serialize};

/// Counters and flags accumulated over a run.
///
/// Components that observe a noteworthy event record it here; achievements
/// are evaluated against this struct only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub floor: u32,
    /// Elevator progress on the current floor.
    pub puzzles_solved: u32,
    /// Puzzles and hacks solved across all floors.
    pub puzzles_solved_total: u32,
    pub crafted_count: u32,
    pub emp_used: bool,
    pub ghost_stunned: bool,
    pub inventory_len: usize,
    /// Sanity dipped below 10 at some point.
    pub lowest_sanity_seen: bool,
    pub healed_near_death: bool,
}

impl RunStats {
    pub fn new() -> Self {
        Self {
            floor: 1,
            ..Default::default()
        }
    }
}
