//! Achievement catalog and unlock tracking.

use std::collections::HashSet;

use lastbell_core::enums::AchievementId;
use lastbell_core::state::AchievementView;
use lastbell_core::stats::RunStats;

pub struct Achievement {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub predicate: fn(&RunStats) -> bool,
}

pub static ACHIEVEMENTS: [Achievement; 10] = [
    Achievement {
        id: AchievementId::FirstSteps,
        title: "Into the Abyss",
        description: "Reach B2",
        icon: "🏃",
        predicate: |s| s.floor >= 2,
    },
    Achievement {
        id: AchievementId::DeepDiver,
        title: "Abyss Walker",
        description: "Reach B5",
        icon: "🕳️",
        predicate: |s| s.floor >= 5,
    },
    Achievement {
        id: AchievementId::Survivor,
        title: "Survival Instinct",
        description: "Craft an item",
        icon: "🛠️",
        predicate: |s| s.crafted_count >= 1,
    },
    Achievement {
        id: AchievementId::Alchemist,
        title: "Alchemist",
        description: "Craft 5 items",
        icon: "⚗️",
        predicate: |s| s.crafted_count >= 5,
    },
    Achievement {
        id: AchievementId::GhostHunter,
        title: "Fight Back",
        description: "Stun a ghost with a molotov",
        icon: "🔥",
        predicate: |s| s.ghost_stunned,
    },
    Achievement {
        id: AchievementId::TechSavvy,
        title: "Tech Suppression",
        description: "Paralyze ghosts with an EMP",
        icon: "⚡",
        predicate: |s| s.emp_used,
    },
    Achievement {
        id: AchievementId::MasterMind,
        title: "Mastermind",
        description: "Solve 5 puzzles",
        icon: "🧠",
        predicate: |s| s.puzzles_solved_total >= 5,
    },
    Achievement {
        id: AchievementId::Hoarder,
        title: "Hoarder",
        description: "Carry 5 items at once",
        icon: "🎒",
        predicate: |s| s.inventory_len >= 5,
    },
    Achievement {
        id: AchievementId::IronWill,
        title: "Iron Will",
        description: "Survive with sanity below 10%",
        icon: "👁️",
        predicate: |s| s.lowest_sanity_seen,
    },
    Achievement {
        id: AchievementId::NearDeath,
        title: "Close Call",
        description: "Heal while below 20% health",
        icon: "🩸",
        predicate: |s| s.healed_near_death,
    },
];

/// Unlocked set for one run. Unlocks are monotonic until restart.
#[derive(Debug, Clone, Default)]
pub struct AchievementTracker {
    unlocked: HashSet<AchievementId>,
}

impl AchievementTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unlock every achievement whose predicate now holds. Returns only the
    /// newly unlocked entries, in catalog order.
    pub fn evaluate(&mut self, stats: &RunStats) -> Vec<&'static Achievement> {
        let mut fresh = Vec::new();
        for achievement in ACHIEVEMENTS.iter() {
            if self.unlocked.contains(&achievement.id) {
                continue;
            }
            if (achievement.predicate)(stats) {
                self.unlocked.insert(achievement.id);
                fresh.push(achievement);
            }
        }
        fresh
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked.contains(&id)
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked.len()
    }

    pub fn views(&self) -> Vec<AchievementView> {
        ACHIEVEMENTS
            .iter()
            .map(|a| AchievementView {
                id: a.id,
                title: a.title.to_string(),
                description: a.description.to_string(),
                icon: a.icon.to_string(),
                unlocked: self.is_unlocked(a.id),
            })
            .collect()
    }
}
