//! Session state
//!
//! Everything that changes while a student works through a problem set lives
//! here. Only `completed` and `missed` are persisted; the attempt count is scoped
//! to the problem currently on screen.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::hints::HintLevel;
use crate::persistence::{MissedEntry, PersistedProgress};

/// Overall session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Working through problems
    Active,
    /// Past the last problem, showing the score
    Summary,
}

/// Status of the problem instance currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProblemStatus {
    /// Accepting submissions
    Open,
    /// Answered correctly
    Solved,
    /// Full solution shown
    SolutionShown,
}

/// End-of-session score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub completed: usize,
    pub total: usize,
    /// `completed / total` as a rounded percentage
    pub percent: u32,
}

impl Summary {
    pub fn new(completed: usize, total: usize) -> Self {
        let percent = if total == 0 {
            0
        } else {
            (completed as f64 / total as f64 * 100.0).round() as u32
        };
        Self {
            completed,
            total,
            percent,
        }
    }
}

/// Mutable state of a practice session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Current problem index (0-based)
    pub index: usize,
    /// Numeric submissions on the current problem instance
    pub attempts: u32,
    pub status: ProblemStatus,
    /// Highest assistance level revealed for the current problem instance
    pub revealed: HintLevel,
    pub phase: SessionPhase,
    /// Indices answered correctly at least once (grows only)
    pub completed: BTreeSet<usize>,
    /// Problems missed since they were last answered correctly, by id
    pub missed: BTreeMap<String, MissedEntry>,
}

impl SessionState {
    /// Fresh state seeded from persisted progress
    ///
    /// Completed indices outside `0..total` are dropped.
    pub fn new(progress: PersistedProgress, total: usize) -> Self {
        let PersistedProgress {
            mut completed,
            missed,
        } = progress;
        let before = completed.len();
        completed.retain(|&i| i < total);
        if completed.len() != before {
            log::warn!(
                "Dropped {} completed indices outside the problem set",
                before - completed.len()
            );
        }

        Self {
            index: 0,
            attempts: 0,
            status: ProblemStatus::Open,
            revealed: HintLevel::None,
            phase: SessionPhase::Active,
            completed,
            missed,
        }
    }

    /// Display the problem at `index`, resetting per-instance state
    pub fn show_problem(&mut self, index: usize) {
        self.index = index;
        self.attempts = 0;
        self.status = ProblemStatus::Open;
        self.revealed = HintLevel::None;
    }

    /// Whether a submission would be evaluated
    pub fn accepts_submission(&self) -> bool {
        self.phase == SessionPhase::Active && self.status == ProblemStatus::Open
    }

    /// Raise the revealed level, never lowering it
    pub fn reveal(&mut self, level: HintLevel) {
        self.revealed = self.revealed.max(level);
    }

    pub fn formula_visible(&self) -> bool {
        self.revealed.reveals_formula()
    }

    /// Record a miss for `id`, carrying over previously stored attempts
    pub fn record_miss(&mut self, id: &str, entry_template: MissedEntry) {
        self.missed
            .entry(id.to_string())
            .and_modify(|entry| {
                entry.attempts = entry.attempts.saturating_add(1);
                entry.topic = entry_template.topic.clone();
                entry.difficulty = entry_template.difficulty;
            })
            .or_insert(MissedEntry {
                attempts: 1,
                ..entry_template
            });
    }

    /// Record a correct answer for the problem at `index`
    pub fn record_correct(&mut self, index: usize, id: &str) {
        self.completed.insert(index);
        self.missed.remove(id);
    }
}
