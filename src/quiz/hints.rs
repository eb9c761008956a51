//! Progressive hint escalation
//!
//! Each incorrect (numeric) submission moves a problem one step up the ladder:
//!
//! | attempt | reveal                                         |
//! |---------|------------------------------------------------|
//! | 1       | hint level 1                                   |
//! | 2       | formula + hint level 2                         |
//! | 3       | formula + hint level 3 + "show solution" offer |
//! | 4+      | full solution, submission closed               |

use serde::{Deserialize, Serialize};

use crate::consts::{AUTO_SOLUTION_ATTEMPT, SOLUTION_OFFER_ATTEMPT};
use crate::format::format_answer;
use crate::problem::Problem;

/// Assistance tier unlocked by a number of incorrect attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HintLevel {
    /// No incorrect attempts yet
    None,
    /// First hint only
    Hint,
    /// Formula revealed with the second hint
    Formula,
    /// Formula with the detailed hint; solution available on demand
    Detailed,
    /// Full solution shown
    Solution,
}

impl HintLevel {
    /// Escalation level for the given attempt count
    pub fn for_attempt(attempt: u32) -> Self {
        match attempt {
            0 => HintLevel::None,
            1 => HintLevel::Hint,
            2 => HintLevel::Formula,
            a if a < AUTO_SOLUTION_ATTEMPT => HintLevel::Detailed,
            _ => HintLevel::Solution,
        }
    }

    /// Whether the formula is visible at this level
    pub fn reveals_formula(&self) -> bool {
        *self >= HintLevel::Formula
    }
}

/// Whether the on-demand solution trigger is available at this attempt count
pub fn solution_offered(attempt: u32) -> bool {
    attempt >= SOLUTION_OFFER_ATTEMPT
}

/// A fully worked solution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub steps: Vec<String>,
    /// Formatted final answer
    pub final_answer: String,
}

impl Solution {
    pub fn for_problem(problem: &Problem) -> Self {
        Self {
            steps: problem.solution_steps.clone(),
            final_answer: format_answer(problem),
        }
    }
}

/// What to reveal after an incorrect submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Escalation {
    /// First hint
    Hint { hint: String },
    /// Formula is now visible, with the second hint
    Formula { hint: String },
    /// Detailed hint; the full solution is now available on demand
    Detailed { hint: String },
    /// Full solution, further submission is closed
    Solution(Solution),
}

impl Escalation {
    /// Decide what an incorrect submission at `attempt` (1-based) reveals
    pub fn for_attempt(problem: &Problem, attempt: u32) -> Self {
        match HintLevel::for_attempt(attempt) {
            HintLevel::None | HintLevel::Hint => Escalation::Hint {
                hint: problem.hints.level_1.clone(),
            },
            HintLevel::Formula => Escalation::Formula {
                hint: problem.hints.level_2.clone(),
            },
            HintLevel::Detailed => Escalation::Detailed {
                hint: problem.hints.level_3.clone(),
            },
            HintLevel::Solution => Escalation::Solution(Solution::for_problem(problem)),
        }
    }

    pub fn level(&self) -> HintLevel {
        match self {
            Escalation::Hint { .. } => HintLevel::Hint,
            Escalation::Formula { .. } => HintLevel::Formula,
            Escalation::Detailed { .. } => HintLevel::Detailed,
            Escalation::Solution(_) => HintLevel::Solution,
        }
    }

    /// Whether this escalation closes submission for the problem
    pub fn closes_submission(&self) -> bool {
        matches!(self, Escalation::Solution(_))
    }
}
