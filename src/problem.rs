//! Problem records
//!
//! Problems arrive from the page as untyped JSON and are validated here once.
//! After that they are never mutated.

use std::collections::HashSet;
use std::ops::Index;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a problem set
#[derive(Debug, Error)]
pub enum ProblemError {
    #[error("problem set is empty")]
    Empty,

    #[error("problem at position {0} has an empty id")]
    EmptyId(usize),

    #[error("duplicate problem id: {0}")]
    DuplicateId(String),

    #[error("problem {id}: correct answer must be finite")]
    NonFiniteAnswer { id: String },

    #[error("problem {id}: tolerance must be a finite non-negative number, got {tolerance}")]
    InvalidTolerance { id: String, tolerance: f64 },

    #[error("malformed problem data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Problem difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Capitalised label for the difficulty badge
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Unit of a problem's numeric answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[serde(alias = "dollars")]
    Currency,
    Percent,
    Bps,
    Plain,
}

/// The three escalating hints for a problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hints {
    pub level_1: String,
    pub level_2: String,
    pub level_3: String,
}

/// A single practice problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    /// Unique within a problem set
    pub id: String,
    pub topic: String,
    pub difficulty: Difficulty,
    pub problem_text: String,
    /// LaTeX source, shown once the formula is revealed
    pub formula: String,
    pub correct_answer: f64,
    pub unit: Unit,
    /// Absolute tolerance override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
    #[serde(default)]
    pub solution_steps: Vec<String>,
    pub hints: Hints,
}

impl Problem {
    /// Parse a single problem from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, ProblemError> {
        let problem: Problem = serde_json::from_str(json)?;
        problem.validate(0)?;
        Ok(problem)
    }

    fn validate(&self, position: usize) -> Result<(), ProblemError> {
        if self.id.trim().is_empty() {
            return Err(ProblemError::EmptyId(position));
        }
        if !self.correct_answer.is_finite() {
            return Err(ProblemError::NonFiniteAnswer {
                id: self.id.clone(),
            });
        }
        if let Some(tolerance) = self.tolerance {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(ProblemError::InvalidTolerance {
                    id: self.id.clone(),
                    tolerance,
                });
            }
        }
        Ok(())
    }
}

/// A fixed, ordered, validated sequence of problems
#[derive(Debug, Clone)]
pub struct ProblemSet {
    problems: Vec<Problem>,
}

impl ProblemSet {
    /// Validate problems and wrap them in a set
    pub fn new(problems: Vec<Problem>) -> Result<Self, ProblemError> {
        if problems.is_empty() {
            return Err(ProblemError::Empty);
        }

        let mut seen = HashSet::with_capacity(problems.len());
        for (position, problem) in problems.iter().enumerate() {
            problem.validate(position)?;
            if !seen.insert(problem.id.as_str()) {
                return Err(ProblemError::DuplicateId(problem.id.clone()));
            }
        }

        Ok(Self { problems })
    }

    /// Parse a JSON array of problems
    pub fn from_json(json: &str) -> Result<Self, ProblemError> {
        let problems: Vec<Problem> = serde_json::from_str(json)?;
        Self::new(problems)
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    /// Always false for a constructed set; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Problem> {
        self.problems.get(index)
    }
}

impl Index<usize> for ProblemSet {
    type Output = Problem;

    fn index(&self, index: usize) -> &Problem {
        &self.problems[index]
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a problem with sensible defaults for tests
    pub(crate) fn sample(id: &str, correct_answer: f64, unit: Unit) -> Problem {
        Problem {
            id: id.to_string(),
            topic: "Time Value of Money".to_string(),
            difficulty: Difficulty::Medium,
            problem_text: format!("Compute the value for {id}."),
            formula: "PV = \\frac{FV}{(1+r)^n}".to_string(),
            correct_answer,
            unit,
            tolerance: None,
            solution_steps: vec!["Step one".to_string(), "Step two".to_string()],
            hints: Hints {
                level_1: "Think about discounting.".to_string(),
                level_2: "Use the present value formula.".to_string(),
                level_3: "Divide FV by (1+r)^n.".to_string(),
            },
        }
    }

    const PROBLEM_JSON: &str = r#"{
        "id": "tvm-1",
        "topic": "Present Value",
        "difficulty": "easy",
        "problem_text": "What is the PV of $1,100 in one year at 10%?",
        "formula": "PV = \\frac{FV}{1+r}",
        "correct_answer": 1000,
        "unit": "dollars",
        "solution_steps": ["PV = 1100 / 1.10", "PV = 1000"],
        "hints": {
            "level_1": "Discount one period.",
            "level_2": "Divide by (1 + r).",
            "level_3": "1100 / 1.1"
        }
    }"#;

    #[test]
    fn test_problem_from_json() {
        let problem = Problem::from_json(PROBLEM_JSON).unwrap();
        assert_eq!(problem.id, "tvm-1");
        assert_eq!(problem.difficulty, Difficulty::Easy);
        assert_eq!(problem.unit, Unit::Currency);
        assert_eq!(problem.tolerance, None);
        assert_eq!(problem.solution_steps.len(), 2);
        assert_eq!(problem.hints.level_3, "1100 / 1.1");
    }

    #[test]
    fn test_problem_rejects_unknown_unit() {
        let json = PROBLEM_JSON.replace("\"dollars\"", "\"yen\"");
        assert!(matches!(
            Problem::from_json(&json),
            Err(ProblemError::Malformed(_))
        ));
    }

    #[test]
    fn test_problem_rejects_negative_tolerance() {
        let mut problem = sample("p1", 10.0, Unit::Plain);
        problem.tolerance = Some(-1.0);
        let err = ProblemSet::new(vec![problem]).unwrap_err();
        assert!(matches!(err, ProblemError::InvalidTolerance { .. }));
    }

    #[test]
    fn test_problem_set_rejects_empty() {
        assert!(matches!(ProblemSet::new(Vec::new()), Err(ProblemError::Empty)));
    }

    #[test]
    fn test_problem_set_rejects_duplicate_ids() {
        let err = ProblemSet::new(vec![
            sample("dup", 1.0, Unit::Plain),
            sample("dup", 2.0, Unit::Plain),
        ])
        .unwrap_err();
        assert!(matches!(err, ProblemError::DuplicateId(id) if id == "dup"));
    }

    #[test]
    fn test_problem_set_rejects_blank_id() {
        let err = ProblemSet::new(vec![
            sample("ok", 1.0, Unit::Plain),
            sample("  ", 2.0, Unit::Plain),
        ])
        .unwrap_err();
        assert!(matches!(err, ProblemError::EmptyId(1)));
    }

    #[test]
    fn test_problem_set_from_json_array() {
        let json = format!("[{PROBLEM_JSON}]");
        let set = ProblemSet::from_json(&json).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(0).map(|p| p.id.as_str()), Some("tvm-1"));
        assert!(set.get(1).is_none());
    }

    #[test]
    fn test_difficulty_labels() {
        assert_eq!(Difficulty::Hard.label(), "Hard");
        assert_eq!(Difficulty::Medium.as_str(), "medium");
    }
}
