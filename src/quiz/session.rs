//! Problem session
//!
//! Drives a student through a fixed, ordered problem set:
//! submit -> evaluate -> escalate or complete, and next/previous navigation.
//! No operation fails; storage problems are absorbed by the progress store.

use serde::{Deserialize, Serialize};

use super::hints::{Escalation, HintLevel, Solution, solution_offered};
use super::state::{ProblemStatus, SessionPhase, SessionState, Summary};
use super::tolerance::is_correct;
use crate::config::PageConfig;
use crate::format::{format_answer, parse_answer};
use crate::persistence::{MissedEntry, PersistedProgress, ProgressStore, StorageBackend};
use crate::problem::{Problem, ProblemSet};

/// Result of a student action on the current problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// Input was not a number; nothing changed
    InvalidInput,
    /// The problem no longer accepts submissions; nothing changed
    Locked,
    /// Answer accepted; submission is now closed
    Correct { attempt: u32, answer: String },
    /// Answer rejected, with the assistance it unlocked
    Incorrect { attempt: u32, escalation: Escalation },
    /// Full solution shown on demand; submission is now closed
    Solution(Solution),
}

/// A practice session over one problem set
pub struct ProblemSession<B> {
    problems: ProblemSet,
    config: PageConfig,
    store: ProgressStore<B>,
    state: SessionState,
    /// Last outcome, shown in the feedback panel
    feedback: Option<Outcome>,
}

impl<B: StorageBackend> ProblemSession<B> {
    /// Start a session, loading saved progress for the page's topic
    pub fn new(problems: ProblemSet, config: PageConfig, store: ProgressStore<B>) -> Self {
        let progress = load_progress(&store, &config);
        let state = SessionState::new(progress, problems.len());

        log::info!(
            "Practice session started: {} problems, topic '{}'",
            problems.len(),
            config.topic_key
        );

        Self {
            problems,
            config,
            store,
            state,
            feedback: None,
        }
    }

    pub fn problems(&self) -> &ProblemSet {
        &self.problems
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn store(&self) -> &ProgressStore<B> {
        &self.store
    }

    pub fn feedback(&self) -> Option<&Outcome> {
        self.feedback.as_ref()
    }

    pub fn current_index(&self) -> usize {
        self.state.index
    }

    pub fn current_problem(&self) -> &Problem {
        &self.problems[self.state.index]
    }

    pub fn is_first(&self) -> bool {
        self.state.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.state.index + 1 == self.problems.len()
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    /// Fraction of problems passed before the current one (1.0 in summary)
    pub fn progress_fraction(&self) -> f64 {
        match self.state.phase {
            SessionPhase::Summary => 1.0,
            SessionPhase::Active => self.state.index as f64 / self.problems.len() as f64,
        }
    }

    /// Score, once the session has reached its summary
    pub fn summary(&self) -> Option<Summary> {
        match self.state.phase {
            SessionPhase::Summary => Some(Summary::new(
                self.state.completed.len(),
                self.problems.len(),
            )),
            SessionPhase::Active => None,
        }
    }

    /// Whether the on-demand solution trigger is available
    pub fn can_show_solution(&self) -> bool {
        self.state.accepts_submission() && solution_offered(self.state.attempts)
    }

    /// Submit free-text input for the current problem
    pub fn submit_answer(&mut self, raw: &str) -> Outcome {
        match parse_answer(raw) {
            Some(value) => self.submit_value(value),
            None => self.reject_input(),
        }
    }

    /// Submit an already-parsed value for the current problem
    pub fn submit_value(&mut self, value: f64) -> Outcome {
        if !value.is_finite() {
            return self.reject_input();
        }
        if !self.state.accepts_submission() {
            log::debug!("Submission ignored: problem {} is closed", self.state.index);
            return Outcome::Locked;
        }

        self.state.attempts += 1;
        let attempt = self.state.attempts;
        let index = self.state.index;
        let problem = &self.problems[index];

        let outcome = if is_correct(value, problem) {
            self.state.record_correct(index, &problem.id);
            self.state.status = ProblemStatus::Solved;
            Outcome::Correct {
                attempt,
                answer: format_answer(problem),
            }
        } else {
            self.state.record_miss(
                &problem.id,
                MissedEntry {
                    topic: problem.topic.clone(),
                    difficulty: problem.difficulty,
                    attempts: 0,
                },
            );
            let escalation = Escalation::for_attempt(problem, attempt);
            self.state.reveal(escalation.level());
            if escalation.closes_submission() {
                self.state.status = ProblemStatus::SolutionShown;
            }
            Outcome::Incorrect {
                attempt,
                escalation,
            }
        };

        log::debug!("Problem {} attempt {}: {:?}", index, attempt, outcome);
        self.save_progress();
        self.feedback = Some(outcome.clone());
        outcome
    }

    /// Reveal the full solution on demand (available from the third attempt)
    pub fn show_solution(&mut self) -> Outcome {
        if !self.can_show_solution() {
            return Outcome::Locked;
        }

        let solution = Solution::for_problem(self.current_problem());
        self.state.reveal(HintLevel::Solution);
        self.state.status = ProblemStatus::SolutionShown;

        let outcome = Outcome::Solution(solution);
        self.feedback = Some(outcome.clone());
        outcome
    }

    /// Move to the next problem, or to the summary after the last one
    pub fn advance(&mut self) -> SessionPhase {
        if self.state.phase == SessionPhase::Summary {
            return SessionPhase::Summary;
        }

        if self.is_last() {
            self.state.phase = SessionPhase::Summary;
            self.feedback = None;
            log::info!(
                "Practice session complete: {} / {}",
                self.state.completed.len(),
                self.problems.len()
            );
        } else {
            self.display(self.state.index + 1);
        }
        self.state.phase
    }

    /// Move to the previous problem; returns false on the first problem
    pub fn retreat(&mut self) -> bool {
        if self.state.phase == SessionPhase::Summary || self.is_first() {
            return false;
        }
        self.display(self.state.index - 1);
        true
    }

    /// Start over from the first problem with progress reloaded from storage
    pub fn restart(&mut self) {
        let progress = load_progress(&self.store, &self.config);
        self.state = SessionState::new(progress, self.problems.len());
        self.feedback = None;
        log::info!("Practice session restarted");
    }

    fn display(&mut self, index: usize) {
        self.state.show_problem(index);
        self.feedback = None;
    }

    fn reject_input(&mut self) -> Outcome {
        if !self.state.accepts_submission() {
            return Outcome::Locked;
        }
        self.feedback = Some(Outcome::InvalidInput);
        Outcome::InvalidInput
    }

    fn save_progress(&mut self) {
        if !self.config.persists_progress() {
            return;
        }
        self.store.save(
            &self.config.topic_key,
            &self.state.completed,
            &self.state.missed,
        );
    }
}

fn load_progress<B: StorageBackend>(
    store: &ProgressStore<B>,
    config: &PageConfig,
) -> PersistedProgress {
    if config.persists_progress() {
        store.load(&config.topic_key)
    } else {
        log::debug!("No topic key configured, progress will not be saved");
        PersistedProgress::default()
    }
}
