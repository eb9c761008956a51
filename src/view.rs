//! View model
//!
//! The session never touches presentation APIs. After every action the caller
//! projects the session into a `SessionView` and hands it to a `Renderer`
//! (the DOM in the browser, anything else in tests).

use serde::Serialize;

use crate::persistence::StorageBackend;
use crate::quiz::{Escalation, Outcome, ProblemSession, Summary};

pub const NEXT_LABEL: &str = "Next Problem";
pub const FINISH_LABEL: &str = "Finish";
pub const SHOW_SOLUTION_LABEL: &str = "Show Full Solution";

/// Something that can draw a session view
pub trait Renderer {
    fn render(&mut self, view: &SessionView);
}

/// Wrap LaTeX source in inline math delimiters for KaTeX auto-render
pub fn inline_math(latex: &str) -> String {
    format!("\\({latex}\\)")
}

/// Visual tone of the feedback panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FeedbackTone {
    Correct,
    Incorrect,
}

impl FeedbackTone {
    pub fn css_class(&self) -> &'static str {
        match self {
            FeedbackTone::Correct => "feedback-box feedback-correct",
            FeedbackTone::Incorrect => "feedback-box feedback-incorrect",
        }
    }
}

/// A labelled hint line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HintLine {
    pub label: &'static str,
    pub text: String,
}

/// Feedback panel contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackView {
    pub tone: FeedbackTone,
    pub title: &'static str,
    pub message: Option<String>,
    pub hint: Option<HintLine>,
    pub solution_steps: Vec<String>,
    pub final_answer: Option<String>,
    /// Show the "Show Full Solution" button
    pub offer_solution: bool,
}

impl FeedbackView {
    fn new(tone: FeedbackTone, title: &'static str) -> Self {
        Self {
            tone,
            title,
            message: None,
            hint: None,
            solution_steps: Vec::new(),
            final_answer: None,
            offer_solution: false,
        }
    }

    /// Feedback panel for an outcome (`None` for outcomes that leave it unchanged)
    pub fn from_outcome(outcome: &Outcome) -> Option<Self> {
        let view = match outcome {
            Outcome::Locked => return None,
            Outcome::InvalidInput => {
                FeedbackView::new(FeedbackTone::Incorrect, "Please enter a valid number")
            }
            Outcome::Correct { answer, .. } => FeedbackView {
                message: Some(format!("Great job! The correct answer is {answer}.")),
                ..FeedbackView::new(FeedbackTone::Correct, "Correct!")
            },
            Outcome::Incorrect { escalation, .. } => match escalation {
                Escalation::Hint { hint } => FeedbackView {
                    hint: Some(HintLine {
                        label: "Hint:",
                        text: hint.clone(),
                    }),
                    ..FeedbackView::new(FeedbackTone::Incorrect, "Not quite right")
                },
                Escalation::Formula { hint } => FeedbackView {
                    hint: Some(HintLine {
                        label: "Formula revealed above.",
                        text: hint.clone(),
                    }),
                    ..FeedbackView::new(FeedbackTone::Incorrect, "Not quite right")
                },
                Escalation::Detailed { hint } => FeedbackView {
                    hint: Some(HintLine {
                        label: "Detailed hint:",
                        text: hint.clone(),
                    }),
                    ..FeedbackView::new(FeedbackTone::Incorrect, "Not quite right")
                },
                Escalation::Solution(solution) => FeedbackView::solution(
                    solution.steps.clone(),
                    solution.final_answer.clone(),
                ),
            },
            Outcome::Solution(solution) => {
                FeedbackView::solution(solution.steps.clone(), solution.final_answer.clone())
            }
        };
        Some(view)
    }

    /// Attach or drop the "Show Full Solution" button
    pub fn with_solution_offer(self, offer_solution: bool) -> Self {
        Self {
            offer_solution,
            ..self
        }
    }

    fn solution(steps: Vec<String>, final_answer: String) -> Self {
        FeedbackView {
            solution_steps: steps,
            final_answer: Some(final_answer),
            ..FeedbackView::new(FeedbackTone::Correct, "Solution")
        }
    }
}

/// Progress indicator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressView {
    /// Bar width, 0-100
    pub percent: f64,
    pub text: String,
}

/// The problem card while a problem is on screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProblemView {
    /// Index of the problem in its set
    pub index: usize,
    pub difficulty_label: &'static str,
    pub difficulty_class: String,
    pub topic: String,
    pub problem_text: String,
    /// Formula wrapped in inline math delimiters
    pub formula: String,
    pub formula_visible: bool,
    pub feedback: Option<FeedbackView>,
    pub submit_enabled: bool,
    pub prev_enabled: bool,
    pub next_label: &'static str,
}

/// The problem card once the session is over
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryView {
    pub heading: &'static str,
    pub score: String,
    pub message: String,
}

impl From<Summary> for SummaryView {
    fn from(summary: Summary) -> Self {
        Self {
            heading: "Practice Session Complete!",
            score: format!("{} / {}", summary.completed, summary.total),
            message: format!(
                "You got {}% of problems correct on the first try!",
                summary.percent
            ),
        }
    }
}

/// What the problem card shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CardView {
    Problem(ProblemView),
    Summary(SummaryView),
}

/// Everything a renderer needs to redraw the widget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub progress: ProgressView,
    pub card: CardView,
}

impl SessionView {
    /// Project the current session state
    pub fn from_session<B: StorageBackend>(session: &ProblemSession<B>) -> Self {
        let total = session.problems().len();

        let progress = ProgressView {
            percent: session.progress_fraction() * 100.0,
            text: format!("Problem {} of {}", session.current_index() + 1, total),
        };

        let card = match session.summary() {
            Some(summary) => CardView::Summary(summary.into()),
            None => {
                let problem = session.current_problem();
                let state = session.state();
                CardView::Problem(ProblemView {
                    index: session.current_index(),
                    difficulty_label: problem.difficulty.label(),
                    difficulty_class: format!("badge badge-{}", problem.difficulty.as_str()),
                    topic: problem.topic.clone(),
                    problem_text: problem.problem_text.clone(),
                    formula: inline_math(&problem.formula),
                    formula_visible: state.formula_visible(),
                    feedback: session
                        .feedback()
                        .and_then(FeedbackView::from_outcome)
                        .map(|f| f.with_solution_offer(session.can_show_solution())),
                    submit_enabled: state.accepts_submission(),
                    prev_enabled: !session.is_first(),
                    next_label: if session.is_last() {
                        FINISH_LABEL
                    } else {
                        NEXT_LABEL
                    },
                })
            }
        };

        Self {
            progress,
            card,
        }
    }

    pub fn problem(&self) -> Option<&ProblemView> {
        match &self.card {
            CardView::Problem(problem) => Some(problem),
            CardView::Summary(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;
    use crate::persistence::{MemoryStorage, ProgressStore};
    use crate::problem::tests::sample;
    use crate::problem::{ProblemSet, Unit};

    /// Keeps every rendered frame
    #[derive(Default)]
    struct FrameRecorder {
        frames: Vec<SessionView>,
    }

    impl Renderer for FrameRecorder {
        fn render(&mut self, view: &SessionView) {
            self.frames.push(view.clone());
        }
    }

    fn session() -> ProblemSession<MemoryStorage> {
        let problems = ProblemSet::new(vec![
            sample("a", 1000.0, Unit::Currency),
            sample("b", 12.5, Unit::Percent),
        ])
        .unwrap();
        let config = PageConfig {
            topic_key: "tvm".to_string(),
            title: "Time Value of Money".to_string(),
            subtitle: "Practice set".to_string(),
        };
        ProblemSession::new(problems, config, ProgressStore::new(MemoryStorage::new()))
    }

    #[test]
    fn test_initial_view() {
        let s = session();
        let view = SessionView::from_session(&s);
        assert_eq!(view.progress.text, "Problem 1 of 2");
        assert_eq!(view.progress.percent, 0.0);

        let problem = view.problem().unwrap();
        assert_eq!(problem.difficulty_label, "Medium");
        assert_eq!(problem.difficulty_class, "badge badge-medium");
        assert_eq!(problem.formula, "\\(PV = \\frac{FV}{(1+r)^n}\\)");
        assert!(!problem.formula_visible);
        assert!(problem.feedback.is_none());
        assert!(problem.submit_enabled);
        assert!(!problem.prev_enabled);
        assert_eq!(problem.next_label, NEXT_LABEL);
    }

    #[test]
    fn test_last_problem_reads_finish() {
        let mut s = session();
        s.advance();
        let view = SessionView::from_session(&s);
        assert_eq!(view.progress.percent, 50.0);
        let problem = view.problem().unwrap();
        assert!(problem.prev_enabled);
        assert_eq!(problem.next_label, FINISH_LABEL);
    }

    #[test]
    fn test_feedback_follows_escalation() {
        let mut s = session();
        let mut recorder = FrameRecorder::default();

        for _ in 0..4 {
            s.submit_answer("1");
            recorder.render(&SessionView::from_session(&s));
        }

        let feedback: Vec<FeedbackView> = recorder
            .frames
            .iter()
            .filter_map(|f| f.problem().and_then(|p| p.feedback.clone()))
            .collect();
        assert_eq!(feedback.len(), 4);
        assert_eq!(feedback[0].hint.as_ref().map(|h| h.label), Some("Hint:"));
        assert_eq!(
            feedback[1].hint.as_ref().map(|h| h.label),
            Some("Formula revealed above.")
        );
        assert!(feedback[2].offer_solution);
        assert_eq!(feedback[3].title, "Solution");
        assert_eq!(feedback[3].final_answer.as_deref(), Some("$1,000.00"));

        let visible: Vec<bool> = recorder
            .frames
            .iter()
            .filter_map(|f| f.problem().map(|p| p.formula_visible))
            .collect();
        assert_eq!(visible, vec![false, true, true, true]);

        let last = recorder.frames.last().and_then(|f| f.problem()).unwrap();
        assert!(!last.submit_enabled);
    }

    #[test]
    fn test_solution_offer_survives_invalid_input() {
        let mut s = session();
        for _ in 0..3 {
            s.submit_answer("1");
        }
        assert_eq!(s.submit_answer("abc"), Outcome::InvalidInput);

        let view = SessionView::from_session(&s);
        let feedback = view.problem().and_then(|p| p.feedback.clone()).unwrap();
        assert_eq!(feedback.title, "Please enter a valid number");
        assert!(feedback.offer_solution);
    }

    #[test]
    fn test_no_solution_offer_before_third_miss() {
        let mut s = session();
        s.submit_answer("1");
        s.submit_answer("abc");
        let view = SessionView::from_session(&s);
        let feedback = view.problem().and_then(|p| p.feedback.clone()).unwrap();
        assert!(!feedback.offer_solution);
    }

    #[test]
    fn test_correct_feedback_message() {
        let mut s = session();
        s.submit_answer("1000");
        let view = SessionView::from_session(&s);
        let feedback = view.problem().and_then(|p| p.feedback.clone()).unwrap();
        assert_eq!(feedback.tone, FeedbackTone::Correct);
        assert_eq!(feedback.title, "Correct!");
        assert_eq!(
            feedback.message.as_deref(),
            Some("Great job! The correct answer is $1,000.00.")
        );
    }

    #[test]
    fn test_locked_outcome_keeps_panel() {
        assert!(FeedbackView::from_outcome(&Outcome::Locked).is_none());
        let invalid = FeedbackView::from_outcome(&Outcome::InvalidInput).unwrap();
        assert_eq!(invalid.tone.css_class(), "feedback-box feedback-incorrect");
    }

    #[test]
    fn test_summary_view() {
        let mut s = session();
        s.submit_answer("1000");
        s.advance();
        s.advance();
        let view = SessionView::from_session(&s);
        assert_eq!(view.progress.percent, 100.0);
        match view.card {
            CardView::Summary(summary) => {
                assert_eq!(summary.score, "1 / 2");
                assert_eq!(
                    summary.message,
                    "You got 50% of problems correct on the first try!"
                );
            }
            CardView::Problem(_) => panic!("expected summary"),
        }
    }
}
