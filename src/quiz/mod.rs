//! Practice quiz core
//!
//! All answer-checking logic lives here. This module is pure and synchronous:
//! - No DOM or rendering dependencies
//! - Persistence only through the `ProgressStore` abstraction
//! - Every decision is returned as data (`Outcome`, `Escalation`)

pub mod hints;
pub mod session;
pub mod state;
pub mod tolerance;

pub use hints::{Escalation, HintLevel, Solution, solution_offered};
pub use session::{Outcome, ProblemSession};
pub use state::{ProblemStatus, SessionPhase, SessionState, Summary};
pub use tolerance::{is_correct, tolerance};
