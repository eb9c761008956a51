//! Finance Practice - a browser practice-problem widget
//!
//! Core modules:
//! - `problem`: Typed problem records, validated at the load boundary
//! - `config`: Page configuration (topic key, title, subtitle)
//! - `format`: Answer parsing and display formatting
//! - `quiz`: Pure answer evaluation, hint escalation and session orchestration
//! - `persistence`: Best-effort progress storage keyed by topic
//! - `view`: View model projection and the renderer seam
//! - `platform`: Browser adapters (DOM renderer, LocalStorage backend)

pub mod config;
pub mod format;
pub mod persistence;
pub mod platform;
pub mod problem;
pub mod quiz;
pub mod view;

pub use config::PageConfig;
pub use persistence::{MemoryStorage, PersistedProgress, ProgressStore, StorageBackend};
pub use problem::{Difficulty, Hints, Problem, ProblemError, ProblemSet, Unit};
pub use quiz::{Outcome, ProblemSession, SessionPhase};
pub use view::{Renderer, SessionView};

/// Evaluation and escalation constants
pub mod consts {
    /// Default tolerance as a fraction of the answer's magnitude (0.5%)
    pub const PERCENT_TOLERANCE_RATIO: f64 = 0.005;
    /// Tolerance floor for percent answers (percentage points)
    pub const MIN_TOLERANCE_PERCENT: f64 = 0.1;
    /// Tolerance floor for basis-point answers
    pub const MIN_TOLERANCE_BPS: f64 = 5.0;
    /// Tolerance floor for small-magnitude answers
    pub const MIN_TOLERANCE_SMALL: f64 = 0.05;
    /// Tolerance floor for everything else
    pub const MIN_TOLERANCE_DEFAULT: f64 = 1.0;
    /// Answers below this magnitude use the small floor
    pub const SMALL_ANSWER_THRESHOLD: f64 = 10.0;

    /// Attempt at which the full solution can be requested on demand
    pub const SOLUTION_OFFER_ATTEMPT: u32 = 3;
    /// Attempt at which the full solution is revealed automatically
    pub const AUTO_SOLUTION_ATTEMPT: u32 = 4;

    /// Namespace prefix for persisted progress keys
    pub const STORAGE_NAMESPACE: &str = "finance_";
}
