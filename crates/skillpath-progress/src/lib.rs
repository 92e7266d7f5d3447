//! Pure derivations over the skillpath data model.
//!
//! Everything in this crate is a synchronous, side-effect-free function from
//! explicit inputs to a fresh value: no I/O, no ambient state, no mutation of
//! arguments. Callers own the canonical trees and result stores and re-run
//! these derivations whenever their inputs change.
//!
//! # Modules
//!
//! - [`propagate`]: status propagation over topic trees (the unlock/completion
//!   engine)
//! - [`summary`]: per-roadmap completion summaries
//! - [`activity`]: 365-day activity heatmap derivation
//! - [`assess`]: entry-assessment grading and level placement
//! - [`daily`]: deterministic daily practice task generation

pub mod activity;
pub mod assess;
pub mod daily;
pub mod propagate;
pub mod summary;

// Re-export key entry points for ergonomic use.
pub use activity::{year_activity, ActivityDay, ACTIVITY_WINDOW_DAYS};
pub use assess::{grade_assessment, AssessmentError, AssessmentOutcome};
pub use daily::{collect_practice_topics, generate_daily_tasks, PracticeTopic};
pub use propagate::{propagate_forest, resolve_group_status};
pub use summary::{average_progress, count_completed_leaves, roadmap_progress};
