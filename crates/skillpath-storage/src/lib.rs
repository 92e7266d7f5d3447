//! Storage abstraction for skillpath learner state.
//!
//! Provides the [`ProgressStore`] trait defining the storage contract that
//! all backends implement, plus [`InMemoryStore`] and [`SqliteStore`] as
//! first-class backends.
//!
//! # Architecture
//!
//! The store owns the canonical inputs of every derivation -- the roadmap
//! catalog with its topic trees, recorded test results, the learner's
//! collection -- and caches derived outputs (completion summaries, daily
//! tasks, state fingerprints). Derivations themselves live in
//! `skillpath-progress`; callers re-run them after each store mutation and
//! write the outcome back.
//!
//! # Modules
//!
//! - [`error`]: StorageError enum with all failure modes
//! - [`types`]: catalog listing types
//! - [`traits`]: ProgressStore trait definition
//! - [`memory`]: InMemoryStore implementation
//! - [`schema`]: SQL schema constants and migration setup
//! - [`sqlite`]: SqliteStore implementation
//! - [`hash`]: blake3 fingerprints over propagation inputs
//! - [`dirty`]: fingerprint comparison for selective re-propagation
//! - [`seed`]: the demo catalog

pub mod dirty;
pub mod error;
pub mod hash;
pub mod memory;
pub mod schema;
pub mod seed;
pub mod sqlite;
pub mod traits;
pub mod types;

// Re-export key types for ergonomic use.
pub use dirty::{compute_dirty_set, current_fingerprints, DirtySet};
pub use error::StorageError;
pub use hash::roadmap_fingerprint;
pub use memory::InMemoryStore;
pub use seed::seed_catalog;
pub use sqlite::SqliteStore;
pub use traits::ProgressStore;
pub use types::RoadmapSummary;
