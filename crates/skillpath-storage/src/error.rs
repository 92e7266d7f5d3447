//! Storage error types for skillpath-storage.
//!
//! [`StorageError`] covers all anticipated failure modes in the storage
//! layer: serialization, database access, migrations, boundary validation of
//! incoming trees, and entity-not-found variants.

use skillpath_core::{CoreError, RoadmapId};
use thiserror::Error;

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The underlying SQLite database reported an error.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Applying schema migrations failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// A topic tree failed boundary validation on insert.
    #[error("invalid topic tree: {0}")]
    InvalidTree(#[from] CoreError),

    /// A roadmap with the given ID was not found.
    #[error("roadmap not found: '{id}'")]
    RoadmapNotFound { id: RoadmapId },

    /// Inserting a roadmap whose ID already exists in the catalog.
    #[error("duplicate roadmap: '{id}'")]
    DuplicateRoadmap { id: RoadmapId },

    /// No assessment is stored for the given roadmap.
    #[error("assessment not found for roadmap: '{id}'")]
    AssessmentNotFound { id: RoadmapId },

    /// A daily task with the given ID was not found.
    #[error("daily task not found: '{id}'")]
    TaskNotFound { id: String },

    /// Stored data could not be reconstructed into model types.
    #[error("reconstruction error: {reason}")]
    Reconstruction { reason: String },
}
