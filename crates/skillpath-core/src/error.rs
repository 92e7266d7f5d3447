//! Core error types for skillpath-core.
//!
//! Uses `thiserror` for structured, matchable error variants. The core model
//! has few failure modes of its own: trees are validated once at the boundary
//! and the derivation engine is total over validated input.

use crate::id::TopicId;
use thiserror::Error;

/// Core errors produced by the skillpath-core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A topic node carries an empty ID string.
    #[error("empty topic id (title: '{title}')")]
    EmptyTopicId { title: String },

    /// Two nodes in the same forest share an ID.
    #[error("duplicate topic id: '{id}'")]
    DuplicateTopicId { id: TopicId },
}
