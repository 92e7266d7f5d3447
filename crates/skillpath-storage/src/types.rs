//! Storage-layer types for catalog listings.

use serde::{Deserialize, Serialize};

use skillpath_core::{RoadmapId, RoadmapLevel};

/// Summary of a catalog roadmap (for listing).
///
/// Defined here rather than in skillpath-core because the topic count is a
/// storage concern -- it is derived from the stored tree at listing time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapSummary {
    /// Roadmap identifier.
    pub id: RoadmapId,
    /// Display title.
    pub title: String,
    /// Authored difficulty band.
    pub level: RoadmapLevel,
    /// Whether the catalog highlights this roadmap.
    pub recommended: bool,
    /// Number of leaf topics in the stored tree.
    pub total_topics: u32,
}
