//! Per-roadmap completion summaries.

use serde::{Deserialize, Serialize};

use crate::id::RoadmapId;

/// Completion summary for one roadmap, derived from a propagated tree and
/// cached in the store so listings don't re-walk every tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapProgress {
    /// The roadmap being summarized.
    pub roadmap_id: RoadmapId,
    /// Rounded percentage of completed leaf topics (0-100).
    pub completion_percent: u8,
    /// Number of leaf topics with `completed` status.
    pub completed_topics: u32,
    /// Total number of leaf topics in the tree.
    pub total_topics: u32,
}
