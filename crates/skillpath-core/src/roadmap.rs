//! Roadmap catalog entries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::RoadmapId;

/// Difficulty band of a roadmap, also used as the placement outcome of an
/// entry assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoadmapLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl RoadmapLevel {
    /// Returns the database representation of the level.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoadmapLevel::Beginner => "Beginner",
            RoadmapLevel::Intermediate => "Intermediate",
            RoadmapLevel::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for RoadmapLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named learning track in the catalog. The topic tree lives alongside in
/// the store, not inline, so catalog listings stay cheap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    /// Unique identity within the catalog.
    pub id: RoadmapId,
    /// Display title.
    pub title: String,
    /// One-line description.
    pub description: String,
    /// Authored difficulty band.
    pub level: RoadmapLevel,
    /// Whether the catalog highlights this roadmap.
    pub recommended: bool,
}
