//! Stable ID newtypes for catalog entities.
//!
//! Roadmap and topic identifiers are human-assigned slugs ("ai",
//! "history-of-ai"), so the inner type is `String` rather than a dense
//! integer. Distinct newtype wrappers provide type safety so that a
//! `TopicId` cannot be accidentally used where a `RoadmapId` is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a roadmap, unique within the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoadmapId(pub String);

/// Identifier of a topic node, unique within its roadmap's tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicId(pub String);

impl RoadmapId {
    /// Creates a roadmap ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        RoadmapId(id.into())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TopicId {
    /// Creates a topic ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        TopicId(id.into())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Display implementations -- just print the inner slug.

impl fmt::Display for RoadmapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RoadmapId {
    fn from(s: &str) -> Self {
        RoadmapId(s.to_string())
    }
}

impl From<&str> for TopicId {
    fn from(s: &str) -> Self {
        TopicId(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roadmap_id_display() {
        assert_eq!(format!("{}", RoadmapId::new("ai")), "ai");
    }

    #[test]
    fn topic_id_display() {
        assert_eq!(format!("{}", TopicId::new("history-of-ai")), "history-of-ai");
    }

    #[test]
    fn id_types_are_distinct() {
        // Same inner slug, different types -- confusing them is a compile
        // error; here we just verify the values are independent.
        let roadmap = RoadmapId::new("ai");
        let topic = TopicId::new("ai");
        assert_eq!(roadmap.as_str(), topic.as_str());
    }

    #[test]
    fn serde_is_transparent() {
        let id = TopicId::new("flexbox");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"flexbox\"");

        let back: TopicId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
