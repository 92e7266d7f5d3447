//! Topic trees: the hierarchical unit of learning content.
//!
//! A roadmap's content is an ordered forest of [`TopicNode`]s. A node with no
//! children is a **leaf** (the only kind that can have a recorded test
//! result); a node with children is a **group** whose status is always
//! derived from its children. Sibling order is semantic: it defines the
//! unlock gating sequence and must be preserved verbatim by every
//! transformation.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::id::TopicId;

/// Learner-visible state of a topic node.
///
/// Recomputed on every propagation pass; seeded values on leaves are only
/// consulted by the carry-over rule (a leaf with no recorded result keeps its
/// seeded non-`Locked` status).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicStatus {
    NotStarted,
    InProgress,
    Completed,
    Locked,
}

impl TopicStatus {
    /// Returns the wire/database representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TopicStatus::NotStarted => "not_started",
            TopicStatus::InProgress => "in_progress",
            TopicStatus::Completed => "completed",
            TopicStatus::Locked => "locked",
        }
    }

    /// True for [`TopicStatus::Completed`].
    pub fn is_completed(&self) -> bool {
        matches!(self, TopicStatus::Completed)
    }
}

impl fmt::Display for TopicStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node in a roadmap's topic tree.
///
/// Leaf iff `children` is empty. The original data model distinguished
/// "absent" from "empty" children lists; with owned `Vec` children the two
/// collapse into one structural case, which is exactly the normalization the
/// propagation contract asks the boundary to perform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicNode {
    /// Unique identity within the roadmap's tree.
    pub id: TopicId,
    /// Display label. Not semantically relevant to any derivation.
    pub title: String,
    /// Current status. Output of propagation; seed value on leaves only.
    pub status: TopicStatus,
    /// Ordered children. Empty for leaves.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TopicNode>,
}

impl TopicNode {
    /// Creates a leaf topic with the given seed status.
    pub fn leaf(id: impl Into<String>, title: impl Into<String>, status: TopicStatus) -> Self {
        TopicNode {
            id: TopicId::new(id),
            title: title.into(),
            status,
            children: Vec::new(),
        }
    }

    /// Creates a group topic. The group's status is derived on propagation;
    /// the seed value here is only what renders before the first pass.
    pub fn group(
        id: impl Into<String>,
        title: impl Into<String>,
        status: TopicStatus,
        children: Vec<TopicNode>,
    ) -> Self {
        TopicNode {
            id: TopicId::new(id),
            title: title.into(),
            status,
            children,
        }
    }

    /// Returns `true` if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of leaf topics in this node's subtree (1 for a leaf).
    pub fn leaf_count(&self) -> u32 {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(TopicNode::leaf_count).sum()
        }
    }

    /// Depth-first search for a node by ID within this subtree.
    pub fn find(&self, id: &TopicId) -> Option<&TopicNode> {
        if &self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}

/// Number of leaf topics across a forest.
pub fn count_leaf_topics(nodes: &[TopicNode]) -> u32 {
    nodes.iter().map(TopicNode::leaf_count).sum()
}

/// Validates the structural invariants a forest must satisfy before it
/// enters the store: non-empty IDs, no duplicate IDs anywhere in the forest.
///
/// The derivation engine assumes these hold and does not re-check them.
pub fn validate_forest(nodes: &[TopicNode]) -> Result<(), CoreError> {
    let mut seen: HashSet<&TopicId> = HashSet::new();
    let mut stack: Vec<&TopicNode> = nodes.iter().collect();

    while let Some(node) = stack.pop() {
        if node.id.as_str().is_empty() {
            return Err(CoreError::EmptyTopicId {
                title: node.title.clone(),
            });
        }
        if !seen.insert(&node.id) {
            return Err(CoreError::DuplicateTopicId {
                id: node.id.clone(),
            });
        }
        stack.extend(node.children.iter());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_forest() -> Vec<TopicNode> {
        vec![TopicNode::group(
            "a",
            "A",
            TopicStatus::NotStarted,
            vec![
                TopicNode::leaf("b", "B", TopicStatus::NotStarted),
                TopicNode::group(
                    "c",
                    "C",
                    TopicStatus::NotStarted,
                    vec![
                        TopicNode::leaf("d", "D", TopicStatus::NotStarted),
                        TopicNode::leaf("e", "E", TopicStatus::Locked),
                    ],
                ),
            ],
        )]
    }

    #[test]
    fn leaf_and_group_predicates() {
        let forest = sample_forest();
        assert!(!forest[0].is_leaf());
        assert!(forest[0].children[0].is_leaf());
    }

    #[test]
    fn leaf_count_ignores_groups() {
        let forest = sample_forest();
        assert_eq!(count_leaf_topics(&forest), 3);
        assert_eq!(forest[0].leaf_count(), 3);
    }

    #[test]
    fn find_walks_nested_children() {
        let forest = sample_forest();
        let found = forest[0].find(&TopicId::new("e")).unwrap();
        assert_eq!(found.title, "E");
        assert!(forest[0].find(&TopicId::new("missing")).is_none());
    }

    #[test]
    fn validate_accepts_well_formed_forest() {
        assert!(validate_forest(&sample_forest()).is_ok());
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let forest = vec![
            TopicNode::leaf("x", "X", TopicStatus::NotStarted),
            TopicNode::leaf("x", "X again", TopicStatus::NotStarted),
        ];
        match validate_forest(&forest) {
            Err(CoreError::DuplicateTopicId { id }) => assert_eq!(id.as_str(), "x"),
            other => panic!("expected DuplicateTopicId, got {:?}", other),
        }
    }

    #[test]
    fn validate_rejects_empty_id() {
        let forest = vec![TopicNode::leaf("", "Unnamed", TopicStatus::NotStarted)];
        assert!(matches!(
            validate_forest(&forest),
            Err(CoreError::EmptyTopicId { .. })
        ));
    }

    #[test]
    fn status_round_trips_snake_case() {
        let json = serde_json::to_string(&TopicStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        let back: TopicStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TopicStatus::InProgress);
    }

    #[test]
    fn serde_roundtrip_tree_preserves_shape_and_order() {
        let forest = sample_forest();
        let json = serde_json::to_string(&forest).unwrap();
        let back: Vec<TopicNode> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, forest);
    }

    #[test]
    fn leaf_serializes_without_children_field() {
        let leaf = TopicNode::leaf("b", "B", TopicStatus::Completed);
        let json = serde_json::to_string(&leaf).unwrap();
        assert!(!json.contains("children"));

        // A payload with the field absent deserializes as a leaf.
        let back: TopicNode = serde_json::from_str(&json).unwrap();
        assert!(back.is_leaf());
    }
}
