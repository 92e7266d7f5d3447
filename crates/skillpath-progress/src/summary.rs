//! Completion summaries derived from propagated trees.

use skillpath_core::{count_leaf_topics, RoadmapId, RoadmapProgress, TopicNode, TopicStatus};

/// Number of leaf topics with `completed` status across a forest.
pub fn count_completed_leaves(nodes: &[TopicNode]) -> u32 {
    nodes
        .iter()
        .map(|node| {
            if node.is_leaf() {
                u32::from(node.status == TopicStatus::Completed)
            } else {
                count_completed_leaves(&node.children)
            }
        })
        .sum()
}

/// Builds the completion summary for one roadmap from its propagated forest.
///
/// Only leaves count: groups are organizational and their derived statuses
/// would double-count progress. An empty tree reports 0%.
pub fn roadmap_progress(roadmap_id: RoadmapId, propagated: &[TopicNode]) -> RoadmapProgress {
    let total_topics = count_leaf_topics(propagated);
    let completed_topics = count_completed_leaves(propagated);

    let completion_percent = if total_topics == 0 {
        0
    } else {
        (f64::from(completed_topics) * 100.0 / f64::from(total_topics)).round() as u8
    };

    RoadmapProgress {
        roadmap_id,
        completion_percent,
        completed_topics,
        total_topics,
    }
}

/// Rounded mean completion percent across summaries; 0 when empty.
pub fn average_progress(items: &[RoadmapProgress]) -> u8 {
    if items.is_empty() {
        return 0;
    }

    let sum: u32 = items.iter().map(|p| u32::from(p.completion_percent)).sum();
    (f64::from(sum) / items.len() as f64).round() as u8
}
