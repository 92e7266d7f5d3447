//! Daily practice tasks generated from a learner's unlocked topics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::id::{RoadmapId, TopicId};

/// One generated practice task for a calendar day.
///
/// Tasks are regenerated deterministically per date, so `id` embeds both the
/// date and the topic and stays stable across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTask {
    /// Stable identity: `daily-<date>-<topic-id>`.
    pub id: String,
    /// The day this task belongs to.
    pub date: NaiveDate,
    /// Roadmap the topic was drawn from.
    pub roadmap_id: RoadmapId,
    /// Roadmap title, denormalized for display.
    pub roadmap_title: String,
    /// Topic to practice.
    pub node_id: TopicId,
    /// Topic title, denormalized for display.
    pub node_title: String,
    /// Practice prompt.
    pub description: String,
    /// Points awarded on completion.
    pub points: u32,
    /// Whether the learner finished the task.
    pub completed: bool,
    /// Completion time, milliseconds since the Unix epoch. `None` while open.
    pub completed_at_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_roundtrip() {
        let task = DailyTask {
            id: "daily-2026-08-07-flexbox".into(),
            date: NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
            roadmap_id: RoadmapId::new("frontend"),
            roadmap_title: "Frontend Development".into(),
            node_id: TopicId::new("flexbox"),
            node_title: "Flexbox".into(),
            description: "Take the mini-test without hints.".into(),
            points: 10,
            completed: false,
            completed_at_ms: None,
        };
        let json = serde_json::to_string(&task).unwrap();
        let back: DailyTask = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }
}
