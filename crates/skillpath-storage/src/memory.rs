//! In-memory implementation of [`ProgressStore`].
//!
//! [`InMemoryStore`] is a first-class backend for tests and ephemeral demo
//! sessions. It stores all data in maps with identical semantics to the
//! SQLite backend. The catalog uses an [`IndexMap`] because catalog order is
//! semantic -- listings render roadmaps in authored order.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use indexmap::IndexMap;

use skillpath_core::{
    count_leaf_topics, validate_forest, DailyTask, Roadmap, RoadmapAssessment, RoadmapId,
    RoadmapLevel, RoadmapProgress, TopicId, TopicNode, TopicResult,
};

use crate::error::StorageError;
use crate::traits::ProgressStore;
use crate::types::RoadmapSummary;

/// Data stored for a single catalog roadmap.
#[derive(Debug, Clone)]
struct StoredRoadmap {
    roadmap: Roadmap,
    tree: Vec<TopicNode>,
    assessment: Option<RoadmapAssessment>,
}

/// Map-backed implementation of [`ProgressStore`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    /// Catalog in authored order.
    catalog: IndexMap<RoadmapId, StoredRoadmap>,
    /// Recorded results, sorted by topic ID.
    results: BTreeMap<TopicId, TopicResult>,
    /// Learner collection, in insertion order.
    collection: Vec<RoadmapId>,
    /// Placement levels by roadmap.
    levels: HashMap<RoadmapId, RoadmapLevel>,
    /// Cached completion summaries by roadmap.
    progress: HashMap<RoadmapId, RoadmapProgress>,
    /// Generated daily tasks by date.
    daily: HashMap<NaiveDate, Vec<DailyTask>>,
    /// Fingerprints recorded at the last progress refresh.
    fingerprints: HashMap<RoadmapId, String>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        InMemoryStore::default()
    }

    fn stored(&self, id: &RoadmapId) -> Result<&StoredRoadmap, StorageError> {
        self.catalog
            .get(id)
            .ok_or_else(|| StorageError::RoadmapNotFound { id: id.clone() })
    }
}

impl ProgressStore for InMemoryStore {
    fn insert_roadmap(
        &mut self,
        roadmap: &Roadmap,
        tree: &[TopicNode],
    ) -> Result<(), StorageError> {
        validate_forest(tree)?;
        if self.catalog.contains_key(&roadmap.id) {
            return Err(StorageError::DuplicateRoadmap {
                id: roadmap.id.clone(),
            });
        }

        self.catalog.insert(
            roadmap.id.clone(),
            StoredRoadmap {
                roadmap: roadmap.clone(),
                tree: tree.to_vec(),
                assessment: None,
            },
        );
        Ok(())
    }

    fn get_roadmap(&self, id: &RoadmapId) -> Result<Roadmap, StorageError> {
        Ok(self.stored(id)?.roadmap.clone())
    }

    fn get_tree(&self, id: &RoadmapId) -> Result<Vec<TopicNode>, StorageError> {
        Ok(self.stored(id)?.tree.clone())
    }

    fn list_roadmaps(&self) -> Result<Vec<RoadmapSummary>, StorageError> {
        Ok(self
            .catalog
            .values()
            .map(|stored| RoadmapSummary {
                id: stored.roadmap.id.clone(),
                title: stored.roadmap.title.clone(),
                level: stored.roadmap.level,
                recommended: stored.roadmap.recommended,
                total_topics: count_leaf_topics(&stored.tree),
            })
            .collect())
    }

    fn insert_assessment(&mut self, assessment: &RoadmapAssessment) -> Result<(), StorageError> {
        let stored = self
            .catalog
            .get_mut(&assessment.roadmap_id)
            .ok_or_else(|| StorageError::RoadmapNotFound {
                id: assessment.roadmap_id.clone(),
            })?;
        stored.assessment = Some(assessment.clone());
        Ok(())
    }

    fn get_assessment(&self, id: &RoadmapId) -> Result<RoadmapAssessment, StorageError> {
        self.stored(id)?
            .assessment
            .clone()
            .ok_or_else(|| StorageError::AssessmentNotFound { id: id.clone() })
    }

    fn record_result(
        &mut self,
        topic: &TopicId,
        result: &TopicResult,
    ) -> Result<(), StorageError> {
        self.results.insert(topic.clone(), result.clone());
        Ok(())
    }

    fn get_result(&self, topic: &TopicId) -> Result<Option<TopicResult>, StorageError> {
        Ok(self.results.get(topic).cloned())
    }

    fn all_results(&self) -> Result<BTreeMap<TopicId, TopicResult>, StorageError> {
        Ok(self.results.clone())
    }

    fn collection(&self) -> Result<Vec<RoadmapId>, StorageError> {
        Ok(self.collection.clone())
    }

    fn set_collection(&mut self, ids: &[RoadmapId]) -> Result<Vec<RoadmapId>, StorageError> {
        let mut deduped: Vec<RoadmapId> = Vec::new();
        for id in ids {
            if !deduped.contains(id) {
                deduped.push(id.clone());
            }
        }
        self.collection = deduped;
        Ok(self.collection.clone())
    }

    fn remove_from_collection(&mut self, id: &RoadmapId) -> Result<Vec<RoadmapId>, StorageError> {
        self.collection.retain(|existing| existing != id);
        self.levels.remove(id);
        self.progress.remove(id);
        Ok(self.collection.clone())
    }

    fn set_level(&mut self, id: &RoadmapId, level: RoadmapLevel) -> Result<(), StorageError> {
        self.levels.insert(id.clone(), level);
        Ok(())
    }

    fn get_level(&self, id: &RoadmapId) -> Result<Option<RoadmapLevel>, StorageError> {
        Ok(self.levels.get(id).copied())
    }

    fn upsert_progress(&mut self, progress: &RoadmapProgress) -> Result<(), StorageError> {
        self.progress
            .insert(progress.roadmap_id.clone(), progress.clone());
        Ok(())
    }

    fn get_progress(&self, id: &RoadmapId) -> Result<Option<RoadmapProgress>, StorageError> {
        Ok(self.progress.get(id).cloned())
    }

    fn list_progress(&self) -> Result<Vec<RoadmapProgress>, StorageError> {
        // Catalog order keeps listings deterministic.
        Ok(self
            .catalog
            .keys()
            .filter_map(|id| self.progress.get(id).cloned())
            .collect())
    }

    fn save_daily_tasks(
        &mut self,
        date: NaiveDate,
        tasks: &[DailyTask],
    ) -> Result<(), StorageError> {
        self.daily.insert(date, tasks.to_vec());
        Ok(())
    }

    fn daily_tasks(&self, date: NaiveDate) -> Result<Vec<DailyTask>, StorageError> {
        Ok(self.daily.get(&date).cloned().unwrap_or_default())
    }

    fn complete_daily_task(
        &mut self,
        task_id: &str,
        completed_at_ms: u64,
    ) -> Result<DailyTask, StorageError> {
        for tasks in self.daily.values_mut() {
            if let Some(task) = tasks.iter_mut().find(|task| task.id == task_id) {
                task.completed = true;
                task.completed_at_ms = Some(completed_at_ms);
                return Ok(task.clone());
            }
        }
        Err(StorageError::TaskNotFound {
            id: task_id.to_string(),
        })
    }

    fn fingerprints(&self) -> Result<HashMap<RoadmapId, String>, StorageError> {
        Ok(self.fingerprints.clone())
    }

    fn set_fingerprint(&mut self, id: &RoadmapId, fingerprint: &str) -> Result<(), StorageError> {
        self.fingerprints
            .insert(id.clone(), fingerprint.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillpath_core::{RoadmapLevel, TopicStatus};

    fn roadmap(id: &str) -> Roadmap {
        Roadmap {
            id: RoadmapId::new(id),
            title: id.to_uppercase(),
            description: String::new(),
            level: RoadmapLevel::Beginner,
            recommended: false,
        }
    }

    fn tree() -> Vec<TopicNode> {
        vec![
            TopicNode::leaf("first", "First", TopicStatus::NotStarted),
            TopicNode::leaf("second", "Second", TopicStatus::NotStarted),
        ]
    }

    #[test]
    fn catalog_round_trip_preserves_order() {
        let mut store = InMemoryStore::new();
        store.insert_roadmap(&roadmap("b"), &tree()).unwrap();
        store.insert_roadmap(&roadmap("a"), &tree()).unwrap();

        let listed = store.list_roadmaps().unwrap();
        let ids: Vec<&str> = listed.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(listed[0].total_topics, 2);
    }

    #[test]
    fn duplicate_roadmap_is_rejected() {
        let mut store = InMemoryStore::new();
        store.insert_roadmap(&roadmap("a"), &tree()).unwrap();
        assert!(matches!(
            store.insert_roadmap(&roadmap("a"), &tree()),
            Err(StorageError::DuplicateRoadmap { .. })
        ));
    }

    #[test]
    fn invalid_tree_is_rejected_at_the_boundary() {
        let mut store = InMemoryStore::new();
        let bad = vec![
            TopicNode::leaf("x", "X", TopicStatus::NotStarted),
            TopicNode::leaf("x", "X", TopicStatus::NotStarted),
        ];
        assert!(matches!(
            store.insert_roadmap(&roadmap("a"), &bad),
            Err(StorageError::InvalidTree(_))
        ));
    }

    #[test]
    fn record_result_upserts() {
        let mut store = InMemoryStore::new();
        let topic = TopicId::new("first");
        store
            .record_result(&topic, &TopicResult::new(40.0, false, 1))
            .unwrap();
        store
            .record_result(&topic, &TopicResult::new(90.0, true, 2))
            .unwrap();

        let result = store.get_result(&topic).unwrap().unwrap();
        assert!(result.passed);
        assert_eq!(result.updated_at_ms, 2);
        assert_eq!(store.all_results().unwrap().len(), 1);
    }

    #[test]
    fn set_collection_dedups_preserving_first_occurrence() {
        let mut store = InMemoryStore::new();
        let ids = [
            RoadmapId::new("ai"),
            RoadmapId::new("frontend"),
            RoadmapId::new("ai"),
        ];
        let stored = store.set_collection(&ids).unwrap();
        let as_str: Vec<&str> = stored.iter().map(RoadmapId::as_str).collect();
        assert_eq!(as_str, ["ai", "frontend"]);
    }

    #[test]
    fn remove_from_collection_clears_level_and_progress() {
        let mut store = InMemoryStore::new();
        let id = RoadmapId::new("ai");
        store.set_collection(std::slice::from_ref(&id)).unwrap();
        store.set_level(&id, RoadmapLevel::Advanced).unwrap();
        store
            .upsert_progress(&RoadmapProgress {
                roadmap_id: id.clone(),
                completion_percent: 50,
                completed_topics: 1,
                total_topics: 2,
            })
            .unwrap();

        let remaining = store.remove_from_collection(&id).unwrap();
        assert!(remaining.is_empty());
        assert!(store.get_level(&id).unwrap().is_none());
        assert!(store.get_progress(&id).unwrap().is_none());
    }

    #[test]
    fn complete_daily_task_stamps_time() {
        let mut store = InMemoryStore::new();
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let task = DailyTask {
            id: "daily-2026-08-07-first".into(),
            date,
            roadmap_id: RoadmapId::new("ai"),
            roadmap_title: "AI".into(),
            node_id: TopicId::new("first"),
            node_title: "First".into(),
            description: "Practice".into(),
            points: 10,
            completed: false,
            completed_at_ms: None,
        };
        store.save_daily_tasks(date, &[task]).unwrap();

        let updated = store
            .complete_daily_task("daily-2026-08-07-first", 1_700_000_000_000)
            .unwrap();
        assert!(updated.completed);
        assert_eq!(updated.completed_at_ms, Some(1_700_000_000_000));

        let reloaded = store.daily_tasks(date).unwrap();
        assert!(reloaded[0].completed);
    }

    #[test]
    fn completing_unknown_task_errors() {
        let mut store = InMemoryStore::new();
        assert!(matches!(
            store.complete_daily_task("missing", 0),
            Err(StorageError::TaskNotFound { .. })
        ));
    }
}
