//! The [`ProgressStore`] trait defining the storage contract for learner
//! state.
//!
//! All backends (InMemoryStore, SqliteStore) implement this trait, ensuring
//! they are fully swappable without changing callers. The trait is
//! synchronous (not async) for simplicity in the current single-profile
//! design: the store models one learner, the way the original platform kept
//! one profile per browser.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use skillpath_core::{
    DailyTask, Roadmap, RoadmapAssessment, RoadmapId, RoadmapLevel, RoadmapProgress, TopicId,
    TopicNode, TopicResult,
};

use crate::error::StorageError;
use crate::types::RoadmapSummary;

/// The storage contract for skillpath learner state.
pub trait ProgressStore {
    // -------------------------------------------------------------------
    // Catalog: roadmaps, trees, assessments
    // -------------------------------------------------------------------

    /// Inserts a roadmap and its topic tree into the catalog.
    ///
    /// The tree is validated first ([`skillpath_core::validate_forest`]);
    /// inserting an ID that already exists is an error, not an upsert --
    /// the catalog is authored content, not learner state.
    fn insert_roadmap(&mut self, roadmap: &Roadmap, tree: &[TopicNode])
        -> Result<(), StorageError>;

    /// Retrieves a catalog roadmap by ID.
    fn get_roadmap(&self, id: &RoadmapId) -> Result<Roadmap, StorageError>;

    /// Retrieves the stored topic tree for a roadmap.
    ///
    /// The returned forest is the canonical (seeded) tree, not a propagated
    /// one; callers run propagation themselves.
    fn get_tree(&self, id: &RoadmapId) -> Result<Vec<TopicNode>, StorageError>;

    /// Lists the catalog in authored order, with topic counts.
    fn list_roadmaps(&self) -> Result<Vec<RoadmapSummary>, StorageError>;

    /// Attaches an entry assessment to its roadmap (replacing any previous
    /// one).
    fn insert_assessment(&mut self, assessment: &RoadmapAssessment) -> Result<(), StorageError>;

    /// Retrieves the entry assessment for a roadmap.
    fn get_assessment(&self, id: &RoadmapId) -> Result<RoadmapAssessment, StorageError>;

    // -------------------------------------------------------------------
    // Test results
    // -------------------------------------------------------------------

    /// Records (upserts) the most recent test result for a leaf topic.
    fn record_result(&mut self, topic: &TopicId, result: &TopicResult)
        -> Result<(), StorageError>;

    /// Retrieves the recorded result for a topic, if any.
    fn get_result(&self, topic: &TopicId) -> Result<Option<TopicResult>, StorageError>;

    /// All recorded results, sorted by topic ID.
    ///
    /// Sorted so downstream fingerprinting never depends on map iteration
    /// order.
    fn all_results(&self) -> Result<BTreeMap<TopicId, TopicResult>, StorageError>;

    // -------------------------------------------------------------------
    // Learner collection
    // -------------------------------------------------------------------

    /// The learner's roadmap collection, in insertion order.
    fn collection(&self) -> Result<Vec<RoadmapId>, StorageError>;

    /// Replaces the collection, deduplicating while preserving first
    /// occurrence. Returns the stored collection.
    fn set_collection(&mut self, ids: &[RoadmapId]) -> Result<Vec<RoadmapId>, StorageError>;

    /// Removes one roadmap from the collection, along with its placement
    /// level and cached progress. Returns the remaining collection.
    fn remove_from_collection(&mut self, id: &RoadmapId) -> Result<Vec<RoadmapId>, StorageError>;

    /// Records the learner's placement level for a roadmap.
    fn set_level(&mut self, id: &RoadmapId, level: RoadmapLevel) -> Result<(), StorageError>;

    /// Retrieves the learner's placement level for a roadmap, if any.
    fn get_level(&self, id: &RoadmapId) -> Result<Option<RoadmapLevel>, StorageError>;

    // -------------------------------------------------------------------
    // Cached completion summaries
    // -------------------------------------------------------------------

    /// Inserts or replaces the cached completion summary for a roadmap.
    fn upsert_progress(&mut self, progress: &RoadmapProgress) -> Result<(), StorageError>;

    /// Retrieves the cached completion summary, if any.
    fn get_progress(&self, id: &RoadmapId) -> Result<Option<RoadmapProgress>, StorageError>;

    /// All cached summaries, in catalog order.
    fn list_progress(&self) -> Result<Vec<RoadmapProgress>, StorageError>;

    // -------------------------------------------------------------------
    // Daily tasks
    // -------------------------------------------------------------------

    /// Replaces the stored task set for a date.
    fn save_daily_tasks(&mut self, date: NaiveDate, tasks: &[DailyTask])
        -> Result<(), StorageError>;

    /// Retrieves the stored task set for a date (empty if none generated).
    fn daily_tasks(&self, date: NaiveDate) -> Result<Vec<DailyTask>, StorageError>;

    /// Marks a task completed, stamping the completion time. Returns the
    /// updated task.
    fn complete_daily_task(
        &mut self,
        task_id: &str,
        completed_at_ms: u64,
    ) -> Result<DailyTask, StorageError>;

    // -------------------------------------------------------------------
    // State fingerprints
    // -------------------------------------------------------------------

    /// Fingerprints recorded at the last progress refresh, by roadmap.
    fn fingerprints(&self) -> Result<HashMap<RoadmapId, String>, StorageError>;

    /// Records the fingerprint for a roadmap.
    fn set_fingerprint(&mut self, id: &RoadmapId, fingerprint: &str) -> Result<(), StorageError>;
}
