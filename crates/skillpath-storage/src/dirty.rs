//! Selective re-propagation via fingerprint comparison.
//!
//! Compares the fingerprints recorded at the last progress refresh with the
//! store's current state to determine which roadmaps actually need their
//! progress re-derived. Timestamp-only changes (re-recording the same
//! pass/fail outcome) do NOT mark a roadmap dirty because timestamps are
//! excluded from fingerprinting.

use std::collections::{HashMap, HashSet};

use skillpath_core::RoadmapId;

use crate::error::StorageError;
use crate::hash::roadmap_fingerprint;
use crate::traits::ProgressStore;

/// The set of roadmaps whose derived progress is stale.
///
/// Tracks three categories: new (no previous fingerprint), modified
/// (fingerprint changed), and removed (fingerprint recorded but the roadmap
/// is gone from the catalog).
#[derive(Debug, Clone)]
pub struct DirtySet {
    /// Roadmaps added since the last refresh.
    pub new: HashSet<RoadmapId>,
    /// Roadmaps whose tree or pass/fail results changed.
    pub modified: HashSet<RoadmapId>,
    /// Roadmaps that disappeared from the catalog.
    pub removed: HashSet<RoadmapId>,
}

impl DirtySet {
    /// Returns all roadmaps needing re-propagation (new + modified).
    pub fn needs_refresh(&self) -> HashSet<RoadmapId> {
        self.new.union(&self.modified).cloned().collect()
    }

    /// Returns true if nothing changed (empty dirty set).
    pub fn is_clean(&self) -> bool {
        self.new.is_empty() && self.modified.is_empty() && self.removed.is_empty()
    }

    /// Total count of dirty roadmaps (new + modified + removed).
    pub fn total(&self) -> usize {
        self.new.len() + self.modified.len() + self.removed.len()
    }
}

/// Computes the current fingerprint for every catalog roadmap.
pub fn current_fingerprints<S>(store: &S) -> Result<HashMap<RoadmapId, String>, StorageError>
where
    S: ProgressStore + ?Sized,
{
    let results = store.all_results()?;

    let mut fingerprints = HashMap::new();
    for summary in store.list_roadmaps()? {
        let tree = store.get_tree(&summary.id)?;
        fingerprints.insert(summary.id, roadmap_fingerprint(&tree, &results));
    }
    Ok(fingerprints)
}

/// Compute the dirty set by comparing previously recorded fingerprints
/// against the store's current state.
pub fn compute_dirty_set<S>(
    store: &S,
    previous: &HashMap<RoadmapId, String>,
) -> Result<DirtySet, StorageError>
where
    S: ProgressStore + ?Sized,
{
    let current = current_fingerprints(store)?;

    let mut new = HashSet::new();
    let mut modified = HashSet::new();
    let mut removed = HashSet::new();

    // Check current roadmaps against previous fingerprints
    for (id, fingerprint) in &current {
        match previous.get(id) {
            Some(prev) => {
                if prev != fingerprint {
                    modified.insert(id.clone());
                }
            }
            None => {
                new.insert(id.clone());
            }
        }
    }

    // Check for removed roadmaps
    for id in previous.keys() {
        if !current.contains_key(id) {
            removed.insert(id.clone());
        }
    }

    Ok(DirtySet {
        new,
        modified,
        removed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStore;
    use skillpath_core::{
        Roadmap, RoadmapLevel, TopicId, TopicNode, TopicResult, TopicStatus,
    };

    fn seeded_store() -> InMemoryStore {
        let mut store = InMemoryStore::new();
        for id in ["ai", "frontend"] {
            let roadmap = Roadmap {
                id: skillpath_core::RoadmapId::new(id),
                title: id.to_uppercase(),
                description: String::new(),
                level: RoadmapLevel::Beginner,
                recommended: false,
            };
            let tree = vec![
                TopicNode::leaf(format!("{}-one", id), "One", TopicStatus::NotStarted),
                TopicNode::leaf(format!("{}-two", id), "Two", TopicStatus::NotStarted),
            ];
            store.insert_roadmap(&roadmap, &tree).unwrap();
        }
        store
    }

    #[test]
    fn clean_when_nothing_changed() {
        let store = seeded_store();
        let previous = current_fingerprints(&store).unwrap();

        let dirty = compute_dirty_set(&store, &previous).unwrap();
        assert!(dirty.is_clean());
        assert_eq!(dirty.total(), 0);
        assert!(dirty.needs_refresh().is_empty());
    }

    #[test]
    fn every_roadmap_is_new_against_empty_history() {
        let store = seeded_store();
        let dirty = compute_dirty_set(&store, &HashMap::new()).unwrap();
        assert_eq!(dirty.new.len(), 2);
        assert!(dirty.modified.is_empty());
        assert!(dirty.removed.is_empty());
    }

    #[test]
    fn recording_a_result_dirties_only_its_roadmap() {
        let mut store = seeded_store();
        let previous = current_fingerprints(&store).unwrap();

        store
            .record_result(
                &TopicId::new("ai-one"),
                &TopicResult::new(90.0, true, 1_700_000_000_000),
            )
            .unwrap();

        let dirty = compute_dirty_set(&store, &previous).unwrap();
        assert_eq!(dirty.modified.len(), 1);
        assert!(dirty
            .modified
            .contains(&skillpath_core::RoadmapId::new("ai")));
        assert!(dirty.new.is_empty());
    }

    #[test]
    fn forgotten_roadmap_shows_as_removed() {
        let store = seeded_store();
        let mut previous = current_fingerprints(&store).unwrap();
        previous.insert(
            skillpath_core::RoadmapId::new("retired"),
            "0".repeat(64),
        );

        let dirty = compute_dirty_set(&store, &previous).unwrap();
        assert_eq!(dirty.removed.len(), 1);
        assert!(dirty.new.is_empty());
        assert!(dirty.modified.is_empty());
    }
}
