//! Deterministic fingerprints of propagation inputs using blake3.
//!
//! A roadmap's derived progress depends on exactly two things: its stored
//! tree (shape, order, seeded statuses) and the pass/fail signal of results
//! recorded for its leaves. The fingerprint covers precisely those inputs,
//! so callers can skip re-propagation when it is unchanged.
//!
//! # Determinism
//!
//! - Trees serialize via `serde_json::to_vec` in declaration order
//!   (`TopicNode` contains only ordered `Vec`s, no maps).
//! - Results arrive in a `BTreeMap`, already sorted by topic ID; an
//!   unordered map is never iterated for hash-affecting work.
//! - Scores and timestamps are excluded: they do not feed propagation, so
//!   re-recording the same pass/fail outcome does not dirty the roadmap.

use std::collections::{BTreeMap, HashSet};

use skillpath_core::{TopicId, TopicNode, TopicResult};

/// Collects every node ID in the forest (groups included -- an empty-children
/// group is a leaf for lookup purposes).
fn collect_ids<'a>(nodes: &'a [TopicNode], into: &mut HashSet<&'a TopicId>) {
    for node in nodes {
        into.insert(&node.id);
        collect_ids(&node.children, into);
    }
}

/// Computes the fingerprint of one roadmap's propagation inputs.
///
/// `results` may span the whole store; only entries whose topic belongs to
/// this forest contribute, so recording a result for another roadmap never
/// changes this roadmap's fingerprint.
pub fn roadmap_fingerprint(
    nodes: &[TopicNode],
    results: &BTreeMap<TopicId, TopicResult>,
) -> String {
    let mut hasher = blake3::Hasher::new();

    for node in nodes {
        let bytes =
            serde_json::to_vec(node).expect("TopicNode serialization should never fail");
        hasher.update(&bytes);
    }

    let mut ids = HashSet::new();
    collect_ids(nodes, &mut ids);

    for (topic, result) in results {
        if !ids.contains(topic) {
            continue;
        }
        hasher.update(topic.as_str().as_bytes());
        hasher.update(&[u8::from(result.passed)]);
    }

    hasher.finalize().to_hex().to_string()
}
