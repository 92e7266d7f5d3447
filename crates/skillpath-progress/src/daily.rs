//! Deterministic daily practice task generation.
//!
//! Each calendar day gets up to [`TASKS_PER_DAY`] tasks drawn from the
//! learner's propagated trees. Selection is a seeded Fisher-Yates shuffle
//! keyed by the date, so regenerating the same day always yields the same
//! tasks -- determinism is the contract, persistence is just a cache.

use chrono::NaiveDate;

use skillpath_core::{DailyTask, Roadmap, RoadmapId, TopicId, TopicNode, TopicStatus};

/// Maximum number of tasks generated per day.
pub const TASKS_PER_DAY: usize = 3;

/// Points awarded for completing a daily task.
pub const DAILY_TASK_POINTS: u32 = 10;

const PRACTICE_PROMPTS: [&str; 3] = [
    "Take the mini-test and note the questions you found hard.",
    "Review your mistakes after the test and revisit the key concepts.",
    "Set a time limit and take the test without any hints.",
];

/// A topic eligible for daily practice, with display context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeTopic {
    pub roadmap_id: RoadmapId,
    pub roadmap_title: String,
    pub node_id: TopicId,
    pub node_title: String,
}

/// Collects practicable topics from a propagated forest.
///
/// Locked nodes are skipped outright. A group contributes its practicable
/// descendants; a group whose descendants are all locked contributes itself
/// (there is still content to review at the group level). Leaves contribute
/// themselves.
pub fn collect_practice_topics(roadmap: &Roadmap, nodes: &[TopicNode]) -> Vec<PracticeTopic> {
    nodes
        .iter()
        .flat_map(|node| {
            if node.status == TopicStatus::Locked {
                return Vec::new();
            }

            if !node.is_leaf() {
                let nested = collect_practice_topics(roadmap, &node.children);
                if !nested.is_empty() {
                    return nested;
                }
            }

            vec![PracticeTopic {
                roadmap_id: roadmap.id.clone(),
                roadmap_title: roadmap.title.clone(),
                node_id: node.id.clone(),
                node_title: node.title.clone(),
            }]
        })
        .collect()
}

/// Generates the task set for `date` from the learner's propagated trees.
///
/// `sources` pairs each collection roadmap with its propagated forest. The
/// result is stable for a given date and input set.
pub fn generate_daily_tasks(
    date: NaiveDate,
    sources: &[(Roadmap, Vec<TopicNode>)],
) -> Vec<DailyTask> {
    let topics: Vec<PracticeTopic> = sources
        .iter()
        .flat_map(|(roadmap, forest)| collect_practice_topics(roadmap, forest))
        .collect();

    let seed = date.to_string();
    let picked = pick_distinct(topics, TASKS_PER_DAY, &seed);

    picked
        .into_iter()
        .map(|topic| {
            let prompt_index = (hash_to_u64(topic.node_id.as_str()) % 3) as usize;
            DailyTask {
                id: format!("daily-{}-{}", date, topic.node_id),
                date,
                roadmap_id: topic.roadmap_id,
                roadmap_title: topic.roadmap_title,
                node_id: topic.node_id,
                node_title: topic.node_title,
                description: PRACTICE_PROMPTS[prompt_index].to_string(),
                points: DAILY_TASK_POINTS,
                completed: false,
                completed_at_ms: None,
            }
        })
        .collect()
}

/// First 8 bytes of the blake3 digest as a little-endian u64.
fn hash_to_u64(input: &str) -> u64 {
    let digest = blake3::hash(input.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}

/// Seeded Fisher-Yates: swap indices come from blake3 of `seed:index`, so
/// the permutation depends only on the seed and the list length.
fn deterministic_shuffle<T>(mut items: Vec<T>, seed: &str) -> Vec<T> {
    for index in (1..items.len()).rev() {
        let swap = (hash_to_u64(&format!("{}:{}", seed, index)) % (index as u64 + 1)) as usize;
        items.swap(index, swap);
    }
    items
}

fn pick_distinct<T>(items: Vec<T>, count: usize, seed: &str) -> Vec<T> {
    let mut shuffled = deterministic_shuffle(items, seed);
    shuffled.truncate(count);
    shuffled
}
