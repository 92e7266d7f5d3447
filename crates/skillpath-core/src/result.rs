//! Recorded outcomes of topic test attempts.

use serde::{Deserialize, Serialize};

/// The most recent recorded outcome of a learner's test attempt at a leaf
/// topic.
///
/// `passed` is the only field status propagation consumes. `score` semantics
/// are owned by whoever records the result (percent for topic tests, point
/// sums for assessments). `updated_at_ms` feeds activity derivation only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicResult {
    /// Caller-defined numeric score.
    pub score: f64,
    /// Whether the attempt passed.
    pub passed: bool,
    /// Recording time, milliseconds since the Unix epoch (UTC).
    pub updated_at_ms: u64,
}

impl TopicResult {
    /// Creates a result record.
    pub fn new(score: f64, passed: bool, updated_at_ms: u64) -> Self {
        TopicResult {
            score,
            passed,
            updated_at_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_roundtrip() {
        let result = TopicResult::new(85.0, true, 1_700_000_000_000);
        let json = serde_json::to_string(&result).unwrap();
        let back: TopicResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
