pub mod assessment;
pub mod daily;
pub mod error;
pub mod id;
pub mod progress;
pub mod result;
pub mod roadmap;
pub mod topic;

// Re-export commonly used types
pub use assessment::{AssessmentOption, AssessmentQuestion, RoadmapAssessment};
pub use daily::DailyTask;
pub use error::CoreError;
pub use id::{RoadmapId, TopicId};
pub use progress::RoadmapProgress;
pub use result::TopicResult;
pub use roadmap::{Roadmap, RoadmapLevel};
pub use topic::{count_leaf_topics, validate_forest, TopicNode, TopicStatus};
