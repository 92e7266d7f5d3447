//! Entry assessments: scored questionnaires used for level placement when a
//! learner adds a roadmap to their collection.

use serde::{Deserialize, Serialize};

use crate::id::RoadmapId;

/// One selectable answer with its contribution to the placement score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentOption {
    /// Identity within the question.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Points this option contributes.
    pub score: u32,
}

/// A single assessment question with its options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentQuestion {
    /// Identity within the assessment.
    pub id: String,
    /// Question text.
    pub text: String,
    /// Selectable answers, in authored order.
    pub options: Vec<AssessmentOption>,
}

impl AssessmentQuestion {
    /// Looks up an option by ID.
    pub fn option(&self, option_id: &str) -> Option<&AssessmentOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    /// Highest score any option of this question can contribute.
    pub fn max_score(&self) -> u32 {
        self.options.iter().map(|o| o.score).max().unwrap_or(0)
    }
}

/// The entry assessment attached to a roadmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapAssessment {
    /// The roadmap this assessment belongs to.
    pub roadmap_id: RoadmapId,
    /// Display title.
    pub title: String,
    /// Questions in authored order.
    pub questions: Vec<AssessmentQuestion>,
}

impl RoadmapAssessment {
    /// Looks up a question by ID.
    pub fn question(&self, question_id: &str) -> Option<&AssessmentQuestion> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    /// Highest total score the assessment can produce.
    pub fn max_score(&self) -> u32 {
        self.questions.iter().map(AssessmentQuestion::max_score).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RoadmapAssessment {
        let options = vec![
            AssessmentOption {
                id: "opt_beginner".into(),
                label: "I am just getting started".into(),
                score: 1,
            },
            AssessmentOption {
                id: "opt_advanced".into(),
                label: "I apply this in production".into(),
                score: 3,
            },
        ];
        RoadmapAssessment {
            roadmap_id: RoadmapId::new("ai"),
            title: "AI assessment".into(),
            questions: vec![
                AssessmentQuestion {
                    id: "ai_math".into(),
                    text: "How would you rate your math skills for ML?".into(),
                    options: options.clone(),
                },
                AssessmentQuestion {
                    id: "ai_models".into(),
                    text: "Do you have experience training models?".into(),
                    options,
                },
            ],
        }
    }

    #[test]
    fn option_lookup() {
        let assessment = sample();
        let question = assessment.question("ai_math").unwrap();
        assert_eq!(question.option("opt_advanced").unwrap().score, 3);
        assert!(question.option("missing").is_none());
    }

    #[test]
    fn max_score_sums_per_question_maxima() {
        assert_eq!(sample().max_score(), 6);
    }

    #[test]
    fn question_without_options_has_zero_max() {
        let question = AssessmentQuestion {
            id: "q".into(),
            text: "?".into(),
            options: Vec::new(),
        };
        assert_eq!(question.max_score(), 0);
    }
}
