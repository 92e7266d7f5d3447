//! Entry-assessment grading and level placement.
//!
//! Grading sums the scores of the chosen options and places the learner by
//! the mean score per question. With the catalog's 1-3 option scale this
//! splits the range into terciles: mean <= 1.5 is Beginner, mean < 2.5 is
//! Intermediate, anything above is Advanced.

use thiserror::Error;

use skillpath_core::{RoadmapAssessment, RoadmapLevel};

/// Errors produced while grading an assessment submission.
#[derive(Debug, Error)]
pub enum AssessmentError {
    /// The assessment has no questions to grade.
    #[error("assessment '{roadmap}' has no questions")]
    EmptyAssessment { roadmap: String },

    /// An answer referenced a question the assessment does not contain.
    #[error("unknown question: '{id}'")]
    UnknownQuestion { id: String },

    /// An answer chose an option the question does not offer.
    #[error("unknown option '{option}' for question '{question}'")]
    UnknownOption { question: String, option: String },

    /// A question was left unanswered.
    #[error("missing answer for question '{id}'")]
    MissingAnswer { id: String },
}

/// The graded outcome of an assessment submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentOutcome {
    /// Sum of the chosen options' scores.
    pub score: u32,
    /// Highest achievable total for this assessment.
    pub max_score: u32,
    /// Placement derived from the mean score per question.
    pub level: RoadmapLevel,
}

/// Grades a submission given as `(question_id, option_id)` pairs.
///
/// Every question must be answered exactly once; answers for unknown
/// questions or options are rejected rather than ignored.
pub fn grade_assessment(
    assessment: &RoadmapAssessment,
    answers: &[(String, String)],
) -> Result<AssessmentOutcome, AssessmentError> {
    if assessment.questions.is_empty() {
        return Err(AssessmentError::EmptyAssessment {
            roadmap: assessment.roadmap_id.as_str().to_string(),
        });
    }

    for (question_id, _) in answers {
        if assessment.question(question_id).is_none() {
            return Err(AssessmentError::UnknownQuestion {
                id: question_id.clone(),
            });
        }
    }

    let mut score = 0;
    for question in &assessment.questions {
        let (_, option_id) = answers
            .iter()
            .find(|(question_id, _)| question_id == &question.id)
            .ok_or_else(|| AssessmentError::MissingAnswer {
                id: question.id.clone(),
            })?;

        let option = question
            .option(option_id)
            .ok_or_else(|| AssessmentError::UnknownOption {
                question: question.id.clone(),
                option: option_id.clone(),
            })?;

        score += option.score;
    }

    let mean = f64::from(score) / assessment.questions.len() as f64;
    let level = if mean <= 1.5 {
        RoadmapLevel::Beginner
    } else if mean < 2.5 {
        RoadmapLevel::Intermediate
    } else {
        RoadmapLevel::Advanced
    };

    Ok(AssessmentOutcome {
        score,
        max_score: assessment.max_score(),
        level,
    })
}
