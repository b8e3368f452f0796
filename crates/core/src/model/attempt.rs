use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{AttemptId, TestId};

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum AttemptError {
    #[error("percentage {0} is outside 0..=100")]
    PercentageOutOfRange(f64),

    #[error("score {score} exceeds total questions {total}")]
    ScoreExceedsTotal { score: u32, total: u32 },
}

/// One completed run of a test by the current user.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptRecord {
    id: AttemptId,
    test_id: TestId,
    score: u32,
    total_questions: u32,
    percentage: f64,
    completed_at: DateTime<Utc>,
}

impl AttemptRecord {
    /// Build a record from backend-supplied values.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::PercentageOutOfRange` if `percentage` is not within `[0, 100]`
    /// (NaN included). Returns `AttemptError::ScoreExceedsTotal` if more questions were
    /// answered correctly than the test contains.
    pub fn new(
        id: AttemptId,
        test_id: TestId,
        score: u32,
        total_questions: u32,
        percentage: f64,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, AttemptError> {
        if !(0.0..=100.0).contains(&percentage) {
            return Err(AttemptError::PercentageOutOfRange(percentage));
        }
        if score > total_questions {
            return Err(AttemptError::ScoreExceedsTotal {
                score,
                total: total_questions,
            });
        }

        Ok(Self {
            id,
            test_id,
            score,
            total_questions,
            percentage,
            completed_at,
        })
    }

    #[must_use]
    pub fn id(&self) -> &AttemptId {
        &self.id
    }

    #[must_use]
    pub fn test_id(&self) -> &TestId {
        &self.test_id
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}
