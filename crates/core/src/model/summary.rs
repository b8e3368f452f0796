use crate::model::AttemptRecord;

/// How many attempts the dashboard lists under "recent".
pub const RECENT_ATTEMPTS_LIMIT: usize = 5;

/// Dashboard statistics derived from the user's attempt history.
///
/// Recomputed from scratch on every fetch; nothing is cached between fetches.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttemptSummary {
    total_attempts: usize,
    average_score: f64,
    best_score: f64,
    recent_attempts: Vec<AttemptRecord>,
}

impl AttemptSummary {
    /// Aggregate a list of attempts as delivered by the backend.
    ///
    /// The input is expected newest-first and is not re-sorted: `recent_attempts` is the
    /// first [`RECENT_ATTEMPTS_LIMIT`] records in the order received. Average and best are
    /// `0.0` for an empty list.
    #[must_use]
    pub fn from_attempts(attempts: &[AttemptRecord]) -> Self {
        let total_attempts = attempts.len();
        if total_attempts == 0 {
            return Self::default();
        }

        let mut sum = 0.0_f64;
        let mut best = f64::MIN;
        for attempt in attempts {
            sum += attempt.percentage();
            best = best.max(attempt.percentage());
        }

        #[allow(clippy::cast_precision_loss)]
        let average_score = sum / total_attempts as f64;

        Self {
            total_attempts,
            average_score,
            best_score: best,
            recent_attempts: attempts
                .iter()
                .take(RECENT_ATTEMPTS_LIMIT)
                .cloned()
                .collect(),
        }
    }

    #[must_use]
    pub fn total_attempts(&self) -> usize {
        self.total_attempts
    }

    #[must_use]
    pub fn average_score(&self) -> f64 {
        self.average_score
    }

    #[must_use]
    pub fn best_score(&self) -> f64 {
        self.best_score
    }

    #[must_use]
    pub fn recent_attempts(&self) -> &[AttemptRecord] {
        &self.recent_attempts
    }
}
