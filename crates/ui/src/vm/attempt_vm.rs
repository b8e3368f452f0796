use alphatest_core::model::{AttemptRecord, AttemptSummary, TestId};
use services::TestOverview;

use crate::vm::time_fmt::{format_datetime, format_percentage};

/// Abbreviated test label: the first eight characters followed by `...`.
#[must_use]
pub fn short_test_label(test_id: &TestId) -> String {
    format!("{}...", test_id.short())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptRowVm {
    pub id: String,
    pub test_label: String,
    pub completed_at_str: String,
    pub percentage_str: String,
    pub score_str: String,
}

impl From<&AttemptRecord> for AttemptRowVm {
    fn from(attempt: &AttemptRecord) -> Self {
        Self {
            id: attempt.id().to_string(),
            test_label: short_test_label(attempt.test_id()),
            completed_at_str: format_datetime(attempt.completed_at()),
            percentage_str: format_percentage(attempt.percentage()),
            score_str: format!("{}/{}", attempt.score(), attempt.total_questions()),
        }
    }
}

/// Three stat cards plus a list of attempt rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptStatsVm {
    pub total_attempts: usize,
    pub average_str: String,
    pub best_str: String,
    pub rows: Vec<AttemptRowVm>,
}

impl AttemptStatsVm {
    /// Stats with the summary's recent attempts as rows.
    #[must_use]
    pub fn recent(summary: &AttemptSummary) -> Self {
        Self::with_rows(summary, summary.recent_attempts())
    }

    /// Stats with every given attempt as a row.
    #[must_use]
    pub fn with_rows(summary: &AttemptSummary, attempts: &[AttemptRecord]) -> Self {
        Self {
            total_attempts: summary.total_attempts(),
            average_str: format_percentage(summary.average_score()),
            best_str: format_percentage(summary.best_score()),
            rows: attempts.iter().map(AttemptRowVm::from).collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestOverviewVm {
    pub test_id: String,
    pub test_label: String,
    pub attempts: usize,
    pub best_str: String,
    pub last_completed_str: String,
}

impl From<&TestOverview> for TestOverviewVm {
    fn from(overview: &TestOverview) -> Self {
        Self {
            test_id: overview.test_id.to_string(),
            test_label: short_test_label(&overview.test_id),
            attempts: overview.attempts,
            best_str: format_percentage(overview.best_score),
            last_completed_str: format_datetime(overview.last_completed_at),
        }
    }
}

#[must_use]
pub fn map_test_overviews(items: &[TestOverview]) -> Vec<TestOverviewVm> {
    items.iter().map(TestOverviewVm::from).collect()
}
