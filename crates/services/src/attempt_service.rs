use std::sync::Arc;

use alphatest_core::model::{AttemptRecord, AttemptSummary, TestId};
use chrono::{DateTime, Utc};

use crate::backend::AttemptsApi;
use crate::error::{AttemptServiceError, GatewayError};
use crate::session_store::SessionStore;

/// Per-test overview for the tests page.
#[derive(Debug, Clone, PartialEq)]
pub struct TestOverview {
    pub test_id: TestId,
    pub attempts: usize,
    pub best_score: f64,
    pub last_completed_at: DateTime<Utc>,
}

/// Attempts for one test plus their aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct TestResults {
    pub test_id: TestId,
    pub attempts: Vec<AttemptRecord>,
    pub summary: AttemptSummary,
}

/// Fetches the user's attempts and derives the views the pages need.
///
/// Every call refetches; nothing is cached between calls.
#[derive(Clone)]
pub struct AttemptService {
    api: Arc<dyn AttemptsApi>,
    session: Arc<SessionStore>,
}

impl AttemptService {
    #[must_use]
    pub fn new(api: Arc<dyn AttemptsApi>, session: Arc<SessionStore>) -> Self {
        Self { api, session }
    }

    /// Fetch all attempts in backend order.
    ///
    /// A 401 means the credential expired: the session is cleared before returning.
    ///
    /// # Errors
    ///
    /// Returns `AttemptServiceError::SessionExpired` after a rejected credential and
    /// `AttemptServiceError::Gateway` for every other failure.
    pub async fn list(&self) -> Result<Vec<AttemptRecord>, AttemptServiceError> {
        match self.api.list_attempts().await {
            Ok(attempts) => Ok(attempts),
            Err(err) if err.is_unauthorized() => {
                tracing::warn!("attempt fetch rejected the credential; signing out");
                if let Err(err) = self.session.clear().await {
                    tracing::warn!(error = %err, "could not remove expired credential");
                }
                Err(AttemptServiceError::SessionExpired)
            }
            Err(err) => Err(log_failure(err).into()),
        }
    }

    /// Dashboard statistics over every attempt.
    ///
    /// # Errors
    ///
    /// See [`AttemptService::list`].
    pub async fn dashboard(&self) -> Result<AttemptSummary, AttemptServiceError> {
        let attempts = self.list().await?;
        Ok(AttemptSummary::from_attempts(&attempts))
    }

    /// Tests the user has attempted, in order of most recent attempt.
    ///
    /// # Errors
    ///
    /// See [`AttemptService::list`].
    pub async fn attempted_tests(&self) -> Result<Vec<TestOverview>, AttemptServiceError> {
        let attempts = self.list().await?;
        Ok(group_by_test(&attempts))
    }

    /// The user's attempts at one test and their aggregate.
    ///
    /// # Errors
    ///
    /// See [`AttemptService::list`].
    pub async fn results_for(&self, test_id: &TestId) -> Result<TestResults, AttemptServiceError> {
        let attempts: Vec<_> = self
            .list()
            .await?
            .into_iter()
            .filter(|attempt| attempt.test_id() == test_id)
            .collect();
        let summary = AttemptSummary::from_attempts(&attempts);
        Ok(TestResults {
            test_id: test_id.clone(),
            attempts,
            summary,
        })
    }
}

fn log_failure(err: GatewayError) -> GatewayError {
    tracing::warn!(error = %err, "attempt fetch failed");
    err
}

/// Group attempts by test, keeping first-seen order (backend order is newest first).
fn group_by_test(attempts: &[AttemptRecord]) -> Vec<TestOverview> {
    let mut overviews: Vec<TestOverview> = Vec::new();
    for attempt in attempts {
        match overviews
            .iter_mut()
            .find(|overview| &overview.test_id == attempt.test_id())
        {
            Some(overview) => {
                overview.attempts += 1;
                overview.best_score = overview.best_score.max(attempt.percentage());
            }
            None => overviews.push(TestOverview {
                test_id: attempt.test_id().clone(),
                attempts: 1,
                best_score: attempt.percentage(),
                last_completed_at: attempt.completed_at(),
            }),
        }
    }
    overviews
}
