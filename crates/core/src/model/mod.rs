mod attempt;
mod identity;
mod ids;
mod session;
mod summary;

pub use attempt::{AttemptError, AttemptRecord};
pub use identity::{Credential, UserIdentity};
pub use ids::{AttemptId, TestId};
pub use session::Session;
pub use summary::{AttemptSummary, RECENT_ATTEMPTS_LIMIT};
