//! Two-mode sign-in / sign-up form.
//!
//! The form itself is a tagged union with a pure `toggled` transition. The controller adds
//! the `submitting` flag and splits a submission into three steps so a UI can hold the
//! controller in reactive state across the await:
//!
//! 1. `begin_submit` validates locally and raises the flag (no I/O)
//! 2. [`execute`] talks to the backend and the session store
//! 3. `finish` lowers the flag and applies the outcome to the form
//!
//! The flag is advisory: it stops the normal UI from double-submitting, nothing more.

use alphatest_core::model::UserIdentity;
use thiserror::Error;

use crate::backend::AuthApi;
use crate::session_store::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

/// Field state for either mode. Switching modes carries every field across.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthForm {
    SignIn {
        email: String,
        password: String,
        /// Confirmation typed in sign-up mode, restored when switching back.
        retained_confirm: String,
    },
    SignUp {
        email: String,
        password: String,
        confirm_password: String,
    },
}

impl Default for AuthForm {
    fn default() -> Self {
        AuthForm::SignIn {
            email: String::new(),
            password: String::new(),
            retained_confirm: String::new(),
        }
    }
}

impl AuthForm {
    #[must_use]
    pub fn mode(&self) -> AuthMode {
        match self {
            AuthForm::SignIn { .. } => AuthMode::SignIn,
            AuthForm::SignUp { .. } => AuthMode::SignUp,
        }
    }

    /// The other mode, with all field values preserved.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            AuthForm::SignIn {
                email,
                password,
                retained_confirm,
            } => AuthForm::SignUp {
                email,
                password,
                confirm_password: retained_confirm,
            },
            AuthForm::SignUp {
                email,
                password,
                confirm_password,
            } => AuthForm::SignIn {
                email,
                password,
                retained_confirm: confirm_password,
            },
        }
    }

    #[must_use]
    pub fn email(&self) -> &str {
        match self {
            AuthForm::SignIn { email, .. } | AuthForm::SignUp { email, .. } => email,
        }
    }

    #[must_use]
    pub fn password(&self) -> &str {
        match self {
            AuthForm::SignIn { password, .. } | AuthForm::SignUp { password, .. } => password,
        }
    }

    /// Only meaningful in sign-up mode.
    #[must_use]
    pub fn confirm_password(&self) -> Option<&str> {
        match self {
            AuthForm::SignIn { .. } => None,
            AuthForm::SignUp {
                confirm_password, ..
            } => Some(confirm_password),
        }
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        match self {
            AuthForm::SignIn { email, .. } | AuthForm::SignUp { email, .. } => {
                *email = value.into();
            }
        }
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        match self {
            AuthForm::SignIn { password, .. } | AuthForm::SignUp { password, .. } => {
                *password = value.into();
            }
        }
    }

    /// Ignored in sign-in mode, where the field is not shown.
    pub fn set_confirm_password(&mut self, value: impl Into<String>) {
        if let AuthForm::SignUp {
            confirm_password, ..
        } = self
        {
            *confirm_password = value.into();
        }
    }

    fn submission(&self) -> Result<Submission, FormError> {
        match self {
            AuthForm::SignIn {
                email, password, ..
            } => Ok(Submission::SignIn {
                email: email.clone(),
                password: password.clone(),
            }),
            AuthForm::SignUp {
                email,
                password,
                confirm_password,
            } => {
                if password != confirm_password {
                    return Err(FormError::PasswordMismatch);
                }
                Ok(Submission::SignUp {
                    email: email.clone(),
                    password: password.clone(),
                })
            }
        }
    }
}

/// Locally validated request, ready for the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    SignIn { email: String, password: String },
    SignUp { email: String, password: String },
}

/// Reasons a submission never reaches the backend.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum FormError {
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("A request is already in progress.")]
    AlreadySubmitting,
}

/// Result of a submission that reached the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Session stored; the caller should navigate to the dashboard.
    SignedIn(UserIdentity),
    /// Account created; the user must verify it by e-mail before signing in.
    Registered,
    /// Backend or network failure, already turned into a user-facing message.
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthFormController {
    form: AuthForm,
    submitting: bool,
}

impl AuthFormController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn form(&self) -> &AuthForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut AuthForm {
        &mut self.form
    }

    #[must_use]
    pub fn mode(&self) -> AuthMode {
        self.form.mode()
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn toggle_mode(&mut self) {
        self.form = std::mem::take(&mut self.form).toggled();
    }

    /// Validate locally and mark the form as submitting.
    ///
    /// # Errors
    ///
    /// Returns `FormError::AlreadySubmitting` while a submission is outstanding, and
    /// `FormError::PasswordMismatch` when sign-up confirmation differs (the flag is left
    /// lowered in that case).
    pub fn begin_submit(&mut self) -> Result<Submission, FormError> {
        if self.submitting {
            return Err(FormError::AlreadySubmitting);
        }
        let submission = self.form.submission()?;
        self.submitting = true;
        Ok(submission)
    }

    /// Lower the flag and apply the outcome; a completed registration returns to sign-in.
    pub fn finish(&mut self, outcome: &SubmitOutcome) {
        self.submitting = false;
        if matches!(outcome, SubmitOutcome::Registered) && self.mode() == AuthMode::SignUp {
            self.toggle_mode();
        }
    }

    /// Run all three steps in one call.
    ///
    /// # Errors
    ///
    /// Returns `FormError` when the submission is refused locally; no request is made.
    pub async fn submit(
        &mut self,
        api: &dyn AuthApi,
        session: &SessionStore,
    ) -> Result<SubmitOutcome, FormError> {
        let submission = self.begin_submit()?;
        let outcome = execute(submission, api, session).await;
        self.finish(&outcome);
        Ok(outcome)
    }
}

/// Send a validated submission to the backend; on sign-in, store the session.
pub async fn execute(
    submission: Submission,
    api: &dyn AuthApi,
    session: &SessionStore,
) -> SubmitOutcome {
    match submission {
        Submission::SignIn { email, password } => match api.login(&email, &password).await {
            Ok(grant) => {
                let user = grant.user.clone();
                if let Err(err) = session.set(grant.user, grant.credential).await {
                    tracing::warn!(error = %err, "signed in but credential was not persisted");
                }
                tracing::info!(is_admin = user.is_admin, "signed in");
                SubmitOutcome::SignedIn(user)
            }
            Err(err) => {
                tracing::debug!(error = %err, "sign-in failed");
                SubmitOutcome::Failed(err.user_message())
            }
        },
        Submission::SignUp { email, password } => match api.register(&email, &password).await {
            Ok(()) => {
                tracing::info!("registration accepted; awaiting e-mail verification");
                SubmitOutcome::Registered
            }
            Err(err) => {
                tracing::debug!(error = %err, "registration failed");
                SubmitOutcome::Failed(err.user_message())
            }
        },
    }
}
