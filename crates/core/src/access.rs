//! Access rules for the client's views.
//!
//! This is a UX gate only: it decides what to render or where to redirect from the local
//! session. The backend enforces real access control on every call.

use crate::model::{Session, TestId};

/// A view the user asked for, independent of the router's own route type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Landing,
    SignIn,
    Verify,
    Dashboard,
    Tests,
    TakeTest(TestId),
    Results(TestId),
    Admin,
}

/// What the shell should do with a requested view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    RedirectToSignIn,
    RedirectToDashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Requirement {
    Public,
    GuestOnly,
    Authenticated,
    Admin,
}

impl View {
    fn requirement(&self) -> Requirement {
        match self {
            View::Landing | View::Verify => Requirement::Public,
            View::SignIn => Requirement::GuestOnly,
            View::Dashboard | View::Tests | View::TakeTest(_) | View::Results(_) => {
                Requirement::Authenticated
            }
            View::Admin => Requirement::Admin,
        }
    }
}

/// Decide whether `view` may render for `session`.
///
/// A pending session (credential not yet validated) counts as signed out.
#[must_use]
pub fn guard_view(session: &Session, view: &View) -> GuardDecision {
    let signed_in = session.is_authenticated();
    match view.requirement() {
        Requirement::Public => GuardDecision::Render,
        Requirement::GuestOnly if signed_in => GuardDecision::RedirectToDashboard,
        Requirement::GuestOnly => GuardDecision::Render,
        Requirement::Authenticated if signed_in => GuardDecision::Render,
        Requirement::Authenticated => GuardDecision::RedirectToSignIn,
        // Non-admins (signed in or not) land on the dashboard, which re-guards.
        Requirement::Admin if session.is_admin() => GuardDecision::Render,
        Requirement::Admin => GuardDecision::RedirectToDashboard,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Credential, UserIdentity};

    fn signed_in(is_admin: bool) -> Session {
        Session::authenticated(
            UserIdentity::new("cadet@example.es", is_admin),
            Credential::new("t"),
        )
    }

    fn protected_views() -> Vec<View> {
        vec![
            View::Dashboard,
            View::Tests,
            View::TakeTest(TestId::new("t1")),
            View::Results(TestId::new("t1")),
        ]
    }

    #[test]
    fn anonymous_is_sent_to_sign_in_for_protected_views() {
        let session = Session::anonymous();
        for view in protected_views() {
            assert_eq!(guard_view(&session, &view), GuardDecision::RedirectToSignIn, "{view:?}");
        }
    }

    #[test]
    fn pending_session_is_treated_as_signed_out() {
        let session = Session::pending(Credential::new("t"));
        assert_eq!(guard_view(&session, &View::Dashboard), GuardDecision::RedirectToSignIn);
        assert_eq!(guard_view(&session, &View::SignIn), GuardDecision::Render);
    }

    #[test]
    fn signed_in_user_skips_sign_in() {
        assert_eq!(
            guard_view(&signed_in(false), &View::SignIn),
            GuardDecision::RedirectToDashboard
        );
    }

    #[test]
    fn signed_in_user_renders_protected_views() {
        let session = signed_in(false);
        for view in protected_views() {
            assert_eq!(guard_view(&session, &view), GuardDecision::Render, "{view:?}");
        }
    }

    #[test]
    fn admin_view_requires_admin_flag() {
        assert_eq!(
            guard_view(&signed_in(false), &View::Admin),
            GuardDecision::RedirectToDashboard
        );
        assert_eq!(guard_view(&signed_in(true), &View::Admin), GuardDecision::Render);
        assert_eq!(
            guard_view(&Session::anonymous(), &View::Admin),
            GuardDecision::RedirectToDashboard
        );
    }

    #[test]
    fn public_views_always_render() {
        for session in [Session::anonymous(), signed_in(false), signed_in(true)] {
            assert_eq!(guard_view(&session, &View::Landing), GuardDecision::Render);
            assert_eq!(guard_view(&session, &View::Verify), GuardDecision::Render);
        }
    }
}
