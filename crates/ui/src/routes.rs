use alphatest_core::model::TestId;
use alphatest_core::{GuardDecision, View, guard_view};
use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable, use_navigator, use_route};

use crate::context::AuthState;
use crate::views::{
    AdminView, DashboardView, LandingView, LoginView, ResultsView, TakeTestView, TestsView,
    VerifyView,
};

#[derive(Clone, Debug, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[route("/", LandingView)] Landing {},
        #[route("/login", LoginView)] Login {},
        #[route("/verify", VerifyView)] Verify {},
        #[route("/dashboard", DashboardView)] Dashboard {},
        #[route("/tests", TestsView)] Tests {},
        #[route("/test/:test_id/take", TakeTestView)] TakeTest { test_id: String },
        #[route("/test/:test_id/results", ResultsView)] Results { test_id: String },
        #[route("/admin", AdminView)] Admin {},
}

impl Route {
    /// The access-controlled view this route renders.
    #[must_use]
    pub fn view(&self) -> View {
        match self {
            Route::Landing {} => View::Landing,
            Route::Login {} => View::SignIn,
            Route::Verify {} => View::Verify,
            Route::Dashboard {} => View::Dashboard,
            Route::Tests {} => View::Tests,
            Route::TakeTest { test_id } => View::TakeTest(TestId::new(test_id.clone())),
            Route::Results { test_id } => View::Results(TestId::new(test_id.clone())),
            Route::Admin {} => View::Admin,
        }
    }
}

/// Target route for a redirect decision, if any.
#[must_use]
pub fn redirect_for(decision: GuardDecision) -> Option<Route> {
    match decision {
        GuardDecision::Render => None,
        GuardDecision::RedirectToSignIn => Some(Route::Login {}),
        GuardDecision::RedirectToDashboard => Some(Route::Dashboard {}),
    }
}

/// Applies the route guard to every page; redirected pages never render.
#[component]
fn Shell() -> Element {
    let auth = use_context::<AuthState>();
    let route = use_route::<Route>();
    let navigator = use_navigator();
    let decision = guard_view(&auth.session.read(), &route.view());

    use_effect(use_reactive((&decision,), move |(decision,)| {
        if let Some(target) = redirect_for(decision) {
            tracing::debug!(?target, "route guard redirect");
            navigator.replace(target);
        }
    }));

    rsx! {
        div { class: "app",
            if decision == GuardDecision::Render {
                Outlet::<Route> {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_map_to_guarded_views() {
        assert_eq!(Route::Login {}.view(), View::SignIn);
        assert_eq!(
            Route::Results { test_id: "t1".into() }.view(),
            View::Results(TestId::new("t1"))
        );
    }

    #[test]
    fn redirects_target_expected_routes() {
        assert_eq!(redirect_for(GuardDecision::Render), None);
        assert_eq!(redirect_for(GuardDecision::RedirectToSignIn), Some(Route::Login {}));
        assert_eq!(
            redirect_for(GuardDecision::RedirectToDashboard),
            Some(Route::Dashboard {})
        );
    }

    #[test]
    fn take_test_path_includes_id() {
        let route = Route::TakeTest { test_id: "abc".into() };
        assert_eq!(route.to_string(), "/test/abc/take");
    }
}
