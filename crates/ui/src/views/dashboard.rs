use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::{AppContext, AuthState};
use crate::routes::Route;
use crate::views::{
    LoadError, LogoutButton, Notices, ViewError, ViewState, report_load_failure,
    view_state_from_resource,
};
use crate::vm::{AttemptRowVm, AttemptStatsVm};

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let auth = use_context::<AuthState>();
    let notices = use_context::<Notices>();
    let attempts = ctx.attempts();

    let mut resource = use_resource(move || {
        let attempts = attempts.clone();
        async move {
            let summary = attempts
                .dashboard()
                .await
                .map_err(|err| report_load_failure(notices, err))?;
            Ok::<_, ViewError>(AttemptStatsVm::recent(&summary))
        }
    });
    let state = view_state_from_resource(&resource);

    let (email, is_admin) = {
        let session = auth.session.read();
        (
            session.identity().map(|identity| identity.email.clone()),
            session.is_admin(),
        )
    };

    rsx! {
        div { class: "page dashboard",
            nav { class: "topbar",
                span { class: "brand", "AlphaTest" }
                Link { class: "btn", to: Route::Tests {}, "Tests" }
                if is_admin {
                    Link { class: "btn btn-primary", to: Route::Admin {}, "Admin" }
                }
                LogoutButton {}
            }

            section { class: "welcome",
                h2 { "Welcome back" }
                if let Some(email) = email {
                    p { class: "muted", "E-mail: {email}" }
                }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(stats) => rsx! {
                    StatCards { stats: stats.clone() }
                    section { class: "recent-attempts",
                        h3 { "Recent attempts" }
                        if stats.is_empty() {
                            div { class: "empty",
                                p { "You have not taken any tests yet." }
                                Link {
                                    class: "btn btn-primary",
                                    to: Route::Tests {},
                                    "Start your first test"
                                }
                            }
                        } else {
                            ul {
                                for row in stats.rows.iter().cloned() {
                                    AttemptRow { key: "{row.id}", row }
                                }
                            }
                        }
                    }
                },
                ViewState::Error(error) => rsx! {
                    LoadError { error, on_retry: move |()| resource.restart() }
                },
            }
        }
    }
}

/// Attempt count, average and best score.
#[component]
pub fn StatCards(stats: AttemptStatsVm) -> Element {
    rsx! {
        div { class: "stats-grid",
            div { class: "stat-card",
                span { class: "stat-value", "{stats.total_attempts}" }
                h4 { "Tests taken" }
            }
            div { class: "stat-card",
                span { class: "stat-value", "{stats.average_str}" }
                h4 { "Average" }
            }
            div { class: "stat-card",
                span { class: "stat-value", "{stats.best_str}" }
                h4 { "Best score" }
            }
        }
    }
}

#[component]
pub fn AttemptRow(row: AttemptRowVm) -> Element {
    rsx! {
        li { class: "attempt-row",
            div {
                p { class: "attempt-test", "Test ID: {row.test_label}" }
                p { class: "muted", "{row.completed_at_str}" }
            }
            div { class: "attempt-score",
                p { class: "attempt-percentage", "{row.percentage_str}" }
                p { class: "muted", "{row.score_str}" }
            }
        }
    }
}
