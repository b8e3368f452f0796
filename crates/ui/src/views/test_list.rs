use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{
    LoadError, Notices, ViewError, ViewState, report_load_failure, view_state_from_resource,
};
use crate::vm::{TestOverviewVm, map_test_overviews};

#[component]
pub fn TestsView() -> Element {
    let ctx = use_context::<AppContext>();
    let notices = use_context::<Notices>();
    let attempts = ctx.attempts();

    let mut resource = use_resource(move || {
        let attempts = attempts.clone();
        async move {
            let overviews = attempts
                .attempted_tests()
                .await
                .map_err(|err| report_load_failure(notices, err))?;
            Ok::<_, ViewError>(map_test_overviews(&overviews))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page tests",
            nav { class: "topbar",
                Link { class: "btn btn-ghost", to: Route::Dashboard {}, "Back to dashboard" }
            }
            h2 { "Tests" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(items) => rsx! {
                    if items.is_empty() {
                        p { "You have not taken any tests yet." }
                    } else {
                        ul {
                            for item in items {
                                TestOverviewRow { key: "{item.test_id}", item }
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

#[component]
fn TestOverviewRow(item: TestOverviewVm) -> Element {
    rsx! {
        li { class: "test-row",
            div {
                p { class: "attempt-test", "Test ID: {item.test_label}" }
                p { class: "muted",
                    "Attempts: {item.attempts} | Best: {item.best_str} | Last: {item.last_completed_str}"
                }
            }
            div { class: "actions",
                Link {
                    class: "btn btn-primary",
                    to: Route::TakeTest { test_id: item.test_id.clone() },
                    "Take again"
                }
                Link {
                    class: "btn",
                    to: Route::Results { test_id: item.test_id.clone() },
                    "Results"
                }
            }
        }
    }
}
