use alphatest_core::model::TestId;
use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{
    AttemptRow, LoadError, Notices, StatCards, ViewError, ViewState, report_load_failure,
    view_state_from_resource,
};
use crate::vm::{AttemptStatsVm, short_test_label};

#[component]
pub fn ResultsView(test_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let notices = use_context::<Notices>();
    let attempts = ctx.attempts();
    let label = short_test_label(&TestId::new(test_id.clone()));

    let mut resource = use_resource(use_reactive((&test_id,), move |(test_id,)| {
        let attempts = attempts.clone();
        async move {
            let results = attempts
                .results_for(&TestId::new(test_id))
                .await
                .map_err(|err| report_load_failure(notices, err))?;
            Ok::<_, ViewError>(AttemptStatsVm::with_rows(&results.summary, &results.attempts))
        }
    }));
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page results",
            nav { class: "topbar",
                Link { class: "btn btn-ghost", to: Route::Tests {}, "Back to tests" }
                Link {
                    class: "btn btn-primary",
                    to: Route::TakeTest { test_id: test_id.clone() },
                    "Take again"
                }
            }
            h2 { "Results for test {label}" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(stats) => rsx! {
                    if stats.is_empty() {
                        p { "No attempts recorded for this test yet." }
                    } else {
                        StatCards { stats: stats.clone() }
                        ul {
                            for row in stats.rows.iter().cloned() {
                                AttemptRow { key: "{row.id}", row }
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
