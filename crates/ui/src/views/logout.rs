use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::Notices;

/// Signs out locally and returns to the landing page.
#[component]
pub fn LogoutButton() -> Element {
    let ctx = use_context::<AppContext>();
    let notices = use_context::<Notices>();
    let navigator = use_navigator();

    rsx! {
        button {
            class: "btn btn-secondary",
            onclick: move |_| {
                let session = ctx.session();
                spawn_forever(async move {
                    if let Err(err) = session.clear().await {
                        tracing::warn!(error = %err, "could not remove stored credential");
                    }
                    tracing::info!("signed out");
                    notices.success("Signed out.");
                    navigator.replace(Route::Landing {});
                });
            },
            "Sign out"
        }
    }
}
