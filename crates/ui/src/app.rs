use std::sync::Arc;

use alphatest_core::model::Session;
use dioxus::prelude::*;
use dioxus_router::Router;
use services::{AuthApi, SessionStore};

use crate::context::{AppContext, AuthState};
use crate::routes::Route;
use crate::views::{NoticeTray, use_notices_provider};

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_signal(Session::anonymous);
    let ready = use_signal(|| false);
    let auth = use_context_provider(|| AuthState { session, ready });
    use_notices_provider();

    use_future(move || {
        let store = ctx.session();
        let api = ctx.auth_api();
        async move { mirror_session(store, api, auth).await }
    });

    let is_ready = *ready.read();

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "AlphaTest" }

        div { class: "app-root",
            if is_ready {
                ErrorBoundary {
                    handle_error: |errors: ErrorContext| rsx! {
                        div { class: "fatal",
                            h1 { "Something went wrong" }
                            pre { "{errors:?}" }
                        }
                    },
                    Router::<Route> {}
                }
            } else {
                div { class: "splash",
                    p { "Loading..." }
                }
            }
            NoticeTray {}
        }
    }
}

/// Restore the stored session, then keep the signal in step with the store.
async fn mirror_session(store: Arc<SessionStore>, api: Arc<dyn AuthApi>, auth: AuthState) {
    let AuthState {
        mut session,
        mut ready,
    } = auth;
    let mut updates = store.subscribe();

    let restored = store.load(api.as_ref()).await;
    session.set(restored);
    ready.set(true);
    updates.mark_unchanged();

    while updates.changed().await.is_ok() {
        let next = updates.borrow_and_update().clone();
        session.set(next);
    }
}
