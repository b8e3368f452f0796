use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AuthState;
use crate::routes::Route;
use crate::views::LogoutButton;

#[component]
pub fn AdminView() -> Element {
    let auth = use_context::<AuthState>();
    let email = auth
        .session
        .read()
        .identity()
        .map(|identity| identity.email.clone())
        .unwrap_or_default();

    rsx! {
        div { class: "page admin",
            nav { class: "topbar",
                Link { class: "btn btn-ghost", to: Route::Dashboard {}, "Back to dashboard" }
                LogoutButton {}
            }
            h2 { "Administration" }
            p { "Signed in as administrator: {email}" }
        }
    }
}
