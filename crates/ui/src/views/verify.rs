use dioxus::prelude::*;
use dioxus_router::Link;

use crate::routes::Route;

#[component]
pub fn VerifyView() -> Element {
    rsx! {
        div { class: "page verify",
            h2 { "Verify your e-mail" }
            p {
                "We sent a verification link to the address you registered with. "
                "Open it to activate your account, then sign in."
            }
            Link { class: "btn btn-primary", to: Route::Login {}, "Go to sign in" }
        }
    }
}
