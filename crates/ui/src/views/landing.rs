use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AuthState;
use crate::routes::Route;
use crate::views::LogoutButton;

#[component]
pub fn LandingView() -> Element {
    let auth = use_context::<AuthState>();
    let signed_in = auth.session.read().is_authenticated();

    rsx! {
        div { class: "page landing",
            nav { class: "topbar",
                span { class: "brand", "AlphaTest" }
                if signed_in {
                    Link { class: "btn", to: Route::Dashboard {}, "Dashboard" }
                    LogoutButton {}
                } else {
                    Link { class: "btn", to: Route::Login {}, "Sign in" }
                }
            }

            section { class: "hero",
                h1 { "AlphaTest" }
                p { class: "tagline", "Entrance exam preparation" }
                p {
                    "Realistic multiple-choice tests, instant scoring and progress tracking "
                    "for your entrance exam."
                }
                div { class: "actions",
                    if signed_in {
                        Link {
                            class: "btn btn-primary",
                            to: Route::Dashboard {},
                            "Go to dashboard"
                        }
                    } else {
                        Link { class: "btn btn-primary", to: Route::Login {}, "Get started" }
                    }
                    Link { class: "btn", to: Route::Tests {}, "View tests" }
                }
            }

            section { class: "features",
                h2 { "Features" }
                ul {
                    li { "Tests by topic, with 50 and 100 questions." }
                    li { "Full exam simulations mixing every topic." }
                    li { "English language tests." }
                    li { "Automatic scoring with explanations." }
                    li { "Progress tracking across attempts." }
                }
            }
        }
    }
}
