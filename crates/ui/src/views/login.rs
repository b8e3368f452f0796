use dioxus::prelude::*;
use dioxus_router::Link;
use services::{AuthFormController, AuthMode, FormError, SubmitOutcome, execute};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::Notices;

const WELCOME_MESSAGE: &str = "Welcome back!";
const REGISTERED_MESSAGE: &str =
    "Registration complete. Check your e-mail to verify your account.";

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let notices = use_context::<Notices>();
    let mut controller = use_signal(AuthFormController::new);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let submission = match controller.write().begin_submit() {
            Ok(submission) => submission,
            Err(FormError::AlreadySubmitting) => return,
            Err(err) => {
                notices.error(err.to_string());
                return;
            }
        };

        let api = ctx.auth_api();
        let session = ctx.session();
        let mut controller = controller;
        // Signing in unmounts this view through the route guard, so the task is not scoped
        // to it.
        spawn_forever(async move {
            let outcome = execute(submission, api.as_ref(), &session).await;
            if let Ok(mut form) = controller.try_write() {
                form.finish(&outcome);
            }
            match outcome {
                SubmitOutcome::SignedIn(_) => notices.success(WELCOME_MESSAGE),
                SubmitOutcome::Registered => notices.success(REGISTERED_MESSAGE),
                SubmitOutcome::Failed(message) => notices.error(message),
            }
        });
    };

    let current = controller.read().clone();
    let form = current.form();
    let mode = current.mode();
    let submitting = current.is_submitting();
    let (title, subtitle, submit_label, toggle_label) = match mode {
        AuthMode::SignIn => (
            "Sign in",
            "Access your training account",
            "Sign in",
            "No account yet? Register",
        ),
        AuthMode::SignUp => (
            "Create account",
            "Start your preparation today",
            "Register",
            "Already registered? Sign in",
        ),
    };
    let submit_text = if submitting { "Processing..." } else { submit_label };
    let email = form.email().to_string();
    let password = form.password().to_string();
    let confirm = form.confirm_password().map(str::to_string);

    rsx! {
        div { class: "page login",
            Link { class: "btn btn-ghost", to: Route::Landing {}, "Back to home" }

            div { class: "auth-card",
                h2 { "{title}" }
                p { class: "muted", "{subtitle}" }

                form { onsubmit: on_submit,
                    label { r#for: "email", "E-mail" }
                    input {
                        id: "email",
                        r#type: "email",
                        required: true,
                        value: "{email}",
                        oninput: move |evt| controller.write().form_mut().set_email(evt.value()),
                    }

                    label { r#for: "password", "Password" }
                    input {
                        id: "password",
                        r#type: "password",
                        required: true,
                        value: "{password}",
                        oninput: move |evt| controller.write().form_mut().set_password(evt.value()),
                    }

                    if let Some(confirm) = confirm {
                        label { r#for: "confirm-password", "Confirm password" }
                        input {
                            id: "confirm-password",
                            r#type: "password",
                            required: true,
                            value: "{confirm}",
                            oninput: move |evt| {
                                controller.write().form_mut().set_confirm_password(evt.value());
                            },
                        }
                    }

                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: submitting,
                        "{submit_text}"
                    }
                }

                button {
                    class: "btn btn-link",
                    r#type: "button",
                    onclick: move |_| controller.write().toggle_mode(),
                    "{toggle_label}"
                }
            }
        }
    }
}
