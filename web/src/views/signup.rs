//! Registration page view with the signup form.

use dioxus::prelude::*;
use ui::{use_auth, use_auth_service, AuthState, Navbar};

/// Signup page component.
#[component]
pub fn Signup() -> Element {
    let mut auth = use_auth();
    let service = use_auth_service();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // If already logged in, redirect to the dashboard
    if !auth().loading && auth().user.is_some() {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href("/dashboard");
            }
        }
    }

    let handle_signup = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);

            let n = name().trim().to_string();
            let e = email().trim().to_string();
            let ph = phone().trim().to_string();
            let p = password();
            let cp = confirm_password();

            if n.is_empty() {
                error.set(Some("Name is required".to_string()));
                return;
            }
            if e.is_empty() || !e.contains('@') {
                error.set(Some("Please enter a valid email".to_string()));
                return;
            }
            if ph.chars().filter(|c| c.is_ascii_digit()).count() < 10 {
                error.set(Some("Please enter a valid phone number".to_string()));
                return;
            }
            if p.len() < 6 {
                error.set(Some("Password must be at least 6 characters".to_string()));
                return;
            }
            if p != cp {
                error.set(Some("Passwords do not match".to_string()));
                return;
            }

            let Some(auth_service) = service() else {
                return;
            };
            loading.set(true);
            match auth_service.register(&n, &e, &ph, &p).await {
                Ok(session) => {
                    let backend = auth().backend;
                    auth.set(AuthState {
                        user: Some(session),
                        loading: false,
                        backend,
                    });
                    #[cfg(target_arch = "wasm32")]
                    {
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().set_href("/dashboard");
                        }
                    }
                }
                Err(err) => {
                    loading.set(false);
                    error.set(Some(err.to_string()));
                }
            }
        });
    };

    rsx! {
        Navbar {}

        div { class: "auth-page",
            h1 { "Create Account" }
            p { class: "auth-subtitle", "Sign up to subscribe to meal plans" }

            form { class: "auth-form", onsubmit: handle_signup,
                if let Some(err) = error() {
                    div { class: "auth-error", "{err}" }
                }

                input {
                    class: "auth-input",
                    r#type: "text",
                    placeholder: "Name",
                    value: name(),
                    oninput: move |evt| name.set(evt.value()),
                }

                input {
                    class: "auth-input",
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt| email.set(evt.value()),
                }

                input {
                    class: "auth-input",
                    r#type: "tel",
                    placeholder: "Phone",
                    value: phone(),
                    oninput: move |evt| phone.set(evt.value()),
                }

                input {
                    class: "auth-input",
                    r#type: "password",
                    placeholder: "Password (min 6 characters)",
                    value: password(),
                    oninput: move |evt| password.set(evt.value()),
                }

                input {
                    class: "auth-input",
                    r#type: "password",
                    placeholder: "Confirm password",
                    value: confirm_password(),
                    oninput: move |evt| confirm_password.set(evt.value()),
                }

                button {
                    class: "premium-button",
                    r#type: "submit",
                    disabled: loading() || service().is_none(),
                    if loading() { "Creating account..." } else { "Sign up" }
                }
            }

            p { class: "auth-switch",
                "Already have an account? "
                a { href: "/login", "Sign in" }
            }
        }
    }
}
