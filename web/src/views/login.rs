//! Login page view with the email/password form.

use dioxus::prelude::*;
use ui::{use_auth, use_auth_service, AuthState, Navbar};

/// Login page component.
#[component]
pub fn Login() -> Element {
    let mut auth = use_auth();
    let service = use_auth_service();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
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

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);

            let e = email().trim().to_string();
            let p = password();

            if e.is_empty() || !e.contains('@') {
                error.set(Some("Please enter a valid email".to_string()));
                return;
            }
            if p.is_empty() {
                error.set(Some("Password is required".to_string()));
                return;
            }

            let Some(auth_service) = service() else {
                return;
            };
            loading.set(true);
            match auth_service.login(&e, &p).await {
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
            h1 { "Welcome back" }
            p { class: "auth-subtitle", "Sign in to manage your meal plan" }

            form { class: "auth-form", onsubmit: handle_login,
                if let Some(err) = error() {
                    div { class: "auth-error", "{err}" }
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
                    r#type: "password",
                    placeholder: "Password",
                    value: password(),
                    oninput: move |evt| password.set(evt.value()),
                }

                button {
                    class: "premium-button",
                    r#type: "submit",
                    disabled: loading() || service().is_none(),
                    if loading() { "Signing in..." } else { "Sign in" }
                }
            }

            p { class: "auth-switch",
                "New to GreenPlate? "
                a { href: "/signup", "Create an account" }
            }
        }
    }
}
