//! Session-guarded account dashboard.

use dioxus::prelude::*;
use ui::{use_auth, LogoutButton, Navbar};

/// Dashboard page component. Without a session it routes back to login.
#[component]
pub fn Dashboard() -> Element {
    let auth = use_auth();
    let state = auth();

    // No persisted session: back to the login prompt
    if !state.loading && state.user.is_none() {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href("/login");
            }
        }
    }

    let Some(user) = state.user else {
        return rsx! {
            Navbar {}
            div { class: "auth-page", p { "Loading..." } }
        };
    };

    rsx! {
        Navbar {}

        div { class: "dashboard",
            h1 { "Hi {user.name}!" }
            p { class: "dashboard-subtitle", "Your GreenPlate account" }

            div { class: "dashboard-card",
                h2 { "Profile" }
                dl { class: "dashboard-details",
                    dt { "Email" }
                    dd { "{user.email}" }
                    dt { "Phone" }
                    dd { "{user.phone}" }
                    dt { "Member id" }
                    dd { "{user.id}" }
                }
            }

            div { class: "dashboard-card",
                h2 { "Your subscription" }
                p { "No active plan yet. Pick one from the home page to get started." }
                a { class: "premium-button", href: "/", "Browse plans" }
            }

            LogoutButton { class: "premium-button premium-button--ghost" }
        }
    }
}
