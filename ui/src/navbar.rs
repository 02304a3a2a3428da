//! Top navigation bar.

use dioxus::prelude::*;

use crate::auth::{use_auth, LogoutButton};
use crate::online_indicator::OnlineIndicator;

#[component]
pub fn Navbar() -> Element {
    let auth = use_auth();
    let state = auth();

    rsx! {
        nav { class: "navbar",
            a { class: "navbar-brand", href: "/", "GreenPlate" }

            div { class: "navbar-links",
                a { href: "/", "Home" }
                if state.user.is_some() {
                    a { href: "/dashboard", "Dashboard" }
                    LogoutButton { class: "navbar-logout" }
                } else {
                    a { href: "/login", "Login" }
                    a { href: "/signup", "Sign up" }
                }
                OnlineIndicator {}
            }
        }
    }
}
