//! Backend status badge for the navbar.

use dal::Backend;
use dioxus::prelude::*;

use crate::auth::use_auth;

/// A small badge showing which backend this session runs against.
///
/// - **Remote**: "Live" (direct database connection)
/// - **Proxy**: "Connected" (REST backend)
/// - **Mock**: "Demo mode" (data stays on this device)
#[component]
pub fn OnlineIndicator() -> Element {
    let auth = use_auth();
    let state = auth();

    if state.loading {
        return rsx! {};
    }

    match state.backend {
        Some(Backend::Remote) => rsx! {
            span {
                class: "backend-badge backend-badge--live",
                title: "Connected to the live database",
                "Live"
            }
        },
        Some(Backend::Proxy) => rsx! {
            span {
                class: "backend-badge backend-badge--connected",
                title: "Connected through the API",
                "Connected"
            }
        },
        _ => rsx! {
            span {
                class: "backend-badge backend-badge--demo",
                title: "Offline — data stays on this device",
                "Demo mode"
            }
        },
    }
}
