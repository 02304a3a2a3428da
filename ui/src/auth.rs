//! Authentication context and hooks for the UI.

use account::{AuthService, Session, SessionStore};
use dal::{Backend, DalConfig, Store};
use dioxus::prelude::*;

/// The app-wide auth service over the backend selected at startup.
pub type SiteAuthService = AuthService<Store>;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<Session>,
    pub loading: bool,
    /// Backend chosen by the startup probe; `None` while still connecting.
    pub backend: Option<Backend>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
            backend: None,
        }
    }
}

impl AuthState {
    /// Whether the selected backend reaches a real server.
    pub fn online(&self) -> bool {
        matches!(self.backend, Some(backend) if backend.is_connected())
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Get the auth service, available once the backend probe has finished.
pub fn use_auth_service() -> Signal<Option<SiteAuthService>> {
    use_context::<Signal<Option<SiteAuthService>>>()
}

/// Provider component that selects a backend and manages authentication
/// state. Wrap the app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);
    let mut service = use_signal(|| Option::<SiteAuthService>::None);

    use_context_provider(|| auth_state);
    use_context_provider(|| service);

    // One-shot backend selection on mount; the choice is held for the
    // whole session.
    let _ = use_resource(move || async move {
        #[cfg(all(target_arch = "wasm32", feature = "web"))]
        let config = DalConfig::from_window();
        #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
        let config = DalConfig::default();

        let db = dal::connect(&config).await;
        let backend = db.backend();
        tracing::info!(?backend, "storage backend selected");

        let auth = AuthService::new(db, SessionStore::open());
        let restored = auth.current_session();

        service.set(Some(auth));
        auth_state.set(AuthState {
            user: restored,
            loading: false,
            backend: Some(backend),
        });
    });

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut auth_state = use_auth();
    let service = use_auth_service();

    let onclick = move |_| {
        if let Some(auth) = service() {
            auth.logout();
            let backend = auth_state().backend;
            auth_state.set(AuthState {
                user: None,
                loading: false,
                backend,
            });
            // Back to the landing page
            #[cfg(target_arch = "wasm32")]
            {
                if let Some(window) = web_sys::window() {
                    let _ = window.location().set_href("/");
                }
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
