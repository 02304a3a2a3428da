//! # Account crate — users, sessions, and the auth service
//!
//! Everything the site knows about accounts lives here, built on the data
//! access layer:
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `user` | [`User`] collection document and its client-safe [`Session`] projection |
//! | `session` | the single durable key holding the current session |
//! | `service` | [`AuthService`] — exists/login/register/logout over the DAL |

mod service;
mod session;
mod user;

pub use service::{AuthError, AuthService, USERS_COLLECTION};
pub use session::SessionStore;
pub use user::{Session, User};
