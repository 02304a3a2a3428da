//! # Auth service — login, registration, and session lifecycle
//!
//! [`AuthService`] is the one consumer of the data access layer: everything
//! it does is built from `findOne` and `insertOne` on the `users`
//! collection, plus the durable [`SessionStore`]. Both collaborators are
//! injected at construction — the service works the same against the remote
//! database, the REST proxy, or the local mock, and constructing one
//! requires an already-selected backend, so there is no "no backend yet"
//! state to guard at call time.
//!
//! | Operation | Outcome |
//! |-----------|---------|
//! | [`exists`](AuthService::exists) | account presence by email |
//! | [`login`](AuthService::login) | distinct not-registered / wrong-password failures; persists the session on success |
//! | [`register`](AuthService::register) | duplicate check, insert, then auto-login |
//! | [`logout`](AuthService::logout) | clears the session; always succeeds |

use dal::{Database, Filter, StorageStrategy};

use crate::session::SessionStore;
use crate::user::{Session, User};

/// Name of the collection holding account documents.
pub const USERS_COLLECTION: &str = "users";

/// Failures surfaced to the UI. `Display` is the user-visible copy.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("User not registered. Please sign up first.")]
    NotRegistered,
    #[error("Incorrect password. Please try again.")]
    IncorrectPassword,
    #[error("User with this email already exists")]
    DuplicateUser,
    #[error("could not save the account: {0}")]
    Storage(#[from] dal::DalError),
}

/// Authentication over whatever backend the DAL selected at startup.
#[derive(Clone, Debug)]
pub struct AuthService<S: StorageStrategy> {
    db: Database<S>,
    sessions: SessionStore,
}

impl<S: StorageStrategy> AuthService<S> {
    pub fn new(db: Database<S>, sessions: SessionStore) -> Self {
        Self { db, sessions }
    }

    /// Backend chosen at startup. Fixed for the session.
    pub fn backend(&self) -> dal::Backend {
        self.db.backend()
    }

    fn users(&self) -> dal::Collection<'_, S> {
        self.db.collection(USERS_COLLECTION)
    }

    /// Whether an account with this email exists.
    ///
    /// A failed lookup reads as "not registered" — tolerable here, where
    /// the worst outcome is asking the user to sign up again.
    pub async fn exists(&self, email: &str) -> bool {
        self.users()
            .find_one(&Filter::new().eq("email", email))
            .await
            .is_some()
    }

    /// Log in with email and password; persists the session on success.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let Some(doc) = self
            .users()
            .find_one(&Filter::new().eq("email", email))
            .await
        else {
            return Err(AuthError::NotRegistered);
        };
        let Some(user) = User::from_document(doc) else {
            return Err(AuthError::NotRegistered);
        };

        if user.password != password {
            return Err(AuthError::IncorrectPassword);
        }

        let session = user.to_session();
        self.sessions.save(&session);
        tracing::debug!(email, "login succeeded");
        Ok(session)
    }

    /// Create an account, then establish a session exactly as login would.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        phone: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        if self.exists(email).await {
            return Err(AuthError::DuplicateUser);
        }

        let user = User {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            password: password.to_string(),
            ..User::default()
        };
        let id = self.users().insert_one(user.into_document()).await?;

        let session = Session {
            id,
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            is_logged_in: true,
        };
        self.sessions.save(&session);
        tracing::debug!(email, "registered new account");
        Ok(session)
    }

    /// Clear the persisted session. Always succeeds.
    pub fn logout(&self) {
        self.sessions.clear();
    }

    /// Session restored from durable storage, if present.
    pub fn current_session(&self) -> Option<Session> {
        self.sessions.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dal::{Backend, DalError, Document, MemoryStore};
    use serde_json::json;

    fn service() -> (AuthService<MemoryStore>, MemoryStore) {
        let store = MemoryStore::new();
        let db = Database::new(store.clone(), Backend::Mock);
        (AuthService::new(db, SessionStore::in_memory()), store)
    }

    async fn seed(store: &MemoryStore, value: serde_json::Value) {
        store
            .insert_one(USERS_COLLECTION, value.as_object().cloned().unwrap())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn exists_reports_presence_by_email() {
        let (auth, store) = service();
        seed(&store, json!({"email": "a@x.com", "password": "p1"})).await;

        assert!(auth.exists("a@x.com").await);
        assert!(!auth.exists("b@x.com").await);
    }

    #[tokio::test]
    async fn login_succeeds_and_persists_a_session() {
        let (auth, store) = service();
        seed(
            &store,
            json!({"email": "a@x.com", "password": "p1", "name": "Ada", "phone": "555"}),
        )
        .await;

        let session = auth.login("a@x.com", "p1").await.unwrap();
        assert!(session.is_logged_in);
        assert_eq!(session.name, "Ada");

        let restored = auth.current_session().unwrap();
        assert_eq!(restored.email, "a@x.com");
    }

    #[tokio::test]
    async fn login_failures_are_distinct() {
        let (auth, store) = service();
        seed(&store, json!({"email": "a@x.com", "password": "p1"})).await;

        let wrong = auth.login("a@x.com", "wrong").await.unwrap_err();
        assert!(matches!(wrong, AuthError::IncorrectPassword));

        let unknown = auth.login("nouser@x.com", "p1").await.unwrap_err();
        assert!(matches!(unknown, AuthError::NotRegistered));

        assert!(auth.current_session().is_none());
    }

    #[tokio::test]
    async fn register_auto_logs_in() {
        let (auth, _store) = service();

        let session = auth
            .register("Jane", "jane@x.com", "5551234567", "pw123456")
            .await
            .unwrap();
        assert!(session.is_logged_in);
        assert!(!session.id.is_empty());

        assert!(auth.exists("jane@x.com").await);
        assert_eq!(auth.current_session().unwrap().name, "Jane");

        // And the stored document can back a later login.
        let again = auth.login("jane@x.com", "pw123456").await.unwrap();
        assert_eq!(again.phone, "5551234567");
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let (auth, store) = service();

        auth.register("Jane", "jane@x.com", "5551234567", "pw123456")
            .await
            .unwrap();
        let err = auth
            .register("Janet", "jane@x.com", "5559876543", "other")
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::DuplicateUser));
        assert_eq!(store.count(USERS_COLLECTION), 1);
    }

    #[tokio::test]
    async fn logout_clears_the_session() {
        let (auth, _store) = service();
        auth.register("Jane", "jane@x.com", "5551234567", "pw123456")
            .await
            .unwrap();
        assert!(auth.current_session().is_some());

        auth.logout();
        assert!(auth.current_session().is_none());

        // Logging out twice is fine.
        auth.logout();
    }

    /// Strategy whose writes always fail.
    #[derive(Clone)]
    struct ReadOnlyStore(MemoryStore);

    impl StorageStrategy for ReadOnlyStore {
        async fn find_one(
            &self,
            collection: &str,
            filter: &Filter,
        ) -> Result<Option<Document>, DalError> {
            self.0.find_one(collection, filter).await
        }

        async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, DalError> {
            self.0.find(collection, filter).await
        }

        async fn insert_one(
            &self,
            _collection: &str,
            _document: Document,
        ) -> Result<String, DalError> {
            Err(DalError::Transport("connection refused".to_string()))
        }

        async fn update_one(
            &self,
            collection: &str,
            filter: &Filter,
            patch: &Document,
        ) -> Result<u64, DalError> {
            self.0.update_one(collection, filter, patch).await
        }

        async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64, DalError> {
            self.0.delete_one(collection, filter).await
        }

        async fn ping(&self) -> Result<(), DalError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn failed_inserts_surface_to_the_caller() {
        let db = Database::new(ReadOnlyStore(MemoryStore::new()), Backend::Proxy);
        let auth = AuthService::new(db, SessionStore::in_memory());

        let err = auth
            .register("Jane", "jane@x.com", "5551234567", "pw123456")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Storage(_)));
        assert!(auth.current_session().is_none());
    }
}
