//! # User model and its session projection
//!
//! Two representations of a GreenPlate account:
//!
//! ## [`User`]
//!
//! The complete document from the `users` collection, wire-named in
//! camelCase. `id` and `created_at` are assigned by the storage backend at
//! insert time, so a freshly constructed `User` leaves them empty and the
//! serializer omits them.
//!
//! The password is held and compared as-is — this flow has no real security
//! model. It never leaves the storage layer: [`Session`] carries everything
//! the UI needs and omits it.
//!
//! ## [`Session`]
//!
//! The client-held record of the currently authenticated user, persisted in
//! durable client-side storage by [`crate::SessionStore`] and independent of
//! the underlying `User` document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use dal::Document;

/// Full user record as stored in the `users` collection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub created_at: i64,
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

impl User {
    /// Project into the client-held session record.
    pub fn to_session(&self) -> Session {
        Session {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            is_logged_in: true,
        }
    }

    pub(crate) fn from_document(doc: Document) -> Option<User> {
        serde_json::from_value(Value::Object(doc)).ok()
    }

    pub(crate) fn into_document(self) -> Document {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Document::new(),
        }
    }
}

/// The client-held record of the currently authenticated user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub is_logged_in: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn session_projection_drops_the_password() {
        let user = User {
            id: "user-1".to_string(),
            name: "Ada".to_string(),
            email: "a@x.com".to_string(),
            phone: "5551234567".to_string(),
            password: "p1".to_string(),
            created_at: 1700000000,
        };

        let session = user.to_session();
        assert!(session.is_logged_in);
        assert_eq!(session.email, "a@x.com");

        let wire = serde_json::to_value(&session).unwrap();
        assert!(wire.get("password").is_none());
        assert_eq!(wire.get("isLoggedIn"), Some(&json!(true)));
    }

    #[test]
    fn new_users_serialize_without_backend_owned_fields() {
        let user = User {
            name: "Ada".to_string(),
            email: "a@x.com".to_string(),
            phone: "5551234567".to_string(),
            password: "p1".to_string(),
            ..User::default()
        };

        let doc = user.into_document();
        assert!(!doc.contains_key("id"));
        assert!(!doc.contains_key("createdAt"));
        assert_eq!(doc.get("email"), Some(&json!("a@x.com")));
    }

    #[test]
    fn sparse_documents_still_parse() {
        let doc = json!({"email": "a@x.com", "password": "p1"})
            .as_object()
            .cloned()
            .unwrap();
        let user = User::from_document(doc).unwrap();
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.password, "p1");
        assert!(user.name.is_empty());
    }
}
