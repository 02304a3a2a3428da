//! # REST proxy strategy
//!
//! [`ProxyStore`] expresses each collection operation as an individual HTTP
//! call to a backend service. Every call is independently fallible — a
//! network error or a non-2xx status becomes a [`DalError::Transport`] for
//! that one operation, with no connection state to tear down.
//!
//! ## Wire contract
//!
//! One endpoint per (collection, operation) pair, JSON in and out:
//!
//! | Request | Body | Response |
//! |---------|------|----------|
//! | `POST {base}/{collection}/findOne` | `{query}` | `{data}` |
//! | `POST {base}/{collection}/find` | `{query}` | `{data}` |
//! | `POST {base}/{collection}/insertOne` | `{document}` | `{insertedId}` |
//! | `POST {base}/{collection}/updateOne` | `{query, update}` | `{modifiedCount}` |
//! | `POST {base}/{collection}/deleteOne` | `{query}` | `{deletedCount}` |
//! | `GET {base}/ping` | — | `200` |
//!
//! An optional API key travels in the `X-Api-Key` header on every request.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::DalError;
use crate::query::{Document, Filter};
use crate::store::StorageStrategy;

const API_KEY_HEADER: &str = "X-Api-Key";

/// HTTP strategy that forwards each operation to a backend service.
#[derive(Clone, Debug)]
pub struct ProxyStore {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct DataResponse<T> {
    data: T,
}

#[derive(Deserialize)]
struct InsertResponse {
    #[serde(rename = "insertedId")]
    inserted_id: String,
}

#[derive(Deserialize)]
struct UpdateResponse {
    #[serde(rename = "modifiedCount")]
    modified_count: u64,
}

#[derive(Deserialize)]
struct DeleteResponse {
    #[serde(rename = "deletedCount")]
    deleted_count: u64,
}

impl ProxyStore {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            api_key,
        }
    }

    fn endpoint(&self, collection: &str, operation: &str) -> String {
        format!("{}/{}/{}", self.base_url, collection, operation)
    }

    async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        url: String,
        body: &B,
    ) -> Result<R, DalError> {
        let mut request = self.client.post(url).json(body);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }
        let response = request.send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}

impl StorageStrategy for ProxyStore {
    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, DalError> {
        let response: DataResponse<Option<Document>> = self
            .post(self.endpoint(collection, "findOne"), &json!({ "query": filter }))
            .await?;
        Ok(response.data)
    }

    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, DalError> {
        let response: DataResponse<Vec<Document>> = self
            .post(self.endpoint(collection, "find"), &json!({ "query": filter }))
            .await?;
        Ok(response.data)
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<String, DalError> {
        let response: InsertResponse = self
            .post(
                self.endpoint(collection, "insertOne"),
                &json!({ "document": document }),
            )
            .await?;
        Ok(response.inserted_id)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        patch: &Document,
    ) -> Result<u64, DalError> {
        let response: UpdateResponse = self
            .post(
                self.endpoint(collection, "updateOne"),
                &json!({ "query": filter, "update": patch }),
            )
            .await?;
        Ok(response.modified_count)
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64, DalError> {
        let response: DeleteResponse = self
            .post(
                self.endpoint(collection, "deleteOne"),
                &json!({ "query": filter }),
            )
            .await?;
        Ok(response.deleted_count)
    }

    async fn ping(&self) -> Result<(), DalError> {
        self.client
            .get(format!("{}/ping", self.base_url))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_follow_the_wire_contract() {
        let store = ProxyStore::new("http://localhost:8080/api/", None);
        assert_eq!(
            store.endpoint("users", "findOne"),
            "http://localhost:8080/api/users/findOne"
        );
        assert_eq!(
            store.endpoint("users", "insertOne"),
            "http://localhost:8080/api/users/insertOne"
        );
    }
}
