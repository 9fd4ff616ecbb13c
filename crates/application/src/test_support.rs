//! Fakes shared by the unit tests of this crate.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};
use studex_domain::{HttpMethod, RequestSpec, ResponseSpec, ServiceSettings};

use crate::auth::MemoryCredentialStore;
use crate::ports::{CredentialStore, HttpClient, HttpClientError, HttpFuture, StorageError};

type Route = (HttpMethod, String);

/// Scripted HTTP client that records every request it receives.
///
/// Unscripted routes answer `404` with an empty body.
#[derive(Default)]
pub struct FakeHttpClient {
    routes: Mutex<HashMap<Route, Result<ResponseSpec, HttpClientError>>>,
    calls: Mutex<Vec<RequestSpec>>,
    latency: Option<Duration>,
}

impl FakeHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every response, keeping requests in flight long enough to overlap.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn respond(&self, method: HttpMethod, url: &str, response: ResponseSpec) {
        self.routes
            .lock()
            .insert((method, url.to_string()), Ok(response));
    }

    pub fn respond_json(&self, method: HttpMethod, url: &str, status: u16, body: &Value) {
        self.respond(method, url, ResponseSpec::json(status, body));
    }

    pub fn fail(&self, method: HttpMethod, url: &str, error: HttpClientError) {
        self.routes.lock().insert((method, url.to_string()), Err(error));
    }

    pub fn calls(&self) -> Vec<RequestSpec> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl HttpClient for FakeHttpClient {
    fn execute(&self, request: RequestSpec) -> HttpFuture<'_> {
        self.calls.lock().push(request.clone());
        Box::pin(async move {
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }
            self.routes
                .lock()
                .get(&(request.method, request.url.clone()))
                .cloned()
                .unwrap_or_else(|| Ok(ResponseSpec::json(404, &json!({"detail": "Not found."}))))
        })
    }
}

/// Credential store whose device storage is gone.
pub struct UnavailableStore;

#[async_trait]
impl CredentialStore for UnavailableStore {
    async fn put(&self, _name: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("device storage full".to_string()))
    }

    async fn put_many(&self, _entries: &[(&str, &str)]) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("device storage full".to_string()))
    }

    async fn get(&self, _name: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("device storage missing".to_string()))
    }

    async fn clear(&self, _name: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("device storage missing".to_string()))
    }
}

/// In-memory store that refuses any write touching one name.
///
/// Reads and other writes go to the wrapped store.
pub struct FailingKeyStore {
    pub inner: MemoryCredentialStore,
    failing: &'static str,
}

impl FailingKeyStore {
    pub fn new(inner: MemoryCredentialStore, failing: &'static str) -> Self {
        Self { inner, failing }
    }

    fn refuse(&self) -> StorageError {
        StorageError::Unavailable(format!("cannot write {}: full", self.failing))
    }
}

#[async_trait]
impl CredentialStore for FailingKeyStore {
    async fn put(&self, name: &str, value: &str) -> Result<(), StorageError> {
        if name == self.failing {
            return Err(self.refuse());
        }
        self.inner.put(name, value).await
    }

    async fn put_many(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        if entries.iter().any(|(name, _)| *name == self.failing) {
            return Err(self.refuse());
        }
        self.inner.put_many(entries).await
    }

    async fn get(&self, name: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(name).await
    }

    async fn clear(&self, name: &str) -> Result<(), StorageError> {
        self.inner.clear(name).await
    }
}

pub const BASE_URL: &str = "https://directory.test";

pub fn settings() -> Arc<ServiceSettings> {
    Arc::new(ServiceSettings {
        base_url: BASE_URL.to_string(),
        cohort_year: 2026,
        ..ServiceSettings::default()
    })
}

pub fn roster_url() -> String {
    format!("{BASE_URL}/api/2026/")
}

pub fn birthday_url() -> String {
    format!("{BASE_URL}/api/2026/birthday/")
}

pub fn student_url(id: &str) -> String {
    format!("{BASE_URL}/api/2026/{id}")
}

pub fn student_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "FatherName": "F. Name",
        "MotherName": "M. Name",
        "ADDRESS": "1 Mall Road",
        "MOBILE": "9000000000",
        "EMAIL": format!("{id}@example.com"),
        "dob": "2004-01-01",
        "GENDER": "M",
        "Section": "A",
        "BRANCH": "CSE",
        "RollNo": format!("R{id}"),
        "PERCENTAGE": 81.25
    })
}
