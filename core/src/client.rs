//! Request builder and response parser for the task API.
//!
//! # Design
//! `TaskClient` holds only immutable configuration and carries no state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Parsing always goes through `classify`, so every non-2xx
//! status lands in the same `DomainError` taxonomy.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::classify::{classify, unwrap_list};
use crate::config::{ApiLayout, ClientConfig};
use crate::error::DomainError;
use crate::http::{default_headers, HttpMethod, HttpRequest, HttpResponse};
use crate::types::{NewTask, Task, TaskUpdate};
use crate::url::resolve;

/// Field of the version payload holding the API version string.
pub const VERSION_FIELD: &str = "apiVersion";

/// Bytes escaped when a task id becomes a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Synchronous, stateless client for the task API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Debug, Clone)]
pub struct TaskClient {
    base_url: String,
    layout: ApiLayout,
    timeout: Duration,
}

impl TaskClient {
    pub fn new(base_url: &str) -> Self {
        Self::from_config(&ClientConfig::new(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            layout: config.layout,
            timeout: config.timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Same client with a different per-request timeout.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            timeout,
            ..self.clone()
        }
    }

    pub fn build_health(&self) -> HttpRequest {
        self.request(HttpMethod::Get, self.layout.health_path(), None)
    }

    pub fn build_list_tasks(&self) -> HttpRequest {
        self.request(HttpMethod::Get, self.layout.tasks_path(), None)
    }

    pub fn build_get_task(&self, id: &str) -> HttpRequest {
        self.request(HttpMethod::Get, &self.task_path(id), None)
    }

    pub fn build_create_task(&self, input: &NewTask) -> Result<HttpRequest, DomainError> {
        let body = encode(input)?;
        Ok(self.request(HttpMethod::Post, self.layout.tasks_path(), Some(body)))
    }

    /// Full replace: the id travels in the body, not the path.
    pub fn build_update_task(&self, input: &TaskUpdate) -> Result<HttpRequest, DomainError> {
        let body = encode(input)?;
        Ok(self.request(HttpMethod::Put, self.layout.tasks_path(), Some(body)))
    }

    pub fn build_delete_task(&self, id: &str) -> HttpRequest {
        self.request(HttpMethod::Delete, &self.task_path(id), None)
    }

    pub fn build_version(&self) -> HttpRequest {
        self.request(HttpMethod::Get, self.layout.version_path(), None)
    }

    /// Raw health payload; see [`is_healthy`].
    pub fn parse_health(&self, response: HttpResponse) -> Result<Value, DomainError> {
        classify(&response)
    }

    pub fn parse_list_tasks(&self, response: HttpResponse) -> Result<Vec<Task>, DomainError> {
        let status = response.status;
        unwrap_list(classify(&response)?)
            .into_iter()
            .map(|item| decode(status, item))
            .collect()
    }

    pub fn parse_get_task(&self, response: HttpResponse) -> Result<Task, DomainError> {
        self.parse_task(response)
    }

    pub fn parse_create_task(&self, response: HttpResponse) -> Result<Task, DomainError> {
        self.parse_task(response)
    }

    pub fn parse_update_task(&self, response: HttpResponse) -> Result<Task, DomainError> {
        self.parse_task(response)
    }

    pub fn parse_delete_task(&self, response: HttpResponse) -> Result<(), DomainError> {
        classify(&response).map(|_| ())
    }

    /// `apiVersion` from the version payload; `None` when absent or not a string.
    pub fn parse_version(&self, response: HttpResponse) -> Result<Option<String>, DomainError> {
        let payload = classify(&response)?;
        Ok(payload
            .get(VERSION_FIELD)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    fn parse_task(&self, response: HttpResponse) -> Result<Task, DomainError> {
        let status = response.status;
        decode(status, classify(&response)?)
    }

    fn task_path(&self, id: &str) -> String {
        format!(
            "{}/{}",
            self.layout.tasks_path(),
            utf8_percent_encode(id, PATH_SEGMENT)
        )
    }

    fn request(&self, method: HttpMethod, path: &str, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            url: resolve(&self.base_url, path),
            headers: default_headers(),
            body,
            timeout: Some(self.timeout),
        }
    }
}

/// True when the health payload is an object whose `status` is `"UP"`.
pub fn is_healthy(payload: &Value) -> bool {
    payload.get("status").and_then(Value::as_str) == Some("UP")
}

fn encode<T: serde::Serialize>(input: &T) -> Result<String, DomainError> {
    serde_json::to_string(input)
        .map_err(|e| DomainError::generic(format!("Could not encode request: {e}")))
}

fn decode<T: DeserializeOwned>(status: u16, value: Value) -> Result<T, DomainError> {
    serde_json::from_value(value).map_err(|e| DomainError::Generic {
        status: Some(status),
        message: format!("Unexpected response from server: {e}"),
        details: Default::default(),
    })
}
