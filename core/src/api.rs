//! The public task operations, as seen by a UI.
//!
//! `TaskApi` wires a `TaskClient` to a `Transport` and converts every failure
//! into a `UserMessage`. A UI layer only ever receives a value or a non-empty
//! message; transport errors and status codes stay behind this boundary.

use std::time::Duration;

use serde_json::Value;

use crate::client::TaskClient;
use crate::config::ClientConfig;
use crate::error::DomainError;
use crate::http::{HttpRequest, HttpResponse};
use crate::message::UserMessage;
use crate::transport::{Transport, UreqTransport};
use crate::types::{NewTask, Task, TaskStatus, TaskUpdate};

pub const TITLE_REQUIRED: &str = "Title is required";

/// Task operations returning a value or a user-facing message.
pub struct TaskApi<T = UreqTransport> {
    client: TaskClient,
    transport: T,
}

impl TaskApi<UreqTransport> {
    /// Blocking API over a fresh ureq agent.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(TaskClient::from_config(config), UreqTransport::new(config.timeout))
    }
}

impl<T: Transport> TaskApi<T> {
    pub fn new(client: TaskClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &TaskClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Borrowing view whose calls use `timeout` instead of the configured one.
    pub fn with_timeout(&self, timeout: Duration) -> TaskApi<&T> {
        TaskApi {
            client: self.client.with_timeout(timeout),
            transport: &self.transport,
        }
    }

    /// Raw health payload. Pair with [`crate::is_healthy`].
    pub fn health(&self) -> Result<Value, UserMessage> {
        let response = self.send(self.client.build_health())?;
        Ok(self.client.parse_health(response)?)
    }

    pub fn get_tasks(&self) -> Result<Vec<Task>, UserMessage> {
        let response = self.send(self.client.build_list_tasks())?;
        Ok(self.client.parse_list_tasks(response)?)
    }

    pub fn get_task(&self, id: &str) -> Result<Task, UserMessage> {
        let response = self.send(self.client.build_get_task(id))?;
        Ok(self.client.parse_get_task(response)?)
    }

    /// Create a task. A blank title is rejected without issuing a request.
    pub fn create_task(
        &self,
        title: &str,
        description: &str,
        status: Option<TaskStatus>,
    ) -> Result<Task, UserMessage> {
        require_title(title)?;
        let input = NewTask {
            title: title.to_string(),
            description: description.to_string(),
            status,
        };
        let response = self.send(self.client.build_create_task(&input)?)?;
        Ok(self.client.parse_create_task(response)?)
    }

    /// Replace title, description and status of task `id`.
    pub fn update_task(
        &self,
        id: &str,
        title: &str,
        description: &str,
        status: TaskStatus,
    ) -> Result<Task, UserMessage> {
        require_title(title)?;
        let input = TaskUpdate {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            status,
        };
        let response = self.send(self.client.build_update_task(&input)?)?;
        Ok(self.client.parse_update_task(response)?)
    }

    pub fn delete_task(&self, id: &str) -> Result<(), UserMessage> {
        let response = self.send(self.client.build_delete_task(id))?;
        Ok(self.client.parse_delete_task(response)?)
    }

    pub fn api_version(&self) -> Result<Option<String>, UserMessage> {
        let response = self.send(self.client.build_version())?;
        Ok(self.client.parse_version(response)?)
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, DomainError> {
        Ok(self.transport.execute(&request)?)
    }
}

fn require_title(title: &str) -> Result<(), UserMessage> {
    if title.trim().is_empty() {
        return Err(UserMessage::new(TITLE_REQUIRED));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::http::HttpMethod;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned outcomes and records every request it sees.
    #[derive(Default)]
    struct Scripted {
        outcomes: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl Scripted {
        fn replying(outcomes: Vec<Result<HttpResponse, TransportError>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
                seen: Mutex::default(),
            }
        }

        fn requests(&self) -> Vec<HttpRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl Transport for Scripted {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            self.seen.lock().unwrap().push(request.clone());
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::Other("no scripted outcome".to_string())))
        }
    }

    fn api(outcomes: Vec<Result<HttpResponse, TransportError>>) -> TaskApi<Scripted> {
        TaskApi::new(TaskClient::new("http://h/api/"), Scripted::replying(outcomes))
    }

    fn refused() -> Result<HttpResponse, TransportError> {
        Err(TransportError::Connect("connection refused".to_string()))
    }

    const NETWORK: &str = "Network issue detected. Check your internet connection.";

    #[test]
    fn blank_title_issues_no_request() {
        let api = api(vec![]);
        for title in ["", "   "] {
            let err = api.create_task(title, "desc", None).unwrap_err();
            assert_eq!(err.as_str(), TITLE_REQUIRED);
            let err = api.update_task("1", title, "", TaskStatus::Todo).unwrap_err();
            assert_eq!(err.as_str(), TITLE_REQUIRED);
        }
        assert!(api.transport.requests().is_empty());
    }

    #[test]
    fn get_tasks_single_element() {
        let api = api(vec![Ok(HttpResponse::new(
            200,
            r#"[{"id":"1","title":"A","status":"TODO"}]"#,
        ))]);
        let tasks = api.get_tasks().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "A");
        assert_eq!(api.transport.requests()[0].url, "http://h/api/tasks");
    }

    #[test]
    fn get_task_missing() {
        let api = api(vec![Ok(HttpResponse::new(404, ""))]);
        let err = api.get_task("missing").unwrap_err();
        assert_eq!(err.as_str(), "The requested item was not found.");
    }

    #[test]
    fn connection_failure_surfaces_network_message_everywhere() {
        let api = api((0..7).map(|_| refused()).collect());
        assert_eq!(api.health().unwrap_err().as_str(), NETWORK);
        assert_eq!(api.get_tasks().unwrap_err().as_str(), NETWORK);
        assert_eq!(api.get_task("1").unwrap_err().as_str(), NETWORK);
        assert_eq!(api.create_task("A", "", None).unwrap_err().as_str(), NETWORK);
        assert_eq!(
            api.update_task("1", "A", "", TaskStatus::Done).unwrap_err().as_str(),
            NETWORK
        );
        assert_eq!(api.delete_task("1").unwrap_err().as_str(), NETWORK);
        assert_eq!(api.api_version().unwrap_err().as_str(), NETWORK);
    }

    #[test]
    fn timeout_surfaces_timeout_message() {
        let api = api(vec![Err(TransportError::Timeout("elapsed".to_string()))]);
        assert_eq!(
            api.get_tasks().unwrap_err().as_str(),
            "The request timed out. Please try again."
        );
    }

    #[test]
    fn validation_fields_reach_the_user() {
        let api = api(vec![Ok(HttpResponse::new(400, r#"{"fields":{"title":"required"}}"#))]);
        let err = api.create_task("A", "", None).unwrap_err();
        assert_eq!(err.as_str(), "Invalid input: title: required");
    }

    #[test]
    fn create_sends_status_only_when_given() {
        let created = r#"{"id":"5","title":"A","status":"DONE"}"#;
        let api = api(vec![
            Ok(HttpResponse::new(201, created)),
            Ok(HttpResponse::new(201, created)),
        ]);
        api.create_task("A", "", None).unwrap();
        let task = api.create_task("A", "", Some(TaskStatus::Done)).unwrap();
        assert_eq!(task.status, TaskStatus::Done);

        let requests = api.transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert!(!requests[0].body.as_deref().unwrap().contains("status"));
        assert!(requests[1].body.as_deref().unwrap().contains(r#""status":"DONE""#));
    }

    #[test]
    fn delete_returns_unit_on_success() {
        let api = api(vec![Ok(HttpResponse::new(204, ""))]);
        assert_eq!(api.delete_task("1"), Ok(()));
        assert_eq!(api.transport.requests()[0].method, HttpMethod::Delete);
    }

    #[test]
    fn api_version_missing_field_is_none() {
        let api = api(vec![
            Ok(HttpResponse::new(200, r#"{"apiVersion":"1.2.3"}"#)),
            Ok(HttpResponse::new(200, r#"{"version":"1.2.3"}"#)),
        ]);
        assert_eq!(api.api_version().unwrap().as_deref(), Some("1.2.3"));
        assert_eq!(api.api_version().unwrap(), None);
    }

    #[test]
    fn with_timeout_applies_to_that_call_only() {
        let api = api(vec![Ok(HttpResponse::new(200, "{}")), Ok(HttpResponse::new(200, "{}"))]);
        api.with_timeout(Duration::from_secs(2)).health().unwrap();
        api.health().unwrap();
        let requests = api.transport.requests();
        assert_eq!(requests[0].timeout, Some(Duration::from_secs(2)));
        assert_eq!(requests[1].timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn server_error_message() {
        let api = api(vec![Ok(HttpResponse::new(502, "Bad Gateway"))]);
        assert_eq!(
            api.delete_task("1").unwrap_err().as_str(),
            "A server error occurred. Please try again later."
        );
    }
}
