use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

pub const API_VERSION: &str = "1.0.0";

pub const STATUSES: [&str; 6] = ["TODO", "IN_PROGRESS", "DONE", "COMPLETED", "CANCELLED", "FAILED"];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: String,
}

#[derive(Deserialize)]
pub struct CreateTask {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct ReplaceTask {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: Option<String>,
}

/// Tasks in insertion order.
pub type Db = Arc<RwLock<Vec<Task>>>;

/// Error responses in the `{message|error, fields?}` shape clients expect.
pub enum ApiError {
    NotFound,
    Validation(Map<String, Value>),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => {
                (StatusCode::NOT_FOUND, Json(json!({"error": "Task not found"}))).into_response()
            }
            ApiError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                Json(json!({"message": "Validation failed", "fields": fields})),
            )
                .into_response(),
        }
    }
}

/// Routes for both path conventions, backed by one store:
/// `/health`, `/tasks`, `/version` and `/actuator/health`, `/api/tasks`, `/api/version`.
pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    let tasks = Router::new()
        .route("/tasks", get(list_tasks).post(create_task).put(replace_task))
        .route("/tasks/{id}", get(get_task).delete(delete_task))
        .route("/version", get(version));
    Router::new()
        .route("/health", get(health))
        .route("/actuator/health", get(health))
        .merge(tasks.clone())
        .nest("/api", tasks)
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock task API listening");
    }
    axum::serve(listener, app()).await
}

async fn health() -> Json<Value> {
    Json(json!({"status": "UP"}))
}

async fn version() -> Json<Value> {
    Json(json!({"apiVersion": API_VERSION}))
}

async fn list_tasks(State(db): State<Db>) -> Json<Vec<Task>> {
    Json(db.read().await.clone())
}

async fn create_task(
    State(db): State<Db>,
    Json(input): Json<CreateTask>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let status = validate(&input.title, input.status.as_deref())?;
    let task = Task {
        id: Uuid::new_v4().to_string(),
        title: input.title.trim().to_string(),
        description: input.description,
        status,
    };
    db.write().await.push(task.clone());
    info!(id = %task.id, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

async fn get_task(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Task>, ApiError> {
    let tasks = db.read().await;
    tasks
        .iter()
        .find(|task| task.id == id)
        .cloned()
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn replace_task(
    State(db): State<Db>,
    Json(input): Json<ReplaceTask>,
) -> Result<Json<Task>, ApiError> {
    let status = validate(&input.title, input.status.as_deref())?;
    let mut tasks = db.write().await;
    let task = tasks
        .iter_mut()
        .find(|task| task.id == input.id)
        .ok_or(ApiError::NotFound)?;
    task.title = input.title.trim().to_string();
    task.description = input.description;
    task.status = status;
    Ok(Json(task.clone()))
}

async fn delete_task(State(db): State<Db>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let mut tasks = db.write().await;
    let index = tasks
        .iter()
        .position(|task| task.id == id)
        .ok_or(ApiError::NotFound)?;
    tasks.remove(index);
    info!(%id, "task deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Check title and status; returns the status to store.
fn validate(title: &str, status: Option<&str>) -> Result<String, ApiError> {
    let mut fields = Map::new();
    if title.trim().is_empty() {
        fields.insert("title".to_string(), json!("must not be blank"));
    }
    let status = match status {
        None | Some("") => STATUSES[0].to_string(),
        Some(raw) if STATUSES.contains(&raw) => raw.to_string(),
        Some(raw) => {
            fields.insert("status".to_string(), json!(format!("unknown status {raw}")));
            raw.to_string()
        }
    };
    if fields.is_empty() {
        Ok(status)
    } else {
        Err(ApiError::Validation(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_serializes_to_json() {
        let task = Task {
            id: "abc".to_string(),
            title: "Test".to_string(),
            description: String::new(),
            status: "TODO".to_string(),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["title"], "Test");
        assert_eq!(json["description"], "");
        assert_eq!(json["status"], "TODO");
    }

    #[test]
    fn create_task_defaults_missing_fields() {
        let input: CreateTask = serde_json::from_str(r#"{"title":"Only title"}"#).unwrap();
        assert_eq!(input.title, "Only title");
        assert_eq!(input.description, "");
        assert!(input.status.is_none());
    }

    #[test]
    fn validate_defaults_status_to_todo() {
        assert_eq!(validate("A", None).ok(), Some("TODO".to_string()));
        assert_eq!(validate("A", Some("")).ok(), Some("TODO".to_string()));
        assert_eq!(validate("A", Some("DONE")).ok(), Some("DONE".to_string()));
    }

    #[test]
    fn validate_collects_every_field() {
        match validate("  ", Some("LATER")) {
            Err(ApiError::Validation(fields)) => {
                assert_eq!(fields["title"], "must not be blank");
                assert_eq!(fields["status"], "unknown status LATER");
            }
            _ => panic!("expected validation error"),
        }
    }
}
