//! Blocking API client core for the task service.
//!
//! # Overview
//! Builds `HttpRequest` values, executes them through a `Transport`, and
//! classifies every outcome into either a typed value or a `DomainError`.
//! `TaskApi` sits on top and hands UI layers a value or a fixed, user-facing
//! message; raw transport errors never escape it.
//!
//! # Design
//! - `TaskClient` is stateless: base URL, path layout and timeout only.
//! - Each operation is split into `build_*` (produces a request) and
//!   `parse_*` (consumes a response), so the I/O boundary is explicit and
//!   classification can be tested without a network.
//! - `classify` owns the status-to-error precedence; `ui_message` owns the
//!   error-to-text table.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod message;
pub mod transport;
pub mod types;
pub mod url;

pub use api::TaskApi;
pub use classify::classify;
pub use client::{is_healthy, TaskClient};
pub use config::{ApiLayout, ClientConfig, ConfigError};
pub use error::{DomainError, ErrorKind, ErrorPayload, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use message::{ui_message, UserMessage};
pub use transport::{Transport, UreqTransport};
pub use types::{NewTask, Task, TaskStatus, TaskUpdate, UnknownStatus};
pub use url::resolve;
