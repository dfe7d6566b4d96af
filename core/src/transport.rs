//! Executing `HttpRequest` values over the network.
//!
//! `Transport` is the I/O seam: `TaskApi` only ever sees this trait, so tests
//! can substitute a scripted implementation. `UreqTransport` is the blocking
//! production implementation. HTTP error statuses are returned as responses,
//! not errors; only failures to complete the round-trip are `TransportError`s.

use std::io;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::DEFAULT_TIMEOUT;
use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one HTTP round-trip.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a shared `ureq::Agent` connection pool.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    timeout: Duration,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl UreqTransport {
    /// `timeout` applies to requests that do not carry their own.
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent, timeout }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");

        let timeout = Some(request.timeout.unwrap_or(self.timeout));
        let result = match request.method {
            HttpMethod::Get => {
                prepare(self.agent.get(&request.url).config().timeout_global(timeout).build(), request).call()
            }
            HttpMethod::Delete => {
                prepare(self.agent.delete(&request.url).config().timeout_global(timeout).build(), request).call()
            }
            HttpMethod::Post | HttpMethod::Put => {
                let builder = if request.method == HttpMethod::Post {
                    self.agent.post(&request.url)
                } else {
                    self.agent.put(&request.url)
                };
                let builder = prepare(builder.config().timeout_global(timeout).build(), request);
                match &request.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = result.map_err(|e| log_failure(request, map_error(e)))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
            .collect();
        // Bodies that are not UTF-8 still classify by status.
        let bytes = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| log_failure(request, map_error(e)))?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        debug!(status, url = %request.url, "received response");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn prepare<B>(mut builder: ureq::RequestBuilder<B>, request: &HttpRequest) -> ureq::RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }
    builder
}

fn log_failure(request: &HttpRequest, error: TransportError) -> TransportError {
    warn!(method = request.method.as_str(), url = %request.url, %error, "request failed");
    error
}

/// Sort ureq failures into connect, timeout and everything else.
fn map_error(error: ureq::Error) -> TransportError {
    match error {
        ureq::Error::Timeout(_) => TransportError::Timeout(error.to_string()),
        ureq::Error::HostNotFound | ureq::Error::ConnectionFailed => {
            TransportError::Connect(error.to_string())
        }
        ureq::Error::Io(io_error) => map_io_error(io_error),
        other => TransportError::Other(other.to_string()),
    }
}

fn map_io_error(error: io::Error) -> TransportError {
    match error.kind() {
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TransportError::Timeout(error.to_string()),
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::NotConnected
        | io::ErrorKind::AddrNotAvailable
        | io::ErrorKind::BrokenPipe
        | io::ErrorKind::UnexpectedEof => TransportError::Connect(error.to_string()),
        _ => TransportError::Other(error.to_string()),
    }
}
