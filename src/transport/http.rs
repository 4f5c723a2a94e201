use crate::{Error, ErrorContext, Result};
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::time::Duration;
use tracing::debug;

/// Thin HTTP layer over the speech service.
///
/// Maps connection failures to [`Error::ServiceUnavailable`] and non-success statuses to
/// [`Error::Service`]; everything above this layer only sees those two shapes.
///
/// A refused, reset or aborted connection and a timeout that elapses before the response
/// head arrives all count as connection failures. A timeout while reading the body of a
/// response that has already started surfaces as [`Error::Transport`].
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

/// Body of a successful binary response.
#[derive(Debug, Clone)]
pub struct BinaryResponse {
    pub body: Bytes,
    pub content_type: Option<String>,
}

impl HttpTransport {
    /// Both timeouts are off when `None`, which leaves reqwest's defaults (no limit).
    pub fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
        connect_timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        let client = builder.build().map_err(|e| {
            Error::configuration_with_context(
                format!("Failed to create HTTP client: {}", e),
                ErrorContext::new().with_source("http_transport"),
            )
        })?;

        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET <path>` and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.client.get(self.url(path));
        let response = self.send(request, "GET", path).await?;
        Self::decode_json(response, path).await
    }

    /// `POST <path>?<params>` with an empty body and decode the JSON body.
    pub async fn post_for_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let request = self.client.post(self.url(path)).query(params);
        let response = self.send(request, "POST", path).await?;
        Self::decode_json(response, path).await
    }

    /// `POST <path>?<params>` with a JSON body and return the raw response body.
    pub async fn post_json_for_bytes<B: Serialize + ?Sized>(
        &self,
        path: &str,
        params: &[(&str, String)],
        body: &B,
    ) -> Result<BinaryResponse> {
        let request = self
            .client
            .post(self.url(path))
            .query(params)
            .header(CONTENT_TYPE, "application/json")
            .json(body);
        let response = self.send(request, "POST", path).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let body = response.bytes().await.map_err(|e| map_read_error(e, path))?;

        Ok(BinaryResponse { body, content_type })
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        method: &str,
        path: &str,
    ) -> Result<reqwest::Response> {
        debug!(method, path, "sending request to speech service");
        let response = request.send().await.map_err(|e| map_send_error(e, path))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!(method, path, error = %e, "failed to read error body");
                String::new()
            }
        };
        debug!(method, path, status = status.as_u16(), "speech service returned an error");
        let message = error_message(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
        Err(Error::service(status.as_u16(), message))
    }

    async fn decode_json<T: DeserializeOwned>(response: reqwest::Response, path: &str) -> Result<T> {
        let bytes = response.bytes().await.map_err(|e| map_read_error(e, path))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Errors from `send()`: no response head was received.
fn map_send_error(e: reqwest::Error, path: &str) -> Error {
    // hyper reports a peer that hangs up before answering as a request error.
    if e.is_connect() || e.is_timeout() || e.is_request() || is_connection_loss(&e) {
        unavailable(e, path)
    } else {
        Error::Transport(TransportError::Http(e))
    }
}

/// Errors while reading a body whose response head already arrived.
fn map_read_error(e: reqwest::Error, path: &str) -> Error {
    if is_connection_loss(&e) {
        unavailable(e, path)
    } else {
        Error::Transport(TransportError::Http(e))
    }
}

fn unavailable(e: reqwest::Error, path: &str) -> Error {
    Error::unavailable_with_context(
        e.to_string(),
        ErrorContext::new().with_source("http_transport").with_details(path),
    )
}

/// Walks the source chain to the first `std::io::Error` and checks for a dropped connection.
fn is_connection_loss(e: &(dyn std::error::Error + 'static)) -> bool {
    let mut source = e.source();
    while let Some(err) = source {
        if let Some(io) = err.downcast_ref::<std::io::Error>() {
            return matches!(
                io.kind(),
                ErrorKind::ConnectionRefused
                    | ErrorKind::ConnectionReset
                    | ErrorKind::ConnectionAborted
                    | ErrorKind::NotConnected
                    | ErrorKind::BrokenPipe
                    | ErrorKind::TimedOut
                    | ErrorKind::UnexpectedEof
            );
        }
        source = err.source();
    }
    false
}

/// Pulls a readable message out of an error body.
///
/// The engine answers failures with `{"detail": ...}`; `detail` is either a string or a
/// list of validation entries. Anything else is returned as trimmed text.
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(obj)) => match obj.get("detail") {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Array(items)) => {
                let msgs: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                    .collect();
                if msgs.is_empty() {
                    Some(trimmed.to_string())
                } else {
                    Some(msgs.join("; "))
                }
            }
            _ => Some(trimmed.to_string()),
        },
        _ => Some(trimmed.to_string()),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
