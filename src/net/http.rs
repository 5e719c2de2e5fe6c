//! Request/response model and the send capability middleware wraps.
//!
//! DESIGN
//! ======
//! Everything that talks to the API goes through [`HttpSend`]. Decorators such
//! as the request authenticator implement the same trait over an inner sender,
//! so they compose without the callers knowing what is stacked underneath.
//! Execution is single-threaded (WASM), hence `?Send` futures.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// HTTP status the API uses for a missing, invalid, or expired credential.
pub const STATUS_UNAUTHORIZED: u16 = 401;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// An outgoing API request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self { method, url: url.into(), headers: Vec::new(), body: None }
    }

    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    /// Set a header, replacing any existing value with the same
    /// (case-insensitive) name.
    #[must_use]
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.headers.push((name.to_owned(), value.into()));
        self
    }

    /// Attach a JSON body and the matching content type.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if `value` cannot be serialized.
    pub fn json<T: Serialize>(self, value: &T) -> Result<Self, ApiError> {
        let body = serde_json::to_string(value).map_err(|e| ApiError::Encode(e.to_string()))?;
        let mut request = self.header("Content-Type", "application/json");
        request.body = Some(body);
        Ok(request)
    }

    /// Copy of this request with `name` set; `self` is left untouched.
    #[must_use]
    pub fn with_header(&self, name: &str, value: impl Into<String>) -> Self {
        self.clone().header(name, value)
    }

    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A successful (2xx) API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    /// Deserialize the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Errors produced while talking to the API.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (offline, CORS, aborted).
    #[error("request failed: {0}")]
    Transport(String),

    /// The API answered with a non-success status.
    #[error("API responded with status {status}")]
    Status { status: u16, body: String },

    /// The request body could not be serialized.
    #[error("request encode failed: {0}")]
    Encode(String),

    /// The response body could not be deserialized.
    #[error("response decode failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// True when the API rejected the presented credential.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: STATUS_UNAUTHORIZED, .. })
    }

    /// Human-readable message for display, preferring the API's own
    /// `message` field when the error body carries one.
    #[must_use]
    pub fn user_message(&self) -> String {
        if let Self::Status { body, .. } = self {
            if let Ok(payload) = serde_json::from_str::<serde_json::Value>(body) {
                if let Some(message) = payload.get("message").and_then(serde_json::Value::as_str) {
                    return message.to_owned();
                }
            }
        }
        self.to_string()
    }
}

/// Capability to send a request and wait for its outcome.
#[async_trait(?Send)]
pub trait HttpSend {
    /// Send `request`. Non-2xx responses come back as [`ApiError::Status`].
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError>;
}

#[async_trait(?Send)]
impl<T: HttpSend + ?Sized> HttpSend for std::rc::Rc<T> {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        (**self).send(request).await
    }
}
