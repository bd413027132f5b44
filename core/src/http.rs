//! Plain-data request and response types.
//!
//! # Design
//! The client builds `ApiRequest` descriptors, the executor turns them into
//! `HttpRequest` values, and a `Transport` hands back an `HttpResponse`. None
//! of these types touch the network, so every step before and after the
//! round-trip can be checked without a server.
//!
//! Bodies are carried as already-serialized JSON strings; the remote API
//! defines the shape of everything it returns, so responses decode into
//! `serde_json::Value` rather than typed DTOs.

use std::fmt;

use serde_json::Value;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Upper-case name as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a response body is handed back to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    /// Decode the body as JSON.
    #[default]
    Json,
    /// Return the body untouched.
    Text,
}

/// A verb-level request, relative to the client's base URL.
///
/// Produced by the `CrudClient::build_*` methods and consumed by
/// `CrudClient::execute`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub path: String,
    pub method: HttpMethod,
    pub format: ResponseFormat,
    /// Serialized JSON payload. Dropped by the executor for GET.
    pub body: Option<String>,
}

/// An HTTP request described as plain data, ready for a `Transport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Transports return this for every status code; deciding which statuses
/// count as failures is left to `parse_response`. The body is kept as raw
/// bytes so that text conversion and JSON decoding happen in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Response headers with valid UTF-8 values. Diagnostic only: the
    /// executor logs them at `trace` level and never branches on them.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// A successful response, decoded according to its `ResponseFormat`.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Json(Value),
    Text(String),
}

impl ApiResponse {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ApiResponse::Json(value) => Some(value),
            ApiResponse::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ApiResponse::Json(_) => None,
            ApiResponse::Text(text) => Some(text.as_str()),
        }
    }

    /// Returns the decoded JSON, or `Value::Null` for a text response.
    pub fn into_json(self) -> Value {
        match self {
            ApiResponse::Json(value) => value,
            ApiResponse::Text(_) => Value::Null,
        }
    }
}
