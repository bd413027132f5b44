//! The single path from an `ApiRequest` to a decoded response.
//!
//! # Design
//! Every verb funnels through `CrudClient::execute`, which is split the same
//! way the verbs are: `prepare` builds the concrete `HttpRequest`,
//! the transport performs one round-trip, and `parse_response` applies the
//! status and decoding rules. `prepare` and `parse_response` are pure, so the
//! wire contract can be checked against recorded vectors without a server.
//!
//! Status 403 counts as a normal response. The remote API answers
//! authorization failures with a body that callers are expected to inspect,
//! so it is returned rather than raised. Whether that is deliberate on the
//! remote side is unknown; keep it in mind when handling results.

use tracing::{debug, error, trace};

use crate::client::CrudClient;
use crate::error::ApiError;
use crate::http::{ApiRequest, ApiResponse, HttpMethod, HttpRequest, HttpResponse, ResponseFormat};
use crate::transport::Transport;

/// Status codes returned to the caller instead of raised.
pub const ACCEPTED_STATUSES: [u16; 3] = [200, 201, 403];

impl<T: Transport> CrudClient<T> {
    /// Resolve `request` against the base URL and attach the client headers.
    ///
    /// The path is appended to the base URL as-is. Any body on a GET request
    /// is dropped.
    pub fn prepare(&self, request: &ApiRequest) -> HttpRequest {
        let body = match request.method {
            HttpMethod::Get => None,
            _ => request.body.clone(),
        };
        HttpRequest {
            method: request.method,
            url: format!("{}{}", self.config.base_url, request.path),
            headers: self.headers.clone(),
            body,
        }
    }

    /// Send `request` and decode the response.
    ///
    /// Failures are returned unchanged and never retried. With the client's
    /// debug flag set, each failure is also reported as an `error` event.
    pub fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let http = self.prepare(request);
        debug!(method = %http.method, url = %http.url, "sending request");

        let result = self.transport.send(&http).and_then(|response| {
            debug!(status = response.status, bytes = response.body.len(), "received response");
            trace!(headers = ?response.headers, "response headers");
            parse_response(request.format, response)
        });

        if let Err(err) = &result {
            if self.config.debug {
                error!(method = %request.method, path = %request.path, "request failed: {err}");
            }
        }
        result
    }
}

/// Apply the status and decoding rules to a raw response.
///
/// Statuses in `ACCEPTED_STATUSES` are decoded according to `format`; any
/// other status becomes `ApiError::Status` carrying the body. Text bodies
/// that are not valid UTF-8 are converted lossily; under `Json` the same
/// bytes are a decode error.
pub fn parse_response(
    format: ResponseFormat,
    response: HttpResponse,
) -> Result<ApiResponse, ApiError> {
    if !ACCEPTED_STATUSES.contains(&response.status) {
        return Err(ApiError::Status {
            status: response.status,
            body: into_text(response.body),
        });
    }
    match format {
        ResponseFormat::Json => serde_json::from_slice(&response.body)
            .map(ApiResponse::Json)
            .map_err(|e| ApiError::Decode(e.to_string())),
        ResponseFormat::Text => Ok(ApiResponse::Text(into_text(response.body))),
    }
}

fn into_text(body: Vec<u8>) -> String {
    match String::from_utf8(body) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}
