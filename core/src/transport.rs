//! The network seam between the executor and the remote API.
//!
//! # Design
//! `Transport` performs exactly one round-trip and reports every status code
//! as data. Status interpretation and body decoding stay in the executor so
//! that any transport, including test fakes, gets identical semantics.
//!
//! Redirects are not followed: a 3xx is an ordinary response, which the
//! executor rejects like any other unaccepted status. Bodies are read whole,
//! without a size limit.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes a single `HttpRequest`.
///
/// Implementations must not retry and must return non-2xx responses as
/// `Ok(HttpResponse)`. Only failures that prevent a response from being
/// read are reported as `ApiError::Network`.
pub trait Transport: Send + Sync {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking transport backed by a `ureq::Agent`.
///
/// The agent reports every status as data and never follows redirects.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(0)
            .max_redirects_will_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send_body(
    builder: ureq::RequestBuilder<ureq::typestate::WithBody>,
    body: Option<&str>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = request.url.as_str();
        let headers = request.headers.as_slice();
        let body = request.body.as_deref();

        let result = match request.method {
            HttpMethod::Get => with_headers(self.agent.get(url), headers).call(),
            HttpMethod::Post => send_body(with_headers(self.agent.post(url), headers), body),
            HttpMethod::Put => send_body(with_headers(self.agent.put(url), headers), body),
            HttpMethod::Delete => {
                let builder = with_headers(self.agent.delete(url), headers);
                match body {
                    Some(_) => send_body(builder.force_send_body(), body),
                    None => builder.call(),
                }
            }
        };
        let mut response = result.map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}


/// Recording transport for unit tests: answers every request with the same
/// canned reply and keeps a copy of what was sent.
#[cfg(test)]
pub(crate) mod fake {
    use std::sync::Mutex;

    use super::Transport;
    use crate::error::ApiError;
    use crate::http::{HttpRequest, HttpResponse};

    enum Reply {
        Response(HttpResponse),
        Network(String),
    }

    pub(crate) struct FakeTransport {
        reply: Reply,
        sent: Mutex<Vec<HttpRequest>>,
    }

    impl FakeTransport {
        pub(crate) fn responding(status: u16, body: &str) -> Self {
            Self {
                reply: Reply::Response(HttpResponse {
                    status,
                    headers: Vec::new(),
                    body: body.as_bytes().to_vec(),
                }),
                sent: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing(message: &str) -> Self {
            Self {
                reply: Reply::Network(message.to_string()),
                sent: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn sent(&self) -> Vec<HttpRequest> {
            self.sent.lock().unwrap().clone()
        }

        pub(crate) fn last(&self) -> HttpRequest {
            self.sent().pop().expect("no request was sent")
        }
    }

    impl Transport for FakeTransport {
        fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            self.sent.lock().unwrap().push(request.clone());
            match &self.reply {
                Reply::Response(response) => Ok(response.clone()),
                Reply::Network(message) => Err(ApiError::Network(message.clone())),
            }
        }
    }
}
