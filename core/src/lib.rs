//! Blocking client for a remote CRUD HTTP API.
//!
//! # Overview
//! Maps four verbs onto HTTP calls against a configurable base URL:
//! `list` (GET), `create` (POST), `update` (PUT) and `remove` (DELETE). Every
//! request carries `Content-Type: application/json` and a bearer token, and
//! responses come back as decoded JSON or raw text.
//!
//! # Design
//! - `CrudClient` is immutable after construction and holds no per-call state.
//! - Each verb has a pure `build_*` counterpart; `CrudClient::prepare` and
//!   `parse_response` are pure as well, so only `Transport::send` does I/O.
//! - `Transport` is a trait so tests can record requests; `UreqTransport` is
//!   the default.
//! - Statuses 200, 201 and 403 are returned to the caller; everything else is
//!   an `ApiError`. No call is ever retried.

pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod http;
pub mod transport;

pub use client::CrudClient;
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError};
pub use executor::{parse_response, ACCEPTED_STATUSES};
pub use http::{ApiRequest, ApiResponse, HttpMethod, HttpRequest, HttpResponse, ResponseFormat};
pub use transport::{Transport, UreqTransport};
