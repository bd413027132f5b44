//! Verb-shaped client for a remote CRUD API.
//!
//! # Design
//! `CrudClient` holds its configuration, the headers derived from it and a
//! `Transport`; nothing changes after construction, so a client can be shared
//! across threads. Each verb is split into a `build_*` method that produces an
//! `ApiRequest` without touching the network, and a convenience method that
//! builds and immediately hands the request to the executor.
//!
//! `create` wraps its payload in a one-element JSON array because the remote
//! API creates items in bulk; `update` sends its payload as given.

use std::fmt;

use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{ApiRequest, ApiResponse, HttpMethod, ResponseFormat};
use crate::transport::{Transport, UreqTransport};

/// Client for one base URL and API key.
pub struct CrudClient<T = UreqTransport> {
    pub(crate) config: ClientConfig,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) transport: T,
}

impl CrudClient<UreqTransport> {
    pub fn new(base_url: &str, api_key: &str, debug: bool) -> Self {
        Self::from_config(ClientConfig::new(base_url, api_key).with_debug(debug))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T: Transport> CrudClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let headers = config.headers();
        Self {
            config,
            headers,
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// GET `collection`, or `collection/filter_id` when a non-empty id is given.
    pub fn build_list(
        &self,
        collection: &str,
        filter_id: Option<&str>,
        format: ResponseFormat,
    ) -> ApiRequest {
        let path = match filter_id {
            Some(id) if !id.is_empty() => item_path(collection, id),
            _ => collection.to_string(),
        };
        ApiRequest {
            path,
            method: HttpMethod::Get,
            format,
            body: None,
        }
    }

    /// POST `collection` with `[payload]`; the response is always JSON.
    pub fn build_create<P>(&self, collection: &str, payload: &P) -> Result<ApiRequest, ApiError>
    where
        P: Serialize + ?Sized,
    {
        let body = serde_json::to_string(&[payload])
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(ApiRequest {
            path: collection.to_string(),
            method: HttpMethod::Post,
            format: ResponseFormat::Json,
            body: Some(body),
        })
    }

    /// PUT `collection/id` with `payload` unwrapped.
    pub fn build_update<P>(
        &self,
        collection: &str,
        id: &str,
        payload: &P,
        format: ResponseFormat,
    ) -> Result<ApiRequest, ApiError>
    where
        P: Serialize + ?Sized,
    {
        let body =
            serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(ApiRequest {
            path: item_path(collection, id),
            method: HttpMethod::Put,
            format,
            body: Some(body),
        })
    }

    /// DELETE `collection/id` without a body; the response is always JSON.
    pub fn build_remove(&self, collection: &str, id: &str) -> ApiRequest {
        ApiRequest {
            path: item_path(collection, id),
            method: HttpMethod::Delete,
            format: ResponseFormat::Json,
            body: None,
        }
    }

    /// Fetch a whole collection, or a single item when `filter_id` is set,
    /// decoded as JSON.
    ///
    /// Whether the result is an array or an object is up to the remote API.
    pub fn list(&self, collection: &str, filter_id: Option<&str>) -> Result<ApiResponse, ApiError> {
        self.list_with_format(collection, filter_id, ResponseFormat::default())
    }

    pub fn list_with_format(
        &self,
        collection: &str,
        filter_id: Option<&str>,
        format: ResponseFormat,
    ) -> Result<ApiResponse, ApiError> {
        self.execute(&self.build_list(collection, filter_id, format))
    }

    pub fn create<P>(&self, collection: &str, payload: &P) -> Result<ApiResponse, ApiError>
    where
        P: Serialize + ?Sized,
    {
        self.execute(&self.build_create(collection, payload)?)
    }

    /// Replace fields of `collection/id`; the response is decoded as JSON.
    pub fn update<P>(&self, collection: &str, id: &str, payload: &P) -> Result<ApiResponse, ApiError>
    where
        P: Serialize + ?Sized,
    {
        self.update_with_format(collection, id, payload, ResponseFormat::default())
    }

    pub fn update_with_format<P>(
        &self,
        collection: &str,
        id: &str,
        payload: &P,
        format: ResponseFormat,
    ) -> Result<ApiResponse, ApiError>
    where
        P: Serialize + ?Sized,
    {
        self.execute(&self.build_update(collection, id, payload, format)?)
    }

    pub fn remove(&self, collection: &str, id: &str) -> Result<ApiResponse, ApiError> {
        self.execute(&self.build_remove(collection, id))
    }
}

impl<T> fmt::Debug for CrudClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // api key stays out of logs
        f.debug_struct("CrudClient")
            .field("base_url", &self.config.base_url)
            .field("debug", &self.config.debug)
            .finish_non_exhaustive()
    }
}

fn item_path(collection: &str, id: &str) -> String {
    format!("{collection}/{id}")
}
