//! Request builder and transport executor for the Signicat API.
//!
//! # Design
//! `SignicatClient` holds only a parsed base URL and the caller's
//! `Transport`, both fixed after construction. Building a request and
//! executing it are separate steps: `new_request` produces an `HttpRequest`
//! that can be inspected or executed elsewhere, and `execute` / `send_json` /
//! `send_to_writer` run it through the transport and interpret the response.
//! The free functions `check_status` and `parse_json` apply the same rules to
//! responses obtained some other way.

use std::io::Write;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::signature::Signature;

/// Blocking client for the Signicat API.
///
/// Safe to share between threads whenever the transport is.
#[derive(Debug, Clone)]
pub struct SignicatClient<T> {
    base_url: Url,
    transport: T,
}

impl<T: Transport> SignicatClient<T> {
    /// Fails if `base_url` is malformed or cannot have paths resolved
    /// against it (e.g. `mailto:`).
    pub fn new(transport: T, base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url)?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot be a base".to_string(),
            });
        }
        Ok(Self {
            base_url: parsed,
            transport,
        })
    }

    pub fn from_config(transport: T, config: &ClientConfig) -> Result<Self> {
        Self::new(transport, &config.base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Signature endpoints, borrowing this client.
    pub fn signature(&self) -> Signature<'_, T> {
        Signature::new(self)
    }

    /// Resolve `relative` against the base URL with standard URL-merge rules:
    /// the last base segment is replaced unless the base ends with `/`.
    pub fn resolve(&self, relative: &str) -> Result<Url> {
        Ok(self.base_url.join(relative)?)
    }

    /// Build a request for `relative`. A body is serialized to JSON and
    /// marked `application/json`; without one the request has neither
    /// payload nor content type.
    pub fn new_request<B>(
        &self,
        method: HttpMethod,
        relative: &str,
        body: Option<&B>,
    ) -> Result<HttpRequest>
    where
        B: Serialize + ?Sized,
    {
        let url = self.resolve(relative)?;
        request_for(method, url, body)
    }

    /// Run `request` through the transport and reject non-2xx responses.
    pub fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.transport.execute(request)?;
        debug!(status = response.status, bytes = response.body.len(), "received response");
        check_status(&response)?;
        Ok(response)
    }

    /// Execute and decode the JSON body. An empty body yields `R::default()`.
    pub fn send_json<R>(&self, request: &HttpRequest) -> Result<R>
    where
        R: DeserializeOwned + Default,
    {
        let response = self.execute(request)?;
        parse_json(&response)
    }

    /// Execute and copy the raw body to `sink` unchanged. Returns the number
    /// of bytes written.
    pub fn send_to_writer<W>(&self, request: &HttpRequest, sink: &mut W) -> Result<u64>
    where
        W: Write + ?Sized,
    {
        let response = self.execute(request)?;
        sink.write_all(&response.body)?;
        sink.flush()?;
        Ok(response.body.len() as u64)
    }
}

/// Build a request for an already resolved URL.
pub fn request_for<B>(method: HttpMethod, url: Url, body: Option<&B>) -> Result<HttpRequest>
where
    B: Serialize + ?Sized,
{
    let (headers, body) = match body {
        Some(value) => {
            let encoded = serde_json::to_vec(value).map_err(ApiError::Serialization)?;
            (
                vec![("content-type".to_string(), "application/json".to_string())],
                Some(encoded),
            )
        }
        None => (Vec::new(), None),
    };
    Ok(HttpRequest {
        method,
        url: url.into(),
        headers,
        body,
    })
}

/// Map any status outside 200..=299 to `ApiError::HttpStatus`.
pub fn check_status(response: &HttpResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }
    warn!(status = response.status, "request failed");
    Err(ApiError::HttpStatus {
        status: response.status,
    })
}

/// Decode a JSON body, treating an empty body as "no content".
pub fn parse_json<R>(response: &HttpResponse) -> Result<R>
where
    R: DeserializeOwned + Default,
{
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(R::default());
    }
    serde_json::from_slice(&response.body).map_err(ApiError::Deserialization)
}
