//! `reqwest`-backed implementation of [`ResourceClient`].
//!
//! Every call builds a URL from the configured base, sends one request and
//! either decodes a `{"data": ...}` envelope or turns the failure into a
//! [`TransportError`]. Failure bodies are kept as raw JSON so the message
//! extraction policy can inspect them later.

use super::backend::{ClientResult, ResourceClient};
use super::envelope::Envelope;
use super::error::TransportError;
use crate::domain::error::{AdminError, Result};
use crate::domain::{AddressLevel, Application, ApplicationPatch, NewApplication, Place, StatusChange};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

const APPLICATIONS: &str = "candidate-applications";

/// HTTP client for the candidate-applications API.
#[derive(Debug, Clone)]
pub struct HttpResourceClient {
    http: reqwest::Client,
    base_url: Url,
    api_token: Option<String>,
}

impl HttpResourceClient {
    /// Creates a client rooted at `base_url` (for example `http://localhost:5000/api`).
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Config`] if the base URL is not an absolute http(s) URL,
    /// or [`AdminError::Client`] if the underlying client cannot be built.
    pub fn new(base_url: &str, timeout: Duration, api_token: Option<String>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AdminError::Config(format!("invalid api_base_url '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(AdminError::Config(format!(
                "api_base_url must be an http(s) URL, got '{base_url}'"
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AdminError::Client(e.to_string()))?;

        tracing::debug!(base_url = %base_url, timeout_secs = timeout.as_secs(), "http client created");

        Ok(Self {
            http,
            base_url,
            api_token,
        })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| TransportError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends a request and maps non-success statuses to [`TransportError::Status`].
    async fn send(&self, builder: RequestBuilder) -> ClientResult<reqwest::Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let bytes = response.bytes().await.unwrap_or_default();
        let body = serde_json::from_slice::<serde_json::Value>(&bytes).ok();
        tracing::debug!(status = status.as_u16(), has_body = body.is_some(), "request rejected");

        Err(TransportError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn send_envelope<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<Envelope<T>> {
        let response = self.send(builder).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ResourceClient for HttpResourceClient {
    async fn create_application(&self, payload: &NewApplication) -> ClientResult<Envelope<Application>> {
        let url = self.endpoint(&[APPLICATIONS])?;
        self.send_envelope(self.request(Method::POST, url).json(payload)).await
    }

    async fn list_applications(&self) -> ClientResult<Envelope<Vec<Application>>> {
        let url = self.endpoint(&[APPLICATIONS])?;
        self.send_envelope(self.request(Method::GET, url)).await
    }

    async fn get_application(&self, id: &str) -> ClientResult<Envelope<Application>> {
        let url = self.endpoint(&[APPLICATIONS, id])?;
        self.send_envelope(self.request(Method::GET, url)).await
    }

    async fn update_application(&self, id: &str, patch: &ApplicationPatch) -> ClientResult<Envelope<Application>> {
        let url = self.endpoint(&[APPLICATIONS, id])?;
        self.send_envelope(self.request(Method::PUT, url).json(patch)).await
    }

    async fn delete_application(&self, id: &str) -> ClientResult<()> {
        let url = self.endpoint(&[APPLICATIONS, id])?;
        self.send(self.request(Method::DELETE, url)).await.map(|_| ())
    }

    async fn update_application_status(&self, id: &str, change: &StatusChange) -> ClientResult<Envelope<Application>> {
        let url = self.endpoint(&[APPLICATIONS, id, "status"])?;
        self.send_envelope(self.request(Method::PATCH, url).json(change)).await
    }

    async fn list_places(&self, level: AddressLevel, parent_id: Option<&str>) -> ClientResult<Envelope<Vec<Place>>> {
        let mut url = self.endpoint(&[level.resource()])?;
        if level != AddressLevel::State {
            if let Some(parent_id) = parent_id {
                url.query_pairs_mut().append_pair("parentId", parent_id);
            }
        }
        self.send_envelope(self.request(Method::GET, url)).await
    }
}
