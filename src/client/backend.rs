//! Remote resource client abstraction.
//!
//! This module defines the [`ResourceClient`] trait that abstracts over the
//! transport used to reach the candidate-applications API. The operation
//! wrappers and the CLI only ever talk to this trait, so tests can substitute an
//! in-memory implementation for the HTTP one.
//!
//! The trait is minimal and maps one method to one endpoint. It carries no
//! retry, caching, or refetch behaviour.

use super::envelope::Envelope;
use super::error::TransportError;
use crate::domain::{AddressLevel, Application, ApplicationPatch, NewApplication, Place, StatusChange};
use async_trait::async_trait;

/// Result type returned by every client call.
pub type ClientResult<T> = std::result::Result<T, TransportError>;

/// Abstraction over the candidate-applications REST API.
///
/// # Implementations
///
/// - [`HttpResourceClient`](super::HttpResourceClient): `reqwest`-backed (default)
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// `POST /candidate-applications`
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the request fails or the body is not an envelope.
    async fn create_application(&self, payload: &NewApplication) -> ClientResult<Envelope<Application>>;

    /// `GET /candidate-applications`
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the request fails or the body is not an envelope.
    async fn list_applications(&self) -> ClientResult<Envelope<Vec<Application>>>;

    /// `GET /candidate-applications/{id}`
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the request fails or the body is not an envelope.
    async fn get_application(&self, id: &str) -> ClientResult<Envelope<Application>>;

    /// `PUT /candidate-applications/{id}`
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the request fails or the body is not an envelope.
    async fn update_application(&self, id: &str, patch: &ApplicationPatch) -> ClientResult<Envelope<Application>>;

    /// `DELETE /candidate-applications/{id}`
    ///
    /// The response body is not inspected.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the request fails.
    async fn delete_application(&self, id: &str) -> ClientResult<()>;

    /// `PATCH /candidate-applications/{id}/status`
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the request fails or the body is not an envelope.
    async fn update_application_status(&self, id: &str, change: &StatusChange) -> ClientResult<Envelope<Application>>;

    /// `GET /states`, `GET /districts?parentId=..`, `GET /legislative-assemblies?parentId=..`
    ///
    /// `parent_id` is ignored for [`AddressLevel::State`].
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the request fails or the body is not an envelope.
    async fn list_places(&self, level: AddressLevel, parent_id: Option<&str>) -> ClientResult<Envelope<Vec<Place>>>;
}
