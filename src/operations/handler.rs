//! Async operation wrappers around the remote resource client.
//!
//! Each wrapper performs exactly one client call and settles in one of two
//! ways: the declared success shape, or an [`OperationError`] carrying the
//! message extracted from the transport error. There is no retry and no
//! follow-up request; reconciling local state is the store's job.

use super::messages::{OperationKind, OperationRequest, OperationResponse};
use crate::client::{Envelope, ResourceClient, TransportError};
use crate::domain::{Application, ApplicationPatch, NewApplication, StatusChange};
use std::sync::Arc;
use thiserror::Error;
use tracing::Instrument;

/// Failure of an operation, reduced to the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct OperationError {
    pub message: String,
}

impl OperationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<&TransportError> for OperationError {
    fn from(err: &TransportError) -> Self {
        Self::new(err.user_message())
    }
}

/// Operation wrappers bound to a [`ResourceClient`].
///
/// Cheap to clone; clones share the client.
#[derive(Debug)]
pub struct Operations<C: ?Sized> {
    client: Arc<C>,
}

impl<C: ?Sized> Clone for Operations<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: ResourceClient + ?Sized> Operations<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Logs a failed call and reduces it to its user-facing message.
    pub(super) fn failure(operation: OperationKind, err: &TransportError) -> OperationError {
        let failure = OperationError::from(err);
        tracing::debug!(
            operation = ?operation,
            error = %err,
            message = %failure.message,
            "operation failed"
        );
        failure
    }

    /// Creates an application.
    ///
    /// # Errors
    ///
    /// Returns the extracted failure message if the call fails.
    pub async fn create(&self, payload: &NewApplication) -> Result<Envelope<Application>, OperationError> {
        self.client
            .create_application(payload)
            .await
            .map_err(|e| Self::failure(OperationKind::Create, &e))
    }

    /// Lists all applications.
    ///
    /// # Errors
    ///
    /// Returns the extracted failure message if the call fails.
    pub async fn list(&self) -> Result<Envelope<Vec<Application>>, OperationError> {
        self.client
            .list_applications()
            .await
            .map_err(|e| Self::failure(OperationKind::List, &e))
    }

    /// Fetches one application.
    ///
    /// # Errors
    ///
    /// Returns the extracted failure message if the call fails.
    pub async fn get_by_id(&self, id: &str) -> Result<Envelope<Application>, OperationError> {
        self.client
            .get_application(id)
            .await
            .map_err(|e| Self::failure(OperationKind::GetById, &e))
    }

    /// Updates an application with a partial payload.
    ///
    /// # Errors
    ///
    /// Returns the extracted failure message if the call fails.
    pub async fn update(&self, id: &str, patch: &ApplicationPatch) -> Result<Envelope<Application>, OperationError> {
        self.client
            .update_application(id, patch)
            .await
            .map_err(|e| Self::failure(OperationKind::Update, &e))
    }

    /// Deletes an application and echoes its id back.
    ///
    /// # Errors
    ///
    /// Returns the extracted failure message if the call fails.
    pub async fn delete(&self, id: &str) -> Result<String, OperationError> {
        self.client
            .delete_application(id)
            .await
            .map(|()| id.to_string())
            .map_err(|e| Self::failure(OperationKind::Delete, &e))
    }

    /// Changes the review status (and notes) of an application.
    ///
    /// # Errors
    ///
    /// Returns the extracted failure message if the call fails.
    pub async fn update_status(&self, id: &str, change: &StatusChange) -> Result<Envelope<Application>, OperationError> {
        self.client
            .update_application_status(id, change)
            .await
            .map_err(|e| Self::failure(OperationKind::UpdateStatus, &e))
    }

    /// Runs a request message and converts the result into a lifecycle outcome.
    ///
    /// The work runs inside a debug span parented to the request's trace
    /// context when one was captured.
    pub async fn handle_request(&self, request: OperationRequest) -> OperationResponse {
        let kind = request.kind();
        let span = tracing::debug_span!("operation", operation = ?kind);
        if let Some(parent) = parent_trace_context(&request) {
            use tracing_opentelemetry::OpenTelemetrySpanExt;
            span.set_parent(parent);
        }

        async move {
            let outcome = self.execute(request).await;
            settle(kind, outcome)
        }
        .instrument(span)
        .await
    }

    async fn execute(&self, request: OperationRequest) -> Result<OperationResponse, OperationError> {
        match request {
            OperationRequest::Create { payload, .. } => {
                let envelope = self.create(&payload).await?;
                Ok(OperationResponse::Created {
                    application: envelope.into_data(),
                })
            }
            OperationRequest::List { .. } => {
                let envelope = self.list().await?;
                Ok(OperationResponse::Listed {
                    applications: envelope.into_data(),
                })
            }
            OperationRequest::GetById { id, .. } => {
                let envelope = self.get_by_id(&id).await?;
                Ok(OperationResponse::Fetched {
                    application: envelope.into_data(),
                })
            }
            OperationRequest::Update { id, patch, .. } => {
                let envelope = self.update(&id, &patch).await?;
                Ok(OperationResponse::Updated {
                    application: envelope.into_data(),
                })
            }
            OperationRequest::Delete { id, .. } => {
                let id = self.delete(&id).await?;
                Ok(OperationResponse::Deleted { id })
            }
            OperationRequest::UpdateStatus { id, change, .. } => {
                let envelope = self.update_status(&id, &change).await?;
                Ok(OperationResponse::StatusUpdated {
                    application: envelope.into_data(),
                })
            }
        }
    }
}

/// Folds a wrapper result into a lifecycle outcome.
fn settle(operation: OperationKind, outcome: Result<OperationResponse, OperationError>) -> OperationResponse {
    match outcome {
        Ok(response) => {
            tracing::debug!(operation = ?operation, "operation succeeded");
            response
        }
        Err(OperationError { message }) => OperationResponse::Failed { operation, message },
    }
}

/// Rebuilds the OpenTelemetry context captured when the request was built.
fn parent_trace_context(request: &OperationRequest) -> Option<opentelemetry::Context> {
    use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

    let trace_context = request.trace_context()?;
    let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
    let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

    let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());

    Some(opentelemetry::Context::current().with_remote_span_context(span_context))
}
