//! Operation request and lifecycle outcome types.
//!
//! An [`OperationRequest`] describes one call to the API; running it through
//! [`Operations::handle_request`](super::Operations::handle_request) yields an
//! [`OperationResponse`], which the store consumes as a *succeeded* or *failed*
//! lifecycle event. Requests carry a [`TraceContext`] so the span that executes
//! them links back to the span that issued them.

use crate::domain::{Application, ApplicationPatch, NewApplication, StatusChange};
use serde::{Deserialize, Serialize};

/// Distributed tracing context for linking an operation span to its issuer.
///
/// Captures the current trace and span IDs from OpenTelemetry when a request
/// is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span ID of the issuing span.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if no OpenTelemetry layer is installed or the current
    /// span context is invalid.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Remote operations, used to label lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    Create,
    List,
    GetById,
    Update,
    Delete,
    UpdateStatus,
    /// State, district, or assembly lookup.
    AddressLookup,
}

/// Generates builder methods for `OperationRequest` variants.
///
/// Each builder attaches the current trace context.
macro_rules! operation_request_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl OperationRequest {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " request with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

operation_request_builders! {
    create(Create { payload: NewApplication }),
    list(List {}),
    get_by_id(GetById { id: String }),
    update(Update { id: String, patch: ApplicationPatch }),
    delete(Delete { id: String }),
    update_status(UpdateStatus { id: String, change: StatusChange }),
}

/// A single call against the candidate-applications API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OperationRequest {
    Create {
        payload: NewApplication,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
    List {
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
    GetById {
        id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
    Update {
        id: String,
        patch: ApplicationPatch,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
    Delete {
        id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
    UpdateStatus {
        id: String,
        change: StatusChange,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl OperationRequest {
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        match self {
            Self::Create { .. } => OperationKind::Create,
            Self::List { .. } => OperationKind::List,
            Self::GetById { .. } => OperationKind::GetById,
            Self::Update { .. } => OperationKind::Update,
            Self::Delete { .. } => OperationKind::Delete,
            Self::UpdateStatus { .. } => OperationKind::UpdateStatus,
        }
    }

    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::Create { trace_context, .. }
            | Self::List { trace_context }
            | Self::GetById { trace_context, .. }
            | Self::Update { trace_context, .. }
            | Self::Delete { trace_context, .. }
            | Self::UpdateStatus { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Settled outcome of an operation.
///
/// Every variant except `Failed` is a *succeeded* lifecycle event carrying the
/// unwrapped envelope payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OperationResponse {
    Created { application: Application },
    Listed { applications: Vec<Application> },
    Fetched { application: Application },
    Updated { application: Application },
    /// Carries the id that was passed in, echoed back.
    Deleted { id: String },
    StatusUpdated { application: Application },
    Failed {
        operation: OperationKind,
        /// Human-readable message for the user.
        message: String,
    },
}

impl OperationResponse {
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        match self {
            Self::Created { .. } => OperationKind::Create,
            Self::Listed { .. } => OperationKind::List,
            Self::Fetched { .. } => OperationKind::GetById,
            Self::Updated { .. } => OperationKind::Update,
            Self::Deleted { .. } => OperationKind::Delete,
            Self::StatusUpdated { .. } => OperationKind::UpdateStatus,
            Self::Failed { operation, .. } => *operation,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }

    /// Returns the failure message, if this is a failed outcome.
    #[must_use]
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Self::Failed { message, .. } => Some(message),
            _ => None,
        }
    }
}
