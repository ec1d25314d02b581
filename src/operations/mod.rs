//! Async operation wrappers and their lifecycle messages.
//!
//! # Architecture
//!
//! - `messages`: request / outcome types with trace context propagation
//! - `handler`: [`Operations`], one async wrapper per API verb
//! - `lookups`: address hierarchy lookups on the same wrapper type

pub mod handler;
pub mod lookups;
pub mod messages;

pub use handler::{OperationError, Operations};
pub use messages::{OperationKind, OperationRequest, OperationResponse, TraceContext};
