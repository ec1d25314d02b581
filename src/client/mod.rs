//! Remote resource client for the candidate-applications API.
//!
//! # Modules
//!
//! - `backend`: [`ResourceClient`] trait, one method per endpoint
//! - `http`: `reqwest` implementation
//! - `envelope`: the `{"data": ...}` success wrapper
//! - `error`: [`TransportError`] and the user-facing message extraction policy

pub mod backend;
pub mod envelope;
pub mod error;
pub mod http;

pub use backend::{ClientResult, ResourceClient};
pub use envelope::Envelope;
pub use error::{TransportError, FALLBACK_ERROR_MESSAGE, NETWORK_ERROR_MESSAGE};
pub use http::HttpResourceClient;
