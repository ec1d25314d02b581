//! Domain layer for candidate-admin.
//!
//! This module contains the record types exchanged with the API and the
//! crate-level error type, independent of transport or store concerns.
//!
//! # Organization
//!
//! - [`application`]: Application record and its create/update/status payloads
//! - [`address`]: State / District / Legislative Assembly references
//! - [`error`]: Error types and result aliases
//!
//! # Examples
//!
//! ```
//! use candidate_admin::domain::{Application, ApplicationStatus, StatusChange};
//!
//! let app = Application::new("a1", "Asha Menon");
//! let change = StatusChange::new(ApplicationStatus::Approved, Some("verified".into()));
//! assert_ne!(app.status, change.status);
//! ```

pub mod address;
pub mod application;
pub mod error;
mod lenient;

pub use address::{AddressLevel, Place};
pub use application::{
    Application, ApplicationPatch, ApplicationStatus, Gender, NewApplication, StatusChange,
    TeamMember,
};
pub use error::{AdminError, Result};
