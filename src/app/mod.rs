//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the operation wrappers and whatever drives the
//! view (the CLI in `main.rs`). It keeps the client-side mirror of the
//! server's applications and changes it only through named events.
//!
//! # Architecture
//!
//! ```text
//! Caller → Store::perform → Started ─┐
//!                                    ├→ handle_event → AppState + Actions → Notifier
//!   Operations::handle_request → Completed ─┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`address`]: Cascading address selector used by the forms
//! - [`handler`]: Event processing logic and state transitions
//! - [`modals`]: Modal visibility flags
//! - [`state`]: Central state container and its snapshot
//! - [`store`]: Thread-safe store handle and notification sink
//!
//! # Example
//!
//! ```
//! use candidate_admin::app::{handle_event, AppState, Event, Modal};
//!
//! let mut state = AppState::new();
//! let (changed, actions) = handle_event(&mut state, &Event::SetModal { modal: Modal::View, open: true });
//! assert!(changed && actions.is_empty());
//! ```

pub mod actions;
pub mod address;
pub mod handler;
pub mod modals;
pub mod state;
pub mod store;

pub use actions::{Action, Notification, NotificationLevel};
pub use address::{AddressCascade, LookupRequest};
pub use handler::{handle_event, Event};
pub use modals::Modal;
pub use state::{AppState, StoreSnapshot};
pub use store::{Notifier, Store, TracingNotifier, CANCELLED_MESSAGE};
