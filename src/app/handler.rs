//! Event handling and state transition logic.
//!
//! This module implements the reducer: [`handle_event`] takes one [`Event`],
//! applies its transition to [`AppState`] and returns the actions to execute.
//! Transitions are deterministic and never perform I/O.
//!
//! # Event Types
//!
//! - **Setters**: `SetSelectedApplication`, `ClearError`, `SetModal`
//! - **Lifecycle**: `Started` when an operation is issued, `Completed` with its
//!   [`OperationResponse`] once it settles
//!
//! # Example
//!
//! ```
//! use candidate_admin::app::{handle_event, AppState, Event};
//! use candidate_admin::operations::{OperationKind, OperationResponse};
//!
//! let mut state = AppState::new();
//! handle_event(&mut state, &Event::Started(OperationKind::List));
//! assert!(state.loading());
//!
//! handle_event(
//!     &mut state,
//!     &Event::Completed(OperationResponse::Listed { applications: vec![] }),
//! );
//! assert!(!state.loading());
//! ```

use super::actions::{Action, Notification};
use super::modals::Modal;
use super::state::AppState;
use crate::domain::Application;
use crate::operations::{OperationKind, OperationResponse};

pub const CREATED_MESSAGE: &str = "Application created successfully";
pub const UPDATED_MESSAGE: &str = "Application updated successfully";
pub const DELETED_MESSAGE: &str = "Application deleted successfully";
pub const STATUS_UPDATED_MESSAGE: &str = "Application status updated successfully";

/// Named transitions the store accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Replaces the selected record. `None` clears it.
    SetSelectedApplication(Option<Application>),
    /// Clears the error message.
    ClearError,
    /// Shows or hides one modal.
    SetModal { modal: Modal, open: bool },
    /// An operation was issued.
    Started(OperationKind),
    /// An operation settled.
    Completed(OperationResponse),
}

/// Applies an event to the state and returns the actions to execute.
///
/// The boolean is `true` when the state changed and the view should re-render.
pub fn handle_event(state: &mut AppState, event: &Event) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event_type = ?EventLabel(event)).entered();

    match event {
        Event::SetSelectedApplication(selected) => {
            let changed = &state.selected_application != selected;
            state.selected_application.clone_from(selected);
            (changed, vec![])
        }
        Event::ClearError => (state.error.take().is_some(), vec![]),
        Event::SetModal { modal, open } => (state.modals.set(*modal, *open), vec![]),
        Event::Started(operation) => {
            tracing::debug!(operation = ?operation, "operation started");
            let changed = !state.loading || state.error.is_some();
            state.loading = true;
            state.error = None;
            (changed, vec![])
        }
        Event::Completed(response) => apply_completion(state, response),
    }
}

fn apply_completion(state: &mut AppState, response: &OperationResponse) -> (bool, Vec<Action>) {
    state.loading = false;

    match response {
        OperationResponse::Created { application } => {
            state.applications.push(application.clone());
            state.modals.set(Modal::Create, false);
            tracing::debug!(id = %application.id, total = state.applications.len(), "application appended");
            (true, vec![Action::Notify(Notification::success(CREATED_MESSAGE))])
        }
        OperationResponse::Listed { applications } => {
            state.applications.clone_from(applications);
            tracing::debug!(total = applications.len(), "collection replaced");
            (true, vec![])
        }
        OperationResponse::Fetched { application } => {
            state.selected_application = Some(application.clone());
            (true, vec![])
        }
        OperationResponse::Updated { application } => {
            reconcile(state, application);
            state.modals.set(Modal::Update, false);
            (true, vec![Action::Notify(Notification::success(UPDATED_MESSAGE))])
        }
        OperationResponse::Deleted { id } => {
            let removed = state.remove_applications(id);
            tracing::debug!(id = %id, removed, "applications removed");
            (true, vec![Action::Notify(Notification::success(DELETED_MESSAGE))])
        }
        OperationResponse::StatusUpdated { application } => {
            reconcile(state, application);
            state.modals.set(Modal::Status, false);
            (true, vec![Action::Notify(Notification::success(STATUS_UPDATED_MESSAGE))])
        }
        OperationResponse::Failed { operation, message } => {
            tracing::debug!(operation = ?operation, message = %message, "operation failed");
            state.error = Some(message.clone());
            (true, vec![Action::Notify(Notification::error(message.clone()))])
        }
    }
}

/// Replaces the matching record in place. A record absent from the collection is ignored.
fn reconcile(state: &mut AppState, application: &Application) {
    if state.replace_application(application) {
        tracing::debug!(id = %application.id, "application replaced in place");
    } else {
        tracing::debug!(id = %application.id, "no matching application; collection unchanged");
    }
}

/// Short event label for spans; payloads can be large.
struct EventLabel<'a>(&'a Event);

impl std::fmt::Debug for EventLabel<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Event::SetSelectedApplication(selected) => {
                write!(f, "SetSelectedApplication({:?})", selected.as_ref().map(|a| &a.id))
            }
            Event::ClearError => f.write_str("ClearError"),
            Event::SetModal { modal, open } => write!(f, "SetModal({modal:?}, {open})"),
            Event::Started(kind) => write!(f, "Started({kind:?})"),
            Event::Completed(response) => write!(
                f,
                "Completed({:?}, success={})",
                response.kind(),
                response.is_success()
            ),
        }
    }
}
