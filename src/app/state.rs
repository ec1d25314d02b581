//! Application state container.
//!
//! [`AppState`] is the client-side mirror of the server's applications: the
//! collection as last listed, the selected record, loading/error flags and the
//! modal flags. Its fields are private to the `app` module; outside code reads
//! through accessors or an owned [`StoreSnapshot`] and changes state only by
//! dispatching events.

use super::modals::{Modal, ModalFlags};
use crate::domain::Application;

/// Central state container mutated by the reducer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Collection in the order the list operation returned it. Not deduplicated.
    pub(super) applications: Vec<Application>,

    /// Full copy of the selected record, independent of any modal flag.
    pub(super) selected_application: Option<Application>,

    /// True from a *started* event until the next completion.
    pub(super) loading: bool,

    /// Message of the last failed operation, cleared by the next *started* event.
    pub(super) error: Option<String>,

    pub(super) modals: ModalFlags,
}

/// Owned, read-only copy of the store's state for rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreSnapshot {
    pub applications: Vec<Application>,
    pub selected_application: Option<Application>,
    pub loading: bool,
    pub error: Option<String>,
    pub show_create_modal: bool,
    pub show_update_modal: bool,
    pub show_status_modal: bool,
    pub show_view_modal: bool,
}

impl AppState {
    /// Creates an empty state: no records, nothing selected, not loading, all modals closed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    #[must_use]
    pub const fn selected_application(&self) -> Option<&Application> {
        self.selected_application.as_ref()
    }

    #[must_use]
    pub const fn loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub const fn is_modal_open(&self, modal: Modal) -> bool {
        self.modals.is_open(modal)
    }

    /// Returns the first record with the given id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Application> {
        self.applications.iter().find(|app| app.id == id)
    }

    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            applications: self.applications.clone(),
            selected_application: self.selected_application.clone(),
            loading: self.loading,
            error: self.error.clone(),
            show_create_modal: self.modals.is_open(Modal::Create),
            show_update_modal: self.modals.is_open(Modal::Update),
            show_status_modal: self.modals.is_open(Modal::Status),
            show_view_modal: self.modals.is_open(Modal::View),
        }
    }

    /// Replaces the first record whose id matches, keeping its index.
    ///
    /// Returns `false` and leaves the collection untouched when no record matches.
    pub(super) fn replace_application(&mut self, application: &Application) -> bool {
        match self.applications.iter_mut().find(|app| app.id == application.id) {
            Some(slot) => {
                slot.clone_from(application);
                true
            }
            None => false,
        }
    }

    /// Removes every record with the given id and returns how many were removed.
    pub(super) fn remove_applications(&mut self, id: &str) -> usize {
        let before = self.applications.len();
        self.applications.retain(|app| app.id != id);
        before - self.applications.len()
    }
}
