//! Modal visibility flags.
//!
//! Four independent booleans, one per overlay the view can show. Nothing here
//! enforces mutual exclusion: more than one flag may be true at once.

use serde::{Deserialize, Serialize};

/// Overlays whose visibility the store tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modal {
    /// New application form.
    Create,
    /// Edit form seeded from the selected application.
    Update,
    /// Review form (status + notes) for the selected application.
    Status,
    /// Read-only detail view.
    View,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModalFlags {
    create: bool,
    update: bool,
    status: bool,
    view: bool,
}

impl ModalFlags {
    #[must_use]
    pub const fn is_open(&self, modal: Modal) -> bool {
        match modal {
            Modal::Create => self.create,
            Modal::Update => self.update,
            Modal::Status => self.status,
            Modal::View => self.view,
        }
    }

    /// Sets one flag, returning whether it changed.
    pub fn set(&mut self, modal: Modal, open: bool) -> bool {
        let flag = match modal {
            Modal::Create => &mut self.create,
            Modal::Update => &mut self.update,
            Modal::Status => &mut self.status,
            Modal::View => &mut self.view,
        };
        let changed = *flag != open;
        *flag = open;
        changed
    }
}
