//! Shared, thread-safe store.
//!
//! [`Store`] owns one [`AppState`] behind a mutex. Every transition goes
//! through [`Store::dispatch`], which runs the reducer under the lock and then
//! executes the returned actions after the lock is released. Operations run
//! through [`Store::perform`], which emits the *started* event, awaits the
//! wrapper without holding the lock, and emits the completion.

use super::actions::{Action, Notification, NotificationLevel};
use super::handler::{handle_event, Event};
use super::state::{AppState, StoreSnapshot};
use crate::client::ResourceClient;
use crate::operations::{OperationKind, OperationRequest, OperationResponse, Operations};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Failure message applied when an in-flight operation is abandoned.
pub const CANCELLED_MESSAGE: &str = "Operation cancelled";

/// Sink for user-facing notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Notifier that records notifications as tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        match notification.level {
            NotificationLevel::Success => tracing::info!(message = %notification.message, "notification"),
            NotificationLevel::Error => tracing::warn!(message = %notification.message, "notification"),
        }
    }
}

/// Cloneable handle to the shared application state.
///
/// # Example
///
/// ```
/// use candidate_admin::app::{Event, Modal, Store, TracingNotifier};
/// use std::sync::Arc;
///
/// let store = Store::new(Arc::new(TracingNotifier));
/// store.dispatch(&Event::SetModal { modal: Modal::Create, open: true });
/// assert!(store.snapshot().show_create_modal);
/// ```
#[derive(Clone)]
pub struct Store {
    state: Arc<Mutex<AppState>>,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").field("state", &*self.lock()).finish_non_exhaustive()
    }
}

impl Store {
    #[must_use]
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            state: Arc::new(Mutex::new(AppState::new())),
            notifier,
        }
    }

    /// Applies one event and returns whether the state changed.
    pub fn dispatch(&self, event: &Event) -> bool {
        let (changed, actions) = {
            let mut state = self.lock();
            handle_event(&mut state, event)
        };

        tracing::debug!(action_count = actions.len(), changed, "event handled");
        for action in &actions {
            self.execute_action(action);
        }
        changed
    }

    /// Returns an owned copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        self.lock().snapshot()
    }

    /// Runs `f` against the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.lock())
    }

    /// Runs one operation through its full lifecycle and returns its outcome.
    ///
    /// Emits `Started`, awaits the wrapper, then emits `Completed`. The state
    /// lock is never held across the await, so operations may overlap; each
    /// completion is applied in the order it settles.
    ///
    /// If the returned future is dropped before the wrapper settles, a failed
    /// completion with [`CANCELLED_MESSAGE`] is dispatched instead, so
    /// `loading` never outlives the operation.
    pub async fn perform<C>(&self, operations: &Operations<C>, request: OperationRequest) -> OperationResponse
    where
        C: ResourceClient + ?Sized,
    {
        let pending = PendingCompletion::start(self, request.kind());
        let response = operations.handle_request(request).await;
        pending.complete(response.clone());
        response
    }

    fn execute_action(&self, action: &Action) {
        match action {
            Action::Notify(notification) => self.notifier.notify(notification),
        }
    }

    fn lock(&self) -> MutexGuard<'_, AppState> {
        // The reducer never panics mid-transition, so a poisoned state is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Ties a `Started` event to exactly one completion.
struct PendingCompletion<'a> {
    store: &'a Store,
    operation: OperationKind,
    settled: bool,
}

impl<'a> PendingCompletion<'a> {
    fn start(store: &'a Store, operation: OperationKind) -> Self {
        store.dispatch(&Event::Started(operation));
        Self {
            store,
            operation,
            settled: false,
        }
    }

    fn complete(mut self, response: OperationResponse) {
        self.settled = true;
        self.store.dispatch(&Event::Completed(response));
    }
}

impl Drop for PendingCompletion<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        tracing::debug!(operation = ?self.operation, "operation dropped before completion");
        self.store.dispatch(&Event::Completed(OperationResponse::Failed {
            operation: self.operation,
            message: CANCELLED_MESSAGE.to_string(),
        }));
    }
}
