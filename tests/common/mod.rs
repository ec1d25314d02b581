//! Shared fixtures for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use candidate_admin::app::{Notification, Notifier};
use candidate_admin::client::{ClientResult, Envelope, ResourceClient, TransportError};
use candidate_admin::domain::{AddressLevel, Place};
use candidate_admin::{Application, ApplicationPatch, ApplicationStatus, NewApplication, StatusChange};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

pub fn application(id: &str, name: &str) -> Application {
    Application::new(id, name)
}

pub fn approved(id: &str, name: &str) -> Application {
    Application::new(id, name).with_status(ApplicationStatus::Approved)
}

/// Records every notification it receives.
#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.seen.lock().unwrap().iter().map(|n| n.message.clone()).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        self.seen.lock().unwrap().push(notification.clone());
    }
}

/// In-memory stand-in for the REST API.
///
/// Holds a server-side collection, answers like the real endpoints, and can be
/// told to fail the next call or to delay calls.
#[derive(Default)]
pub struct FakeClient {
    records: Mutex<Vec<Application>>,
    places: Mutex<Vec<(AddressLevel, Option<String>, Place)>>,
    failures: Mutex<VecDeque<TransportError>>,
    delays: Mutex<VecDeque<Duration>>,
    next_id: Mutex<u32>,
    calls: Mutex<Vec<String>>,
}

impl FakeClient {
    pub fn with_records(records: Vec<Application>) -> Self {
        let client = Self::default();
        *client.records.lock().unwrap() = records;
        client
    }

    pub fn add_place(&self, level: AddressLevel, parent: Option<&str>, place: Place) {
        self.places
            .lock()
            .unwrap()
            .push((level, parent.map(str::to_string), place));
    }

    /// Makes the next call fail with `error`.
    pub fn fail_next(&self, error: TransportError) {
        self.failures.lock().unwrap().push_back(error);
    }

    /// Delays the next call by `delay`.
    pub fn delay_next(&self, delay: Duration) {
        self.delays.lock().unwrap().push_back(delay);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn enter(&self, call: String) -> ClientResult<()> {
        self.calls.lock().unwrap().push(call);
        let delay = self.delays.lock().unwrap().pop_front();
        let failure = self.failures.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match failure {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn not_found() -> TransportError {
        TransportError::Status {
            status: 404,
            body: Some(serde_json::json!({"message": "Application not found"})),
        }
    }

    fn modify(&self, id: &str, f: impl FnOnce(&mut Application)) -> ClientResult<Envelope<Application>> {
        let mut records = self.records.lock().unwrap();
        let record = records.iter_mut().find(|app| app.id == id).ok_or_else(Self::not_found)?;
        f(record);
        Ok(Envelope::new(record.clone()))
    }
}

#[async_trait]
impl ResourceClient for FakeClient {
    async fn create_application(&self, payload: &NewApplication) -> ClientResult<Envelope<Application>> {
        self.enter("create".to_string()).await?;
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            format!("new-{next}")
        };
        let mut record = Application::new(id, payload.name.clone());
        record.mobile.clone_from(&payload.mobile);
        record.team_members.clone_from(&payload.team_members);
        self.records.lock().unwrap().push(record.clone());
        Ok(Envelope::new(record))
    }

    async fn list_applications(&self) -> ClientResult<Envelope<Vec<Application>>> {
        self.enter("list".to_string()).await?;
        Ok(Envelope::new(self.records.lock().unwrap().clone()))
    }

    async fn get_application(&self, id: &str) -> ClientResult<Envelope<Application>> {
        self.enter(format!("get {id}")).await?;
        self.modify(id, |_| {})
    }

    async fn update_application(&self, id: &str, patch: &ApplicationPatch) -> ClientResult<Envelope<Application>> {
        self.enter(format!("update {id}")).await?;
        self.modify(id, |record| {
            if let Some(name) = &patch.name {
                record.name.clone_from(name);
            }
            if patch.mobile.is_some() {
                record.mobile.clone_from(&patch.mobile);
            }
        })
    }

    async fn delete_application(&self, id: &str) -> ClientResult<()> {
        self.enter(format!("delete {id}")).await?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|app| app.id != id);
        if records.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }

    async fn update_application_status(&self, id: &str, change: &StatusChange) -> ClientResult<Envelope<Application>> {
        self.enter(format!("status {id} {}", change.status)).await?;
        self.modify(id, |record| {
            record.status = change.status;
            record.notes.clone_from(&change.notes);
        })
    }

    async fn list_places(&self, level: AddressLevel, parent_id: Option<&str>) -> ClientResult<Envelope<Vec<Place>>> {
        self.enter(format!("places {level:?} {parent_id:?}")).await?;
        let places = self
            .places
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, parent, _)| *l == level && (level == AddressLevel::State || parent.as_deref() == parent_id))
            .map(|(_, _, place)| place.clone())
            .collect();
        Ok(Envelope::new(places))
    }
}
