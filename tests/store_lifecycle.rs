mod common;

use candidate_admin::app::{AddressCascade, Modal, Store, CANCELLED_MESSAGE};
use candidate_admin::client::TransportError;
use candidate_admin::domain::{AddressLevel, Place, TeamMember};
use candidate_admin::{
    ApplicationPatch, ApplicationStatus, Event, NewApplication, OperationRequest, OperationResponse, Operations,
    StatusChange,
};
use common::{application, approved, FakeClient, RecordingNotifier};
use std::sync::Arc;
use std::time::Duration;

struct Harness {
    store: Store,
    operations: Operations<FakeClient>,
    client: Arc<FakeClient>,
    notifier: Arc<RecordingNotifier>,
}

fn harness(client: FakeClient) -> Harness {
    let client = Arc::new(client);
    let notifier = Arc::new(RecordingNotifier::default());
    Harness {
        store: Store::new(notifier.clone()),
        operations: Operations::new(client.clone()),
        client,
        notifier,
    }
}

#[tokio::test]
async fn list_mirrors_server_collection() {
    let h = harness(FakeClient::with_records(vec![application("a", "Asha"), application("b", "Bina")]));

    let response = h.store.perform(&h.operations, OperationRequest::list()).await;

    assert!(response.is_success());
    let snapshot = h.store.snapshot();
    assert_eq!(snapshot.applications, vec![application("a", "Asha"), application("b", "Bina")]);
    assert!(!snapshot.loading);
    assert_eq!(snapshot.error, None);
    assert!(h.notifier.messages().is_empty());
}

#[tokio::test]
async fn create_appends_closes_modal_and_notifies() {
    let h = harness(FakeClient::with_records(vec![application("a", "Asha")]));
    h.store.perform(&h.operations, OperationRequest::list()).await;
    h.store.dispatch(&Event::SetModal { modal: Modal::Create, open: true });

    let payload = NewApplication {
        name: "Ravi".to_string(),
        team_members: vec![TeamMember::new("Manu", "98470")],
        ..NewApplication::default()
    };
    h.store.perform(&h.operations, OperationRequest::create(payload)).await;

    let snapshot = h.store.snapshot();
    assert_eq!(snapshot.applications.len(), 2);
    assert_eq!(snapshot.applications[1].name, "Ravi");
    assert_eq!(snapshot.applications[1].team_members[0].name, "Manu");
    assert!(!snapshot.show_create_modal);
    assert_eq!(h.notifier.messages(), vec!["Application created successfully"]);
}

#[tokio::test]
async fn status_change_then_delete() {
    let h = harness(FakeClient::with_records(vec![application("a", "Asha"), application("b", "Bina")]));
    h.store.perform(&h.operations, OperationRequest::list()).await;
    h.store.dispatch(&Event::SetModal { modal: Modal::Status, open: true });

    let change = StatusChange::new(ApplicationStatus::Approved, Some("documents verified".into()));
    h.store
        .perform(&h.operations, OperationRequest::update_status("b".into(), change))
        .await;

    let snapshot = h.store.snapshot();
    assert_eq!(snapshot.applications[0], application("a", "Asha"));
    assert_eq!(snapshot.applications[1].status, ApplicationStatus::Approved);
    assert_eq!(snapshot.applications[1].notes.as_deref(), Some("documents verified"));
    assert!(!snapshot.show_status_modal);

    let response = h.store.perform(&h.operations, OperationRequest::delete("a".into())).await;

    assert_eq!(response, OperationResponse::Deleted { id: "a".into() });
    let snapshot = h.store.snapshot();
    assert_eq!(snapshot.applications.len(), 1);
    assert_eq!(snapshot.applications[0].id, "b");
    assert_eq!(
        h.notifier.messages(),
        vec!["Application status updated successfully", "Application deleted successfully"]
    );
}

#[tokio::test]
async fn update_keeps_position_and_closes_update_modal() {
    let h = harness(FakeClient::with_records(vec![
        application("a", "Asha"),
        application("b", "Bina"),
        application("c", "Chitra"),
    ]));
    h.store.perform(&h.operations, OperationRequest::list()).await;
    h.store.dispatch(&Event::SetModal { modal: Modal::Update, open: true });

    let patch = ApplicationPatch {
        mobile: Some("9847012345".into()),
        ..ApplicationPatch::default()
    };
    h.store.perform(&h.operations, OperationRequest::update("b".into(), patch)).await;

    let snapshot = h.store.snapshot();
    let ids: Vec<_> = snapshot.applications.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(snapshot.applications[1].mobile.as_deref(), Some("9847012345"));
    assert!(!snapshot.show_update_modal);
}

#[tokio::test]
async fn get_by_id_selects_without_touching_collection() {
    let h = harness(FakeClient::with_records(vec![approved("a", "Asha")]));

    h.store.perform(&h.operations, OperationRequest::get_by_id("a".into())).await;

    let snapshot = h.store.snapshot();
    assert_eq!(snapshot.selected_application, Some(approved("a", "Asha")));
    assert!(snapshot.applications.is_empty());
}

#[tokio::test]
async fn server_message_becomes_store_error() {
    let h = harness(FakeClient::with_records(vec![application("a", "Asha")]));
    h.store.perform(&h.operations, OperationRequest::list()).await;
    h.store.dispatch(&Event::SetModal { modal: Modal::Update, open: true });
    h.client.fail_next(TransportError::Status {
        status: 422,
        body: Some(serde_json::json!({"message": "Mobile number is invalid"})),
    });

    let response = h
        .store
        .perform(&h.operations, OperationRequest::update("a".into(), ApplicationPatch::default()))
        .await;

    assert_eq!(response.failure_message(), Some("Mobile number is invalid"));
    let snapshot = h.store.snapshot();
    assert_eq!(snapshot.error.as_deref(), Some("Mobile number is invalid"));
    assert!(!snapshot.loading);
    assert!(snapshot.show_update_modal);
    assert_eq!(snapshot.applications, vec![application("a", "Asha")]);
    assert_eq!(h.notifier.messages(), vec!["Mobile number is invalid"]);
}

#[tokio::test]
async fn missing_response_and_bare_status_use_fallbacks() {
    let h = harness(FakeClient::default());

    h.client.fail_next(TransportError::Network("connection refused".into()));
    h.store.perform(&h.operations, OperationRequest::list()).await;
    assert_eq!(h.store.snapshot().error.as_deref(), Some("Network Error"));

    h.client.fail_next(TransportError::Status { status: 500, body: None });
    h.store.perform(&h.operations, OperationRequest::delete("x".into())).await;
    assert_eq!(h.store.snapshot().error.as_deref(), Some("Something went wrong"));
}

#[tokio::test]
async fn next_started_event_clears_error() {
    let h = harness(FakeClient::default());
    h.client.fail_next(TransportError::Network("timeout".into()));
    h.store.perform(&h.operations, OperationRequest::list()).await;
    assert!(h.store.snapshot().error.is_some());

    h.store.perform(&h.operations, OperationRequest::list()).await;

    assert_eq!(h.store.snapshot().error, None);
}

#[tokio::test(start_paused = true)]
async fn loading_is_visible_while_operation_is_in_flight() {
    let h = harness(FakeClient::with_records(vec![application("a", "Asha")]));
    h.client.delay_next(Duration::from_millis(100));

    let observe = async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        h.store.snapshot().loading
    };
    let (_, loading_mid_flight) = tokio::join!(h.store.perform(&h.operations, OperationRequest::list()), observe);

    assert!(loading_mid_flight);
    assert!(!h.store.snapshot().loading);
}

#[tokio::test(start_paused = true)]
async fn overlapping_status_updates_apply_in_completion_order() {
    let h = harness(FakeClient::with_records(vec![application("a", "Asha")]));
    h.store.perform(&h.operations, OperationRequest::list()).await;

    h.client.delay_next(Duration::from_millis(50));
    h.client.delay_next(Duration::from_millis(10));

    let slow = h.store.perform(
        &h.operations,
        OperationRequest::update_status("a".into(), StatusChange::new(ApplicationStatus::Approved, None)),
    );
    let fast = h.store.perform(
        &h.operations,
        OperationRequest::update_status("a".into(), StatusChange::new(ApplicationStatus::Rejected, None)),
    );
    let (slow, fast) = tokio::join!(slow, fast);

    assert!(slow.is_success() && fast.is_success());
    // The slow request settled last, so its record wins.
    assert_eq!(h.store.snapshot().applications[0].status, ApplicationStatus::Approved);
    assert_eq!(
        h.client.calls().into_iter().filter(|c| c.starts_with("status")).count(),
        2
    );
}

#[tokio::test(start_paused = true)]
async fn abandoned_operation_still_completes_in_store() {
    let h = harness(FakeClient::with_records(vec![application("a", "Asha")]));
    h.client.delay_next(Duration::from_millis(100));

    let outcome = tokio::time::timeout(
        Duration::from_millis(10),
        h.store.perform(&h.operations, OperationRequest::list()),
    )
    .await;
    assert!(outcome.is_err());
    tokio::time::sleep(Duration::from_millis(500)).await;

    let snapshot = h.store.snapshot();
    assert!(!snapshot.loading);
    assert!(snapshot.applications.is_empty());
    assert_eq!(snapshot.error.as_deref(), Some(CANCELLED_MESSAGE));

    h.store.perform(&h.operations, OperationRequest::list()).await;
    let snapshot = h.store.snapshot();
    assert!(!snapshot.loading);
    assert_eq!(snapshot.error, None);
    assert_eq!(snapshot.applications.len(), 1);
}

#[tokio::test]
async fn wrappers_make_exactly_one_call() {
    let h = harness(FakeClient::with_records(vec![application("a", "Asha")]));

    let id = h.operations.delete("a").await.unwrap();
    assert_eq!(id, "a");

    let err = h.operations.get_by_id("a").await.unwrap_err();
    assert_eq!(err.message, "Application not found");

    assert_eq!(h.client.calls(), vec!["delete a", "get a"]);
}

#[tokio::test]
async fn address_cascade_drives_lookups() {
    let client = FakeClient::default();
    client.add_place(AddressLevel::State, None, Place::new("kl", "Kerala"));
    client.add_place(AddressLevel::District, Some("kl"), Place::new("tvm", "Thiruvananthapuram"));
    client.add_place(AddressLevel::District, Some("tn"), Place::new("che", "Chennai"));
    client.add_place(AddressLevel::LegislativeAssembly, Some("tvm"), Place::new("nemom", "Nemom"));
    let h = harness(client);

    let mut cascade = AddressCascade::new();
    let states = h.operations.states().await.unwrap().into_data();
    assert!(cascade.apply_lookup(&AddressCascade::initial_lookup(), states));

    let request = cascade.select_state("kl");
    let districts = h.operations.districts("kl").await.unwrap().into_data();
    assert!(cascade.apply_lookup(&request, districts));
    assert_eq!(cascade.districts(), &[Place::new("tvm", "Thiruvananthapuram")]);

    let request = cascade.select_district("tvm").unwrap();
    let assemblies = h.operations.assemblies("tvm").await.unwrap().into_data();
    assert!(cascade.apply_lookup(&request, assemblies));
    assert!(cascade.select_assembly("nemom"));

    let mut payload = NewApplication::default();
    cascade.apply_to_new(&mut payload);
    assert_eq!(payload.state.as_deref(), Some("kl"));
    assert_eq!(payload.district.as_deref(), Some("tvm"));
    assert_eq!(payload.legislative_assembly.as_deref(), Some("nemom"));
}
