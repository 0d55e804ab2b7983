//! Store integration tests: snapshot publication, gateway feedback, and
//! agreement with the pure transition function.

#![allow(clippy::unwrap_used)] // Test code

use concierge_core::payload::{ErrorPayload, ListPayload};
use concierge_core::resource::{
    Outcome, RequestStatus, Resource, ResourceAction, ResourceEnvironment, ResourceReducer, ResourceState, Slices,
};
use concierge_runtime::metrics::MetricsRecorder;
use concierge_runtime::{Store, StoreConfig, StoreError};
use concierge_testing::mocks::ScriptedGateway;
use concierge_testing::properties::{error_payload, list_payload};
use proptest::prelude::*;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Serialize)]
struct Parcel {
    tracking: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
struct ParcelSelections {
    parcel: Option<Parcel>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ParcelOperation {
    FetchParcels,
    ReceiveParcel,
}

impl fmt::Display for ParcelOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Clone, Debug, PartialEq)]
enum ParcelSuccess {
    FetchParcels(ListPayload<Parcel>),
    ReceiveParcel(Parcel),
}

impl Outcome for ParcelSuccess {
    type Operation = ParcelOperation;

    fn operation(&self) -> ParcelOperation {
        match self {
            Self::FetchParcels(_) => ParcelOperation::FetchParcels,
            Self::ReceiveParcel(_) => ParcelOperation::ReceiveParcel,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Parcels;

impl Resource for Parcels {
    const NAME: &'static str = "parcels";
    const COLLECTION_KEY: &'static str = "parcels";
    type Entity = Parcel;
    type Selections = ParcelSelections;
    type Secondary = ();
    type Success = ParcelSuccess;

    fn commit(success: ParcelSuccess, slices: &mut Slices<'_, Self>) {
        match success {
            ParcelSuccess::FetchParcels(list) => slices.replace_primary(list),
            ParcelSuccess::ReceiveParcel(parcel) => slices.select(|s| &mut s.parcel, parcel),
        }
    }
}

type ParcelStore = Store<ResourceState<Parcels>, ResourceAction<Parcels>, ResourceEnvironment<Parcels>, ResourceReducer<Parcels>>;

fn offline_store() -> ParcelStore {
    Store::new(ResourceState::new(), ResourceReducer::new(), ResourceEnvironment::offline())
}

fn store_with(gateway: ScriptedGateway<Parcels>) -> ParcelStore {
    Store::with_config(
        ResourceState::new(),
        ResourceReducer::new(),
        ResourceEnvironment::with_gateway(Arc::new(gateway)),
        StoreConfig::default().with_broadcast_capacity(8),
    )
}

#[tokio::test]
async fn subscribers_see_one_snapshot_per_dispatch() {
    let store = offline_store();
    let mut snapshots = store.subscribe();
    let initial = snapshots.borrow_and_update().clone();

    store
        .send(ResourceAction::request(ParcelOperation::FetchParcels))
        .await
        .unwrap();
    assert!(snapshots.has_changed().unwrap());
    let pending = snapshots.borrow_and_update().clone();
    assert_eq!(pending.status(), RequestStatus::Pending);

    store
        .send(ResourceAction::success(ParcelSuccess::ReceiveParcel(Parcel { tracking: 7 })))
        .await
        .unwrap();
    let complete = snapshots.borrow_and_update().clone();

    // Earlier snapshots are untouched by later dispatches.
    assert_eq!(initial.status(), RequestStatus::Idle);
    assert_eq!(pending.status(), RequestStatus::Pending);
    assert_eq!(pending.selections().parcel, None);
    assert_eq!(complete.status(), RequestStatus::Complete);
    assert_eq!(complete.selections().parcel, Some(Parcel { tracking: 7 }));
    assert!(!snapshots.has_changed().unwrap());
}

#[tokio::test]
async fn gateway_success_completes_request() {
    let store = store_with(ScriptedGateway::new().answer(
        ParcelOperation::FetchParcels,
        Ok(ParcelSuccess::FetchParcels(vec![Parcel { tracking: 1 }].into())),
    ));

    let mut snapshots = store.subscribe();

    let settled = store
        .send_and_wait_for(
            ResourceAction::request(ParcelOperation::FetchParcels),
            ResourceAction::<Parcels>::is_terminal,
            Duration::from_secs(1),
        )
        .await
        .unwrap();
    assert!(matches!(settled, ResourceAction::Success(_)));

    // The broadcast arrives before the feedback dispatch is applied.
    let state = tokio::time::timeout(
        Duration::from_secs(1),
        snapshots.wait_for(|state| state.status() == RequestStatus::Complete),
    )
    .await
    .unwrap()
    .unwrap()
    .clone();
    assert_eq!(state.collection(), &[Parcel { tracking: 1 }]);
}

#[tokio::test]
async fn gateway_failure_records_error() {
    let store = store_with(
        ScriptedGateway::new().answer(ParcelOperation::ReceiveParcel, Err(ErrorPayload::from("network error"))),
    );

    let mut handle = store
        .send(ResourceAction::request(ParcelOperation::ReceiveParcel))
        .await
        .unwrap();
    handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

    let state = store.snapshot().await;
    assert!(state.is_failed());
    assert_eq!(state.error().and_then(ErrorPayload::message), Some("network error"));
}

#[tokio::test]
async fn wait_for_times_out_without_feedback() {
    let store = offline_store();

    let result = store
        .send_and_wait_for(
            ResourceAction::request(ParcelOperation::FetchParcels),
            ResourceAction::<Parcels>::is_terminal,
            Duration::from_millis(20),
        )
        .await;
    assert!(matches!(result, Err(StoreError::Timeout)));
}

#[tokio::test]
async fn concurrent_dispatches_are_serialized() {
    let store = offline_store();

    let tasks: Vec<_> = (0..20)
        .map(|tracking| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .send(ResourceAction::success(ParcelSuccess::ReceiveParcel(Parcel { tracking })))
                    .await
                    .unwrap();
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    let state = store.snapshot().await;
    assert_eq!(state.status(), RequestStatus::Complete);
    assert!(state.selections().parcel.is_some());
}

#[tokio::test]
async fn transitions_are_counted_by_domain_and_phase() {
    let mut recorder = MetricsRecorder::new();
    recorder.install().unwrap();

    let store = offline_store();
    store
        .send(ResourceAction::request(ParcelOperation::FetchParcels))
        .await
        .unwrap();
    store
        .send(ResourceAction::failure(ParcelOperation::FetchParcels, "depot closed"))
        .await
        .unwrap();

    // Another test binary may own the global recorder.
    if let Some(text) = recorder.render() {
        let transitions: Vec<_> = text
            .lines()
            .filter(|line| line.starts_with("resource_transitions_total{"))
            .collect();
        assert!(transitions
            .iter()
            .any(|line| line.contains(r#"domain="parcels""#) && line.contains(r#"phase="request""#)));
        assert!(transitions
            .iter()
            .any(|line| line.contains(r#"domain="parcels""#) && line.contains(r#"phase="failure""#)));
        assert!(text.contains("store_commands_total"));
    }
}

fn action() -> impl Strategy<Value = ResourceAction<Parcels>> {
    let operation = prop_oneof![Just(ParcelOperation::FetchParcels), Just(ParcelOperation::ReceiveParcel)];
    let parcel = any::<u32>().prop_map(|tracking| Parcel { tracking });
    prop_oneof![
        operation.clone().prop_map(ResourceAction::<Parcels>::request),
        list_payload(parcel.clone(), 4).prop_map(|list| ResourceAction::<Parcels>::success(ParcelSuccess::FetchParcels(list))),
        parcel.prop_map(|parcel| ResourceAction::<Parcels>::success(ParcelSuccess::ReceiveParcel(parcel))),
        (operation, error_payload()).prop_map(|(op, error)| ResourceAction::<Parcels>::failure(op, error)),
        Just(ResourceAction::<Parcels>::Reset),
    ]
}

proptest! {
    #[test]
    fn store_agrees_with_pure_transitions(actions in prop::collection::vec(action(), 0..10)) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let expected = actions
            .iter()
            .cloned()
            .fold(ResourceState::<Parcels>::new(), |state, action| state.next(action));

        let actual = runtime.block_on(async {
            let store = offline_store();
            for action in actions {
                store.send(action).await.unwrap();
            }
            store.snapshot().await
        });

        prop_assert_eq!(&*actual, &expected);
    }
}
