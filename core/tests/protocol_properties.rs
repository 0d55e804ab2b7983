//! Property tests for the resource transition protocol.
//!
//! States are built by folding arbitrary event sequences over the initial
//! state, then each law is checked against one more event.

#![allow(clippy::unwrap_used)] // Test code

use concierge_core::payload::{ErrorPayload, ListPayload, Pagination};
use concierge_core::resource::{Outcome, RequestStatus, Resource, ResourceAction, ResourceState, Slices};
use proptest::prelude::*;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Serialize)]
struct Room {
    number: u16,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
struct RoomSelections {
    room: Option<Room>,
    key: Option<u8>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
struct RoomSecondary {
    keys: Vec<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RoomOperation {
    FetchRooms,
    UpdateRoom,
    DeleteRoom,
    FetchKeys,
    IssueKey,
}

impl fmt::Display for RoomOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Clone, Debug, PartialEq)]
enum RoomSuccess {
    FetchRooms(ListPayload<Room>),
    UpdateRoom(Room),
    DeleteRoom,
    FetchKeys(ListPayload<u8>),
    IssueKey(u8),
}

impl Outcome for RoomSuccess {
    type Operation = RoomOperation;

    fn operation(&self) -> RoomOperation {
        match self {
            Self::FetchRooms(_) => RoomOperation::FetchRooms,
            Self::UpdateRoom(_) => RoomOperation::UpdateRoom,
            Self::DeleteRoom => RoomOperation::DeleteRoom,
            Self::FetchKeys(_) => RoomOperation::FetchKeys,
            Self::IssueKey(_) => RoomOperation::IssueKey,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Rooms;

impl Resource for Rooms {
    const NAME: &'static str = "rooms";
    const COLLECTION_KEY: &'static str = "rooms";
    type Entity = Room;
    type Selections = RoomSelections;
    type Secondary = RoomSecondary;
    type Success = RoomSuccess;

    fn commit(success: RoomSuccess, slices: &mut Slices<'_, Self>) {
        match success {
            RoomSuccess::FetchRooms(list) => slices.replace_primary(list),
            RoomSuccess::UpdateRoom(room) => slices.select(|s| &mut s.room, room),
            RoomSuccess::DeleteRoom => {},
            RoomSuccess::FetchKeys(list) => slices.replace_secondary(|s| &mut s.keys, list),
            RoomSuccess::IssueKey(key) => slices.select(|s| &mut s.key, key),
        }
    }
}

fn operation() -> impl Strategy<Value = RoomOperation> {
    prop_oneof![
        Just(RoomOperation::FetchRooms),
        Just(RoomOperation::UpdateRoom),
        Just(RoomOperation::DeleteRoom),
        Just(RoomOperation::FetchKeys),
        Just(RoomOperation::IssueKey),
    ]
}

fn pagination() -> impl Strategy<Value = Pagination> {
    (0u64..500, 1u64..20, 1u64..200, 0u64..50).prop_map(|(total, page, limit, total_pages)| Pagination {
        total,
        page,
        limit,
        total_pages,
    })
}

fn list<T: fmt::Debug + Clone>(
    item: impl Strategy<Value = T> + Clone,
) -> impl Strategy<Value = ListPayload<T>> {
    let items = prop::collection::vec(item, 0..5);
    prop_oneof![
        items.clone().prop_map(ListPayload::Bare),
        (items, prop::option::of(pagination()))
            .prop_map(|(items, pagination)| ListPayload::Envelope { items, pagination }),
    ]
}

fn room() -> impl Strategy<Value = Room> + Clone {
    any::<u16>().prop_map(|number| Room { number })
}

fn success() -> impl Strategy<Value = RoomSuccess> {
    prop_oneof![
        list(room()).prop_map(RoomSuccess::FetchRooms),
        room().prop_map(RoomSuccess::UpdateRoom),
        Just(RoomSuccess::DeleteRoom),
        list(any::<u8>()).prop_map(RoomSuccess::FetchKeys),
        any::<u8>().prop_map(RoomSuccess::IssueKey),
    ]
}

fn error() -> impl Strategy<Value = ErrorPayload> {
    "[a-z ]{1,16}".prop_map(ErrorPayload::from)
}

fn action() -> impl Strategy<Value = ResourceAction<Rooms>> {
    prop_oneof![
        operation().prop_map(ResourceAction::<Rooms>::request),
        success().prop_map(ResourceAction::<Rooms>::success),
        (operation(), error()).prop_map(|(operation, error)| ResourceAction::<Rooms>::failure(operation, error)),
        Just(ResourceAction::<Rooms>::Reset),
    ]
}

fn state() -> impl Strategy<Value = ResourceState<Rooms>> {
    prop::collection::vec(action(), 0..12).prop_map(|actions| {
        actions
            .into_iter()
            .fold(ResourceState::new(), |state, action| state.next(action))
    })
}

fn same_data(a: &ResourceState<Rooms>, b: &ResourceState<Rooms>) -> bool {
    a.collection() == b.collection()
        && a.pagination() == b.pagination()
        && a.selections() == b.selections()
        && a.secondary() == b.secondary()
}

proptest! {
    #[test]
    fn request_only_sets_pending(before in state(), op in operation()) {
        let after = before.next(ResourceAction::request(op));

        prop_assert_eq!(after.status(), RequestStatus::Pending);
        prop_assert_eq!(after.error(), before.error());
        prop_assert!(same_data(&before, &after));
    }

    #[test]
    fn success_completes_and_touches_only_owned_slice(before in state(), payload in success()) {
        let after = before.next(ResourceAction::success(payload.clone()));

        prop_assert_eq!(after.status(), RequestStatus::Complete);
        prop_assert!(after.error().is_none());

        let keys_owned = matches!(payload, RoomSuccess::FetchKeys(_));
        let rooms_owned = matches!(payload, RoomSuccess::FetchRooms(_));
        let room_owned = matches!(payload, RoomSuccess::UpdateRoom(_));
        let key_owned = matches!(payload, RoomSuccess::IssueKey(_));

        if !rooms_owned {
            prop_assert_eq!(after.collection(), before.collection());
            prop_assert_eq!(after.pagination(), before.pagination());
        }
        if !keys_owned {
            prop_assert_eq!(after.secondary(), before.secondary());
        }
        if !room_owned {
            prop_assert_eq!(&after.selections().room, &before.selections().room);
        }
        if !key_owned {
            prop_assert_eq!(after.selections().key, before.selections().key);
        }
    }

    #[test]
    fn failure_records_error_and_keeps_data(before in state(), op in operation(), err in error()) {
        let after = before.next(ResourceAction::failure(op, err.clone()));

        prop_assert_eq!(after.status(), RequestStatus::Failed);
        prop_assert_eq!(after.error(), Some(&err));
        prop_assert!(same_data(&before, &after));
    }

    #[test]
    fn success_is_idempotent(before in state(), payload in success()) {
        let once = before.next(ResourceAction::success(payload.clone()));
        let twice = once.next(ResourceAction::success(payload));

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn reset_clears_lifecycle_and_selections(before in state()) {
        let after = before.next(ResourceAction::Reset);

        prop_assert_eq!(after.status(), RequestStatus::Idle);
        prop_assert!(after.error().is_none());
        prop_assert_eq!(after.selections(), &RoomSelections::default());
        prop_assert_eq!(after.collection(), before.collection());
        prop_assert_eq!(after.secondary(), before.secondary());
        prop_assert_eq!(after.pagination(), before.pagination());
    }

    #[test]
    fn settled_state_has_error_only_when_failed(before in state(), last in action()) {
        let settled = !matches!(last, ResourceAction::Request { .. });
        let after = before.next(last);

        if settled {
            prop_assert_eq!(after.error().is_some(), after.status() == RequestStatus::Failed);
        }
    }
}

#[test]
fn bare_list_uses_default_pagination() {
    let state = ResourceState::<Rooms>::new()
        .next(ResourceAction::success(RoomSuccess::FetchRooms(ListPayload::paged(
            vec![Room { number: 1 }],
            Pagination {
                total: 9,
                page: 2,
                limit: 1,
                total_pages: 9,
            },
        ))))
        .next(ResourceAction::success(RoomSuccess::FetchRooms(ListPayload::Bare(vec![
            Room { number: 1 },
            Room { number: 2 },
        ]))));

    assert_eq!(state.collection(), &[Room { number: 1 }, Room { number: 2 }]);
    assert_eq!(
        state.pagination(),
        &Pagination {
            total: 0,
            page: 1,
            limit: 100,
            total_pages: 0
        }
    );
}

#[test]
fn envelope_pagination_is_stored_exactly() {
    let pagination = Pagination {
        total: 1,
        page: 1,
        limit: 100,
        total_pages: 1,
    };
    let state = ResourceState::<Rooms>::new().next(ResourceAction::success(RoomSuccess::FetchRooms(
        ListPayload::paged(vec![Room { number: 4 }], pagination),
    )));

    assert_eq!(state.collection(), &[Room { number: 4 }]);
    assert_eq!(state.pagination(), &pagination);
}
