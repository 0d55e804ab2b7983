//! Events: community events and resident registrations.

use crate::types::{Event, EventRegistration};
use crate::wire::{self, WireDecode};
use concierge_core::payload::{ListPayload, PayloadError};
use concierge_core::resource::{Resource, ResourceAction, ResourceState, Slices};
use concierge_macros::Operation;
use serde::Serialize;
use serde_json::Value;

/// Successful event operations
#[derive(Operation, Clone, Debug, PartialEq)]
pub enum EventSuccess {
    /// An event was drafted
    CreateEvent(Event),
    /// The event list
    FetchEvents(ListPayload<Event>),
    /// One event in detail
    FetchEvent(Event),
    /// An event was edited
    UpdateEvent(Event),
    /// An event was made visible to residents
    PublishEvent(Event),
    /// An event was removed
    DeleteEvent,
    /// A resident signed up
    RegisterForEvent(EventRegistration),
    /// Registrations of an event
    FetchRegistrations(ListPayload<EventRegistration>),
}

/// Selection slots of the events domain
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EventSelections {
    /// Event on the detail screen
    pub event: Option<Event>,
    /// Registration just made
    pub registration: Option<EventRegistration>,
}

/// Sub-resource lists of the events domain
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EventSecondary {
    /// Registrations last fetched
    pub registrations: Vec<EventRegistration>,
}

/// Events resource
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Events;

impl Resource for Events {
    const NAME: &'static str = "events";
    const COLLECTION_KEY: &'static str = "events";
    type Entity = Event;
    type Selections = EventSelections;
    type Secondary = EventSecondary;
    type Success = EventSuccess;

    fn commit(success: EventSuccess, slices: &mut Slices<'_, Self>) {
        match success {
            EventSuccess::FetchEvents(list) => slices.replace_primary(list),
            EventSuccess::FetchRegistrations(list) => slices.replace_secondary(|s| &mut s.registrations, list),
            EventSuccess::CreateEvent(event)
            | EventSuccess::FetchEvent(event)
            | EventSuccess::UpdateEvent(event)
            | EventSuccess::PublishEvent(event) => slices.select(|s| &mut s.event, event),
            EventSuccess::RegisterForEvent(registration) => slices.select(|s| &mut s.registration, registration),
            EventSuccess::DeleteEvent => {},
        }
    }
}

impl WireDecode for Events {
    fn decode(operation: EventOperation, payload: Value) -> Result<EventSuccess, PayloadError> {
        Ok(match operation {
            EventOperation::CreateEvent => EventSuccess::CreateEvent(wire::entity(payload)?),
            EventOperation::FetchEvents => EventSuccess::FetchEvents(wire::list(payload, Self::COLLECTION_KEY)?),
            EventOperation::FetchEvent => EventSuccess::FetchEvent(wire::entity(payload)?),
            EventOperation::UpdateEvent => EventSuccess::UpdateEvent(wire::entity(payload)?),
            EventOperation::PublishEvent => EventSuccess::PublishEvent(wire::entity(payload)?),
            EventOperation::DeleteEvent => EventSuccess::DeleteEvent,
            EventOperation::RegisterForEvent => EventSuccess::RegisterForEvent(wire::entity(payload)?),
            EventOperation::FetchRegistrations => {
                EventSuccess::FetchRegistrations(wire::list(payload, "registrations")?)
            },
        })
    }
}

/// State of the events domain
pub type EventState = ResourceState<Events>;

/// Events accepted by the events domain
pub type EventAction = ResourceAction<Events>;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code

    use super::*;
    use serde_json::json;

    #[test]
    fn publish_updates_selected_event() {
        let draft = Event {
            id: "e1".to_string(),
            title: "Holi".to_string(),
            ..Event::default()
        };
        let published = Event {
            is_published: true,
            ..draft.clone()
        };

        let state = EventState::new()
            .next(EventAction::success(EventSuccess::CreateEvent(draft)))
            .next(EventAction::success(EventSuccess::PublishEvent(published.clone())));

        assert_eq!(state.selections().event, Some(published));
    }

    #[test]
    fn registration_fills_its_slot() {
        let success = Events::decode(
            EventOperation::RegisterForEvent,
            json!({ "_id": "r1", "eventId": "e1", "attendees": 3, "flat": "A-101" }),
        )
        .unwrap();

        let state = EventState::new().next(EventAction::success(success));
        let registration = state.selections().registration.clone().unwrap();
        assert_eq!(registration.attendees, Some(3));
        assert_eq!(registration.extra.get("flat"), Some(&json!("A-101")));
        assert!(state.selections().event.is_none());
    }

    #[test]
    fn registrations_list_is_secondary() {
        let success = Events::decode(
            EventOperation::FetchRegistrations,
            json!({ "registrations": [{ "_id": "r1" }, { "_id": "r2" }] }),
        )
        .unwrap();

        let state = EventState::new().next(EventAction::success(success));
        assert_eq!(state.secondary().registrations.len(), 2);
        assert!(state.collection().is_empty());
    }
}
