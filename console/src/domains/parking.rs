//! Parking: areas, the spots inside them, and residents' spot requests.

use crate::types::{ParkingArea, ParkingRequest, ParkingSpot};
use crate::wire::{self, WireDecode};
use concierge_core::payload::{ListPayload, PayloadError};
use concierge_core::resource::{Resource, ResourceAction, ResourceState, Slices};
use concierge_macros::Operation;
use serde::Serialize;
use serde_json::Value;

/// Successful parking operations
#[derive(Operation, Clone, Debug, PartialEq)]
pub enum ParkingSuccess {
    /// An area was created
    CreateArea(ParkingArea),
    /// The area list
    FetchAreas(ListPayload<ParkingArea>),
    /// An area was edited
    UpdateArea(ParkingArea),
    /// An area was removed
    DeleteArea,
    /// A spot was added
    CreateSpot(ParkingSpot),
    /// Spots of an area
    FetchSpots(ListPayload<ParkingSpot>),
    /// A spot was edited
    UpdateSpot(ParkingSpot),
    /// A spot was removed
    DeleteSpot,
    /// A resident asked for a spot
    CreateRequest(ParkingRequest),
    /// Spot requests
    FetchRequests(ListPayload<ParkingRequest>),
    /// A request was granted
    ApproveRequest(ParkingRequest),
    /// A request was declined
    RejectRequest(ParkingRequest),
}

/// Selection slots of the parking domain
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ParkingSelections {
    /// Area being edited
    pub area: Option<ParkingArea>,
    /// Spot being edited
    pub spot: Option<ParkingSpot>,
    /// Request under review
    pub request: Option<ParkingRequest>,
}

/// Sub-resource lists of the parking domain
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ParkingSecondary {
    /// Spots last fetched
    pub spots: Vec<ParkingSpot>,
    /// Requests last fetched
    pub requests: Vec<ParkingRequest>,
}

/// Parking resource
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Parking;

impl Resource for Parking {
    const NAME: &'static str = "parking";
    const COLLECTION_KEY: &'static str = "areas";
    type Entity = ParkingArea;
    type Selections = ParkingSelections;
    type Secondary = ParkingSecondary;
    type Success = ParkingSuccess;

    fn commit(success: ParkingSuccess, slices: &mut Slices<'_, Self>) {
        match success {
            ParkingSuccess::FetchAreas(list) => slices.replace_primary(list),
            ParkingSuccess::FetchSpots(list) => slices.replace_secondary(|s| &mut s.spots, list),
            ParkingSuccess::FetchRequests(list) => slices.replace_secondary(|s| &mut s.requests, list),
            ParkingSuccess::CreateArea(area) | ParkingSuccess::UpdateArea(area) => slices.select(|s| &mut s.area, area),
            ParkingSuccess::CreateSpot(spot) | ParkingSuccess::UpdateSpot(spot) => slices.select(|s| &mut s.spot, spot),
            ParkingSuccess::CreateRequest(request)
            | ParkingSuccess::ApproveRequest(request)
            | ParkingSuccess::RejectRequest(request) => slices.select(|s| &mut s.request, request),
            ParkingSuccess::DeleteArea | ParkingSuccess::DeleteSpot => {},
        }
    }
}

impl WireDecode for Parking {
    fn decode(operation: ParkingOperation, payload: Value) -> Result<ParkingSuccess, PayloadError> {
        Ok(match operation {
            ParkingOperation::CreateArea => ParkingSuccess::CreateArea(wire::entity(payload)?),
            ParkingOperation::FetchAreas => ParkingSuccess::FetchAreas(wire::list(payload, Self::COLLECTION_KEY)?),
            ParkingOperation::UpdateArea => ParkingSuccess::UpdateArea(wire::entity(payload)?),
            ParkingOperation::DeleteArea => ParkingSuccess::DeleteArea,
            ParkingOperation::CreateSpot => ParkingSuccess::CreateSpot(wire::entity(payload)?),
            ParkingOperation::FetchSpots => ParkingSuccess::FetchSpots(wire::list(payload, "spots")?),
            ParkingOperation::UpdateSpot => ParkingSuccess::UpdateSpot(wire::entity(payload)?),
            ParkingOperation::DeleteSpot => ParkingSuccess::DeleteSpot,
            ParkingOperation::CreateRequest => ParkingSuccess::CreateRequest(wire::entity(payload)?),
            ParkingOperation::FetchRequests => ParkingSuccess::FetchRequests(wire::list(payload, "requests")?),
            ParkingOperation::ApproveRequest => ParkingSuccess::ApproveRequest(wire::entity(payload)?),
            ParkingOperation::RejectRequest => ParkingSuccess::RejectRequest(wire::entity(payload)?),
        })
    }
}

/// State of the parking domain
pub type ParkingState = ResourceState<Parking>;

/// Events accepted by the parking domain
pub type ParkingAction = ResourceAction<Parking>;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code

    use super::*;
    use serde_json::json;

    fn spot(number: &str) -> ParkingSpot {
        ParkingSpot {
            id: format!("s{number}"),
            number: number.to_string(),
            ..ParkingSpot::default()
        }
    }

    #[test]
    fn spot_and_request_lists_are_independent() {
        let state = ParkingState::new()
            .next(ParkingAction::success(ParkingSuccess::FetchSpots(vec![spot("1"), spot("2")].into())))
            .next(ParkingAction::success(ParkingSuccess::FetchRequests(Vec::new().into())));

        assert_eq!(state.secondary().spots, vec![spot("1"), spot("2")]);
        assert!(state.secondary().requests.is_empty());
        assert!(state.collection().is_empty());
    }

    #[test]
    fn approve_request_fills_request_slot() {
        let success = Parking::decode(
            ParkingOperation::ApproveRequest,
            json!({ "_id": "q1", "spotId": "s1", "vehicleNumber": "KA01AB1234", "status": "approved" }),
        )
        .unwrap();

        let state = ParkingState::new()
            .next(ParkingAction::success(ParkingSuccess::UpdateSpot(spot("1"))))
            .next(ParkingAction::success(success));

        let request = state.selections().request.as_ref().unwrap();
        assert_eq!(request.vehicle_number.as_deref(), Some("KA01AB1234"));
        assert_eq!(state.selections().spot, Some(spot("1")));
        assert!(state.selections().area.is_none());
    }

    #[test]
    fn areas_key() {
        assert_eq!(Parking::COLLECTION_KEY, "areas");
        let decoded = Parking::decode(ParkingOperation::FetchAreas, json!({ "areas": [] })).unwrap();
        assert_eq!(decoded, ParkingSuccess::FetchAreas(ListPayload::Envelope {
            items: Vec::new(),
            pagination: None,
        }));
    }
}
