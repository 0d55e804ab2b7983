//! Amenities: shared facilities, their time slots and resident bookings.

use crate::types::{Amenity, AmenitySlot, Booking};
use crate::wire::{self, WireDecode};
use concierge_core::payload::{ListPayload, PayloadError};
use concierge_core::resource::{Resource, ResourceAction, ResourceState, Slices};
use concierge_macros::Operation;
use serde::Serialize;
use serde_json::Value;

/// Successful amenity operations
#[derive(Operation, Clone, Debug, PartialEq)]
pub enum AmenitySuccess {
    /// An amenity was created
    CreateAmenity(Amenity),
    /// The amenity list
    FetchAmenities(ListPayload<Amenity>),
    /// One amenity in detail
    FetchAmenity(Amenity),
    /// An amenity was edited
    UpdateAmenity(Amenity),
    /// An amenity was removed
    DeleteAmenity,
    /// A slot was added to an amenity
    CreateSlot(AmenitySlot),
    /// Slots of an amenity
    FetchSlots(ListPayload<AmenitySlot>),
    /// A slot was edited
    UpdateSlot(AmenitySlot),
    /// A slot was removed
    DeleteSlot,
    /// Bookings awaiting or past review
    FetchBookings(ListPayload<Booking>),
    /// A booking was approved
    ApproveBooking(Booking),
    /// A booking was rejected
    RejectBooking(Booking),
}

/// Selection slots of the amenities domain
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AmenitySelections {
    /// Amenity on the detail screen
    pub amenity: Option<Amenity>,
    /// Slot being edited
    pub slot: Option<AmenitySlot>,
    /// Booking under review
    pub booking: Option<Booking>,
}

/// Sub-resource lists of the amenities domain
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AmenitySecondary {
    /// Slots of the amenity last fetched
    pub slots: Vec<AmenitySlot>,
    /// Bookings last fetched
    pub bookings: Vec<Booking>,
}

/// Amenities resource
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Amenities;

impl Resource for Amenities {
    const NAME: &'static str = "amenities";
    const COLLECTION_KEY: &'static str = "amenities";
    type Entity = Amenity;
    type Selections = AmenitySelections;
    type Secondary = AmenitySecondary;
    type Success = AmenitySuccess;

    fn commit(success: AmenitySuccess, slices: &mut Slices<'_, Self>) {
        match success {
            AmenitySuccess::FetchAmenities(list) => slices.replace_primary(list),
            AmenitySuccess::FetchSlots(list) => slices.replace_secondary(|s| &mut s.slots, list),
            AmenitySuccess::FetchBookings(list) => slices.replace_secondary(|s| &mut s.bookings, list),
            AmenitySuccess::CreateAmenity(amenity)
            | AmenitySuccess::FetchAmenity(amenity)
            | AmenitySuccess::UpdateAmenity(amenity) => slices.select(|s| &mut s.amenity, amenity),
            AmenitySuccess::CreateSlot(slot) | AmenitySuccess::UpdateSlot(slot) => {
                slices.select(|s| &mut s.slot, slot);
            },
            AmenitySuccess::ApproveBooking(booking) | AmenitySuccess::RejectBooking(booking) => {
                slices.select(|s| &mut s.booking, booking);
            },
            AmenitySuccess::DeleteAmenity | AmenitySuccess::DeleteSlot => {},
        }
    }
}

impl WireDecode for Amenities {
    fn decode(operation: AmenityOperation, payload: Value) -> Result<AmenitySuccess, PayloadError> {
        Ok(match operation {
            AmenityOperation::CreateAmenity => AmenitySuccess::CreateAmenity(wire::entity(payload)?),
            AmenityOperation::FetchAmenities => {
                AmenitySuccess::FetchAmenities(wire::list(payload, Self::COLLECTION_KEY)?)
            },
            AmenityOperation::FetchAmenity => AmenitySuccess::FetchAmenity(wire::entity(payload)?),
            AmenityOperation::UpdateAmenity => AmenitySuccess::UpdateAmenity(wire::entity(payload)?),
            AmenityOperation::DeleteAmenity => AmenitySuccess::DeleteAmenity,
            AmenityOperation::CreateSlot => AmenitySuccess::CreateSlot(wire::entity(payload)?),
            AmenityOperation::FetchSlots => AmenitySuccess::FetchSlots(wire::list(payload, "slots")?),
            AmenityOperation::UpdateSlot => AmenitySuccess::UpdateSlot(wire::entity(payload)?),
            AmenityOperation::DeleteSlot => AmenitySuccess::DeleteSlot,
            AmenityOperation::FetchBookings => AmenitySuccess::FetchBookings(wire::list(payload, "bookings")?),
            AmenityOperation::ApproveBooking => AmenitySuccess::ApproveBooking(wire::entity(payload)?),
            AmenityOperation::RejectBooking => AmenitySuccess::RejectBooking(wire::entity(payload)?),
        })
    }
}

/// State of the amenities domain
pub type AmenityState = ResourceState<Amenities>;

/// Events accepted by the amenities domain
pub type AmenityAction = ResourceAction<Amenities>;
