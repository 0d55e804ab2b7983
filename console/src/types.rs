//! Entity types exchanged with the building-management backend.
//!
//! These are thin DTOs: the `_id` identifier, the handful of fields the
//! console reads, and every other attribute kept verbatim in `extra` so that
//! nothing the backend sends is lost on a round trip.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Attributes the console does not model
pub type Extra = Map<String, Value>;

// ============================================================================
// Amenities
// ============================================================================

/// A bookable shared facility (gym, hall, pool, ...)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amenity {
    /// Backend identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: Option<String>,
    /// Maximum simultaneous users
    pub capacity: Option<u32>,
    /// Whether residents can currently book it
    #[serde(default)]
    pub is_active: bool,
    /// Remaining attributes
    #[serde(flatten)]
    pub extra: Extra,
}

/// A bookable time window of an amenity
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmenitySlot {
    /// Backend identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Owning amenity
    pub amenity_id: Option<String>,
    /// Start of the window, as the backend formats it (e.g. `"09:00"`)
    pub start_time: String,
    /// End of the window
    pub end_time: String,
    /// Remaining attributes
    #[serde(flatten)]
    pub extra: Extra,
}

/// A resident's booking of an amenity slot
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Backend identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Booked amenity
    pub amenity_id: Option<String>,
    /// Booked slot
    pub slot_id: Option<String>,
    /// Approval state (`pending`, `approved`, `rejected`)
    pub status: Option<String>,
    /// Remaining attributes
    #[serde(flatten)]
    pub extra: Extra,
}

// ============================================================================
// Committees
// ============================================================================

/// A member of the residents' committee
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitteeMember {
    /// Backend identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Full name
    pub name: String,
    /// Committee role (chair, treasurer, ...)
    pub role: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
    /// Remaining attributes
    #[serde(flatten)]
    pub extra: Extra,
}

// ============================================================================
// Complaints
// ============================================================================

/// A resident complaint
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    /// Backend identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Short summary
    pub title: String,
    /// Free-form description
    pub description: Option<String>,
    /// Lifecycle state (`open`, `in_progress`, `resolved`)
    pub status: Option<String>,
    /// Submission time
    pub created_at: Option<DateTime<Utc>>,
    /// Remaining attributes
    #[serde(flatten)]
    pub extra: Extra,
}

/// A comment on a complaint
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintComment {
    /// Backend identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Complaint the comment belongs to
    pub complaint_id: Option<String>,
    /// Comment body
    pub message: String,
    /// Posting time
    pub created_at: Option<DateTime<Utc>>,
    /// Remaining attributes
    #[serde(flatten)]
    pub extra: Extra,
}

// ============================================================================
// Employees
// ============================================================================

/// A building staff member
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Backend identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Full name
    pub name: String,
    /// Job title (guard, cleaner, manager, ...)
    pub designation: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
    /// Remaining attributes
    #[serde(flatten)]
    pub extra: Extra,
}

// ============================================================================
// Events
// ============================================================================

/// A community event
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Backend identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Event title
    pub title: String,
    /// Venue inside the premises
    pub venue: Option<String>,
    /// Start time
    pub starts_at: Option<DateTime<Utc>>,
    /// Whether residents can see it
    #[serde(default)]
    pub is_published: bool,
    /// Remaining attributes
    #[serde(flatten)]
    pub extra: Extra,
}

/// A resident's registration for an event
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRegistration {
    /// Backend identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Event registered for
    pub event_id: Option<String>,
    /// Number of attendees
    pub attendees: Option<u32>,
    /// Remaining attributes
    #[serde(flatten)]
    pub extra: Extra,
}

// ============================================================================
// Maintenance
// ============================================================================

/// A maintenance bill issued to a unit
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// Backend identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Billed amount
    pub amount: f64,
    /// Payment deadline
    pub due_date: Option<DateTime<Utc>>,
    /// Billing state (`draft`, `published`, `paid`)
    pub status: Option<String>,
    /// Remaining attributes
    #[serde(flatten)]
    pub extra: Extra,
}

/// A payment recorded against a bill
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Backend identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Bill being paid
    pub bill_id: Option<String>,
    /// Paid amount
    pub amount: f64,
    /// Payment time
    pub paid_at: Option<DateTime<Utc>>,
    /// Remaining attributes
    #[serde(flatten)]
    pub extra: Extra,
}

// ============================================================================
// Parking
// ============================================================================

/// A parking area (basement, open lot, ...)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingArea {
    /// Backend identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name
    pub name: String,
    /// Number of spots
    pub capacity: Option<u32>,
    /// Remaining attributes
    #[serde(flatten)]
    pub extra: Extra,
}

/// A single spot within a parking area
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSpot {
    /// Backend identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Owning area
    pub area_id: Option<String>,
    /// Painted spot number
    pub number: String,
    /// Whether a vehicle is assigned
    #[serde(default)]
    pub is_occupied: bool,
    /// Remaining attributes
    #[serde(flatten)]
    pub extra: Extra,
}

/// A resident's request for a parking spot
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingRequest {
    /// Backend identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Requested spot, once assigned
    pub spot_id: Option<String>,
    /// Vehicle registration number
    pub vehicle_number: Option<String>,
    /// Approval state (`pending`, `approved`, `rejected`)
    pub status: Option<String>,
    /// Remaining attributes
    #[serde(flatten)]
    pub extra: Extra,
}

// ============================================================================
// Visitors
// ============================================================================

/// A visitor entry at the gate
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visitor {
    /// Backend identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Visitor's name
    pub name: String,
    /// Contact phone
    pub phone: Option<String>,
    /// Unit being visited
    pub flat_number: Option<String>,
    /// Gate state (`pending`, `approved`, `rejected`, `checked_out`)
    pub status: Option<String>,
    /// Arrival time
    pub check_in: Option<DateTime<Utc>>,
    /// Departure time
    pub check_out: Option<DateTime<Utc>>,
    /// Remaining attributes
    #[serde(flatten)]
    pub extra: Extra,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code

    use super::*;
    use serde_json::json;

    #[test]
    fn visitor_keeps_unknown_attributes() {
        let raw = json!({
            "_id": "v1",
            "name": "Asha",
            "flatNumber": "B-204",
            "status": "pending",
            "vehicle": "KA01AB1234"
        });

        let visitor: Visitor = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(visitor.id, "v1");
        assert_eq!(visitor.flat_number.as_deref(), Some("B-204"));
        assert_eq!(visitor.extra.get("vehicle"), Some(&json!("KA01AB1234")));
        assert_eq!(visitor.check_in, None);

        let back = serde_json::to_value(&visitor).unwrap();
        assert_eq!(back["_id"], json!("v1"));
        assert_eq!(back["vehicle"], json!("KA01AB1234"));
    }

    #[test]
    fn bill_parses_timestamps() {
        let bill: Bill = serde_json::from_value(json!({
            "_id": "b1",
            "amount": 2500.0,
            "dueDate": "2025-02-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(bill.due_date.unwrap().to_rfc3339(), "2025-02-01T00:00:00+00:00");
        assert!(bill.extra.is_empty());
    }

    #[test]
    fn missing_flags_default_to_false() {
        let event: Event = serde_json::from_value(json!({ "_id": "e1", "title": "Diwali" })).unwrap();
        assert!(!event.is_published);
    }
}
