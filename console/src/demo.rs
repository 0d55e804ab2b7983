//! In-memory backend used by the `concierge` binary and the integration tests.

use crate::console::Domain;
use crate::wire::JsonBackend;
use concierge_core::payload::ErrorPayload;
use futures::future::{self, BoxFuture, FutureExt};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// A [`JsonBackend`] answering from canned responses.
///
/// Without a canned answer, deletes succeed with `null`, operations called
/// with an object echo it back (with a generated `_id` when missing) and
/// anything else fails with code `501`.
#[derive(Debug, Default)]
pub struct DemoBackend {
    answers: HashMap<(Domain, String), Result<Value, ErrorPayload>>,
    next_id: AtomicU64,
}

impl DemoBackend {
    /// A backend with no canned answers
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend with a small building already on file
    #[must_use]
    pub fn seeded() -> Self {
        Self::new()
            .with_response(
                Domain::Visitors,
                "fetchVisitors",
                json!({
                    "visitors": [
                        { "_id": "v-100", "name": "Asha Rao", "flatNumber": "B-204", "status": "approved" },
                        { "_id": "v-101", "name": "Imran Shaikh", "flatNumber": "A-012", "status": "pending" }
                    ],
                    "pagination": { "total": 2, "page": 1, "limit": 100, "totalPages": 1 }
                }),
            )
            .with_response(
                Domain::Amenities,
                "fetchAmenities",
                json!([
                    { "_id": "a-1", "name": "Clubhouse", "capacity": 40, "isActive": true },
                    { "_id": "a-2", "name": "Swimming pool", "capacity": 25, "isActive": false }
                ]),
            )
            .with_response(
                Domain::Amenities,
                "fetchSlots",
                json!({
                    "slots": [
                        { "_id": "s-1", "amenityId": "a-1", "startTime": "09:00", "endTime": "11:00" },
                        { "_id": "s-2", "amenityId": "a-1", "startTime": "18:00", "endTime": "20:00" }
                    ],
                    "pagination": { "total": 2, "page": 1, "limit": 100, "totalPages": 1 }
                }),
            )
            .with_failure(
                Domain::Amenities,
                "approveBooking",
                json!({ "message": "Slot already booked", "code": 409 }),
            )
    }

    /// Answer `operation` of `domain` with `payload`
    #[must_use]
    pub fn with_response(mut self, domain: Domain, operation: &str, payload: Value) -> Self {
        self.answers.insert((domain, operation.to_string()), Ok(payload));
        self
    }

    /// Fail `operation` of `domain` with `error`
    #[must_use]
    pub fn with_failure(mut self, domain: Domain, operation: &str, error: impl Into<ErrorPayload>) -> Self {
        self.answers.insert((domain, operation.to_string()), Err(error.into()));
        self
    }

    fn answer(&self, domain: Domain, operation: &str, args: Value) -> Result<Value, ErrorPayload> {
        if let Some(answer) = self.answers.get(&(domain, operation.to_string())) {
            return answer.clone();
        }

        if operation.starts_with("delete") {
            return Ok(Value::Null);
        }

        match args {
            Value::Object(mut object) => {
                if !object.contains_key("_id") {
                    let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
                    object.insert("_id".to_string(), json!(format!("{domain}-{id}")));
                }
                Ok(Value::Object(object))
            },
            _ => Err(ErrorPayload::new(json!({
                "message": format!("{domain}/{operation} is not available in demo mode"),
                "code": 501,
            }))),
        }
    }
}

impl JsonBackend for DemoBackend {
    fn call(&self, domain: Domain, operation: &str, args: Value) -> BoxFuture<'static, Result<Value, ErrorPayload>> {
        tracing::debug!(%domain, operation, "Demo backend call");
        future::ready(self.answer(domain, operation, args)).boxed()
    }
}
