//! Payload shapes at the boundary between the dispatch layer and a container.
//!
//! List-type successes arrive either as a bare sequence or as an envelope
//! `{<collectionKey>: [...], pagination?: {...}}`. Failures carry an opaque
//! error descriptor that is stored verbatim.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Page size assumed when no pagination accompanies a list
pub const DEFAULT_PAGE_LIMIT: u64 = 100;

/// Paging metadata attached to primary list results.
///
/// Fields missing from a wire block take their [`Default`] values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    /// Total number of items on the server
    pub total: u64,
    /// Current page (1-based)
    pub page: u64,
    /// Items per page
    pub limit: u64,
    /// Number of pages
    pub total_pages: u64,
}

impl Pagination {
    /// Check `page >= 1` and `limit > 0`
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::InvalidPagination`] when either bound is broken.
    pub fn validate(self) -> Result<Self, PayloadError> {
        if self.page == 0 || self.limit == 0 {
            return Err(PayloadError::InvalidPagination {
                page: self.page,
                limit: self.limit,
            });
        }
        Ok(self)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            total: 0,
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            total_pages: 0,
        }
    }
}

/// Result payload of a list-type operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ListPayload<T> {
    /// A plain sequence with no paging information
    Bare(Vec<T>),
    /// Items wrapped with optional paging information
    Envelope {
        /// The listed items, in server order
        items: Vec<T>,
        /// Paging metadata, when the server sent it
        pagination: Option<Pagination>,
    },
}

impl<T> ListPayload<T> {
    /// Wrap items with paging metadata
    #[must_use]
    pub const fn paged(items: Vec<T>, pagination: Pagination) -> Self {
        Self::Envelope {
            items,
            pagination: Some(pagination),
        }
    }

    /// Split into items and the optional pagination
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, Option<Pagination>) {
        match self {
            Self::Bare(items) => (items, None),
            Self::Envelope { items, pagination } => (items, pagination),
        }
    }

    /// Borrow the listed items
    #[must_use]
    pub fn items(&self) -> &[T] {
        match self {
            Self::Bare(items) | Self::Envelope { items, .. } => items,
        }
    }
}

impl<T: DeserializeOwned> ListPayload<T> {
    /// Decode a list payload as the backend sends it.
    ///
    /// A JSON array becomes [`ListPayload::Bare`]. An object must hold an
    /// array under `collection_key` and may hold a `pagination` object.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] when the value is neither shape, when the
    /// collection key is missing, when items or pagination fail to decode, or
    /// when the pagination has `page: 0` or `limit: 0`. Missing pagination
    /// fields fall back to [`Pagination::default`].
    pub fn from_json(value: Value, collection_key: &str) -> Result<Self, PayloadError> {
        match value {
            Value::Array(_) => Ok(Self::Bare(serde_json::from_value(value)?)),
            Value::Object(mut object) => {
                let items = object
                    .remove(collection_key)
                    .ok_or_else(|| PayloadError::MissingCollection(collection_key.to_string()))?;
                let items = serde_json::from_value(items)?;
                let pagination = match object.remove("pagination") {
                    None | Some(Value::Null) => None,
                    Some(raw) => Some(serde_json::from_value::<Pagination>(raw)?.validate()?),
                };
                Ok(Self::Envelope { items, pagination })
            },
            other => Err(PayloadError::UnexpectedShape(json_kind(&other))),
        }
    }
}

impl<T> From<Vec<T>> for ListPayload<T> {
    fn from(items: Vec<T>) -> Self {
        Self::Bare(items)
    }
}

/// Opaque failure descriptor recorded by a container.
///
/// The dispatch layer decides its shape (usually a message, sometimes a
/// `{message, code}` object). It is never inspected beyond [`ErrorPayload::message`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorPayload(Value);

impl ErrorPayload {
    /// Wrap an arbitrary JSON value
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// The raw descriptor, exactly as received
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// Unwrap into the raw descriptor
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Human readable message, if the descriptor has one
    ///
    /// A bare string is its own message; an object yields its `message` field.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match &self.0 {
            Value::String(message) => Some(message),
            Value::Object(object) => object.get("message").and_then(Value::as_str),
            _ => None,
        }
    }
}

impl From<&str> for ErrorPayload {
    fn from(message: &str) -> Self {
        Self(Value::String(message.to_string()))
    }
}

impl From<String> for ErrorPayload {
    fn from(message: String) -> Self {
        Self(Value::String(message))
    }
}

impl From<Value> for ErrorPayload {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.message() {
            Some(message) => write!(f, "{message}"),
            None => write!(f, "{}", self.0),
        }
    }
}

/// Errors decoding a wire payload
#[derive(Error, Debug)]
pub enum PayloadError {
    /// The envelope did not contain the expected collection key
    #[error("list envelope has no `{0}` collection")]
    MissingCollection(String),

    /// The value was neither an array nor an object
    #[error("expected a list or an envelope object, found {0}")]
    UnexpectedShape(&'static str),

    /// Pagination outside `page >= 1`, `limit > 0`
    #[error("invalid pagination: page {page}, limit {limit}")]
    InvalidPagination {
        /// Page as received
        page: u64,
        /// Limit as received
        limit: u64,
    },

    /// Items or pagination failed to deserialize
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code

    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Item {
        name: String,
    }

    #[test]
    fn bare_array_decodes_without_pagination() {
        let payload: ListPayload<Item> =
            ListPayload::from_json(json!([{ "name": "a" }, { "name": "b" }]), "visitors").unwrap();

        let (items, pagination) = payload.into_parts();
        assert_eq!(items.len(), 2);
        assert_eq!(pagination, None);
    }

    #[test]
    fn envelope_decodes_camel_case_pagination() {
        let payload: ListPayload<Item> = ListPayload::from_json(
            json!({
                "visitors": [{ "name": "a" }],
                "pagination": { "total": 1, "page": 1, "limit": 100, "totalPages": 1 }
            }),
            "visitors",
        )
        .unwrap();

        assert_eq!(
            payload,
            ListPayload::Envelope {
                items: vec![Item { name: "a".to_string() }],
                pagination: Some(Pagination {
                    total: 1,
                    page: 1,
                    limit: 100,
                    total_pages: 1
                }),
            }
        );
    }

    #[test]
    fn envelope_without_pagination_is_allowed() {
        let payload: ListPayload<Item> =
            ListPayload::from_json(json!({ "visitors": [], "pagination": null }), "visitors").unwrap();
        assert_eq!(payload.into_parts().1, None);
    }

    #[test]
    fn envelope_missing_collection_key_is_rejected() {
        let result: Result<ListPayload<Item>, _> =
            ListPayload::from_json(json!({ "amenities": [] }), "visitors");
        assert!(matches!(result, Err(PayloadError::MissingCollection(key)) if key == "visitors"));
    }

    #[test]
    fn zero_page_or_limit_is_rejected() {
        let result: Result<ListPayload<u32>, _> = ListPayload::from_json(
            json!({
                "visitors": [1],
                "pagination": { "total": 5, "page": 0, "limit": 0, "totalPages": 3 }
            }),
            "visitors",
        );
        assert!(matches!(result, Err(PayloadError::InvalidPagination { page: 0, limit: 0 })));

        let result: Result<ListPayload<u32>, _> =
            ListPayload::from_json(json!({ "visitors": [1], "pagination": { "limit": 0 } }), "visitors");
        assert_eq!(result.unwrap_err().to_string(), "invalid pagination: page 1, limit 0");
    }

    #[test]
    fn partial_pagination_fills_from_default() {
        let payload: ListPayload<u32> =
            ListPayload::from_json(json!({ "visitors": [1, 2], "pagination": { "total": 5, "page": 1 } }), "visitors")
                .unwrap();

        assert_eq!(
            payload,
            ListPayload::Envelope {
                items: vec![1, 2],
                pagination: Some(Pagination {
                    total: 5,
                    page: 1,
                    limit: 100,
                    total_pages: 0
                }),
            }
        );
    }

    #[test]
    fn scalar_is_rejected() {
        let result: Result<ListPayload<Item>, _> = ListPayload::from_json(json!(3), "visitors");
        assert!(matches!(result, Err(PayloadError::UnexpectedShape("a number"))));
    }

    #[test]
    fn default_pagination_is_the_zero_state() {
        assert_eq!(
            Pagination::default(),
            Pagination {
                total: 0,
                page: 1,
                limit: 100,
                total_pages: 0
            }
        );
    }

    #[test]
    fn error_payload_message() {
        assert_eq!(ErrorPayload::from("network error").message(), Some("network error"));

        let detailed = ErrorPayload::new(json!({ "message": "forbidden", "code": 403 }));
        assert_eq!(detailed.message(), Some("forbidden"));
        assert_eq!(detailed.to_string(), "forbidden");

        let opaque = ErrorPayload::new(json!({ "code": 500 }));
        assert_eq!(opaque.message(), None);
        assert_eq!(opaque.as_value(), &json!({ "code": 500 }));
    }
}
