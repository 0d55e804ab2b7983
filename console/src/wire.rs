//! The JSON boundary between the console and the dispatch layer.
//!
//! A [`JsonBackend`] performs an operation and answers with raw JSON; a
//! [`JsonGateway`] turns that answer into the typed success payload of one
//! domain using [`WireDecode`], so the resource reducer only ever sees typed
//! events.

use crate::console::{ConsoleDomain, Domain};
use concierge_core::payload::{ErrorPayload, ListPayload, PayloadError};
use concierge_core::resource::{Gateway, GatewayFuture, OperationOf, Resource};
use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::marker::PhantomData;
use std::sync::Arc;

/// Decode a raw success value into a domain's typed payload
pub trait WireDecode: Resource {
    /// Decode the backend's answer to `operation`
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] when the value does not have the shape the
    /// operation answers with.
    fn decode(operation: OperationOf<Self>, payload: Value) -> Result<Self::Success, PayloadError>;
}

/// Decode a list in either wire shape
///
/// # Errors
///
/// See [`ListPayload::from_json`].
pub fn list<T: DeserializeOwned>(payload: Value, collection_key: &str) -> Result<ListPayload<T>, PayloadError> {
    ListPayload::from_json(payload, collection_key)
}

/// Decode a single entity
///
/// # Errors
///
/// Returns [`PayloadError::Malformed`] when the value is not the entity.
pub fn entity<T: DeserializeOwned>(payload: Value) -> Result<T, PayloadError> {
    Ok(serde_json::from_value(payload)?)
}

/// Untyped backend adapter
pub trait JsonBackend: Send + Sync {
    /// Perform `operation` of `domain` and answer with the raw success value
    fn call(&self, domain: Domain, operation: &str, args: Value) -> BoxFuture<'static, Result<Value, ErrorPayload>>;
}

/// Typed [`Gateway`] over a [`JsonBackend`]
pub struct JsonGateway<R> {
    backend: Arc<dyn JsonBackend>,
    _phantom: PhantomData<fn() -> R>,
}

impl<R> JsonGateway<R> {
    /// Route a domain's requests to `backend`
    #[must_use]
    pub fn new(backend: Arc<dyn JsonBackend>) -> Self {
        Self {
            backend,
            _phantom: PhantomData,
        }
    }
}

impl<R: ConsoleDomain + WireDecode> Gateway<R> for JsonGateway<R> {
    fn call(&self, operation: OperationOf<R>, args: Value) -> GatewayFuture<R> {
        let name = operation.to_string();
        let pending = self.backend.call(R::DOMAIN, &name, args);

        Box::pin(async move {
            let payload = pending.await?;
            R::decode(operation, payload).map_err(|error| {
                tracing::warn!(domain = R::NAME, operation = %name, %error, "Undecodable backend payload");
                ErrorPayload::new(json!({
                    "message": error.to_string(),
                    "code": "malformed_payload",
                }))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code

    use super::*;
    use crate::domains::visitors::{VisitorOperation, VisitorSuccess, Visitors};

    struct FixedBackend(Value);

    impl JsonBackend for FixedBackend {
        fn call(&self, _domain: Domain, _operation: &str, _args: Value) -> BoxFuture<'static, Result<Value, ErrorPayload>> {
            let answer = self.0.clone();
            Box::pin(async move { Ok(answer) })
        }
    }

    #[tokio::test]
    async fn gateway_decodes_backend_answer() {
        let gateway = JsonGateway::<Visitors>::new(Arc::new(FixedBackend(json!([{ "_id": "v1", "name": "Asha" }]))));

        let success = gateway.call(VisitorOperation::FetchVisitors, Value::Null).await.unwrap();
        assert!(matches!(success, VisitorSuccess::FetchVisitors(list) if list.items().len() == 1));
    }

    #[tokio::test]
    async fn undecodable_answer_becomes_error_payload() {
        let gateway = JsonGateway::<Visitors>::new(Arc::new(FixedBackend(json!({ "amenities": [] }))));

        let error = gateway.call(VisitorOperation::FetchVisitors, Value::Null).await.unwrap_err();
        assert_eq!(error.as_value()["code"], json!("malformed_payload"));
        assert_eq!(error.message(), Some("list envelope has no `visitors` collection"));
    }
}
