//! # Concierge Testing
//!
//! Testing utilities and helpers for the Concierge console.
//!
//! This crate provides:
//! - [`ReducerTest`], a Given-When-Then harness for reducers
//! - [`mocks::ScriptedGateway`], a gateway that answers from a script
//! - [`effects::resolve`], which drives future effects to their feedback actions
//! - [`properties`], proptest strategies for wire payloads
//!
//! ## Example
//!
//! ```ignore
//! use concierge_testing::mocks::ScriptedGateway;
//! use concierge_runtime::Store;
//!
//! #[tokio::test]
//! async fn test_fetch_visitors() {
//!     let gateway = ScriptedGateway::<Visitors>::new()
//!         .answer(VisitorOperation::FetchVisitors, Ok(VisitorSuccess::FetchVisitors(vec![].into())));
//!     let store = Store::new(ConsoleState::default(), ConsoleReducer::new(), env_with(gateway));
//!
//!     store.send(ConsoleAction::Visitors(ResourceAction::request(VisitorOperation::FetchVisitors))).await?;
//! }
//! ```

use chrono::{DateTime, TimeZone, Utc};


pub use reducer_test::{assertions, ReducerTest};

/// Mock implementations of environment seams
pub mod mocks {
    use concierge_core::payload::ErrorPayload;
    use concierge_core::resource::{Gateway, GatewayFuture, OperationOf, Resource};
    use serde_json::Value;
    use std::collections::VecDeque;
    use std::sync::{Mutex, PoisonError};

    type Answer<R> = (OperationOf<R>, Result<<R as Resource>::Success, ErrorPayload>);

    /// Gateway that answers requests from a script
    ///
    /// Answers are consumed in the order they were scripted, per operation.
    /// An operation without a remaining answer fails with `"unscripted <op>"`.
    /// Every call is recorded with its arguments.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let gateway = ScriptedGateway::<Visitors>::new()
    ///     .answer(VisitorOperation::DeleteVisitor, Ok(VisitorSuccess::DeleteVisitor))
    ///     .answer(VisitorOperation::DeleteVisitor, Err("gone".into()));
    /// ```
    pub struct ScriptedGateway<R: Resource> {
        answers: Mutex<VecDeque<Answer<R>>>,
        calls: Mutex<Vec<(OperationOf<R>, Value)>>,
    }

    impl<R: Resource> ScriptedGateway<R> {
        /// Create a gateway with an empty script
        #[must_use]
        pub const fn new() -> Self {
            Self {
                answers: Mutex::new(VecDeque::new()),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Script the next answer for `operation`
        #[must_use]
        pub fn answer(self, operation: OperationOf<R>, outcome: Result<R::Success, ErrorPayload>) -> Self {
            self.answers
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push_back((operation, outcome));
            self
        }

        /// Calls received so far, with their arguments
        #[must_use]
        pub fn calls(&self) -> Vec<(OperationOf<R>, Value)> {
            self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
        }

        /// Number of scripted answers not consumed yet
        #[must_use]
        pub fn remaining(&self) -> usize {
            self.answers.lock().unwrap_or_else(PoisonError::into_inner).len()
        }

        fn next_answer(&self, operation: OperationOf<R>) -> Result<R::Success, ErrorPayload> {
            let mut answers = self.answers.lock().unwrap_or_else(PoisonError::into_inner);
            answers
                .iter()
                .position(|(scripted, _)| *scripted == operation)
                .and_then(|index| answers.remove(index))
                .map_or_else(|| Err(ErrorPayload::from(format!("unscripted {operation}"))), |(_, outcome)| outcome)
        }
    }

    impl<R: Resource> Default for ScriptedGateway<R> {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<R: Resource> Gateway<R> for ScriptedGateway<R> {
        fn call(&self, operation: OperationOf<R>, args: Value) -> GatewayFuture<R> {
            self.calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((operation, args));
            let outcome = self.next_answer(operation);
            Box::pin(async move { outcome })
        }
    }
}

/// Effect helpers
pub mod effects {
    use concierge_core::effect::Effect;

    /// Await every future effect and collect the actions they produce
    ///
    /// Effects are awaited concurrently; the result keeps effect order.
    pub async fn resolve<A>(effects: impl IntoIterator<Item = Effect<A>>) -> Vec<A> {
        let futures = effects.into_iter().filter_map(|effect| match effect {
            Effect::Future(future) => Some(future),
            Effect::None => None,
        });

        futures::future::join_all(futures)
            .await
            .into_iter()
            .flatten()
            .collect()
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use concierge_core::payload::{ErrorPayload, ListPayload, Pagination};
    use proptest::prelude::*;
    use std::fmt::Debug;

    /// Any pagination block
    pub fn pagination() -> impl Strategy<Value = Pagination> {
        (0u64..1_000, 1u64..50, 1u64..200, 0u64..100).prop_map(|(total, page, limit, total_pages)| Pagination {
            total,
            page,
            limit,
            total_pages,
        })
    }

    /// A list payload in either wire shape, with up to `max` items
    pub fn list_payload<T: Debug + Clone>(
        item: impl Strategy<Value = T> + Clone,
        max: usize,
    ) -> impl Strategy<Value = ListPayload<T>> {
        let items = prop::collection::vec(item, 0..=max);
        prop_oneof![
            items.clone().prop_map(ListPayload::Bare),
            (items, prop::option::of(pagination()))
                .prop_map(|(items, pagination)| ListPayload::Envelope { items, pagination }),
        ]
    }

    /// An error descriptor, either a bare message or a `{message, code}` object
    pub fn error_payload() -> impl Strategy<Value = ErrorPayload> {
        prop_oneof![
            "[a-z ]{1,24}".prop_map(ErrorPayload::from),
            ("[a-z ]{1,24}", 400u16..600).prop_map(|(message, code)| {
                ErrorPayload::new(serde_json::json!({ "message": message, "code": code }))
            }),
        ]
    }
}

/// Fixed timestamp for deterministic entity fixtures (2025-01-01 00:00:00 UTC)
#[must_use]
pub fn test_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}
