//! The resource container protocol.
//!
//! Every console domain (amenities, visitors, parking, ...) is one
//! [`ResourceState`] driven by one [`ResourceReducer`]. A domain only supplies
//! configuration through the [`Resource`] trait: its entity and slot types, its
//! success payloads, and a `commit` that says which slice each success owns.
//! The lifecycle bookkeeping (`status`, `error`) is handled here and nowhere
//! else.
//!
//! # Transitions
//!
//! | event | status | error | data |
//! |-------|--------|-------|------|
//! | `Request` | `Pending` | kept | kept |
//! | `Success` | `Complete` | cleared | owned slice replaced |
//! | `Failure` | `Failed` | set | kept |
//! | `Reset` | `Idle` | cleared | selections cleared, collections kept |
//!
//! Any event may follow any other; the latest event wins.

use crate::effect::Effect;
use crate::payload::{ErrorPayload, ListPayload, Pagination};
use crate::reducer::Reducer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::{smallvec, SmallVec};
use std::fmt::{Debug, Display};
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;

/// Request lifecycle marker shared by all operations of a domain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Nothing in flight since creation or the last reset
    #[default]
    Idle,
    /// A request was issued and has not resolved yet
    Pending,
    /// The latest request succeeded
    Complete,
    /// The latest request failed
    Failed,
}

impl RequestStatus {
    /// Lowercase name, as serialized
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Complete => "complete",
            Self::Failed => "failed",
        }
    }
}

impl Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A success payload that knows which operation produced it.
///
/// Usually implemented by `#[derive(Operation)]`, which also generates the
/// operation enum itself.
pub trait Outcome {
    /// The domain's operation names
    type Operation: Copy + Debug + Display + PartialEq + Eq + Send + Sync + 'static;

    /// The operation this payload answers
    fn operation(&self) -> Self::Operation;
}

/// Configuration of one resource domain.
///
/// Implementors are zero-sized markers; all data lives in [`ResourceState`].
pub trait Resource: Clone + Copy + Debug + Default + PartialEq + Send + Sync + 'static {
    /// Domain key inside the aggregate console state (e.g. `"visitors"`)
    const NAME: &'static str;

    /// Key of the primary collection inside a list envelope
    const COLLECTION_KEY: &'static str;

    /// Entity held by the primary collection
    type Entity: Clone + Debug + PartialEq + Serialize + Send + Sync + 'static;

    /// Singular selection slots; `Default` is the empty selection
    type Selections: Clone + Debug + Default + PartialEq + Serialize + Send + Sync + 'static;

    /// Secondary collections for related sub-resources
    type Secondary: Clone + Debug + Default + PartialEq + Serialize + Send + Sync + 'static;

    /// Typed success payloads, one variant per operation
    type Success: Outcome + Clone + Debug + PartialEq + Send + Sync + 'static;

    /// Write a success payload into the slice its operation owns
    fn commit(success: Self::Success, slices: &mut Slices<'_, Self>);
}

/// Operation enum of a resource
pub type OperationOf<R> = <<R as Resource>::Success as Outcome>::Operation;

/// Snapshot of one resource domain.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", bound(serialize = ""))]
pub struct ResourceState<R: Resource> {
    status: RequestStatus,
    error: Option<ErrorPayload>,
    collection: Vec<R::Entity>,
    pagination: Pagination,
    selections: R::Selections,
    secondary: R::Secondary,
}

impl<R: Resource> Default for ResourceState<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> ResourceState<R> {
    /// Initial state: idle, empty, default pagination
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: RequestStatus::Idle,
            error: None,
            collection: Vec::new(),
            pagination: Pagination::default(),
            selections: R::Selections::default(),
            secondary: R::Secondary::default(),
        }
    }

    /// Lifecycle marker of the latest request
    #[must_use]
    pub const fn status(&self) -> RequestStatus {
        self.status
    }

    /// Failure recorded by the latest request, if it failed
    #[must_use]
    pub const fn error(&self) -> Option<&ErrorPayload> {
        self.error.as_ref()
    }

    /// Primary collection in server order
    #[must_use]
    pub fn collection(&self) -> &[R::Entity] {
        &self.collection
    }

    /// Paging metadata of the primary collection
    #[must_use]
    pub const fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Singular selection slots
    #[must_use]
    pub const fn selections(&self) -> &R::Selections {
        &self.selections
    }

    /// Secondary collections
    #[must_use]
    pub const fn secondary(&self) -> &R::Secondary {
        &self.secondary
    }

    /// Returns true while a request is in flight
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// Returns true if the latest request failed
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.status == RequestStatus::Failed
    }

    /// The state after `action`, leaving `self` untouched.
    ///
    /// Runs the transition without a gateway, so no effect is produced.
    #[must_use]
    pub fn next(&self, action: ResourceAction<R>) -> Self {
        let (next, _effects) = crate::reducer::apply(
            &ResourceReducer::<R>::new(),
            self,
            action,
            &ResourceEnvironment::offline(),
        );
        next
    }

    fn slices(&mut self) -> Slices<'_, R> {
        Slices {
            collection: &mut self.collection,
            pagination: &mut self.pagination,
            selections: &mut self.selections,
            secondary: &mut self.secondary,
        }
    }

    fn reset(&mut self) {
        self.status = RequestStatus::Idle;
        self.error = None;
        self.selections = R::Selections::default();
    }
}

/// Write access to the data slices of a [`ResourceState`].
///
/// Handed to [`Resource::commit`]. Lifecycle fields are out of reach.
pub struct Slices<'a, R: Resource> {
    collection: &'a mut Vec<R::Entity>,
    pagination: &'a mut Pagination,
    selections: &'a mut R::Selections,
    secondary: &'a mut R::Secondary,
}

impl<R: Resource> Slices<'_, R> {
    /// Replace the primary collection.
    ///
    /// Envelope pagination replaces the stored pagination; a bare list or an
    /// envelope without pagination resets it to the default.
    pub fn replace_primary(&mut self, list: ListPayload<R::Entity>) {
        let (items, pagination) = list.into_parts();
        *self.collection = items;
        *self.pagination = pagination.unwrap_or_default();
    }

    /// Replace one secondary collection. Pagination is never touched.
    pub fn replace_secondary<T>(&mut self, slot: fn(&mut R::Secondary) -> &mut Vec<T>, list: ListPayload<T>) {
        let (items, _pagination) = list.into_parts();
        *slot(&mut *self.secondary) = items;
    }

    /// Put an entity into one selection slot
    pub fn select<T>(&mut self, slot: fn(&mut R::Selections) -> &mut Option<T>, entity: T) {
        *slot(&mut *self.selections) = Some(entity);
    }
}

/// Phase of a transition event, used for log and metric labels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// `Request`
    Request,
    /// `Success`
    Success,
    /// `Failure`
    Failure,
    /// `Reset`
    Reset,
}

impl Phase {
    /// Lowercase label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Reset => "reset",
        }
    }
}

/// Transition events accepted by a resource container.
#[derive(Clone, Debug, PartialEq)]
pub enum ResourceAction<R: Resource> {
    /// An operation was issued; `args` are for the gateway only
    Request {
        /// Operation being requested
        operation: OperationOf<R>,
        /// Operation arguments, opaque to the container
        args: Value,
    },
    /// An operation resolved with its typed payload
    Success(R::Success),
    /// An operation failed
    Failure {
        /// Operation that failed
        operation: OperationOf<R>,
        /// Error descriptor, stored verbatim
        error: ErrorPayload,
    },
    /// Leave the detail view: clear selections and lifecycle
    Reset,
}

impl<R: Resource> ResourceAction<R> {
    /// Request with no arguments
    #[must_use]
    pub const fn request(operation: OperationOf<R>) -> Self {
        Self::Request {
            operation,
            args: Value::Null,
        }
    }

    /// Request carrying arguments for the gateway
    #[must_use]
    pub const fn request_with(operation: OperationOf<R>, args: Value) -> Self {
        Self::Request { operation, args }
    }

    /// Success event
    #[must_use]
    pub const fn success(payload: R::Success) -> Self {
        Self::Success(payload)
    }

    /// Failure event
    #[must_use]
    pub fn failure(operation: OperationOf<R>, error: impl Into<ErrorPayload>) -> Self {
        Self::Failure {
            operation,
            error: error.into(),
        }
    }

    /// Translate a gateway result into the matching event
    #[must_use]
    pub fn from_outcome(operation: OperationOf<R>, outcome: Result<R::Success, ErrorPayload>) -> Self {
        match outcome {
            Ok(payload) => Self::Success(payload),
            Err(error) => Self::Failure { operation, error },
        }
    }

    /// Operation the event refers to (`None` for `Reset`)
    #[must_use]
    pub fn operation(&self) -> Option<OperationOf<R>> {
        match self {
            Self::Request { operation, .. } | Self::Failure { operation, .. } => Some(*operation),
            Self::Success(payload) => Some(payload.operation()),
            Self::Reset => None,
        }
    }

    /// Phase of the event
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self {
            Self::Request { .. } => Phase::Request,
            Self::Success(_) => Phase::Success,
            Self::Failure { .. } => Phase::Failure,
            Self::Reset => Phase::Reset,
        }
    }

    /// Returns true for events that end a request (`Success` or `Failure`)
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Failure { .. })
    }
}

/// Future returned by a [`Gateway`]
pub type GatewayFuture<R> =
    Pin<Box<dyn Future<Output = Result<<R as Resource>::Success, ErrorPayload>> + Send>>;

/// Backend adapter of the dispatch layer.
///
/// The container never calls the backend itself; when an environment carries
/// a gateway the reducer returns an effect that does.
pub trait Gateway<R: Resource>: Send + Sync {
    /// Perform `operation` with `args`
    fn call(&self, operation: OperationOf<R>, args: Value) -> GatewayFuture<R>;
}

/// Injected dependencies of a resource reducer
pub struct ResourceEnvironment<R: Resource> {
    gateway: Option<Arc<dyn Gateway<R>>>,
}

impl<R: Resource> ResourceEnvironment<R> {
    /// No gateway: requests only change status
    #[must_use]
    pub const fn offline() -> Self {
        Self { gateway: None }
    }

    /// Requests are forwarded to `gateway`
    #[must_use]
    pub fn with_gateway(gateway: Arc<dyn Gateway<R>>) -> Self {
        Self {
            gateway: Some(gateway),
        }
    }

    /// The configured gateway, if any
    #[must_use]
    pub fn gateway(&self) -> Option<&Arc<dyn Gateway<R>>> {
        self.gateway.as_ref()
    }
}

impl<R: Resource> Default for ResourceEnvironment<R> {
    fn default() -> Self {
        Self::offline()
    }
}

impl<R: Resource> Clone for ResourceEnvironment<R> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
        }
    }
}

impl<R: Resource> Debug for ResourceEnvironment<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceEnvironment")
            .field("domain", &R::NAME)
            .field("gateway", &self.gateway.is_some())
            .finish()
    }
}

/// The one reducer shared by every resource domain
#[derive(Debug, Clone, Copy)]
pub struct ResourceReducer<R> {
    _phantom: PhantomData<fn() -> R>,
}

impl<R> ResourceReducer<R> {
    /// Create a new resource reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<R> Default for ResourceReducer<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> Reducer for ResourceReducer<R> {
    type State = ResourceState<R>;
    type Action = ResourceAction<R>;
    type Environment = ResourceEnvironment<R>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let phase = action.phase();
        metrics::counter!("resource.transitions.total", "domain" => R::NAME, "phase" => phase.as_str())
            .increment(1);

        match action {
            ResourceAction::Request { operation, args } => {
                tracing::debug!(domain = R::NAME, %operation, phase = phase.as_str(), "Resource request");
                state.status = RequestStatus::Pending;

                match env.gateway() {
                    Some(gateway) => {
                        let call = gateway.call(operation, args);
                        smallvec![crate::async_effect! {
                            Some(ResourceAction::from_outcome(operation, call.await))
                        }]
                    },
                    None => smallvec![Effect::None],
                }
            },
            ResourceAction::Success(payload) => {
                let operation = payload.operation();
                tracing::debug!(domain = R::NAME, %operation, phase = phase.as_str(), "Resource success");
                R::commit(payload, &mut state.slices());
                state.status = RequestStatus::Complete;
                state.error = None;
                smallvec![Effect::None]
            },
            ResourceAction::Failure { operation, error } => {
                tracing::warn!(domain = R::NAME, %operation, %error, "Resource failure");
                state.status = RequestStatus::Failed;
                state.error = Some(error);
                smallvec![Effect::None]
            },
            ResourceAction::Reset => {
                tracing::debug!(domain = R::NAME, phase = phase.as_str(), "Resource reset");
                state.reset();
                smallvec![Effect::None]
            },
        }
    }
}
