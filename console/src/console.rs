//! The aggregate console: eight resource containers behind one reducer.
//!
//! [`ConsoleState`] holds one [`ResourceState`] per domain, [`ConsoleAction`]
//! wraps each domain's [`ResourceAction`], and [`ConsoleReducer`] routes an
//! action to the single container that owns it.

use crate::domains::amenities::Amenities;
use crate::domains::committees::Committees;
use crate::domains::complaints::Complaints;
use crate::domains::employees::Employees;
use crate::domains::events::Events;
use crate::domains::maintenance::Maintenance;
use crate::domains::parking::Parking;
use crate::domains::visitors::Visitors;
use crate::wire::{JsonBackend, JsonGateway, WireDecode};
use concierge_core::composition::{combine_reducers, scope_reducer, BoxedReducer, CombinedReducer};
use concierge_core::payload::ErrorPayload;
use concierge_core::resource::{
    Gateway, Phase, RequestStatus, Resource, ResourceAction, ResourceEnvironment, ResourceReducer, ResourceState,
};
use concierge_core::{Effect, Reducer, SmallVec};
use concierge_runtime::Store;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// The console's resource domains
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Shared facilities and their bookings
    Amenities,
    /// Residents' committee
    Committees,
    /// Resident complaints
    Complaints,
    /// Building staff
    Employees,
    /// Community events
    Events,
    /// Maintenance billing
    Maintenance,
    /// Parking areas, spots and requests
    Parking,
    /// Gate visitors
    Visitors,
}

impl Domain {
    /// Every domain, in state order
    pub const ALL: [Self; 8] = [
        Self::Amenities,
        Self::Committees,
        Self::Complaints,
        Self::Employees,
        Self::Events,
        Self::Maintenance,
        Self::Parking,
        Self::Visitors,
    ];

    /// Key of the domain inside the console state
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Amenities => Amenities::NAME,
            Self::Committees => Committees::NAME,
            Self::Complaints => Complaints::NAME,
            Self::Employees => Employees::NAME,
            Self::Events => Events::NAME,
            Self::Maintenance => Maintenance::NAME,
            Self::Parking => Parking::NAME,
            Self::Visitors => Visitors::NAME,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the whole console
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ConsoleState {
    /// Amenities container
    pub amenities: ResourceState<Amenities>,
    /// Committees container
    pub committees: ResourceState<Committees>,
    /// Complaints container
    pub complaints: ResourceState<Complaints>,
    /// Employees container
    pub employees: ResourceState<Employees>,
    /// Events container
    pub events: ResourceState<Events>,
    /// Maintenance container
    pub maintenance: ResourceState<Maintenance>,
    /// Parking container
    pub parking: ResourceState<Parking>,
    /// Visitors container
    pub visitors: ResourceState<Visitors>,
}

impl ConsoleState {
    /// The container of resource `R`
    #[must_use]
    pub fn domain<R: ConsoleDomain>(&self) -> &ResourceState<R> {
        R::slice(self)
    }

    /// Lifecycle status of one domain
    #[must_use]
    pub fn status(&self, domain: Domain) -> RequestStatus {
        match domain {
            Domain::Amenities => self.amenities.status(),
            Domain::Committees => self.committees.status(),
            Domain::Complaints => self.complaints.status(),
            Domain::Employees => self.employees.status(),
            Domain::Events => self.events.status(),
            Domain::Maintenance => self.maintenance.status(),
            Domain::Parking => self.parking.status(),
            Domain::Visitors => self.visitors.status(),
        }
    }

    /// Failure recorded by one domain, if its latest request failed
    #[must_use]
    pub fn error(&self, domain: Domain) -> Option<&ErrorPayload> {
        match domain {
            Domain::Amenities => self.amenities.error(),
            Domain::Committees => self.committees.error(),
            Domain::Complaints => self.complaints.error(),
            Domain::Employees => self.employees.error(),
            Domain::Events => self.events.error(),
            Domain::Maintenance => self.maintenance.error(),
            Domain::Parking => self.parking.error(),
            Domain::Visitors => self.visitors.error(),
        }
    }

    /// Domains with a request in flight
    #[must_use]
    pub fn pending(&self) -> Vec<Domain> {
        Domain::ALL
            .into_iter()
            .filter(|domain| self.status(*domain) == RequestStatus::Pending)
            .collect()
    }
}

/// Events accepted by the console, one variant per domain
#[derive(Clone, Debug, PartialEq)]
pub enum ConsoleAction {
    /// Amenity and booking transitions
    Amenities(ResourceAction<Amenities>),
    /// Committee roster transitions
    Committees(ResourceAction<Committees>),
    /// Complaint and comment transitions
    Complaints(ResourceAction<Complaints>),
    /// Staff directory transitions
    Employees(ResourceAction<Employees>),
    /// Community event and registration transitions
    Events(ResourceAction<Events>),
    /// Bill and payment transitions
    Maintenance(ResourceAction<Maintenance>),
    /// Parking area, spot and request transitions
    Parking(ResourceAction<Parking>),
    /// Gate desk visitor transitions
    Visitors(ResourceAction<Visitors>),
}

impl ConsoleAction {
    /// Domain that owns the action
    #[must_use]
    pub const fn domain(&self) -> Domain {
        match self {
            Self::Amenities(_) => Domain::Amenities,
            Self::Committees(_) => Domain::Committees,
            Self::Complaints(_) => Domain::Complaints,
            Self::Employees(_) => Domain::Employees,
            Self::Events(_) => Domain::Events,
            Self::Maintenance(_) => Domain::Maintenance,
            Self::Parking(_) => Domain::Parking,
            Self::Visitors(_) => Domain::Visitors,
        }
    }

    /// Phase of the wrapped event
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self {
            Self::Amenities(action) => action.phase(),
            Self::Committees(action) => action.phase(),
            Self::Complaints(action) => action.phase(),
            Self::Employees(action) => action.phase(),
            Self::Events(action) => action.phase(),
            Self::Maintenance(action) => action.phase(),
            Self::Parking(action) => action.phase(),
            Self::Visitors(action) => action.phase(),
        }
    }

    /// Returns true for `Success` and `Failure` events
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self.phase(), Phase::Success | Phase::Failure)
    }
}

/// Injected dependencies of the console, one environment per domain
#[derive(Clone, Debug, Default)]
pub struct ConsoleEnvironment {
    amenities: ResourceEnvironment<Amenities>,
    committees: ResourceEnvironment<Committees>,
    complaints: ResourceEnvironment<Complaints>,
    employees: ResourceEnvironment<Employees>,
    events: ResourceEnvironment<Events>,
    maintenance: ResourceEnvironment<Maintenance>,
    parking: ResourceEnvironment<Parking>,
    visitors: ResourceEnvironment<Visitors>,
}

impl ConsoleEnvironment {
    /// No gateways: requests only change status
    #[must_use]
    pub fn offline() -> Self {
        Self::default()
    }

    /// Every domain talks to `backend`
    #[must_use]
    pub fn connected(backend: Arc<dyn JsonBackend>) -> Self {
        Self::offline()
            .with_json::<Amenities>(&backend)
            .with_json::<Committees>(&backend)
            .with_json::<Complaints>(&backend)
            .with_json::<Employees>(&backend)
            .with_json::<Events>(&backend)
            .with_json::<Maintenance>(&backend)
            .with_json::<Parking>(&backend)
            .with_json::<Visitors>(&backend)
    }

    /// Route requests of resource `R` to `gateway`
    #[must_use]
    pub fn with_gateway<R: ConsoleDomain>(mut self, gateway: Arc<dyn Gateway<R>>) -> Self {
        *R::environment_mut(&mut self) = ResourceEnvironment::with_gateway(gateway);
        self
    }

    /// The environment of resource `R`
    #[must_use]
    pub fn domain<R: ConsoleDomain>(&self) -> &ResourceEnvironment<R> {
        R::environment(self)
    }

    fn with_json<R: ConsoleDomain + WireDecode>(self, backend: &Arc<dyn JsonBackend>) -> Self {
        self.with_gateway::<R>(Arc::new(JsonGateway::<R>::new(Arc::clone(backend))))
    }
}

/// A resource that lives inside the console
///
/// Ties the resource to its slice of [`ConsoleState`], its slot in
/// [`ConsoleEnvironment`] and its [`ConsoleAction`] variant.
pub trait ConsoleDomain: Resource {
    /// The domain this resource is
    const DOMAIN: Domain;

    /// Read the resource's container
    fn slice(state: &ConsoleState) -> &ResourceState<Self>;

    /// Write the resource's container
    fn slice_mut(state: &mut ConsoleState) -> &mut ResourceState<Self>;

    /// The resource's environment
    fn environment(env: &ConsoleEnvironment) -> &ResourceEnvironment<Self>;

    /// Mutable access to the resource's environment
    fn environment_mut(env: &mut ConsoleEnvironment) -> &mut ResourceEnvironment<Self>;

    /// Wrap a resource action
    fn embed(action: ResourceAction<Self>) -> ConsoleAction;

    /// Unwrap a console action owned by this resource
    fn extract(action: ConsoleAction) -> Option<ResourceAction<Self>>;
}

macro_rules! console_domain {
    ($resource:ty, $variant:ident, $field:ident) => {
        impl ConsoleDomain for $resource {
            const DOMAIN: Domain = Domain::$variant;

            fn slice(state: &ConsoleState) -> &ResourceState<Self> {
                &state.$field
            }

            fn slice_mut(state: &mut ConsoleState) -> &mut ResourceState<Self> {
                &mut state.$field
            }

            fn environment(env: &ConsoleEnvironment) -> &ResourceEnvironment<Self> {
                &env.$field
            }

            fn environment_mut(env: &mut ConsoleEnvironment) -> &mut ResourceEnvironment<Self> {
                &mut env.$field
            }

            fn embed(action: ResourceAction<Self>) -> ConsoleAction {
                ConsoleAction::$variant(action)
            }

            fn extract(action: ConsoleAction) -> Option<ResourceAction<Self>> {
                match action {
                    ConsoleAction::$variant(action) => Some(action),
                    _ => None,
                }
            }
        }

        impl From<ResourceAction<$resource>> for ConsoleAction {
            fn from(action: ResourceAction<$resource>) -> Self {
                Self::$variant(action)
            }
        }
    };
}

console_domain!(Amenities, Amenities, amenities);
console_domain!(Committees, Committees, committees);
console_domain!(Complaints, Complaints, complaints);
console_domain!(Employees, Employees, employees);
console_domain!(Events, Events, events);
console_domain!(Maintenance, Maintenance, maintenance);
console_domain!(Parking, Parking, parking);
console_domain!(Visitors, Visitors, visitors);

/// Store over the whole console
pub type ConsoleStore = Store<ConsoleState, ConsoleAction, ConsoleEnvironment, ConsoleReducer>;

/// Routes each console action to the container that owns it
pub struct ConsoleReducer {
    inner: CombinedReducer<ConsoleState, ConsoleAction, ConsoleEnvironment>,
}

impl ConsoleReducer {
    /// Build the reducer over all eight domains
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: combine_reducers(vec![
                scoped::<Amenities>(),
                scoped::<Committees>(),
                scoped::<Complaints>(),
                scoped::<Employees>(),
                scoped::<Events>(),
                scoped::<Maintenance>(),
                scoped::<Parking>(),
                scoped::<Visitors>(),
            ]),
        }
    }
}

impl Default for ConsoleReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for ConsoleReducer {
    type State = ConsoleState;
    type Action = ConsoleAction;
    type Environment = ConsoleEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        tracing::trace!(domain = %action.domain(), phase = action.phase().as_str(), "Routing console action");
        self.inner.reduce(state, action, env)
    }
}

fn scoped<R: ConsoleDomain>() -> BoxedReducer<ConsoleState, ConsoleAction, ConsoleEnvironment> {
    Box::new(scope_reducer(
        ResourceReducer::<R>::new(),
        R::slice_mut,
        R::extract,
        R::embed,
        R::environment,
    ))
}
