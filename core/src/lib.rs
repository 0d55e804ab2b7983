//! # Concierge Core
//!
//! Core traits and types for the Concierge resource-state architecture.
//!
//! This crate provides the abstractions every console domain is built from:
//! a pure reducer, effect descriptions, reducer composition, and the generic
//! resource container protocol (request → success | failure, plus reset).
//!
//! ## Core Concepts
//!
//! - **State**: Snapshot of one resource domain (collection, selections, status)
//! - **Action**: Tagged transition events (`Request`, `Success`, `Failure`, `Reset`)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies (the optional backend gateway)
//!
//! ## Example
//!
//! ```ignore
//! use concierge_core::resource::{ResourceAction, ResourceEnvironment, ResourceReducer, ResourceState};
//! use concierge_core::reducer::Reducer;
//!
//! let reducer = ResourceReducer::<Visitors>::new();
//! let env = ResourceEnvironment::offline();
//! let mut state = ResourceState::<Visitors>::default();
//!
//! reducer.reduce(
//!     &mut state,
//!     ResourceAction::request(VisitorOperation::CreateVisitor),
//!     &env,
//! );
//! assert!(state.is_pending());
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{smallvec, SmallVec};

pub use effect::Effect;
pub use reducer::Reducer;

/// Reducer composition utilities (`combine_reducers`, `scope_reducer`)
pub mod composition;

/// Declarative macros for building effects
pub mod effect_macros;

/// Wire payload shapes (list envelopes, pagination, error payloads)
pub mod payload;

/// The generic resource container protocol
pub mod resource;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all state-transition logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for state transitions
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for VisitorReducer {
    ///     type State = VisitorState;
    ///     type Action = VisitorAction;
    ///     type Environment = VisitorEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut VisitorState,
    ///         action: VisitorAction,
    ///         env: &VisitorEnvironment,
    ///     ) -> SmallVec<[Effect<VisitorAction>; 4]> {
    ///         match action {
    ///             VisitorAction::Reset => {
    ///                 state.visitor = None;
    ///                 smallvec![Effect::None]
    ///             }
    ///             _ => smallvec![Effect::None],
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Updates state in place
        /// 2. Returns effect descriptions to be executed
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// Effects to be executed by the runtime
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }

    /// Apply an action to a state snapshot without touching it.
    ///
    /// Returns the next snapshot alongside the effects, leaving `state`
    /// exactly as it was. This is the immutable form of [`Reducer::reduce`].
    pub fn apply<R>(
        reducer: &R,
        state: &R::State,
        action: R::Action,
        env: &R::Environment,
    ) -> (R::State, SmallVec<[Effect<R::Action>; 4]>)
    where
        R: Reducer + ?Sized,
        R::State: Clone,
    {
        let mut next = state.clone();
        let effects = reducer.reduce(&mut next, action, env);
        (next, effects)
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution).
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action: Send + 'static> Effect<Action> {
        /// Lift an effect into a parent action type
        ///
        /// Used when a child reducer is scoped into a larger one: the
        /// action the child's future produces is embedded into the parent
        /// action before it is fed back.
        #[must_use]
        pub fn map<Parent>(self, embed: fn(Action) -> Parent) -> Effect<Parent>
        where
            Parent: Send + 'static,
        {
            match self {
                Effect::None => Effect::None,
                Effect::Future(future) => {
                    Effect::Future(Box::pin(async move { future.await.map(embed) }))
                },
            }
        }

        /// Returns true if this effect does nothing
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }
    }
}
