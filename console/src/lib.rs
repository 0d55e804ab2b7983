//! # Concierge Console
//!
//! Client-side state for a building-management console.
//!
//! Every resource domain (amenities, committees, complaints, employees,
//! events, maintenance billing, parking, visitors) is one configuration of the
//! generic resource container in `concierge_core::resource`. This crate
//! declares those configurations, aggregates them into a single
//! [`ConsoleState`], and adapts a JSON backend to the typed gateway seam.
//!
//! ## Architecture
//!
//! - [`types`]: entity DTOs as the backend sends them
//! - [`domains`]: one resource per domain, with its operations and slots
//! - [`console`]: aggregate state, action and reducer
//! - [`wire`]: decoding raw JSON answers into typed success payloads
//! - [`demo`]: an in-memory backend
//! - [`config`]: environment configuration of the binary
//!
//! ## Example
//!
//! ```ignore
//! use concierge_console::{ConsoleEnvironment, ConsoleReducer, ConsoleState, DemoBackend};
//! use concierge_runtime::Store;
//!
//! let env = ConsoleEnvironment::connected(Arc::new(DemoBackend::seeded()));
//! let store = Store::new(ConsoleState::default(), ConsoleReducer::new(), env);
//! store.send(VisitorAction::request(VisitorOperation::FetchVisitors).into()).await?;
//! ```

pub mod config;
pub mod console;
pub mod demo;
pub mod domains;
pub mod types;
pub mod wire;

pub use config::{ConfigError, ConsoleConfig};
pub use console::{ConsoleAction, ConsoleDomain, ConsoleEnvironment, ConsoleReducer, ConsoleState, ConsoleStore, Domain};
pub use demo::DemoBackend;
pub use wire::{JsonBackend, JsonGateway, WireDecode};
