//! Resource domains of the console.
//!
//! Each module declares a zero-sized resource marker, its typed success
//! payloads (from which `#[derive(Operation)]` generates the operation enum),
//! its selection slots and secondary collections, and how raw backend JSON
//! decodes into those payloads.

pub mod amenities;
pub mod committees;
pub mod complaints;
pub mod employees;
pub mod events;
pub mod maintenance;
pub mod parking;
pub mod visitors;
