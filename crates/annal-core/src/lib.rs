//! Annal Core: the event model and in-memory store for the annal ledger
//!
//! This crate defines the foundation every other annal crate builds on:
//! - Event: immutable, store-stamped facts with JSON object metadata
//! - EventStore: append-only, mutex-guarded sequence with monotonic ids
//! - EventFilter: type-based matching for queries
//!
//! Key properties:
//! - Validation before append: a rejected event leaves no trace
//! - Value isolation: writes consume their input, reads return clones
//! - Generations: clearing restarts ids at 1 and bumps the generation counter

pub mod error;
pub mod event;
pub mod filter;
pub mod observe;
pub mod store;

pub use error::{AnnalError, Result};
pub use event::{Event, EventId};
pub use filter::EventFilter;
pub use store::{EventStore, StoreStats};
