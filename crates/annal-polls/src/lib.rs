//! # Annal Polls
//!
//! Poll engagement events on top of the Annal event store.
//!
//! The tracker provides:
//! - One event type (`poll_engagement`) with the kind carried in metadata
//! - Kind-dependent validation of vote choices
//! - A uniform metadata shape with explicit nulls for absent fields
//! - Metadata-driven queries with an [`EngagementFilter`]

pub mod tracker;

pub use tracker::{
    Engagement, EngagementFilter, EngagementKind, EngagementTracker, MAX_IDENTIFIER_LEN,
    POLL_ENGAGEMENT,
};
