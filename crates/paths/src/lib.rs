//! Shared API path definitions for MongoDB Atlas
//!
//! This crate centralizes the Atlas Public API paths so the handler client
//! and the mock servers used in tests agree on every route.
//!
//! ## PathBuilder
//!
//! The `PathBuilder` assembles a path out of raw (unencoded) segments. Callers
//! that build real URLs push the segments through `Url::path_segments_mut`, so
//! usernames and CIDR blocks containing `/` or `:` are percent-encoded exactly
//! once. The `Display` form is the unencoded path and is what mock servers
//! match on for plain identifiers.

pub mod atlas;
pub mod builder;

// Re-export core types for convenience
pub use builder::{ApiPath, PathBuilder};
