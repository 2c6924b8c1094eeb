//! # Runtime Module
//!
//! Process-level setup shared by the handler binary and `atlasctl`.

pub mod initialization;

pub use initialization::*;
