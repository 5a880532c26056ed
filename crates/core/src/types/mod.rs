//! Core types for the tap list.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod status;

pub use id::*;
pub use status::*;
