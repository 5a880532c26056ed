//! Tap List Core - Shared domain types.
//!
//! This crate provides the types and rules used across the tap list components:
//! - `server` - Display board, pour tracker and admin panel
//! - `cli` - Command-line tools for migrations and backups
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. The store and the route layer call into it for every rule
//! that does not have to live inside a SQL statement.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs and the beer lifecycle status
//! - [`keg`] - Keg sizes, pour amounts and the keg-swap policy
//! - [`form`] - Lenient parsing of numeric form fields

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod form;
pub mod keg;
pub mod types;

pub use types::*;
