//! Customer Registry Core - Shared types library.
//!
//! This crate provides the types shared by every customer registry component:
//! - `server` - HTTP service exposing customer records
//! - `integration-tests` - End-to-end scenarios against a live database
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP handling. Enable the `postgres` feature to get `sqlx` encoding
//! and row mapping for the types.
//!
//! # Modules
//!
//! - [`types`] - Customer entity, save payload, and the type-safe `CustomerId`

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
