//! Customer Registry Server library.
//!
//! HTTP service for customer records. The router validates identifiers and
//! payloads, dispatches to [`db::CustomerRepository`], and maps each outcome
//! to one status code and JSON body. Exposed as a library so integration
//! tests can run the full stack in-process.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod test_support;

pub use routes::app;
pub use state::AppState;
