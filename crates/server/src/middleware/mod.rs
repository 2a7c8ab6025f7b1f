//! HTTP middleware stack for the server.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, per-request hub)
//! 2. `TraceLayer` (request span with method, uri, status, latency)
//! 3. Request ID (add unique ID to each request)
//! 4. Deadline (drop the handler, and its in-flight store call, when the
//!    request outlives its budget)

pub mod deadline;
pub mod request_id;

pub use deadline::deadline_middleware;
pub use request_id::request_id_middleware;
