//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::db::CustomerRepository;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Holds the customer repository (and through it
/// the connection pool) plus the per-request deadline.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    customers: CustomerRepository,
    request_timeout: Duration,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `customers` - Repository over the customer store
    /// * `request_timeout` - Deadline applied to every request
    #[must_use]
    pub fn new(customers: CustomerRepository, request_timeout: Duration) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                customers,
                request_timeout,
            }),
        }
    }

    /// Get a reference to the customer repository.
    #[must_use]
    pub fn customers(&self) -> &CustomerRepository {
        &self.inner.customers
    }

    /// Get the per-request deadline.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.inner.request_timeout
    }
}
