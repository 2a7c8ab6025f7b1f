//! Database operations for the customer store.
//!
//! # Table: `customers`
//!
//! | column    | type          | notes                       |
//! |-----------|---------------|-----------------------------|
//! | `id`      | `BIGSERIAL`   | primary key, store-assigned |
//! | `name`    | `TEXT`        |                             |
//! | `phone`   | `TEXT`        |                             |
//! | `active`  | `BOOLEAN`     | default `true`              |
//! | `created` | `TIMESTAMPTZ` | default `now()`             |
//!
//! The reference DDL lives in `crates/server/schema/customers.sql`. The
//! service never creates or migrates tables itself.

pub mod customers;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use customers::CustomerRepository;

use crate::config::PoolConfig;

/// Errors surfaced by repository operations.
///
/// Every store failure is classified into exactly one of these two kinds.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No row matched the targeted id.
    #[error("not found")]
    NotFound,

    /// Anything else: connectivity, constraint violation, malformed query.
    #[error("database error: {0}")]
    Internal(#[source] sqlx::Error),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound,
            other => Self::Internal(other),
        }
    }
}

/// Create a `PostgreSQL` connection pool.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `config` - Pool sizing and acquire timeout
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
    config: &PoolConfig,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(database_url.expose_secret())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_classifies_as_not_found() {
        let err = RepositoryError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[test]
    fn test_other_errors_classify_as_internal() {
        let err = RepositoryError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, RepositoryError::Internal(_)));
        assert!(err.to_string().starts_with("database error"));
    }
}
