//! Customer repository for database operations.
//!
//! Each operation is a single parameterized statement. Mutations that target
//! an id (`update`, `remove`, `block`, `unblock`) carry their existence check
//! in the statement itself: `RETURNING` yields no row, or `DELETE` affects no
//! row, when the id does not exist. There is no separate lookup to race with.

use sqlx::PgPool;
use tracing::instrument;

use customer_registry_core::{Customer, CustomerId, SaveCustomer};

use super::RepositoryError;

/// Repository for customer records.
///
/// Holds no state besides the pool handle, so clones are cheap and can be
/// shared across concurrent requests.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a customer by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matches (always for id 0).
    /// Returns `RepositoryError::Internal` if the query fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_by_id(&self, id: CustomerId) -> Result<Customer, RepositoryError> {
        if id.is_unassigned() {
            return Err(RepositoryError::NotFound);
        }

        sqlx::query_as::<_, Customer>(
            r"
            SELECT id, name, phone, active, created
            FROM customers
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(internal("get_by_id"))?
        .ok_or(RepositoryError::NotFound)
    }

    /// List every customer.
    ///
    /// Rows come back in the store's default order, which is not guaranteed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Internal` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        sqlx::query_as::<_, Customer>(
            r"
            SELECT id, name, phone, active, created
            FROM customers
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(internal("list_all"))
    }

    /// List customers that are not blocked.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Internal` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_active(&self) -> Result<Vec<Customer>, RepositoryError> {
        sqlx::query_as::<_, Customer>(
            r"
            SELECT id, name, phone, active, created
            FROM customers
            WHERE active
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(internal("list_active"))
    }

    /// Create or update a customer.
    ///
    /// A zero id inserts a new row; the store assigns `id`, `active` and
    /// `created`. Any other id rewrites `name` and `phone` of that row and
    /// leaves `active` and `created` untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` when updating an id that does not exist.
    /// Returns `RepositoryError::Internal` if the statement fails.
    #[instrument(skip(self, customer), fields(id = %customer.id))]
    pub async fn save(&self, customer: &SaveCustomer) -> Result<Customer, RepositoryError> {
        if customer.is_create() {
            let created = sqlx::query_as::<_, Customer>(
                r"
                INSERT INTO customers (name, phone)
                VALUES ($1, $2)
                RETURNING id, name, phone, active, created
                ",
            )
            .bind(&customer.name)
            .bind(&customer.phone)
            .fetch_one(&self.pool)
            .await
            .map_err(internal("insert"))?;

            tracing::info!(id = %created.id, "customer created");
            return Ok(created);
        }

        sqlx::query_as::<_, Customer>(
            r"
            UPDATE customers
            SET name = $2, phone = $3
            WHERE id = $1
            RETURNING id, name, phone, active, created
            ",
        )
        .bind(customer.id)
        .bind(&customer.name)
        .bind(&customer.phone)
        .fetch_optional(&self.pool)
        .await
        .map_err(internal("update"))?
        .ok_or(RepositoryError::NotFound)
    }

    /// Delete a customer, returning the id that was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matches (always for id 0).
    /// Returns `RepositoryError::Internal` if the statement fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn remove(&self, id: CustomerId) -> Result<CustomerId, RepositoryError> {
        if id.is_unassigned() {
            return Err(RepositoryError::NotFound);
        }

        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(internal("remove"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tracing::info!("customer removed");
        Ok(id)
    }

    /// Mark a customer as blocked.
    ///
    /// # Errors
    ///
    /// See [`Self::set_active`].
    pub async fn block(&self, id: CustomerId) -> Result<Customer, RepositoryError> {
        self.set_active(id, false).await
    }

    /// Lift a block from a customer.
    ///
    /// # Errors
    ///
    /// See [`Self::set_active`].
    pub async fn unblock(&self, id: CustomerId) -> Result<Customer, RepositoryError> {
        self.set_active(id, true).await
    }

    /// Set the `active` flag and return the row as stored afterwards.
    ///
    /// Setting the flag to its current value still succeeds.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matches (always for id 0).
    /// Returns `RepositoryError::Internal` if the statement fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn set_active(
        &self,
        id: CustomerId,
        active: bool,
    ) -> Result<Customer, RepositoryError> {
        if id.is_unassigned() {
            return Err(RepositoryError::NotFound);
        }

        sqlx::query_as::<_, Customer>(
            r"
            UPDATE customers
            SET active = $2
            WHERE id = $1
            RETURNING id, name, phone, active, created
            ",
        )
        .bind(id)
        .bind(active)
        .fetch_optional(&self.pool)
        .await
        .map_err(internal("set_active"))?
        .ok_or(RepositoryError::NotFound)
    }

    /// Check that the store answers a trivial query.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Internal` if the store is unreachable.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::Internal)?;
        Ok(())
    }
}

/// Classify a store error, noting the failed operation for anything unexpected.
///
/// Logged at `debug` so it rides along as a breadcrumb; the error itself is
/// reported once, when it becomes a response.
pub(crate) fn internal(operation: &'static str) -> impl Fn(sqlx::Error) -> RepositoryError {
    move |err| {
        let err = RepositoryError::from(err);
        if let RepositoryError::Internal(ref source) = err {
            tracing::debug!(operation, error = %source, "customer store query failed");
        }
        err
    }
}
