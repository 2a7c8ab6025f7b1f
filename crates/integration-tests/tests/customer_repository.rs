//! Integration tests for `CustomerRepository` against a live database.
//!
//! Run with: cargo test -p customer-registry-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use customer_registry_core::{CustomerId, SaveCustomer};
use customer_registry_integration_tests::{TestContext, unique_name};
use customer_registry_server::db::RepositoryError;

#[tokio::test]
#[ignore = "Requires PostgreSQL (CUSTOMERS_TEST_DATABASE_URL)"]
async fn test_create_then_fetch() {
    let ctx = TestContext::new().await;
    let repo = ctx.repository();

    let created = repo
        .save(&SaveCustomer::create(unique_name("Repo"), "42"))
        .await
        .unwrap();
    assert!(!created.id.is_unassigned());
    assert!(created.active);

    let fetched = repo.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (CUSTOMERS_TEST_DATABASE_URL)"]
async fn test_missing_ids_are_not_found() {
    let ctx = TestContext::new().await;
    let repo = ctx.repository();
    let missing = CustomerId::new(i64::MAX);

    for id in [CustomerId::UNASSIGNED, missing] {
        assert!(matches!(
            repo.get_by_id(id).await,
            Err(RepositoryError::NotFound)
        ));
        assert!(matches!(repo.remove(id).await, Err(RepositoryError::NotFound)));
        assert!(matches!(repo.block(id).await, Err(RepositoryError::NotFound)));
        assert!(matches!(
            repo.unblock(id).await,
            Err(RepositoryError::NotFound)
        ));
    }

    assert!(matches!(
        repo.save(&SaveCustomer::update(missing, "x", "y")).await,
        Err(RepositoryError::NotFound)
    ));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (CUSTOMERS_TEST_DATABASE_URL)"]
async fn test_block_is_idempotent() {
    let ctx = TestContext::new().await;
    let repo = ctx.repository();

    let created = repo
        .save(&SaveCustomer::create(unique_name("Twice"), "9"))
        .await
        .unwrap();

    let first = repo.block(created.id).await.unwrap();
    let second = repo.block(created.id).await.unwrap();
    assert_eq!(first, second);
    assert!(!second.active);

    let restored = repo.unblock(created.id).await.unwrap();
    assert_eq!(restored, created);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (CUSTOMERS_TEST_DATABASE_URL)"]
async fn test_remove_then_fetch_is_not_found() {
    let ctx = TestContext::new().await;
    let repo = ctx.repository();

    let created = repo
        .save(&SaveCustomer::create(unique_name("Doomed"), "0"))
        .await
        .unwrap();

    assert_eq!(repo.remove(created.id).await.unwrap(), created.id);
    assert!(matches!(
        repo.get_by_id(created.id).await,
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        repo.remove(created.id).await,
        Err(RepositoryError::NotFound)
    ));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (CUSTOMERS_TEST_DATABASE_URL)"]
async fn test_concurrent_remove_has_single_winner() {
    let ctx = TestContext::new().await;
    let repo = ctx.repository();

    let created = repo
        .save(&SaveCustomer::create(unique_name("Contended"), "1"))
        .await
        .unwrap();

    let (a, b) = tokio::join!(repo.remove(created.id), repo.remove(created.id));
    let outcomes = [a, b];

    let removed = outcomes.iter().filter(|r| r.is_ok()).count();
    let not_found = outcomes
        .iter()
        .filter(|r| matches!(r, Err(RepositoryError::NotFound)))
        .count();
    assert_eq!((removed, not_found), (1, 1));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (CUSTOMERS_TEST_DATABASE_URL)"]
async fn test_listings_include_new_rows() {
    let ctx = TestContext::new().await;
    let repo = ctx.repository();

    let created = repo
        .save(&SaveCustomer::create(unique_name("Listed"), "3"))
        .await
        .unwrap();

    let all = repo.list_all().await.unwrap();
    assert!(all.contains(&created));

    repo.block(created.id).await.unwrap();
    let active = repo.list_active().await.unwrap();
    assert!(active.iter().all(|c| c.active));
    assert!(!active.iter().any(|c| c.id == created.id));
}
