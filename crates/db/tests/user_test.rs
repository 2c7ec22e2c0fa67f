//! Integration tests for the user repository.

mod common;

use staffhub_core::auth::Role;
use staffhub_db::repositories::UserRepository;

#[tokio::test]
async fn test_create_and_find_user() {
    let db = common::setup_db().await;
    let repo = UserRepository::new(db);

    let created = repo
        .create(
            "Jordan Smith",
            "jordan@example.com",
            "phc-hash",
            "5551234567",
            29,
            Role::Employee,
        )
        .await
        .unwrap();

    assert_eq!(created.name, "Jordan Smith");
    assert_eq!(created.role, "Employee");

    let found = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(found.email, "jordan@example.com");
    assert_eq!(found.password_hash, "phc-hash");
}

#[tokio::test]
async fn test_email_is_lowercased_and_lookup_is_case_insensitive() {
    let db = common::setup_db().await;
    let repo = UserRepository::new(db);

    let created = repo
        .create(
            "Casey Park",
            "Casey.Park@Example.COM",
            "phc-hash",
            "5551234567",
            35,
            Role::Admin,
        )
        .await
        .unwrap();
    assert_eq!(created.email, "casey.park@example.com");

    let found = repo.find_by_email("CASEY.PARK@example.com").await.unwrap();
    assert!(found.is_some());

    assert!(repo.email_exists("casey.park@EXAMPLE.com").await.unwrap());
    assert!(!repo.email_exists("someone.else@example.com").await.unwrap());
}

#[tokio::test]
async fn test_duplicate_email_insert_fails() {
    let db = common::setup_db().await;
    let repo = UserRepository::new(db);

    repo.create(
        "First",
        "dup@example.com",
        "hash-a",
        "111",
        30,
        Role::Employee,
    )
    .await
    .unwrap();

    let result = repo
        .create(
            "Second",
            "dup@example.com",
            "hash-b",
            "222",
            31,
            Role::Employee,
        )
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_find_missing_user_returns_none() {
    let db = common::setup_db().await;
    let repo = UserRepository::new(db);

    let found = repo.find_by_email("nobody@example.com").await.unwrap();
    assert!(found.is_none());
}
