//! Shared setup for repository integration tests.
//!
//! Tests run against an in-memory SQLite database with a single
//! connection, migrated from scratch per test.

// Not every test binary uses every helper.
#![allow(dead_code)]

use chrono::NaiveDate;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use staffhub_core::auth::Role;
use staffhub_core::employee::EmployeeStatus;
use staffhub_db::migration::{Migrator, MigratorTrait};
use staffhub_db::repositories::{CreateEmployeeInput, CreatedEmployee, EmployeeRepository, UserRepository};

/// Connects to a fresh in-memory database and runs all migrations.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = Database::connect(options)
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

/// Creates an admin user for tests that need a decision maker.
pub async fn create_admin(db: &DatabaseConnection, email: &str) -> staffhub_db::entities::users::Model {
    UserRepository::new(db.clone())
        .create("Test Admin", email, "hash", "0000000000", 40, Role::Admin)
        .await
        .expect("create admin user")
}

/// Creates an employee (and linked user) with the default ledger.
pub async fn create_employee(db: &DatabaseConnection, name: &str, email: &str) -> CreatedEmployee {
    EmployeeRepository::new(db.clone())
        .create_with_user(CreateEmployeeInput {
            name: name.to_string(),
            email: email.to_string(),
            phone_number: "1234567890".to_string(),
            position: "Engineer".to_string(),
            department: "Engineering".to_string(),
            photo: String::new(),
            date_of_joining: date(2024, 1, 15),
            salary: 60_000,
            status: EmployeeStatus::Active,
            password_hash: "temp-hash".to_string(),
        })
        .await
        .expect("create employee with user")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
