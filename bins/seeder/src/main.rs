//! Database seeder for StaffHub development and testing.
//!
//! Seeds an admin account and a few starter departments for local
//! development.
//!
//! Usage: cargo run --bin seeder

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use staffhub_core::auth::hash_password;
use staffhub_db::entities::{departments, users};

/// Admin user ID (consistent for all seeds)
const ADMIN_USER_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Dev-only admin password
const ADMIN_PASSWORD: &str = "admin12345";

/// Starter departments with deterministic IDs.
const DEPARTMENTS: &[(&str, &str, &str)] = &[
    (
        "00000000-0000-0000-0000-000000000010",
        "Engineering",
        "Product development and infrastructure",
    ),
    (
        "00000000-0000-0000-0000-000000000011",
        "Human Resources",
        "People operations and hiring",
    ),
    (
        "00000000-0000-0000-0000-000000000012",
        "Finance",
        "Payroll and accounting",
    ),
];

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = staffhub_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding admin user...");
    seed_admin_user(&db).await;

    println!("Seeding departments...");
    seed_departments(&db).await;

    println!("Seeding complete!");
}

fn admin_user_id() -> Uuid {
    Uuid::parse_str(ADMIN_USER_ID).unwrap()
}

/// Seeds the development admin account.
async fn seed_admin_user(db: &DatabaseConnection) {
    if users::Entity::find_by_id(admin_user_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Admin user already exists, skipping...");
        return;
    }

    let password_hash = hash_password(ADMIN_PASSWORD).expect("Failed to hash admin password");
    let now = chrono::Utc::now().into();

    let user = users::ActiveModel {
        id: Set(admin_user_id()),
        name: Set("StaffHub Admin".to_string()),
        email: Set("admin@staffhub.dev".to_string()),
        password_hash: Set(password_hash),
        mobile_number: Set("0000000000".to_string()),
        age: Set(0),
        role: Set("Admin".to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    user.insert(db).await.expect("Failed to insert admin user");
    println!("  Admin user created (admin@staffhub.dev / {ADMIN_PASSWORD})");
}

/// Seeds the starter departments.
async fn seed_departments(db: &DatabaseConnection) {
    for (raw_id, name, description) in DEPARTMENTS {
        let id = Uuid::parse_str(raw_id).unwrap();
        if departments::Entity::find_by_id(id)
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            println!("  Department {name} already exists, skipping...");
            continue;
        }

        let now = chrono::Utc::now().into();
        let department = departments::ActiveModel {
            id: Set(id),
            name: Set((*name).to_string()),
            description: Set((*description).to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        department
            .insert(db)
            .await
            .expect("Failed to insert department");
        println!("  Department {name} created");
    }
}
