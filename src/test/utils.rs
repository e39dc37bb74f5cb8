// Test utilities shared across unit tests
// Only compiled when running tests

use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use uuid::Uuid;

use crate::types::db::user;

/// Creates an in-memory SQLite database with migrations applied.
/// Pinned to a single pooled connection so every query sees the same
/// in-memory database.
pub async fn setup_test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1);

    let db = Database::connect(options)
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Inserts a disabled user directly, bypassing the store layer
pub async fn create_test_user(db: &DatabaseConnection, email: &str) -> user::Model {
    let now = Utc::now().timestamp();
    user::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        email: Set(email.to_string()),
        password_hash: Set("$argon2id$v=19$m=19456,t=2,p=1$placeholder$placeholder".to_string()),
        full_name: Set("Test User".to_string()),
        enabled: Set(false),
        locked: Set(false),
        roles: Set(r#"["USER"]"#.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("Failed to insert test user")
}
