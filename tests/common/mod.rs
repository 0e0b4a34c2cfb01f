// Common test utilities for integration tests
#![allow(dead_code)]

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use backoffice_backend::stores::{NewUser, UserStore};
use backoffice_backend::types::db::user;
use backoffice_backend::types::internal::{Role, SessionUser};

/// Creates a test database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub async fn create_user(
    store: &UserStore,
    email: &str,
    role: Role,
    has_finance_access: bool,
) -> user::Model {
    store
        .create(NewUser {
            email: email.to_string(),
            password: "test-password".to_string(),
            full_name: "Test User".to_string(),
            role,
            has_finance_access,
        })
        .await
        .expect("Failed to create test user")
}

pub fn session_user(model: &user::Model) -> SessionUser {
    SessionUser::try_from(model).expect("Failed to build session user")
}
