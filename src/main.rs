use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;
use sea_orm::Database;

use backoffice_backend::api::{AuthApi, FinanceApi, HealthApi, InstallmentApi, UserApi};
use backoffice_backend::config::{self, Settings};
use backoffice_backend::errors::{InternalError, UserError};
use backoffice_backend::stores::NewUser;
use backoffice_backend::types::internal::Role;
use backoffice_backend::AppData;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    dotenv::dotenv().ok();

    config::logging::init_logging().expect("Failed to initialize logging");

    let settings = Settings::from_env().expect("Failed to load settings");

    let db = Database::connect(&settings.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!(url = %settings.database_url, "connected to database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    tracing::info!("database migrations completed");

    let app_data = Arc::new(AppData::init(db, &settings));

    bootstrap_admin(&app_data).await;

    let api_service = OpenApiService::new(
        (
            HealthApi,
            AuthApi::new(
                app_data.user_store.clone(),
                app_data.sessions.clone(),
                app_data.secure_cookies,
            ),
            UserApi::new(
                app_data.user_store.clone(),
                app_data.sessions.clone(),
                app_data.matrix.clone(),
            ),
            FinanceApi::new(
                app_data.finance.clone(),
                app_data.user_store.clone(),
                app_data.sessions.clone(),
            ),
            InstallmentApi::new(
                app_data.installments.clone(),
                app_data.user_store.clone(),
                app_data.sessions.clone(),
                app_data.matrix.clone(),
            ),
        ),
        "Back Office API",
        "1.0.0",
    )
    .server(format!("http://{}/api", settings.bind_addr));

    let ui = api_service.swagger_ui();
    let app = Route::new().nest("/api", api_service).nest("/swagger", ui);

    tracing::info!(addr = %settings.bind_addr, "starting server");
    Server::new(TcpListener::bind(settings.bind_addr))
        .run(app)
        .await
}

/// Create the first admin account when the user table is empty and the
/// bootstrap variables are present. Without users there is no way to log in,
/// so a fresh deployment needs this once.
async fn bootstrap_admin(app_data: &AppData) {
    let (Ok(email), Ok(password)) = (
        std::env::var("BOOTSTRAP_ADMIN_EMAIL"),
        std::env::var("BOOTSTRAP_ADMIN_PASSWORD"),
    ) else {
        return;
    };

    match app_data.user_store.any_users().await {
        Ok(true) => return,
        Ok(false) => {}
        Err(e) => {
            tracing::error!(error = %e, "bootstrap admin check failed");
            return;
        }
    }

    match app_data
        .user_store
        .create(NewUser {
            email: email.clone(),
            password,
            full_name: "Administrator".to_string(),
            role: Role::Admin,
            has_finance_access: true,
        })
        .await
    {
        Ok(user) => tracing::info!(user_id = user.id, %email, "bootstrap admin created"),
        Err(InternalError::User(UserError::DuplicateEmail(_))) => {
            tracing::info!("bootstrap admin already exists");
        }
        Err(e) => tracing::error!(error = %e, "failed to create bootstrap admin"),
    }
}
