use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::Settings;
use crate::services::{LifecycleManager, LifecyclePolicy, PermissionMatrix, SessionService};
use crate::stores::{FinanceStore, InstallmentStore, UserStore};

/// Centralized application data following the main-owned stores pattern
///
/// Everything is created once in main and shared into the API structs via
/// `Arc`. The permission matrix is built here and never mutated afterwards.
///
/// Lifecycle policies per record type:
/// - finance transactions: archive/unarchive, editable while archived,
///   never hard-deleted
/// - installment orders: hard delete only, no archive state
pub struct AppData {
    pub db: DatabaseConnection,
    pub sessions: Arc<SessionService>,
    pub matrix: Arc<PermissionMatrix>,
    pub user_store: Arc<UserStore>,
    pub finance: Arc<LifecycleManager<FinanceStore>>,
    pub installments: Arc<LifecycleManager<InstallmentStore>>,
    pub secure_cookies: bool,
}

impl AppData {
    /// Wire up all stores and services
    ///
    /// Database connection must already be migrated.
    pub fn init(db: DatabaseConnection, settings: &Settings) -> Self {
        tracing::debug!("Initializing AppData...");

        let sessions = Arc::new(SessionService::new(&settings.session_secret));
        let matrix = Arc::new(PermissionMatrix::default_matrix());
        let user_store = Arc::new(UserStore::new(db.clone()));

        let finance = Arc::new(LifecycleManager::new(
            FinanceStore::new(db.clone()),
            LifecyclePolicy::archive_only(),
        ));
        let installments = Arc::new(LifecycleManager::new(
            InstallmentStore::new(db.clone()),
            LifecyclePolicy::hard_delete_only(),
        ));

        tracing::debug!("AppData initialization complete");
        Self {
            db,
            sessions,
            matrix,
            user_store,
            finance,
            installments,
            secure_cookies: settings.secure_cookies,
        }
    }
}
