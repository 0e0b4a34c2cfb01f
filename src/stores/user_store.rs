use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::errors::{InternalError, UserError};
use crate::services::crypto;
use crate::types::db::user::{self, Entity as User};
use crate::types::internal::{Role, SessionUser};

/// Fields for a new user
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
    pub has_finance_access: bool,
}

/// Partial update; None leaves the stored value unchanged
#[derive(Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<Role>,
    pub has_finance_access: Option<bool>,
}

/// Identity directory: the exclusive owner of user records
///
/// Email uniqueness is case-sensitive, enforced by the database constraint
/// (never check-then-insert), and holds across active and deactivated users
/// alike - a deactivated user's email stays reserved.
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<user::Model>, InternalError> {
        User::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_by_id", e))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, InternalError> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_by_email", e))
    }

    /// A user is a valid session subject iff they have not been deactivated
    pub fn is_usable(model: &user::Model) -> bool {
        model.deactivated_at.is_none()
    }

    /// Fetch the user behind a resolved session token, or None when the user
    /// is gone or deactivated. Called on every authenticated request so a
    /// deactivation cuts off outstanding tokens immediately.
    pub async fn find_session_subject(
        &self,
        user_id: i32,
    ) -> Result<Option<SessionUser>, InternalError> {
        let Some(model) = self.find_by_id(user_id).await? else {
            return Ok(None);
        };
        if !Self::is_usable(&model) {
            return Ok(None);
        }
        SessionUser::try_from(&model).map(Some)
    }

    /// Check email/password, uniformly returning None for unknown email,
    /// deactivated account and wrong password. Callers surface all three as
    /// the same invalid-credentials response.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<user::Model>, InternalError> {
        let Some(model) = self.find_by_email(email).await? else {
            return Ok(None);
        };
        if !Self::is_usable(&model) {
            return Ok(None);
        }
        if !crypto::verify_password(&model.password_hash, password) {
            return Ok(None);
        }
        Ok(Some(model))
    }

    pub async fn create(&self, new_user: NewUser) -> Result<user::Model, InternalError> {
        let password_hash = crypto::hash_password(&new_user.password)?;

        let model = user::ActiveModel {
            email: Set(new_user.email.clone()),
            password_hash: Set(password_hash),
            full_name: Set(new_user.full_name),
            role: Set(new_user.role.as_str().to_string()),
            has_finance_access: Set(new_user.has_finance_access),
            created_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };

        model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                UserError::DuplicateEmail(new_user.email).into()
            } else {
                InternalError::database("create_user", e)
            }
        })
    }

    pub async fn update(&self, id: i32, changes: UserChanges) -> Result<user::Model, InternalError> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        let new_email = changes.email.clone();
        let mut model: user::ActiveModel = existing.into();
        if let Some(email) = changes.email {
            model.email = Set(email);
        }
        if let Some(password) = changes.password {
            model.password_hash = Set(crypto::hash_password(&password)?);
        }
        if let Some(full_name) = changes.full_name {
            model.full_name = Set(full_name);
        }
        if let Some(role) = changes.role {
            model.role = Set(role.as_str().to_string());
        }
        if let Some(attr) = changes.has_finance_access {
            model.has_finance_access = Set(attr);
        }

        model.update(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                UserError::DuplicateEmail(new_email.unwrap_or_default()).into()
            } else {
                InternalError::database("update_user", e)
            }
        })
    }

    /// Stamp deactivated_at/deactivated_by. Irreversible: no reactivation
    /// path exists. A user can never deactivate themselves.
    pub async fn deactivate(
        &self,
        target_id: i32,
        acting_user_id: i32,
    ) -> Result<user::Model, InternalError> {
        if target_id == acting_user_id {
            return Err(UserError::SelfDeactivation.into());
        }

        let existing = self
            .find_by_id(target_id)
            .await?
            .ok_or(UserError::NotFound(target_id))?;

        let mut model: user::ActiveModel = existing.into();
        model.deactivated_at = Set(Some(Utc::now().timestamp()));
        model.deactivated_by = Set(Some(acting_user_id));
        model
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("deactivate_user", e))
    }

    /// Deactivated users only appear when explicitly requested
    pub async fn list(&self, include_deactivated: bool) -> Result<Vec<user::Model>, InternalError> {
        let mut query = User::find();
        if !include_deactivated {
            query = query.filter(user::Column::DeactivatedAt.is_null());
        }
        query
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_users", e))
    }

    /// True when at least one user exists, used by the startup bootstrap
    pub async fn any_users(&self) -> Result<bool, InternalError> {
        let first = User::find()
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("any_users", e))?;
        Ok(first.is_some())
    }
}

/// Matches SQLite ("UNIQUE constraint failed") and Postgres ("duplicate key
/// value violates unique constraint") wording
pub(crate) fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
    err.to_string().to_lowercase().contains("unique")
}
