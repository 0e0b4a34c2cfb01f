use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::user;
use crate::types::internal::Role;

/// User record as exposed over the API; the digest never leaves the store
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub full_name: String,
    /// Stored role string; parse failures would have been rejected earlier
    pub role: String,
    pub has_finance_access: bool,
    pub created_at: i64,
    pub deactivated_at: Option<i64>,
    pub deactivated_by: Option<i32>,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        UserResponse {
            id: model.id,
            email: model.email,
            full_name: model.full_name,
            role: model.role,
            has_finance_access: model.has_finance_access,
            created_at: model.created_at,
            deactivated_at: model.deactivated_at,
            deactivated_by: model.deactivated_by,
        }
    }
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
    #[oai(default)]
    pub has_finance_access: bool,
}

/// Partial update; omitted fields keep their stored values
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<Role>,
    pub has_finance_access: Option<bool>,
}
