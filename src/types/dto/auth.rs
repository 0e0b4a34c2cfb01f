use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::internal::{Role, SessionUser};

/// Request model for login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Identity returned on successful login; never includes the digest
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub id: i32,
    pub email: String,
    pub full_name: String,
    pub role: Role,
}

/// Resolved identity for the whoami endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct MeResponse {
    pub id: i32,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub has_finance_access: bool,
}

impl From<&SessionUser> for MeResponse {
    fn from(user: &SessionUser) -> Self {
        MeResponse {
            id: user.id,
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
            has_finance_access: user.has_finance_access,
        }
    }
}
