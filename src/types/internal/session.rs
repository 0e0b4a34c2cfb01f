use std::str::FromStr;

use crate::errors::InternalError;
use crate::types::db::user;
use crate::types::internal::Role;

/// The resolved identity attached to a request after the session token has
/// been verified AND the user re-confirmed as active.
///
/// Never carries the password digest.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub id: i32,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub has_finance_access: bool,
}

impl TryFrom<&user::Model> for SessionUser {
    type Error = InternalError;

    fn try_from(model: &user::Model) -> Result<Self, Self::Error> {
        let role = Role::from_str(&model.role)
            .map_err(|e| InternalError::parse("role", e.to_string()))?;
        Ok(SessionUser {
            id: model.id,
            email: model.email.clone(),
            full_name: model.full_name.clone(),
            role,
            has_finance_access: model.has_finance_access,
        })
    }
}
