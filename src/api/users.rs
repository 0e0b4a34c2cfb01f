use std::sync::Arc;

use poem_openapi::{param::Path, param::Query, payload::Json, OpenApi, Tags};

use crate::api::{authenticate, SessionAuth};
use crate::errors::ApiError;
use crate::services::{Permission, PermissionMatrix, SessionService};
use crate::stores::{NewUser, UserChanges, UserStore};
use crate::types::dto::common::MessageResponse;
use crate::types::dto::user::{
    CreateUserRequest, UpdateUserRequest, UserListResponse, UserResponse,
};
use crate::types::internal::SessionUser;

/// User management endpoints, admin only
pub struct UserApi {
    user_store: Arc<UserStore>,
    sessions: Arc<SessionService>,
    matrix: Arc<PermissionMatrix>,
}

#[derive(Tags)]
enum UserTags {
    /// User management
    Users,
}

impl UserApi {
    pub fn new(
        user_store: Arc<UserStore>,
        sessions: Arc<SessionService>,
        matrix: Arc<PermissionMatrix>,
    ) -> Self {
        Self {
            user_store,
            sessions,
            matrix,
        }
    }

    async fn require_manage_users(&self, auth: &SessionAuth) -> Result<SessionUser, ApiError> {
        let user = authenticate(&self.sessions, &self.user_store, &auth.0.key).await?;
        if !self.matrix.has_permission(user.role, Permission::ManageUsers) {
            return Err(ApiError::forbidden("Forbidden"));
        }
        Ok(user)
    }
}

#[OpenApi(prefix_path = "/users")]
impl UserApi {
    /// List users; deactivated users only with include_deactivated=true
    #[oai(path = "/", method = "get", tag = "UserTags::Users")]
    async fn list(
        &self,
        auth: SessionAuth,
        include_deactivated: Query<Option<bool>>,
    ) -> Result<Json<UserListResponse>, ApiError> {
        self.require_manage_users(&auth).await?;
        let users = self
            .user_store
            .list(include_deactivated.0.unwrap_or(false))
            .await
            .map_err(ApiError::from)?;
        Ok(Json(UserListResponse {
            users: users.into_iter().map(UserResponse::from).collect(),
        }))
    }

    /// Create a user
    #[oai(path = "/", method = "post", tag = "UserTags::Users")]
    async fn create(
        &self,
        auth: SessionAuth,
        body: Json<CreateUserRequest>,
    ) -> Result<Json<UserResponse>, ApiError> {
        let actor = self.require_manage_users(&auth).await?;

        if body.email.trim().is_empty()
            || body.password.is_empty()
            || body.full_name.trim().is_empty()
        {
            return Err(ApiError::validation("Missing required fields"));
        }

        let body = body.0;
        let created = self
            .user_store
            .create(NewUser {
                email: body.email,
                password: body.password,
                full_name: body.full_name,
                role: body.role,
                has_finance_access: body.has_finance_access,
            })
            .await
            .map_err(ApiError::from)?;

        tracing::info!(user_id = created.id, actor_id = actor.id, "user created");
        Ok(Json(UserResponse::from(created)))
    }

    /// Update a user; omitted fields stay unchanged
    #[oai(path = "/:id", method = "put", tag = "UserTags::Users")]
    async fn update(
        &self,
        auth: SessionAuth,
        id: Path<i32>,
        body: Json<UpdateUserRequest>,
    ) -> Result<Json<UserResponse>, ApiError> {
        self.require_manage_users(&auth).await?;

        let body = body.0;
        let updated = self
            .user_store
            .update(
                id.0,
                UserChanges {
                    email: body.email,
                    password: body.password.filter(|p| !p.is_empty()),
                    full_name: body.full_name,
                    role: body.role,
                    has_finance_access: body.has_finance_access,
                },
            )
            .await
            .map_err(ApiError::from)?;

        Ok(Json(UserResponse::from(updated)))
    }

    /// Deactivate a user (irreversible, never self)
    #[oai(path = "/:id", method = "delete", tag = "UserTags::Users")]
    async fn deactivate(
        &self,
        auth: SessionAuth,
        id: Path<i32>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let actor = self.require_manage_users(&auth).await?;

        self.user_store
            .deactivate(id.0, actor.id)
            .await
            .map_err(ApiError::from)?;

        tracing::info!(user_id = id.0, actor_id = actor.id, "user deactivated");
        Ok(Json(MessageResponse::new("User deactivated successfully")))
    }
}
