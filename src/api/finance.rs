use std::sync::Arc;

use poem_openapi::{param::Path, param::Query, payload::Json, OpenApi, Tags};

use crate::api::{authenticate, SessionAuth};
use crate::errors::ApiError;
use crate::services::permissions::{has_finance_access, FinanceOperation};
use crate::services::{LifecycleManager, SessionService};
use crate::stores::{FinanceStore, UserStore};
use crate::types::dto::common::MessageResponse;
use crate::types::dto::finance::{
    FinanceListResponse, FinanceTransactionResponse, SaveFinanceRequest, UnarchiveRequest,
};
use crate::types::internal::SessionUser;

/// Finance transaction endpoints
///
/// Viewing is open to every authenticated user. Managing (create, edit,
/// archive, unarchive) is gated on the per-user finance attribute,
/// independent of role.
pub struct FinanceApi {
    finance: Arc<LifecycleManager<FinanceStore>>,
    user_store: Arc<UserStore>,
    sessions: Arc<SessionService>,
}

#[derive(Tags)]
enum FinanceTags {
    /// Finance transactions
    Finance,
}

impl FinanceApi {
    pub fn new(
        finance: Arc<LifecycleManager<FinanceStore>>,
        user_store: Arc<UserStore>,
        sessions: Arc<SessionService>,
    ) -> Self {
        Self {
            finance,
            user_store,
            sessions,
        }
    }

    async fn require_view(&self, auth: &SessionAuth) -> Result<SessionUser, ApiError> {
        let user = authenticate(&self.sessions, &self.user_store, &auth.0.key).await?;
        // View is granted to every authenticated role
        debug_assert!(has_finance_access(
            user.role,
            user.has_finance_access,
            FinanceOperation::View
        ));
        Ok(user)
    }

    async fn require_manage(&self, auth: &SessionAuth) -> Result<SessionUser, ApiError> {
        let user = authenticate(&self.sessions, &self.user_store, &auth.0.key).await?;
        if !has_finance_access(user.role, user.has_finance_access, FinanceOperation::Manage) {
            return Err(ApiError::forbidden(
                "You don't have permission to manage finance",
            ));
        }
        Ok(user)
    }
}

#[OpenApi(prefix_path = "/finance")]
impl FinanceApi {
    /// List transactions, split by archive state
    #[oai(path = "/", method = "get", tag = "FinanceTags::Finance")]
    async fn list(
        &self,
        auth: SessionAuth,
        archived: Query<Option<bool>>,
    ) -> Result<Json<FinanceListResponse>, ApiError> {
        self.require_view(&auth).await?;
        let transactions = self
            .finance
            .store()
            .list(archived.0.unwrap_or(false))
            .await
            .map_err(ApiError::from)?;
        Ok(Json(FinanceListResponse {
            transactions: transactions
                .into_iter()
                .map(FinanceTransactionResponse::from)
                .collect(),
        }))
    }

    /// Create a transaction
    #[oai(path = "/", method = "post", tag = "FinanceTags::Finance")]
    async fn create(
        &self,
        auth: SessionAuth,
        body: Json<SaveFinanceRequest>,
    ) -> Result<Json<FinanceTransactionResponse>, ApiError> {
        let actor = self.require_manage(&auth).await?;
        body.validate().map_err(ApiError::validation)?;

        let created = self
            .finance
            .create(body.0.into_payload(), &actor)
            .await
            .map_err(ApiError::from)?;
        Ok(Json(FinanceTransactionResponse::from(created)))
    }

    /// Update a transaction
    #[oai(path = "/:id", method = "put", tag = "FinanceTags::Finance")]
    async fn update(
        &self,
        auth: SessionAuth,
        id: Path<i32>,
        body: Json<SaveFinanceRequest>,
    ) -> Result<Json<FinanceTransactionResponse>, ApiError> {
        let actor = self.require_manage(&auth).await?;
        body.validate().map_err(ApiError::validation)?;

        let updated = self
            .finance
            .update(id.0, body.0.into_payload(), &actor)
            .await
            .map_err(ApiError::from)?;
        Ok(Json(FinanceTransactionResponse::from(updated)))
    }

    /// Archive a transaction (soft delete)
    #[oai(path = "/:id", method = "delete", tag = "FinanceTags::Finance")]
    async fn archive(
        &self,
        auth: SessionAuth,
        id: Path<i32>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let actor = self.require_manage(&auth).await?;
        self.finance
            .archive(id.0, &actor)
            .await
            .map_err(ApiError::from)?;
        Ok(Json(MessageResponse::new(
            "Transaction archived successfully",
        )))
    }

    /// Unarchive a transaction; the justification note is mandatory and
    /// appended permanently to the record's notes
    #[oai(path = "/:id", method = "patch", tag = "FinanceTags::Finance")]
    async fn unarchive(
        &self,
        auth: SessionAuth,
        id: Path<i32>,
        body: Json<UnarchiveRequest>,
    ) -> Result<Json<FinanceTransactionResponse>, ApiError> {
        let actor = self.require_manage(&auth).await?;
        let restored = self
            .finance
            .unarchive(id.0, &actor, &body.unarchive_note)
            .await
            .map_err(ApiError::from)?;
        Ok(Json(FinanceTransactionResponse::from(restored)))
    }
}
