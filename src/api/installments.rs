use std::sync::Arc;

use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::api::{authenticate, SessionAuth};
use crate::errors::ApiError;
use crate::services::{
    ArchivableStore, LifecycleManager, Permission, PermissionMatrix, SessionService,
};
use crate::stores::{InstallmentPayload, InstallmentStore, UserStore};
use crate::types::dto::common::MessageResponse;
use crate::types::dto::installment::{
    BulkDeleteResponse, InstallmentListResponse, InstallmentOrderResponse, SaveInstallmentRequest,
};
use crate::types::internal::SessionUser;

/// Installment order endpoints
///
/// This record type hard-deletes instead of archiving, and splits edit
/// rights by field: order number / installment id / magento flag for every
/// role, cardholder fields for admin and moderator only.
pub struct InstallmentApi {
    installments: Arc<LifecycleManager<InstallmentStore>>,
    user_store: Arc<UserStore>,
    sessions: Arc<SessionService>,
    matrix: Arc<PermissionMatrix>,
}

#[derive(Tags)]
enum InstallmentTags {
    /// Installment orders
    Installments,
}

impl InstallmentApi {
    pub fn new(
        installments: Arc<LifecycleManager<InstallmentStore>>,
        user_store: Arc<UserStore>,
        sessions: Arc<SessionService>,
        matrix: Arc<PermissionMatrix>,
    ) -> Self {
        Self {
            installments,
            user_store,
            sessions,
            matrix,
        }
    }

    async fn require_permission(
        &self,
        auth: &SessionAuth,
        permission: Permission,
    ) -> Result<SessionUser, ApiError> {
        let user = authenticate(&self.sessions, &self.user_store, &auth.0.key).await?;
        if !self.matrix.has_permission(user.role, permission) {
            return Err(ApiError::forbidden("Forbidden"));
        }
        Ok(user)
    }

    /// Cardholder fields need the admin-level installment permission
    fn check_field_split(
        &self,
        actor: &SessionUser,
        body: &SaveInstallmentRequest,
    ) -> Result<(), ApiError> {
        if body.touches_cardholder_fields()
            && !self
                .matrix
                .has_permission(actor.role, Permission::EditInstallmentAdmin)
        {
            return Err(ApiError::forbidden(
                "You don't have permission to edit cardholder information",
            ));
        }
        Ok(())
    }
}

#[OpenApi(prefix_path = "/installments")]
impl InstallmentApi {
    /// List installment orders
    #[oai(path = "/", method = "get", tag = "InstallmentTags::Installments")]
    async fn list(&self, auth: SessionAuth) -> Result<Json<InstallmentListResponse>, ApiError> {
        self.require_permission(&auth, Permission::ViewRecord)
            .await?;
        let orders = self
            .installments
            .store()
            .list()
            .await
            .map_err(ApiError::from)?;
        Ok(Json(InstallmentListResponse {
            orders: orders
                .into_iter()
                .map(InstallmentOrderResponse::from)
                .collect(),
        }))
    }

    /// Create an installment order
    #[oai(path = "/", method = "post", tag = "InstallmentTags::Installments")]
    async fn create(
        &self,
        auth: SessionAuth,
        body: Json<SaveInstallmentRequest>,
    ) -> Result<Json<InstallmentOrderResponse>, ApiError> {
        let actor = self
            .require_permission(&auth, Permission::CreateRecord)
            .await?;
        body.validate().map_err(ApiError::validation)?;
        self.check_field_split(&actor, &body)?;

        let body = body.0;
        let created = self
            .installments
            .create(
                InstallmentPayload {
                    order_number: body.order_number,
                    installment_id: body.installment_id,
                    is_added_to_magento: body.is_added_to_magento,
                    cardholder_name: body.cardholder_name,
                    cardholder_phone_number: body.cardholder_phone_number,
                    cardholder_mother_name: body.cardholder_mother_name,
                    notes: body.notes,
                },
                &actor,
            )
            .await
            .map_err(ApiError::from)?;
        Ok(Json(InstallmentOrderResponse::from(created)))
    }

    /// Update an installment order
    #[oai(path = "/:id", method = "put", tag = "InstallmentTags::Installments")]
    async fn update(
        &self,
        auth: SessionAuth,
        id: Path<i32>,
        body: Json<SaveInstallmentRequest>,
    ) -> Result<Json<InstallmentOrderResponse>, ApiError> {
        let actor = self
            .require_permission(&auth, Permission::EditInstallmentBasic)
            .await?;
        body.validate().map_err(ApiError::validation)?;
        self.check_field_split(&actor, &body)?;

        let body = body.0;
        let mut payload = InstallmentPayload {
            order_number: body.order_number,
            installment_id: body.installment_id,
            is_added_to_magento: body.is_added_to_magento,
            cardholder_name: body.cardholder_name,
            cardholder_phone_number: body.cardholder_phone_number,
            cardholder_mother_name: body.cardholder_mother_name,
            notes: body.notes,
        };

        // A basic edit must not erase cardholder data it was not allowed to
        // touch; carry the stored values through for non-admin actors
        if !self
            .matrix
            .has_permission(actor.role, Permission::EditInstallmentAdmin)
        {
            let existing = self
                .installments
                .store()
                .fetch(id.0)
                .await
                .map_err(ApiError::from)?
                .ok_or_else(|| ApiError::not_found("Record not found"))?;
            payload.cardholder_name = existing.cardholder_name;
            payload.cardholder_phone_number = existing.cardholder_phone_number;
            payload.cardholder_mother_name = existing.cardholder_mother_name;
        }

        let updated = self
            .installments
            .update(id.0, payload, &actor)
            .await
            .map_err(ApiError::from)?;
        Ok(Json(InstallmentOrderResponse::from(updated)))
    }

    /// Permanently delete an installment order
    #[oai(path = "/:id", method = "delete", tag = "InstallmentTags::Installments")]
    async fn delete(
        &self,
        auth: SessionAuth,
        id: Path<i32>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let actor = self
            .require_permission(&auth, Permission::EditRecord)
            .await?;
        self.installments
            .hard_delete(id.0, &actor)
            .await
            .map_err(ApiError::from)?;

        tracing::info!(order_id = id.0, actor_id = actor.id, "installment order deleted");
        Ok(Json(MessageResponse::new("Order permanently deleted")))
    }

    /// Permanently delete every installment order
    #[oai(path = "/", method = "delete", tag = "InstallmentTags::Installments")]
    async fn bulk_delete(&self, auth: SessionAuth) -> Result<Json<BulkDeleteResponse>, ApiError> {
        let actor = self
            .require_permission(&auth, Permission::EditRecord)
            .await?;
        let count = self
            .installments
            .store()
            .delete_all()
            .await
            .map_err(ApiError::from)?;

        tracing::warn!(count, actor_id = actor.id, "bulk deleted installment orders");
        Ok(Json(BulkDeleteResponse {
            message: format!("Permanently deleted {} orders", count),
            count,
        }))
    }
}
