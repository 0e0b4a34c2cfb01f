use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, Set};

use crate::errors::{InternalError, LifecycleError};
use crate::services::lifecycle::{preserve_unarchive_lines, ArchivableStore, AuditStamp};
use crate::stores::user_store::is_unique_violation;
use crate::types::db::installment_order::{self, Entity as InstallmentOrder};

/// Business payload of an installment order
///
/// The cardholder fields are the admin/moderator-only half of the record;
/// the API layer enforces that split before building the payload.
#[derive(Debug, Clone)]
pub struct InstallmentPayload {
    pub order_number: String,
    pub installment_id: String,
    pub is_added_to_magento: bool,
    pub cardholder_name: Option<String>,
    pub cardholder_phone_number: Option<String>,
    pub cardholder_mother_name: Option<String>,
    pub notes: Option<String>,
}

/// Storage for the installment_orders table
pub struct InstallmentStore {
    db: DatabaseConnection,
}

impl InstallmentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<installment_order::Model>, InternalError> {
        InstallmentOrder::find()
            .order_by_desc(installment_order::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_installment_orders", e))
    }

    /// Bulk cleanup: permanently removes every installment order
    pub async fn delete_all(&self) -> Result<u64, InternalError> {
        let result = InstallmentOrder::delete_many()
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("bulk_delete_installment_orders", e))?;
        Ok(result.rows_affected)
    }
}

#[async_trait]
impl ArchivableStore for InstallmentStore {
    type Record = installment_order::Model;
    type Payload = InstallmentPayload;

    async fn fetch(&self, id: i32) -> Result<Option<Self::Record>, InternalError> {
        InstallmentOrder::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("fetch_installment_order", e))
    }

    async fn insert(
        &self,
        payload: InstallmentPayload,
        stamp: AuditStamp,
    ) -> Result<Self::Record, InternalError> {
        let model = installment_order::ActiveModel {
            order_number: Set(payload.order_number),
            installment_id: Set(payload.installment_id),
            is_added_to_magento: Set(payload.is_added_to_magento),
            cardholder_name: Set(payload.cardholder_name),
            cardholder_phone_number: Set(payload.cardholder_phone_number),
            cardholder_mother_name: Set(payload.cardholder_mother_name),
            notes: Set(payload.notes),
            created_at: Set(stamp.at),
            created_by: Set(stamp.by),
            updated_at: Set(stamp.at),
            updated_by: Set(stamp.by),
            is_archived: Set(false),
            ..Default::default()
        };
        model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                LifecycleError::DuplicateUnique {
                    field: "installment id".to_string(),
                }
                .into()
            } else {
                InternalError::database("insert_installment_order", e)
            }
        })
    }

    async fn apply_update(
        &self,
        record: Self::Record,
        payload: InstallmentPayload,
        stamp: AuditStamp,
    ) -> Result<Self::Record, InternalError> {
        let notes = preserve_unarchive_lines(record.notes.as_deref(), payload.notes);

        let mut model: installment_order::ActiveModel = record.into();
        model.order_number = Set(payload.order_number);
        model.installment_id = Set(payload.installment_id);
        model.is_added_to_magento = Set(payload.is_added_to_magento);
        model.cardholder_name = Set(payload.cardholder_name);
        model.cardholder_phone_number = Set(payload.cardholder_phone_number);
        model.cardholder_mother_name = Set(payload.cardholder_mother_name);
        model.notes = Set(notes);
        model.updated_at = Set(stamp.at);
        model.updated_by = Set(stamp.by);
        model.update(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                LifecycleError::DuplicateUnique {
                    field: "installment id".to_string(),
                }
                .into()
            } else {
                InternalError::database("update_installment_order", e)
            }
        })
    }

    async fn apply_archive(
        &self,
        record: Self::Record,
        stamp: AuditStamp,
    ) -> Result<Self::Record, InternalError> {
        let mut model: installment_order::ActiveModel = record.into();
        model.is_archived = Set(true);
        model.archived_at = Set(Some(stamp.at));
        model.archived_by = Set(Some(stamp.by));
        model
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("archive_installment_order", e))
    }

    async fn apply_unarchive(
        &self,
        record: Self::Record,
        notes: String,
        stamp: AuditStamp,
    ) -> Result<Self::Record, InternalError> {
        let mut model: installment_order::ActiveModel = record.into();
        model.is_archived = Set(false);
        model.archived_at = Set(None);
        model.archived_by = Set(None);
        model.notes = Set(Some(notes));
        model.updated_at = Set(stamp.at);
        model.updated_by = Set(stamp.by);
        model
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("unarchive_installment_order", e))
    }

    async fn remove(&self, record: Self::Record) -> Result<(), InternalError> {
        record
            .delete(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_installment_order", e))?;
        Ok(())
    }

    fn is_archived(record: &Self::Record) -> bool {
        record.is_archived
    }

    fn notes(record: &Self::Record) -> Option<&str> {
        record.notes.as_deref()
    }
}
