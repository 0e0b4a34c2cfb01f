use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::errors::InternalError;
use crate::services::lifecycle::{preserve_unarchive_lines, ArchivableStore, AuditStamp};
use crate::types::db::finance_transaction::{self, Entity as FinanceTransaction};

/// Business payload of a finance transaction; opaque to the lifecycle manager
#[derive(Debug, Clone)]
pub struct FinancePayload {
    pub phone_number: String,
    pub order_number: Option<String>,
    pub customer_name: String,
    pub payment_method: String,
    pub amount: String,
    pub status: String,
    pub notes: Option<String>,
}

/// Storage for the finance_transactions table
pub struct FinanceStore {
    db: DatabaseConnection,
}

impl FinanceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Listing is split by archive state; the default view never shows
    /// archived records.
    pub async fn list(
        &self,
        archived: bool,
    ) -> Result<Vec<finance_transaction::Model>, InternalError> {
        FinanceTransaction::find()
            .filter(finance_transaction::Column::IsArchived.eq(archived))
            .order_by_desc(finance_transaction::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_finance_transactions", e))
    }
}

#[async_trait]
impl ArchivableStore for FinanceStore {
    type Record = finance_transaction::Model;
    type Payload = FinancePayload;

    async fn fetch(&self, id: i32) -> Result<Option<Self::Record>, InternalError> {
        FinanceTransaction::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("fetch_finance_transaction", e))
    }

    async fn insert(
        &self,
        payload: FinancePayload,
        stamp: AuditStamp,
    ) -> Result<Self::Record, InternalError> {
        let model = finance_transaction::ActiveModel {
            phone_number: Set(payload.phone_number),
            order_number: Set(payload.order_number),
            customer_name: Set(payload.customer_name),
            payment_method: Set(payload.payment_method),
            amount: Set(payload.amount),
            status: Set(payload.status),
            notes: Set(payload.notes),
            created_at: Set(stamp.at),
            created_by: Set(stamp.by),
            updated_at: Set(stamp.at),
            updated_by: Set(stamp.by),
            is_archived: Set(false),
            ..Default::default()
        };
        model
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_finance_transaction", e))
    }

    async fn apply_update(
        &self,
        record: Self::Record,
        payload: FinancePayload,
        stamp: AuditStamp,
    ) -> Result<Self::Record, InternalError> {
        let notes = preserve_unarchive_lines(record.notes.as_deref(), payload.notes);

        let mut model: finance_transaction::ActiveModel = record.into();
        model.phone_number = Set(payload.phone_number);
        model.order_number = Set(payload.order_number);
        model.customer_name = Set(payload.customer_name);
        model.payment_method = Set(payload.payment_method);
        model.amount = Set(payload.amount);
        model.status = Set(payload.status);
        model.notes = Set(notes);
        model.updated_at = Set(stamp.at);
        model.updated_by = Set(stamp.by);
        model
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_finance_transaction", e))
    }

    async fn apply_archive(
        &self,
        record: Self::Record,
        stamp: AuditStamp,
    ) -> Result<Self::Record, InternalError> {
        let mut model: finance_transaction::ActiveModel = record.into();
        model.is_archived = Set(true);
        model.archived_at = Set(Some(stamp.at));
        model.archived_by = Set(Some(stamp.by));
        model
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("archive_finance_transaction", e))
    }

    async fn apply_unarchive(
        &self,
        record: Self::Record,
        notes: String,
        stamp: AuditStamp,
    ) -> Result<Self::Record, InternalError> {
        let mut model: finance_transaction::ActiveModel = record.into();
        model.is_archived = Set(false);
        model.archived_at = Set(None);
        model.archived_by = Set(None);
        model.notes = Set(Some(notes));
        model.updated_at = Set(stamp.at);
        model.updated_by = Set(stamp.by);
        model
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("unarchive_finance_transaction", e))
    }

    async fn remove(&self, record: Self::Record) -> Result<(), InternalError> {
        record
            .delete(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_finance_transaction", e))?;
        Ok(())
    }

    fn is_archived(record: &Self::Record) -> bool {
        record.is_archived
    }

    fn notes(record: &Self::Record) -> Option<&str> {
        record.notes.as_deref()
    }
}
