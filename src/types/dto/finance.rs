use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::stores::FinancePayload;
use crate::types::db::finance_transaction;

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct FinanceTransactionResponse {
    pub id: i32,
    pub phone_number: String,
    pub order_number: Option<String>,
    pub customer_name: String,
    pub payment_method: String,
    pub amount: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: i64,
    pub created_by: i32,
    pub updated_at: i64,
    pub updated_by: i32,
    pub is_archived: bool,
    pub archived_at: Option<i64>,
    pub archived_by: Option<i32>,
}

impl From<finance_transaction::Model> for FinanceTransactionResponse {
    fn from(model: finance_transaction::Model) -> Self {
        FinanceTransactionResponse {
            id: model.id,
            phone_number: model.phone_number,
            order_number: model.order_number,
            customer_name: model.customer_name,
            payment_method: model.payment_method,
            amount: model.amount,
            status: model.status,
            notes: model.notes,
            created_at: model.created_at,
            created_by: model.created_by,
            updated_at: model.updated_at,
            updated_by: model.updated_by,
            is_archived: model.is_archived,
            archived_at: model.archived_at,
            archived_by: model.archived_by,
        }
    }
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct FinanceListResponse {
    pub transactions: Vec<FinanceTransactionResponse>,
}

/// Create and update share the same payload shape
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct SaveFinanceRequest {
    pub phone_number: String,
    pub order_number: Option<String>,
    pub customer_name: String,
    pub payment_method: String,
    pub amount: String,
    pub status: String,
    pub notes: Option<String>,
}

impl SaveFinanceRequest {
    /// Required-field validation, mirroring the form contract
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.phone_number.trim().is_empty()
            || self.customer_name.trim().is_empty()
            || self.payment_method.trim().is_empty()
            || self.amount.trim().is_empty()
            || self.status.trim().is_empty()
        {
            return Err("Missing required fields");
        }
        Ok(())
    }

    pub fn into_payload(self) -> FinancePayload {
        FinancePayload {
            phone_number: self.phone_number,
            order_number: self.order_number.filter(|s| !s.is_empty()),
            customer_name: self.customer_name,
            payment_method: self.payment_method,
            amount: self.amount,
            status: self.status,
            notes: self.notes.filter(|s| !s.is_empty()),
        }
    }
}

/// Unarchive requires a justification note
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UnarchiveRequest {
    pub unarchive_note: String,
}
