use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::installment_order;

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct InstallmentOrderResponse {
    pub id: i32,
    pub order_number: String,
    pub installment_id: String,
    pub is_added_to_magento: bool,
    pub cardholder_name: Option<String>,
    pub cardholder_phone_number: Option<String>,
    pub cardholder_mother_name: Option<String>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub created_by: i32,
    pub updated_at: i64,
    pub updated_by: i32,
}

impl From<installment_order::Model> for InstallmentOrderResponse {
    fn from(model: installment_order::Model) -> Self {
        InstallmentOrderResponse {
            id: model.id,
            order_number: model.order_number,
            installment_id: model.installment_id,
            is_added_to_magento: model.is_added_to_magento,
            cardholder_name: model.cardholder_name,
            cardholder_phone_number: model.cardholder_phone_number,
            cardholder_mother_name: model.cardholder_mother_name,
            notes: model.notes,
            created_at: model.created_at,
            created_by: model.created_by,
            updated_at: model.updated_at,
            updated_by: model.updated_by,
        }
    }
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct InstallmentListResponse {
    pub orders: Vec<InstallmentOrderResponse>,
}

/// Create and update share the same payload shape
///
/// The cardholder fields may only be set by roles holding the admin-level
/// installment edit permission; the API layer rejects them otherwise.
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct SaveInstallmentRequest {
    pub order_number: String,
    pub installment_id: String,
    #[oai(default)]
    pub is_added_to_magento: bool,
    pub cardholder_name: Option<String>,
    pub cardholder_phone_number: Option<String>,
    pub cardholder_mother_name: Option<String>,
    pub notes: Option<String>,
}

impl SaveInstallmentRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.order_number.trim().is_empty() || self.installment_id.trim().is_empty() {
            return Err("Missing required fields");
        }
        Ok(())
    }

    pub fn touches_cardholder_fields(&self) -> bool {
        self.cardholder_name.is_some()
            || self.cardholder_phone_number.is_some()
            || self.cardholder_mother_name.is_some()
    }
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct BulkDeleteResponse {
    pub message: String,
    pub count: u64,
}
