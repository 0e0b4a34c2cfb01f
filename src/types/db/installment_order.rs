use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "installment_orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    // Editable by every role
    pub order_number: String,
    #[sea_orm(unique)]
    pub installment_id: String,
    pub is_added_to_magento: bool,

    // Editable by admin/moderator only
    pub cardholder_name: Option<String>,
    pub cardholder_phone_number: Option<String>,
    pub cardholder_mother_name: Option<String>,

    pub notes: Option<String>,

    // Audit stamps
    pub created_at: i64,
    pub created_by: i32,
    pub updated_at: i64,
    pub updated_by: i32,

    // Present for schema uniformity; the installment lifecycle policy does not
    // allow archiving, so these stay at their defaults.
    pub is_archived: bool,
    pub archived_at: Option<i64>,
    pub archived_by: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
