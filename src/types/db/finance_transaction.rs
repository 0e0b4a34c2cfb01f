use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "finance_transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub phone_number: String,
    pub order_number: Option<String>,
    pub customer_name: String,
    pub payment_method: String,
    pub amount: String,
    pub status: String,
    pub notes: Option<String>,

    // Audit stamps
    pub created_at: i64,
    pub created_by: i32,
    pub updated_at: i64,
    pub updated_by: i32,

    // Archive triple: is_archived=false implies archived_at/archived_by are null
    pub is_archived: bool,
    pub archived_at: Option<i64>,
    pub archived_by: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
