// Database entities - SeaORM models
pub mod finance_transaction;
pub mod installment_order;
pub mod user;
