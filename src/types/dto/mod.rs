// API request/response models
pub mod auth;
pub mod common;
pub mod finance;
pub mod installment;
pub mod user;
