// Stores layer - database access per table
pub mod finance_store;
pub mod installment_store;
pub mod user_store;

pub use finance_store::{FinancePayload, FinanceStore};
pub use installment_store::{InstallmentPayload, InstallmentStore};
pub use user_store::{NewUser, UserChanges, UserStore};
