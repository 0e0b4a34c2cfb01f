// Services layer - authentication, authorization and lifecycle logic
pub mod crypto;
pub mod lifecycle;
pub mod permissions;
pub mod session;

pub use lifecycle::{ArchivableStore, AuditStamp, LifecycleManager, LifecyclePolicy};
pub use permissions::{FinanceOperation, Permission, PermissionMatrix};
pub use session::{ResolvedSession, SessionService};
