// API layer - HTTP endpoints
pub mod auth;
pub mod finance;
pub mod health;
pub mod installments;
pub mod users;

pub use auth::AuthApi;
pub use finance::FinanceApi;
pub use health::HealthApi;
pub use installments::InstallmentApi;
pub use users::UserApi;

use poem_openapi::{auth::ApiKey, SecurityScheme};

use crate::errors::ApiError;
use crate::services::SessionService;
use crate::stores::UserStore;
use crate::types::internal::SessionUser;

/// Session cookie authentication
///
/// The session carrier is a single opaque cookie; see
/// `services::session::SESSION_COOKIE_NAME`.
#[derive(SecurityScheme)]
#[oai(ty = "api_key", key_name = "session", key_in = "cookie")]
pub struct SessionAuth(pub ApiKey);

/// Resolve a session token into a live identity
///
/// Token verification alone is not enough: the user is re-fetched and
/// re-confirmed active on every request, so deactivation cuts off
/// outstanding tokens immediately. Every failure mode collapses into the
/// same uniform unauthenticated response.
pub(crate) async fn authenticate(
    sessions: &SessionService,
    users: &UserStore,
    token: &str,
) -> Result<SessionUser, ApiError> {
    let resolved = sessions
        .resolve(token)
        .map_err(|_| ApiError::unauthenticated())?;
    let subject = users
        .find_session_subject(resolved.user_id)
        .await
        .map_err(ApiError::from)?;
    subject.ok_or_else(ApiError::unauthenticated)
}
