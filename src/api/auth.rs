use std::sync::Arc;
use std::time::Duration;

use poem::web::cookie::{Cookie, CookieJar, SameSite};
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::{authenticate, SessionAuth};
use crate::errors::ApiError;
use crate::services::session::SESSION_COOKIE_NAME;
use crate::services::SessionService;
use crate::stores::UserStore;
use crate::types::dto::auth::{LoginRequest, LoginResponse, MeResponse};
use crate::types::dto::common::MessageResponse;
use crate::types::internal::SessionUser;

/// Authentication endpoints: login, whoami, logout
pub struct AuthApi {
    user_store: Arc<UserStore>,
    sessions: Arc<SessionService>,
    secure_cookies: bool,
}

#[derive(Tags)]
enum AuthTags {
    /// Session authentication
    Authentication,
}

impl AuthApi {
    pub fn new(
        user_store: Arc<UserStore>,
        sessions: Arc<SessionService>,
        secure_cookies: bool,
    ) -> Self {
        Self {
            user_store,
            sessions,
            secure_cookies,
        }
    }

    fn session_cookie(&self, token: String) -> Cookie {
        let mut cookie = Cookie::new_with_str(SESSION_COOKIE_NAME, token);
        cookie.set_http_only(true);
        cookie.set_secure(self.secure_cookies);
        cookie.set_same_site(SameSite::Lax);
        cookie.set_path("/");
        cookie.set_max_age(Duration::from_secs(self.sessions.validity_secs() as u64));
        cookie
    }
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Login with email and password; sets the session cookie
    ///
    /// Unknown email, deactivated account and wrong password all produce the
    /// identical response, so the endpoint cannot be used to enumerate
    /// accounts.
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(
        &self,
        cookies: &CookieJar,
        body: Json<LoginRequest>,
    ) -> Result<Json<LoginResponse>, ApiError> {
        if body.email.is_empty() || body.password.is_empty() {
            return Err(ApiError::validation("Email and password are required"));
        }

        let user = self
            .user_store
            .verify_credentials(&body.email, &body.password)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(ApiError::invalid_credentials)?;

        let identity = SessionUser::try_from(&user).map_err(ApiError::from)?;
        let token = self.sessions.issue(identity.id);
        cookies.add(self.session_cookie(token));

        tracing::info!(user_id = identity.id, "login succeeded");
        Ok(Json(LoginResponse {
            id: identity.id,
            email: identity.email,
            full_name: identity.full_name,
            role: identity.role,
        }))
    }

    /// Return the identity behind a valid session
    #[oai(path = "/me", method = "get", tag = "AuthTags::Authentication")]
    async fn me(&self, auth: SessionAuth) -> Result<Json<MeResponse>, ApiError> {
        let user = authenticate(&self.sessions, &self.user_store, &auth.0.key).await?;
        Ok(Json(MeResponse::from(&user)))
    }

    /// Clear the session cookie
    ///
    /// Best-effort revocation: the token is not tracked server-side and
    /// stays structurally valid until its natural expiry.
    #[oai(path = "/logout", method = "post", tag = "AuthTags::Authentication")]
    async fn logout(&self, cookies: &CookieJar) -> Json<MessageResponse> {
        cookies.remove(SESSION_COOKIE_NAME);
        Json(MessageResponse::new("Logged out successfully"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    use crate::stores::NewUser;
    use crate::types::internal::Role;

    async fn setup() -> AuthApi {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let user_store = Arc::new(UserStore::new(db));
        user_store
            .create(NewUser {
                email: "agent@example.com".to_string(),
                password: "agent-password".to_string(),
                full_name: "Test Agent".to_string(),
                role: Role::User,
                has_finance_access: false,
            })
            .await
            .expect("Failed to create test user");

        let sessions = Arc::new(SessionService::new("test-secret-key-minimum-32-chars!!"));
        AuthApi::new(user_store, sessions, false)
    }

    #[tokio::test]
    async fn login_with_valid_credentials_sets_cookie() {
        let api = setup().await;
        let cookies = CookieJar::default();

        let response = api
            .login(
                &cookies,
                Json(LoginRequest {
                    email: "agent@example.com".to_string(),
                    password: "agent-password".to_string(),
                }),
            )
            .await
            .unwrap();

        assert_eq!(response.0.email, "agent@example.com");
        assert_eq!(response.0.role, Role::User);

        let cookie = cookies.get(SESSION_COOKIE_NAME).expect("cookie not set");
        assert!(!cookie.value_str().is_empty());
    }

    #[tokio::test]
    async fn login_failures_share_one_message() {
        let api = setup().await;
        let cookies = CookieJar::default();

        let wrong_password = api
            .login(
                &cookies,
                Json(LoginRequest {
                    email: "agent@example.com".to_string(),
                    password: "nope".to_string(),
                }),
            )
            .await
            .unwrap_err();

        let unknown_email = api
            .login(
                &cookies,
                Json(LoginRequest {
                    email: "ghost@example.com".to_string(),
                    password: "agent-password".to_string(),
                }),
            )
            .await
            .unwrap_err();

        assert_eq!(wrong_password.message(), "Invalid email or password");
        assert_eq!(unknown_email.message(), wrong_password.message());
        assert!(cookies.get(SESSION_COOKIE_NAME).is_none());
    }

    #[tokio::test]
    async fn me_round_trips_through_issued_token() {
        let api = setup().await;
        let cookies = CookieJar::default();
        api.login(
            &cookies,
            Json(LoginRequest {
                email: "agent@example.com".to_string(),
                password: "agent-password".to_string(),
            }),
        )
        .await
        .unwrap();

        let token = cookies
            .get(SESSION_COOKIE_NAME)
            .unwrap()
            .value_str()
            .to_string();
        let me = api
            .me(SessionAuth(poem_openapi::auth::ApiKey { key: token }))
            .await
            .unwrap();
        assert_eq!(me.0.email, "agent@example.com");
        assert!(!me.0.has_finance_access);
    }

    #[tokio::test]
    async fn me_rejects_garbage_token() {
        let api = setup().await;
        let err = api
            .me(SessionAuth(poem_openapi::auth::ApiKey {
                key: "garbage".to_string(),
            }))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Unauthorized");
    }

    #[tokio::test]
    async fn logout_clears_cookie() {
        let api = setup().await;
        let cookies = CookieJar::default();
        api.login(
            &cookies,
            Json(LoginRequest {
                email: "agent@example.com".to_string(),
                password: "agent-password".to_string(),
            }),
        )
        .await
        .unwrap();

        api.logout(&cookies).await;
        // Removal leaves a cookie marked for deletion; its value is emptied
        let gone = cookies.get(SESSION_COOKIE_NAME);
        assert!(gone.is_none() || gone.unwrap().value_str().is_empty());
    }
}
