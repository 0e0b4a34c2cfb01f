use poem_openapi::{payload::Json, ApiResponse, Object};

use crate::errors::internal::{InternalError, LifecycleError, UserError};

/// Standardized error response body
#[derive(Object, Debug)]
pub struct ErrorBody {
    /// Human-readable error message
    pub error: String,
}

/// HTTP error taxonomy for all endpoints
///
/// Unauthenticated is always surfaced with a uniform body so callers cannot
/// distinguish a missing session from an expired one or a deactivated user.
#[derive(ApiResponse, Debug)]
pub enum ApiError {
    /// Missing required fields, state machine violation, duplicate unique field
    #[oai(status = 400)]
    Validation(Json<ErrorBody>),

    /// No session, invalid/expired token, or deactivated subject
    #[oai(status = 401)]
    Unauthenticated(Json<ErrorBody>),

    /// Authenticated but lacking the required permission or attribute
    #[oai(status = 403)]
    Forbidden(Json<ErrorBody>),

    /// Record or user does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorBody>),

    /// Internal failure, surfaced without detail
    #[oai(status = 500)]
    Internal(Json<ErrorBody>),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(Json(ErrorBody {
            error: message.into(),
        }))
    }

    pub fn unauthenticated() -> Self {
        ApiError::Unauthenticated(Json(ErrorBody {
            error: "Unauthorized".to_string(),
        }))
    }

    /// Login failures use a single message for unknown email, deactivated
    /// account, and wrong password alike (anti-enumeration).
    pub fn invalid_credentials() -> Self {
        ApiError::Unauthenticated(Json(ErrorBody {
            error: "Invalid email or password".to_string(),
        }))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(Json(ErrorBody {
            error: message.into(),
        }))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(Json(ErrorBody {
            error: message.into(),
        }))
    }

    pub fn internal() -> Self {
        ApiError::Internal(Json(ErrorBody {
            error: "Internal server error".to_string(),
        }))
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation(json)
            | ApiError::Unauthenticated(json)
            | ApiError::Forbidden(json)
            | ApiError::NotFound(json)
            | ApiError::Internal(json) => &json.0.error,
        }
    }
}

impl From<InternalError> for ApiError {
    fn from(err: InternalError) -> Self {
        match err {
            InternalError::User(e) => match e {
                UserError::NotFound(_) => ApiError::not_found("User not found"),
                UserError::DuplicateEmail(_) => ApiError::validation("Email already exists"),
                UserError::SelfDeactivation => {
                    ApiError::validation("You cannot deactivate yourself")
                }
            },
            InternalError::Lifecycle(e) => match e {
                LifecycleError::NotFound(_) => ApiError::not_found("Record not found"),
                LifecycleError::AlreadyArchived(_)
                | LifecycleError::NotArchived(_)
                | LifecycleError::ArchivedRecordImmutable(_)
                | LifecycleError::NoteTooShort { .. }
                | LifecycleError::ArchiveUnsupported
                | LifecycleError::HardDeleteUnsupported
                | LifecycleError::DuplicateUnique { .. } => ApiError::validation(e.to_string()),
            },
            // All session failures look identical to the caller
            InternalError::Session(_) => ApiError::unauthenticated(),
            InternalError::Database { .. }
            | InternalError::Parse { .. }
            | InternalError::Crypto { .. } => {
                tracing::error!(error = %err, "internal error surfaced to API");
                ApiError::internal()
            }
        }
    }
}
