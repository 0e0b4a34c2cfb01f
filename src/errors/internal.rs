use thiserror::Error;

/// Internal error type for store and service operations
///
/// Separates infrastructure errors (Database, Parse, Crypto) shared by all
/// stores from domain errors (User, Lifecycle, Session) specific to each
/// subsystem.
///
/// This error type is NOT exposed via API. Endpoints convert these to
/// `ApiError` at the boundary.
#[derive(Error, Debug)]
pub enum InternalError {
    /// Database query or operation failed
    #[error("Database error: {operation} failed: {source}")]
    Database {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    /// Failed to parse a value (role, timestamp, etc.)
    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse {
        value_type: String,
        message: String,
    },

    /// Cryptographic operation failed (hashing, MAC computation)
    #[error("Crypto error: {operation} failed: {message}")]
    Crypto {
        operation: String,
        message: String,
    },

    /// Identity directory errors (lookup, uniqueness, deactivation)
    #[error(transparent)]
    User(#[from] UserError),

    /// Record lifecycle errors (archive state machine violations)
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// Session token errors (structure, signature, expiry)
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl InternalError {
    /// Create a database error with context
    pub fn database(operation: impl Into<String>, source: sea_orm::DbErr) -> Self {
        Self::Database {
            operation: operation.into(),
            source,
        }
    }

    /// Create a parse error with context
    pub fn parse(value_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            value_type: value_type.into(),
            message: message.into(),
        }
    }

    /// Create a crypto error with context
    pub fn crypto(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Crypto {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

/// Identity directory errors
#[derive(Error, Debug)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(i32),

    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    /// A user may never deactivate their own account
    #[error("Users cannot deactivate themselves")]
    SelfDeactivation,
}

/// Record lifecycle state machine errors
#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("Record not found: {0}")]
    NotFound(i32),

    #[error("Record {0} is already archived")]
    AlreadyArchived(i32),

    #[error("Record {0} is not archived")]
    NotArchived(i32),

    #[error("Record {0} is archived and cannot be edited")]
    ArchivedRecordImmutable(i32),

    #[error("Unarchive note must be at least {minimum} characters")]
    NoteTooShort { minimum: usize },

    #[error("This record type does not support archiving")]
    ArchiveUnsupported,

    #[error("This record type does not support permanent deletion")]
    HardDeleteUnsupported,

    /// Unique constraint violation surfacing from the storage layer
    #[error("A record with this {field} already exists")]
    DuplicateUnique { field: String },
}

/// Session token errors
///
/// Deliberately coarse: callers surface all of these as the same
/// unauthenticated response so a token holder learns nothing about why a
/// token was rejected.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session token is malformed")]
    Malformed,

    #[error("Session token signature mismatch")]
    BadSignature,

    #[error("Session token has expired")]
    Expired,
}
