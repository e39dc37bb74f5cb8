use thiserror::Error;

/// Internal authentication error taxonomy.
///
/// Token-verification failures (`InvalidSignature`, `MalformedToken`,
/// `ExpiredToken`) are collapsed into a uniform unauthenticated response at
/// the API boundary so the cause never leaks to the caller. Everything else
/// maps to a distinguishable response for logging and observability.
#[derive(Error, Debug, PartialEq)]
pub enum AuthError {
    /// Signature mismatch: the token was tampered with or signed with a
    /// different key.
    #[error("Token signature is invalid")]
    InvalidSignature,

    /// The token text could not be parsed as a compact JWS.
    #[error("Token is malformed")]
    MalformedToken,

    /// The token is past its expiry instant.
    #[error("Token has expired")]
    ExpiredToken,

    /// Wrong credentials, disabled account, or locked account. Deliberately
    /// undifferentiated to avoid account enumeration.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// No live activation code matches; also returned when a code was
    /// already consumed, so a second activation never silently re-succeeds.
    #[error("Invalid activation code")]
    ActivationCodeNotFound,

    /// The presented activation code is past its expiry window. A fresh code
    /// has already been sent when this is returned.
    #[error("Activation code has expired. A new code has been sent to the same email address")]
    ExpiredActivationCode,

    /// Referential lookup miss; should not occur under referential integrity.
    #[error("User not found")]
    UserNotFound,

    /// The email is already registered.
    #[error("Email address is already registered")]
    DuplicateEmail,

    /// The role catalog is missing the default role. Deployment
    /// misconfiguration, fatal at registration time.
    #[error("Role {0} is not configured")]
    RoleNotConfigured(String),

    /// The activation message could not be delivered. The already-persisted
    /// account and code are kept.
    #[error("Failed to deliver activation notification: {0}")]
    NotificationDelivery(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn database(err: impl std::fmt::Display) -> Self {
        AuthError::Database(err.to_string())
    }
}
