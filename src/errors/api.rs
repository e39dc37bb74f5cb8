use poem_openapi::{payload::Json, ApiResponse, Object};

use crate::errors::auth::AuthError;

/// Standardized error response body for authentication endpoints
#[derive(Object, Debug)]
pub struct AuthErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// HTTP-boundary error responses for the authentication API
#[derive(ApiResponse, Debug)]
pub enum AuthApiError {
    /// Token could not be verified (tampered, malformed, or expired);
    /// the cause is intentionally not distinguished
    #[oai(status = 401)]
    Unauthenticated(Json<AuthErrorResponse>),

    /// Invalid email or password, or account not usable
    #[oai(status = 401)]
    InvalidCredentials(Json<AuthErrorResponse>),

    /// Request cannot be fulfilled as submitted
    #[oai(status = 400)]
    BadRequest(Json<AuthErrorResponse>),

    /// Referenced resource does not exist
    #[oai(status = 404)]
    NotFound(Json<AuthErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<AuthErrorResponse>),
}

impl AuthApiError {
    /// Create a uniform Unauthenticated error
    pub fn unauthenticated() -> Self {
        AuthApiError::Unauthenticated(Json(AuthErrorResponse {
            error: "unauthenticated".to_string(),
            message: "Authentication required".to_string(),
            status_code: 401,
        }))
    }

    /// Create an InvalidCredentials error
    pub fn invalid_credentials() -> Self {
        AuthApiError::InvalidCredentials(Json(AuthErrorResponse {
            error: "invalid_credentials".to_string(),
            message: "Invalid email or password".to_string(),
            status_code: 401,
        }))
    }

    /// Create a BadRequest error with the given code and message
    pub fn bad_request(error: &str, message: String) -> Self {
        AuthApiError::BadRequest(Json(AuthErrorResponse {
            error: error.to_string(),
            message,
            status_code: 400,
        }))
    }

    /// Create a NotFound error
    pub fn not_found(error: &str, message: String) -> Self {
        AuthApiError::NotFound(Json(AuthErrorResponse {
            error: error.to_string(),
            message,
            status_code: 404,
        }))
    }

    /// Create an InternalError
    pub fn internal_error() -> Self {
        AuthApiError::InternalError(Json(AuthErrorResponse {
            error: "internal_error".to_string(),
            message: "Internal server error".to_string(),
            status_code: 500,
        }))
    }
}

impl From<AuthError> for AuthApiError {
    fn from(err: AuthError) -> Self {
        match err {
            // Verification failures are recovered into one uniform response;
            // the internal detail stays in the logs only.
            AuthError::InvalidSignature | AuthError::MalformedToken | AuthError::ExpiredToken => {
                tracing::debug!("token verification failed: {}", err);
                AuthApiError::unauthenticated()
            }
            AuthError::InvalidCredentials => AuthApiError::invalid_credentials(),
            AuthError::ActivationCodeNotFound => {
                AuthApiError::not_found("activation_code_not_found", err.to_string())
            }
            AuthError::ExpiredActivationCode => {
                AuthApiError::bad_request("activation_code_expired", err.to_string())
            }
            AuthError::DuplicateEmail => {
                AuthApiError::bad_request("duplicate_email", err.to_string())
            }
            AuthError::UserNotFound => AuthApiError::not_found("user_not_found", err.to_string()),
            AuthError::RoleNotConfigured(_)
            | AuthError::NotificationDelivery(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => {
                tracing::error!("authentication workflow failed: {}", err);
                AuthApiError::internal_error()
            }
        }
    }
}
