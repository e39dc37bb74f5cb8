use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Request model for account registration
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationRequest {
    /// First name of the new user
    pub firstname: String,

    /// Last name of the new user
    pub lastname: String,

    /// Email address, used as the login identifier
    pub email: String,

    /// Raw password (hashed before storage, never persisted as-is)
    pub password: String,
}

/// Request model for authentication
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AuthenticationRequest {
    /// Email address of the account
    pub email: String,

    /// Password for authentication
    pub password: String,
}

/// Response model containing the session token
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AuthenticationResponse {
    /// Signed JWT bearer token
    pub token: String,
}

/// Generic message response
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome message
    pub message: String,
}

/// Response model for the authenticated-principal endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct MeResponse {
    /// Subject of the presented token (email)
    pub subject: String,

    /// Display name carried in the token
    pub full_name: String,

    /// Authority names carried in the token
    pub authorities: Vec<String>,

    /// Token expiry (Unix timestamp, seconds)
    pub expires_at: i64,
}
