use serde::{Deserialize, Serialize};

/// JWT Claims structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (the user's email)
    pub sub: String,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,

    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,

    /// Display name of the user
    #[serde(rename = "fullName")]
    pub full_name: String,

    /// Granted authority names (one per role)
    #[serde(default)]
    pub authorities: Vec<String>,
}
