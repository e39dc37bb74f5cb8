use std::fmt;

use base64::{engine::general_purpose, Engine as _};
use thiserror::Error;

const MIN_SIGNING_KEY_BYTES: usize = 32;
const MIN_PEPPER_CHARS: usize = 16;

#[derive(Error, Debug)]
pub enum SecretError {
    #[error("Required secret '{0}' is missing")]
    Missing(String),

    #[error("Secret '{0}' is not valid base64")]
    InvalidEncoding(String),

    #[error("Secret '{secret_name}' must be at least {expected} bytes, got {actual}")]
    TooShort {
        secret_name: String,
        expected: usize,
        actual: usize,
    },
}

/// Centralized manager for application secrets, loaded once at startup.
///
/// The JWT signing key is configured as base64 (`JWT_SECRET`) and held
/// decoded; the password pepper (`PEPPER`) feeds Argon2id as its secret
/// parameter. Neither value appears in Debug output.
pub struct SecretManager {
    jwt_signing_key: Vec<u8>,
    pepper: String,
}

impl SecretManager {
    /// Initialize the SecretManager by loading and validating all secrets
    ///
    /// # Errors
    /// Returns `SecretError` if any required secret is missing or fails validation
    pub fn init() -> Result<Self, SecretError> {
        let encoded = require_env("JWT_SECRET")?;
        let jwt_signing_key = general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|_| SecretError::InvalidEncoding("JWT_SECRET".to_string()))?;
        if jwt_signing_key.len() < MIN_SIGNING_KEY_BYTES {
            return Err(SecretError::TooShort {
                secret_name: "JWT_SECRET".to_string(),
                expected: MIN_SIGNING_KEY_BYTES,
                actual: jwt_signing_key.len(),
            });
        }

        let pepper = require_env("PEPPER")?;
        if pepper.len() < MIN_PEPPER_CHARS {
            return Err(SecretError::TooShort {
                secret_name: "PEPPER".to_string(),
                expected: MIN_PEPPER_CHARS,
                actual: pepper.len(),
            });
        }

        Ok(Self {
            jwt_signing_key,
            pepper,
        })
    }

    /// Get the decoded JWT signing key
    pub fn jwt_signing_key(&self) -> &[u8] {
        &self.jwt_signing_key
    }

    /// Get the pepper for password hashing
    pub fn pepper(&self) -> &str {
        &self.pepper
    }
}

fn require_env(name: &str) -> Result<String, SecretError> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(SecretError::Missing(name.to_string())),
    }
}

impl fmt::Debug for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretManager")
            .field("jwt_signing_key", &"<redacted>")
            .field("pepper", &"<redacted>")
            .finish()
    }
}
