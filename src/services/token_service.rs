use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;

use crate::errors::auth::AuthError;
use crate::types::internal::auth::Claims;

/// Issues and verifies the signed session tokens (HS256 compact JWS).
///
/// Verification is pure and stateless: any server instance holding the same
/// key can verify a token without a shared session store. The flip side is
/// that there is no server-side revocation; tokens simply age out.
pub struct TokenService {
    signing_key: Vec<u8>,
    expiration_minutes: i64,
}

impl TokenService {
    /// Create a new TokenService with the given signing key and session lifetime
    pub fn new(signing_key: Vec<u8>, expiration_minutes: i64) -> Self {
        Self {
            signing_key,
            expiration_minutes,
        }
    }

    /// Generate a signed session token for the given subject
    ///
    /// # Arguments
    /// * `email` - Subject of the token (login identifier)
    /// * `full_name` - Display name carried as an extra claim
    /// * `authorities` - Authority names carried under the reserved claim key
    ///
    /// # Returns
    /// * `Result<String, AuthError>` - The encoded token or an error
    pub fn generate_token(
        &self,
        email: &str,
        full_name: &str,
        authorities: Vec<String>,
    ) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let expiration = now + (self.expiration_minutes * 60);

        let claims = Claims {
            sub: email.to_string(),
            exp: expiration,
            iat: now,
            full_name: full_name.to_string(),
            authorities,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.signing_key),
        )
        .map_err(|e| AuthError::Internal(format!("Failed to generate token: {}", e)))?;

        Ok(token)
    }

    /// Verify a token's signature and expiry, returning its claims
    ///
    /// The signature check happens before any claim is deserialized; a
    /// tampered or foreign-key token never yields claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.signing_key),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            _ => AuthError::MalformedToken,
        })?;

        Ok(token_data.claims)
    }

    /// Check whether a token is valid for the expected subject
    ///
    /// True iff the token verifies, its subject equals `expected_subject`,
    /// and the current time is strictly before its expiry (a token presented
    /// exactly at its expiry instant counts as expired). Stateless; no
    /// database access.
    pub fn is_token_valid(&self, token: &str, expected_subject: &str) -> bool {
        match self.validate_token(token) {
            Ok(claims) => {
                claims.sub == expected_subject && Utc::now().timestamp() < claims.exp
            }
            Err(_) => false,
        }
    }

    /// Extract the subject from a verified token
    pub fn extract_subject(&self, token: &str) -> Result<String, AuthError> {
        Ok(self.validate_token(token)?.sub)
    }

    /// Session lifetime in seconds, as advertised to API clients
    pub fn expiration_seconds(&self) -> i64 {
        self.expiration_minutes * 60
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("signing_key", &"<redacted>")
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}
