use poem_openapi::{
    auth::Bearer, param::Query, payload::Json, ApiResponse, OpenApi, SecurityScheme, Tags,
};
use std::sync::Arc;

use crate::errors::api::AuthApiError;
use crate::services::{AuthService, TokenService};
use crate::types::dto::auth::{
    AuthenticationRequest, AuthenticationResponse, MeResponse, MessageResponse,
    RegistrationRequest,
};

/// Authentication API endpoints
pub struct AuthApi {
    auth_service: Arc<AuthService>,
    token_service: Arc<TokenService>,
}

impl AuthApi {
    /// Create a new AuthApi backed by the given services
    pub fn new(auth_service: Arc<AuthService>, token_service: Arc<TokenService>) -> Self {
        Self {
            auth_service,
            token_service,
        }
    }
}

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(Bearer);

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

/// Response for a successfully submitted registration
#[derive(ApiResponse, Debug)]
pub enum RegisterResponse {
    /// Account created; an activation code is on its way
    #[oai(status = 202)]
    Accepted(Json<MessageResponse>),
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Register a new account; the account stays disabled until activated
    #[oai(path = "/register", method = "post", tag = "AuthTags::Authentication")]
    async fn register(
        &self,
        body: Json<RegistrationRequest>,
    ) -> Result<RegisterResponse, AuthApiError> {
        self.auth_service.register(body.0).await?;

        Ok(RegisterResponse::Accepted(Json(MessageResponse {
            message: "Registration accepted. Check your email for the activation code."
                .to_string(),
        })))
    }

    /// Authenticate with email and password to receive a session token
    #[oai(
        path = "/authenticate",
        method = "post",
        tag = "AuthTags::Authentication"
    )]
    async fn authenticate(
        &self,
        body: Json<AuthenticationRequest>,
    ) -> Result<Json<AuthenticationResponse>, AuthApiError> {
        let token = self
            .auth_service
            .authenticate(&body.email, &body.password)
            .await?;

        Ok(Json(AuthenticationResponse { token }))
    }

    /// Activate an account with the emailed code
    #[oai(
        path = "/activate-account",
        method = "get",
        tag = "AuthTags::Authentication"
    )]
    async fn activate_account(
        &self,
        token: Query<String>,
    ) -> Result<Json<MessageResponse>, AuthApiError> {
        self.auth_service.activate(&token.0).await?;

        Ok(Json(MessageResponse {
            message: "Account activated".to_string(),
        }))
    }

    /// Verify the presented token and return the authenticated principal
    #[oai(path = "/me", method = "get", tag = "AuthTags::Authentication")]
    async fn me(&self, auth: BearerAuth) -> Result<Json<MeResponse>, AuthApiError> {
        let claims = self.token_service.validate_token(&auth.0.token)?;

        Ok(Json(MeResponse {
            subject: claims.sub,
            full_name: claims.full_name,
            authorities: claims.authorities,
            expires_at: claims.exp,
        }))
    }
}
