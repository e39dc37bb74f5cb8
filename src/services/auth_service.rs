use std::sync::Arc;

use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::errors::auth::AuthError;
use crate::providers::NotificationGateway;
use crate::services::TokenService;
use crate::stores::{ActivationCodeStore, UserStore};
use crate::types::db::user;
use crate::types::dto::auth::RegistrationRequest;

const ACTIVATION_EMAIL_SUBJECT: &str = "Account activation";

/// Orchestrates the three authentication workflows: registration, login,
/// and account activation.
pub struct AuthService {
    db: DatabaseConnection,
    user_store: Arc<UserStore>,
    activation_code_store: Arc<ActivationCodeStore>,
    token_service: Arc<TokenService>,
    notification_gateway: Arc<dyn NotificationGateway>,
    activation_url: String,
}

impl AuthService {
    pub fn new(
        db: DatabaseConnection,
        user_store: Arc<UserStore>,
        activation_code_store: Arc<ActivationCodeStore>,
        token_service: Arc<TokenService>,
        notification_gateway: Arc<dyn NotificationGateway>,
        activation_url: String,
    ) -> Self {
        Self {
            db,
            user_store,
            activation_code_store,
            token_service,
            notification_gateway,
            activation_url,
        }
    }

    /// Register a new account and send its first activation code
    ///
    /// Creates a disabled account, persists an activation code, and hands
    /// the code to the notification gateway. The three steps are not
    /// coordinated transactionally: if the send fails, the account and the
    /// code stay in place and the error is surfaced to the caller.
    pub async fn register(&self, request: RegistrationRequest) -> Result<(), AuthError> {
        let user = self
            .user_store
            .create(
                &request.firstname,
                &request.lastname,
                &request.email,
                &request.password,
            )
            .await?;

        tracing::info!(user_id = %user.id, "registered new account (disabled)");

        self.send_activation_email(&user).await
    }

    /// Authenticate credentials and mint a session token
    ///
    /// Credential verification (constant-time hash compare plus
    /// enabled/locked gating) is delegated to the user store; every failure
    /// mode surfaces as the same `InvalidCredentials`.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let user = self.user_store.verify_credentials(email, password).await?;

        let token =
            self.token_service
                .generate_token(&user.email, &user.full_name, user.role_names())?;

        tracing::info!(user_id = %user.id, "session token issued");

        Ok(token)
    }

    /// Activate an account with a previously issued code
    ///
    /// State machine:
    /// - unknown or already-consumed code fails with `ActivationCodeNotFound`
    /// - expired code triggers issuance and delivery of a fresh code, then
    ///   fails with `ExpiredActivationCode` (the stale row is left as is)
    /// - a live code is consumed and its account enabled inside one
    ///   transaction, so concurrent attempts on the same code produce
    ///   exactly one winner
    pub async fn activate(&self, code: &str) -> Result<(), AuthError> {
        let saved = self
            .activation_code_store
            .find_by_code(code)
            .await?
            .ok_or(AuthError::ActivationCodeNotFound)?;

        if saved.validated_at.is_some() {
            return Err(AuthError::ActivationCodeNotFound);
        }

        if Utc::now().timestamp() > saved.expires_at {
            let user = self
                .user_store
                .find_by_id(&self.db, &saved.user_id)
                .await?
                .ok_or(AuthError::UserNotFound)?;

            self.send_activation_email(&user).await?;

            tracing::info!(user_id = %user.id, "activation code expired, fresh code sent");
            return Err(AuthError::ExpiredActivationCode);
        }

        let txn = self.db.begin().await.map_err(AuthError::database)?;

        // The conditional consume is the race arbiter; a loser rolls back
        // here without touching the account.
        self.activation_code_store.consume(&txn, saved.id).await?;

        let user = self
            .user_store
            .find_by_id(&txn, &saved.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        let user_id = user.id.clone();

        self.user_store.enable(&txn, user).await?;

        txn.commit().await.map_err(AuthError::database)?;

        tracing::info!(user_id = %user_id, "account activated");

        Ok(())
    }

    /// Issue a fresh activation code and deliver it to the account's address
    async fn send_activation_email(&self, user: &user::Model) -> Result<(), AuthError> {
        let code = self.activation_code_store.issue(&self.db, &user.id).await?;

        self.notification_gateway
            .send_activation(
                &user.email,
                &user.full_name,
                &code,
                &self.activation_url,
                ACTIVATION_EMAIL_SUBJECT,
            )
            .await
            .map_err(|e| AuthError::NotificationDelivery(e.to_string()))
    }
}
