use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::{SecretManager, Settings};
use crate::providers::{BrevoGateway, ConsoleGateway, NotificationGateway};
use crate::services::{AuthService, TokenService};
use crate::stores::{ActivationCodeStore, UserStore};

/// Shared application state, assembled once at startup and handed to the
/// request handlers. All wiring is explicit; nothing reads ambient globals
/// after this point.
pub struct AppData {
    pub db: DatabaseConnection,
    pub user_store: Arc<UserStore>,
    pub activation_code_store: Arc<ActivationCodeStore>,
    pub token_service: Arc<TokenService>,
    pub auth_service: Arc<AuthService>,
}

impl AppData {
    /// Build the full service graph from configuration and a connected database
    pub fn build(db: DatabaseConnection, settings: &Settings, secrets: &SecretManager) -> Self {
        let user_store = Arc::new(UserStore::new(db.clone(), secrets.pepper().to_string()));
        let activation_code_store = Arc::new(ActivationCodeStore::new(db.clone()));
        let token_service = Arc::new(TokenService::new(
            secrets.jwt_signing_key().to_vec(),
            settings.jwt_expiration_minutes,
        ));

        let notification_gateway: Arc<dyn NotificationGateway> = match &settings.brevo {
            Some(brevo) => Arc::new(BrevoGateway::new(brevo.clone())),
            None => {
                tracing::warn!("Brevo is not configured; activation codes will be logged");
                Arc::new(ConsoleGateway)
            }
        };

        let auth_service = Arc::new(AuthService::new(
            db.clone(),
            user_store.clone(),
            activation_code_store.clone(),
            token_service.clone(),
            notification_gateway,
            settings.activation_url.clone(),
        ));

        Self {
            db,
            user_store,
            activation_code_store,
            token_service,
            auth_service,
        }
    }
}
