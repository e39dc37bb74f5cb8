#![allow(dead_code)]

// Shared harness for integration tests: in-memory database, assembled
// services, and a recording notification gateway.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use booknest::providers::{NotificationError, NotificationGateway};
use booknest::services::{AuthService, TokenService};
use booknest::stores::{ActivationCodeStore, UserStore};

pub const TEST_SIGNING_KEY: &[u8] = b"integration-test-signing-key-32-bytes!!!";
pub const TEST_PEPPER: &str = "test-pepper-for-integration";
pub const TEST_ACTIVATION_URL: &str = "http://localhost:4200/activate-account";

/// One captured activation send
#[derive(Debug, Clone)]
pub struct SentActivation {
    pub to: String,
    pub display_name: String,
    pub code: String,
}

/// Notification gateway that records every send instead of delivering it
#[derive(Default)]
pub struct RecordingGateway {
    sent: Mutex<Vec<SentActivation>>,
}

impl RecordingGateway {
    pub fn sent(&self) -> Vec<SentActivation> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_code(&self) -> String {
        self.sent
            .lock()
            .unwrap()
            .last()
            .expect("no activation was sent")
            .code
            .clone()
    }

    pub fn send_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl NotificationGateway for RecordingGateway {
    async fn send_activation(
        &self,
        to: &str,
        display_name: &str,
        code: &str,
        _activation_url: &str,
        _subject: &str,
    ) -> Result<(), NotificationError> {
        self.sent.lock().unwrap().push(SentActivation {
            to: to.to_string(),
            display_name: display_name.to_string(),
            code: code.to_string(),
        });
        Ok(())
    }
}

/// Notification gateway that always fails, for delivery-failure tests
pub struct FailingGateway;

#[async_trait]
impl NotificationGateway for FailingGateway {
    async fn send_activation(
        &self,
        _to: &str,
        _display_name: &str,
        _code: &str,
        _activation_url: &str,
        _subject: &str,
    ) -> Result<(), NotificationError> {
        Err(NotificationError::Send("smtp relay unreachable".to_string()))
    }
}

/// Fully wired test application over an in-memory database
pub struct TestHarness {
    pub db: DatabaseConnection,
    pub user_store: Arc<UserStore>,
    pub activation_code_store: Arc<ActivationCodeStore>,
    pub token_service: Arc<TokenService>,
    pub auth_service: Arc<AuthService>,
    pub gateway: Arc<RecordingGateway>,
}

/// Build a harness with a recording gateway
pub async fn setup() -> TestHarness {
    let gateway = Arc::new(RecordingGateway::default());
    let (db, user_store, activation_code_store, token_service, auth_service) =
        build_services(gateway.clone()).await;

    TestHarness {
        db,
        user_store,
        activation_code_store,
        token_service,
        auth_service,
        gateway,
    }
}

/// Build the service graph around an arbitrary gateway implementation
pub async fn build_services(
    gateway: Arc<dyn NotificationGateway>,
) -> (
    DatabaseConnection,
    Arc<UserStore>,
    Arc<ActivationCodeStore>,
    Arc<TokenService>,
    Arc<AuthService>,
) {
    // A single pooled connection keeps every query on the same in-memory
    // database and serializes transactions
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1);

    let db = Database::connect(options)
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let user_store = Arc::new(UserStore::new(db.clone(), TEST_PEPPER.to_string()));
    let activation_code_store = Arc::new(ActivationCodeStore::new(db.clone()));
    let token_service = Arc::new(TokenService::new(TEST_SIGNING_KEY.to_vec(), 60));

    let auth_service = Arc::new(AuthService::new(
        db.clone(),
        user_store.clone(),
        activation_code_store.clone(),
        token_service.clone(),
        gateway,
        TEST_ACTIVATION_URL.to_string(),
    ));

    (
        db,
        user_store,
        activation_code_store,
        token_service,
        auth_service,
    )
}
