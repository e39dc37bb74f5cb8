mod common;

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use booknest::errors::AuthError;
use booknest::types::db::{activation_code, user};
use booknest::types::dto::auth::RegistrationRequest;

use common::setup;

fn registration(email: &str) -> RegistrationRequest {
    RegistrationRequest {
        firstname: "Ada".to_string(),
        lastname: "Lovelace".to_string(),
        email: email.to_string(),
        password: "Secret123".to_string(),
    }
}

/// Force an issued code's expiry into the past
async fn expire_code(db: &sea_orm::DatabaseConnection, code: &str) {
    activation_code::Entity::update_many()
        .col_expr(
            activation_code::Column::ExpiresAt,
            Expr::value(Utc::now().timestamp() - 60),
        )
        .filter(activation_code::Column::Code.eq(code))
        .exec(db)
        .await
        .expect("Failed to expire code");
}

#[tokio::test]
async fn activating_a_live_code_enables_the_account_once() {
    let harness = setup().await;

    harness
        .auth_service
        .register(registration("a@x.com"))
        .await
        .unwrap();
    let code = harness.gateway.last_code();

    harness.auth_service.activate(&code).await.unwrap();

    let activated = user::Entity::find().one(&harness.db).await.unwrap().unwrap();
    assert!(activated.enabled);

    let saved = activation_code::Entity::find()
        .one(&harness.db)
        .await
        .unwrap()
        .unwrap();
    assert!(saved.validated_at.is_some());

    // A second attempt with the same code must not silently re-succeed
    let result = harness.auth_service.activate(&code).await;
    assert_eq!(result.unwrap_err(), AuthError::ActivationCodeNotFound);
}

#[tokio::test]
async fn unknown_code_fails() {
    let harness = setup().await;

    let result = harness.auth_service.activate("000000").await;
    assert_eq!(result.unwrap_err(), AuthError::ActivationCodeNotFound);
}

#[tokio::test]
async fn expired_code_triggers_resend_and_fails() {
    let harness = setup().await;

    harness
        .auth_service
        .register(registration("a@x.com"))
        .await
        .unwrap();
    let stale_code = harness.gateway.last_code();
    expire_code(&harness.db, &stale_code).await;

    let result = harness.auth_service.activate(&stale_code).await;
    assert_eq!(result.unwrap_err(), AuthError::ExpiredActivationCode);

    // The account stays disabled
    let owner = user::Entity::find().one(&harness.db).await.unwrap().unwrap();
    assert!(!owner.enabled);

    // A fresh code row was issued for the same account and sent exactly once
    let codes = activation_code::Entity::find().all(&harness.db).await.unwrap();
    assert_eq!(codes.len(), 2);
    assert!(codes.iter().all(|c| c.user_id == owner.id));
    assert_eq!(harness.gateway.send_count(), 2);

    // The stale row is left as-is: still unconsumed, expiry computed from
    // timestamps rather than any stored status
    let stale = codes.iter().find(|c| c.code == stale_code).unwrap();
    assert_eq!(stale.validated_at, None);

    // The re-sent code activates the account
    let fresh_code = harness.gateway.last_code();
    harness.auth_service.activate(&fresh_code).await.unwrap();
    let owner = user::Entity::find().one(&harness.db).await.unwrap().unwrap();
    assert!(owner.enabled);
}

#[tokio::test]
async fn authenticate_is_gated_on_activation() {
    let harness = setup().await;

    harness
        .auth_service
        .register(registration("a@x.com"))
        .await
        .unwrap();

    // Correct credentials, but the account is not yet enabled
    let before = harness
        .auth_service
        .authenticate("a@x.com", "Secret123")
        .await;
    assert_eq!(before.unwrap_err(), AuthError::InvalidCredentials);

    let code = harness.gateway.last_code();
    harness.auth_service.activate(&code).await.unwrap();

    let token = harness
        .auth_service
        .authenticate("a@x.com", "Secret123")
        .await
        .unwrap();

    // The minted token verifies and is bound to the login identifier
    let claims = harness.token_service.validate_token(&token).unwrap();
    assert_eq!(claims.sub, "a@x.com");
    assert_eq!(claims.full_name, "Ada Lovelace");
    assert_eq!(claims.authorities, vec!["USER".to_string()]);

    assert!(harness.token_service.is_token_valid(&token, "a@x.com"));
    assert!(!harness.token_service.is_token_valid(&token, "b@x.com"));
    assert_eq!(
        harness.token_service.extract_subject(&token).unwrap(),
        "a@x.com"
    );
}

#[tokio::test]
async fn authenticate_rejects_wrong_password_even_after_activation() {
    let harness = setup().await;

    harness
        .auth_service
        .register(registration("a@x.com"))
        .await
        .unwrap();
    let code = harness.gateway.last_code();
    harness.auth_service.activate(&code).await.unwrap();

    let result = harness
        .auth_service
        .authenticate("a@x.com", "WrongPass")
        .await;
    assert_eq!(result.unwrap_err(), AuthError::InvalidCredentials);
}

#[tokio::test]
async fn concurrent_activation_has_exactly_one_winner() {
    let harness = setup().await;

    harness
        .auth_service
        .register(registration("a@x.com"))
        .await
        .unwrap();
    let code = harness.gateway.last_code();

    let (first, second) = tokio::join!(
        harness.auth_service.activate(&code),
        harness.auth_service.activate(&code),
    );

    // Exactly one caller wins; the loser observes the code as gone
    assert_ne!(first.is_ok(), second.is_ok(), "expected exactly one winner");
    let loser = if first.is_ok() { second } else { first };
    assert!(loser.is_err());

    // Enabled once, one validated code, no extra notification
    let users = user::Entity::find().all(&harness.db).await.unwrap();
    assert_eq!(users.len(), 1);
    assert!(users[0].enabled);

    let codes = activation_code::Entity::find().all(&harness.db).await.unwrap();
    assert_eq!(codes.len(), 1);
    assert!(codes[0].validated_at.is_some());

    assert_eq!(harness.gateway.send_count(), 1);
}
