use argon2::{
    password_hash::SaltString, Algorithm, Argon2, Params, PasswordHash, PasswordHasher,
    PasswordVerifier, Version,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set,
};
use uuid::Uuid;

use crate::errors::auth::AuthError;
use crate::types::db::role::Entity as Role;
use crate::types::db::user::{self, ActiveModel, Entity as User};

/// The role every account receives at registration
pub const DEFAULT_ROLE: &str = "USER";

/// UserStore manages account records and credential verification
///
/// Passwords are stored as Argon2id PHC strings with the configured pepper
/// as the hash secret; the raw password never reaches the database.
pub struct UserStore {
    db: DatabaseConnection,
    pepper: String,
}

impl UserStore {
    /// Create a new UserStore with the given database connection and password pepper
    pub fn new(db: DatabaseConnection, pepper: String) -> Self {
        Self { db, pepper }
    }

    /// Create a new, disabled account
    ///
    /// # Arguments
    /// * `firstname` / `lastname` - Display name parts
    /// * `email` - Login identifier, unique across accounts
    /// * `password` - Raw password, hashed before storage
    ///
    /// # Returns
    /// * `Ok(user::Model)` - The created account, `enabled = false`
    /// * `Err(AuthError)` - `RoleNotConfigured` if the USER role is missing
    ///   from the catalog, `DuplicateEmail` if the email is taken
    pub async fn create(
        &self,
        firstname: &str,
        lastname: &str,
        email: &str,
        password: &str,
    ) -> Result<user::Model, AuthError> {
        // The default role is a deployment precondition, not a user error
        let user_role = Role::find_by_id(DEFAULT_ROLE)
            .one(&self.db)
            .await
            .map_err(AuthError::database)?;
        if user_role.is_none() {
            return Err(AuthError::RoleNotConfigured(DEFAULT_ROLE.to_string()));
        }

        let existing = User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AuthError::database)?;
        if existing.is_some() {
            return Err(AuthError::DuplicateEmail);
        }

        let password_hash = self.hash_password(password)?;
        let now = Utc::now().timestamp();
        let roles = serde_json::to_string(&[DEFAULT_ROLE])
            .map_err(|e| AuthError::Internal(format!("Failed to serialize roles: {}", e)))?;

        let new_user = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash),
            full_name: Set(format!("{} {}", firstname, lastname)),
            enabled: Set(false),
            locked: Set(false),
            roles: Set(roles),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = new_user.insert(&self.db).await.map_err(|e| {
            // Concurrent registrations race past the pre-check; the unique
            // index on email is the authority
            if e.to_string().contains("UNIQUE") {
                AuthError::DuplicateEmail
            } else {
                AuthError::database(e)
            }
        })?;

        Ok(created)
    }

    /// Look up an account by its login identifier
    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, AuthError> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AuthError::database)
    }

    /// Look up an account by id, on any connection (pool or transaction)
    pub async fn find_by_id<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: &str,
    ) -> Result<Option<user::Model>, AuthError> {
        User::find_by_id(id)
            .one(conn)
            .await
            .map_err(AuthError::database)
    }

    /// Mark an account enabled, on any connection (pool or transaction)
    pub async fn enable<C: ConnectionTrait>(
        &self,
        conn: &C,
        user: user::Model,
    ) -> Result<(), AuthError> {
        let mut active: ActiveModel = user.into();
        active.enabled = Set(true);
        active.updated_at = Set(Utc::now().timestamp());
        active.update(conn).await.map_err(AuthError::database)?;
        Ok(())
    }

    /// Verify credentials and account state, returning the account on success
    ///
    /// Wrong password, unknown email, disabled account, and locked account
    /// all collapse to `InvalidCredentials`; callers cannot distinguish them.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<user::Model, AuthError> {
        let user = self
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let parsed_hash =
            PasswordHash::new(&user.password_hash).map_err(|_| AuthError::InvalidCredentials)?;

        self.argon2()?
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AuthError::InvalidCredentials)?;

        if !user.enabled || user.locked {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }

    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut rand_core::OsRng);
        let hash = self
            .argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::Internal(format!("Password hashing error: {}", e)))?
            .to_string();
        Ok(hash)
    }

    fn argon2(&self) -> Result<Argon2<'_>, AuthError> {
        Argon2::new_with_secret(
            self.pepper.as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| AuthError::Internal(format!("Failed to initialize Argon2: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_db;

    async fn test_store() -> UserStore {
        let db = setup_test_db().await;
        UserStore::new(db, "test-pepper-for-unit-tests".to_string())
    }

    #[tokio::test]
    async fn test_create_user_is_disabled_with_default_role() {
        let store = test_store().await;

        let user = store
            .create("Ada", "Lovelace", "a@x.com", "Secret123")
            .await
            .unwrap();

        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.full_name, "Ada Lovelace");
        assert!(!user.enabled);
        assert!(!user.locked);
        assert_eq!(user.role_names(), vec!["USER".to_string()]);
    }

    #[tokio::test]
    async fn test_create_user_never_stores_raw_password() {
        let store = test_store().await;

        let user = store
            .create("Ada", "Lovelace", "a@x.com", "Secret123")
            .await
            .unwrap();

        assert!(!user.password_hash.contains("Secret123"));
        assert!(user.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let store = test_store().await;

        store
            .create("Ada", "Lovelace", "a@x.com", "Secret123")
            .await
            .unwrap();
        let result = store.create("Bob", "Smith", "a@x.com", "Other456").await;

        assert_eq!(result.unwrap_err(), AuthError::DuplicateEmail);
    }

    #[tokio::test]
    async fn test_create_fails_when_role_catalog_is_empty() {
        let store = test_store().await;

        Role::delete_many()
            .exec(&store.db)
            .await
            .expect("Failed to clear role catalog");

        let result = store.create("Ada", "Lovelace", "a@x.com", "Secret123").await;

        assert_eq!(
            result.unwrap_err(),
            AuthError::RoleNotConfigured("USER".to_string())
        );
    }

    #[tokio::test]
    async fn test_verify_credentials_rejects_disabled_account() {
        let store = test_store().await;

        store
            .create("Ada", "Lovelace", "a@x.com", "Secret123")
            .await
            .unwrap();

        // Correct password, but the account was never activated
        let result = store.verify_credentials("a@x.com", "Secret123").await;
        assert_eq!(result.unwrap_err(), AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_verify_credentials_accepts_enabled_account() {
        let store = test_store().await;

        let user = store
            .create("Ada", "Lovelace", "a@x.com", "Secret123")
            .await
            .unwrap();
        store.enable(&store.db, user).await.unwrap();

        let verified = store.verify_credentials("a@x.com", "Secret123").await.unwrap();
        assert_eq!(verified.email, "a@x.com");
        assert!(verified.enabled);
    }

    #[tokio::test]
    async fn test_verify_credentials_rejects_wrong_password() {
        let store = test_store().await;

        let user = store
            .create("Ada", "Lovelace", "a@x.com", "Secret123")
            .await
            .unwrap();
        store.enable(&store.db, user).await.unwrap();

        let result = store.verify_credentials("a@x.com", "WrongPass").await;
        assert_eq!(result.unwrap_err(), AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_verify_credentials_rejects_unknown_email() {
        let store = test_store().await;

        let result = store.verify_credentials("nobody@x.com", "Secret123").await;
        assert_eq!(result.unwrap_err(), AuthError::InvalidCredentials);
    }
}
