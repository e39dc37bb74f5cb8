use chrono::Utc;
use rand::Rng;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::errors::auth::AuthError;
use crate::types::db::activation_code::{self, ActiveModel, Entity as ActivationCode};

/// Length of a generated activation code, in digits
pub const ACTIVATION_CODE_LENGTH: usize = 6;

/// How long an issued code stays valid
const ACTIVATION_WINDOW_MINUTES: i64 = 15;

/// ActivationCodeStore manages issuance and consumption of the single-use
/// numeric activation codes.
///
/// Codes are not collision-checked at issuance; duplicates across users or
/// across time are accepted, and lookups resolve to the most recent row.
pub struct ActivationCodeStore {
    db: DatabaseConnection,
}

impl ActivationCodeStore {
    /// Create a new ActivationCodeStore with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Issue a fresh activation code for the given account
    ///
    /// Persists a new row with a 15 minute expiry window and returns the
    /// code string. Earlier codes for the same account are left untouched.
    pub async fn issue<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: &str,
    ) -> Result<String, AuthError> {
        let code = generate_code();
        let now = Utc::now().timestamp();

        let record = ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            code: Set(code.clone()),
            user_id: Set(user_id.to_string()),
            created_at: Set(now),
            expires_at: Set(now + ACTIVATION_WINDOW_MINUTES * 60),
            validated_at: Set(None),
        };

        record.insert(conn).await.map_err(AuthError::database)?;

        Ok(code)
    }

    /// Exact-match lookup by code value
    ///
    /// Codes can repeat over time, so this resolves to the most recently
    /// issued row bearing the value.
    pub async fn find_by_code(
        &self,
        code: &str,
    ) -> Result<Option<activation_code::Model>, AuthError> {
        ActivationCode::find()
            .filter(activation_code::Column::Code.eq(code))
            .order_by_desc(activation_code::Column::Id)
            .one(&self.db)
            .await
            .map_err(AuthError::database)
    }

    /// Mark a code consumed by setting its validation timestamp
    ///
    /// The write is conditional on the code still being live, which makes it
    /// the arbiter between concurrent activations: exactly one caller's
    /// update takes effect, the rest see `ActivationCodeNotFound`.
    pub async fn consume<C: ConnectionTrait>(&self, conn: &C, id: i32) -> Result<(), AuthError> {
        let result = ActivationCode::update_many()
            .col_expr(
                activation_code::Column::ValidatedAt,
                Expr::value(Some(Utc::now().timestamp())),
            )
            .filter(activation_code::Column::Id.eq(id))
            .filter(activation_code::Column::ValidatedAt.is_null())
            .exec(conn)
            .await
            .map_err(AuthError::database)?;

        if result.rows_affected == 0 {
            return Err(AuthError::ActivationCodeNotFound);
        }

        Ok(())
    }
}

/// Generate a fixed-length numeric code, each digit drawn uniformly from 0-9
/// using the thread-local CSPRNG.
fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..ACTIVATION_CODE_LENGTH)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}
