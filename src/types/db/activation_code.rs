use sea_orm::entity::prelude::*;

/// One issuance of a single-use activation code. Rows accumulate per user
/// and are never deleted; expiry is always computed from `expires_at`,
/// never stored as a status flag.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "activation_codes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub code: String,
    pub user_id: String,
    pub created_at: i64,
    pub expires_at: i64,
    pub validated_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
