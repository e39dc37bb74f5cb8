use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::FullName).string().not_null())
                    .col(ColumnDef::new(Users::Enabled).boolean().not_null().default(false))
                    .col(ColumnDef::new(Users::Locked).boolean().not_null().default(false))
                    .col(ColumnDef::new(Users::Roles).string().not_null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Create roles table (the role catalog)
        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Roles::Name).string().not_null().primary_key())
                    .col(ColumnDef::new(Roles::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Create activation_codes table. Codes accumulate per user and are
        // never deleted; expiry is computed from timestamps at lookup time.
        manager
            .create_table(
                Table::create()
                    .table(ActivationCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActivationCodes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ActivationCodes::Code).string().not_null())
                    .col(ColumnDef::new(ActivationCodes::UserId).string().not_null())
                    .col(ColumnDef::new(ActivationCodes::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(ActivationCodes::ExpiresAt).big_integer().not_null())
                    .col(ColumnDef::new(ActivationCodes::ValidatedAt).big_integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activation_codes_user_id")
                            .from(ActivationCodes::Table, ActivationCodes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_activation_codes_code")
                    .table(ActivationCodes::Table)
                    .col(ActivationCodes::Code)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_activation_codes_user_id")
                    .table(ActivationCodes::Table)
                    .col(ActivationCodes::UserId)
                    .to_owned(),
            )
            .await?;

        // Seed the default role. Registration treats a missing USER role as
        // a deployment misconfiguration, so the catalog ships with it.
        let seed_user_role = Query::insert()
            .into_table(Roles::Table)
            .columns([Roles::Name, Roles::CreatedAt])
            .values_panic(["USER".into(), chrono::Utc::now().timestamp().into()])
            .to_owned();
        manager.exec_stmt(seed_user_role).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActivationCodes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Roles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    PasswordHash,
    FullName,
    Enabled,
    Locked,
    Roles,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Roles {
    Table,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ActivationCodes {
    Table,
    Id,
    Code,
    UserId,
    CreatedAt,
    ExpiresAt,
    ValidatedAt,
}
