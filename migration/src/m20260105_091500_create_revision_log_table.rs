use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RevisionLog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RevisionLog::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RevisionLog::Environment)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RevisionLog::Revision)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RevisionLog::Date)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_revision_log_environment_revision")
                    .table(RevisionLog::Table)
                    .col(RevisionLog::Environment)
                    .col(RevisionLog::Revision)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_revision_log_environment_revision")
                    .table(RevisionLog::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RevisionLog::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RevisionLog {
    Table,
    Id,
    Environment,
    Revision,
    Date,
}
