use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    #[allow(clippy::match_wildcard_for_single_variants)] // Wildcard matches for unsupported databases are semantically correct
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // SIM ids are assigned by the caller, never generated
        manager
            .create_table(
                Table::create()
                    .table(Sims::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sims::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sims::OperatorCode).integer().not_null())
                    .col(ColumnDef::new(Sims::Country).string().not_null())
                    .col(ColumnDef::new(Sims::Status).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sims_status")
                    .table(Sims::Table)
                    .col(Sims::Status)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        let mut devices_table = Table::create()
            .table(Devices::Table)
            .if_not_exists()
            .col(ColumnDef::new(Devices::Status).string())
            .col(ColumnDef::new(Devices::Temperature).float())
            .col(ColumnDef::new(Devices::SimId).big_integer().unique_key())
            .foreign_key(
                ForeignKey::create()
                    .name("fk_devices_sim_id")
                    .from(Devices::Table, Devices::SimId)
                    .to(Sims::Table, Sims::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .on_update(ForeignKeyAction::NoAction),
            )
            .to_owned();

        // SQLite only allows AUTOINCREMENT on an INTEGER PRIMARY KEY
        match manager.get_database_backend() {
            sea_orm::DatabaseBackend::Postgres => {
                devices_table.col(
                    ColumnDef::new(Devices::Id)
                        .big_integer()
                        .not_null()
                        .auto_increment()
                        .primary_key(),
                );
            }
            sea_orm::DatabaseBackend::Sqlite => {
                devices_table.col(
                    ColumnDef::new(Devices::Id)
                        .integer()
                        .not_null()
                        .auto_increment()
                        .primary_key(),
                );
            }
            _ => {
                return Err(DbErr::Custom("Unsupported database backend".to_string()));
            }
        }

        manager.create_table(devices_table).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Devices::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sims::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Sims {
    Table,
    Id,
    OperatorCode,
    Country,
    Status,
}

#[derive(DeriveIden)]
enum Devices {
    Table,
    Id,
    Status,
    Temperature,
    SimId,
}
