use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NetworkDevices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NetworkDevices::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(NetworkDevices::Name).text().null())
                    .col(ColumnDef::new(NetworkDevices::IpAddress).text().null())
                    .col(ColumnDef::new(NetworkDevices::Type).text().null())
                    .col(ColumnDef::new(NetworkDevices::Model).text().null())
                    .col(ColumnDef::new(NetworkDevices::Location).text().null())
                    .col(ColumnDef::new(NetworkDevices::ManagementUrl).text().null())
                    .col(ColumnDef::new(NetworkDevices::Notes).text().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NetworkDevices::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum NetworkDevices {
    Table,
    Id,
    Name,
    #[sea_orm(iden = "ipAddress")]
    IpAddress,
    Type,
    Model,
    Location,
    #[sea_orm(iden = "managementUrl")]
    ManagementUrl,
    Notes,
}
