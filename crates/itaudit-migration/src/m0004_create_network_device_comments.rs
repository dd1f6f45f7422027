use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NetworkDeviceComments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NetworkDeviceComments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(NetworkDeviceComments::DeviceId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NetworkDeviceComments::Content)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NetworkDeviceComments::Timestamp)
                            .text()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_network_device_comments_device_id_timestamp")
                    .table(NetworkDeviceComments::Table)
                    .col(NetworkDeviceComments::DeviceId)
                    .col(NetworkDeviceComments::Timestamp)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NetworkDeviceComments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum NetworkDeviceComments {
    Table,
    Id,
    #[sea_orm(iden = "deviceId")]
    DeviceId,
    Content,
    Timestamp,
}
