use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Computers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Computers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Computers::Name).text().null())
                    .col(ColumnDef::new(Computers::IpAddress).text().null())
                    .col(ColumnDef::new(Computers::Cpu).text().null())
                    .col(ColumnDef::new(Computers::Ram).text().null())
                    .col(ColumnDef::new(Computers::Storage).text().null())
                    .col(ColumnDef::new(Computers::Printer).text().null())
                    .col(ColumnDef::new(Computers::Users).text().null())
                    .col(ColumnDef::new(Computers::TeamviewerId).text().null())
                    .col(ColumnDef::new(Computers::Antivirus).text().null())
                    .col(ColumnDef::new(Computers::Notes).text().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Computers::Table).to_owned())
            .await
    }
}

// Column names keep the camelCase spelling used by existing audit databases.
#[derive(DeriveIden)]
enum Computers {
    Table,
    Id,
    Name,
    #[sea_orm(iden = "ipAddress")]
    IpAddress,
    Cpu,
    Ram,
    Storage,
    Printer,
    Users,
    #[sea_orm(iden = "teamviewerId")]
    TeamviewerId,
    Antivirus,
    Notes,
}
