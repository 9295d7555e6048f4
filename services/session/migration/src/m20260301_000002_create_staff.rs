use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Staff::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Staff::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Staff::Name).text().not_null())
                    .col(ColumnDef::new(Staff::Email).text().not_null())
                    .col(
                        ColumnDef::new(Staff::Status)
                            .text()
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Staff::Kind)
                            .text()
                            .not_null()
                            .default("employee"),
                    )
                    .col(ColumnDef::new(Staff::Role).text().null())
                    .col(ColumnDef::new(Staff::Department).text().null())
                    .col(
                        ColumnDef::new(Staff::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Staff sign-in looks records up by normalized email.
        manager
            .create_index(
                Index::create()
                    .table(Staff::Table)
                    .col(Staff::Email)
                    .name("idx_staff_email")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Staff::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Staff {
    Table,
    Id,
    Name,
    Email,
    Status,
    Kind,
    Role,
    Department,
    CreatedAt,
}
