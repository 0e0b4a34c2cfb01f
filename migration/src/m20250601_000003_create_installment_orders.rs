use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InstallmentOrders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InstallmentOrders::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(InstallmentOrders::OrderNumber)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InstallmentOrders::InstallmentId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(InstallmentOrders::IsAddedToMagento)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(InstallmentOrders::CardholderName)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(InstallmentOrders::CardholderPhoneNumber)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(InstallmentOrders::CardholderMotherName)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(InstallmentOrders::Notes)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(InstallmentOrders::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InstallmentOrders::CreatedBy)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InstallmentOrders::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InstallmentOrders::UpdatedBy)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InstallmentOrders::IsArchived)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(InstallmentOrders::ArchivedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(InstallmentOrders::ArchivedBy)
                            .integer()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_installment_orders_order_number")
                    .table(InstallmentOrders::Table)
                    .col(InstallmentOrders::OrderNumber)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InstallmentOrders::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum InstallmentOrders {
    Table,
    Id,
    OrderNumber,
    InstallmentId,
    IsAddedToMagento,
    CardholderName,
    CardholderPhoneNumber,
    CardholderMotherName,
    Notes,
    CreatedAt,
    CreatedBy,
    UpdatedAt,
    UpdatedBy,
    IsArchived,
    ArchivedAt,
    ArchivedBy,
}
