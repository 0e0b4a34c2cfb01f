use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FinanceTransactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FinanceTransactions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FinanceTransactions::PhoneNumber)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FinanceTransactions::OrderNumber)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(FinanceTransactions::CustomerName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FinanceTransactions::PaymentMethod)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FinanceTransactions::Amount)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FinanceTransactions::Status)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FinanceTransactions::Notes)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(FinanceTransactions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FinanceTransactions::CreatedBy)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FinanceTransactions::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FinanceTransactions::UpdatedBy)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FinanceTransactions::IsArchived)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(FinanceTransactions::ArchivedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(FinanceTransactions::ArchivedBy)
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
                    .name("idx_finance_transactions_is_archived")
                    .table(FinanceTransactions::Table)
                    .col(FinanceTransactions::IsArchived)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FinanceTransactions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FinanceTransactions {
    Table,
    Id,
    PhoneNumber,
    OrderNumber,
    CustomerName,
    PaymentMethod,
    Amount,
    Status,
    Notes,
    CreatedAt,
    CreatedBy,
    UpdatedAt,
    UpdatedBy,
    IsArchived,
    ArchivedAt,
    ArchivedBy,
}
