//! Create `product_code` table.
//! Holds activation codes; `code` is globally unique.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(product_code_table()).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_product_code_code_unique")
                    .table(ProductCode::Table)
                    .col(ProductCode::Code)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ProductCode::Table).to_owned()).await
    }
}

/// `product_name` is unbounded `text`; only emptiness is validated.
fn product_code_table() -> TableCreateStatement {
    Table::create()
        .table(ProductCode::Table)
        .if_not_exists()
        .col(pk_auto(ProductCode::Id))
        .col(text(ProductCode::ProductName).not_null())
        .col(string_len(ProductCode::Code, 19).not_null())
        .col(timestamp_with_time_zone(ProductCode::CreatedAt).not_null())
        .to_owned()
}

#[derive(DeriveIden)]
enum ProductCode {
    Table,
    Id,
    ProductName,
    Code,
    CreatedAt,
}
