use sea_orm_migration::prelude::*;

const INDEXES: [(&str, ServiceListing); 4] = [
    ("idx_listing_category", ServiceListing::Category),
    ("idx_listing_created_at", ServiceListing::CreatedAt),
    ("idx_listing_price", ServiceListing::Price),
    ("idx_listing_rating", ServiceListing::Rating),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One index per filterable or sortable column
        for (name, col) in INDEXES {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(ServiceListing::Table)
                        .col(col)
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, _) in INDEXES {
            manager
                .drop_index(Index::drop().name(name).table(ServiceListing::Table).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden, Clone, Copy)]
enum ServiceListing { Table, Category, CreatedAt, Price, Rating }
