//! Create `service_listing` table.
//! `category` holds the variant name of the catalog category enum.
//! `name_search` and `description_search` hold the Unicode-lowercased text
//! matched by catalog search; SQL `LOWER()` folds ASCII only on SQLite.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(table()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ServiceListing::Table).to_owned()).await
    }
}

pub(crate) fn table() -> TableCreateStatement {
    Table::create()
        .table(ServiceListing::Table)
        .if_not_exists()
        .col(uuid(ServiceListing::Id).primary_key())
        .col(text(ServiceListing::Name).not_null())
        .col(text(ServiceListing::NameSearch).not_null())
        .col(text(ServiceListing::Description).not_null())
        .col(text(ServiceListing::DescriptionSearch).not_null())
        .col(string_len(ServiceListing::Category, 32).not_null())
        .col(double(ServiceListing::Price).not_null())
        .col(integer(ServiceListing::DurationMinutes).not_null())
        .col(text(ServiceListing::ImageUrl).not_null())
        .col(boolean(ServiceListing::IsAvailable).not_null().default(true))
        .col(double(ServiceListing::Rating).not_null().default(0.0))
        .col(integer(ServiceListing::ReviewCount).not_null().default(0))
        .col(timestamp_with_time_zone(ServiceListing::CreatedAt).not_null())
        .col(timestamp_with_time_zone(ServiceListing::UpdatedAt).not_null())
        .to_owned()
}

#[derive(DeriveIden)]
enum ServiceListing {
    Table,
    Id,
    Name,
    NameSearch,
    Description,
    DescriptionSearch,
    Category,
    Price,
    DurationMinutes,
    ImageUrl,
    IsAvailable,
    Rating,
    ReviewCount,
    CreatedAt,
    UpdatedAt,
}
