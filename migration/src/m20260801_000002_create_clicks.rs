use sea_orm_migration::prelude::*;

use super::m20260801_000001_create_partners::Partners;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Clicks::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Clicks::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Clicks::PartnerId).big_integer().not_null())
          .col(ColumnDef::new(Clicks::Ip).string().null())
          .col(ColumnDef::new(Clicks::UserAgent).string().null())
          .col(ColumnDef::new(Clicks::Referer).string().null())
          .col(ColumnDef::new(Clicks::LandingPage).string().null())
          .col(ColumnDef::new(Clicks::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_clicks_partner")
              .from(Clicks::Table, Clicks::PartnerId)
              .to(Partners::Table, Partners::Id),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_clicks_partner")
          .table(Clicks::Table)
          .col(Clicks::PartnerId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Clicks::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Clicks {
  Table,
  Id,
  PartnerId,
  Ip,
  UserAgent,
  Referer,
  LandingPage,
  CreatedAt,
}
