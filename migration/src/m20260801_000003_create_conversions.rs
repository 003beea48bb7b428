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
          .table(Conversions::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Conversions::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Conversions::PartnerId).big_integer().not_null())
          .col(
            ColumnDef::new(Conversions::TenantId)
              .big_integer()
              .not_null()
              .unique_key(),
          )
          .col(
            ColumnDef::new(Conversions::Status)
              .string()
              .not_null()
              .default("registered"),
          )
          .col(
            ColumnDef::new(Conversions::DiscountPercent)
              .integer()
              .not_null()
              .default(0),
          )
          .col(ColumnDef::new(Conversions::DiscountUntil).date_time().not_null())
          .col(
            ColumnDef::new(Conversions::OneTimePaid)
              .boolean()
              .not_null()
              .default(false),
          )
          .col(
            ColumnDef::new(Conversions::OneTimeAmount)
              .big_integer()
              .not_null()
              .default(0),
          )
          .col(ColumnDef::new(Conversions::OneTimePaidAt).date_time().null())
          .col(
            ColumnDef::new(Conversions::RecurringPaidMonths)
              .integer()
              .not_null()
              .default(0),
          )
          .col(
            ColumnDef::new(Conversions::TotalRecurringPaid)
              .big_integer()
              .not_null()
              .default(0),
          )
          .col(ColumnDef::new(Conversions::FirstPaymentAt).date_time().null())
          .col(ColumnDef::new(Conversions::LastPaymentAt).date_time().null())
          .col(ColumnDef::new(Conversions::RegisteredAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_conversions_partner")
              .from(Conversions::Table, Conversions::PartnerId)
              .to(Partners::Table, Partners::Id),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_conversions_partner")
          .table(Conversions::Table)
          .col(Conversions::PartnerId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Conversions::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Conversions {
  Table,
  Id,
  PartnerId,
  TenantId,
  Status,
  DiscountPercent,
  DiscountUntil,
  OneTimePaid,
  OneTimeAmount,
  OneTimePaidAt,
  RecurringPaidMonths,
  TotalRecurringPaid,
  FirstPaymentAt,
  LastPaymentAt,
  RegisteredAt,
}
