use sea_orm_migration::prelude::*;

use super::{
  m20260801_000001_create_partners::Partners,
  m20260801_000003_create_conversions::Conversions,
  m20260801_000004_create_payouts::Payouts,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Commissions::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Commissions::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Commissions::PartnerId).big_integer().not_null())
          .col(
            ColumnDef::new(Commissions::ConversionId).big_integer().not_null(),
          )
          .col(ColumnDef::new(Commissions::CommissionType).string().not_null())
          .col(
            ColumnDef::new(Commissions::Month).integer().not_null().default(0),
          )
          .col(ColumnDef::new(Commissions::Amount).big_integer().not_null())
          .col(ColumnDef::new(Commissions::PaymentId).string().not_null())
          .col(ColumnDef::new(Commissions::InvoiceId).string().null())
          .col(
            ColumnDef::new(Commissions::Status)
              .string()
              .not_null()
              .default("pending"),
          )
          .col(ColumnDef::new(Commissions::PaidInPayoutId).big_integer().null())
          .col(ColumnDef::new(Commissions::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_commissions_partner")
              .from(Commissions::Table, Commissions::PartnerId)
              .to(Partners::Table, Partners::Id),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_commissions_conversion")
              .from(Commissions::Table, Commissions::ConversionId)
              .to(Conversions::Table, Conversions::Id),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_commissions_payout")
              .from(Commissions::Table, Commissions::PaidInPayoutId)
              .to(Payouts::Table, Payouts::Id),
          )
          .to_owned(),
      )
      .await?;

    // Webhook redelivery backstop: one commission per payment and type.
    manager
      .create_index(
        Index::create()
          .name("idx_commissions_payment_type")
          .table(Commissions::Table)
          .col(Commissions::PaymentId)
          .col(Commissions::CommissionType)
          .unique()
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_commissions_partner")
          .table(Commissions::Table)
          .col(Commissions::PartnerId)
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_commissions_conversion")
          .table(Commissions::Table)
          .col(Commissions::ConversionId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Commissions::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Commissions {
  Table,
  Id,
  PartnerId,
  ConversionId,
  CommissionType,
  Month,
  Amount,
  PaymentId,
  InvoiceId,
  Status,
  PaidInPayoutId,
  CreatedAt,
}
