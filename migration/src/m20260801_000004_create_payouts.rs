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
          .table(Payouts::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Payouts::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Payouts::PartnerId).big_integer().not_null())
          .col(ColumnDef::new(Payouts::Amount).big_integer().not_null())
          .col(ColumnDef::new(Payouts::BankAccount).string().not_null())
          .col(ColumnDef::new(Payouts::BankName).string().null())
          .col(
            ColumnDef::new(Payouts::Status)
              .string()
              .not_null()
              .default("pending"),
          )
          .col(ColumnDef::new(Payouts::RequestedAt).date_time().not_null())
          .col(ColumnDef::new(Payouts::ProcessedAt).date_time().null())
          .col(ColumnDef::new(Payouts::ProcessedBy).string().null())
          .col(ColumnDef::new(Payouts::TransferId).string().null())
          .col(ColumnDef::new(Payouts::Notes).string().null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_payouts_partner")
              .from(Payouts::Table, Payouts::PartnerId)
              .to(Partners::Table, Partners::Id),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_payouts_partner")
          .table(Payouts::Table)
          .col(Payouts::PartnerId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Payouts::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Payouts {
  Table,
  Id,
  PartnerId,
  Amount,
  BankAccount,
  BankName,
  Status,
  RequestedAt,
  ProcessedAt,
  ProcessedBy,
  TransferId,
  Notes,
}
