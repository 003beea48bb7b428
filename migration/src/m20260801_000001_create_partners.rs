use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Partners::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Partners::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Partners::CompanyName).string().not_null())
          .col(ColumnDef::new(Partners::ContactName).string().not_null())
          .col(
            ColumnDef::new(Partners::Email).string().not_null().unique_key(),
          )
          .col(ColumnDef::new(Partners::PasswordHash).string().not_null())
          .col(
            ColumnDef::new(Partners::ReferralCode)
              .string()
              .not_null()
              .unique_key(),
          )
          .col(
            ColumnDef::new(Partners::OneTimeCommission)
              .big_integer()
              .not_null()
              .default(0),
          )
          .col(
            ColumnDef::new(Partners::RecurringCommissionPercent)
              .integer()
              .not_null()
              .default(0),
          )
          .col(
            ColumnDef::new(Partners::RecurringMonthsCap)
              .integer()
              .not_null()
              .default(0),
          )
          .col(
            ColumnDef::new(Partners::ReferralDiscountPercent)
              .integer()
              .not_null()
              .default(0),
          )
          .col(
            ColumnDef::new(Partners::DiscountMonths)
              .integer()
              .not_null()
              .default(0),
          )
          .col(
            ColumnDef::new(Partners::TotalClicks)
              .big_integer()
              .not_null()
              .default(0),
          )
          .col(
            ColumnDef::new(Partners::TotalRegistrations)
              .big_integer()
              .not_null()
              .default(0),
          )
          .col(
            ColumnDef::new(Partners::TotalPaidCustomers)
              .big_integer()
              .not_null()
              .default(0),
          )
          .col(
            ColumnDef::new(Partners::TotalEarnings)
              .big_integer()
              .not_null()
              .default(0),
          )
          .col(
            ColumnDef::new(Partners::PendingPayout)
              .big_integer()
              .not_null()
              .default(0),
          )
          .col(
            ColumnDef::new(Partners::Status)
              .string()
              .not_null()
              .default("pending"),
          )
          .col(ColumnDef::new(Partners::CreatedAt).date_time().not_null())
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_partners_status")
          .table(Partners::Table)
          .col(Partners::Status)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Partners::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Partners {
  Table,
  Id,
  CompanyName,
  ContactName,
  Email,
  PasswordHash,
  ReferralCode,
  OneTimeCommission,
  RecurringCommissionPercent,
  RecurringMonthsCap,
  ReferralDiscountPercent,
  DiscountMonths,
  TotalClicks,
  TotalRegistrations,
  TotalPaidCustomers,
  TotalEarnings,
  PendingPayout,
  Status,
  CreatedAt,
}
