pub use sea_orm_migration::prelude::*;

mod m20260801_000001_create_partners;
mod m20260801_000002_create_clicks;
mod m20260801_000003_create_conversions;
mod m20260801_000004_create_payouts;
mod m20260801_000005_create_commissions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
  fn migrations() -> Vec<Box<dyn MigrationTrait>> {
    vec![
      Box::new(m20260801_000001_create_partners::Migration),
      Box::new(m20260801_000002_create_clicks::Migration),
      Box::new(m20260801_000003_create_conversions::Migration),
      Box::new(m20260801_000004_create_payouts::Migration),
      Box::new(m20260801_000005_create_commissions::Migration),
    ]
  }
}
