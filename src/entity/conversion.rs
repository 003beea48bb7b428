use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{commission, partner};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum ConversionStatus {
  #[sea_orm(string_value = "registered")]
  #[default]
  Registered,
  #[sea_orm(string_value = "paid")]
  Paid,
}

/// The lifetime binding between one referred tenant and one partner.
/// `tenant_id` is unique: whichever partner's code converts first wins.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "conversions")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub partner_id: i64,
  #[sea_orm(unique)]
  pub tenant_id: i64,
  pub status: ConversionStatus,
  /// Discount terms granted to the tenant, snapshotted at registration.
  pub discount_percent: i32,
  pub discount_until: DateTime,
  pub one_time_paid: bool,
  pub one_time_amount: i64,
  pub one_time_paid_at: Option<DateTime>,
  /// Billing cycles already commissioned, capped by the partner's
  /// `recurring_months_cap`.
  pub recurring_paid_months: i32,
  pub total_recurring_paid: i64,
  pub first_payment_at: Option<DateTime>,
  pub last_payment_at: Option<DateTime>,
  pub registered_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "partner::Entity",
    from = "Column::PartnerId",
    to = "partner::Column::Id"
  )]
  Partner,
  #[sea_orm(has_many = "commission::Entity")]
  Commissions,
}

impl Related<partner::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Partner.def()
  }
}

impl Related<commission::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Commissions.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
