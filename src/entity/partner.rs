use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{click, commission, conversion, payout};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum PartnerStatus {
  #[sea_orm(string_value = "pending")]
  #[default]
  Pending,
  #[sea_orm(string_value = "active")]
  Active,
  #[sea_orm(string_value = "rejected")]
  Rejected,
  #[sea_orm(string_value = "suspended")]
  Suspended,
}

/// A referring entity. Never deleted; the rows hang the financial audit
/// trail together.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "partners")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub company_name: String,
  pub contact_name: String,
  #[sea_orm(unique)]
  pub email: String,
  /// Opaque credential digest; hashing happens outside this crate.
  pub password_hash: String,
  /// Immutable after creation.
  #[sea_orm(unique)]
  pub referral_code: String,
  /// Flat commission on a conversion's first payment, in cents.
  pub one_time_commission: i64,
  pub recurring_commission_percent: i32,
  pub recurring_months_cap: i32,
  pub referral_discount_percent: i32,
  pub discount_months: i32,
  pub total_clicks: i64,
  pub total_registrations: i64,
  pub total_paid_customers: i64,
  pub total_earnings: i64,
  pub pending_payout: i64,
  pub status: PartnerStatus,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(has_many = "click::Entity")]
  Clicks,
  #[sea_orm(has_many = "conversion::Entity")]
  Conversions,
  #[sea_orm(has_many = "commission::Entity")]
  Commissions,
  #[sea_orm(has_many = "payout::Entity")]
  Payouts,
}

impl Related<click::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Clicks.def()
  }
}

impl Related<conversion::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Conversions.def()
  }
}

impl Related<commission::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Commissions.def()
  }
}

impl Related<payout::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Payouts.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
