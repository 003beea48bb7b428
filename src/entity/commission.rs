use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{conversion, partner, payout};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum CommissionType {
  #[sea_orm(string_value = "one_time")]
  #[default]
  OneTime,
  #[sea_orm(string_value = "recurring")]
  Recurring,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum CommissionStatus {
  #[sea_orm(string_value = "pending")]
  #[default]
  Pending,
  #[sea_orm(string_value = "approved")]
  Approved,
  #[sea_orm(string_value = "paid")]
  Paid,
  #[sea_orm(string_value = "rejected")]
  Rejected,
}

/// One accrual event. Append-only once created; only `status` and
/// `paid_in_payout_id` mutate afterwards.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "commissions")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub partner_id: i64,
  pub conversion_id: i64,
  pub commission_type: CommissionType,
  /// 1-based billing cycle for recurring commissions, 0 for one-time.
  pub month: i32,
  pub amount: i64,
  /// Originating billing payment; (payment_id, commission_type) is unique.
  pub payment_id: String,
  pub invoice_id: Option<String>,
  pub status: CommissionStatus,
  pub paid_in_payout_id: Option<i64>,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "partner::Entity",
    from = "Column::PartnerId",
    to = "partner::Column::Id"
  )]
  Partner,
  #[sea_orm(
    belongs_to = "conversion::Entity",
    from = "Column::ConversionId",
    to = "conversion::Column::Id"
  )]
  Conversion,
  #[sea_orm(
    belongs_to = "payout::Entity",
    from = "Column::PaidInPayoutId",
    to = "payout::Column::Id"
  )]
  Payout,
}

impl Related<partner::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Partner.def()
  }
}

impl Related<conversion::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Conversion.def()
  }
}

impl Related<payout::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Payout.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
