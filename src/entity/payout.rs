use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{commission, partner};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum PayoutStatus {
  #[sea_orm(string_value = "pending")]
  #[default]
  Pending,
  #[sea_orm(string_value = "completed")]
  Completed,
}

/// A withdrawal request. Bank details are snapshotted at request time.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payouts")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub partner_id: i64,
  pub amount: i64,
  pub bank_account: String,
  pub bank_name: Option<String>,
  pub status: PayoutStatus,
  pub requested_at: DateTime,
  pub processed_at: Option<DateTime>,
  /// Identity of the admin who completed the payout.
  pub processed_by: Option<String>,
  pub transfer_id: Option<String>,
  pub notes: Option<String>,
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
