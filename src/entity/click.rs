use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::partner;

/// Append-only attribution event; carries no money.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clicks")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub partner_id: i64,
  pub ip: Option<String>,
  pub user_agent: Option<String>,
  pub referer: Option<String>,
  pub landing_page: Option<String>,
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
}

impl Related<partner::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Partner.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
