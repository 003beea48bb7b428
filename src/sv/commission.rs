use sea_orm::sea_query::Expr;

use crate::{
  entity::{CommissionStatus, commission},
  prelude::*,
};

/// Admin approval step between accrual and payout eligibility. Only
/// APPROVED commissions are swept into payouts; nothing approves
/// implicitly.
pub struct Commission<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Commission<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn approve(
    &self,
    commission_id: i64,
    admin: &str,
  ) -> Result<commission::Model> {
    let row = commission::Entity::find_by_id(commission_id)
      .one(self.db)
      .await?
      .ok_or(Error::CommissionNotFound)?;

    if row.status != CommissionStatus::Pending {
      return Err(Error::CommissionNotPending);
    }

    let updated = commission::ActiveModel {
      status: Set(CommissionStatus::Approved),
      ..row.into()
    }
    .update(self.db)
    .await?;

    info!("Commission {} approved by {}", commission_id, admin);
    Ok(updated)
  }

  /// Batch approval of everything still pending for one partner.
  pub async fn approve_all_pending(
    &self,
    partner_id: i64,
    admin: &str,
  ) -> Result<u64> {
    let res = commission::Entity::update_many()
      .col_expr(
        commission::Column::Status,
        Expr::value(CommissionStatus::Approved),
      )
      .filter(commission::Column::PartnerId.eq(partner_id))
      .filter(commission::Column::Status.eq(CommissionStatus::Pending))
      .exec(self.db)
      .await?;

    info!(
      "{} commissions approved for partner {} by {}",
      res.rows_affected, partner_id, admin
    );
    Ok(res.rows_affected)
  }

  pub async fn reject(
    &self,
    commission_id: i64,
    admin: &str,
  ) -> Result<commission::Model> {
    let row = commission::Entity::find_by_id(commission_id)
      .one(self.db)
      .await?
      .ok_or(Error::CommissionNotFound)?;

    if row.status != CommissionStatus::Pending {
      return Err(Error::CommissionNotPending);
    }

    let updated = commission::ActiveModel {
      status: Set(CommissionStatus::Rejected),
      ..row.into()
    }
    .update(self.db)
    .await?;

    warn!("Commission {} rejected by {}", commission_id, admin);
    Ok(updated)
  }

  pub async fn for_partner(
    &self,
    partner_id: i64,
    limit: u64,
    offset: u64,
  ) -> Result<Vec<commission::Model>> {
    Ok(
      commission::Entity::find()
        .filter(commission::Column::PartnerId.eq(partner_id))
        .order_by_desc(commission::Column::CreatedAt)
        .limit(limit)
        .offset(offset)
        .all(self.db)
        .await?,
    )
  }
}
