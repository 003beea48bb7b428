use sea_orm::sea_query::Expr;

use crate::{
  entity::{CommissionStatus, PayoutStatus, commission, partner, payout},
  prelude::*,
  sv::settlement::CENTS,
};

/// Minimum withdrawal request, in cents.
pub const MIN_PAYOUT: i64 = 100 * CENTS;

pub struct Payout<'a> {
  db: &'a DatabaseConnection,
  min_payout: i64,
}

impl<'a> Payout<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db, min_payout: MIN_PAYOUT }
  }

  pub fn with_minimum(db: &'a DatabaseConnection, min_payout: i64) -> Self {
    Self { db, min_payout }
  }

  /// Partner-initiated withdrawal of accumulated pending payout.
  ///
  /// The balance check and the decrement are one conditional update, so
  /// a racing settlement or a second request cannot drive the balance
  /// negative. Everything APPROVED is swept into the new payout.
  pub async fn request(
    &self,
    partner_id: i64,
    amount: i64,
    bank_account: &str,
    bank_name: Option<String>,
  ) -> Result<payout::Model> {
    if amount < self.min_payout {
      return Err(Error::BelowMinimum { minimum: self.min_payout });
    }

    let txn = self.db.begin().await?;

    partner::Entity::find_by_id(partner_id)
      .one(&txn)
      .await?
      .ok_or(Error::PartnerNotFound)?;

    let debited = partner::Entity::update_many()
      .col_expr(
        partner::Column::PendingPayout,
        Expr::col(partner::Column::PendingPayout).sub(amount),
      )
      .filter(partner::Column::Id.eq(partner_id))
      .filter(partner::Column::PendingPayout.gte(amount))
      .exec(&txn)
      .await?;

    if debited.rows_affected == 0 {
      return Err(Error::InsufficientFunds);
    }

    let now = Utc::now().naive_utc();
    let payout = payout::ActiveModel {
      id: NotSet,
      partner_id: Set(partner_id),
      amount: Set(amount),
      bank_account: Set(bank_account.to_string()),
      bank_name: Set(bank_name),
      status: Set(PayoutStatus::Pending),
      requested_at: Set(now),
      processed_at: Set(None),
      processed_by: Set(None),
      transfer_id: Set(None),
      notes: Set(None),
    }
    .insert(&txn)
    .await?;

    commission::Entity::update_many()
      .col_expr(
        commission::Column::Status,
        Expr::value(CommissionStatus::Paid),
      )
      .col_expr(
        commission::Column::PaidInPayoutId,
        Expr::value(payout.id),
      )
      .filter(commission::Column::PartnerId.eq(partner_id))
      .filter(commission::Column::Status.eq(CommissionStatus::Approved))
      .exec(&txn)
      .await?;

    txn.commit().await?;

    info!(
      "Payout {} of {} requested by partner {}",
      payout.id, amount, partner_id
    );
    Ok(payout)
  }

  /// Admin completion after the wire transfer went out. Balances were
  /// already adjusted at request time.
  pub async fn process(
    &self,
    payout_id: i64,
    admin: &str,
    transfer_id: Option<String>,
    notes: Option<String>,
  ) -> Result<payout::Model> {
    let payout = payout::Entity::find_by_id(payout_id)
      .one(self.db)
      .await?
      .ok_or(Error::PayoutNotFound)?;

    if payout.status == PayoutStatus::Completed {
      return Err(Error::PayoutAlreadyProcessed);
    }

    let now = Utc::now().naive_utc();
    let updated = payout::ActiveModel {
      status: Set(PayoutStatus::Completed),
      processed_at: Set(Some(now)),
      processed_by: Set(Some(admin.to_string())),
      transfer_id: Set(transfer_id),
      notes: Set(notes),
      ..payout.into()
    }
    .update(self.db)
    .await?;

    info!("Payout {} completed by {}", payout_id, admin);
    Ok(updated)
  }

  pub async fn for_partner(
    &self,
    partner_id: i64,
    limit: u64,
    offset: u64,
  ) -> Result<Vec<payout::Model>> {
    Ok(
      payout::Entity::find()
        .filter(payout::Column::PartnerId.eq(partner_id))
        .order_by_desc(payout::Column::RequestedAt)
        .limit(limit)
        .offset(offset)
        .all(self.db)
        .await?,
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    entity::*,
    sv::{
      Commission, Conversion, Settlement, settlement::PaymentSucceeded,
      test_utils::test_db,
    },
  };

  /// Seeds a partner with 150.00 of pending commissions (one-time 50.00
  /// plus 10% of a 1000.00 payment).
  async fn seed_balance(db: &DatabaseConnection) -> partner::Model {
    let partner = test_db::seed_partner(db, PartnerStatus::Active).await;
    Conversion::new(db)
      .record(&partner.referral_code, 42)
      .await
      .unwrap()
      .unwrap();

    Settlement::new(db)
      .settle(&PaymentSucceeded {
        tenant_id: 42,
        amount: 1000 * CENTS,
        payment_id: "pay-1".into(),
        invoice_id: None,
      })
      .await
      .unwrap();

    partner::Entity::find_by_id(partner.id).one(db).await.unwrap().unwrap()
  }

  #[tokio::test]
  async fn test_below_minimum_mutates_nothing() {
    let db = test_db::setup().await;
    let partner = seed_balance(&db).await;

    let result = Payout::new(&db)
      .request(partner.id, 50 * CENTS, "DE02 1203 0000 0000 2020 51", None)
      .await;
    assert!(matches!(result, Err(Error::BelowMinimum { .. })));

    let after = partner::Entity::find_by_id(partner.id)
      .one(&db)
      .await
      .unwrap()
      .unwrap();
    assert_eq!(after.pending_payout, partner.pending_payout);
  }

  #[tokio::test]
  async fn test_insufficient_funds() {
    let db = test_db::setup().await;
    let partner = seed_balance(&db).await;
    assert_eq!(partner.pending_payout, 150 * CENTS);

    let result = Payout::new(&db)
      .request(partner.id, 200 * CENTS, "DE02 1203 0000 0000 2020 51", None)
      .await;

    assert!(matches!(result, Err(Error::InsufficientFunds)));
  }

  #[tokio::test]
  async fn test_request_debits_and_sweeps_approved() {
    let db = test_db::setup().await;
    let partner = seed_balance(&db).await;

    Commission::new(&db)
      .approve_all_pending(partner.id, "ops@example")
      .await
      .unwrap();

    let payout = Payout::new(&db)
      .request(
        partner.id,
        120 * CENTS,
        "DE02 1203 0000 0000 2020 51",
        Some("Sparkasse".into()),
      )
      .await
      .unwrap();

    assert_eq!(payout.status, PayoutStatus::Pending);
    assert_eq!(payout.amount, 120 * CENTS);

    let after = partner::Entity::find_by_id(partner.id)
      .one(&db)
      .await
      .unwrap()
      .unwrap();
    assert_eq!(after.pending_payout, 30 * CENTS);

    let swept = commission::Entity::find()
      .filter(commission::Column::PartnerId.eq(partner.id))
      .all(&db)
      .await
      .unwrap();
    assert!(swept.iter().all(|c| c.status == CommissionStatus::Paid));
    assert!(swept.iter().all(|c| c.paid_in_payout_id == Some(payout.id)));
  }

  #[tokio::test]
  async fn test_pending_commissions_are_not_swept() {
    let db = test_db::setup().await;
    let partner = seed_balance(&db).await;

    // Nothing approved yet: the payout goes out but no commission is
    // marked paid.
    let payout = Payout::new(&db)
      .request(partner.id, 120 * CENTS, "DE02 1203 0000 0000 2020 51", None)
      .await
      .unwrap();

    let rows = commission::Entity::find()
      .filter(commission::Column::PartnerId.eq(partner.id))
      .all(&db)
      .await
      .unwrap();
    assert!(rows.iter().all(|c| c.status == CommissionStatus::Pending));
    assert!(rows.iter().all(|c| c.paid_in_payout_id.is_none()));
    assert_eq!(payout.amount, 120 * CENTS);
  }

  #[tokio::test]
  async fn test_drained_balance_rejects_second_request() {
    let db = test_db::setup().await;
    let partner = seed_balance(&db).await;
    let sv = Payout::new(&db);

    sv.request(partner.id, 120 * CENTS, "DE02 1203 0000 0000 2020 51", None)
      .await
      .unwrap();
    let result = sv
      .request(partner.id, 120 * CENTS, "DE02 1203 0000 0000 2020 51", None)
      .await;

    assert!(matches!(result, Err(Error::InsufficientFunds)));

    let after = partner::Entity::find_by_id(partner.id)
      .one(&db)
      .await
      .unwrap()
      .unwrap();
    assert_eq!(after.pending_payout, 30 * CENTS);
  }

  #[tokio::test]
  async fn test_process_stamps_admin_identity() {
    let db = test_db::setup().await;
    let partner = seed_balance(&db).await;
    let sv = Payout::new(&db);

    let payout = sv
      .request(partner.id, 120 * CENTS, "DE02 1203 0000 0000 2020 51", None)
      .await
      .unwrap();

    let processed = sv
      .process(
        payout.id,
        "finance@example",
        Some("tr-2041".into()),
        Some("weekly batch".into()),
      )
      .await
      .unwrap();

    assert_eq!(processed.status, PayoutStatus::Completed);
    assert_eq!(processed.processed_by.as_deref(), Some("finance@example"));
    assert_eq!(processed.transfer_id.as_deref(), Some("tr-2041"));
    assert!(processed.processed_at.is_some());

    let result = sv.process(payout.id, "finance@example", None, None).await;
    assert!(matches!(result, Err(Error::PayoutAlreadyProcessed)));
  }

  #[tokio::test]
  async fn test_process_unknown_payout() {
    let db = test_db::setup().await;

    let result =
      Payout::new(&db).process(999, "finance@example", None, None).await;
    assert!(matches!(result, Err(Error::PayoutNotFound)));
  }
}
