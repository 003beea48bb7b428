use sea_orm::sea_query::Expr;
use serde::Serialize;

use crate::{
  entity::{commission, partner, payout},
  prelude::*,
};

/// Dashboard aggregates for one partner.
#[derive(Debug, Serialize)]
pub struct PartnerOverview {
  pub total_clicks: i64,
  pub total_registrations: i64,
  pub total_paid_customers: i64,
  pub total_earnings: i64,
  pub pending_payout: i64,
  /// registrations / clicks; 0 when the partner has no clicks yet.
  pub conversion_rate: f64,
}

/// Totals derived from the underlying event rows. The cached partner
/// counters must always equal these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedTotals {
  pub total_earnings: i64,
  pub pending_payout: i64,
}

pub struct Stats<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Stats<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn overview(&self, partner_id: i64) -> Result<PartnerOverview> {
    let partner = partner::Entity::find_by_id(partner_id)
      .one(self.db)
      .await?
      .ok_or(Error::PartnerNotFound)?;

    let conversion_rate = if partner.total_clicks == 0 {
      0.0
    } else {
      partner.total_registrations as f64 / partner.total_clicks as f64
    };

    Ok(PartnerOverview {
      total_clicks: partner.total_clicks,
      total_registrations: partner.total_registrations,
      total_paid_customers: partner.total_paid_customers,
      total_earnings: partner.total_earnings,
      pending_payout: partner.pending_payout,
      conversion_rate,
    })
  }

  /// Re-derives the cached money counters from the source rows:
  /// earnings as the sum over commissions, pending payout as earnings
  /// minus the sum of requested payouts.
  pub async fn recompute(&self, partner_id: i64) -> Result<ComputedTotals> {
    let earned: Option<Option<i64>> = commission::Entity::find()
      .select_only()
      .column_as(Expr::col(commission::Column::Amount).sum(), "earned")
      .filter(commission::Column::PartnerId.eq(partner_id))
      .into_tuple()
      .one(self.db)
      .await?;

    let withdrawn: Option<Option<i64>> = payout::Entity::find()
      .select_only()
      .column_as(Expr::col(payout::Column::Amount).sum(), "withdrawn")
      .filter(payout::Column::PartnerId.eq(partner_id))
      .into_tuple()
      .one(self.db)
      .await?;

    let total_earnings = earned.flatten().unwrap_or(0);
    let pending_payout = total_earnings - withdrawn.flatten().unwrap_or(0);

    Ok(ComputedTotals { total_earnings, pending_payout })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    entity::*,
    sv::{
      Attribution, Commission, Conversion, Payout, Settlement,
      attribution::ClickMeta,
      settlement::{CENTS, PaymentSucceeded},
      test_utils::test_db,
    },
  };

  #[tokio::test]
  async fn test_overview_without_clicks() {
    let db = test_db::setup().await;
    let partner = test_db::seed_partner(&db, PartnerStatus::Active).await;

    let overview = Stats::new(&db).overview(partner.id).await.unwrap();

    assert_eq!(overview.total_clicks, 0);
    assert_eq!(overview.conversion_rate, 0.0);
  }

  #[tokio::test]
  async fn test_overview_conversion_rate() {
    let db = test_db::setup().await;
    let partner = test_db::seed_partner(&db, PartnerStatus::Active).await;
    let attribution = Attribution::new(&db);

    attribution
      .record_click(&partner.referral_code, ClickMeta::default())
      .await
      .unwrap();
    attribution
      .record_click(&partner.referral_code, ClickMeta::default())
      .await
      .unwrap();
    Conversion::new(&db)
      .record(&partner.referral_code, 42)
      .await
      .unwrap()
      .unwrap();

    let overview = Stats::new(&db).overview(partner.id).await.unwrap();

    assert_eq!(overview.total_clicks, 2);
    assert_eq!(overview.total_registrations, 1);
    assert_eq!(overview.conversion_rate, 0.5);
  }

  #[tokio::test]
  async fn test_caches_survive_the_full_flow() {
    let db = test_db::setup().await;
    let partner = test_db::seed_partner(&db, PartnerStatus::Active).await;

    Attribution::new(&db)
      .record_click(&partner.referral_code, ClickMeta::default())
      .await
      .unwrap();
    Conversion::new(&db)
      .record(&partner.referral_code, 42)
      .await
      .unwrap()
      .unwrap();

    let settlement = Settlement::new(&db);
    for n in 1..=3 {
      settlement
        .settle(&PaymentSucceeded {
          tenant_id: 42,
          amount: 1000 * CENTS,
          payment_id: format!("pay-{n}"),
          invoice_id: None,
        })
        .await
        .unwrap();
    }

    Commission::new(&db)
      .approve_all_pending(partner.id, "ops@example")
      .await
      .unwrap();
    Payout::new(&db)
      .request(partner.id, 150 * CENTS, "DE02 1203 0000 0000 2020 51", None)
      .await
      .unwrap();

    let cached = partner::Entity::find_by_id(partner.id)
      .one(&db)
      .await
      .unwrap()
      .unwrap();
    let derived = Stats::new(&db).recompute(partner.id).await.unwrap();

    assert_eq!(derived.total_earnings, cached.total_earnings);
    assert_eq!(derived.pending_payout, cached.pending_payout);
    assert!(cached.pending_payout >= 0);
  }
}
