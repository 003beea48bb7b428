use sea_orm::sea_query::Expr;

use crate::{
  entity::{PartnerStatus, click, partner},
  prelude::*,
};

/// Validity window the booking surface should give the attribution cookie.
pub const ATTRIBUTION_DAYS: i64 = 30;

#[derive(Debug, Clone, Default)]
pub struct ClickMeta {
  pub ip: Option<String>,
  pub user_agent: Option<String>,
  pub referer: Option<String>,
  pub landing_page: Option<String>,
}

/// Discount terms handed back to the caller for the attribution cookie.
#[derive(Debug, Clone)]
pub struct ClickAttribution {
  pub partner_id: i64,
  pub referral_code: String,
  pub discount_percent: i32,
  pub discount_months: i32,
  pub valid_until: DateTime,
}

pub struct Attribution<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Attribution<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Records an inbound click against a referral code. Unknown or
  /// non-active codes attribute nothing and the caller falls through to
  /// the generic flow.
  pub async fn record_click(
    &self,
    referral_code: &str,
    meta: ClickMeta,
  ) -> Result<Option<ClickAttribution>> {
    let Some(partner) = partner::Entity::find()
      .filter(partner::Column::ReferralCode.eq(referral_code))
      .one(self.db)
      .await?
    else {
      return Ok(None);
    };

    if partner.status != PartnerStatus::Active {
      return Ok(None);
    }

    let now = Utc::now().naive_utc();
    let txn = self.db.begin().await?;

    click::ActiveModel {
      id: NotSet,
      partner_id: Set(partner.id),
      ip: Set(meta.ip),
      user_agent: Set(meta.user_agent),
      referer: Set(meta.referer),
      landing_page: Set(meta.landing_page),
      created_at: Set(now),
    }
    .insert(&txn)
    .await?;

    partner::Entity::update_many()
      .col_expr(
        partner::Column::TotalClicks,
        Expr::col(partner::Column::TotalClicks).add(1),
      )
      .filter(partner::Column::Id.eq(partner.id))
      .exec(&txn)
      .await?;

    txn.commit().await?;

    debug!("Click attributed to partner {}", partner.id);

    Ok(Some(ClickAttribution {
      partner_id: partner.id,
      referral_code: partner.referral_code,
      discount_percent: partner.referral_discount_percent,
      discount_months: partner.discount_months,
      valid_until: now + TimeDelta::days(ATTRIBUTION_DAYS),
    }))
  }

  pub async fn clicks(
    &self,
    partner_id: i64,
    limit: u64,
    offset: u64,
  ) -> Result<Vec<click::Model>> {
    Ok(
      click::Entity::find()
        .filter(click::Column::PartnerId.eq(partner_id))
        .order_by_desc(click::Column::CreatedAt)
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
  use crate::{entity::*, sv::test_utils::test_db};

  #[tokio::test]
  async fn test_click_attributes_active_partner() {
    let db = test_db::setup().await;
    let partner = test_db::seed_partner(&db, PartnerStatus::Active).await;

    let hit = Attribution::new(&db)
      .record_click(&partner.referral_code, ClickMeta::default())
      .await
      .unwrap()
      .unwrap();

    assert_eq!(hit.partner_id, partner.id);
    assert_eq!(hit.discount_percent, partner.referral_discount_percent);
    assert!(hit.valid_until > Utc::now().naive_utc() + TimeDelta::days(29));

    let partner = partner::Entity::find_by_id(partner.id)
      .one(&db)
      .await
      .unwrap()
      .unwrap();
    assert_eq!(partner.total_clicks, 1);
  }

  #[tokio::test]
  async fn test_unknown_code_attributes_nothing() {
    let db = test_db::setup().await;

    let hit = Attribution::new(&db)
      .record_click("NOPE1234", ClickMeta::default())
      .await
      .unwrap();

    assert!(hit.is_none());
  }

  #[tokio::test]
  async fn test_suspended_partner_attributes_nothing() {
    let db = test_db::setup().await;
    let partner = test_db::seed_partner(&db, PartnerStatus::Suspended).await;

    let hit = Attribution::new(&db)
      .record_click(&partner.referral_code, ClickMeta::default())
      .await
      .unwrap();
    assert!(hit.is_none());

    let partner = partner::Entity::find_by_id(partner.id)
      .one(&db)
      .await
      .unwrap()
      .unwrap();
    assert_eq!(partner.total_clicks, 0);
  }

  #[tokio::test]
  async fn test_click_metadata_is_stored() {
    let db = test_db::setup().await;
    let partner = test_db::seed_partner(&db, PartnerStatus::Active).await;
    let sv = Attribution::new(&db);

    sv.record_click(&partner.referral_code, ClickMeta {
      ip: Some("203.0.113.7".into()),
      user_agent: Some("Mozilla/5.0".into()),
      referer: Some("https://blog.example/post".into()),
      landing_page: Some("/pricing".into()),
    })
    .await
    .unwrap()
    .unwrap();

    let clicks = sv.clicks(partner.id, 10, 0).await.unwrap();
    assert_eq!(clicks.len(), 1);
    assert_eq!(clicks[0].ip.as_deref(), Some("203.0.113.7"));
    assert_eq!(clicks[0].landing_page.as_deref(), Some("/pricing"));
  }
}
