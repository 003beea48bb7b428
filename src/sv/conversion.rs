use sea_orm::{
  DbErr,
  sea_query::{Expr, OnConflict},
};

use crate::{
  entity::{ConversionStatus, PartnerStatus, conversion, partner},
  prelude::*,
};

pub struct Conversion<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Conversion<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Binds a newly registered tenant to the partner whose code referred
  /// it. At most one binding ever exists per tenant; duplicate calls
  /// return the existing record unchanged. Unknown or non-active codes
  /// are a no-op so registration never fails on partner-program state.
  pub async fn record(
    &self,
    referral_code: &str,
    tenant_id: i64,
  ) -> Result<Option<conversion::Model>> {
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

    if let Some(existing) = self.by_tenant(tenant_id).await? {
      return Ok(Some(existing));
    }

    let now = Utc::now().naive_utc();
    let discount_until = now + Months::new(partner.discount_months.max(0) as u32);

    let txn = self.db.begin().await?;

    let insert = conversion::Entity::insert(conversion::ActiveModel {
      id: NotSet,
      partner_id: Set(partner.id),
      tenant_id: Set(tenant_id),
      status: Set(ConversionStatus::Registered),
      discount_percent: Set(partner.referral_discount_percent),
      discount_until: Set(discount_until),
      one_time_paid: Set(false),
      one_time_amount: Set(0),
      one_time_paid_at: Set(None),
      recurring_paid_months: Set(0),
      total_recurring_paid: Set(0),
      first_payment_at: Set(None),
      last_payment_at: Set(None),
      registered_at: Set(now),
    })
    .on_conflict(
      OnConflict::column(conversion::Column::TenantId).do_nothing().to_owned(),
    )
    .exec(&txn)
    .await;

    let id = match insert {
      Ok(res) => res.last_insert_id,
      // A concurrent duplicate call won the unique-index race; the
      // existing binding stands and counters stay untouched.
      Err(DbErr::RecordNotInserted) => {
        txn.rollback().await?;
        return self.by_tenant(tenant_id).await;
      }
      Err(err) => return Err(err.into()),
    };

    partner::Entity::update_many()
      .col_expr(
        partner::Column::TotalRegistrations,
        Expr::col(partner::Column::TotalRegistrations).add(1),
      )
      .filter(partner::Column::Id.eq(partner.id))
      .exec(&txn)
      .await?;

    txn.commit().await?;

    info!("Tenant {} converted via partner {}", tenant_id, partner.id);

    Ok(conversion::Entity::find_by_id(id).one(self.db).await?)
  }

  pub async fn by_tenant(
    &self,
    tenant_id: i64,
  ) -> Result<Option<conversion::Model>> {
    Ok(
      conversion::Entity::find()
        .filter(conversion::Column::TenantId.eq(tenant_id))
        .one(self.db)
        .await?,
    )
  }

  pub async fn for_partner(
    &self,
    partner_id: i64,
    limit: u64,
    offset: u64,
  ) -> Result<Vec<conversion::Model>> {
    Ok(
      conversion::Entity::find()
        .filter(conversion::Column::PartnerId.eq(partner_id))
        .order_by_desc(conversion::Column::RegisteredAt)
        .limit(limit)
        .offset(offset)
        .all(self.db)
        .await?,
    )
  }
}
