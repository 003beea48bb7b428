use crate::{
  entity::{PartnerStatus, partner},
  prelude::*,
  sv::{Code, settlement::CENTS},
};

/// Commercial terms assigned at registration; admins override them at
/// approval time.
pub const DEFAULT_ONE_TIME_COMMISSION: i64 = 50 * CENTS;
pub const DEFAULT_RECURRING_PERCENT: i32 = 10;
pub const DEFAULT_RECURRING_MONTHS_CAP: i32 = 12;
pub const DEFAULT_DISCOUNT_PERCENT: i32 = 20;
pub const DEFAULT_DISCOUNT_MONTHS: i32 = 6;

#[derive(Debug, Clone)]
pub struct NewPartner {
  pub company_name: String,
  pub contact_name: String,
  pub email: String,
  /// Digest of the partner credential; hashing happens at the caller.
  pub password_hash: String,
}

#[derive(Debug, Clone, Copy)]
pub struct CommissionTerms {
  pub one_time_commission: i64,
  pub recurring_commission_percent: i32,
  pub recurring_months_cap: i32,
  pub referral_discount_percent: i32,
  pub discount_months: i32,
}

pub struct Partner<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Partner<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Self-registration; partners start PENDING until an admin decides.
  pub async fn register(&self, new: NewPartner) -> Result<partner::Model> {
    let existing = partner::Entity::find()
      .filter(partner::Column::Email.eq(&new.email))
      .one(self.db)
      .await?;

    if existing.is_some() {
      return Err(Error::EmailTaken);
    }

    let code = Code::new(self.db).generate(&new.company_name).await?;

    let now = Utc::now().naive_utc();
    let partner = partner::ActiveModel {
      id: NotSet,
      company_name: Set(new.company_name),
      contact_name: Set(new.contact_name),
      email: Set(new.email),
      password_hash: Set(new.password_hash),
      referral_code: Set(code),
      one_time_commission: Set(DEFAULT_ONE_TIME_COMMISSION),
      recurring_commission_percent: Set(DEFAULT_RECURRING_PERCENT),
      recurring_months_cap: Set(DEFAULT_RECURRING_MONTHS_CAP),
      referral_discount_percent: Set(DEFAULT_DISCOUNT_PERCENT),
      discount_months: Set(DEFAULT_DISCOUNT_MONTHS),
      total_clicks: Set(0),
      total_registrations: Set(0),
      total_paid_customers: Set(0),
      total_earnings: Set(0),
      pending_payout: Set(0),
      status: Set(PartnerStatus::Pending),
      created_at: Set(now),
    }
    .insert(self.db)
    .await?;

    info!("Partner {} registered with code {}", partner.id, partner.referral_code);
    Ok(partner)
  }

  /// Admin approval; optionally overrides the commercial terms.
  pub async fn approve(
    &self,
    partner_id: i64,
    admin: &str,
    terms: Option<CommissionTerms>,
  ) -> Result<partner::Model> {
    let partner = self.require(partner_id).await?;

    if partner.status != PartnerStatus::Pending {
      return Err(Error::InvalidTransition {
        from: partner.status,
        to: PartnerStatus::Active,
      });
    }

    let mut active = partner::ActiveModel {
      status: Set(PartnerStatus::Active),
      ..partner.into()
    };

    if let Some(terms) = terms {
      active.one_time_commission = Set(terms.one_time_commission);
      active.recurring_commission_percent =
        Set(terms.recurring_commission_percent);
      active.recurring_months_cap = Set(terms.recurring_months_cap);
      active.referral_discount_percent = Set(terms.referral_discount_percent);
      active.discount_months = Set(terms.discount_months);
    }

    let updated = active.update(self.db).await?;

    info!("Partner {} approved by {}", partner_id, admin);
    Ok(updated)
  }

  pub async fn reject(
    &self,
    partner_id: i64,
    admin: &str,
  ) -> Result<partner::Model> {
    let partner = self.require(partner_id).await?;

    if partner.status != PartnerStatus::Pending {
      return Err(Error::InvalidTransition {
        from: partner.status,
        to: PartnerStatus::Rejected,
      });
    }

    let updated = partner::ActiveModel {
      status: Set(PartnerStatus::Rejected),
      ..partner.into()
    }
    .update(self.db)
    .await?;

    info!("Partner {} rejected by {}", partner_id, admin);
    Ok(updated)
  }

  /// Suspension stops new attribution; earned-but-unpaid balances stay.
  pub async fn suspend(
    &self,
    partner_id: i64,
    admin: &str,
  ) -> Result<partner::Model> {
    let partner = self.require(partner_id).await?;

    if partner.status != PartnerStatus::Active {
      return Err(Error::InvalidTransition {
        from: partner.status,
        to: PartnerStatus::Suspended,
      });
    }

    let updated = partner::ActiveModel {
      status: Set(PartnerStatus::Suspended),
      ..partner.into()
    }
    .update(self.db)
    .await?;

    warn!("Partner {} suspended by {}", partner_id, admin);
    Ok(updated)
  }

  /// Gate for the login flow. Returns the partner record for credential
  /// verification at the caller; non-active partners get a status-specific
  /// rejection.
  pub async fn login(&self, email: &str) -> Result<partner::Model> {
    let partner = self
      .by_email(email)
      .await?
      .ok_or(Error::PartnerNotFound)?;

    match partner.status {
      PartnerStatus::Active => Ok(partner),
      PartnerStatus::Pending => Err(Login::Pending.into()),
      PartnerStatus::Rejected => Err(Login::Rejected.into()),
      PartnerStatus::Suspended => Err(Login::Suspended.into()),
    }
  }

  pub async fn by_id(&self, partner_id: i64) -> Result<Option<partner::Model>> {
    Ok(partner::Entity::find_by_id(partner_id).one(self.db).await?)
  }

  pub async fn by_code(&self, code: &str) -> Result<Option<partner::Model>> {
    Ok(
      partner::Entity::find()
        .filter(partner::Column::ReferralCode.eq(code))
        .one(self.db)
        .await?,
    )
  }

  pub async fn by_email(&self, email: &str) -> Result<Option<partner::Model>> {
    Ok(
      partner::Entity::find()
        .filter(partner::Column::Email.eq(email))
        .one(self.db)
        .await?,
    )
  }

  async fn require(&self, partner_id: i64) -> Result<partner::Model> {
    self.by_id(partner_id).await?.ok_or(Error::PartnerNotFound)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::test_utils::test_db;

  fn acme() -> NewPartner {
    NewPartner {
      company_name: "Acme Travel".into(),
      contact_name: "Alex Doe".into(),
      email: "partners@acme.example".into(),
      password_hash: "$argon2$stub".into(),
    }
  }

  #[tokio::test]
  async fn test_register_creates_pending_partner() {
    let db = test_db::setup().await;

    let partner = Partner::new(&db).register(acme()).await.unwrap();

    assert_eq!(partner.status, PartnerStatus::Pending);
    assert!(partner.referral_code.starts_with("ACME"));
    assert_eq!(partner.one_time_commission, DEFAULT_ONE_TIME_COMMISSION);
    assert_eq!(partner.pending_payout, 0);
  }

  #[tokio::test]
  async fn test_register_rejects_duplicate_email() {
    let db = test_db::setup().await;
    let sv = Partner::new(&db);

    sv.register(acme()).await.unwrap();
    let result = sv.register(acme()).await;

    assert!(matches!(result, Err(Error::EmailTaken)));
  }

  #[tokio::test]
  async fn test_approve_overrides_terms() {
    let db = test_db::setup().await;
    let sv = Partner::new(&db);

    let partner = sv.register(acme()).await.unwrap();
    let approved = sv
      .approve(
        partner.id,
        "ops@example",
        Some(CommissionTerms {
          one_time_commission: 75 * CENTS,
          recurring_commission_percent: 15,
          recurring_months_cap: 6,
          referral_discount_percent: 25,
          discount_months: 3,
        }),
      )
      .await
      .unwrap();

    assert_eq!(approved.status, PartnerStatus::Active);
    assert_eq!(approved.one_time_commission, 75 * CENTS);
    assert_eq!(approved.recurring_commission_percent, 15);
    assert_eq!(approved.recurring_months_cap, 6);
  }

  #[tokio::test]
  async fn test_approve_requires_pending() {
    let db = test_db::setup().await;
    let sv = Partner::new(&db);

    let partner = sv.register(acme()).await.unwrap();
    sv.approve(partner.id, "ops@example", None).await.unwrap();

    let result = sv.approve(partner.id, "ops@example", None).await;
    assert!(matches!(result, Err(Error::InvalidTransition { .. })));
  }

  #[tokio::test]
  async fn test_suspend_requires_active() {
    let db = test_db::setup().await;
    let sv = Partner::new(&db);

    let partner = sv.register(acme()).await.unwrap();

    let result = sv.suspend(partner.id, "ops@example").await;
    assert!(matches!(result, Err(Error::InvalidTransition { .. })));

    sv.approve(partner.id, "ops@example", None).await.unwrap();
    let suspended = sv.suspend(partner.id, "ops@example").await.unwrap();
    assert_eq!(suspended.status, PartnerStatus::Suspended);
  }

  #[tokio::test]
  async fn test_reject_is_terminal() {
    let db = test_db::setup().await;
    let sv = Partner::new(&db);

    let partner = sv.register(acme()).await.unwrap();
    sv.reject(partner.id, "ops@example").await.unwrap();

    let result = sv.approve(partner.id, "ops@example", None).await;
    assert!(matches!(result, Err(Error::InvalidTransition { .. })));
  }

  #[tokio::test]
  async fn test_login_gated_by_status() {
    let db = test_db::setup().await;
    let sv = Partner::new(&db);

    let partner = sv.register(acme()).await.unwrap();
    assert!(matches!(
      sv.login(&partner.email).await,
      Err(Error::Login(Login::Pending))
    ));

    sv.approve(partner.id, "ops@example", None).await.unwrap();
    assert!(sv.login(&partner.email).await.is_ok());

    sv.suspend(partner.id, "ops@example").await.unwrap();
    assert!(matches!(
      sv.login(&partner.email).await,
      Err(Error::Login(Login::Suspended))
    ));
  }

  #[tokio::test]
  async fn test_login_unknown_email() {
    let db = test_db::setup().await;

    let result = Partner::new(&db).login("ghost@example").await;
    assert!(matches!(result, Err(Error::PartnerNotFound)));
  }
}
