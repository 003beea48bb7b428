use sea_orm::{DatabaseTransaction, sea_query::Expr};

use crate::{
  entity::{
    CommissionStatus, CommissionType, ConversionStatus, commission,
    conversion, partner,
  },
  prelude::*,
};

/// All monetary amounts in this crate are integer cents.
pub const CENTS: i64 = 100;

/// The billing subsystem's "payment succeeded" fact. Delivery is
/// at-least-once; [`Settlement::settle`] absorbs redeliveries.
#[derive(Debug, Clone)]
pub struct PaymentSucceeded {
  pub tenant_id: i64,
  /// Gross payment amount in cents.
  pub amount: i64,
  pub payment_id: String,
  pub invoice_id: Option<String>,
}

pub struct Settlement<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Settlement<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Settles one successful tenant payment into commissions.
  ///
  /// Unreferred tenants settle to nothing. Otherwise the one-time branch
  /// fires at most once per conversion and the recurring branch at most
  /// `recurring_months_cap` times; both may fire for the same payment.
  /// Safe to call again with the same `payment_id`: each branch checks
  /// for an already recorded commission, and the unique
  /// (payment_id, type) index backs that check under concurrent
  /// redelivery.
  pub async fn settle(
    &self,
    event: &PaymentSucceeded,
  ) -> Result<Vec<commission::Model>> {
    if event.amount <= 0 {
      return Err(Error::InvalidArgs("Payment amount must be positive".into()));
    }

    let txn = self.db.begin().await?;

    let Some(conv) = conversion::Entity::find()
      .filter(conversion::Column::TenantId.eq(event.tenant_id))
      .one(&txn)
      .await?
    else {
      return Ok(vec![]);
    };

    let partner = partner::Entity::find_by_id(conv.partner_id)
      .one(&txn)
      .await?
      .ok_or(Error::PartnerNotFound)?;

    let now = Utc::now().naive_utc();
    let mut created = Vec::new();

    // One-time commission, exactly once per conversion.
    if !conv.one_time_paid
      && !self
        .already_settled(&txn, &event.payment_id, CommissionType::OneTime)
        .await?
    {
      let amount = partner.one_time_commission;

      let row = commission::ActiveModel {
        id: NotSet,
        partner_id: Set(partner.id),
        conversion_id: Set(conv.id),
        commission_type: Set(CommissionType::OneTime),
        month: Set(0),
        amount: Set(amount),
        payment_id: Set(event.payment_id.clone()),
        invoice_id: Set(event.invoice_id.clone()),
        status: Set(CommissionStatus::Pending),
        paid_in_payout_id: Set(None),
        created_at: Set(now),
      }
      .insert(&txn)
      .await?;

      conversion::ActiveModel {
        status: Set(ConversionStatus::Paid),
        one_time_paid: Set(true),
        one_time_amount: Set(amount),
        one_time_paid_at: Set(Some(now)),
        first_payment_at: Set(Some(now)),
        ..conv.clone().into()
      }
      .update(&txn)
      .await?;

      partner::Entity::update_many()
        .col_expr(
          partner::Column::TotalPaidCustomers,
          Expr::col(partner::Column::TotalPaidCustomers).add(1),
        )
        .col_expr(
          partner::Column::TotalEarnings,
          Expr::col(partner::Column::TotalEarnings).add(amount),
        )
        .col_expr(
          partner::Column::PendingPayout,
          Expr::col(partner::Column::PendingPayout).add(amount),
        )
        .filter(partner::Column::Id.eq(partner.id))
        .exec(&txn)
        .await?;

      info!(
        "One-time commission of {} for partner {} (payment {})",
        amount, partner.id, event.payment_id
      );
      created.push(row);
    }

    // Recurring commission, bounded by the partner's month cap.
    if !self
      .already_settled(&txn, &event.payment_id, CommissionType::Recurring)
      .await?
    {
      let amount =
        event.amount * partner.recurring_commission_percent as i64 / 100;

      // The cap check and the month counter move in one conditional
      // update so concurrent settlements cannot run past the cap.
      let bumped = conversion::Entity::update_many()
        .col_expr(
          conversion::Column::RecurringPaidMonths,
          Expr::col(conversion::Column::RecurringPaidMonths).add(1),
        )
        .col_expr(
          conversion::Column::TotalRecurringPaid,
          Expr::col(conversion::Column::TotalRecurringPaid).add(amount),
        )
        .col_expr(conversion::Column::LastPaymentAt, Expr::value(now))
        .filter(conversion::Column::Id.eq(conv.id))
        .filter(
          conversion::Column::RecurringPaidMonths
            .lt(partner.recurring_months_cap),
        )
        .exec(&txn)
        .await?;

      if bumped.rows_affected > 0 {
        let month = conversion::Entity::find_by_id(conv.id)
          .one(&txn)
          .await?
          .ok_or(Error::ConversionNotFound)?
          .recurring_paid_months;

        let row = commission::ActiveModel {
          id: NotSet,
          partner_id: Set(partner.id),
          conversion_id: Set(conv.id),
          commission_type: Set(CommissionType::Recurring),
          month: Set(month),
          amount: Set(amount),
          payment_id: Set(event.payment_id.clone()),
          invoice_id: Set(event.invoice_id.clone()),
          status: Set(CommissionStatus::Pending),
          paid_in_payout_id: Set(None),
          created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        partner::Entity::update_many()
          .col_expr(
            partner::Column::TotalEarnings,
            Expr::col(partner::Column::TotalEarnings).add(amount),
          )
          .col_expr(
            partner::Column::PendingPayout,
            Expr::col(partner::Column::PendingPayout).add(amount),
          )
          .filter(partner::Column::Id.eq(partner.id))
          .exec(&txn)
          .await?;

        info!(
          "Recurring commission of {} (month {}) for partner {} (payment {})",
          amount, month, partner.id, event.payment_id
        );
        created.push(row);
      }
    }

    txn.commit().await?;
    Ok(created)
  }

  async fn already_settled(
    &self,
    txn: &DatabaseTransaction,
    payment_id: &str,
    ty: CommissionType,
  ) -> Result<bool> {
    Ok(
      commission::Entity::find()
        .filter(commission::Column::PaymentId.eq(payment_id))
        .filter(commission::Column::CommissionType.eq(ty))
        .one(txn)
        .await?
        .is_some(),
    )
  }
}
