use thiserror::Error as ThisError;

use crate::entity::PartnerStatus;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, ThisError)]
pub enum Error {
  #[error("partner not found")]
  PartnerNotFound,
  #[error("conversion not found")]
  ConversionNotFound,
  #[error("commission not found")]
  CommissionNotFound,
  #[error("payout not found")]
  PayoutNotFound,

  #[error("email is already registered")]
  EmailTaken,
  #[error("could not generate a unique referral code")]
  CodeGenerationExhausted,

  #[error("payout amount is below the minimum of {minimum}")]
  BelowMinimum { minimum: i64 },
  #[error("insufficient pending payout balance")]
  InsufficientFunds,
  #[error("payout has already been processed")]
  PayoutAlreadyProcessed,
  #[error("commission is not pending")]
  CommissionNotPending,

  #[error("invalid partner status transition: {from:?} -> {to:?}")]
  InvalidTransition { from: PartnerStatus, to: PartnerStatus },

  #[error(transparent)]
  Login(#[from] Login),

  #[error("{0}")]
  InvalidArgs(String),

  #[error(transparent)]
  Db(#[from] sea_orm::DbErr),
}

/// Status-specific login rejections for non-active partners.
#[derive(Debug, ThisError)]
pub enum Login {
  #[error("partner account is awaiting approval")]
  Pending,
  #[error("partner application was rejected")]
  Rejected,
  #[error("partner account is suspended")]
  Suspended,
}
