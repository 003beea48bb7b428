use std::env;

use crate::sv::{attribution, payout};

/// Runtime configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
  pub database_url: String,
  /// Minimum payout request amount, in cents.
  pub min_payout: i64,
  /// Validity window of a click attribution, in days.
  pub attribution_days: i64,
}

impl Config {
  pub fn from_env() -> Self {
    dotenvy::dotenv().ok();

    let database_url = env::var("DATABASE_URL")
      .unwrap_or_else(|_| "sqlite:partner.db?mode=rwc".into());

    let min_payout = env::var("MIN_PAYOUT_CENTS")
      .ok()
      .and_then(|v| v.parse().ok())
      .unwrap_or(payout::MIN_PAYOUT);

    let attribution_days = env::var("ATTRIBUTION_DAYS")
      .ok()
      .and_then(|v| v.parse().ok())
      .unwrap_or(attribution::ATTRIBUTION_DAYS);

    Self { database_url, min_payout, attribution_days }
  }
}

impl Default for Config {
  fn default() -> Self {
    Self {
      database_url: "sqlite::memory:".into(),
      min_payout: payout::MIN_PAYOUT,
      attribution_days: attribution::ATTRIBUTION_DAYS,
    }
  }
}
