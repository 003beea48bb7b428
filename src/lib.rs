//! Partner referral attribution and commission settlement engine.
//!
//! Click attribution, conversion tracking, one-time and recurring commission
//! accrual, and payout settlement for the partner program. The HTTP surface,
//! billing system and partner dashboard call into [`sv`] over a shared
//! [`sea_orm::DatabaseConnection`].

pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod prelude;
pub mod sv;

pub use config::Config;
pub use error::{Error, Result};
