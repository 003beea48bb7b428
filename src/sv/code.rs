use uuid::Uuid;

use crate::{entity::partner, prelude::*};

/// Upper bound on uniqueness re-rolls. Collisions are vanishingly
/// unlikely at this suffix length, but the contract is explicit.
pub const MAX_ATTEMPTS: u32 = 10;

const PREFIX_LEN: usize = 4;
const SUFFIX_LEN: usize = 6;

pub struct Code<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Code<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Derive a shareable referral code from a company name: a sanitized
  /// prefix plus a random suffix, re-rolled while the code is taken.
  pub async fn generate(&self, company_name: &str) -> Result<String> {
    let prefix = sanitize_prefix(company_name);

    for _ in 0..MAX_ATTEMPTS {
      let code = format!("{prefix}{}", random_suffix());

      let taken = partner::Entity::find()
        .filter(partner::Column::ReferralCode.eq(&code))
        .one(self.db)
        .await?;

      if taken.is_none() {
        return Ok(code);
      }
    }

    Err(Error::CodeGenerationExhausted)
  }
}

fn sanitize_prefix(name: &str) -> String {
  let prefix: String = name
    .chars()
    .filter(|c| c.is_ascii_alphanumeric())
    .take(PREFIX_LEN)
    .collect::<String>()
    .to_ascii_uppercase();

  if prefix.len() < 2 { "PTR".into() } else { prefix }
}

fn random_suffix() -> String {
  Uuid::new_v4().simple().to_string()[..SUFFIX_LEN].to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{entity::*, sv::test_utils::test_db};

  #[test]
  fn test_prefix_sanitization() {
    assert_eq!(sanitize_prefix("Acme Corp"), "ACME");
    assert_eq!(sanitize_prefix("A1 Hotels & Spa"), "A1HO");
    assert_eq!(sanitize_prefix("ab"), "AB");
  }

  #[test]
  fn test_prefix_fallback_for_unusable_names() {
    assert_eq!(sanitize_prefix(""), "PTR");
    assert_eq!(sanitize_prefix("!!!"), "PTR");
    assert_eq!(sanitize_prefix("株式会社"), "PTR");
  }

  #[tokio::test]
  async fn test_generate_shape() {
    let db = test_db::setup().await;

    let code = Code::new(&db).generate("Acme Travel").await.unwrap();

    assert!(code.starts_with("ACME"));
    assert!((8..=10).contains(&code.len()));
    assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
  }

  #[tokio::test]
  async fn test_generate_avoids_existing_codes() {
    let db = test_db::setup().await;
    let partner = test_db::seed_partner(&db, PartnerStatus::Active).await;

    let code = Code::new(&db).generate("Acme Travel").await.unwrap();

    assert_ne!(code, partner.referral_code);
  }
}
