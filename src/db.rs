use migration::Migrator;

use crate::prelude::*;

/// Connect to the store and bring the schema up to date.
pub async fn connect(url: &str) -> Result<DatabaseConnection> {
  let db = Database::connect(url).await?;
  Migrator::up(&db, None).await?;

  info!("Database ready");
  Ok(db)
}
