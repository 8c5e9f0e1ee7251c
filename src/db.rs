pub mod store;
pub use store::{AvailabilityStore, BookingStore, DossierStore};
pub mod availability_repo;
pub use availability_repo::AvailabilityRepository;
pub mod booking_repo;
pub use booking_repo::BookingRepository;
pub mod dossier_repo;
pub use dossier_repo::DossierRepository;

use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::DatabaseConfig;

// Cria a pool de conexões com o Postgres
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.url)
        .await?;

    tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
    Ok(pool)
}
