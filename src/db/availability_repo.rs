// src/db/availability_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::store::AvailabilityStore,
    models::availability::{AvailabilityRule, WeeklyWindow},
};

// Responsável pela tabela 'artist_availability'
#[derive(Clone)]
pub struct AvailabilityRepository {
    pool: PgPool,
}

impl AvailabilityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityStore for AvailabilityRepository {
    async fn list_recurring(&self, artist_id: Uuid) -> Result<Vec<AvailabilityRule>, AppError> {
        let rules = sqlx::query_as::<_, AvailabilityRule>(
            r#"
            SELECT * FROM artist_availability
            WHERE artist_id = $1 AND is_recurring = TRUE
            ORDER BY day_of_week ASC, start_time ASC, created_at ASC
            "#,
        )
        .bind(artist_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rules)
    }

    async fn replace_recurring(
        &self,
        artist_id: Uuid,
        windows: &[WeeklyWindow],
    ) -> Result<Vec<AvailabilityRule>, AppError> {
        // --- INÍCIO DA TRANSAÇÃO ---
        // Delete + insert juntos: se o insert falhar, o rollback devolve a agenda antiga.
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query(
            "DELETE FROM artist_availability WHERE artist_id = $1 AND is_recurring = TRUE",
        )
        .bind(artist_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let mut inserted = Vec::with_capacity(windows.len());
        for window in windows {
            let rule = sqlx::query_as::<_, AvailabilityRule>(
                r#"
                INSERT INTO artist_availability (artist_id, day_of_week, start_time, end_time, is_recurring)
                VALUES ($1, $2, $3, $4, TRUE)
                RETURNING *
                "#,
            )
            .bind(artist_id)
            .bind(window.day_of_week)
            .bind(window.start_time)
            .bind(window.end_time)
            .fetch_one(&mut *tx)
            .await?;

            inserted.push(rule);
        }

        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        tracing::debug!(
            "Agenda do artista {} substituída ({} removidas, {} inseridas)",
            artist_id,
            removed,
            inserted.len()
        );

        inserted.sort_by_key(|r| (r.day_of_week, r.start_time));
        Ok(inserted)
    }
}
