// src/db/dossier_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::store::DossierStore,
    models::dossier::{Dossier, DossierStatus, NewDossier},
};

#[derive(Clone)]
pub struct DossierRepository {
    pool: PgPool,
}

impl DossierRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DossierStore for DossierRepository {
    async fn insert(&self, dossier: NewDossier) -> Result<Dossier, AppError> {
        let created = sqlx::query_as::<_, Dossier>(
            r#"
            INSERT INTO dossiers (
                client_id, studio_id, title, description, body_zone,
                budget_min, budget_max, concept_images, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(dossier.client_id)
        .bind(dossier.studio_id)
        .bind(dossier.title)
        .bind(dossier.description)
        .bind(dossier.body_zone)
        .bind(dossier.budget_min)
        .bind(dossier.budget_max)
        .bind(dossier.concept_images)
        .bind(dossier.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update_status(
        &self,
        dossier_id: Uuid,
        status: DossierStatus,
    ) -> Result<Dossier, AppError> {
        let updated = sqlx::query_as::<_, Dossier>(
            r#"
            UPDATE dossiers
            SET status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(dossier_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }
}
