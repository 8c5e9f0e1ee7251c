// src/models/dossier.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Mapeia o CREATE TYPE dossier_status do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "dossier_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DossierStatus {
    Draft,
    Open,
    InProgress,
    Completed,
    Archived,
}

// O pedido de projeto do cliente
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dossier {
    pub id: Uuid,
    pub client_id: Uuid,
    pub studio_id: Option<Uuid>,

    #[schema(example = "Dragão japonês no antebraço")]
    pub title: String,
    pub description: String,

    // Região do corpo
    #[schema(example = "Arm")]
    pub body_zone: Option<String>,
    pub size_cm: Option<String>,

    pub budget_min: Option<i32>,
    pub budget_max: Option<i32>,

    pub concept_images: Vec<String>,
    pub status: DossierStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDossier {
    pub client_id: Uuid,
    pub studio_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub body_zone: Option<String>,
    pub budget_min: Option<i32>,
    pub budget_max: Option<i32>,
    pub concept_images: Vec<String>,
    pub status: DossierStatus,
}
