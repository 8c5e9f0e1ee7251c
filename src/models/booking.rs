// src/models/booking.rs

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::dossier::Dossier;

// Mapeia o CREATE TYPE booking_status do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Inquiry,
    Pending,
    Approved,
    DepositPaid,
    Scheduled,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Inquiry => "inquiry",
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
            BookingStatus::DepositPaid => "deposit_paid",
            BookingStatus::Scheduled => "scheduled",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    // Reservas encerradas não podem mais ser canceladas
    pub fn can_be_cancelled(&self) -> bool {
        !matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Representa uma linha da tabela 'bookings'
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub dossier_id: Option<Uuid>,
    pub client_id: Uuid,
    pub artist_id: Option<Uuid>,
    pub studio_id: Option<Uuid>,
    pub status: BookingStatus,

    // Início do horário reservado, no horário local do artista
    #[schema(value_type = Option<String>, example = "2026-11-02T10:00:00")]
    pub date: Option<NaiveDateTime>,

    // Centavos
    #[schema(example = 5000)]
    pub deposit_amount: i64,
    pub total_price: Option<i64>,

    // ID da PaymentIntent no gateway
    #[schema(example = "pi_3Nv...")]
    pub payment_reference: Option<String>,

    pub created_at: DateTime<Utc>,
}

// Dados para inserir uma reserva (sem id nem timestamps)
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub dossier_id: Option<Uuid>,
    pub client_id: Uuid,
    pub artist_id: Option<Uuid>,
    pub studio_id: Option<Uuid>,
    pub status: BookingStatus,
    pub date: Option<NaiveDateTime>,
    pub deposit_amount: i64,
    pub payment_reference: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[default]
    Artist,
    Studio,
}

// POST /api/bookings
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_budget_range"))]
pub struct CreateBookingPayload {
    #[validate(length(min = 1, max = 200, message = "O título é obrigatório (máx. 200 caracteres)."))]
    #[schema(example = "Fechamento de braço cyberpunk")]
    pub title: String,

    #[validate(length(min = 1, max = 5000, message = "A descrição é obrigatória."))]
    pub description: String,

    #[validate(length(min = 1, max = 100, message = "Informe a região do corpo."))]
    #[schema(example = "Arm")]
    pub body_zone: String,

    #[validate(range(min = 0, message = "O orçamento mínimo não pode ser negativo."))]
    #[schema(example = 100)]
    pub budget_min: i32,

    #[validate(range(min = 0, message = "O orçamento máximo não pode ser negativo."))]
    #[schema(example = 500)]
    pub budget_max: i32,

    // URLs de imagens já enviadas ao storage
    #[serde(default)]
    #[validate(length(max = 10, message = "Máximo de 10 imagens de referência."))]
    pub concept_images: Vec<String>,

    // Sem prestador: o dossiê vira um pedido público no marketplace
    pub provider_id: Option<Uuid>,

    #[serde(default)]
    pub provider_kind: ProviderKind,

    #[schema(value_type = Option<String>, example = "2026-11-02T10:00:00")]
    pub slot_date_time: Option<NaiveDateTime>,
}

fn validate_budget_range(payload: &CreateBookingPayload) -> Result<(), ValidationError> {
    if payload.budget_max < payload.budget_min {
        let mut err = ValidationError::new("budget_range");
        err.message = Some("O orçamento máximo deve ser maior ou igual ao mínimo.".into());
        return Err(err);
    }
    Ok(())
}

// Resposta do fluxo de reserva
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingReservation {
    pub dossier: Dossier,
    pub booking: Option<Booking>,
    // Usado pelo front para confirmar o pagamento do sinal
    pub client_secret: Option<String>,
}
