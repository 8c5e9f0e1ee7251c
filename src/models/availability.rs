// src/models/availability.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::time_format;

// Representa uma linha da tabela 'artist_availability'
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRule {
    pub id: Uuid,
    pub artist_id: Uuid,

    // 0 = Domingo ... 6 = Sábado. Nulo apenas para regras pontuais.
    #[schema(example = 1)]
    pub day_of_week: Option<i16>,

    #[serde(with = "time_format::time_of_day")]
    #[schema(value_type = String, example = "09:00:00")]
    pub start_time: NaiveTime,

    #[serde(with = "time_format::time_of_day")]
    #[schema(value_type = String, example = "17:00:00")]
    pub end_time: NaiveTime,

    pub is_recurring: bool,

    // Só para regras pontuais (fora do gerador de horários)
    pub specific_date: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
}

// Um dia habilitado na semana do artista, como enviado pelo editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyWindow {
    #[validate(range(min = 0, max = 6, message = "O dia da semana deve estar entre 0 (domingo) e 6 (sábado)."))]
    #[schema(example = 1)]
    pub day_of_week: i16,

    #[serde(with = "time_format::time_of_day")]
    #[schema(value_type = String, example = "09:00")]
    pub start_time: NaiveTime,

    #[serde(with = "time_format::time_of_day")]
    #[schema(value_type = String, example = "17:00")]
    pub end_time: NaiveTime,
}

// PUT /api/availability/{artist_id}
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetAvailabilityPayload {
    // Dias ausentes ficam indisponíveis.
    #[validate(length(max = 7, message = "A semana tem no máximo 7 dias."))]
    #[validate(nested)]
    pub windows: Vec<WeeklyWindow>,
}

// Horário derivado (nunca persistido)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    #[serde(with = "time_format::hour_minute")]
    #[schema(value_type = String, example = "10:00")]
    pub time: NaiveTime,
    pub available: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DaySlots {
    pub date: NaiveDate,
    // Falso para datas passadas ou dias sem regra
    pub selectable: bool,
    pub slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub selectable: bool,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SlotsQuery {
    /// Data no formato YYYY-MM-DD
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CalendarQuery {
    /// Primeiro dia da janela (padrão: hoje)
    pub from: Option<NaiveDate>,
    /// Quantidade de dias (padrão 31, máximo 62)
    pub days: Option<u32>,
}
