// src/handlers/availability.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Local;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::availability::{
        AvailabilityRule, CalendarDay, CalendarQuery, DaySlots, SetAvailabilityPayload, SlotsQuery,
    },
};

// GET /api/availability/{artist_id}
#[utoipa::path(
    get,
    path = "/api/availability/{artist_id}",
    tag = "Availability",
    responses(
        (status = 200, description = "Regras semanais recorrentes", body = [AvailabilityRule])
    ),
    params(("artist_id" = Uuid, Path, description = "ID do artista"))
)]
pub async fn list_rules(
    State(app_state): State<AppState>,
    Path(artist_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let rules = app_state.availability_service.list_rules(artist_id).await?;
    Ok(Json(rules))
}

// GET /api/availability/{artist_id}/slots?date=YYYY-MM-DD
#[utoipa::path(
    get,
    path = "/api/availability/{artist_id}/slots",
    tag = "Availability",
    responses(
        (status = 200, description = "Horários do dia (vazio se o artista não atende)", body = DaySlots)
    ),
    params(
        ("artist_id" = Uuid, Path, description = "ID do artista"),
        SlotsQuery
    )
)]
pub async fn get_slots(
    State(app_state): State<AppState>,
    Path(artist_id): Path<Uuid>,
    Query(query): Query<SlotsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let today = Local::now().date_naive();

    let day = app_state
        .availability_service
        .day_slots(artist_id, query.date, today)
        .await?;

    Ok(Json(day))
}

// GET /api/availability/{artist_id}/calendar?from=YYYY-MM-DD&days=N
#[utoipa::path(
    get,
    path = "/api/availability/{artist_id}/calendar",
    tag = "Availability",
    responses(
        (status = 200, description = "Dias selecionáveis na janela", body = [CalendarDay])
    ),
    params(
        ("artist_id" = Uuid, Path, description = "ID do artista"),
        CalendarQuery
    )
)]
pub async fn get_calendar(
    State(app_state): State<AppState>,
    Path(artist_id): Path<Uuid>,
    Query(query): Query<CalendarQuery>,
) -> Result<impl IntoResponse, AppError> {
    let today = Local::now().date_naive();

    let days = app_state
        .availability_service
        .calendar(
            artist_id,
            query.from.unwrap_or(today),
            query.days.unwrap_or(31),
            today,
        )
        .await?;

    Ok(Json(days))
}

// PUT /api/availability/{artist_id}
#[utoipa::path(
    put,
    path = "/api/availability/{artist_id}",
    tag = "Availability",
    request_body = SetAvailabilityPayload,
    responses(
        (status = 200, description = "Semana substituída", body = [AvailabilityRule]),
        (status = 400, description = "Janelas inválidas"),
        (status = 403, description = "Agenda de outro artista")
    ),
    params(("artist_id" = Uuid, Path, description = "ID do artista")),
    security(("api_jwt" = []))
)]
pub async fn set_availability(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(artist_id): Path<Uuid>,
    Json(payload): Json<SetAvailabilityPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let rules = app_state
        .availability_service
        .set_availability(&user, artist_id, payload.windows)
        .await?;

    Ok((StatusCode::OK, Json(rules)))
}
