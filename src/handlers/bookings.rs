// src/handlers/bookings.rs

use axum::{
    extract::{Path, State},
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
    models::booking::{Booking, BookingReservation, CreateBookingPayload},
};

// POST /api/bookings
#[utoipa::path(
    post,
    path = "/api/bookings",
    tag = "Bookings",
    request_body = CreateBookingPayload,
    responses(
        (status = 201, description = "Dossiê criado (e reserva, se houver prestador)", body = BookingReservation),
        (status = 400, description = "Campos inválidos ou horário não selecionado"),
        (status = 401, description = "Não autenticado"),
        (status = 409, description = "Horário já reservado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_booking(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateBookingPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let now = Local::now().naive_local();
    let reservation = app_state.booking_service.reserve(&user, payload, now).await?;

    Ok((StatusCode::CREATED, Json(reservation)))
}

// GET /api/bookings/{booking_id}
#[utoipa::path(
    get,
    path = "/api/bookings/{booking_id}",
    tag = "Bookings",
    responses(
        (status = 200, description = "Reserva", body = Booking),
        (status = 403, description = "Reserva de outra pessoa"),
        (status = 404, description = "Reserva não encontrada")
    ),
    params(("booking_id" = Uuid, Path, description = "ID da reserva")),
    security(("api_jwt" = []))
)]
pub async fn get_booking(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(booking_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let booking = app_state.booking_service.get_booking(&user, booking_id).await?;
    Ok(Json(booking))
}

// POST /api/bookings/{booking_id}/cancel
#[utoipa::path(
    post,
    path = "/api/bookings/{booking_id}/cancel",
    tag = "Bookings",
    responses(
        (status = 200, description = "Reserva cancelada", body = Booking),
        (status = 403, description = "Apenas administradores"),
        (status = 409, description = "Reserva já concluída ou cancelada")
    ),
    params(("booking_id" = Uuid, Path, description = "ID da reserva")),
    security(("api_jwt" = []))
)]
pub async fn cancel_booking(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(booking_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let booking = app_state
        .booking_service
        .cancel_booking(&user, booking_id)
        .await?;

    Ok(Json(booking))
}
