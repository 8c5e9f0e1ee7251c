// src/db/booking_repo.rs

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::store::BookingStore,
    models::booking::{Booking, BookingStatus, NewBooking},
};

// Índice único parcial (artist_id, date) criado na migração
const SLOT_UNIQUE_INDEX: &str = "bookings_artist_slot_unique";

#[derive(Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for BookingRepository {
    async fn list_scheduled(
        &self,
        artist_id: Uuid,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE artist_id = $1
              AND date IS NOT NULL
              AND date >= $2 AND date < $3
              AND status <> 'cancelled'
            ORDER BY date ASC
            "#,
        )
        .bind(artist_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    async fn insert(&self, booking: NewBooking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (
                dossier_id, client_id, artist_id, studio_id, status,
                date, deposit_amount, payment_reference
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(booking.dossier_id)
        .bind(booking.client_id)
        .bind(booking.artist_id)
        .bind(booking.studio_id)
        .bind(booking.status)
        .bind(booking.date)
        .bind(booking.deposit_amount)
        .bind(booking.payment_reference)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Violação do índice de horário vira um erro tipado
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some(SLOT_UNIQUE_INDEX) {
                    return AppError::SlotTaken;
                }
            }
            AppError::DatabaseError(e)
        })
    }

    async fn find_by_id(&self, booking_id: Uuid) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }

    async fn update_status(
        &self,
        booking_id: Uuid,
        status: BookingStatus,
    ) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>("UPDATE bookings SET status = $1 WHERE id = $2 RETURNING *")
            .bind(status)
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::BookingNotFound)
    }
}
