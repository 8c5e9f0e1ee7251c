// src/db/store.rs

//! Contratos da "Availability Store".
//!
//! Os serviços dependem destes traits, não do Postgres diretamente.
//! Isso permite trocar o banco por implementações em memória nos testes.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        availability::{AvailabilityRule, WeeklyWindow},
        booking::{Booking, BookingStatus, NewBooking},
        dossier::{Dossier, DossierStatus, NewDossier},
    },
};

#[async_trait]
pub trait AvailabilityStore: Send + Sync {
    /// Regras recorrentes do artista, ordenadas por (dia, início, criação).
    async fn list_recurring(&self, artist_id: Uuid) -> Result<Vec<AvailabilityRule>, AppError>;

    /// Substitui TODAS as regras recorrentes do artista pelo conjunto informado.
    async fn replace_recurring(
        &self,
        artist_id: Uuid,
        windows: &[WeeklyWindow],
    ) -> Result<Vec<AvailabilityRule>, AppError>;
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Reservas com data em [from, to) do artista, exceto as canceladas.
    async fn list_scheduled(
        &self,
        artist_id: Uuid,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Booking>, AppError>;

    /// Retorna `AppError::SlotTaken` se o horário do artista já estiver ocupado.
    async fn insert(&self, booking: NewBooking) -> Result<Booking, AppError>;

    async fn find_by_id(&self, booking_id: Uuid) -> Result<Option<Booking>, AppError>;

    async fn update_status(
        &self,
        booking_id: Uuid,
        status: BookingStatus,
    ) -> Result<Booking, AppError>;
}

#[async_trait]
pub trait DossierStore: Send + Sync {
    async fn insert(&self, dossier: NewDossier) -> Result<Dossier, AppError>;

    async fn update_status(
        &self,
        dossier_id: Uuid,
        status: DossierStatus,
    ) -> Result<Dossier, AppError>;
}
