// src/services/availability_service.rs

use std::{collections::HashSet, sync::Arc};

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AvailabilityStore, BookingStore},
    models::{
        auth::CurrentUser,
        availability::{AvailabilityRule, CalendarDay, DaySlots, WeeklyWindow},
    },
    services::slot_generator::{self, SlotOptions},
};

pub const MAX_CALENDAR_DAYS: u32 = 62;

#[derive(Clone)]
pub struct AvailabilityService {
    availability_store: Arc<dyn AvailabilityStore>,
    booking_store: Arc<dyn BookingStore>,
    slot_options: SlotOptions,
}

impl AvailabilityService {
    pub fn new(
        availability_store: Arc<dyn AvailabilityStore>,
        booking_store: Arc<dyn BookingStore>,
        slot_options: SlotOptions,
    ) -> Self {
        Self {
            availability_store,
            booking_store,
            slot_options,
        }
    }

    pub async fn list_rules(&self, artist_id: Uuid) -> Result<Vec<AvailabilityRule>, AppError> {
        self.availability_store.list_recurring(artist_id).await
    }

    /// Horários de um dia. `today` vem do chamador para manter o cálculo determinístico.
    pub async fn day_slots(
        &self,
        artist_id: Uuid,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<DaySlots, AppError> {
        let rules = self.availability_store.list_recurring(artist_id).await?;

        // Dia sem regra: nem consulta as reservas
        if slot_generator::rule_for_date(&rules, date).is_none() {
            return Ok(DaySlots {
                date,
                selectable: false,
                slots: Vec::new(),
            });
        }

        let day_start = date.and_time(NaiveTime::MIN);
        // Margem de um slot antes do dia para o modo de sobreposição.
        // Nas pontas do calendário representável a janela é truncada.
        let margin = Duration::try_minutes(self.slot_options.slot_duration_minutes.max(0))
            .unwrap_or_else(Duration::zero);
        let from = day_start.checked_sub_signed(margin).unwrap_or(day_start);
        let to = day_start
            .checked_add_signed(Duration::days(1))
            .unwrap_or(NaiveDateTime::MAX);
        let bookings = self.booking_store.list_scheduled(artist_id, from, to).await?;

        let slots = slot_generator::generate_slots(&rules, &bookings, date, &self.slot_options);

        Ok(DaySlots {
            date,
            selectable: slot_generator::is_selectable(&rules, date, today),
            slots,
        })
    }

    pub async fn calendar(
        &self,
        artist_id: Uuid,
        from: NaiveDate,
        days: u32,
        today: NaiveDate,
    ) -> Result<Vec<CalendarDay>, AppError> {
        if days == 0 || days > MAX_CALENDAR_DAYS {
            return Err(AppError::ValidationFailed(format!(
                "A janela do calendário deve ter entre 1 e {} dias.",
                MAX_CALENDAR_DAYS
            )));
        }

        let rules = self.availability_store.list_recurring(artist_id).await?;
        Ok(slot_generator::calendar(&rules, from, days, today))
    }

    /// Editor de disponibilidade: substitui a semana inteira do artista.
    pub async fn set_availability(
        &self,
        user: &CurrentUser,
        artist_id: Uuid,
        windows: Vec<WeeklyWindow>,
    ) -> Result<Vec<AvailabilityRule>, AppError> {
        if user.id != artist_id && !user.is_admin() {
            return Err(AppError::Forbidden);
        }

        validate_week(&windows)?;

        let rules = self
            .availability_store
            .replace_recurring(artist_id, &windows)
            .await?;

        tracing::info!(
            "📅 Agenda semanal do artista {} atualizada ({} dias ativos)",
            artist_id,
            rules.len()
        );

        Ok(rules)
    }
}

fn validate_week(windows: &[WeeklyWindow]) -> Result<(), AppError> {
    let mut seen = HashSet::new();

    for window in windows {
        if !(0..=6).contains(&window.day_of_week) {
            return Err(AppError::InvalidAvailability(format!(
                "Dia da semana inválido: {}",
                window.day_of_week
            )));
        }
        if window.start_time >= window.end_time {
            return Err(AppError::InvalidAvailability(format!(
                "O início ({}) deve ser anterior ao fim ({}) no dia {}.",
                window.start_time.format("%H:%M"),
                window.end_time.format("%H:%M"),
                window.day_of_week
            )));
        }
        if !seen.insert(window.day_of_week) {
            return Err(AppError::InvalidAvailability(format!(
                "O dia {} aparece mais de uma vez.",
                window.day_of_week
            )));
        }
    }

    Ok(())
}
