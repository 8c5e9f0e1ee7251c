// src/services/slot_generator.rs

//! Gerador de horários.
//!
//! Funções puras: recebem as regras semanais recorrentes do artista e as
//! reservas existentes e projetam os horários de um dia. Nada aqui toca o
//! banco, então o mesmo resultado sai para as mesmas entradas.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};

use crate::models::{
    availability::{AvailabilityRule, CalendarDay, TimeSlot},
    booking::{Booking, BookingStatus},
};

// Como uma reserva bloqueia um horário
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Bloqueia só o horário com a mesma data e o mesmo HH:MM.
    #[default]
    ExactStart,
    /// Bloqueia qualquer horário cujo intervalo cruze o intervalo da reserva.
    Overlap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotOptions {
    pub slot_duration_minutes: i64,
    pub collision: CollisionPolicy,
}

impl Default for SlotOptions {
    fn default() -> Self {
        Self {
            slot_duration_minutes: 60,
            collision: CollisionPolicy::ExactStart,
        }
    }
}

// 0 = Domingo, igual à coluna day_of_week
pub fn day_of_week(date: NaiveDate) -> i16 {
    date.weekday().num_days_from_sunday() as i16
}

/// Primeira regra recorrente do dia da semana, na ordem recebida.
pub fn rule_for_date(rules: &[AvailabilityRule], date: NaiveDate) -> Option<&AvailabilityRule> {
    let weekday = day_of_week(date);
    rules
        .iter()
        .find(|r| r.is_recurring && r.day_of_week == Some(weekday))
}

pub fn generate_slots(
    rules: &[AvailabilityRule],
    bookings: &[Booking],
    date: NaiveDate,
    options: &SlotOptions,
) -> Vec<TimeSlot> {
    let Some(rule) = rule_for_date(rules, date) else {
        return Vec::new();
    };

    if options.slot_duration_minutes <= 0 {
        return Vec::new();
    }
    let Some(step) = Duration::try_minutes(options.slot_duration_minutes) else {
        return Vec::new();
    };

    // Trabalhamos com data+hora para o passo nunca "dar a volta" na meia-noite
    let end = date.and_time(rule.end_time);

    let taken: Vec<NaiveDateTime> = bookings
        .iter()
        .filter(|b| b.status != BookingStatus::Cancelled)
        .filter_map(|b| b.date)
        .collect();

    // Um horário entra se começa antes do fim da janela, mesmo que termine depois dele
    let mut slots = Vec::new();
    let mut next = Some(date.and_time(rule.start_time));
    while let Some(current) = next.filter(|c| *c < end) {
        let blocked = taken
            .iter()
            .any(|booked| collides(*booked, current, step, options.collision));

        slots.push(TimeSlot {
            time: current.time(),
            available: !blocked,
        });

        next = current.checked_add_signed(step);
    }

    slots
}

/// Verdadeiro se `at` é exatamente o início de um horário gerado para aquele dia.
pub fn is_slot_start(rules: &[AvailabilityRule], at: NaiveDateTime, options: &SlotOptions) -> bool {
    let date = at.date();
    generate_slots(rules, &[], date, options)
        .iter()
        .any(|slot| date.and_time(slot.time) == at)
}

fn collides(
    booked: NaiveDateTime,
    slot_start: NaiveDateTime,
    step: Duration,
    policy: CollisionPolicy,
) -> bool {
    match policy {
        CollisionPolicy::ExactStart => {
            booked.date() == slot_start.date()
                && booked.hour() == slot_start.hour()
                && booked.minute() == slot_start.minute()
        }
        // Fim além do maior instante representável conta como "infinito"
        CollisionPolicy::Overlap => {
            slot_start.checked_add_signed(step).is_none_or(|slot_end| booked < slot_end)
                && booked.checked_add_signed(step).is_none_or(|booked_end| slot_start < booked_end)
        }
    }
}

/// Um dia pode ser escolhido se não está no passado e tem regra recorrente.
pub fn is_selectable(rules: &[AvailabilityRule], date: NaiveDate, today: NaiveDate) -> bool {
    date >= today && rule_for_date(rules, date).is_some()
}

pub fn calendar(
    rules: &[AvailabilityRule],
    from: NaiveDate,
    days: u32,
    today: NaiveDate,
) -> Vec<CalendarDay> {
    from.iter_days()
        .take(days as usize)
        .map(|date| CalendarDay {
            date,
            selectable: is_selectable(rules, date, today),
        })
        .collect()
}
