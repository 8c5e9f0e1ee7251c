//! Helpers for integration tests: in-memory stores and a scripted payment gateway.

#![allow(dead_code)]

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use uuid::Uuid;

use tattoo_agenda::{
    common::error::AppError,
    config::{AppConfig, AppState},
    db::{AvailabilityStore, BookingStore, DossierStore},
    models::{
        availability::{AvailabilityRule, WeeklyWindow},
        booking::{Booking, BookingStatus, NewBooking},
        dossier::{Dossier, DossierStatus, NewDossier},
    },
    services::payment::{DepositIntent, PaymentGateway},
};

pub const JWT_SECRET: &str = "segredo-dos-testes";

#[derive(Default)]
struct State {
    rules: Vec<AvailabilityRule>,
    bookings: Vec<Booking>,
    dossiers: Vec<Dossier>,
}

/// Store em memória que imita os índices únicos do Postgres.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    pub fail_dossier_insert: Mutex<bool>,
    pub fail_booking_insert: Mutex<bool>,
    pub fail_availability_insert: Mutex<bool>,
    pub dossier_inserts: AtomicUsize,
    pub booking_inserts: AtomicUsize,
    pub store_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn bookings(&self) -> Vec<Booking> {
        self.state.lock().unwrap().bookings.clone()
    }

    pub fn dossiers(&self) -> Vec<Dossier> {
        self.state.lock().unwrap().dossiers.clone()
    }

    pub fn rules(&self) -> Vec<AvailabilityRule> {
        self.state.lock().unwrap().rules.clone()
    }

    pub fn seed_rule(&self, artist_id: Uuid, day_of_week: i16, start: &str, end: &str) {
        self.state.lock().unwrap().rules.push(AvailabilityRule {
            id: Uuid::new_v4(),
            artist_id,
            day_of_week: Some(day_of_week),
            start_time: hm(start),
            end_time: hm(end),
            is_recurring: true,
            specific_date: None,
            created_at: Utc::now(),
        });
    }

    pub fn seed_booking(&self, artist_id: Uuid, at: NaiveDateTime, status: BookingStatus) -> Booking {
        let booking = Booking {
            id: Uuid::new_v4(),
            dossier_id: None,
            client_id: Uuid::new_v4(),
            artist_id: Some(artist_id),
            studio_id: None,
            status,
            date: Some(at),
            deposit_amount: 5000,
            total_price: None,
            payment_reference: None,
            created_at: Utc::now(),
        };
        self.state.lock().unwrap().bookings.push(booking.clone());
        booking
    }

    fn touch(&self) {
        self.store_calls.fetch_add(1, Ordering::SeqCst);
    }
}

fn simulated_failure(what: &str) -> AppError {
    AppError::InternalServerError(anyhow::anyhow!("falha simulada: {}", what))
}

#[async_trait]
impl AvailabilityStore for MemoryStore {
    async fn list_recurring(&self, artist_id: Uuid) -> Result<Vec<AvailabilityRule>, AppError> {
        self.touch();
        let mut rules: Vec<AvailabilityRule> = self
            .state
            .lock()
            .unwrap()
            .rules
            .iter()
            .filter(|r| r.artist_id == artist_id && r.is_recurring)
            .cloned()
            .collect();
        rules.sort_by_key(|r| (r.day_of_week, r.start_time, r.created_at));
        Ok(rules)
    }

    async fn replace_recurring(
        &self,
        artist_id: Uuid,
        windows: &[WeeklyWindow],
    ) -> Result<Vec<AvailabilityRule>, AppError> {
        self.touch();
        // Mesma atomicidade da transação do Postgres: falhou, nada muda
        if *self.fail_availability_insert.lock().unwrap() {
            return Err(simulated_failure("insert artist_availability"));
        }

        let mut state = self.state.lock().unwrap();
        state
            .rules
            .retain(|r| !(r.artist_id == artist_id && r.is_recurring));

        let inserted: Vec<AvailabilityRule> = windows
            .iter()
            .map(|w| AvailabilityRule {
                id: Uuid::new_v4(),
                artist_id,
                day_of_week: Some(w.day_of_week),
                start_time: w.start_time,
                end_time: w.end_time,
                is_recurring: true,
                specific_date: None,
                created_at: Utc::now(),
            })
            .collect();
        state.rules.extend(inserted.iter().cloned());
        Ok(inserted)
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn list_scheduled(
        &self,
        artist_id: Uuid,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Booking>, AppError> {
        self.touch();
        Ok(self
            .state
            .lock()
            .unwrap()
            .bookings
            .iter()
            .filter(|b| b.artist_id == Some(artist_id) && b.status != BookingStatus::Cancelled)
            .filter(|b| matches!(b.date, Some(d) if d >= from && d < to))
            .cloned()
            .collect())
    }

    async fn insert(&self, booking: NewBooking) -> Result<Booking, AppError> {
        self.touch();
        self.booking_inserts.fetch_add(1, Ordering::SeqCst);
        if *self.fail_booking_insert.lock().unwrap() {
            return Err(simulated_failure("insert bookings"));
        }

        let mut state = self.state.lock().unwrap();
        let taken = state.bookings.iter().any(|b| {
            b.status != BookingStatus::Cancelled
                && b.artist_id.is_some()
                && b.artist_id == booking.artist_id
                && b.date.is_some()
                && b.date == booking.date
        });
        if taken {
            return Err(AppError::SlotTaken);
        }

        let created = Booking {
            id: Uuid::new_v4(),
            dossier_id: booking.dossier_id,
            client_id: booking.client_id,
            artist_id: booking.artist_id,
            studio_id: booking.studio_id,
            status: booking.status,
            date: booking.date,
            deposit_amount: booking.deposit_amount,
            total_price: None,
            payment_reference: booking.payment_reference,
            created_at: Utc::now(),
        };
        state.bookings.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, booking_id: Uuid) -> Result<Option<Booking>, AppError> {
        self.touch();
        Ok(self
            .state
            .lock()
            .unwrap()
            .bookings
            .iter()
            .find(|b| b.id == booking_id)
            .cloned())
    }

    async fn update_status(
        &self,
        booking_id: Uuid,
        status: BookingStatus,
    ) -> Result<Booking, AppError> {
        self.touch();
        let mut state = self.state.lock().unwrap();
        let booking = state
            .bookings
            .iter_mut()
            .find(|b| b.id == booking_id)
            .ok_or(AppError::BookingNotFound)?;
        booking.status = status;
        Ok(booking.clone())
    }
}

#[async_trait]
impl DossierStore for MemoryStore {
    async fn insert(&self, dossier: NewDossier) -> Result<Dossier, AppError> {
        self.touch();
        self.dossier_inserts.fetch_add(1, Ordering::SeqCst);
        if *self.fail_dossier_insert.lock().unwrap() {
            return Err(simulated_failure("insert dossiers"));
        }

        let now = Utc::now();
        let created = Dossier {
            id: Uuid::new_v4(),
            client_id: dossier.client_id,
            studio_id: dossier.studio_id,
            title: dossier.title,
            description: dossier.description,
            body_zone: dossier.body_zone,
            size_cm: None,
            budget_min: dossier.budget_min,
            budget_max: dossier.budget_max,
            concept_images: dossier.concept_images,
            status: dossier.status,
            created_at: now,
            updated_at: now,
        };
        self.state.lock().unwrap().dossiers.push(created.clone());
        Ok(created)
    }

    async fn update_status(
        &self,
        dossier_id: Uuid,
        status: DossierStatus,
    ) -> Result<Dossier, AppError> {
        self.touch();
        let mut state = self.state.lock().unwrap();
        let dossier = state
            .dossiers
            .iter_mut()
            .find(|d| d.id == dossier_id)
            .ok_or_else(|| simulated_failure("dossiê inexistente"))?;
        dossier.status = status;
        dossier.updated_at = Utc::now();
        Ok(dossier.clone())
    }
}

/// Gateway que responde com sucesso ou falha, registrando as chamadas.
pub struct ScriptedGateway {
    pub fail: bool,
    pub calls: AtomicUsize,
    pub last_metadata: Mutex<Option<BTreeMap<String, String>>>,
    pub last_amount: Mutex<Option<(i64, String)>>,
}

impl ScriptedGateway {
    pub fn succeeding() -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            calls: AtomicUsize::new(0),
            last_metadata: Mutex::new(None),
            last_amount: Mutex::new(None),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            calls: AtomicUsize::new(0),
            last_metadata: Mutex::new(None),
            last_amount: Mutex::new(None),
        })
    }
}

#[async_trait]
impl PaymentGateway for ScriptedGateway {
    async fn create_deposit_intent(
        &self,
        amount_minor_units: i64,
        currency: &str,
        metadata: &BTreeMap<String, String>,
    ) -> Result<DepositIntent, AppError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last_metadata.lock().unwrap() = Some(metadata.clone());
        *self.last_amount.lock().unwrap() = Some((amount_minor_units, currency.to_string()));

        if self.fail {
            return Err(AppError::PaymentIntentFailed("card_error (simulado)".into()));
        }

        Ok(DepositIntent {
            id: format!("pi_test_{}", n),
            client_secret: format!("pi_test_{}_secret_abc", n),
        })
    }
}

pub fn test_config(extra: &[(&str, &str)]) -> AppConfig {
    let mut pairs: Vec<(String, String)> = vec![
        ("DATABASE_URL".into(), "postgres://unused".into()),
        ("JWT_SECRET".into(), JWT_SECRET.into()),
        ("STRIPE_SECRET_KEY".into(), "sk_test_unused".into()),
    ];
    pairs.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));

    AppConfig::from_lookup(|key| {
        pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
    .expect("test config")
}

pub fn test_state(
    store: Arc<MemoryStore>,
    gateway: Arc<ScriptedGateway>,
    extra: &[(&str, &str)],
) -> AppState {
    AppState::from_parts(
        test_config(extra),
        store.clone(),
        store.clone(),
        store,
        gateway,
    )
}

pub fn hm(value: &str) -> NaiveTime {
    tattoo_agenda::common::time_format::parse_time_of_day(value).expect("horário de teste")
}

/// Segunda-feira bem no futuro, para não esbarrar na regra de "horário passado".
pub fn future_monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2031, 6, 2).unwrap()
}
