// src/services/booking_service.rs

use std::{collections::BTreeMap, sync::Arc};

use chrono::{NaiveDateTime, Timelike};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AvailabilityStore, BookingStore, DossierStore},
    models::{
        auth::CurrentUser,
        booking::{
            Booking, BookingReservation, BookingStatus, CreateBookingPayload, NewBooking,
            ProviderKind,
        },
        dossier::{DossierStatus, NewDossier},
    },
    services::{
        payment::PaymentGateway,
        slot_generator::{self, SlotOptions},
    },
};

// Regras do sinal. O "degrade" do gateway é uma política nomeada, não um acidente.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingPolicy {
    pub deposit_amount: i64,
    pub currency: String,
    pub proceed_without_payment_on_gateway_failure: bool,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            deposit_amount: 5000,
            currency: "usd".to_string(),
            proceed_without_payment_on_gateway_failure: true,
        }
    }
}

#[derive(Clone)]
pub struct BookingService {
    availability_store: Arc<dyn AvailabilityStore>,
    dossier_store: Arc<dyn DossierStore>,
    booking_store: Arc<dyn BookingStore>,
    payment_gateway: Arc<dyn PaymentGateway>,
    policy: BookingPolicy,
    slot_options: SlotOptions,
}

impl BookingService {
    pub fn new(
        availability_store: Arc<dyn AvailabilityStore>,
        dossier_store: Arc<dyn DossierStore>,
        booking_store: Arc<dyn BookingStore>,
        payment_gateway: Arc<dyn PaymentGateway>,
        policy: BookingPolicy,
        slot_options: SlotOptions,
    ) -> Self {
        Self {
            availability_store,
            dossier_store,
            booking_store,
            payment_gateway,
            policy,
            slot_options,
        }
    }

    /// LÓGICA DE NEGÓCIO: cria o dossiê e, se houver prestador, a reserva com sinal.
    ///
    /// Não é uma transação: cada passo é uma chamada independente à loja ou ao
    /// gateway, executada em ordem. Um dossiê criado permanece mesmo se um passo
    /// posterior falhar.
    pub async fn reserve(
        &self,
        client: &CurrentUser,
        payload: CreateBookingPayload,
        now: NaiveDateTime,
    ) -> Result<BookingReservation, AppError> {
        // 0. Pré-condições do lado do chamador (nenhuma escrita ainda)
        if let Some(provider_id) = payload.provider_id {
            self.ensure_bookable_slot(provider_id, &payload, now).await?;
        }

        let studio_id = match (payload.provider_id, payload.provider_kind) {
            (Some(id), ProviderKind::Studio) => Some(id),
            _ => None,
        };

        // 1. Dossiê em rascunho
        let dossier = self
            .dossier_store
            .insert(NewDossier {
                client_id: client.id,
                studio_id,
                title: payload.title,
                description: payload.description,
                body_zone: Some(payload.body_zone),
                budget_min: Some(payload.budget_min),
                budget_max: Some(payload.budget_max),
                concept_images: payload.concept_images,
                status: DossierStatus::Draft,
            })
            .await
            .map_err(|e| {
                tracing::error!("Falha ao inserir dossiê do cliente {}: {}", client.id, e);
                AppError::DossierCreationFailed(e.to_string())
            })?;

        // 2. Sem prestador: pedido público no marketplace
        let Some(provider_id) = payload.provider_id else {
            let dossier = self
                .dossier_store
                .update_status(dossier.id, DossierStatus::Open)
                .await
                .map_err(|e| {
                    tracing::error!("Falha ao publicar o dossiê {}: {}", dossier.id, e);
                    AppError::DossierCreationFailed(e.to_string())
                })?;

            tracing::info!("📢 Dossiê {} publicado no marketplace", dossier.id);
            return Ok(BookingReservation {
                dossier,
                booking: None,
                client_secret: None,
            });
        };

        // 3. Intenção de pagamento do sinal
        let metadata = BTreeMap::from([
            ("booking_id".to_string(), "pending_creation".to_string()),
            ("dossier_id".to_string(), dossier.id.to_string()),
            ("provider_id".to_string(), provider_id.to_string()),
        ]);

        let intent = match self
            .payment_gateway
            .create_deposit_intent(self.policy.deposit_amount, &self.policy.currency, &metadata)
            .await
        {
            Ok(intent) => Some(intent),
            Err(e) if self.policy.proceed_without_payment_on_gateway_failure => {
                tracing::warn!(
                    "💳 Gateway falhou para o dossiê {}; seguindo sem pagamento: {}",
                    dossier.id,
                    e
                );
                None
            }
            Err(e) => {
                tracing::error!("💳 Gateway falhou para o dossiê {}: {}", dossier.id, e);
                return Err(match e {
                    AppError::PaymentIntentFailed(_) => e,
                    other => AppError::PaymentIntentFailed(other.to_string()),
                });
            }
        };

        // 4. Reserva pendente
        let (artist_id, studio_id) = match payload.provider_kind {
            ProviderKind::Artist => (Some(provider_id), None),
            ProviderKind::Studio => (None, Some(provider_id)),
        };

        let booking = self
            .booking_store
            .insert(NewBooking {
                dossier_id: Some(dossier.id),
                client_id: client.id,
                artist_id,
                studio_id,
                status: BookingStatus::Pending,
                date: payload.slot_date_time,
                deposit_amount: self.policy.deposit_amount,
                payment_reference: intent.as_ref().map(|i| i.id.clone()),
            })
            .await
            .map_err(|e| match e {
                AppError::SlotTaken => {
                    tracing::warn!(
                        "⏰ Horário {:?} do prestador {} já ocupado (dossiê {} mantido)",
                        payload.slot_date_time,
                        provider_id,
                        dossier.id
                    );
                    AppError::SlotTaken
                }
                other => {
                    tracing::error!(
                        "Falha ao inserir reserva (dossiê {} ficou órfão): {}",
                        dossier.id,
                        other
                    );
                    AppError::BookingCreationFailed(other.to_string())
                }
            })?;

        tracing::info!(
            "✅ Reserva {} criada para o dossiê {} (pagamento: {})",
            booking.id,
            dossier.id,
            booking.payment_reference.as_deref().unwrap_or("pendente")
        );

        // 5. Resultado
        Ok(BookingReservation {
            dossier,
            booking: Some(booking),
            client_secret: intent.map(|i| i.client_secret),
        })
    }

    /// O horário pedido precisa ser futuro, em minuto cheio e, para artistas,
    /// exatamente o início de um horário gerado pela agenda semanal.
    async fn ensure_bookable_slot(
        &self,
        provider_id: Uuid,
        payload: &CreateBookingPayload,
        now: NaiveDateTime,
    ) -> Result<(), AppError> {
        let Some(slot) = payload.slot_date_time else {
            return Err(AppError::ValidationFailed(
                "Selecione uma data e um horário antes de seguir para o pagamento.".into(),
            ));
        };

        if slot < now {
            return Err(AppError::ValidationFailed(
                "O horário selecionado já passou.".into(),
            ));
        }

        if slot.second() != 0 || slot.nanosecond() != 0 {
            return Err(AppError::ValidationFailed(
                "O horário deve ser informado em minutos cheios (HH:MM).".into(),
            ));
        }

        // Estúdios não têm agenda semanal própria
        if payload.provider_kind == ProviderKind::Artist {
            let rules = self.availability_store.list_recurring(provider_id).await?;
            if !slot_generator::is_slot_start(&rules, slot, &self.slot_options) {
                tracing::warn!(
                    "⏰ Horário {} fora da agenda do artista {}",
                    slot,
                    provider_id
                );
                return Err(AppError::ValidationFailed(
                    "O horário selecionado não está na agenda do artista.".into(),
                ));
            }
        }

        Ok(())
    }

    pub async fn get_booking(
        &self,
        user: &CurrentUser,
        booking_id: Uuid,
    ) -> Result<Booking, AppError> {
        let booking = self
            .booking_store
            .find_by_id(booking_id)
            .await?
            .ok_or(AppError::BookingNotFound)?;

        let is_party = booking.client_id == user.id
            || booking.artist_id == Some(user.id)
            || booking.studio_id == Some(user.id);

        if !is_party && !user.is_admin() {
            return Err(AppError::Forbidden);
        }

        Ok(booking)
    }

    /// Cancelamento administrativo. Libera o horário para novas reservas.
    pub async fn cancel_booking(
        &self,
        user: &CurrentUser,
        booking_id: Uuid,
    ) -> Result<Booking, AppError> {
        if !user.is_admin() {
            return Err(AppError::Forbidden);
        }

        let booking = self
            .booking_store
            .find_by_id(booking_id)
            .await?
            .ok_or(AppError::BookingNotFound)?;

        if !booking.status.can_be_cancelled() {
            return Err(AppError::InvalidBookingTransition(booking.status));
        }

        let cancelled = self
            .booking_store
            .update_status(booking_id, BookingStatus::Cancelled)
            .await?;

        tracing::info!("🚫 Reserva {} cancelada pelo admin {}", booking_id, user.id);
        Ok(cancelled)
    }
}
