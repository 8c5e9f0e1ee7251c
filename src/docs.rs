// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Availability ---
        handlers::availability::list_rules,
        handlers::availability::get_slots,
        handlers::availability::get_calendar,
        handlers::availability::set_availability,

        // --- Bookings ---
        handlers::bookings::create_booking,
        handlers::bookings::get_booking,
        handlers::bookings::cancel_booking,
    ),
    components(
        schemas(
            // --- Availability ---
            models::availability::AvailabilityRule,
            models::availability::WeeklyWindow,
            models::availability::SetAvailabilityPayload,
            models::availability::TimeSlot,
            models::availability::DaySlots,
            models::availability::CalendarDay,

            // --- Bookings ---
            models::booking::BookingStatus,
            models::booking::Booking,
            models::booking::ProviderKind,
            models::booking::CreateBookingPayload,
            models::booking::BookingReservation,

            // --- Dossiers ---
            models::dossier::DossierStatus,
            models::dossier::Dossier,
        )
    ),
    tags(
        (name = "Availability", description = "Agenda semanal e horários disponíveis"),
        (name = "Bookings", description = "Pedidos de projeto, reservas e sinal")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
