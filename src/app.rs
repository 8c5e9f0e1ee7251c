// src/app.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

// Monta o router principal. Separado do main para ser usado nos testes.
pub fn router(app_state: AppState) -> Router {
    // Leitura da agenda é pública (o calendário aparece antes do login); só o PUT exige token
    let availability_routes = Router::new()
        .route(
            "/{artist_id}",
            get(handlers::availability::list_rules).merge(
                put(handlers::availability::set_availability).route_layer(
                    axum_middleware::from_fn_with_state(app_state.clone(), auth_guard),
                ),
            ),
        )
        .route("/{artist_id}/slots", get(handlers::availability::get_slots))
        .route("/{artist_id}/calendar", get(handlers::availability::get_calendar));

    let booking_routes = Router::new()
        .route("/", post(handlers::bookings::create_booking))
        .route("/{booking_id}", get(handlers::bookings::get_booking))
        .route("/{booking_id}/cancel", post(handlers::bookings::cancel_booking))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/availability", availability_routes)
        .nest("/api/bookings", booking_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}
