// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::booking::BookingStatus;

// Taxonomia única de erros da aplicação.
// As variantes com String carregam a mensagem original da loja/gateway para diagnóstico.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Pré-condição de agendamento não atendida: {0}")]
    ValidationFailed(String),

    #[error("Disponibilidade inválida: {0}")]
    InvalidAvailability(String),

    #[error("Usuário não autenticado")]
    Unauthorized,

    #[error("Acesso negado")]
    Forbidden,

    #[error("Falha ao criar o dossiê: {0}")]
    DossierCreationFailed(String),

    #[error("Falha ao criar a intenção de pagamento: {0}")]
    PaymentIntentFailed(String),

    #[error("Falha ao criar a reserva: {0}")]
    BookingCreationFailed(String),

    #[error("Horário já reservado")]
    SlotTaken,

    #[error("Reserva não encontrada")]
    BookingNotFound,

    #[error("Transição de status inválida a partir de '{0}'")]
    InvalidBookingTransition(BookingStatus),

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // `anyhow::Error` captura o contexto de qualquer outro erro inesperado.
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::ValidationFailed(_)
            | AppError::InvalidAvailability(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::BookingNotFound => StatusCode::NOT_FOUND,
            AppError::SlotTaken | AppError::InvalidBookingTransition(_) => StatusCode::CONFLICT,
            AppError::PaymentIntentFailed(_) => StatusCode::BAD_GATEWAY,
            AppError::DossierCreationFailed(_)
            | AppError::BookingCreationFailed(_)
            | AppError::DatabaseError(_)
            | AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error_message = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (status, body).into_response();
            }
            AppError::ValidationFailed(msg) | AppError::InvalidAvailability(msg) => msg,
            AppError::Unauthorized => "Token de autenticação inválido ou ausente.".to_string(),
            AppError::Forbidden => "Você não tem permissão para realizar esta ação.".to_string(),
            AppError::SlotTaken => {
                "Este horário acabou de ser reservado. Escolha outro horário.".to_string()
            }
            AppError::BookingNotFound => "Reserva não encontrada.".to_string(),
            AppError::InvalidBookingTransition(status) => {
                format!("Reservas com status '{}' não podem ser canceladas.", status)
            }
            AppError::PaymentIntentFailed(ref detail) => {
                tracing::error!("💳 Falha no gateway de pagamento: {}", detail);
                "Não foi possível iniciar o pagamento do sinal.".to_string()
            }

            // Os demais viram 500. O `tracing` registra a mensagem detalhada.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                match e {
                    AppError::DossierCreationFailed(_) => "Falha ao criar o dossiê.",
                    AppError::BookingCreationFailed(_) => "Falha ao criar a reserva.",
                    _ => "Ocorreu um erro inesperado.",
                }
                .to_string()
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
