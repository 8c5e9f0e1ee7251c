// src/models/auth.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// Papéis emitidos pelo provedor de identidade (claim "role" do JWT)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Editor,
    Artist,
    StudioOwner,
    #[default]
    User,
}

impl UserRole {
    // Papéis desconhecidos caem no papel mais restrito.
    pub fn from_claim(value: Option<&str>) -> Self {
        match value {
            Some("admin") => UserRole::Admin,
            Some("editor") => UserRole::Editor,
            Some("artist") => UserRole::Artist,
            Some("studio_owner") => UserRole::StudioOwner,
            _ => UserRole::User,
        }
    }

    pub fn as_claim(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Editor => "editor",
            UserRole::Artist => "artist",
            UserRole::StudioOwner => "studio_owner",
            UserRole::User => "user",
        }
    }
}

// Identidade autenticada da requisição
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: Uuid,
    pub role: UserRole,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}
