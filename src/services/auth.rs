// src/services/auth.rs

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{Claims, CurrentUser, UserRole},
};

// Lado servidor do provedor de identidade: os tokens são emitidos pelo
// serviço de autenticação hospedado e apenas validados aqui.
#[derive(Clone)]
pub struct AuthService {
    jwt_secret: String,
    audience: Option<String>,
}

impl AuthService {
    pub fn new(jwt_secret: String, audience: Option<String>) -> Self {
        Self {
            jwt_secret,
            audience,
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<CurrentUser, AppError> {
        let mut validation = Validation::default();
        match &self.audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!("Token rejeitado: {}", e);
            AppError::Unauthorized
        })?;

        Ok(CurrentUser {
            id: token_data.claims.sub,
            role: UserRole::from_claim(token_data.claims.role.as_deref()),
        })
    }

    // Usado por ferramentas internas e testes; em produção quem emite é o provedor.
    pub fn issue_token(
        &self,
        user_id: Uuid,
        role: UserRole,
        ttl: chrono::Duration,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + ttl;

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
            role: Some(role.as_claim().to_string()),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )
        .map_err(|e| AppError::InternalServerError(anyhow::anyhow!("Falha ao assinar o token: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_identity_and_role() {
        let service = AuthService::new("segredo-de-teste".into(), None);
        let user_id = Uuid::new_v4();

        let token = service
            .issue_token(user_id, UserRole::Artist, chrono::Duration::hours(1))
            .unwrap();
        let user = service.validate_token(&token).unwrap();

        assert_eq!(user.id, user_id);
        assert_eq!(user.role, UserRole::Artist);
    }

    #[test]
    fn rejects_foreign_and_expired_tokens() {
        let service = AuthService::new("segredo-de-teste".into(), None);
        let other = AuthService::new("outro-segredo".into(), None);

        let token = other
            .issue_token(Uuid::new_v4(), UserRole::Admin, chrono::Duration::hours(1))
            .unwrap();
        assert!(matches!(service.validate_token(&token), Err(AppError::Unauthorized)));

        let expired = service
            .issue_token(Uuid::new_v4(), UserRole::User, chrono::Duration::hours(-2))
            .unwrap();
        assert!(matches!(service.validate_token(&expired), Err(AppError::Unauthorized)));

        assert!(matches!(service.validate_token("lixo"), Err(AppError::Unauthorized)));
    }
}
