// src/config.rs

use std::{env, str::FromStr, sync::Arc};

use anyhow::Context;
use sqlx::PgPool;

use crate::{
    db::{
        AvailabilityRepository, AvailabilityStore, BookingRepository, BookingStore,
        DossierRepository, DossierStore,
    },
    services::{
        auth::AuthService,
        availability_service::AvailabilityService,
        booking_service::{BookingPolicy, BookingService},
        payment::{PaymentGateway, StripeGateway},
        slot_generator::{CollisionPolicy, SlotOptions},
    },
};

const MAX_SLOT_DURATION_MINUTES: i64 = 24 * 60;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct StripeConfig {
    pub secret_key: String,
    pub api_base: String,
}

// Tudo que vem do ambiente (.env ou variáveis do processo)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub database: DatabaseConfig,
    pub jwt_secret: String,
    pub jwt_audience: Option<String>,
    pub stripe: StripeConfig,
    pub booking_policy: BookingPolicy,
    pub slot_options: SlotOptions,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Separado de `from_env` para ser testável sem mexer no ambiente do processo.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("{} deve ser definida", key))
        };

        let slot_duration_minutes: i64 = parse_or(&lookup, "SLOT_DURATION_MINUTES", 60)?;
        if !(1..=MAX_SLOT_DURATION_MINUTES).contains(&slot_duration_minutes) {
            anyhow::bail!(
                "SLOT_DURATION_MINUTES deve estar entre 1 e {} (um dia)",
                MAX_SLOT_DURATION_MINUTES
            );
        }

        let collision = match lookup("SLOT_COLLISION").as_deref() {
            None | Some("exact") => CollisionPolicy::ExactStart,
            Some("overlap") => CollisionPolicy::Overlap,
            Some(other) => anyhow::bail!("SLOT_COLLISION inválido: '{}' (use exact ou overlap)", other),
        };

        let deposit_amount: i64 = parse_or(&lookup, "DEPOSIT_AMOUNT", 5000)?;
        if deposit_amount <= 0 {
            anyhow::bail!("DEPOSIT_AMOUNT deve ser maior que zero");
        }

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
                acquire_timeout_secs: parse_or(&lookup, "DATABASE_ACQUIRE_TIMEOUT_SECS", 3)?,
            },
            jwt_secret: required("JWT_SECRET")?,
            jwt_audience: lookup("JWT_AUDIENCE").filter(|v| !v.is_empty()),
            stripe: StripeConfig {
                secret_key: required("STRIPE_SECRET_KEY")?,
                api_base: lookup("STRIPE_API_BASE")
                    .unwrap_or_else(|| "https://api.stripe.com".to_string()),
            },
            booking_policy: BookingPolicy {
                deposit_amount,
                currency: lookup("DEPOSIT_CURRENCY").unwrap_or_else(|| "usd".to_string()),
                proceed_without_payment_on_gateway_failure: parse_or(
                    &lookup,
                    "PROCEED_WITHOUT_PAYMENT_ON_GATEWAY_FAILURE",
                    true,
                )?,
            },
            slot_options: SlotOptions {
                slot_duration_minutes,
                collision,
            },
        })
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{} inválido ('{}'): {}", key, raw, e)),
    }
}

// O estado compartilhado acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth_service: AuthService,
    pub availability_service: AvailabilityService,
    pub booking_service: BookingService,
}

impl AppState {
    // Monta o gráfico de dependências sobre o Postgres e o Stripe
    pub fn with_postgres(config: AppConfig, pool: PgPool) -> anyhow::Result<Self> {
        let gateway = StripeGateway::new(&config.stripe)?;

        Ok(Self::from_parts(
            config,
            Arc::new(AvailabilityRepository::new(pool.clone())),
            Arc::new(BookingRepository::new(pool.clone())),
            Arc::new(DossierRepository::new(pool)),
            Arc::new(gateway),
        ))
    }

    pub fn from_parts(
        config: AppConfig,
        availability_store: Arc<dyn AvailabilityStore>,
        booking_store: Arc<dyn BookingStore>,
        dossier_store: Arc<dyn DossierStore>,
        payment_gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        let auth_service = AuthService::new(config.jwt_secret.clone(), config.jwt_audience.clone());

        let availability_service = AvailabilityService::new(
            availability_store.clone(),
            booking_store.clone(),
            config.slot_options,
        );

        let booking_service = BookingService::new(
            availability_store,
            dossier_store,
            booking_store,
            payment_gateway,
            config.booking_policy.clone(),
            config.slot_options,
        );

        Self {
            config: Arc::new(config),
            auth_service,
            availability_service,
            booking_service,
        }
    }
}
