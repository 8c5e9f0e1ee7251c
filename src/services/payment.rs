// src/services/payment.rs

use std::{collections::BTreeMap, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{common::error::AppError, config::StripeConfig};

// Intenção de pagamento do sinal, confirmada depois pelo front
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositIntent {
    pub id: String,
    pub client_secret: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_deposit_intent(
        &self,
        amount_minor_units: i64,
        currency: &str,
        metadata: &BTreeMap<String, String>,
    ) -> Result<DepositIntent, AppError>;
}

#[derive(Clone)]
pub struct StripeGateway {
    client: Client,
    secret_key: String,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct StripePaymentIntent {
    id: String,
    client_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl StripeGateway {
    pub fn new(config: &StripeConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            secret_key: config.secret_key.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_deposit_intent(
        &self,
        amount_minor_units: i64,
        currency: &str,
        metadata: &BTreeMap<String, String>,
    ) -> Result<DepositIntent, AppError> {
        // A API do Stripe recebe form-urlencoded com chaves "aninhadas"
        let mut form: Vec<(String, String)> = vec![
            ("amount".into(), amount_minor_units.to_string()),
            ("currency".into(), currency.to_string()),
            ("automatic_payment_methods[enabled]".into(), "true".into()),
        ];
        for (key, value) in metadata {
            form.push((format!("metadata[{}]", key), value.clone()));
        }

        let response = self
            .client
            .post(format!("{}/v1/payment_intents", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::PaymentIntentFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = match response.json::<StripeErrorBody>().await {
                Ok(body) => format!(
                    "{} ({})",
                    body.error.message.unwrap_or_default(),
                    body.error.kind.unwrap_or_else(|| "unknown".into())
                ),
                Err(_) => format!("HTTP {}", status),
            };
            return Err(AppError::PaymentIntentFailed(detail));
        }

        let intent = response
            .json::<StripePaymentIntent>()
            .await
            .map_err(|e| AppError::PaymentIntentFailed(e.to_string()))?;

        let client_secret = intent.client_secret.ok_or_else(|| {
            AppError::PaymentIntentFailed("PaymentIntent sem client_secret".into())
        })?;

        Ok(DepositIntent {
            id: intent.id,
            client_secret,
        })
    }
}
