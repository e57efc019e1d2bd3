use anyhow::Context;
use async_trait::async_trait;

use super::PaymentProcessor;
use crate::models::{PaymentIntent, PaymentIntentRequest};

pub struct StripeProcessor {
    secret_key: String,
    api_base: String,
    client: reqwest::Client,
}

impl StripeProcessor {
    pub fn new(secret_key: String, api_base: String) -> Self {
        Self {
            secret_key,
            api_base: api_base.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn parse_intent(resp: reqwest::Response) -> anyhow::Result<PaymentIntent> {
        let status = resp.status();
        let data: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse Stripe response")?;

        if !status.is_success() {
            let message = data["error"]["message"]
                .as_str()
                .map(|s| s.to_string())
                .unwrap_or_else(|| data.to_string());
            anyhow::bail!("Stripe API error ({}): {}", status, message);
        }

        serde_json::from_value(data).context("unexpected payment intent shape in Stripe response")
    }
}

#[async_trait]
impl PaymentProcessor for StripeProcessor {
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> anyhow::Result<PaymentIntent> {
        let mut form = vec![
            ("amount".to_string(), request.amount.to_string()),
            ("currency".to_string(), request.currency.clone()),
            ("receipt_email".to_string(), request.receipt_email.clone()),
        ];
        for (key, value) in &request.metadata {
            form.push((format!("metadata[{key}]"), value.clone()));
        }

        let resp = self
            .client
            .post(format!("{}/v1/payment_intents", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await
            .context("failed to call Stripe API")?;

        Self::parse_intent(resp).await
    }

    async fn retrieve_payment_intent(&self, id: &str) -> anyhow::Result<PaymentIntent> {
        anyhow::ensure!(
            !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
            "invalid payment intent id: {id:?}"
        );

        let resp = self
            .client
            .get(format!("{}/v1/payment_intents/{}", self.api_base, id))
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .context("failed to call Stripe API")?;

        Self::parse_intent(resp).await
    }
}
