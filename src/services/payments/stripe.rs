use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::{
    CheckoutSession, CheckoutSessionParams, PaymentIntent, PaymentIntentParams,
    PaymentProcessor, ProcessorError,
};

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

    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(String, String)],
    ) -> Result<T, ProcessorError> {
        let resp = self
            .client
            .post(format!("{}{path}", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(form)
            .send()
            .await
            .map_err(|e| ProcessorError::Transport(format!("failed to call Stripe: {e}")))?;

        read_response(resp).await
    }
}

#[async_trait]
impl PaymentProcessor for StripeProcessor {
    async fn create_payment_intent(
        &self,
        params: &PaymentIntentParams,
    ) -> Result<PaymentIntent, ProcessorError> {
        self.post_form("/v1/payment_intents", &payment_intent_form(params))
            .await
    }

    async fn retrieve_payment_intent(&self, id: &str) -> Result<PaymentIntent, ProcessorError> {
        let resp = self
            .client
            .get(format!("{}/v1/payment_intents/{id}", self.api_base))
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| ProcessorError::Transport(format!("failed to call Stripe: {e}")))?;

        read_response(resp).await
    }

    async fn create_checkout_session(
        &self,
        params: &CheckoutSessionParams,
    ) -> Result<CheckoutSession, ProcessorError> {
        self.post_form("/v1/checkout/sessions", &checkout_session_form(params))
            .await
    }
}

async fn read_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ProcessorError> {
    let status = resp.status();
    let data: serde_json::Value = resp
        .json()
        .await
        .map_err(|e| ProcessorError::Transport(format!("failed to parse Stripe response: {e}")))?;

    if !status.is_success() {
        return Err(rejection(status.as_u16(), &data));
    }

    serde_json::from_value(data)
        .map_err(|e| ProcessorError::Transport(format!("unexpected Stripe response: {e}")))
}

fn rejection(status: u16, data: &serde_json::Value) -> ProcessorError {
    let error = &data["error"];
    ProcessorError::Rejected {
        status,
        message: error["message"]
            .as_str()
            .unwrap_or("Stripe error")
            .to_string(),
        error_type: error["type"].as_str().map(|s| s.to_string()),
    }
}

pub fn payment_intent_form(params: &PaymentIntentParams) -> Vec<(String, String)> {
    let mut form = vec![
        ("amount".to_string(), params.amount.to_string()),
        ("currency".to_string(), params.currency.clone()),
        ("payment_method_types[]".to_string(), "card".to_string()),
        ("description".to_string(), params.description.clone()),
        ("receipt_email".to_string(), params.receipt_email.clone()),
    ];
    for (key, value) in &params.metadata {
        form.push((format!("metadata[{key}]"), value.clone()));
    }
    form
}

pub fn checkout_session_form(params: &CheckoutSessionParams) -> Vec<(String, String)> {
    let mut form = vec![
        ("payment_method_types[0]".to_string(), "card".to_string()),
        ("line_items[0][price]".to_string(), params.price_id.clone()),
        ("line_items[0][quantity]".to_string(), "1".to_string()),
        ("mode".to_string(), "subscription".to_string()),
        ("success_url".to_string(), params.success_url.clone()),
        ("cancel_url".to_string(), params.cancel_url.clone()),
        ("customer_email".to_string(), params.customer_email.clone()),
    ];
    for (key, value) in &params.metadata {
        form.push((format!("metadata[{key}]"), value.clone()));
    }
    for (key, value) in &params.subscription_metadata {
        form.push((format!("subscription_data[metadata][{key}]"), value.clone()));
    }
    form
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value<'a>(form: &'a [(String, String)], key: &str) -> Option<&'a str> {
        form.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_payment_intent_form() {
        let params = PaymentIntentParams {
            amount: 2500,
            currency: "gbp".to_string(),
            description: "Oven Deep Clean — 25% Deposit | Ref: GG123".to_string(),
            receipt_email: "jo@example.com".to_string(),
            metadata: vec![("booking_ref".to_string(), "GG123".to_string())],
        };
        let form = payment_intent_form(&params);
        assert_eq!(value(&form, "amount"), Some("2500"));
        assert_eq!(value(&form, "currency"), Some("gbp"));
        assert_eq!(value(&form, "payment_method_types[]"), Some("card"));
        assert_eq!(value(&form, "metadata[booking_ref]"), Some("GG123"));
    }

    #[test]
    fn test_checkout_session_form() {
        let params = CheckoutSessionParams {
            price_id: "price_123".to_string(),
            customer_email: "jo@example.com".to_string(),
            success_url: "https://site/ok".to_string(),
            cancel_url: "https://site/cancel".to_string(),
            metadata: vec![("plan".to_string(), "gold".to_string())],
            subscription_metadata: vec![("plan".to_string(), "gold".to_string())],
        };
        let form = checkout_session_form(&params);
        assert_eq!(value(&form, "mode"), Some("subscription"));
        assert_eq!(value(&form, "line_items[0][price]"), Some("price_123"));
        assert_eq!(value(&form, "line_items[0][quantity]"), Some("1"));
        assert_eq!(value(&form, "metadata[plan]"), Some("gold"));
        assert_eq!(
            value(&form, "subscription_data[metadata][plan]"),
            Some("gold")
        );
    }

    #[test]
    fn test_rejection_reads_error_body() {
        let body = serde_json::json!({
            "error": {"message": "No such price: 'price_x'", "type": "invalid_request_error"}
        });
        match rejection(400, &body) {
            ProcessorError::Rejected {
                status,
                message,
                error_type,
            } => {
                assert_eq!(status, 400);
                assert_eq!(message, "No such price: 'price_x'");
                assert_eq!(error_type.as_deref(), Some("invalid_request_error"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rejection_without_message() {
        let err = rejection(500, &serde_json::json!({}));
        assert_eq!(err.to_string(), "Stripe error");
    }
}
