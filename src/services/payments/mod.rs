pub mod stripe;

use async_trait::async_trait;
use serde::Deserialize;

pub const INTENT_SUCCEEDED: &str = "succeeded";

#[derive(Debug, thiserror::Error)]
pub enum ProcessorError {
    /// The processor answered with an error body.
    #[error("{message}")]
    Rejected {
        status: u16,
        message: String,
        error_type: Option<String>,
    },

    /// The call never produced a usable answer.
    #[error("{0}")]
    Transport(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentIntentParams {
    /// Minor currency units.
    pub amount: i64,
    pub currency: String,
    pub description: String,
    pub receipt_email: String,
    pub metadata: Vec<(String, String)>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub status: String,
}

impl PaymentIntent {
    pub fn succeeded(&self) -> bool {
        self.status == INTENT_SUCCEEDED
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSessionParams {
    pub price_id: String,
    pub customer_email: String,
    pub success_url: String,
    pub cancel_url: String,
    pub metadata: Vec<(String, String)>,
    pub subscription_metadata: Vec<(String, String)>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    async fn create_payment_intent(
        &self,
        params: &PaymentIntentParams,
    ) -> Result<PaymentIntent, ProcessorError>;

    async fn retrieve_payment_intent(&self, id: &str) -> Result<PaymentIntent, ProcessorError>;

    async fn create_checkout_session(
        &self,
        params: &CheckoutSessionParams,
    ) -> Result<CheckoutSession, ProcessorError>;
}
