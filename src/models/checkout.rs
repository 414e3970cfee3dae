use serde::{Deserialize, Serialize};

use super::payment::FieldValue;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRequest {
    pub price_id: Option<String>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub plan: Option<String>,
    pub marketing_opt_in: Option<FieldValue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSessionCreated {
    pub id: String,
}
