use chrono::{DateTime, SecondsFormat, Utc};

use crate::errors::AppError;
use crate::models::payment::is_present_str;
use crate::models::SubscriptionRequest;
use crate::services::payments::CheckoutSessionParams;

const CLUB_PAGE: &str = "greengloclub.html";

pub fn success_url(site_url: &str) -> String {
    format!("{site_url}/{CLUB_PAGE}?success=true&session_id={{CHECKOUT_SESSION_ID}}")
}

pub fn cancel_url(site_url: &str) -> String {
    format!("{site_url}/{CLUB_PAGE}?canceled=true")
}

/// Builds the hosted checkout parameters for a membership signup. Absent
/// contact fields are left out of the metadata entirely.
pub fn checkout_params(
    req: &SubscriptionRequest,
    site_url: &str,
    now: DateTime<Utc>,
) -> Result<CheckoutSessionParams, AppError> {
    if !is_present_str(&req.price_id) || !is_present_str(&req.customer_email) {
        return Err(AppError::missing_fields());
    }
    let price_id = req.price_id.clone().unwrap_or_default();
    let customer_email = req.customer_email.clone().unwrap_or_default();

    let contact: Vec<(String, String)> = [
        ("customer_name", req.customer_name.as_ref()),
        ("customer_phone", req.customer_phone.as_ref()),
        ("plan", req.plan.as_ref()),
    ]
    .into_iter()
    .filter_map(|(k, v)| v.map(|v| (k.to_string(), v.clone())))
    .collect();

    let mut metadata = contact.clone();
    if let Some(opt_in) = &req.marketing_opt_in {
        metadata.push(("marketing_opt_in".to_string(), opt_in.to_string()));
    }
    metadata.push((
        "signup_date".to_string(),
        now.to_rfc3339_opts(SecondsFormat::Millis, true),
    ));

    Ok(CheckoutSessionParams {
        price_id,
        customer_email,
        success_url: success_url(site_url),
        cancel_url: cancel_url(site_url),
        metadata,
        subscription_metadata: contact,
    })
}
