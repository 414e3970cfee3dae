use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;

use crate::errors::AppError;
use crate::models::{CheckoutSessionCreated, SubscriptionRequest};
use crate::services::payments::ProcessorError;
use crate::services::subscription;
use crate::state::AppState;

use super::parse_body;

// POST /create-checkout-session
pub async fn create_checkout_session(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<CheckoutSessionCreated>, AppError> {
    let req: SubscriptionRequest = parse_body(&body).map_err(|e| {
        tracing::error!(error = %e, "error creating checkout session");
        AppError::Checkout {
            message: e.to_string(),
            error_type: None,
        }
    })?;

    let params = subscription::checkout_params(&req, &state.config.site_url, chrono::Utc::now())?;

    tracing::info!(
        plan = req.plan.as_deref().unwrap_or(""),
        price_id = %params.price_id,
        "creating checkout session"
    );

    let session = state
        .processor
        .create_checkout_session(&params)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "error creating checkout session");
            match e {
                ProcessorError::Rejected {
                    message,
                    error_type,
                    ..
                } => AppError::Checkout {
                    message,
                    error_type,
                },
                ProcessorError::Transport(message) => AppError::Checkout {
                    message,
                    error_type: None,
                },
            }
        })?;

    Ok(Json(CheckoutSessionCreated { id: session.id }))
}
