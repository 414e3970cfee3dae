use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;

use crate::errors::AppError;
use crate::models::{
    BookingConfirmed, ConfirmBookingRequest, CreatePaymentIntentRequest, PaymentIntentCreated,
};
use crate::services::deposit;
use crate::services::payments::ProcessorError;
use crate::state::AppState;

use super::parse_body;

// POST /create-payment-intent
pub async fn create_payment_intent(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<PaymentIntentCreated>, AppError> {
    let req: CreatePaymentIntentRequest = parse_body(&body).map_err(|e| {
        tracing::warn!(error = %e, "unreadable payment intent request");
        AppError::Internal(e.to_string())
    })?;

    let params = deposit::intent_params(&req).inspect_err(|e| {
        tracing::info!(reason = %e, "payment intent request rejected");
    })?;

    tracing::info!(
        booking_ref = req.booking_ref.as_deref().unwrap_or(""),
        amount = params.amount,
        "creating payment intent"
    );

    let intent = state
        .processor
        .create_payment_intent(&params)
        .await
        .map_err(|e| match e {
            ProcessorError::Rejected {
                status, message, ..
            } => {
                tracing::warn!(status, message = %message, "Stripe rejected payment intent");
                AppError::Processor(message)
            }
            ProcessorError::Transport(message) => {
                tracing::error!(error = %message, "payment intent call failed");
                AppError::Internal(message)
            }
        })?;

    Ok(Json(PaymentIntentCreated {
        client_secret: intent.client_secret,
        intent_id: intent.id,
    }))
}

/// Stripe object ids are `<prefix>_<alphanumeric>`.
fn is_valid_intent_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// POST /confirm-booking
pub async fn confirm_booking(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<BookingConfirmed>, AppError> {
    let req: ConfirmBookingRequest = parse_body(&body).map_err(|e| {
        tracing::warn!(error = %e, "unreadable confirm request");
        AppError::Internal(e.to_string())
    })?;

    let intent_id = req
        .payment_intent_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(AppError::missing_fields)?;
    if !is_valid_intent_id(intent_id) {
        return Err(AppError::BadRequest("Invalid payment intent id".to_string()));
    }

    let intent = match state.processor.retrieve_payment_intent(intent_id).await {
        Ok(intent) => intent,
        Err(ProcessorError::Rejected { message, .. }) => {
            tracing::warn!(intent_id, message = %message, "Stripe could not load payment intent");
            return Err(AppError::PaymentNotCompleted);
        }
        Err(ProcessorError::Transport(message)) => {
            tracing::error!(intent_id, error = %message, "payment intent lookup failed");
            return Err(AppError::Internal(message));
        }
    };

    if !intent.succeeded() {
        tracing::info!(intent_id, status = %intent.status, "payment not completed");
        return Err(AppError::PaymentNotCompleted);
    }

    tracing::info!(
        intent_id,
        booking_ref = req.booking_ref.as_deref().unwrap_or(""),
        "booking confirmed"
    );

    Ok(Json(BookingConfirmed {
        confirmed: true,
        status: intent.status,
        booking_ref: req.booking_ref,
    }))
}
