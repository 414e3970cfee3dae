pub mod checkout;
pub mod health;
pub mod payments;
pub mod site;

use serde::de::DeserializeOwned;

use crate::errors::AppError;

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

pub async fn unknown_route() -> AppError {
    AppError::UnknownRoute
}

/// Bodies are parsed by hand so malformed JSON surfaces as a JSON error body
/// rather than axum's plain-text rejection.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(body)
}
