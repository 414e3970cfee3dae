use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    /// The processor refused the request; its message is relayed as-is.
    #[error("{0}")]
    Processor(String),

    #[error("Payment not completed")]
    PaymentNotCompleted,

    #[error("Unknown route")]
    UnknownRoute,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    Internal(String),

    #[error("{message}")]
    Checkout {
        message: String,
        error_type: Option<String>,
    },
}

impl AppError {
    pub fn missing_fields() -> Self {
        AppError::BadRequest("Missing required fields".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Processor(_) => StatusCode::BAD_REQUEST,
            AppError::PaymentNotCompleted => StatusCode::BAD_REQUEST,
            AppError::UnknownRoute => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Checkout { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            AppError::Checkout {
                message,
                error_type,
            } => {
                let mut body = serde_json::json!({ "error": message });
                if let Some(error_type) = error_type {
                    body["type"] = serde_json::json!(error_type);
                }
                body
            }
            AppError::Internal(message) if message.is_empty() => {
                serde_json::json!({ "error": "Internal error" })
            }
            _ => serde_json::json!({ "error": self.to_string() }),
        };
        (status, axum::Json(body)).into_response()
    }
}
