use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

/// Error types for the pricing service.
/// The pricing core itself never fails; these cover configuration,
/// caller-side input validation and I/O at the service boundary.
#[derive(Debug, thiserror::Error)]
pub enum PricerError {
    #[error("config error: {0}")]
    Config(String),

    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("io error: {0}")]
    Io(String),
}

impl PricerError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        PricerError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            PricerError::InvalidInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            PricerError::Config(_) | PricerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<std::io::Error> for PricerError {
    fn from(e: std::io::Error) -> Self {
        PricerError::Io(e.to_string())
    }
}

impl IntoResponse for PricerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

pub type PricerResult<T> = Result<T, PricerError>;
