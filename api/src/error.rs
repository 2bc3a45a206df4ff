use alchemy_transfers::AppError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Please enter a valid Base EVM address (0x...), got `{0}`")]
    InvalidAddress(String),

    #[error("Failed to fetch data: {0}")]
    Upstream(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::InvalidAddress(address) => ApiError::InvalidAddress(address),
            AppError::MissingEnvVar(_) | AppError::InvalidEnvVar { .. } => {
                ApiError::Config(err.to_string())
            }
            AppError::Api(_) | AppError::RpcError(_) | AppError::MaxRetriesExceeded(_) => {
                ApiError::Upstream(err.to_string())
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::InvalidAddress(address) => {
                tracing::warn!(address = %address, "Invalid wallet address");
                (StatusCode::BAD_REQUEST, "INVALID_ADDRESS")
            }
            ApiError::Upstream(message) => {
                tracing::error!(message = %message, "Transfer fetch failed");
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR")
            }
            ApiError::Config(message) => {
                tracing::error!(message = %message, "Configuration error");
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        });

        (status, body).into_response()
    }
}
