use std::fmt::Debug;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing `{0}` environment variable")]
    MissingEnvVar(String),

    #[error("Invalid `{name}` value: `{value}`")]
    InvalidEnvVar { name: String, value: String },

    #[error("Please enter a valid Base EVM address (0x...), got `{0}`")]
    InvalidAddress(String),

    #[error("Max retries ({0}) exceeded")]
    MaxRetriesExceeded(u32),

    #[error("API Error: {0}")]
    Api(String),

    #[error("RPC error: {0}")]
    RpcError(String),
}
