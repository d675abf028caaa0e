use std::io;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Precondition,
    Configuration,
    Validation,
    ContractState,
    ChainSubmission,
    HttpError,
    ReclaimNotifyFailed,
    CsrfError,
    ConfigError,
    NodeRpcError,
    NetworkError,
    SerializationError,
    EncodingError,
    InvalidStateTransition,
    OperationInFlight,
    Message,
}

#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ClaimError {
    // === Pre-I/O failures ===
    /// No active wallet account; fatal and never retried.
    #[error("{0}")]
    Precondition(String),

    /// Active network has no application id mapping.
    #[error("{0}")]
    Configuration(String),

    /// Malformed caller input.
    #[error("{0}")]
    Validation(String),

    // === Chain failures ===
    #[error("{0}")]
    ContractState(String),

    #[error("{0}")]
    ChainSubmission(String),

    // === Backend failures ===
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    #[error("Failed to notify reclaim success: {status} {body}")]
    ReclaimNotifyFailed { status: u16, body: String },

    #[error("{0}")]
    Csrf(String),

    // === Ambient ===
    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("node RPC error: {0}")]
    NodeRpcError(String),

    #[error("network error: {0}")]
    NetworkError(String),

    #[error("{format} serialization error: {details}")]
    SerializationError { format: String, details: String },

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("operation already in flight: {operation} for {address}")]
    OperationInFlight { operation: String, address: String },

    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, ClaimError>;

impl ClaimError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ClaimError::Precondition(_) => ErrorCode::Precondition,
            ClaimError::Configuration(_) => ErrorCode::Configuration,
            ClaimError::Validation(_) => ErrorCode::Validation,
            ClaimError::ContractState(_) => ErrorCode::ContractState,
            ClaimError::ChainSubmission(_) => ErrorCode::ChainSubmission,
            ClaimError::Http { .. } => ErrorCode::HttpError,
            ClaimError::ReclaimNotifyFailed { .. } => ErrorCode::ReclaimNotifyFailed,
            ClaimError::Csrf(_) => ErrorCode::CsrfError,
            ClaimError::ConfigError(_) => ErrorCode::ConfigError,
            ClaimError::NodeRpcError(_) => ErrorCode::NodeRpcError,
            ClaimError::NetworkError(_) => ErrorCode::NetworkError,
            ClaimError::SerializationError { .. } => ErrorCode::SerializationError,
            ClaimError::EncodingError(_) => ErrorCode::EncodingError,
            ClaimError::InvalidStateTransition { .. } => ErrorCode::InvalidStateTransition,
            ClaimError::OperationInFlight { .. } => ErrorCode::OperationInFlight,
            ClaimError::Message(_) => ErrorCode::Message,
        }
    }

    pub fn context(&self) -> ErrorContext {
        ErrorContext { code: self.code(), message: self.to_string() }
    }

    /// Errors raised before any network I/O. Nothing was submitted.
    pub fn is_pre_io(&self) -> bool {
        matches!(self.code(), ErrorCode::Precondition | ErrorCode::Configuration | ErrorCode::Validation | ErrorCode::OperationInFlight)
    }

    pub fn no_active_account() -> Self {
        ClaimError::Precondition(crate::foundation::NO_ACTIVE_ACCOUNT_MSG.to_string())
    }

    pub fn app_id_not_configured(network: impl std::fmt::Display) -> Self {
        ClaimError::Configuration(format!("App ID not configured for network: {network}"))
    }

    pub fn invalid_address() -> Self {
        ClaimError::Validation("invalid address".to_string())
    }

    pub fn chain_submission(details: impl Into<String>) -> Self {
        ClaimError::ChainSubmission(details.into())
    }
}

impl From<hex::FromHexError> for ClaimError {
    fn from(err: hex::FromHexError) -> Self {
        ClaimError::EncodingError(format!("hex decode error: {}", err))
    }
}

impl From<base64::DecodeError> for ClaimError {
    fn from(err: base64::DecodeError) -> Self {
        ClaimError::EncodingError(format!("base64 decode error: {}", err))
    }
}

impl From<toml::de::Error> for ClaimError {
    fn from(err: toml::de::Error) -> Self {
        ClaimError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<serde_json::Error> for ClaimError {
    fn from(err: serde_json::Error) -> Self {
        ClaimError::SerializationError { format: "json".to_string(), details: err.to_string() }
    }
}

impl From<io::Error> for ClaimError {
    fn from(err: io::Error) -> Self {
        ClaimError::Message(format!("io error: {}", err))
    }
}

impl From<reqwest::Error> for ClaimError {
    fn from(err: reqwest::Error) -> Self {
        ClaimError::NetworkError(err.to_string())
    }
}

#[macro_export]
macro_rules! serde_err {
    ($fmt:expr, $err:expr) => {
        $crate::foundation::ClaimError::SerializationError { format: $fmt.into(), details: $err.to_string() }
    };
}

// NOTE: Avoid generic "stringly" conversions here; pick the variant at the call site.
