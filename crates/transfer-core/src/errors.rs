//! Error types for Vaultline

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core errors that can occur in Vaultline
#[derive(Debug, Error)]
pub enum Error {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Transfer error: {0}")]
    Transfer(#[from] TransferError),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Failure archetypes returned by the (simulated) backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    Network,
    Timeout,
    ServiceUnavailable,
    RateLimited,
    Internal,
    BadGateway,
    /// Caller-supplied message with no specific archetype
    Generic,
}

impl ApiErrorKind {
    /// The archetypes picked at random when no message override is configured
    pub const ARCHETYPES: [ApiErrorKind; 6] = [
        Self::Network,
        Self::Timeout,
        Self::ServiceUnavailable,
        Self::RateLimited,
        Self::Internal,
        Self::BadGateway,
    ];

    /// Symbolic error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Network => "NETWORK_ERROR",
            Self::Timeout => "TIMEOUT",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::RateLimited => "RATE_LIMITED",
            Self::Internal => "INTERNAL_ERROR",
            Self::BadGateway => "BAD_GATEWAY",
            Self::Generic => "API_ERROR",
        }
    }

    /// HTTP-like status (0 = no response received)
    pub fn status(&self) -> u16 {
        match self {
            Self::Network => 0,
            Self::Timeout => 408,
            Self::ServiceUnavailable => 503,
            Self::RateLimited => 429,
            Self::Internal | Self::Generic => 500,
            Self::BadGateway => 502,
        }
    }

    /// Default human-readable message for the archetype
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::Network => "Network request failed",
            Self::Timeout => "Request timed out",
            Self::ServiceUnavailable => "Service temporarily unavailable",
            Self::RateLimited => "Too many requests, please slow down",
            Self::Internal => "Internal server error",
            Self::BadGateway => "Bad gateway",
            Self::Generic => "Request failed",
        }
    }
}

/// Error returned by a mock API call
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message} ({}, status {})", .kind.code(), .kind.status())]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Build an error carrying the archetype's default message
    pub fn from_kind(kind: ApiErrorKind) -> Self {
        Self::new(kind, kind.default_message())
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn status(&self) -> u16 {
        self.kind.status()
    }
}

/// Transfer form validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("Invalid amount: {message}")]
    InvalidAmount { message: String },

    #[error("Amount must be greater than zero")]
    AmountMustBeGreaterThanZero,

    #[error("Insufficient balance: short by {shortfall}")]
    InsufficientBalance { shortfall: String },

    #[error("Insufficient {symbol} for network fee: short by {shortfall}")]
    InsufficientFeeBalance { symbol: String, shortfall: String },

    #[error("Destination address is required")]
    MissingDestination,

    #[error("Invalid destination address: {address}")]
    InvalidDestinationAddress { address: String },

    #[error("No asset selected")]
    AssetNotSelected,

    #[error("No vault selected")]
    VaultNotSelected,

    #[error("Unknown asset: {asset_id}")]
    UnknownAsset { asset_id: String },

    #[error("Unknown network: {network_id}")]
    UnknownNetwork { network_id: String },

    #[error("Memo too long: {len} bytes (max {max})")]
    MemoTooLong { len: usize, max: usize },
}

/// Result type alias for Vaultline operations
pub type Result<T> = std::result::Result<T, Error>;

impl TransferError {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount { .. } => "invalid_amount",
            Self::AmountMustBeGreaterThanZero => "amount_must_be_greater_than_zero",
            Self::InsufficientBalance { .. } => "insufficient_balance",
            Self::InsufficientFeeBalance { .. } => "insufficient_fee_balance",
            Self::MissingDestination => "missing_destination",
            Self::InvalidDestinationAddress { .. } => "invalid_destination_address",
            Self::AssetNotSelected => "asset_not_selected",
            Self::VaultNotSelected => "vault_not_selected",
            Self::UnknownAsset { .. } => "unknown_asset",
            Self::UnknownNetwork { .. } => "unknown_network",
            Self::MemoTooLong { .. } => "memo_too_long",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidAmount { .. }
            | Self::AmountMustBeGreaterThanZero
            | Self::MissingDestination
            | Self::InvalidDestinationAddress { .. }
            | Self::MemoTooLong { .. } => 400,
            Self::InsufficientBalance { .. } | Self::InsufficientFeeBalance { .. } => 422,
            Self::AssetNotSelected | Self::VaultNotSelected => 422,
            Self::UnknownAsset { .. } | Self::UnknownNetwork { .. } => 404,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_error_codes() {
        let err = TransferError::InvalidAmount {
            message: "test".into(),
        };
        assert_eq!(err.error_code(), "invalid_amount");
        assert_eq!(err.status_code(), 400);

        let err = TransferError::InsufficientBalance {
            shortfall: "0.6".into(),
        };
        assert_eq!(err.error_code(), "insufficient_balance");
        assert_eq!(err.status_code(), 422);
    }

    #[test]
    fn test_api_error_archetypes_are_distinct() {
        let mut codes: Vec<&str> = ApiErrorKind::ARCHETYPES.iter().map(|k| k.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), 6);
        assert!(!ApiErrorKind::ARCHETYPES.contains(&ApiErrorKind::Generic));
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::from_kind(ApiErrorKind::RateLimited);
        assert_eq!(err.code(), "RATE_LIMITED");
        assert_eq!(err.status(), 429);
        assert_eq!(
            err.to_string(),
            "Too many requests, please slow down (RATE_LIMITED, status 429)"
        );
    }
}
