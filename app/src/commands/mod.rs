//! Commands invoked by the UI shell
//!
//! Each command takes the shared [`AppState`](crate::AppState) and returns a
//! serializable response or a [`CommandError`] carrying a stable code.

mod catalog;
mod form;

pub use catalog::*;
pub use form::*;

use serde::Serialize;
use transfer::{FormContext, MaxComparison, TransferForm};
use transfer_core::{ApiError, Error, TransferError};

/// Error returned to the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{message} ({code})")]
pub struct CommandError {
    pub code: String,
    pub message: String,
    pub status: u16,
}

impl CommandError {
    pub fn new(code: impl Into<String>, message: impl Into<String>, status: u16) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            status,
        }
    }

    pub fn catalog_not_loaded() -> Self {
        Self::new("catalog_not_loaded", "Asset catalog has not been loaded", 409)
    }
}

impl From<TransferError> for CommandError {
    fn from(err: TransferError) -> Self {
        Self::new(err.error_code(), err.to_string(), err.status_code())
    }
}

impl From<ApiError> for CommandError {
    fn from(err: ApiError) -> Self {
        let (code, status) = (err.code(), err.status());
        Self::new(code, err.message, status)
    }
}

impl From<Error> for CommandError {
    fn from(err: Error) -> Self {
        match err {
            Error::Api(e) => e.into(),
            Error::Transfer(e) => e.into(),
            Error::InvalidIdentifier(id) => {
                Self::new("invalid_identifier", format!("Invalid identifier: {}", id), 400)
            }
            other => Self::new("internal_error", other.to_string(), 500),
        }
    }
}

/// Everything the transfer form renders
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    pub asset_id: Option<String>,
    pub symbol: Option<String>,
    pub vault: Option<u32>,
    pub account: u32,
    pub destination: String,
    pub memo: String,
    pub amount_input: String,
    pub amount_display: String,
    pub amount_error: Option<CommandError>,
    pub balance_display: String,
    pub balance_usd: String,
    pub amount_usd: String,
    pub fee_display: String,
    pub fee_symbol: String,
    /// Maximum sendable in base units
    pub max_sendable: String,
    pub max_display: String,
    pub max_comparison: Option<&'static str>,
    pub shortfall: Option<String>,
    pub fee_shortfall: Option<String>,
}

impl FormResponse {
    pub(crate) fn build(form: &TransferForm, ctx: &FormContext) -> Self {
        let view = form.view(ctx);
        Self {
            asset_id: form.asset().map(|a| a.id.to_string()),
            symbol: form.asset().map(|a| a.symbol.clone()),
            vault: form.vault().map(|v| v.0),
            account: form.account(),
            destination: form.destination().to_string(),
            memo: form.memo().to_string(),
            amount_input: view.amount_input,
            amount_display: view.amount_display,
            amount_error: view.amount_error.map(CommandError::from),
            balance_display: view.balance_display,
            balance_usd: view.balance_usd,
            amount_usd: view.amount_usd,
            fee_display: view.fee_display,
            fee_symbol: view.fee_symbol,
            max_sendable: view.max_sendable.to_string(),
            max_display: view.max_display,
            max_comparison: view.max_comparison.map(comparison_name),
            shortfall: view.shortfall,
            fee_shortfall: view.fee_shortfall,
        }
    }
}

fn comparison_name(comparison: MaxComparison) -> &'static str {
    match comparison {
        MaxComparison::Below => "below",
        MaxComparison::AtMax => "at_max",
        MaxComparison::Above => "above",
    }
}
