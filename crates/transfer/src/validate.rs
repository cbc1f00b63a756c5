//! Pre-submit validation
//!
//! Turns a filled [`TransferForm`] into a [`TransferRequest`], or the first
//! reason it cannot be submitted. Runs before any submission call is made.

use num_bigint::BigUint;
use num_traits::Zero;
use transfer_core::{AddressEntry, TransferError, TransferRequest};

use crate::calculator::{fee_shortfall, format_base_units, shortfall};
use crate::constants::MAX_MEMO_BYTES;
use crate::state::{FormContext, TransferForm};

/// Human-readable summary of a validated transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferSummary {
    pub symbol: String,
    pub amount_display: String,
    pub fee_display: String,
    pub fee_symbol: String,
    /// Amount plus fee, only when both are in the same asset
    pub total_display: Option<String>,
    pub destination_label: Option<String>,
}

/// Request ready for submission plus its summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTransfer {
    pub request: TransferRequest,
    pub summary: TransferSummary,
}

/// Validate the form against resolved balances and the known address table.
///
/// `known_addresses` are the address book entries for the asset's network;
/// destinations outside it are rejected.
pub fn validate_transfer(
    form: &TransferForm,
    ctx: &FormContext,
    known_addresses: &[AddressEntry],
) -> Result<ValidatedTransfer, TransferError> {
    let asset = form.asset().ok_or(TransferError::AssetNotSelected)?;
    let vault = form.vault().ok_or(TransferError::VaultNotSelected)?;

    let destination = form.destination();
    if destination.is_empty() {
        return Err(TransferError::MissingDestination);
    }
    let entry = known_addresses
        .iter()
        .find(|entry| entry.address.as_str() == destination)
        .ok_or_else(|| TransferError::InvalidDestinationAddress {
            address: destination.to_string(),
        })?;

    let amount = form
        .amount_base_units()?
        .ok_or_else(|| TransferError::InvalidAmount {
            message: "amount is required".to_string(),
        })?;
    if amount.is_zero() {
        return Err(TransferError::AmountMustBeGreaterThanZero);
    }

    if let Some(missing) = shortfall(&amount, &ctx.fee, &ctx.balance, ctx.is_native, asset.decimals)
    {
        return Err(TransferError::InsufficientBalance { shortfall: missing });
    }
    if !ctx.is_native {
        if let Some(missing) =
            fee_shortfall(&ctx.fee, &ctx.fee_asset.balance, ctx.fee_asset.decimals)
        {
            return Err(TransferError::InsufficientFeeBalance {
                symbol: ctx.fee_asset.symbol.clone(),
                shortfall: missing,
            });
        }
    }

    let memo = form.memo().trim();
    if memo.len() > MAX_MEMO_BYTES {
        return Err(TransferError::MemoTooLong {
            len: memo.len(),
            max: MAX_MEMO_BYTES,
        });
    }

    let total_display = ctx
        .is_native
        .then(|| format_base_units(&(&amount + &ctx.fee), asset.decimals));
    let summary = TransferSummary {
        symbol: asset.symbol.clone(),
        amount_display: format_base_units(&amount, asset.decimals),
        fee_display: format_base_units(&ctx.fee, ctx.fee_asset.decimals),
        fee_symbol: ctx.fee_asset.symbol.clone(),
        total_display,
        destination_label: Some(entry.label.clone()).filter(|label| !label.is_empty()),
    };

    let request = TransferRequest {
        asset: asset.id.clone(),
        vault,
        account: form.account(),
        destination: entry.address.clone(),
        amount,
        memo: (!memo.is_empty()).then(|| memo.to_string()),
    };

    tracing::debug!(
        asset = %request.asset,
        vault = %request.vault,
        amount = %summary.amount_display,
        "Transfer validated"
    );

    Ok(ValidatedTransfer { request, summary })
}

/// Amount that would remain after the transfer, for confirmation screens
pub fn remaining_balance(ctx: &FormContext, amount: &BigUint) -> BigUint {
    let spent = if ctx.is_native {
        amount + &ctx.fee
    } else {
        amount.clone()
    };
    if spent >= ctx.balance {
        BigUint::zero()
    } else {
        &ctx.balance - spent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FeeAsset;
    use transfer_core::{Address, Asset, AssetId, VaultId};

    const ONE_ETH: u64 = 1_000_000_000_000_000_000;
    const DEST: &str = "0xd8da6bf26964af9d7eed9e03e53415d37aa96045";

    fn eth() -> Asset {
        Asset {
            id: AssetId::new("eip155:1/slip44:60"),
            symbol: "ETH".to_string(),
            name: "Ether".to_string(),
            decimals: 18,
            price_key: Some("ETH".to_string()),
        }
    }

    fn book() -> Vec<AddressEntry> {
        vec![AddressEntry {
            address: Address::new(DEST),
            vault: VaultId(2),
            account: 0,
            label: "Cold ETH".to_string(),
        }]
    }

    fn ctx() -> FormContext {
        FormContext {
            balance: BigUint::from(2 * ONE_ETH),
            fee: BigUint::from(ONE_ETH / 10),
            is_native: true,
            fee_asset: FeeAsset {
                symbol: "ETH".to_string(),
                decimals: 18,
                balance: BigUint::from(2 * ONE_ETH),
            },
            prices: Default::default(),
        }
    }

    fn filled_form(amount: &str) -> TransferForm {
        let mut form = TransferForm::new();
        form.select_asset(eth());
        form.select_vault(VaultId(0), 0);
        form.set_destination(DEST);
        form.set_amount(amount);
        form
    }

    #[test]
    fn test_valid_transfer() {
        let validated = validate_transfer(&filled_form("1.5"), &ctx(), &book()).unwrap();
        assert_eq!(validated.request.amount, BigUint::from(15 * ONE_ETH / 10));
        assert_eq!(validated.request.destination, Address::new(DEST));
        assert_eq!(validated.request.memo, None);
        assert_eq!(validated.summary.amount_display, "1.5");
        assert_eq!(validated.summary.total_display.as_deref(), Some("1.6"));
        assert_eq!(validated.summary.destination_label.as_deref(), Some("Cold ETH"));
    }

    #[test]
    fn test_zero_amount_rejected() {
        let err = validate_transfer(&filled_form("0"), &ctx(), &book()).unwrap_err();
        assert_eq!(err, TransferError::AmountMustBeGreaterThanZero);
        let err = validate_transfer(&filled_form("0.000"), &ctx(), &book()).unwrap_err();
        assert_eq!(err, TransferError::AmountMustBeGreaterThanZero);
    }

    #[test]
    fn test_empty_amount_is_invalid_not_zero() {
        let err = validate_transfer(&filled_form(""), &ctx(), &book()).unwrap_err();
        assert_eq!(err.error_code(), "invalid_amount");
    }

    #[test]
    fn test_unknown_destination_rejected() {
        let mut form = filled_form("1");
        form.set_destination("0x0000000000000000000000000000000000000001");
        let err = validate_transfer(&form, &ctx(), &book()).unwrap_err();
        assert_eq!(
            err,
            TransferError::InvalidDestinationAddress {
                address: "0x0000000000000000000000000000000000000001".to_string()
            }
        );
    }

    #[test]
    fn test_missing_selection() {
        let form = TransferForm::new();
        assert_eq!(
            validate_transfer(&form, &ctx(), &book()),
            Err(TransferError::AssetNotSelected)
        );

        let mut form = TransferForm::new();
        form.select_asset(eth());
        assert_eq!(
            validate_transfer(&form, &ctx(), &book()),
            Err(TransferError::VaultNotSelected)
        );

        form.select_vault(VaultId(0), 0);
        assert_eq!(
            validate_transfer(&form, &ctx(), &book()),
            Err(TransferError::MissingDestination)
        );
    }

    #[test]
    fn test_insufficient_balance_carries_shortfall() {
        let err = validate_transfer(&filled_form("2"), &ctx(), &book()).unwrap_err();
        assert_eq!(
            err,
            TransferError::InsufficientBalance {
                shortfall: "0.1".to_string()
            }
        );
    }

    #[test]
    fn test_non_native_fee_must_be_covered() {
        let mut form = filled_form("");
        form.select_asset(Asset {
            id: AssetId::new("eip155:1/erc20:0x514910771af9ca656af840dff83e8264ecf986ca"),
            symbol: "LINK".to_string(),
            name: "Chainlink".to_string(),
            decimals: 18,
            price_key: None,
        });
        form.set_amount("5");
        let ctx = FormContext {
            balance: BigUint::from(5 * ONE_ETH),
            fee: BigUint::from(ONE_ETH / 100),
            is_native: false,
            fee_asset: FeeAsset {
                symbol: "ETH".to_string(),
                decimals: 18,
                balance: BigUint::zero(),
            },
            prices: Default::default(),
        };
        let err = validate_transfer(&form, &ctx, &book()).unwrap_err();
        assert_eq!(
            err,
            TransferError::InsufficientFeeBalance {
                symbol: "ETH".to_string(),
                shortfall: "0.01".to_string()
            }
        );
    }

    #[test]
    fn test_memo_limit() {
        let mut form = filled_form("1");
        form.set_memo(&"x".repeat(MAX_MEMO_BYTES + 1));
        assert!(matches!(
            validate_transfer(&form, &ctx(), &book()),
            Err(TransferError::MemoTooLong { .. })
        ));

        form.set_memo("  invoice 42 ");
        let validated = validate_transfer(&form, &ctx(), &book()).unwrap();
        assert_eq!(validated.request.memo.as_deref(), Some("invoice 42"));
    }

    #[test]
    fn test_remaining_balance() {
        let ctx = ctx();
        assert_eq!(
            remaining_balance(&ctx, &BigUint::from(ONE_ETH)),
            BigUint::from(9 * ONE_ETH / 10)
        );
        assert_eq!(remaining_balance(&ctx, &BigUint::from(5 * ONE_ETH)), BigUint::zero());
    }
}
