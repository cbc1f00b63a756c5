//! Transfer form state
//!
//! An explicit state container owned by the caller. Setters apply the
//! per-keystroke normalization and the reset rules; [`TransferForm::view`]
//! derives everything the form displays from the current state plus the
//! balances and fees the caller has fetched.

use num_bigint::BigUint;
use transfer_core::{AccountIndex, Asset, PriceTable, TransferError, VaultId};

use crate::calculator::{
    compare_to_max, fee_shortfall, format_base_units, format_display, format_input_display,
    format_usd, from_base_units, max_sendable, normalize_amount_input, shortfall, to_base_units,
    usd_estimate, MaxComparison,
};
use crate::constants::DEFAULT_ACCOUNT;

/// Native asset that pays the network fee
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeeAsset {
    pub symbol: String,
    pub decimals: u32,
    /// Balance of the native asset in the selected vault/account
    pub balance: BigUint,
}

/// Values resolved by the caller for the current selection
#[derive(Debug, Clone, Default)]
pub struct FormContext {
    /// Balance of the selected asset, base units
    pub balance: BigUint,
    /// Network fee, base units of the native asset
    pub fee: BigUint,
    /// The selected asset is its network's native asset
    pub is_native: bool,
    pub fee_asset: FeeAsset,
    pub prices: PriceTable,
}

impl FormContext {
    pub fn max_sendable(&self) -> BigUint {
        max_sendable(&self.balance, &self.fee, self.is_native)
    }
}

/// Result of pressing "max"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaxAction {
    /// Amount replaced with the maximum sendable
    Applied { amount: String },
    /// Amount already equals the maximum sendable
    AlreadyAtMax,
}

/// Derived display state
#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    /// Amount as shown in the input (keeps a trailing `.` while typing)
    pub amount_input: String,
    /// Amount in settled display form
    pub amount_display: String,
    /// Amount could not be converted (e.g. too many decimals)
    pub amount_error: Option<TransferError>,
    pub balance_display: String,
    pub balance_usd: String,
    pub amount_usd: String,
    pub fee_display: String,
    pub fee_symbol: String,
    pub max_sendable: BigUint,
    pub max_display: String,
    /// None while the amount is empty or invalid
    pub max_comparison: Option<MaxComparison>,
    /// Missing balance for amount (+ fee for native assets)
    pub shortfall: Option<String>,
    /// Missing native balance for the fee of a non-native transfer
    pub fee_shortfall: Option<String>,
}

impl Default for FormView {
    fn default() -> Self {
        Self {
            amount_input: String::new(),
            amount_display: "0".to_string(),
            amount_error: None,
            balance_display: "0".to_string(),
            balance_usd: format_usd(0.0),
            amount_usd: format_usd(0.0),
            fee_display: "0".to_string(),
            fee_symbol: String::new(),
            max_sendable: BigUint::default(),
            max_display: "0".to_string(),
            max_comparison: None,
            shortfall: None,
            fee_shortfall: None,
        }
    }
}

/// The transfer wizard's editable fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferForm {
    asset: Option<Asset>,
    vault: Option<VaultId>,
    account: AccountIndex,
    destination: String,
    amount: String,
    memo: String,
}

impl Default for TransferForm {
    fn default() -> Self {
        Self {
            asset: None,
            vault: None,
            account: DEFAULT_ACCOUNT,
            destination: String::new(),
            amount: String::new(),
            memo: String::new(),
        }
    }
}

impl TransferForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn asset(&self) -> Option<&Asset> {
        self.asset.as_ref()
    }

    pub fn vault(&self) -> Option<VaultId> {
        self.vault
    }

    pub fn account(&self) -> AccountIndex {
        self.account
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Normalized amount string
    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn memo(&self) -> &str {
        &self.memo
    }

    /// Select the asset to send.
    ///
    /// A different asset clears the amount; moving to another network also
    /// clears the destination, which belonged to the old network.
    pub fn select_asset(&mut self, asset: Asset) {
        if let Some(current) = &self.asset {
            if current.id == asset.id {
                return;
            }
            if current.network() != asset.network() {
                self.destination.clear();
            }
        }
        tracing::debug!(asset = %asset.id, "Asset selected, amount cleared");
        self.amount.clear();
        self.asset = Some(asset);
    }

    /// Select the source vault and account
    pub fn select_vault(&mut self, vault: VaultId, account: AccountIndex) {
        self.vault = Some(vault);
        self.account = account;
    }

    pub fn set_destination(&mut self, address: &str) {
        self.destination = address.trim().to_string();
    }

    /// Apply a keystroke buffer; returns the normalized amount
    pub fn set_amount(&mut self, raw: &str) -> &str {
        self.amount = normalize_amount_input(raw);
        &self.amount
    }

    pub fn set_memo(&mut self, memo: &str) {
        self.memo = memo.to_string();
    }

    /// Clear every field
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Amount in base units; `Ok(None)` while the amount is empty
    pub fn amount_base_units(&self) -> Result<Option<BigUint>, TransferError> {
        let asset = self.asset.as_ref().ok_or(TransferError::AssetNotSelected)?;
        if self.amount.is_empty() {
            return Ok(None);
        }
        to_base_units(&self.amount, asset.decimals).map(Some)
    }

    /// Fill the amount with the maximum sendable.
    ///
    /// Reports [`MaxAction::AlreadyAtMax`] instead of silently doing nothing
    /// when the amount is already there.
    pub fn use_max(&mut self, ctx: &FormContext) -> Result<MaxAction, TransferError> {
        let decimals = self
            .asset
            .as_ref()
            .ok_or(TransferError::AssetNotSelected)?
            .decimals;
        let max = ctx.max_sendable();

        let current = self.amount_base_units().ok().flatten();
        if current.as_ref() == Some(&max) {
            return Ok(MaxAction::AlreadyAtMax);
        }

        self.amount = from_base_units(&max, decimals);
        Ok(MaxAction::Applied {
            amount: self.amount.clone(),
        })
    }

    /// Derive display state for the current fields
    pub fn view(&self, ctx: &FormContext) -> FormView {
        let Some(asset) = &self.asset else {
            return FormView {
                amount_input: format_input_display(&self.amount),
                ..FormView::default()
            };
        };
        let decimals = asset.decimals;
        let price_key = asset.price_key.as_deref();

        let max = ctx.max_sendable();
        let (amount, amount_error) = match self.amount_base_units() {
            Ok(amount) => (amount, None),
            Err(err) => (None, Some(err)),
        };

        let max_comparison = amount.as_ref().map(|a| compare_to_max(a, &max));
        let shortfall = amount
            .as_ref()
            .and_then(|a| shortfall(a, &ctx.fee, &ctx.balance, ctx.is_native, decimals));
        let fee_shortfall = if ctx.is_native {
            None
        } else {
            fee_shortfall(&ctx.fee, &ctx.fee_asset.balance, ctx.fee_asset.decimals)
        };
        let amount_usd = amount
            .as_ref()
            .map(|a| usd_estimate(a, decimals, price_key, &ctx.prices))
            .unwrap_or(0.0);

        FormView {
            amount_input: format_input_display(&self.amount),
            amount_display: format_display(&self.amount),
            amount_error,
            balance_display: format_base_units(&ctx.balance, decimals),
            balance_usd: format_usd(usd_estimate(&ctx.balance, decimals, price_key, &ctx.prices)),
            amount_usd: format_usd(amount_usd),
            fee_display: format_base_units(&ctx.fee, ctx.fee_asset.decimals),
            fee_symbol: ctx.fee_asset.symbol.clone(),
            max_display: format_base_units(&max, decimals),
            max_sendable: max,
            max_comparison,
            shortfall,
            fee_shortfall,
        }
    }
}
