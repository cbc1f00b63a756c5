use mock_api::MockApi;
use num_bigint::BigUint;
use serde::Serialize;
use transfer::{
    format_base_units, remaining_balance, validate_transfer, FormContext, MaxAction,
    ValidatedTransfer,
};
use transfer_core::{
    AccountIndex, AddressEntry, Asset, AssetId, Network, TransferError, TransferStatus, VaultId,
};

use super::{CommandError, FormResponse};
use crate::state::{AddressBook, Catalog};
use crate::AppState;

/// Result of pressing "max"
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxResponse {
    /// False when the amount already equalled the maximum
    pub applied: bool,
    pub form: FormResponse,
}

/// Confirmation screen contents
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub symbol: String,
    pub amount_display: String,
    pub fee_display: String,
    pub fee_symbol: String,
    pub total_display: Option<String>,
    pub remaining_display: String,
    pub destination: String,
    pub destination_label: Option<String>,
    pub memo: Option<String>,
}

/// Acknowledged submission
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub transfer_id: String,
    pub tx_hash: String,
    pub status: TransferStatus,
    pub amount_display: String,
    pub symbol: String,
}

/// Network and native asset for `asset`, from the cached catalog
fn resolve_network(catalog: &Catalog, asset: &Asset) -> Result<(Network, Asset), TransferError> {
    let network_id = asset
        .network()
        .ok_or_else(|| TransferError::UnknownAsset {
            asset_id: asset.id.to_string(),
        })?;
    let network = catalog
        .networks
        .iter()
        .find(|n| n.id == network_id)
        .cloned()
        .ok_or_else(|| TransferError::UnknownNetwork {
            network_id: network_id.to_string(),
        })?;
    let native = catalog
        .asset(&network.native_asset)
        .cloned()
        .ok_or_else(|| TransferError::UnknownAsset {
            asset_id: network.native_asset.to_string(),
        })?;
    Ok((network, native))
}

async fn snapshot(state: &AppState) -> FormResponse {
    let form = state.form_lock().read().await;
    let ctx = state.context_lock().read().await;
    FormResponse::build(&form, &ctx)
}

/// Balances and vault address book for one (asset, vault, account) selection
struct Holdings {
    balance: BigUint,
    native_balance: BigUint,
    vault_book: Vec<AddressEntry>,
}

async fn fetch_holdings(
    api: &MockApi,
    asset: &Asset,
    network: &Network,
    native: &Asset,
    vault: VaultId,
    account: AccountIndex,
) -> Result<Holdings, CommandError> {
    let (balance, native_balance, vault_book) = futures::try_join!(
        api.get_balance(&asset.id, vault, account),
        api.get_balance(&native.id, vault, account),
        api.list_addresses(&network.id, vault),
    )?;

    tracing::debug!(
        asset = %asset.id,
        %vault,
        account,
        %balance,
        "Balances fetched"
    );

    Ok(Holdings {
        balance,
        native_balance,
        vault_book,
    })
}

/// Store fetched holdings; `None` clears them
fn apply_holdings(ctx: &mut FormContext, book: &mut AddressBook, holdings: Option<Holdings>) {
    match holdings {
        Some(holdings) => {
            ctx.balance = holdings.balance;
            ctx.fee_asset.balance = holdings.native_balance;
            book.vault = holdings.vault_book;
        }
        None => {
            ctx.balance = BigUint::default();
            ctx.fee_asset.balance = BigUint::default();
            book.vault.clear();
        }
    }
}

/// Select the asset to send.
///
/// Fee, known addresses and (once a vault is chosen) balances are all fetched
/// before anything is stored, so a failed fetch leaves the previous selection
/// untouched.
pub async fn select_asset(state: &AppState, asset_id: &str) -> Result<FormResponse, CommandError> {
    let id = AssetId::parse(asset_id)?;
    let catalog = state
        .catalog()
        .await
        .ok_or_else(CommandError::catalog_not_loaded)?;
    let asset = catalog
        .asset(&id)
        .cloned()
        .ok_or_else(|| TransferError::UnknownAsset {
            asset_id: id.to_string(),
        })?;
    let (network, native) = resolve_network(&catalog, &asset)?;

    let selection = {
        let form = state.form_lock().read().await;
        form.vault().map(|vault| (vault, form.account()))
    };

    let api = state.api();
    let holdings = async {
        match selection {
            Some((vault, account)) => {
                fetch_holdings(api, &asset, &network, &native, vault, account)
                    .await
                    .map(Some)
            }
            None => Ok(None),
        }
    };
    let (fee, known, holdings) = futures::try_join!(
        async { api.get_fee(&asset.id).await.map_err(CommandError::from) },
        async {
            api.list_known_addresses(&network.id)
                .await
                .map_err(CommandError::from)
        },
        holdings,
    )
    .map_err(|e| {
        tracing::warn!(asset = %asset.id, code = %e.code, "Asset selection failed");
        e
    })?;

    {
        let mut form = state.form_lock().write().await;
        let mut ctx = state.context_lock().write().await;
        let mut book = state.addresses_lock().write().await;

        form.select_asset(asset.clone());
        ctx.fee = fee.amount;
        ctx.is_native = api.data().is_native(&asset.id);
        ctx.fee_asset.symbol = native.symbol.clone();
        ctx.fee_asset.decimals = native.decimals;
        ctx.prices = catalog.prices.clone();
        book.known = known;
        apply_holdings(&mut ctx, &mut book, holdings);
    }

    tracing::info!(asset = %asset.id, symbol = %asset.symbol, "Asset selected");
    Ok(snapshot(state).await)
}

/// Select the source vault and account; fetches balances when an asset is chosen
pub async fn select_vault(
    state: &AppState,
    vault: u32,
    account: AccountIndex,
) -> Result<FormResponse, CommandError> {
    let vault = VaultId(vault);
    let catalog = state
        .catalog()
        .await
        .ok_or_else(CommandError::catalog_not_loaded)?;
    if !catalog.vaults.iter().any(|v| v.id == vault) {
        return Err(CommandError::new(
            "unknown_vault",
            format!("Unknown vault: {}", vault),
            404,
        ));
    }

    let asset = state.form_lock().read().await.asset().cloned();
    let holdings = match asset {
        Some(asset) => {
            let (network, native) = resolve_network(&catalog, &asset)?;
            let holdings =
                fetch_holdings(state.api(), &asset, &network, &native, vault, account).await?;
            Some(holdings)
        }
        None => None,
    };

    {
        let mut form = state.form_lock().write().await;
        let mut ctx = state.context_lock().write().await;
        let mut book = state.addresses_lock().write().await;
        form.select_vault(vault, account);
        apply_holdings(&mut ctx, &mut book, holdings);
    }
    tracing::info!(%vault, account, "Vault selected");
    Ok(snapshot(state).await)
}

pub async fn set_destination(state: &AppState, address: &str) -> FormResponse {
    state.form_lock().write().await.set_destination(address);
    snapshot(state).await
}

/// Apply the raw contents of the amount input
pub async fn update_amount(state: &AppState, raw: &str) -> FormResponse {
    state.form_lock().write().await.set_amount(raw);
    snapshot(state).await
}

pub async fn set_memo(state: &AppState, memo: &str) -> FormResponse {
    state.form_lock().write().await.set_memo(memo);
    snapshot(state).await
}

/// Fill the amount with the maximum sendable
pub async fn use_max(state: &AppState) -> Result<MaxResponse, CommandError> {
    let ctx = state.context().await;
    let action = state.form_lock().write().await.use_max(&ctx)?;
    let applied = match action {
        MaxAction::Applied { amount } => {
            tracing::debug!(%amount, "Max amount applied");
            true
        }
        MaxAction::AlreadyAtMax => false,
    };
    Ok(MaxResponse {
        applied,
        form: snapshot(state).await,
    })
}

/// Validate the current form; also returns the context and asset decimals used
async fn validate_current(
    state: &AppState,
) -> Result<(ValidatedTransfer, FormContext, u32), CommandError> {
    let form = state.form().await;
    let ctx = state.context().await;
    let known = state.addresses().await.known;
    let validated = validate_transfer(&form, &ctx, &known)?;
    let decimals = form.asset().map(|a| a.decimals).unwrap_or_default();
    Ok((validated, ctx, decimals))
}

/// Validate the form and describe what would be sent
pub async fn preview(state: &AppState) -> Result<PreviewResponse, CommandError> {
    let (validated, ctx, decimals) = validate_current(state).await?;
    let remaining = remaining_balance(&ctx, &validated.request.amount);

    let ValidatedTransfer { request, summary } = validated;
    Ok(PreviewResponse {
        symbol: summary.symbol,
        amount_display: summary.amount_display,
        fee_display: summary.fee_display,
        fee_symbol: summary.fee_symbol,
        total_display: summary.total_display,
        remaining_display: format_base_units(&remaining, decimals),
        destination: request.destination.to_string(),
        destination_label: summary.destination_label,
        memo: request.memo,
    })
}

/// Validate and submit the transfer.
///
/// Nothing is sent when validation fails. A successful submission resets the
/// form; a failed one leaves it intact so the user can retry.
pub async fn submit_transfer(state: &AppState) -> Result<SubmitResponse, CommandError> {
    let (validated, _, _) = validate_current(state).await.map_err(|e| {
        tracing::info!(code = %e.code, "Transfer rejected before submission");
        e
    })?;

    let receipt = state
        .api()
        .submit_transfer(&validated.request)
        .await
        .map_err(|e| {
            tracing::warn!(
                code = e.code(),
                status = e.status(),
                "Transfer submission failed: {}",
                e.message
            );
            CommandError::from(e)
        })?;

    tracing::info!(
        transfer_id = %receipt.transfer_id,
        tx_hash = %receipt.tx_hash,
        "Transfer submitted"
    );

    reset_form(state).await;

    Ok(SubmitResponse {
        transfer_id: receipt.transfer_id,
        tx_hash: receipt.tx_hash,
        status: receipt.status,
        amount_display: validated.summary.amount_display,
        symbol: validated.summary.symbol,
    })
}

/// Clear every field and the selection-derived context; the catalog stays cached
pub async fn reset_form(state: &AppState) -> FormResponse {
    state.form_lock().write().await.reset();
    {
        let mut ctx = state.context_lock().write().await;
        let prices = std::mem::take(&mut ctx.prices);
        *ctx = Default::default();
        ctx.prices = prices;
    }
    *state.addresses_lock().write().await = Default::default();
    snapshot(state).await
}
