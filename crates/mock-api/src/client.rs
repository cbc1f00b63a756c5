//! Endpoint facade over the static tables
//!
//! Each method wraps a table lookup in the simulator using that endpoint's
//! latency/failure profile, so callers see the same async contract a real
//! backend would give them.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use num_bigint::BigUint;
use transfer_core::{
    AccountIndex, AddressEntry, ApiError, ApiErrorKind, AppConfig, Asset, AssetId, Error, Fee,
    MockApiConfig, Network, NetworkId, PriceTable, TransferReceipt, TransferRequest,
    TransferStatus, Vault, VaultId,
};

use crate::data::MockData;
use crate::simulator::Simulator;
use crate::Result;

/// Simulated backend for the transfer wizard
#[derive(Clone)]
pub struct MockApi {
    simulator: Arc<Simulator>,
    data: Arc<MockData>,
    config: MockApiConfig,
    submissions: Arc<AtomicU64>,
}

impl MockApi {
    /// Create a client after checking tables and profiles
    pub fn new(
        data: MockData,
        config: MockApiConfig,
        simulator: Simulator,
    ) -> std::result::Result<Self, Error> {
        data.validate()?;
        config.validate()?;
        Ok(Self {
            simulator: Arc::new(simulator),
            data: Arc::new(data),
            config,
            submissions: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Client over the built-in tables, seeded from the app config if requested
    pub fn from_config(config: &AppConfig) -> std::result::Result<Self, Error> {
        let simulator = match config.seed {
            Some(seed) => Simulator::seeded(seed),
            None => Simulator::new(),
        };
        Self::new(MockData::builtin(), config.mock_api.clone(), simulator)
    }

    /// Underlying tables (for synchronous lookups such as native-asset checks)
    pub fn data(&self) -> &MockData {
        &self.data
    }

    /// Number of transfer submissions attempted through this client
    pub fn submission_attempts(&self) -> u64 {
        self.submissions.load(Ordering::Relaxed)
    }

    pub async fn list_assets(&self) -> Result<Vec<Asset>> {
        self.simulator
            .simulate_endpoint("list_assets", self.data.assets.clone(), &self.config.assets)
            .await
    }

    pub async fn list_networks(&self) -> Result<Vec<Network>> {
        self.simulator
            .simulate_endpoint(
                "list_networks",
                self.data.networks.clone(),
                &self.config.networks,
            )
            .await
    }

    pub async fn list_vaults(&self) -> Result<Vec<Vault>> {
        self.simulator
            .simulate_endpoint("list_vaults", self.data.vaults.clone(), &self.config.vaults)
            .await
    }

    /// Address book entries for a vault on a network
    pub async fn list_addresses(
        &self,
        network: &NetworkId,
        vault: VaultId,
    ) -> Result<Vec<AddressEntry>> {
        self.simulator
            .simulate_endpoint(
                "list_addresses",
                self.data.addresses(network, vault),
                &self.config.addresses,
            )
            .await
    }

    /// Every known address on a network (the destination whitelist)
    pub async fn list_known_addresses(&self, network: &NetworkId) -> Result<Vec<AddressEntry>> {
        self.simulator
            .simulate_endpoint(
                "list_known_addresses",
                self.data.known_addresses(network),
                &self.config.addresses,
            )
            .await
    }

    /// Available balance in base units; zero for empty or unknown holdings
    pub async fn get_balance(
        &self,
        asset: &AssetId,
        vault: VaultId,
        account: AccountIndex,
    ) -> Result<BigUint> {
        self.simulator
            .simulate_endpoint(
                "get_balance",
                self.data.balance(asset, vault, account),
                &self.config.balances,
            )
            .await
    }

    /// Network fee for sending `asset`, in the network's native asset
    pub async fn get_fee(&self, asset: &AssetId) -> Result<Fee> {
        let fee = self.data.fee(asset).cloned();
        let fee = self
            .simulator
            .simulate_endpoint("get_fee", fee, &self.config.fees)
            .await?;
        fee.ok_or_else(|| {
            ApiError::new(
                ApiErrorKind::Generic,
                format!("No fee schedule for asset {}", asset),
            )
        })
    }

    /// USD prices keyed by price key
    pub async fn get_prices(&self) -> Result<PriceTable> {
        self.simulator
            .simulate_endpoint("get_prices", self.data.prices.clone(), &self.config.prices)
            .await
    }

    /// Submit a validated transfer. A single attempt; retrying is up to the caller.
    pub async fn submit_transfer(&self, request: &TransferRequest) -> Result<TransferReceipt> {
        let attempt = self.submissions.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::debug!(
            attempt,
            asset = %request.asset,
            vault = %request.vault,
            destination = %request.destination,
            amount = %request.amount,
            "Submitting transfer"
        );

        let receipt = TransferReceipt {
            transfer_id: uuid::Uuid::new_v4().to_string(),
            tx_hash: self.simulator.random_hash(),
            status: TransferStatus::Submitted,
        };

        self.simulator
            .simulate_endpoint("submit_transfer", receipt, &self.config.submit)
            .await
    }
}
