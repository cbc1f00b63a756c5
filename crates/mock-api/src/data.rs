//! In-memory tables backing the mock endpoints
//!
//! Assets, networks, vaults, the address book, balances, fees and USD prices.
//! Identifiers follow the `<family>:<chainRef>/<assetRef>` scheme.

use std::collections::HashMap;

use num_bigint::BigUint;
use transfer_core::{
    AccountIndex, Address, AddressEntry, Asset, AssetId, Error, Fee, Network, NetworkId,
    PriceTable, Vault, VaultId,
};

pub const ETHEREUM: &str = "eip155:1";
pub const BITCOIN: &str = "bip122:000000000019d6689c085ae165831e93";
pub const SOLANA: &str = "solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp";

pub const ETH: &str = "eip155:1/slip44:60";
pub const USDC_ETH: &str = "eip155:1/erc20:0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48";
pub const LINK_ETH: &str = "eip155:1/erc20:0x514910771af9ca656af840dff83e8264ecf986ca";
pub const BTC: &str = "bip122:000000000019d6689c085ae165831e93/slip44:0";
pub const SOL: &str = "solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp/slip44:501";
pub const USDC_SOL: &str =
    "solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp/token:EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

/// Key into the balance table
pub type BalanceKey = (AssetId, VaultId, AccountIndex);

/// Static tables the simulator wraps
#[derive(Debug, Clone, Default)]
pub struct MockData {
    pub assets: Vec<Asset>,
    pub networks: Vec<Network>,
    pub vaults: Vec<Vault>,
    pub addresses: HashMap<(NetworkId, VaultId), Vec<AddressEntry>>,
    pub balances: HashMap<BalanceKey, BigUint>,
    pub fees: HashMap<AssetId, Fee>,
    pub prices: PriceTable,
}

impl MockData {
    /// Asset by ID
    pub fn asset(&self, id: &AssetId) -> Option<&Asset> {
        self.assets.iter().find(|a| &a.id == id)
    }

    /// Network by ID
    pub fn network(&self, id: &NetworkId) -> Option<&Network> {
        self.networks.iter().find(|n| &n.id == id)
    }

    /// Network an asset lives on
    pub fn network_of(&self, asset: &AssetId) -> Option<&Network> {
        self.network(&asset.network()?)
    }

    /// Whether `asset` pays its own network fees
    pub fn is_native(&self, asset: &AssetId) -> bool {
        self.network_of(asset)
            .is_some_and(|network| &network.native_asset == asset)
    }

    /// Address book for a (network, vault) pair
    pub fn addresses(&self, network: &NetworkId, vault: VaultId) -> Vec<AddressEntry> {
        self.addresses
            .get(&(network.clone(), vault))
            .cloned()
            .unwrap_or_default()
    }

    /// Every known address on a network, across vaults
    pub fn known_addresses(&self, network: &NetworkId) -> Vec<AddressEntry> {
        let mut entries: Vec<AddressEntry> = self
            .addresses
            .iter()
            .filter(|((n, _), _)| n == network)
            .flat_map(|(_, entries)| entries.iter().cloned())
            .collect();
        entries.sort_by(|a, b| (a.vault, a.account).cmp(&(b.vault, b.account)));
        entries
    }

    /// Balance in base units (zero when unknown)
    pub fn balance(&self, asset: &AssetId, vault: VaultId, account: AccountIndex) -> BigUint {
        self.balances
            .get(&(asset.clone(), vault, account))
            .cloned()
            .unwrap_or_default()
    }

    /// Fee schedule for sending an asset
    pub fn fee(&self, asset: &AssetId) -> Option<&Fee> {
        self.fees.get(asset)
    }

    /// Check the tables are mutually consistent.
    ///
    /// The native-asset mapping drives fee-from-balance logic, so it is
    /// checked explicitly instead of being trusted.
    pub fn validate(&self) -> Result<(), Error> {
        for asset in &self.assets {
            AssetId::parse(asset.id.as_str())?;
            let network_id = asset.id.network().ok_or_else(|| {
                Error::Config(format!("asset {} has no network prefix", asset.id))
            })?;
            if self.network(&network_id).is_none() {
                return Err(Error::Config(format!(
                    "asset {} references unknown network {}",
                    asset.id, network_id
                )));
            }
        }

        for network in &self.networks {
            let native = self.asset(&network.native_asset).ok_or_else(|| {
                Error::Config(format!(
                    "network {} native asset {} is not in the asset table",
                    network.id, network.native_asset
                ))
            })?;
            if native.id.network().as_ref() != Some(&network.id) {
                return Err(Error::Config(format!(
                    "network {} native asset {} belongs to another network",
                    network.id, native.id
                )));
            }
        }

        for (asset_id, fee) in &self.fees {
            let network = self.network_of(asset_id).ok_or_else(|| {
                Error::Config(format!("fee for unknown asset {}", asset_id))
            })?;
            if fee.asset != network.native_asset {
                return Err(Error::Config(format!(
                    "fee for {} must be paid in {}, not {}",
                    asset_id, network.native_asset, fee.asset
                )));
            }
        }

        for (network_id, vault) in self.addresses.keys() {
            if self.network(network_id).is_none() {
                return Err(Error::Config(format!(
                    "address book references unknown network {}",
                    network_id
                )));
            }
            if !self.vaults.iter().any(|v| v.id == *vault) {
                return Err(Error::Config(format!(
                    "address book references unknown {}",
                    vault
                )));
            }
        }

        Ok(())
    }

    /// Built-in demo tables
    pub fn builtin() -> Self {
        let asset = |id: &str, symbol: &str, name: &str, decimals: u32, price: Option<&str>| {
            Asset {
                id: AssetId::new(id),
                symbol: symbol.to_string(),
                name: name.to_string(),
                decimals,
                price_key: price.map(str::to_string),
            }
        };
        let network = |id: &str, name: &str, native: &str| Network {
            id: NetworkId::new(id),
            name: name.to_string(),
            native_asset: AssetId::new(native),
        };

        let assets = vec![
            asset(ETH, "ETH", "Ether", 18, Some("ETH")),
            asset(USDC_ETH, "USDC", "USD Coin", 6, Some("USDC")),
            asset(LINK_ETH, "LINK", "Chainlink", 18, None),
            asset(BTC, "BTC", "Bitcoin", 8, Some("BTC")),
            asset(SOL, "SOL", "Solana", 9, Some("SOL")),
            asset(USDC_SOL, "USDC", "USD Coin (Solana)", 6, Some("USDC")),
        ];

        let networks = vec![
            network(ETHEREUM, "Ethereum", ETH),
            network(BITCOIN, "Bitcoin", BTC),
            network(SOLANA, "Solana", SOL),
        ];

        let vaults = vec![
            Vault {
                id: VaultId(0),
                name: "Treasury".to_string(),
            },
            Vault {
                id: VaultId(1),
                name: "Operations".to_string(),
            },
            Vault {
                id: VaultId(2),
                name: "Cold Storage".to_string(),
            },
        ];

        let mut addresses: HashMap<(NetworkId, VaultId), Vec<AddressEntry>> = HashMap::new();
        let book: [(&str, u32, u32, &str, &str); 9] = [
            (ETHEREUM, 0, 0, "0x4f2a8c1e9b7d3a6f5e0c2b8d9a1f7e3c6b5d4a20", "Treasury hot wallet"),
            (ETHEREUM, 0, 1, "0x9c3e7b1d5a2f8e6c4b0d9a7f3e1c5b8d2a6f4e91", "Treasury payroll"),
            (ETHEREUM, 1, 0, "0x1b8d4f6a2c9e7b3d5f0a8c6e4b2d9f7a1c3e5b07", "Ops gas station"),
            (BITCOIN, 0, 0, "bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh", "Treasury BTC"),
            (BITCOIN, 2, 0, "bc1q9h7garjdcmk0ysh2j6ykv4t4sljm3dwq6rqyvx", "Cold BTC"),
            (SOLANA, 0, 0, "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU", "Treasury SOL"),
            (SOLANA, 1, 0, "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM", "Ops SOL"),
            (SOLANA, 1, 1, "HN7cABqLq46Es1jh92dQQisAq662SmxELLLsHHe4YWrH", "Ops rewards"),
            (ETHEREUM, 2, 0, "0xd8da6bf26964af9d7eed9e03e53415d37aa96045", "Cold ETH"),
        ];
        for (network_id, vault, account, address, label) in book {
            addresses
                .entry((NetworkId::new(network_id), VaultId(vault)))
                .or_default()
                .push(AddressEntry {
                    address: Address::new(address),
                    vault: VaultId(vault),
                    account,
                    label: label.to_string(),
                });
        }

        let mut balances: HashMap<BalanceKey, BigUint> = HashMap::new();
        let holdings: [(&str, u32, u32, u128); 12] = [
            (ETH, 0, 0, 12_500_000_000_000_000_000),
            (ETH, 0, 1, 1_000_000_000_000_000_000),
            (ETH, 1, 0, 3_000_000_000_000_000),
            (USDC_ETH, 0, 0, 250_000_000_000),
            (USDC_ETH, 1, 0, 1_234_560_000),
            (LINK_ETH, 0, 0, 4_200_000_000_000_000_000_000),
            (BTC, 0, 0, 150_000_000),
            (BTC, 2, 0, 2_100_000_000),
            (SOL, 0, 0, 420_000_000_000),
            (SOL, 1, 0, 3_000_000),
            (USDC_SOL, 0, 0, 50_000_000_000),
            (USDC_SOL, 1, 1, 75_500_000),
        ];
        for (asset_id, vault, account, amount) in holdings {
            balances.insert(
                (AssetId::new(asset_id), VaultId(vault), account),
                BigUint::from(amount),
            );
        }

        let mut fees: HashMap<AssetId, Fee> = HashMap::new();
        let schedule: [(&str, &str, u128); 6] = [
            (ETH, ETH, 2_100_000_000_000_000),
            (USDC_ETH, ETH, 4_500_000_000_000_000),
            (LINK_ETH, ETH, 4_500_000_000_000_000),
            (BTC, BTC, 2_500),
            (SOL, SOL, 5_000),
            (USDC_SOL, SOL, 5_000),
        ];
        for (asset_id, fee_asset, amount) in schedule {
            fees.insert(
                AssetId::new(asset_id),
                Fee {
                    amount: BigUint::from(amount),
                    asset: AssetId::new(fee_asset),
                },
            );
        }

        let prices: PriceTable = [
            ("ETH", 3_200.0),
            ("BTC", 65_000.0),
            ("SOL", 150.0),
            ("USDC", 1.0),
        ]
        .into_iter()
        .map(|(key, price)| (key.to_string(), price))
        .collect();

        Self {
            assets,
            networks,
            vaults,
            addresses,
            balances,
            fees,
            prices,
        }
    }
}
