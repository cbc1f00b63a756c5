//! Core type definitions for Vaultline

use std::collections::HashMap;
use std::fmt;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Chain-namespaced asset identifier: `<family>:<chainRef>/<assetRef>`
/// (e.g. "eip155:1/slip44:60")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(pub String);

impl AssetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse and validate an asset identifier
    pub fn parse(id: &str) -> Result<Self, Error> {
        let asset = Self::new(id);
        if asset.parts().is_none() {
            return Err(Error::InvalidIdentifier(format!(
                "asset id must look like <family>:<chainRef>/<assetRef>, got '{}'",
                id
            )));
        }
        Ok(asset)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into (family, chain reference, asset reference)
    pub fn parts(&self) -> Option<(&str, &str, &str)> {
        let (network, asset_ref) = self.0.split_once('/')?;
        let (family, chain_ref) = network.split_once(':')?;
        if family.is_empty() || chain_ref.is_empty() || asset_ref.is_empty() {
            return None;
        }
        if chain_ref.contains(':') {
            return None;
        }
        Some((family, chain_ref, asset_ref))
    }

    /// Network this asset lives on, derived from the identifier prefix
    pub fn network(&self) -> Option<NetworkId> {
        self.parts()
            .map(|(family, chain_ref, _)| NetworkId::new(format!("{}:{}", family, chain_ref)))
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Chain-namespaced network identifier: `<family>:<chainRef>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkId(pub String);

impl NetworkId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Vault index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VaultId(pub u32);

impl fmt::Display for VaultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vault-{}", self.0)
    }
}

/// Account index within a vault
pub type AccountIndex = u32;

/// On-chain address (format depends on the network family)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub String);

impl Address {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transferable asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub symbol: String,
    pub name: String,
    /// Number of fractional digits in one whole token
    pub decimals: u32,
    /// Key into the price table (None = no USD estimate)
    #[serde(default)]
    pub price_key: Option<String>,
}

impl Asset {
    pub fn network(&self) -> Option<NetworkId> {
        self.id.network()
    }
}

/// Network with its fee-paying native asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub id: NetworkId,
    pub name: String,
    pub native_asset: AssetId,
}

/// Custody unit grouping accounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    pub id: VaultId,
    pub name: String,
}

/// Address book entry for a (network, vault) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressEntry {
    pub address: Address,
    pub vault: VaultId,
    pub account: AccountIndex,
    pub label: String,
}

/// Network fee for sending an asset, in base units of the network's native asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
    pub amount: BigUint,
    pub asset: AssetId,
}

/// Validated transfer ready for submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub asset: AssetId,
    pub vault: VaultId,
    pub account: AccountIndex,
    pub destination: Address,
    /// Amount in base units of `asset`
    pub amount: BigUint,
    #[serde(default)]
    pub memo: Option<String>,
}

/// Submission status reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    Submitted,
}

/// Backend acknowledgement of a submitted transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub transfer_id: String,
    pub tx_hash: String,
    pub status: TransferStatus,
}

/// USD price per whole token, keyed by `Asset::price_key`
pub type PriceTable = HashMap<String, f64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_id_parts() {
        let id = AssetId::new("eip155:1/slip44:60");
        assert_eq!(id.parts(), Some(("eip155", "1", "slip44:60")));
        assert_eq!(id.network(), Some(NetworkId::new("eip155:1")));
    }

    #[test]
    fn test_asset_id_rejects_malformed() {
        assert!(AssetId::parse("eip155/slip44:60").is_err());
        assert!(AssetId::parse("eip155:1").is_err());
        assert!(AssetId::parse(":1/erc20:0xabc").is_err());
        assert!(AssetId::parse("eip155:/erc20:0xabc").is_err());
        assert!(AssetId::parse("bip122:000000000019d6689c085ae165831e93/slip44:0").is_ok());
    }

    #[test]
    fn test_vault_display() {
        assert_eq!(VaultId(3).to_string(), "vault-3");
    }
}
