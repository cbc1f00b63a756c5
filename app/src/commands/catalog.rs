use transfer_core::AddressEntry;

use super::CommandError;
use crate::state::{AddressBook, Catalog};
use crate::AppState;

/// Fetch assets, networks, vaults and prices concurrently and cache them
pub async fn load_catalog(state: &AppState) -> Result<Catalog, CommandError> {
    let api = state.api();
    let (assets, networks, vaults, prices) = futures::try_join!(
        api.list_assets(),
        api.list_networks(),
        api.list_vaults(),
        api.get_prices(),
    )
    .map_err(|e| {
        tracing::warn!(code = e.code(), "Catalog load failed: {}", e.message);
        CommandError::from(e)
    })?;

    tracing::info!(
        assets = assets.len(),
        networks = networks.len(),
        vaults = vaults.len(),
        "Catalog loaded"
    );

    let catalog = Catalog {
        assets,
        networks,
        vaults,
        prices,
    };
    state.context_lock().write().await.prices = catalog.prices.clone();
    state.set_catalog(catalog.clone()).await;
    Ok(catalog)
}

/// Address lists for the current asset and vault
pub async fn address_book(state: &AppState) -> AddressBook {
    state.addresses().await
}

/// Destinations the current asset can be sent to
pub async fn destinations(state: &AppState) -> Vec<AddressEntry> {
    state.addresses().await.known
}

#[cfg(test)]
mod tests {
    use super::*;
    use transfer_core::{AppConfig, MockApiConfig, SimulatorConfig};

    fn config(profile: SimulatorConfig) -> AppConfig {
        AppConfig {
            mock_api: MockApiConfig::uniform(profile),
            seed: Some(11),
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn test_load_catalog_caches_and_seeds_prices() {
        let state = AppState::new(config(SimulatorConfig::instant())).unwrap();
        let catalog = load_catalog(&state).await.unwrap();
        assert_eq!(catalog.assets.len(), 6);
        assert_eq!(state.catalog().await.unwrap().vaults.len(), 3);
        assert_eq!(state.context().await.prices.get("BTC"), Some(&65_000.0));
    }

    #[tokio::test]
    async fn test_load_catalog_failure_leaves_cache_empty() {
        let failing = SimulatorConfig {
            success_rate: 0.0,
            ..SimulatorConfig::instant()
        };
        let state = AppState::new(config(failing)).unwrap();
        let err = load_catalog(&state).await.unwrap_err();
        assert!(!err.code.is_empty());
        assert!(state.catalog().await.is_none());
    }

    #[tokio::test]
    async fn test_destinations_empty_before_selection() {
        let state = AppState::new(config(SimulatorConfig::instant())).unwrap();
        assert!(destinations(&state).await.is_empty());
    }
}
