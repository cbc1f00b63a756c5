//! Application state shared across commands

use std::sync::Arc;

use mock_api::MockApi;
use serde::Serialize;
use tokio::sync::RwLock;
use transfer::{FormContext, TransferForm};
use transfer_core::{AddressEntry, AppConfig, Asset, AssetId, Error, Network, PriceTable, Vault};

/// Catalog loaded once per session
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub assets: Vec<Asset>,
    pub networks: Vec<Network>,
    pub vaults: Vec<Vault>,
    pub prices: PriceTable,
}

impl Catalog {
    pub fn asset(&self, id: &AssetId) -> Option<&Asset> {
        self.assets.iter().find(|a| &a.id == id)
    }
}

/// Address lists for the current selection
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressBook {
    /// Entries of the selected vault on the asset's network
    pub vault: Vec<AddressEntry>,
    /// Every known entry on the asset's network; destinations must be one of these
    pub known: Vec<AddressEntry>,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    api: MockApi,
    catalog: RwLock<Option<Catalog>>,
    form: RwLock<TransferForm>,
    context: RwLock<FormContext>,
    addresses: RwLock<AddressBook>,
}

impl AppState {
    /// Create state over the built-in mock backend
    pub fn new(config: AppConfig) -> Result<Self, Error> {
        let api = MockApi::from_config(&config)?;
        Ok(Self::with_api(api))
    }

    /// Create state over a specific client
    pub fn with_api(api: MockApi) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                api,
                catalog: RwLock::new(None),
                form: RwLock::new(TransferForm::new()),
                context: RwLock::new(FormContext::default()),
                addresses: RwLock::new(AddressBook::default()),
            }),
        }
    }

    pub fn api(&self) -> &MockApi {
        &self.inner.api
    }

    pub async fn catalog(&self) -> Option<Catalog> {
        self.inner.catalog.read().await.clone()
    }

    pub(crate) async fn set_catalog(&self, catalog: Catalog) {
        *self.inner.catalog.write().await = Some(catalog);
    }

    pub async fn form(&self) -> TransferForm {
        self.inner.form.read().await.clone()
    }

    pub(crate) fn form_lock(&self) -> &RwLock<TransferForm> {
        &self.inner.form
    }

    pub async fn context(&self) -> FormContext {
        self.inner.context.read().await.clone()
    }

    pub(crate) fn context_lock(&self) -> &RwLock<FormContext> {
        &self.inner.context
    }

    pub async fn addresses(&self) -> AddressBook {
        self.inner.addresses.read().await.clone()
    }

    pub(crate) fn addresses_lock(&self) -> &RwLock<AddressBook> {
        &self.inner.addresses
    }
}
