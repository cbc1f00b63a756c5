//! Configuration types for Vaultline

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Latency and failure profile for one simulated endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Lower bound of the settlement delay (milliseconds)
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,

    /// Upper bound of the settlement delay (milliseconds, inclusive)
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Probability in [0, 1] that a call resolves
    #[serde(default = "default_success_rate")]
    pub success_rate: f64,

    /// Replaces the random failure archetype with a generic error carrying this message
    #[serde(default)]
    pub error_message: Option<String>,

    /// Emit tracing events around the delay
    #[serde(default)]
    pub enable_logging: bool,
}

fn default_min_delay_ms() -> u64 {
    300
}

fn default_max_delay_ms() -> u64 {
    1500
}

fn default_success_rate() -> f64 {
    0.9
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            success_rate: default_success_rate(),
            error_message: None,
            enable_logging: false,
        }
    }
}

impl SimulatorConfig {
    /// Profile with the given success rate and default delays
    pub fn with_success_rate(success_rate: f64) -> Self {
        Self {
            success_rate,
            ..Self::default()
        }
    }

    /// Zero-latency, always-successful profile
    pub fn instant() -> Self {
        Self {
            min_delay_ms: 0,
            max_delay_ms: 0,
            success_rate: 1.0,
            ..Self::default()
        }
    }

    pub fn delays(mut self, min_delay_ms: u64, max_delay_ms: u64) -> Self {
        self.min_delay_ms = min_delay_ms;
        self.max_delay_ms = max_delay_ms;
        self
    }

    pub fn min_delay(&self) -> Duration {
        Duration::from_millis(self.min_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }

    /// Reject profiles the simulator cannot honour
    pub fn validate(&self) -> Result<(), Error> {
        if !(0.0..=1.0).contains(&self.success_rate) {
            return Err(Error::Config(format!(
                "success_rate must be within [0, 1], got {}",
                self.success_rate
            )));
        }
        if self.min_delay_ms > self.max_delay_ms {
            return Err(Error::Config(format!(
                "min_delay_ms ({}) exceeds max_delay_ms ({})",
                self.min_delay_ms, self.max_delay_ms
            )));
        }
        Ok(())
    }
}

/// Per-endpoint simulator profiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockApiConfig {
    #[serde(default = "default_catalog_profile")]
    pub assets: SimulatorConfig,
    #[serde(default = "default_catalog_profile")]
    pub networks: SimulatorConfig,
    #[serde(default = "default_catalog_profile")]
    pub vaults: SimulatorConfig,
    #[serde(default = "default_catalog_profile")]
    pub addresses: SimulatorConfig,
    #[serde(default = "default_balance_profile")]
    pub balances: SimulatorConfig,
    #[serde(default = "default_catalog_profile")]
    pub fees: SimulatorConfig,
    #[serde(default = "default_balance_profile")]
    pub prices: SimulatorConfig,
    #[serde(default = "default_submit_profile")]
    pub submit: SimulatorConfig,
}

fn default_catalog_profile() -> SimulatorConfig {
    SimulatorConfig::with_success_rate(0.95)
}

fn default_balance_profile() -> SimulatorConfig {
    SimulatorConfig::with_success_rate(0.98).delays(200, 800)
}

fn default_submit_profile() -> SimulatorConfig {
    SimulatorConfig::with_success_rate(0.8).delays(1000, 3000)
}

impl Default for MockApiConfig {
    fn default() -> Self {
        Self {
            assets: default_catalog_profile(),
            networks: default_catalog_profile(),
            vaults: default_catalog_profile(),
            addresses: default_catalog_profile(),
            balances: default_balance_profile(),
            fees: default_catalog_profile(),
            prices: default_balance_profile(),
            submit: default_submit_profile(),
        }
    }
}

impl MockApiConfig {
    /// Same profile for every endpoint
    pub fn uniform(profile: SimulatorConfig) -> Self {
        Self {
            assets: profile.clone(),
            networks: profile.clone(),
            vaults: profile.clone(),
            addresses: profile.clone(),
            balances: profile.clone(),
            fees: profile.clone(),
            prices: profile.clone(),
            submit: profile,
        }
    }

    fn profiles(&self) -> [(&'static str, &SimulatorConfig); 8] {
        [
            ("assets", &self.assets),
            ("networks", &self.networks),
            ("vaults", &self.vaults),
            ("addresses", &self.addresses),
            ("balances", &self.balances),
            ("fees", &self.fees),
            ("prices", &self.prices),
            ("submit", &self.submit),
        ]
    }

    pub fn validate(&self) -> Result<(), Error> {
        for (endpoint, profile) in self.profiles() {
            profile
                .validate()
                .map_err(|e| Error::Config(format!("{} endpoint: {}", endpoint, e)))?;
        }
        Ok(())
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Simulated backend behaviour
    #[serde(default)]
    pub mock_api: MockApiConfig,

    /// Seed for the simulator's random source (None = entropy)
    #[serde(default)]
    pub seed: Option<u64>,

    /// Tracing filter directive used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "info,vaultline=debug".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mock_api: MockApiConfig::default(),
            seed: None,
            log_filter: default_log_filter(),
        }
    }
}

impl AppConfig {
    /// Parse and validate a JSON config document
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: AppConfig =
            serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
        config.mock_api.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_simulator_config() {
        let config = SimulatorConfig::default();
        assert_eq!(config.min_delay_ms, 300);
        assert_eq!(config.max_delay_ms, 1500);
        assert_eq!(config.success_rate, 0.9);
        assert!(config.error_message.is_none());
        assert!(!config.enable_logging);
    }

    #[test]
    fn test_simulator_config_validation() {
        assert!(SimulatorConfig::default().validate().is_ok());
        assert!(SimulatorConfig::with_success_rate(1.5).validate().is_err());
        assert!(SimulatorConfig::with_success_rate(f64::NAN).validate().is_err());
        assert!(SimulatorConfig::default().delays(900, 100).validate().is_err());
        assert!(SimulatorConfig::instant().validate().is_ok());
    }

    #[test]
    fn test_submit_less_reliable_than_balances() {
        let config = MockApiConfig::default();
        assert!(config.submit.success_rate < config.balances.success_rate);
    }

    #[test]
    fn test_config_from_partial_json() {
        let config =
            AppConfig::from_json(r#"{"seed": 7, "mock_api": {"submit": {"success_rate": 0.5}}}"#)
                .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.mock_api.submit.success_rate, 0.5);
        assert_eq!(config.mock_api.submit.min_delay_ms, 300);
        assert_eq!(config.mock_api.assets, MockApiConfig::default().assets);
    }

    #[test]
    fn test_config_rejects_invalid_profile() {
        let err = AppConfig::from_json(r#"{"mock_api": {"fees": {"success_rate": 2.0}}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("fees endpoint"));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
