//! Randomized latency and failure injection
//!
//! Every call draws a delay uniformly from `[min_delay, max_delay]` and an
//! outcome from the configured success rate, then settles after the delay.
//! The random source is owned by the [`Simulator`] so tests can seed it.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use transfer_core::{ApiError, ApiErrorKind, SimulatorConfig};

/// What a simulated call will do once its delay elapses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Resolve,
    Reject(ApiError),
}

/// Delay and outcome drawn for a single call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallPlan {
    pub delay: Duration,
    pub outcome: Outcome,
}

/// Stand-in for a remote API: resolves or rejects after a random delay
pub struct Simulator {
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl Simulator {
    /// Simulator backed by an OS-seeded generator
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible simulator
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Simulator driven by an arbitrary random source
    pub fn with_rng(rng: impl RngCore + Send + 'static) -> Self {
        Self {
            rng: Mutex::new(Box::new(rng)),
        }
    }

    fn rng(&self) -> MutexGuard<'_, Box<dyn RngCore + Send>> {
        // A panic while drawing cannot leave the generator in an unusable state
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Draw the delay and outcome for one call.
    ///
    /// Inverted delay bounds are swapped and the success rate is clamped to
    /// `[0, 1]` (NaN counts as 0) so a bad profile never panics here;
    /// `SimulatorConfig::validate` is where profiles get rejected.
    pub fn plan(&self, config: &SimulatorConfig) -> CallPlan {
        let lo = config.min_delay_ms.min(config.max_delay_ms);
        let hi = config.min_delay_ms.max(config.max_delay_ms);
        let success_rate = if config.success_rate.is_nan() {
            0.0
        } else {
            config.success_rate.clamp(0.0, 1.0)
        };

        let mut rng = self.rng();
        let delay = Duration::from_millis(rng.gen_range(lo..=hi));

        let outcome = if rng.gen_bool(success_rate) {
            Outcome::Resolve
        } else {
            let error = match &config.error_message {
                Some(message) => ApiError::new(ApiErrorKind::Generic, message.clone()),
                None => {
                    let index = rng.gen_range(0..ApiErrorKind::ARCHETYPES.len());
                    ApiError::from_kind(ApiErrorKind::ARCHETYPES[index])
                }
            };
            Outcome::Reject(error)
        };

        CallPlan { delay, outcome }
    }

    /// Settle with `payload` or a simulated error after a random delay
    pub async fn simulate<T>(&self, payload: T, config: &SimulatorConfig) -> Result<T, ApiError> {
        self.simulate_endpoint("request", payload, config).await
    }

    /// Same as [`Simulator::simulate`], tagging log events with an endpoint name
    pub async fn simulate_endpoint<T>(
        &self,
        endpoint: &str,
        payload: T,
        config: &SimulatorConfig,
    ) -> Result<T, ApiError> {
        let plan = self.plan(config);

        if config.enable_logging {
            tracing::info!(
                endpoint,
                delay_ms = plan.delay.as_millis() as u64,
                success_rate = config.success_rate,
                "Mock request started"
            );
        }

        tokio::time::sleep(plan.delay).await;

        match plan.outcome {
            Outcome::Resolve => {
                if config.enable_logging {
                    tracing::info!(endpoint, "Mock request resolved");
                }
                Ok(payload)
            }
            Outcome::Reject(error) => {
                if config.enable_logging {
                    tracing::warn!(
                        endpoint,
                        code = error.code(),
                        status = error.status(),
                        message = %error.message,
                        "Mock request rejected"
                    );
                }
                Err(error)
            }
        }
    }

    /// Random 32-byte hash, hex-encoded with a `0x` prefix
    pub fn random_hash(&self) -> String {
        let mut bytes = [0u8; 32];
        self.rng().fill_bytes(&mut bytes);
        format!("0x{}", hex::encode(bytes))
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}
