//! Resolver configuration.
//!
//! Settings are read from `DENOM_*` environment variables, falling back to defaults for
//! anything unset.

use crate::amount::AmountResolver;
use crate::ibc::{DenomTraceSource, IbcError, IbcResolver, MetadataClient, RestTraceClient};
use crate::price::PriceSource;
use crate::registry::{AssetRegistry, RegistryError};

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub const METADATA_URL_VAR: &str = "DENOM_METADATA_URL";
pub const REST_ENDPOINT_VAR: &str = "DENOM_REST_ENDPOINT";
pub const ASSET_REGISTRY_VAR: &str = "DENOM_ASSET_REGISTRY";
pub const CURRENCY_VAR: &str = "DENOM_CURRENCY";
pub const HTTP_TIMEOUT_VAR: &str = "DENOM_HTTP_TIMEOUT_SECS";

const DEFAULT_METADATA_URL: &str = "https://metadata.ping.pub";
const DEFAULT_CURRENCY: &str = "usd";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Error types for configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("Invalid configuration value: {0}")]
	InvalidValue(String),

	#[error("IBC client error: {0}")]
	IbcError(#[from] IbcError),

	#[error("Asset registry error: {0}")]
	RegistryError(#[from] RegistryError),
}

/// Configuration for building an `AmountResolver`
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverConfig {
	/// Base URL of the IBC metadata service
	pub metadata_base_url: String,
	/// Chain REST endpoint used for denom trace queries
	pub rest_endpoint: Option<String>,
	/// JSON file holding the asset registry (an array of chain asset lists)
	pub asset_registry_path: Option<PathBuf>,
	/// Currency used for token values
	pub currency: String,
	/// Timeout for outgoing HTTP requests
	pub request_timeout: Duration,
}

impl Default for ResolverConfig {
	fn default() -> Self {
		Self {
			metadata_base_url: DEFAULT_METADATA_URL.to_string(),
			rest_endpoint: None,
			asset_registry_path: None,
			currency: DEFAULT_CURRENCY.to_string(),
			request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
		}
	}
}

impl ResolverConfig {
	/// Read the configuration from the process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Read the configuration through `lookup`, which maps a variable name to its value.
	///
	/// Empty values count as unset.
	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
		let get = |key: &str| {
			lookup(key)
				.map(|value| value.trim().to_string())
				.filter(|value| !value.is_empty())
		};
		let defaults = Self::default();

		let request_timeout = match get(HTTP_TIMEOUT_VAR) {
			Some(secs) => {
				let secs: u64 = secs.parse().map_err(|_| {
					ConfigError::InvalidValue(format!(
						"{} must be a whole number, got {:?}",
						HTTP_TIMEOUT_VAR, secs
					))
				})?;
				if secs == 0 {
					return Err(ConfigError::InvalidValue(format!(
						"{} must be positive",
						HTTP_TIMEOUT_VAR
					)));
				}
				Duration::from_secs(secs)
			}
			None => defaults.request_timeout,
		};

		Ok(Self {
			metadata_base_url: get(METADATA_URL_VAR).unwrap_or(defaults.metadata_base_url),
			rest_endpoint: get(REST_ENDPOINT_VAR),
			asset_registry_path: get(ASSET_REGISTRY_VAR).map(PathBuf::from),
			currency: get(CURRENCY_VAR)
				.map(|currency| currency.to_lowercase())
				.unwrap_or(defaults.currency),
			request_timeout,
		})
	}

	/// Load the configured asset registry, or an empty one when no file is configured.
	pub async fn load_registry(&self) -> Result<AssetRegistry, ConfigError> {
		match &self.asset_registry_path {
			Some(path) => Ok(AssetRegistry::load(path).await?),
			None => {
				info!("No asset registry configured, starting with an empty registry");
				Ok(AssetRegistry::default())
			}
		}
	}

	/// Build the HTTP-backed IBC resolver.
	///
	/// Without a REST endpoint, trace queries fail with `IbcError::NoData`.
	pub fn ibc_resolver(&self) -> Result<IbcResolver, ConfigError> {
		let metadata = MetadataClient::new(&self.metadata_base_url, self.request_timeout)?;
		let traces: Box<dyn DenomTraceSource> = match &self.rest_endpoint {
			Some(endpoint) => Box::new(RestTraceClient::new(endpoint, self.request_timeout)?),
			None => Box::new(NoTraceSource),
		};
		Ok(IbcResolver::new(Arc::new(metadata), traces))
	}

	/// Build an `AmountResolver` from this configuration and the given price data.
	pub async fn build_resolver(
		&self,
		prices: Arc<dyn PriceSource>,
	) -> Result<AmountResolver, ConfigError> {
		let registry = self.load_registry().await?;
		let ibc = self.ibc_resolver()?;
		Ok(AmountResolver::new(Arc::new(registry), ibc, prices).with_currency(&self.currency))
	}
}

/// Trace source used when no REST endpoint is configured.
struct NoTraceSource;

#[async_trait::async_trait]
impl DenomTraceSource for NoTraceSource {
	async fn denom_trace(&self, _hash: &str) -> Result<crate::ibc::DenomTrace, IbcError> {
		Err(IbcError::NoData)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::price::StaticPriceSource;
	use std::collections::HashMap;

	fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let vars: HashMap<String, String> = vars
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		move |key: &str| vars.get(key).cloned()
	}

	#[test]
	fn test_defaults_when_unset() {
		let config = ResolverConfig::from_lookup(lookup(&[])).unwrap();
		assert_eq!(config, ResolverConfig::default());
		assert_eq!(config.metadata_base_url, "https://metadata.ping.pub");
		assert_eq!(config.currency, "usd");
		assert_eq!(config.request_timeout, Duration::from_secs(30));
	}

	#[test]
	fn test_reads_all_variables() {
		let config = ResolverConfig::from_lookup(lookup(&[
			(METADATA_URL_VAR, "http://localhost:8080/"),
			(REST_ENDPOINT_VAR, "https://rest.cosmos.directory/cosmoshub"),
			(ASSET_REGISTRY_VAR, "/tmp/assets.json"),
			(CURRENCY_VAR, "EUR"),
			(HTTP_TIMEOUT_VAR, "5"),
		]))
		.unwrap();

		assert_eq!(config.metadata_base_url, "http://localhost:8080/");
		assert_eq!(
			config.rest_endpoint.as_deref(),
			Some("https://rest.cosmos.directory/cosmoshub")
		);
		assert_eq!(config.asset_registry_path, Some(PathBuf::from("/tmp/assets.json")));
		assert_eq!(config.currency, "eur");
		assert_eq!(config.request_timeout, Duration::from_secs(5));
	}

	#[test]
	fn test_empty_values_count_as_unset() {
		let config =
			ResolverConfig::from_lookup(lookup(&[(REST_ENDPOINT_VAR, "  "), (CURRENCY_VAR, "")]))
				.unwrap();
		assert_eq!(config.rest_endpoint, None);
		assert_eq!(config.currency, "usd");
	}

	#[test]
	fn test_invalid_timeout() {
		for value in ["soon", "0", "-1"] {
			let result = ResolverConfig::from_lookup(lookup(&[(HTTP_TIMEOUT_VAR, value)]));
			assert!(
				matches!(result, Err(ConfigError::InvalidValue(_))),
				"timeout {:?} should be rejected",
				value
			);
		}
	}

	#[tokio::test]
	async fn test_build_resolver_without_registry_file() {
		let config = ResolverConfig {
			currency: "eur".to_string(),
			..ResolverConfig::default()
		};
		let mut resolver = config
			.build_resolver(Arc::new(StaticPriceSource::new()))
			.await
			.unwrap();

		assert!(resolver.registry().is_empty());
		assert_eq!(resolver.currency(), "eur");
		assert!(matches!(
			resolver.resolve_trace("ibc/ABC").await,
			Err(crate::amount::AmountError::IbcError(IbcError::NoData))
		));
	}

	#[tokio::test]
	async fn test_missing_registry_file() {
		let config = ResolverConfig {
			asset_registry_path: Some(PathBuf::from("/nonexistent/denom-display/assets.json")),
			..ResolverConfig::default()
		};
		assert!(matches!(
			config.load_registry().await,
			Err(ConfigError::RegistryError(RegistryError::IoError(_)))
		));
	}
}
