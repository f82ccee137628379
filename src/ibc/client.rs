//!
//! HTTP clients for IBC metadata and denom trace lookups.
//!
//! The resolver talks to its collaborators through the `MetadataSource` and `DenomTraceSource`
//! traits; the reqwest-backed clients here are the default implementations. All methods are
//! async and designed for use with Tokio.

use super::types::*;
use crate::registry::Asset;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

/// Source of asset metadata for IBC hashes.
#[async_trait::async_trait]
pub trait MetadataSource: Send + Sync {
	/// Fetch the asset record registered for `hash`.
	async fn fetch_metadata(&self, hash: &str) -> Result<Asset, IbcError>;
}

/// Chain query interface for IBC denom traces.
#[async_trait::async_trait]
pub trait DenomTraceSource: Send + Sync {
	/// Query the denom trace of `hash` from the chain.
	async fn denom_trace(&self, hash: &str) -> Result<DenomTrace, IbcError>;
}

/// Client for the metadata service (`GET <base>/metadata/{hash}`).
#[derive(Clone)]
pub struct MetadataClient {
	/// The underlying HTTP client.
	http_client: Client,
	/// Base URL of the metadata service, without a trailing slash.
	base_url: String,
}

impl MetadataClient {
	/// Create a new metadata client.
	///
	/// # Arguments
	/// * `base_url` - Base URL of the metadata service.
	/// * `timeout` - Request timeout.
	pub fn new(base_url: &str, timeout: Duration) -> Result<Self, IbcError> {
		let http_client = Client::builder().timeout(timeout).build()?;

		Ok(Self {
			http_client,
			base_url: base_url.trim_end_matches('/').to_string(),
		})
	}

	fn metadata_url(&self, hash: &str) -> String {
		format!("{}/metadata/{}", self.base_url, hash)
	}
}

#[async_trait::async_trait]
impl MetadataSource for MetadataClient {
	async fn fetch_metadata(&self, hash: &str) -> Result<Asset, IbcError> {
		let url = self.metadata_url(hash);
		debug!("Fetching IBC metadata from {}", url);
		get_json(&self.http_client, &url).await
	}
}

/// Client for a chain's REST endpoint, used for denom trace queries.
#[derive(Clone)]
pub struct RestTraceClient {
	http_client: Client,
	rest_url: String,
}

impl RestTraceClient {
	/// Create a new REST client.
	///
	/// # Arguments
	/// * `rest_url` - The chain's REST (LCD) endpoint.
	/// * `timeout` - Request timeout.
	pub fn new(rest_url: &str, timeout: Duration) -> Result<Self, IbcError> {
		let http_client = Client::builder().timeout(timeout).build()?;

		Ok(Self {
			http_client,
			rest_url: rest_url.trim_end_matches('/').to_string(),
		})
	}

	fn trace_url(&self, hash: &str) -> String {
		format!(
			"{}/ibc/apps/transfer/v1/denom_traces/{}",
			self.rest_url, hash
		)
	}
}

#[async_trait::async_trait]
impl DenomTraceSource for RestTraceClient {
	async fn denom_trace(&self, hash: &str) -> Result<DenomTrace, IbcError> {
		let url = self.trace_url(hash);
		debug!("Querying denom trace from {}", url);

		let response: DenomTraceResponse = get_json(&self.http_client, &url).await?;
		response.denom_trace.ok_or(IbcError::NoData)
	}
}

/// Execute a GET request and decode the JSON body.
async fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, IbcError> {
	let response = client
		.get(url)
		.header("Accept", "application/json")
		.send()
		.await?;

	let status = response.status();
	if !status.is_success() {
		error!("Request to {} returned HTTP {}", url, status);
		return Err(IbcError::StatusError(format!("HTTP error: {}", status)));
	}

	let body = response.text().await?;
	if body.trim().is_empty() {
		return Err(IbcError::NoData);
	}

	Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_metadata_url() {
		let client =
			MetadataClient::new("https://metadata.ping.pub/", Duration::from_secs(5)).unwrap();
		let hash = "27394FB092D2ECCD56123C74F36E4C1F926001CEADA9CA97EA622B25F41E5EB2";
		assert_eq!(
			client.metadata_url(hash),
			format!("https://metadata.ping.pub/metadata/{}", hash)
		);
	}

	#[test]
	fn test_trace_url() {
		let client =
			RestTraceClient::new("https://rest.cosmos.directory/osmosis", Duration::from_secs(5))
				.unwrap();
		assert_eq!(
			client.trace_url("ABC"),
			"https://rest.cosmos.directory/osmosis/ibc/apps/transfer/v1/denom_traces/ABC"
		);
	}
}
