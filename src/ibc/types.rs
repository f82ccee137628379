//! Types for IBC trace and metadata resolution

use serde::{Deserialize, Serialize};

/// Resolved IBC path of a transferred denomination.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DenomTrace {
	/// The chain of port/channel identifiers the coin travelled through.
	pub path: String,
	/// The base denomination on the origin chain.
	pub base_denom: String,
}

impl DenomTrace {
	/// The full denomination path, e.g. `transfer/channel-0/uatom`.
	pub fn full_path(&self) -> String {
		if self.path.is_empty() {
			self.base_denom.clone()
		} else {
			format!("{}/{}", self.path, self.base_denom)
		}
	}
}

/// Response body of the transfer module's denom trace query.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DenomTraceResponse {
	pub denom_trace: Option<DenomTrace>,
}

/// Error types for IBC lookups
#[allow(clippy::enum_variant_names)]
#[derive(Debug, thiserror::Error)]
pub enum IbcError {
	#[error("HTTP error: {0}")]
	HttpError(#[from] reqwest::Error),

	#[error("JSON parse error: {0}")]
	JsonError(#[from] serde_json::Error),

	#[error("Request failed: {0}")]
	StatusError(String),

	#[error("No data returned")]
	NoData,
}
