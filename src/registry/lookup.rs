use super::types::{Asset, ChainAssets, ResolvedUnit};

use std::path::Path;
use tracing::{debug, info};

/// Error types for loading asset registry snapshots
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),

	#[error("JSON parse error: {0}")]
	JsonError(#[from] serde_json::Error),
}

/// Read-only lookup over the asset lists of every known chain.
///
/// Chains are scanned in the order they were supplied, so when two chains register the
/// same base denomination the earlier one wins.
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
	chains: Vec<ChainAssets>,
}

impl AssetRegistry {
	/// Build a registry from chain asset lists.
	pub fn from_chains(chains: Vec<ChainAssets>) -> Self {
		Self { chains }
	}

	/// Load a registry snapshot from a JSON file holding an array of chain asset lists.
	pub async fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
		let path = path.as_ref();
		let contents = tokio::fs::read_to_string(path).await?;
		let chains: Vec<ChainAssets> = serde_json::from_str(&contents)?;

		info!(
			"Loaded asset registry from {:?} with {} chains",
			path,
			chains.len()
		);
		Ok(Self::from_chains(chains))
	}

	/// Find the first asset, across all chains, whose plain base denomination equals `denom`.
	pub fn find_asset(&self, denom: &str) -> Option<&Asset> {
		let found = self
			.chains
			.iter()
			.flat_map(|chain| chain.assets.iter())
			.find(|asset| asset.base.is_plain(denom));

		if found.is_none() {
			debug!("No registry asset found for denom {}", denom);
		}
		found
	}

	/// Look up a chain's asset list by name.
	pub fn chain(&self, chain_name: &str) -> Option<&ChainAssets> {
		self.chains
			.iter()
			.find(|chain| chain.chain_name == chain_name)
	}

	pub fn chains(&self) -> &[ChainAssets] {
		&self.chains
	}

	pub fn len(&self) -> usize {
		self.chains.len()
	}

	pub fn is_empty(&self) -> bool {
		self.chains.is_empty()
	}
}

/// Pick the display unit of an asset: the unit with the largest exponent.
///
/// Ties go to the unit seen last. An asset without units resolves to `{0, ""}`.
pub fn display_unit(asset: &Asset) -> ResolvedUnit {
	let mut unit = ResolvedUnit::default();
	for candidate in &asset.denom_units {
		if candidate.exponent >= unit.exponent {
			unit = ResolvedUnit::new(candidate.exponent, candidate.denom.as_str());
		}
	}
	unit
}
