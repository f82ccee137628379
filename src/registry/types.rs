//! Types mirroring the chain-registry `assets` schema.

use serde::{Deserialize, Serialize};

/// A single denomination unit of an asset, e.g. `uatom` at exponent 0 or `atom` at exponent 6.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DenomUnit {
	pub denom: String,
	pub exponent: u32,
	pub aliases: Vec<String>,
}

impl DenomUnit {
	pub fn new(denom: impl Into<String>, exponent: u32) -> Self {
		Self {
			denom: denom.into(),
			exponent,
			aliases: Vec::new(),
		}
	}
}

/// Base denomination of an asset.
///
/// Most registries store the base as a plain string. Some collapsed representations
/// nest it inside an object (`{"denom": "uatom"}`); both forms deserialize here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum AssetBase {
	/// `"base": "uatom"`
	Plain(String),
	/// `"base": {"denom": "uatom"}`
	Nested { denom: String },
}

impl Default for AssetBase {
	fn default() -> Self {
		AssetBase::Plain(String::new())
	}
}

impl AssetBase {
	/// The base denomination regardless of representation.
	pub fn denom(&self) -> &str {
		match self {
			AssetBase::Plain(denom) => denom,
			AssetBase::Nested { denom } => denom,
		}
	}

	/// Strict comparison used by global lookups: only the plain form can match.
	pub fn is_plain(&self, denom: &str) -> bool {
		matches!(self, AssetBase::Plain(base) if base == denom)
	}

	/// Lenient comparison used by local lookups: either form may match.
	pub fn matches(&self, denom: &str) -> bool {
		self.denom() == denom
	}
}

impl From<&str> for AssetBase {
	fn from(denom: &str) -> Self {
		AssetBase::Plain(denom.to_string())
	}
}

/// A registered asset and its denomination units.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Asset {
	pub base: AssetBase,
	pub denom_units: Vec<DenomUnit>,
	pub display: String,
	pub symbol: String,
	pub name: String,
	pub coingecko_id: String,
}

impl Asset {
	/// Create an asset with the given base and units; the remaining fields stay empty.
	pub fn new(base: impl Into<String>, denom_units: Vec<DenomUnit>) -> Self {
		Self {
			base: AssetBase::Plain(base.into()),
			denom_units,
			..Default::default()
		}
	}
}

/// Asset list of one chain, as published in the chain registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChainAssets {
	pub chain_name: String,
	pub assets: Vec<Asset>,
}

impl ChainAssets {
	pub fn new(chain_name: impl Into<String>, assets: Vec<Asset>) -> Self {
		Self {
			chain_name: chain_name.into(),
			assets,
		}
	}

	/// Find an asset on this chain, accepting both plain and nested base forms.
	pub fn find_local(&self, denom: &str) -> Option<&Asset> {
		self.assets.iter().find(|asset| asset.base.matches(denom))
	}
}

/// The display unit chosen for a denomination at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedUnit {
	pub exponent: u32,
	pub symbol: String,
}

impl ResolvedUnit {
	pub fn new(exponent: u32, symbol: impl Into<String>) -> Self {
		Self {
			exponent,
			symbol: symbol.into(),
		}
	}

	/// Zero-exponent fallback that keeps the raw denomination as the symbol.
	pub fn unresolved(denom: &str) -> Self {
		Self::new(0, denom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_asset_base_accepts_both_forms() {
		let plain: AssetBase = serde_json::from_str(r#""uatom""#).unwrap();
		let nested: AssetBase = serde_json::from_str(r#"{"denom":"uatom"}"#).unwrap();

		assert_eq!(plain, AssetBase::Plain("uatom".to_string()));
		assert_eq!(nested.denom(), "uatom");
		assert!(plain.is_plain("uatom"));
		assert!(!nested.is_plain("uatom"));
		assert!(nested.matches("uatom"));
	}

	#[test]
	fn test_asset_deserializes_registry_record() {
		let json = r#"{
			"description": "The native staking token of the Cosmos Hub.",
			"denom_units": [
				{"denom": "uatom", "exponent": 0},
				{"denom": "atom", "exponent": 6}
			],
			"base": "uatom",
			"name": "Cosmos Hub Atom",
			"display": "atom",
			"symbol": "ATOM",
			"coingecko_id": "cosmos"
		}"#;

		let asset: Asset = serde_json::from_str(json).unwrap();
		assert_eq!(asset.base.denom(), "uatom");
		assert_eq!(asset.denom_units.len(), 2);
		assert_eq!(asset.denom_units[1].exponent, 6);
		assert_eq!(asset.coingecko_id, "cosmos");
	}

	#[test]
	fn test_find_local_matches_nested_base() {
		let mut asset = Asset::new("uosmo", vec![DenomUnit::new("osmo", 6)]);
		asset.base = AssetBase::Nested {
			denom: "uosmo".to_string(),
		};
		let chain = ChainAssets::new("osmosis", vec![asset]);

		assert!(chain.find_local("uosmo").is_some());
		assert!(chain.find_local("uatom").is_none());
	}
}
