//! Fixtures shared by the unit tests.

use crate::amount::AmountResolver;
use crate::ibc::{DenomTrace, DenomTraceSource, IbcError, IbcResolver, MetadataSource};
use crate::price::{CoinInfo, PriceQuote, StaticPriceSource};
use crate::registry::{Asset, AssetRegistry, ChainAssets, DenomUnit};

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// IBC hash of OSMO on the Cosmos Hub.
pub const OSMO_HASH: &str = "14F9BC3E44B8A9C1BE1FB08980FAB87034C9905EF17CF2F5008FC085218811CC";

fn asset(base: &str, symbol: &str, units: &[(&str, u32)]) -> Asset {
	let mut asset = Asset::new(
		base,
		units
			.iter()
			.map(|(denom, exponent)| DenomUnit::new(*denom, *exponent))
			.collect(),
	);
	asset.symbol = symbol.to_string();
	asset
}

pub fn cosmoshub() -> ChainAssets {
	ChainAssets::new(
		"cosmoshub",
		vec![
			asset("uatom", "ATOM", &[("uatom", 0), ("atom", 6)]),
			asset("stake", "STAKE", &[("stake", 0), ("STAKE", 8)]),
		],
	)
}

pub fn osmosis() -> ChainAssets {
	ChainAssets::new(
		"osmosis",
		vec![
			asset("uosmo", "OSMO", &[("uosmo", 0), ("osmo", 6)]),
			asset("gamm/pool/1", "GAMM-1", &[("gamm/pool/1", 0)]),
		],
	)
}

pub fn registry() -> AssetRegistry {
	AssetRegistry::from_chains(vec![cosmoshub(), osmosis()])
}

pub fn osmo_metadata() -> Asset {
	let denom = format!("ibc/{}", OSMO_HASH);
	asset(&denom, "OSMO", &[(denom.as_str(), 0), ("osmo", 6)])
}

pub fn price_source() -> StaticPriceSource {
	let atom = CoinInfo {
		coin_id: "cosmos".to_string(),
		symbol: "ATOM".to_string(),
		exponent: 6,
	};

	StaticPriceSource::new()
		.with_coin("uatom", atom.clone())
		.with_coin("atom", atom)
		.with_coin(
			"stake",
			CoinInfo {
				coin_id: "stake-coin".to_string(),
				symbol: "STAKE".to_string(),
				exponent: 2,
			},
		)
		.with_price(
			"cosmos",
			"usd",
			PriceQuote {
				value: 10.0,
				change_24h: 2.5,
			},
		)
		.with_price(
			"cosmos",
			"eur",
			PriceQuote {
				value: 9.0,
				change_24h: 2.1,
			},
		)
}

/// Resolver over the fixture registry, with the Cosmos Hub as the current chain.
pub fn amount_resolver() -> AmountResolver {
	let metadata = CountingMetadataSource::with_asset(OSMO_HASH, osmo_metadata());
	let traces = StaticTraceSource::default().with_trace(
		OSMO_HASH,
		DenomTrace {
			path: "transfer/channel-141".to_string(),
			base_denom: "uosmo".to_string(),
		},
	);
	let ibc = IbcResolver::new(Arc::new(metadata), Box::new(traces));

	AmountResolver::new(Arc::new(registry()), ibc, Arc::new(price_source()))
		.with_current_chain(cosmoshub())
}

/// Metadata source serving fixed assets and counting fetches.
#[derive(Default)]
pub struct CountingMetadataSource {
	assets: HashMap<String, Asset>,
	pub calls: Arc<AtomicUsize>,
}

impl CountingMetadataSource {
	pub fn with_asset(hash: &str, asset: Asset) -> Self {
		let mut source = Self::default();
		source.assets.insert(hash.to_string(), asset);
		source
	}
}

#[async_trait::async_trait]
impl MetadataSource for CountingMetadataSource {
	async fn fetch_metadata(&self, hash: &str) -> Result<Asset, IbcError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		self.assets.get(hash).cloned().ok_or(IbcError::NoData)
	}
}

/// Trace source serving fixed traces and counting queries.
#[derive(Default)]
pub struct StaticTraceSource {
	traces: HashMap<String, DenomTrace>,
	pub calls: Arc<AtomicUsize>,
}

impl StaticTraceSource {
	pub fn with_trace(mut self, hash: &str, trace: DenomTrace) -> Self {
		self.traces.insert(hash.to_string(), trace);
		self
	}
}

#[async_trait::async_trait]
impl DenomTraceSource for StaticTraceSource {
	async fn denom_trace(&self, hash: &str) -> Result<DenomTrace, IbcError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		self.traces.get(hash).cloned().ok_or(IbcError::NoData)
	}
}
