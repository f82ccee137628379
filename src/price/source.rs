use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Index entry mapping a denomination or symbol to a price-feed coin.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct CoinInfo {
	/// Identifier of the coin in the price feed (e.g. `cosmos`).
	pub coin_id: String,
	/// Display symbol (e.g. `ATOM`).
	pub symbol: String,
	/// Exponent of the display unit, 0 when unknown.
	pub exponent: u32,
}

/// Price of a coin in one currency.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PriceQuote {
	pub value: f64,
	pub change_24h: f64,
}

/// Direction of a 24h price change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceTrend {
	Up,
	Down,
	Flat,
}

impl PriceTrend {
	/// Classify a change; absent and zero changes are flat.
	pub fn from_change(change: Option<f64>) -> Self {
		match change {
			Some(change) if change > 0.0 => PriceTrend::Up,
			Some(change) if change < 0.0 => PriceTrend::Down,
			_ => PriceTrend::Flat,
		}
	}
}

/// Read-only access to price data owned by another component.
pub trait PriceSource: Send + Sync {
	/// Look up the index entry for a denomination or lower-cased symbol.
	fn coin_info(&self, key: &str) -> Option<CoinInfo>;

	/// Price and 24h change of `coin_id` in `currency`.
	fn price_of(&self, coin_id: &str, currency: &str) -> Option<PriceQuote>;
}

/// In-memory price snapshot.
#[derive(Debug, Clone, Default)]
pub struct StaticPriceSource {
	coins: HashMap<String, CoinInfo>,
	prices: HashMap<(String, String), PriceQuote>,
}

impl StaticPriceSource {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register an index entry under `key`.
	pub fn with_coin(mut self, key: &str, info: CoinInfo) -> Self {
		self.coins.insert(key.to_string(), info);
		self
	}

	/// Register a quote for `coin_id` in `currency`.
	pub fn with_price(mut self, coin_id: &str, currency: &str, quote: PriceQuote) -> Self {
		self.prices
			.insert((coin_id.to_string(), currency.to_string()), quote);
		self
	}
}

impl PriceSource for StaticPriceSource {
	fn coin_info(&self, key: &str) -> Option<CoinInfo> {
		self.coins.get(key).cloned()
	}

	fn price_of(&self, coin_id: &str, currency: &str) -> Option<PriceQuote> {
		self.prices
			.get(&(coin_id.to_string(), currency.to_string()))
			.copied()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_price_trend() {
		assert_eq!(PriceTrend::from_change(Some(1.5)), PriceTrend::Up);
		assert_eq!(PriceTrend::from_change(Some(-0.2)), PriceTrend::Down);
		assert_eq!(PriceTrend::from_change(Some(0.0)), PriceTrend::Flat);
		assert_eq!(PriceTrend::from_change(None), PriceTrend::Flat);
	}

	#[test]
	fn test_static_source_lookups() {
		let source = StaticPriceSource::new()
			.with_coin(
				"uatom",
				CoinInfo {
					coin_id: "cosmos".to_string(),
					symbol: "ATOM".to_string(),
					exponent: 6,
				},
			)
			.with_price(
				"cosmos",
				"usd",
				PriceQuote {
					value: 9.5,
					change_24h: -1.2,
				},
			);

		assert_eq!(source.coin_info("uatom").unwrap().coin_id, "cosmos");
		assert!(source.coin_info("uosmo").is_none());
		assert_eq!(source.price_of("cosmos", "usd").unwrap().value, 9.5);
		assert!(source.price_of("cosmos", "eur").is_none());
	}

	#[test]
	fn test_coin_info_parses_camel_case() {
		let info: CoinInfo =
			serde_json::from_str(r#"{"coinId":"osmosis","symbol":"OSMO","exponent":6}"#).unwrap();
		assert_eq!(info.coin_id, "osmosis");
		assert_eq!(info.exponent, 6);
	}
}
