//! Resolution of display exponents and scaled amounts.
//!
//! Two independent paths live here. The display path (`resolve_display`, `scaled_amount`)
//! follows the asset configuration and the IBC cache, and applies no scaling when the resolved
//! exponent is 0. The value path (`amount_in_base_units`) prefers the price index's exponent and
//! falls back to the denomination prefix heuristics of `exponent_for`, so it always produces a
//! best-guess scale. Both are kept as they are; they may disagree for the same coin.

use super::types::{AmountError, Coin, ResolveMode, scale_down};
use crate::ibc::{DenomTrace, IbcResolver, ibc_hash};
use crate::price::{PriceSource, PriceTrend};
use crate::registry::{AssetRegistry, ChainAssets, ResolvedUnit, display_unit};

use std::sync::Arc;
use tracing::debug;

/// Exponent used for `u`-prefixed denominations (micro units).
const MICRO_EXPONENT: u32 = 6;
/// Exponent used for `a`-prefixed denominations (atto units) and `inj`.
const ATTO_EXPONENT: u32 = 18;

/// Resolves denominations to display units and computes scaled amounts and values.
///
/// The resolver owns the IBC cache; the registry and price data are read-only snapshots
/// supplied by the caller.
pub struct AmountResolver {
	registry: Arc<AssetRegistry>,
	current_chain: Option<ChainAssets>,
	ibc: IbcResolver,
	prices: Arc<dyn PriceSource>,
	currency: String,
}

impl AmountResolver {
	pub fn new(
		registry: Arc<AssetRegistry>,
		ibc: IbcResolver,
		prices: Arc<dyn PriceSource>,
	) -> Self {
		Self {
			registry,
			current_chain: None,
			ibc,
			prices,
			currency: "usd".to_string(),
		}
	}

	/// Set the chain whose asset list backs `ResolveMode::Local`.
	pub fn with_current_chain(mut self, chain: ChainAssets) -> Self {
		self.current_chain = Some(chain);
		self
	}

	/// Set the currency used for value computation.
	pub fn with_currency(mut self, currency: &str) -> Self {
		self.currency = currency.to_lowercase();
		self
	}

	pub fn set_current_chain(&mut self, chain: Option<ChainAssets>) {
		self.current_chain = chain;
	}

	pub fn current_chain(&self) -> Option<&ChainAssets> {
		self.current_chain.as_ref()
	}

	pub fn registry(&self) -> &AssetRegistry {
		&self.registry
	}

	pub fn currency(&self) -> &str {
		&self.currency
	}

	pub fn ibc(&self) -> &IbcResolver {
		&self.ibc
	}

	pub fn ibc_mut(&mut self) -> &mut IbcResolver {
		&mut self.ibc
	}

	/// Best-guess exponent of a denomination.
	///
	/// Micro (`u…`) and atto (`a…`) prefixes win over the registry; `inj` is an 18-decimal
	/// token.
	pub fn exponent_for(&self, denom: &str) -> u32 {
		if denom.starts_with('u') {
			MICRO_EXPONENT
		} else if denom.starts_with('a') || denom == "inj" {
			ATTO_EXPONENT
		} else {
			self.registry
				.find_asset(denom)
				.map(|asset| display_unit(asset).exponent)
				.unwrap_or(0)
		}
	}

	/// Resolve the display unit of a denomination.
	///
	/// IBC denominations go through the metadata cache; a miss triggers a background fetch and
	/// resolves to the raw denomination for now.
	pub fn resolve_display(&mut self, denom: &str, mode: ResolveMode) -> ResolvedUnit {
		if let Some(hash) = ibc_hash(denom) {
			return match self.ibc.resolve_metadata(hash) {
				Some(asset) => display_unit(asset),
				None => {
					debug!("IBC metadata for {} not cached yet", denom);
					ResolvedUnit::unresolved(denom)
				}
			};
		}

		let asset = match mode {
			ResolveMode::Local => self
				.current_chain
				.as_ref()
				.and_then(|chain| chain.find_local(denom)),
			ResolveMode::Global => self.registry.find_asset(denom),
		};

		asset
			.map(display_unit)
			.unwrap_or_else(|| ResolvedUnit::unresolved(denom))
	}

	/// Scale a coin by a resolved unit. An exponent of 0 leaves the amount unchanged.
	pub fn scaled_amount(&self, coin: &Coin, unit: &ResolvedUnit) -> f64 {
		scale_down(coin.raw_amount().unwrap_or(0.0), unit.exponent)
	}

	/// Scaled amount of a coin through the display path; 0 for an absent or incomplete coin.
	pub fn display_number(&mut self, coin: Option<&Coin>, mode: ResolveMode) -> f64 {
		match coin {
			Some(coin) if coin.is_complete() => {
				let unit = self.resolve_display(&coin.denom, mode);
				self.scaled_amount(coin, &unit)
			}
			_ => 0.0,
		}
	}

	/// Display symbol of a denomination, or the denomination itself when nothing resolves.
	pub fn display_denom(&mut self, denom: Option<&str>) -> Option<String> {
		let denom = denom.filter(|denom| !denom.is_empty())?;

		let asset = match ibc_hash(denom) {
			Some(hash) => self.ibc.resolve_metadata(hash),
			None => self.registry.find_asset(denom),
		};

		Some(match asset {
			Some(asset) => display_unit(asset).symbol,
			None => denom.to_string(),
		})
	}

	/// Amount of a coin in display units, for value computation.
	///
	/// The exponent comes from the price index entry of the coin's symbol when it is known and
	/// non-zero, otherwise from `exponent_for`.
	pub fn amount_in_base_units(&self, coin: Option<&Coin>) -> f64 {
		let Some(coin) = coin.filter(|coin| !coin.denom.is_empty()) else {
			return 0.0;
		};

		let symbol = self
			.prices
			.coin_info(&coin.denom)
			.map(|info| info.symbol)
			.filter(|symbol| !symbol.is_empty())
			.unwrap_or_else(|| coin.denom.clone());

		let exponent = self
			.prices
			.coin_info(&symbol.to_lowercase())
			.map(|info| info.exponent)
			.filter(|exponent| *exponent > 0)
			.unwrap_or_else(|| self.exponent_for(&coin.denom));

		scale_down(coin.raw_amount().unwrap_or(0.0), exponent)
	}

	/// Price of one display unit of `denom`; 0 when unknown.
	pub fn price(&self, denom: &str, currency: &str) -> f64 {
		if denom.chars().count() < 2 {
			return 0.0;
		}
		self.quote(denom, currency)
			.map(|quote| quote.value)
			.unwrap_or(0.0)
	}

	/// 24h price change of `denom`; 0 when unknown.
	pub fn price_change(&self, denom: &str, currency: &str) -> f64 {
		self.quote(denom, currency)
			.map(|quote| quote.change_24h)
			.unwrap_or(0.0)
	}

	pub fn price_trend(&self, denom: &str, currency: &str) -> PriceTrend {
		PriceTrend::from_change(Some(self.price_change(denom, currency)))
	}

	/// Value of a coin in the configured currency, optionally divided by `divisor`.
	pub fn token_value_number(&self, coin: Option<&Coin>, divisor: Option<f64>) -> f64 {
		let Some(coin) = coin.filter(|coin| !coin.denom.is_empty()) else {
			return 0.0;
		};

		let value = self.amount_in_base_units(Some(coin)) * self.price(&coin.denom, &self.currency);
		match divisor {
			Some(divisor) if divisor != 0.0 => value / divisor,
			_ => value,
		}
	}

	/// Resolve the denom trace of an IBC denomination. Transport errors propagate.
	pub async fn resolve_trace(&mut self, denom: &str) -> Result<DenomTrace, AmountError> {
		Ok(self.ibc.resolve_trace(denom).await?)
	}

	fn quote(&self, denom: &str, currency: &str) -> Option<crate::price::PriceQuote> {
		let coin_id = self.prices.coin_info(denom)?.coin_id;
		self.prices.price_of(&coin_id, currency)
	}
}
