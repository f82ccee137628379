//! Token amount formatting.
//!
//! `AmountFormatter` renders coins as display strings such as `1,234.5 ATOM`, resolving the
//! display unit through the wrapped `AmountResolver`. Amounts below one millionth collapse to
//! `0 <denom>`; amounts below 0.01 switch to a six-digit fractional format so they do not
//! round away.

use super::EMPTY_SENTINEL;
use super::number::NumberFormat;
use crate::amount::{AmountResolver, Coin, ResolveMode, scale_down};

use tracing::debug;

/// Symbols are cut to this many characters.
const MAX_SYMBOL_CHARS: usize = 10;
/// Amounts below this render as zero.
const DUST_THRESHOLD: f64 = 0.000001;
/// Amounts below this use `NumberFormat::HIGH_PRECISION`.
const HIGH_PRECISION_THRESHOLD: f64 = 0.01;

/// Options for rendering a coin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormatOptions {
	/// Append the display symbol.
	pub with_symbol: bool,
	/// Number format for amounts of at least 0.01.
	pub number_format: NumberFormat,
	/// Asset list used for non-IBC denominations.
	pub mode: ResolveMode,
	/// Divide the raw amount first, for pre-scaled decimal coins.
	pub divisor: Option<f64>,
}

impl Default for FormatOptions {
	fn default() -> Self {
		Self {
			with_symbol: true,
			number_format: NumberFormat::TOKEN,
			mode: ResolveMode::Local,
			divisor: None,
		}
	}
}

impl FormatOptions {
	/// Amount only, without the symbol.
	pub fn amount_only() -> Self {
		Self {
			with_symbol: false,
			..Self::default()
		}
	}

	/// Symbol and up to two fractional digits.
	pub fn two_decimals() -> Self {
		Self {
			number_format: NumberFormat::TWO_DECIMALS,
			..Self::default()
		}
	}

	pub fn with_mode(mut self, mode: ResolveMode) -> Self {
		self.mode = mode;
		self
	}

	pub fn with_divisor(mut self, divisor: f64) -> Self {
		self.divisor = Some(divisor);
		self
	}

	pub fn with_format(mut self, number_format: NumberFormat) -> Self {
		self.number_format = number_format;
		self
	}
}

/// Renders coins and coin values for display.
pub struct AmountFormatter {
	resolver: AmountResolver,
}

impl AmountFormatter {
	pub fn new(resolver: AmountResolver) -> Self {
		Self { resolver }
	}

	pub fn resolver(&self) -> &AmountResolver {
		&self.resolver
	}

	pub fn resolver_mut(&mut self) -> &mut AmountResolver {
		&mut self.resolver
	}

	pub fn into_resolver(self) -> AmountResolver {
		self.resolver
	}

	/// Render a coin, e.g. `1 ATOM`.
	///
	/// Returns `-` for an absent coin or one with a missing or unparsable amount or denom.
	/// A resolved unit with exponent 0 leaves both the amount and the raw denom untouched.
	pub fn format(&mut self, coin: Option<&Coin>, opts: &FormatOptions) -> String {
		let Some(coin) = coin.filter(|coin| coin.is_complete()) else {
			return EMPTY_SENTINEL.to_string();
		};
		let Some(mut amount) = coin.raw_amount() else {
			debug!("Unparsable amount {:?} for {}", coin.amount, coin.denom);
			return EMPTY_SENTINEL.to_string();
		};

		if let Some(divisor) = opts.divisor.filter(|divisor| *divisor != 0.0) {
			amount /= divisor;
		}

		let mut denom = coin.denom.clone();
		let unit = self.resolver.resolve_display(&coin.denom, opts.mode);
		if unit.exponent > 0 {
			amount = scale_down(amount, unit.exponent);
			denom = unit.symbol.to_uppercase();
		}
		let symbol = truncate_symbol(&denom);

		if amount < DUST_THRESHOLD {
			return format!("0 {}", symbol);
		}

		let number_format = if amount < HIGH_PRECISION_THRESHOLD {
			NumberFormat::HIGH_PRECISION
		} else {
			opts.number_format
		};

		let number = number_format.format(amount);
		if opts.with_symbol {
			format!("{} {}", number, symbol)
		} else {
			number
		}
	}

	/// Render several coins joined by `, `. Absent or empty input renders as `""`.
	pub fn format_many(&mut self, coins: Option<&[Coin]>, opts: &FormatOptions) -> String {
		let Some(coins) = coins else {
			return String::new();
		};

		coins
			.iter()
			.map(|coin| self.format(Some(coin), opts))
			.collect::<Vec<_>>()
			.join(", ")
	}

	/// Render the value of a coin in the resolver's currency as `0,0.[00]`.
	pub fn token_value(&self, coin: Option<&Coin>, divisor: Option<f64>) -> String {
		match coin {
			Some(coin) => {
				let value = self.resolver.token_value_number(Some(coin), divisor);
				NumberFormat::TWO_DECIMALS.format(value)
			}
			None => String::new(),
		}
	}
}

fn truncate_symbol(denom: &str) -> String {
	denom.chars().take(MAX_SYMBOL_CHARS).collect()
}
