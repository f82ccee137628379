use crate::ibc::IbcError;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A token amount in the chain's smallest unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Coin {
	pub denom: String,
	/// Non-negative decimal integer string.
	pub amount: String,
}

impl Coin {
	pub fn new(amount: impl Into<String>, denom: impl Into<String>) -> Self {
		Self {
			denom: denom.into(),
			amount: amount.into(),
		}
	}

	/// Whether both fields are present.
	pub fn is_complete(&self) -> bool {
		!self.amount.is_empty() && !self.denom.is_empty()
	}

	/// The amount as a float, `None` when it does not parse to a finite number.
	pub fn raw_amount(&self) -> Option<f64> {
		let amount = self.amount.trim();
		if amount.is_empty() {
			return None;
		}
		amount.parse::<f64>().ok().filter(|value| value.is_finite())
	}
}

impl FromStr for Coin {
	type Err = AmountError;

	/// Parse the compact `<amount><denom>` form, e.g. `1000000uatom`.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		let split = s
			.find(|c: char| !(c.is_ascii_digit() || c == '.'))
			.ok_or_else(|| AmountError::InvalidCoin(s.to_string()))?;

		let (amount, denom) = s.split_at(split);
		if amount.is_empty() || amount.parse::<f64>().is_err() {
			return Err(AmountError::InvalidCoin(s.to_string()));
		}

		Ok(Coin::new(amount, denom))
	}
}

/// Which asset list a non-IBC denomination is resolved against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResolveMode {
	/// The current chain's asset list
	#[default]
	Local,
	/// Every known chain, via the global registry
	Global,
}

/// Divide `amount` by `10^exponent`.
///
/// Exponents beyond `i32::MAX` saturate, so the result collapses towards zero instead of
/// wrapping into a multiplication.
pub fn scale_down(amount: f64, exponent: u32) -> f64 {
	if exponent == 0 {
		return amount;
	}
	let exponent = i32::try_from(exponent).unwrap_or(i32::MAX);
	amount / 10f64.powi(exponent)
}

/// Error types for amount resolution
#[derive(Debug, thiserror::Error)]
pub enum AmountError {
	#[error("Invalid coin: {0}")]
	InvalidCoin(String),

	#[error("IBC error: {0}")]
	IbcError(#[from] IbcError),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_compact_coin() {
		let coin: Coin = "1000000uatom".parse().unwrap();
		assert_eq!(coin, Coin::new("1000000", "uatom"));

		let ibc: Coin = "25ibc/ABC".parse().unwrap();
		assert_eq!(ibc.denom, "ibc/ABC");
	}

	#[test]
	fn test_scale_down() {
		assert_eq!(scale_down(2_500_000.0, 6), 2.5);
		assert_eq!(scale_down(42.0, 0), 42.0);
		assert_eq!(scale_down(5.0, u32::MAX), 0.0);
		assert_eq!(scale_down(5.0, i32::MAX as u32 + 1), 0.0);
	}

	#[test]
	fn test_parse_rejects_missing_parts() {
		assert!("uatom".parse::<Coin>().is_err());
		assert!("1000".parse::<Coin>().is_err());
		assert!("".parse::<Coin>().is_err());
	}

	#[test]
	fn test_raw_amount() {
		assert_eq!(Coin::new("42", "uatom").raw_amount(), Some(42.0));
		assert_eq!(Coin::new(" 7 ", "uatom").raw_amount(), Some(7.0));
		assert_eq!(Coin::new("", "uatom").raw_amount(), None);
		assert_eq!(Coin::new("abc", "uatom").raw_amount(), None);
	}
}
