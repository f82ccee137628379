//! Percentage and ratio formatting.

use super::number::NumberFormat;
use super::{EMPTY_SENTINEL, FormatError};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Ratios at or below this render as `0%`.
const SHARE_FLOOR: f64 = 0.0001;

/// A numeric value as it arrives from chain queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PercentInput<'a> {
	/// Decimal text, e.g. `"0.05"`
	Text(&'a str),
	Number(f64),
	/// ASCII bytes holding decimal text, as returned by protobuf `Dec` fields
	Bytes(&'a [u8]),
}

impl<'a> From<&'a str> for PercentInput<'a> {
	fn from(text: &'a str) -> Self {
		PercentInput::Text(text)
	}
}

impl<'a> From<&'a String> for PercentInput<'a> {
	fn from(text: &'a String) -> Self {
		PercentInput::Text(text)
	}
}

impl From<f64> for PercentInput<'_> {
	fn from(value: f64) -> Self {
		PercentInput::Number(value)
	}
}

impl<'a> From<&'a [u8]> for PercentInput<'a> {
	fn from(bytes: &'a [u8]) -> Self {
		PercentInput::Bytes(bytes)
	}
}

impl<'a, const N: usize> From<&'a [u8; N]> for PercentInput<'a> {
	fn from(bytes: &'a [u8; N]) -> Self {
		PercentInput::Bytes(bytes)
	}
}

impl PercentInput<'_> {
	/// The numeric value, `None` when it is empty or does not parse.
	pub fn to_number(&self) -> Result<Option<f64>, FormatError> {
		match self {
			PercentInput::Text(text) => Ok(parse_decimal(text)),
			PercentInput::Number(value) => Ok(Some(*value).filter(|value| value.is_finite())),
			PercentInput::Bytes(bytes) => Ok(parse_decimal(decode_ascii(bytes)?)),
		}
	}

	/// The numeric value if it is present and non-zero.
	fn truthy(&self) -> Result<Option<f64>, FormatError> {
		Ok(self.to_number()?.filter(|value| *value != 0.0))
	}
}

/// Decode printable ASCII bytes.
fn decode_ascii(bytes: &[u8]) -> Result<&str, FormatError> {
	if let Some(byte) = bytes.iter().find(|b| !(0x20..=0x7e).contains(*b)) {
		return Err(FormatError::DecodeError(format!(
			"byte 0x{:02x} is outside the printable ASCII range",
			byte
		)));
	}
	std::str::from_utf8(bytes).map_err(|e| FormatError::DecodeError(e.to_string()))
}

/// Parse decimal text, tolerating thousands separators and a trailing `%`.
fn parse_decimal(text: &str) -> Option<f64> {
	let text = text.trim();
	if text.is_empty() {
		return None;
	}

	let (text, scale) = match text.strip_suffix('%') {
		Some(text) => (text, 0.01),
		None => (text, 1.0),
	};
	let cleaned: String = text.chars().filter(|c| *c != ',').collect();

	cleaned
		.trim()
		.parse::<f64>()
		.ok()
		.filter(|value| value.is_finite())
		.map(|value| value * scale)
}

/// Render a ratio as a percentage with up to two fractional digits.
///
/// Returns `-` for empty, zero or unparsable input and for bytes that are not printable ASCII.
pub fn percent<'a>(value: impl Into<PercentInput<'a>>, divisor: Option<f64>) -> String {
	let value = match value.into().truthy() {
		Ok(Some(value)) => value,
		Ok(None) => return EMPTY_SENTINEL.to_string(),
		Err(e) => {
			debug!("Cannot decode percent input: {}", e);
			return EMPTY_SENTINEL.to_string();
		}
	};

	let value = match divisor {
		Some(divisor) if divisor != 0.0 => value / divisor,
		_ => value,
	};
	NumberFormat::PERCENT.format(value)
}

/// Render a commission rate; an absent or empty rate renders as `-`.
pub fn commission_rate(rate: Option<&str>, divisor: Option<f64>) -> String {
	match rate {
		Some(rate) if !rate.is_empty() => percent(rate, divisor),
		_ => EMPTY_SENTINEL.to_string(),
	}
}

/// Token totals of the staking pool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StakingPool {
	pub bonded_tokens: String,
	pub not_bonded_tokens: String,
}

/// Render `bonded / (bonded + not_bonded)` as a percentage.
pub fn bonded_ratio(pool: Option<&StakingPool>) -> String {
	let Some(pool) = pool.filter(|pool| !pool.bonded_tokens.is_empty()) else {
		return EMPTY_SENTINEL.to_string();
	};

	let bonded = parse_decimal(&pool.bonded_tokens).unwrap_or(0.0);
	let not_bonded = parse_decimal(&pool.not_bonded_tokens).unwrap_or(0.0);
	let ratio = bonded / (bonded + not_bonded);

	if !ratio.is_finite() {
		return EMPTY_SENTINEL.to_string();
	}
	NumberFormat::PERCENT.format(ratio)
}

/// Render `input / total` as a percentage; tiny shares render as `0%`.
pub fn share_percent<'a, 'b>(
	input: impl Into<PercentInput<'a>>,
	total: impl Into<PercentInput<'b>>,
) -> String {
	let input = input.into().truthy().ok().flatten();
	let total = total.into().truthy().ok().flatten();

	let (Some(input), Some(total)) = (input, total) else {
		return NumberFormat::PERCENT.format(0.0);
	};

	let ratio = input / total;
	NumberFormat::PERCENT.format(if ratio > SHARE_FLOOR { ratio } else { 0.0 })
}
