//! Number formatting with numeral-style patterns.
//!
//! Supported patterns are made of an optional leading `+`, an integer part of `0` or `0,0`
//! (thousands grouping), an optional fraction of mandatory `0`s followed by optional `[0…]`
//! digits, and an optional trailing `%`. Examples: `0,0.[0]`, `0.[000000]`, `+0,0.[00]`,
//! `0.[00]%`.
//!
//! Rounding is done on the shortest decimal representation of the value, half away from zero,
//! so `1.005` rounds to `1.01` the way a user reading the number expects.

use super::FormatError;

use num_format::{Locale, ToFormattedString};
use std::fmt;
use std::str::FromStr;

/// A parsed number format pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
	signed: bool,
	grouped: bool,
	min_fraction: u8,
	optional_fraction: u8,
	percent: bool,
}

impl NumberFormat {
	/// `0,0.[0]`, the default for token amounts.
	pub const TOKEN: Self = Self::new(false, true, 0, 1, false);
	/// `0,0.[00]`, used for values and two-decimal token amounts.
	pub const TWO_DECIMALS: Self = Self::new(false, true, 0, 2, false);
	/// `0.[000000]`, used for amounts below 0.01.
	pub const HIGH_PRECISION: Self = Self::new(false, false, 0, 6, false);
	/// `0.[00]`
	pub const PLAIN: Self = Self::new(false, false, 0, 2, false);
	/// `0.[00]%`
	pub const PERCENT: Self = Self::new(false, false, 0, 2, true);
	/// `+0,0`
	pub const SIGNED: Self = Self::new(true, true, 0, 0, false);
	/// `+0,0.[00]`
	pub const SIGNED_CHANGE: Self = Self::new(true, true, 0, 2, false);

	const fn new(
		signed: bool,
		grouped: bool,
		min_fraction: u8,
		optional_fraction: u8,
		percent: bool,
	) -> Self {
		Self {
			signed,
			grouped,
			min_fraction,
			optional_fraction,
			percent,
		}
	}

	fn max_fraction(&self) -> usize {
		usize::from(self.min_fraction) + usize::from(self.optional_fraction)
	}

	/// Render `value`. Non-finite values render as `-`.
	pub fn format(&self, value: f64) -> String {
		if !value.is_finite() {
			return super::EMPTY_SENTINEL.to_string();
		}

		let value = if self.percent { value * 100.0 } else { value };
		let (integer, mut fraction) = round_half_up(value.abs(), self.max_fraction());

		let mut removable = self.optional_fraction;
		while removable > 0 && fraction.ends_with('0') {
			fraction.pop();
			removable -= 1;
		}

		let is_zero = integer.bytes().chain(fraction.bytes()).all(|b| b == b'0');
		let sign = if value < 0.0 && !is_zero {
			"-"
		} else if self.signed {
			"+"
		} else {
			""
		};

		let integer = if self.grouped {
			group_thousands(&integer)
		} else {
			integer
		};

		let mut output = format!("{}{}", sign, integer);
		if !fraction.is_empty() {
			output.push('.');
			output.push_str(&fraction);
		}
		if self.percent {
			output.push('%');
		}
		output
	}
}

impl Default for NumberFormat {
	fn default() -> Self {
		Self::TOKEN
	}
}

impl FromStr for NumberFormat {
	type Err = FormatError;

	fn from_str(pattern: &str) -> Result<Self, Self::Err> {
		let invalid = || FormatError::InvalidPattern(pattern.to_string());

		let (signed, rest) = match pattern.strip_prefix('+') {
			Some(rest) => (true, rest),
			None => (false, pattern),
		};
		let (percent, rest) = match rest.strip_suffix('%') {
			Some(rest) => (true, rest),
			None => (false, rest),
		};
		let (integer, fraction) = rest.split_once('.').unwrap_or((rest, ""));

		if integer.is_empty() || !integer.chars().all(|c| c == '0' || c == ',') {
			return Err(invalid());
		}
		let grouped = integer.contains(',');

		let mut min_fraction = 0u8;
		let mut optional_fraction = 0u8;
		let mut in_brackets = false;
		let mut closed = false;
		for c in fraction.chars() {
			match c {
				'[' if !in_brackets && !closed => in_brackets = true,
				']' if in_brackets => {
					in_brackets = false;
					closed = true;
				}
				'0' if in_brackets => optional_fraction += 1,
				'0' if !closed => min_fraction += 1,
				_ => return Err(invalid()),
			}
		}
		if in_brackets || (rest.contains('.') && min_fraction + optional_fraction == 0) {
			return Err(invalid());
		}

		Ok(Self::new(
			signed,
			grouped,
			min_fraction,
			optional_fraction,
			percent,
		))
	}
}

impl fmt::Display for NumberFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.signed {
			f.write_str("+")?;
		}
		f.write_str(if self.grouped { "0,0" } else { "0" })?;
		if self.max_fraction() > 0 {
			f.write_str(".")?;
			f.write_str(&"0".repeat(usize::from(self.min_fraction)))?;
			if self.optional_fraction > 0 {
				write!(f, "[{}]", "0".repeat(usize::from(self.optional_fraction)))?;
			}
		}
		if self.percent {
			f.write_str("%")?;
		}
		Ok(())
	}
}

/// Round a non-negative finite value to `decimals` fractional digits, half away from zero.
///
/// Returns the integer digits and exactly `decimals` fractional digits.
fn round_half_up(value: f64, decimals: usize) -> (String, String) {
	let repr = value.to_string();
	let (integer, fraction) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

	if fraction.len() <= decimals {
		return (
			integer.to_string(),
			format!("{:0<width$}", fraction, width = decimals),
		);
	}

	let mut digits: Vec<u8> = integer
		.bytes()
		.chain(fraction.bytes().take(decimals))
		.collect();

	if fraction.as_bytes()[decimals] >= b'5' {
		let mut i = digits.len();
		loop {
			if i == 0 {
				digits.insert(0, b'1');
				break;
			}
			i -= 1;
			if digits[i] == b'9' {
				digits[i] = b'0';
			} else {
				digits[i] += 1;
				break;
			}
		}
	}

	let split = digits.len() - decimals;
	let integer = digits[..split].iter().map(|&d| char::from(d)).collect();
	let fraction = digits[split..].iter().map(|&d| char::from(d)).collect();
	(integer, fraction)
}

/// Insert `,` thousands separators into a string of ASCII digits.
fn group_thousands(integer: &str) -> String {
	match integer.parse::<u128>() {
		Ok(value) => value.to_formatted_string(&Locale::en),
		Err(_) => group_digits(integer),
	}
}

/// Grouping for integer parts beyond `u128::MAX`, which `f64` can still produce.
fn group_digits(integer: &str) -> String {
	let len = integer.len();
	let mut grouped = String::with_capacity(len + len / 3);
	for (i, c) in integer.chars().enumerate() {
		if i > 0 && (len - i) % 3 == 0 {
			grouped.push(',');
		}
		grouped.push(c);
	}
	grouped
}

/// Render a number with `fmt`; absent, zero and non-finite inputs render as `""`.
pub fn format_number(input: Option<f64>, fmt: NumberFormat) -> String {
	match input {
		Some(value) if value != 0.0 && value.is_finite() => fmt.format(value),
		_ => String::new(),
	}
}

/// Render a number with an explicit sign and thousands grouping (`+0,0`).
pub fn number_and_sign(input: f64) -> String {
	NumberFormat::SIGNED.format(input)
}

/// Render a non-zero price change as `+0,0.[00]`; zero renders as `""`.
pub fn show_changes(change: f64) -> String {
	if change != 0.0 {
		NumberFormat::SIGNED_CHANGE.format(change)
	} else {
		String::new()
	}
}
