//! Display formatting for amounts, percentages and raw chain text.
//!
//! Formatting never fails: malformed input degrades to a sentinel string (`"-"`, `""` or
//! `"0 <denom>"`) instead of an error. The only fallible operation is parsing a number
//! format pattern.

/// Numeral-style number format patterns
pub mod number;
/// Percentage and ratio formatting
pub mod percent;
/// Decoding helpers for raw chain text
pub mod text;
/// Token amount formatting on top of the amount resolver
pub mod token;

pub use number::{NumberFormat, format_number, number_and_sign, show_changes};
pub use percent::{PercentInput, StakingPool, bonded_ratio, commission_rate, percent, share_percent};
pub use text::{MessageRef, base64_to_string, hex_to_string, message_summary, multi_line};
pub use token::{AmountFormatter, FormatOptions};

/// Sentinel rendered for absent or malformed input.
pub const EMPTY_SENTINEL: &str = "-";

/// Error types for formatting helpers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
	#[error("Invalid number format pattern: {0}")]
	InvalidPattern(String),

	#[error("Decode error: {0}")]
	DecodeError(String),
}
