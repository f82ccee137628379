//! Helpers for turning raw chain text into something readable.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Type reference of a transaction message.
///
/// Amino JSON carries the type under `@type`, protobuf-decoded messages under `typeUrl`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageRef {
	#[serde(rename = "@type", default, skip_serializing_if = "Option::is_none")]
	pub at_type: Option<String>,
	#[serde(rename = "typeUrl", default, skip_serializing_if = "Option::is_none")]
	pub type_url: Option<String>,
}

impl MessageRef {
	pub fn new(type_url: &str) -> Self {
		Self {
			at_type: None,
			type_url: Some(type_url.to_string()),
		}
	}

	/// Short message name, e.g. `Send` for `/cosmos.bank.v1beta1.MsgSend`.
	pub fn short_name(&self) -> String {
		let full = self
			.at_type
			.as_deref()
			.filter(|t| !t.is_empty())
			.or(self.type_url.as_deref().filter(|t| !t.is_empty()))
			.unwrap_or("unknown");

		let name = full.rsplit('.').next().unwrap_or(full);
		name.replacen("Msg", "", 1)
	}
}

/// Summarize messages as `Name` or `Name×count`, in first-seen order, joined by `, `.
pub fn message_summary(messages: &[MessageRef]) -> String {
	let mut counts: Vec<(String, usize)> = Vec::new();

	for message in messages {
		let name = message.short_name();
		match counts.iter_mut().find(|(seen, _)| *seen == name) {
			Some((_, count)) => *count += 1,
			None => counts.push((name, 1)),
		}
	}

	counts
		.into_iter()
		.map(|(name, count)| {
			if count > 1 {
				format!("{}×{}", name, count)
			} else {
				name
			}
		})
		.collect::<Vec<_>>()
		.join(", ")
}

/// Turn escaped `\n` and `\r` sequences into real line breaks.
pub fn multi_line(text: &str) -> String {
	text.replace("\\n", "\n").replace("\\r", "\n")
}

/// Decode hex-encoded UTF-8 text; invalid hex renders as `""`.
pub fn hex_to_string(hex_text: &str) -> String {
	if hex_text.is_empty() {
		return String::new();
	}
	match hex::decode(hex_text) {
		Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
		Err(e) => {
			debug!("Invalid hex text: {}", e);
			String::new()
		}
	}
}

/// Decode base64-encoded UTF-8 text; invalid base64 renders as `""`.
pub fn base64_to_string(encoded: &str) -> String {
	if encoded.is_empty() {
		return String::new();
	}
	match STANDARD.decode(encoded) {
		Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
		Err(e) => {
			debug!("Invalid base64 text: {}", e);
			String::new()
		}
	}
}
