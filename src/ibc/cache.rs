//! In-memory IBC cache state.
//!
//! The cache only grows: entries are inserted on successful fetches and never evicted. The
//! `loading` set guards against issuing a second metadata fetch for a hash that is already
//! in flight.

use super::types::DenomTrace;
use crate::registry::Asset;

use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Completion message posted by a background metadata fetch.
#[derive(Debug, Clone)]
pub enum CacheUpdate {
	/// The fetch succeeded
	MetadataFetched { hash: String, asset: Asset },
	/// The fetch failed; the hash may be retried later
	MetadataFailed { hash: String },
}

/// Cache of resolved IBC traces and metadata.
#[derive(Debug, Default)]
pub struct IbcCache {
	ibc_denoms: HashMap<String, DenomTrace>,
	ibc_metadata: HashMap<String, Asset>,
	loading: HashSet<String>,
}

impl IbcCache {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn metadata(&self, hash: &str) -> Option<&Asset> {
		self.ibc_metadata.get(hash)
	}

	pub fn has_metadata(&self, hash: &str) -> bool {
		self.ibc_metadata.contains_key(hash)
	}

	pub fn trace(&self, hash: &str) -> Option<&DenomTrace> {
		self.ibc_denoms.get(hash)
	}

	pub fn is_loading(&self, hash: &str) -> bool {
		self.loading.contains(hash)
	}

	/// Number of metadata fetches currently in flight.
	pub fn loading_count(&self) -> usize {
		self.loading.len()
	}

	pub fn metadata_count(&self) -> usize {
		self.ibc_metadata.len()
	}

	pub fn trace_count(&self) -> usize {
		self.ibc_denoms.len()
	}

	/// Mark `hash` as in flight. Returns false if a fetch was already running.
	pub(crate) fn begin_loading(&mut self, hash: &str) -> bool {
		self.loading.insert(hash.to_string())
	}

	pub(crate) fn finish_loading(&mut self, hash: &str) {
		self.loading.remove(hash);
	}

	pub(crate) fn insert_trace(&mut self, hash: &str, trace: DenomTrace) {
		self.ibc_denoms.insert(hash.to_string(), trace);
	}

	/// Apply a completion message from a background fetch.
	pub(crate) fn apply(&mut self, update: CacheUpdate) {
		match update {
			CacheUpdate::MetadataFetched { hash, asset } => {
				debug!("Caching IBC metadata for {}", hash);
				self.loading.remove(&hash);
				self.ibc_metadata.insert(hash, asset);
			}
			CacheUpdate::MetadataFailed { hash } => {
				self.loading.remove(&hash);
			}
		}
	}
}
