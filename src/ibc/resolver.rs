//! Cache-backed IBC resolver.
//!
//! Metadata resolution never blocks: a cache miss spawns a background fetch and returns
//! `None`. The fetch task posts a [`CacheUpdate`] back over a channel, and the resolver applies
//! pending updates at the start of every entry point. Repeated calls therefore observe the
//! fetched value eventually, never within the call that triggered it.
//!
//! Trace resolution is the awaited path: the caller suspends until the chain query returns,
//! and failures propagate.

use super::cache::{CacheUpdate, IbcCache};
use super::client::{DenomTraceSource, MetadataSource};
use super::types::{DenomTrace, IbcError};
use super::IBC_PREFIX;
use crate::registry::Asset;

use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Resolves IBC hashes to metadata and traces, caching the results.
pub struct IbcResolver {
	cache: IbcCache,
	metadata_source: Arc<dyn MetadataSource>,
	trace_source: Box<dyn DenomTraceSource>,
	updates_tx: mpsc::UnboundedSender<CacheUpdate>,
	updates_rx: mpsc::UnboundedReceiver<CacheUpdate>,
}

impl IbcResolver {
	/// Create a resolver with an empty cache.
	pub fn new(
		metadata_source: Arc<dyn MetadataSource>,
		trace_source: Box<dyn DenomTraceSource>,
	) -> Self {
		let (updates_tx, updates_rx) = mpsc::unbounded_channel();

		Self {
			cache: IbcCache::new(),
			metadata_source,
			trace_source,
			updates_tx,
			updates_rx,
		}
	}

	/// Read access to the cache.
	pub fn cache(&self) -> &IbcCache {
		&self.cache
	}

	pub fn is_loading(&self, hash: &str) -> bool {
		self.cache.is_loading(hash)
	}

	/// Return the cached metadata for `hash`, triggering a background fetch on a miss.
	///
	/// At most one fetch per hash is in flight at a time; calls made while a fetch is pending
	/// only return the (still absent) cached value.
	pub fn resolve_metadata(&mut self, hash: &str) -> Option<&Asset> {
		self.apply_pending_updates();

		if self.cache.has_metadata(hash) {
			return self.cache.metadata(hash);
		}

		self.fetch_metadata(hash);
		None
	}

	/// Return the denom trace for `hash`, querying the chain on a miss.
	///
	/// A leading `ibc/` prefix is accepted and stripped.
	pub async fn resolve_trace(&mut self, hash: &str) -> Result<DenomTrace, IbcError> {
		let hash = hash.strip_prefix(IBC_PREFIX).unwrap_or(hash);

		if let Some(trace) = self.cache.trace(hash) {
			return Ok(trace.clone());
		}

		let trace = self.trace_source.denom_trace(hash).await?;
		info!("Resolved denom trace for {}: {}", hash, trace.full_path());
		self.cache.insert_trace(hash, trace.clone());
		Ok(trace)
	}

	/// Apply every completion message that has arrived, without waiting.
	pub fn apply_pending_updates(&mut self) {
		while let Ok(update) = self.updates_rx.try_recv() {
			self.cache.apply(update);
		}
	}

	/// Wait until every in-flight metadata fetch has settled.
	pub async fn settle(&mut self) {
		self.apply_pending_updates();

		while self.cache.loading_count() > 0 {
			match self.updates_rx.recv().await {
				Some(update) => self.cache.apply(update),
				None => break,
			}
		}
	}

	fn fetch_metadata(&mut self, hash: &str) {
		if !self.cache.begin_loading(hash) {
			debug!("Metadata fetch for {} already in flight", hash);
			return;
		}

		let handle = match Handle::try_current() {
			Ok(handle) => handle,
			Err(e) => {
				warn!("Cannot fetch IBC metadata for {}: {}", hash, e);
				self.cache.finish_loading(hash);
				return;
			}
		};

		debug!("Spawning metadata fetch for {}", hash);
		let source = Arc::clone(&self.metadata_source);
		let updates_tx = self.updates_tx.clone();
		let hash = hash.to_string();

		let fetch_hash = hash.clone();
		let fetch = handle.spawn(async move { source.fetch_metadata(&fetch_hash).await });

		// The fetch runs in its own task so a panicking source still settles the hash.
		handle.spawn(async move {
			let update = match fetch.await {
				Ok(Ok(asset)) => CacheUpdate::MetadataFetched { hash, asset },
				Ok(Err(e)) => {
					warn!("Failed to fetch IBC metadata for {}: {}", hash, e);
					CacheUpdate::MetadataFailed { hash }
				}
				Err(e) => {
					error!("IBC metadata fetch for {} aborted: {}", hash, e);
					CacheUpdate::MetadataFailed { hash }
				}
			};
			// The receiver is dropped together with the resolver; nothing left to update then.
			let _ = updates_tx.send(update);
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_support::{CountingMetadataSource, StaticTraceSource, osmo_metadata, OSMO_HASH};
	use std::sync::atomic::Ordering;
	use std::time::Duration;

	struct PanickingMetadataSource;

	#[async_trait::async_trait]
	impl MetadataSource for PanickingMetadataSource {
		async fn fetch_metadata(&self, hash: &str) -> Result<Asset, IbcError> {
			panic!("metadata source crashed for {}", hash);
		}
	}

	fn resolver(source: Arc<CountingMetadataSource>) -> IbcResolver {
		IbcResolver::new(source, Box::new(StaticTraceSource::default()))
	}

	#[tokio::test]
	async fn test_resolve_metadata_fetches_once() {
		let source = Arc::new(CountingMetadataSource::with_asset(OSMO_HASH, osmo_metadata()));
		let mut resolver = resolver(source.clone());

		assert!(resolver.resolve_metadata(OSMO_HASH).is_none());
		assert!(resolver.resolve_metadata(OSMO_HASH).is_none());
		assert!(resolver.is_loading(OSMO_HASH));

		resolver.settle().await;

		assert_eq!(source.calls.load(Ordering::SeqCst), 1);
		assert!(!resolver.is_loading(OSMO_HASH));
		let asset = resolver.resolve_metadata(OSMO_HASH).unwrap();
		assert_eq!(asset.symbol, "OSMO");
		assert_eq!(source.calls.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn test_failed_fetch_can_be_retried() {
		let source = Arc::new(CountingMetadataSource::default());
		let mut resolver = resolver(source.clone());

		assert!(resolver.resolve_metadata("MISSING").is_none());
		resolver.settle().await;

		assert!(!resolver.is_loading("MISSING"));
		assert!(resolver.cache().metadata("MISSING").is_none());

		assert!(resolver.resolve_metadata("MISSING").is_none());
		resolver.settle().await;
		assert_eq!(source.calls.load(Ordering::SeqCst), 2);
	}

	#[tokio::test]
	async fn test_panicking_fetch_settles_and_can_be_retried() {
		let mut resolver = IbcResolver::new(
			Arc::new(PanickingMetadataSource),
			Box::new(StaticTraceSource::default()),
		);

		assert!(resolver.resolve_metadata("H").is_none());
		assert!(resolver.is_loading("H"));

		let settled = tokio::time::timeout(Duration::from_secs(2), resolver.settle()).await;
		assert!(settled.is_ok());
		assert!(!resolver.is_loading("H"));
		assert!(resolver.cache().metadata("H").is_none());

		assert!(resolver.resolve_metadata("H").is_none());
		assert!(resolver.is_loading("H"));
	}

	#[test]
	fn test_resolve_metadata_without_runtime() {
		let source = Arc::new(CountingMetadataSource::with_asset(OSMO_HASH, osmo_metadata()));
		let mut resolver = resolver(source.clone());

		assert!(resolver.resolve_metadata(OSMO_HASH).is_none());
		assert!(!resolver.is_loading(OSMO_HASH));
		assert_eq!(source.calls.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn test_resolve_trace_caches_result() {
		let trace_source = StaticTraceSource::default().with_trace(
			OSMO_HASH,
			DenomTrace {
				path: "transfer/channel-141".to_string(),
				base_denom: "uosmo".to_string(),
			},
		);
		let calls = trace_source.calls.clone();
		let mut resolver = IbcResolver::new(
			Arc::new(CountingMetadataSource::default()),
			Box::new(trace_source),
		);

		let denom = format!("ibc/{}", OSMO_HASH);
		let first = resolver.resolve_trace(&denom).await.unwrap();
		let second = resolver.resolve_trace(OSMO_HASH).await.unwrap();

		assert_eq!(first, second);
		assert_eq!(first.base_denom, "uosmo");
		assert_eq!(calls.load(Ordering::SeqCst), 1);
		assert_eq!(resolver.cache().trace_count(), 1);
	}

	#[tokio::test]
	async fn test_resolve_trace_propagates_errors() {
		let mut resolver = resolver(Arc::new(CountingMetadataSource::default()));

		let result = resolver.resolve_trace("UNKNOWN").await;
		assert!(matches!(result, Err(IbcError::NoData)));
		assert_eq!(resolver.cache().trace_count(), 0);
	}
}
