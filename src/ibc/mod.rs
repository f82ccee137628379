//! IBC denomination resolution.
//!
//! This module provides the clients and the in-memory cache used to resolve IBC denominations
//! (`ibc/<hash>`). Metadata for a hash is fetched in the background the first time it is asked
//! for, and is served from the cache afterwards. Denom traces are queried from the chain and
//! awaited by the caller.

/// In-memory cache state and the messages that update it
mod cache;
/// HTTP clients and the collaborator traits they implement
mod client;
/// Cache-backed resolver with fetch deduplication
mod resolver;
/// Type definitions for IBC data structures
mod types;

pub use cache::{CacheUpdate, IbcCache};
pub use client::{DenomTraceSource, MetadataClient, MetadataSource, RestTraceClient};
pub use resolver::IbcResolver;
pub use types::*;

/// Prefix marking an IBC-transferred denomination.
pub const IBC_PREFIX: &str = "ibc/";

/// Return the IBC hash of `denom`, or `None` when it is not an IBC denomination.
pub fn ibc_hash(denom: &str) -> Option<&str> {
	denom.strip_prefix(IBC_PREFIX)
}
