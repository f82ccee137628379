//! Static asset registry for known chains.
//!
//! This module provides the chain-registry data model (assets and their denomination units)
//! and the lookup used to find an asset by its base denomination across every known chain.
//! The registry is a read-only snapshot supplied by the caller; nothing here mutates it.

/// Lookup over the known chains' asset lists
mod lookup;
/// Chain-registry data structures
mod types;

pub use lookup::{AssetRegistry, RegistryError, display_unit};
pub use types::*;
