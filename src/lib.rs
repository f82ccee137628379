//! Denomination resolution and amount formatting for Cosmos-SDK chains.
//!
//! Raw on-chain coins (`1000000uatom`, `ibc/27394F…`) are resolved to their display units
//! through chain asset lists and a background-filled IBC metadata cache, then rendered as
//! strings such as `1 ATOM`, `12.5%` or `WithdrawDelegatorReward×2`.
//!
//! The entry points are [`AmountResolver`] for exponent and value computation and
//! [`AmountFormatter`] for display strings. [`ResolverConfig`] builds a resolver backed by the
//! HTTP clients in [`ibc`].

pub mod amount;
pub mod config;
pub mod format;
pub mod ibc;
pub mod price;
pub mod registry;

#[cfg(test)]
mod test_support;

pub use amount::{AmountError, AmountResolver, Coin, ResolveMode};
pub use config::{ConfigError, ResolverConfig};
pub use format::{AmountFormatter, FormatOptions, NumberFormat};
pub use ibc::{IbcError, IbcResolver};
pub use price::{PriceSource, StaticPriceSource};
pub use registry::{AssetRegistry, RegistryError};
