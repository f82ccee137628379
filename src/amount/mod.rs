//! Amount resolution.
//!
//! This module turns raw on-chain coins into human-scaled amounts. The display exponent of a
//! denomination is resolved from the current chain's asset list, the global registry or the
//! IBC metadata cache, depending on the denomination and the requested `ResolveMode`. A
//! separate value path, driven by the price collaborator, computes currency values.

/// Exponent and display-unit resolution plus value computation
mod resolver;
/// Coin and resolution mode types
mod types;

pub use resolver::AmountResolver;
pub use types::*;
