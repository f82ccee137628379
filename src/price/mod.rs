//! Price collaborator interface.
//!
//! Prices are supplied from outside this crate; the formatter only reads them. This module
//! defines the `PriceSource` trait, the records it returns, and an in-memory snapshot
//! implementation.

/// Price source trait and the in-memory snapshot
mod source;

pub use source::*;
