//! # hedgemint-types
//!
//! Shared types, errors, and configuration for the **HedgeMint** settlement
//! engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountId`], [`AssetId`], [`OrderHash`]
//! - **Order model**: [`Order`], [`OrderKind`], [`OrderStatus`], [`OrderRecord`]
//! - **Configuration**: [`EngineConfig`]
//! - **Errors**: [`HedgemintError`] with `HM_ERR_` prefix codes

pub mod config;
pub mod error;
pub mod ids;
pub mod order;

// Re-export all primary types at crate root for ergonomic imports:
//   use hedgemint_types::{Order, OrderKind, OrderHash, ...};

pub use config::*;
pub use error::*;
pub use ids::*;
pub use order::*;
