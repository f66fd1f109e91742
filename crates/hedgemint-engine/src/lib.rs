//! # hedgemint-engine
//!
//! The HedgeMint settlement engine: accepts cryptographically authorized
//! mint/redeem orders, deduplicates them by content hash, escrows funds, and
//! lets a privileged operator resolve each order to exactly one of two
//! terminal outcomes.
//!
//! ## Order Flow
//!
//! ```text
//! requester → OrderValidator (hash + signer + deadline + dedup)
//!           → escrow pull (transfer_from)
//!           → OrderRegistry (PENDING)
//! operator  → confirm_* / reject_* → escrow consumed or returned
//!           → OrderRegistry (CONFIRMED / REJECTED, terminal)
//! ```
//!
//! Every state-changing call takes `&mut self`, samples the clock once, and
//! is all-or-nothing: a failure anywhere leaves balances and statuses as
//! they were.

pub mod auth;
pub mod engine;
pub mod registry;
pub mod supported;

pub use auth::{DelegatedGate, Ed25519Gate, OrderValidator, SignerGate};
pub use engine::SettlementEngine;
pub use registry::OrderRegistry;
pub use supported::SupportedAssets;
