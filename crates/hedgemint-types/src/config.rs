//! Configuration for the HedgeMint settlement engine.
//!
//! All mutable global state (operator, redemption asset) lives in an explicit
//! config object injected at construction and updated only through the
//! operator-gated setters on the engine — no ambient globals.

use serde::{Deserialize, Serialize};

use crate::{AccountId, AssetId};

/// Configuration for a settlement engine instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// The single privileged principal allowed to resolve orders and change
    /// configuration.
    pub operator: AccountId,
    /// The account under which the engine holds escrowed funds.
    pub escrow_account: AccountId,
    /// The asset paid out to requesters on confirmed redeem orders.
    pub redemption_asset: AssetId,
    /// Hedge token symbol.
    pub hedge_symbol: String,
    /// Hedge token decimal scale. Deliberately explicit: the hedge token does
    /// not use the common 18-decimal default.
    pub hedge_decimals: u32,
}

impl EngineConfig {
    #[must_use]
    pub fn new(
        operator: AccountId,
        redemption_asset: AssetId,
        hedge_symbol: impl Into<String>,
        hedge_decimals: u32,
    ) -> Self {
        Self {
            operator,
            escrow_account: AccountId::new(),
            redemption_asset,
            hedge_symbol: hedge_symbol.into(),
            hedge_decimals,
        }
    }
}
