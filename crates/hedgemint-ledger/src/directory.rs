//! Asset directory — asset-id → token ledger + issuer account.
//!
//! The directory stands in for the external factory/registry and issuer
//! services at exactly the interface the engine consumes: existence lookup,
//! ledger access, issuer lookup, and the issuer burn path. Each registered
//! asset gets a dedicated issuer account; `burn_escrow` pulls escrowed tokens
//! from the holder under that issuer's allowance and retires them.

use std::collections::HashMap;

use hedgemint_types::{AccountId, AssetId, HedgemintError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::token::TokenLedger;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AssetEntry {
    ledger: TokenLedger,
    issuer: AccountId,
}

/// Registry of asset token classes known to the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetDirectory {
    assets: HashMap<AssetId, AssetEntry>,
}

impl AssetDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self {
            assets: HashMap::new(),
        }
    }

    /// Register an asset token class. Returns the issuer account created for
    /// it. Re-registering an id replaces the previous entry.
    pub fn insert(&mut self, asset_id: AssetId, ledger: TokenLedger) -> AccountId {
        let issuer = AccountId::new();
        self.assets.insert(asset_id, AssetEntry { ledger, issuer });
        issuer
    }

    #[must_use]
    pub fn contains(&self, asset_id: AssetId) -> bool {
        self.assets.contains_key(&asset_id)
    }

    /// The issuer account for an asset.
    pub fn issuer(&self, asset_id: AssetId) -> Result<AccountId> {
        self.assets
            .get(&asset_id)
            .map(|entry| entry.issuer)
            .ok_or(HedgemintError::UnknownAsset(asset_id))
    }

    pub fn ledger(&self, asset_id: AssetId) -> Result<&TokenLedger> {
        self.assets
            .get(&asset_id)
            .map(|entry| &entry.ledger)
            .ok_or(HedgemintError::UnknownAsset(asset_id))
    }

    pub fn ledger_mut(&mut self, asset_id: AssetId) -> Result<&mut TokenLedger> {
        self.assets
            .get_mut(&asset_id)
            .map(|entry| &mut entry.ledger)
            .ok_or(HedgemintError::UnknownAsset(asset_id))
    }

    /// Issuer burn path: pull `amount` of `asset_id` from `holder` under the
    /// issuer's allowance and retire it (supply decreases).
    ///
    /// # Errors
    /// - `UnknownAsset` if the asset isn't registered
    /// - `InsufficientAllowance` if `holder` hasn't approved the issuer for
    ///   at least `amount`
    /// - `InsufficientBalance` if `holder` doesn't hold `amount`
    ///
    /// Any failure leaves the ledger untouched.
    pub fn burn_escrow(
        &mut self,
        asset_id: AssetId,
        holder: AccountId,
        amount: Decimal,
    ) -> Result<()> {
        let entry = self
            .assets
            .get_mut(&asset_id)
            .ok_or(HedgemintError::UnknownAsset(asset_id))?;

        let issuer = entry.issuer;
        entry.ledger.transfer_from(issuer, holder, issuer, amount)?;
        // The pull into the issuer account cannot leave it short.
        entry.ledger.burn(issuer, amount)?;

        tracing::debug!(
            asset = %asset_id,
            amount = %amount,
            supply = %entry.ledger.total_supply(),
            "issuer burned escrowed asset tokens"
        );
        Ok(())
    }
}
