//! Supported-asset set — restricts which assets Mint orders may reference.
//!
//! Membership is checked at submission time only; resolution trusts the
//! recorded order. Removal blocks new submissions without touching anything
//! already registered.

use std::collections::HashSet;

use hedgemint_types::{AssetId, HedgemintError, Result};

/// Owner-managed set of asset identifiers usable in Mint orders.
#[derive(Debug, Clone, Default)]
pub struct SupportedAssets {
    set: HashSet<AssetId>,
}

impl SupportedAssets {
    #[must_use]
    pub fn new() -> Self {
        Self {
            set: HashSet::new(),
        }
    }

    #[must_use]
    pub fn contains(&self, asset_id: AssetId) -> bool {
        self.set.contains(&asset_id)
    }

    /// # Errors
    /// Returns `AlreadySupported` if the asset is already in the set.
    pub fn add(&mut self, asset_id: AssetId) -> Result<()> {
        if !self.set.insert(asset_id) {
            return Err(HedgemintError::AlreadySupported(asset_id));
        }
        Ok(())
    }

    /// # Errors
    /// Returns `UnsupportedAsset` if the asset is not in the set.
    pub fn remove(&mut self, asset_id: AssetId) -> Result<()> {
        if !self.set.remove(&asset_id) {
            return Err(HedgemintError::UnsupportedAsset(asset_id));
        }
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.set.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}
