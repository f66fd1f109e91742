//! The settlement engine — submission and resolution flows.
//!
//! Two independent tracks with symmetric shapes:
//!
//! ```text
//! MINT:   apply_mint   → asset escrowed  → confirm_mint  (issuer burns escrow,
//!                                                         hedge minted)
//!                                        → reject_mint   (escrow returned)
//! REDEEM: apply_redeem → hedge escrowed  → confirm_redeem (redemption paid,
//!                                                          hedge burned)
//!                                        → reject_redeem  (escrow returned)
//! ```
//!
//! Requesters fund submissions by approving `config.escrow_account` as a
//! spender on the relevant ledger. Resolution calls are operator-only.
//!
//! Atomicity: every flow runs its fallible steps before any irreversible
//! mutation, so a failure — including an escrow-release failure during
//! resolution — leaves balances and the order status (still Pending)
//! untouched, and the operator can retry.

use chrono::Utc;
use hedgemint_ledger::{AssetDirectory, TokenLedger};
use hedgemint_types::{
    AccountId, AssetId, EngineConfig, HedgemintError, Order, OrderHash, OrderKind, OrderRecord,
    OrderStatus, Result,
};

use crate::auth::{OrderValidator, SignerGate};
use crate::registry::OrderRegistry;
use crate::supported::SupportedAssets;

/// Signed-order settlement engine. Owns the order registry and the hedge
/// token ledger; holds asset tokens only in escrow pending resolution.
pub struct SettlementEngine {
    config: EngineConfig,
    signer: Box<dyn SignerGate>,
    registry: OrderRegistry,
    supported: SupportedAssets,
    assets: AssetDirectory,
    hedge: TokenLedger,
}

impl SettlementEngine {
    /// Create an engine over the given asset directory.
    ///
    /// # Errors
    /// Returns `UnknownAsset` if the configured redemption asset is not in
    /// the directory.
    pub fn new(
        config: EngineConfig,
        signer: Box<dyn SignerGate>,
        assets: AssetDirectory,
    ) -> Result<Self> {
        if !assets.contains(config.redemption_asset) {
            return Err(HedgemintError::UnknownAsset(config.redemption_asset));
        }
        let hedge = TokenLedger::new(config.hedge_symbol.clone(), config.hedge_decimals);
        Ok(Self {
            config,
            signer,
            registry: OrderRegistry::new(),
            supported: SupportedAssets::new(),
            assets,
            hedge,
        })
    }

    // =====================================================================
    // Submission flows (requester-facing)
    // =====================================================================

    /// Submit a Mint order: pull `amount_in` of the order's asset token from
    /// the requester into escrow and register the order as Pending. No hedge
    /// tokens are minted yet.
    ///
    /// # Errors
    /// - `NotRequester` if `caller` isn't the order's requester
    /// - `WrongOrderKind` if the order isn't a Mint
    /// - any validation failure from [`OrderValidator::validate`]
    /// - `InsufficientAllowance` / `InsufficientBalance` on the escrow pull
    pub fn apply_mint(
        &mut self,
        caller: AccountId,
        order: Order,
        claimed_hash: OrderHash,
        authorization: &[u8],
    ) -> Result<OrderHash> {
        let now = Utc::now();
        self.check_submission(caller, &order, OrderKind::Mint)?;
        let hash = self.validate_submission(&order, &claimed_hash, authorization, now)?;

        let escrow = self.config.escrow_account;
        self.assets.ledger_mut(order.asset_id)?.transfer_from(
            escrow,
            order.requester,
            escrow,
            order.amount_in,
        )?;

        tracing::info!(
            hash = %hash,
            requester = %order.requester,
            asset = %order.asset_id,
            amount_in = %order.amount_in,
            "mint order escrowed and pending"
        );
        self.registry.register(hash, order, now)?;
        Ok(hash)
    }

    /// Submit a Redeem order: pull `amount_in` of the hedge token from the
    /// requester into escrow and register the order as Pending.
    ///
    /// # Errors
    /// Same failure modes as [`Self::apply_mint`], on the hedge ledger.
    pub fn apply_redeem(
        &mut self,
        caller: AccountId,
        order: Order,
        claimed_hash: OrderHash,
        authorization: &[u8],
    ) -> Result<OrderHash> {
        let now = Utc::now();
        self.check_submission(caller, &order, OrderKind::Redeem)?;
        let hash = self.validate_submission(&order, &claimed_hash, authorization, now)?;

        let escrow = self.config.escrow_account;
        self.hedge
            .transfer_from(escrow, order.requester, escrow, order.amount_in)?;

        tracing::info!(
            hash = %hash,
            requester = %order.requester,
            amount_in = %order.amount_in,
            "redeem order escrowed and pending"
        );
        self.registry.register(hash, order, now)?;
        Ok(hash)
    }

    // =====================================================================
    // Resolution flows (operator-only)
    // =====================================================================

    /// Reject a Pending Mint order: return the escrowed asset tokens to the
    /// requester. Terminal.
    pub fn reject_mint(&mut self, caller: AccountId, hash: &OrderHash) -> Result<()> {
        let order = self.pending_order(caller, hash, OrderKind::Mint)?;
        let escrow = self.config.escrow_account;

        self.assets.ledger_mut(order.asset_id)?.transfer(
            escrow,
            order.requester,
            order.amount_in,
        )?;
        self.registry.resolve(hash, OrderStatus::Rejected)?;

        tracing::info!(hash = %hash, requester = %order.requester, "mint order rejected, escrow returned");
        Ok(())
    }

    /// Confirm a Pending Mint order: the issuer pulls and burns the escrowed
    /// asset tokens, then `amount_out` hedge tokens are minted to the
    /// requester. Terminal.
    ///
    /// The issuer is approved for exactly this order's amount — no standing
    /// unlimited allowance is left behind.
    pub fn confirm_mint(&mut self, caller: AccountId, hash: &OrderHash) -> Result<()> {
        let order = self.pending_order(caller, hash, OrderKind::Mint)?;
        let escrow = self.config.escrow_account;

        let issuer = self.assets.issuer(order.asset_id)?;
        self.assets
            .ledger_mut(order.asset_id)?
            .approve(escrow, issuer, order.amount_in);
        self.assets
            .burn_escrow(order.asset_id, escrow, order.amount_in)?;

        self.hedge.mint(order.requester, order.amount_out);
        self.registry.resolve(hash, OrderStatus::Confirmed)?;

        tracing::info!(
            hash = %hash,
            requester = %order.requester,
            amount_out = %order.amount_out,
            hedge_supply = %self.hedge.total_supply(),
            "mint order confirmed"
        );
        Ok(())
    }

    /// Reject a Pending Redeem order: transfer the escrowed hedge tokens
    /// back to the requester (a plain transfer, not a burn). Terminal.
    pub fn reject_redeem(&mut self, caller: AccountId, hash: &OrderHash) -> Result<()> {
        let order = self.pending_order(caller, hash, OrderKind::Redeem)?;
        let escrow = self.config.escrow_account;

        self.hedge
            .transfer(escrow, order.requester, order.amount_in)?;
        self.registry.resolve(hash, OrderStatus::Rejected)?;

        tracing::info!(hash = %hash, requester = %order.requester, "redeem order rejected, escrow returned");
        Ok(())
    }

    /// Confirm a Pending Redeem order: pay `amount_out` of the redemption
    /// asset from the engine's reserve to the requester, then burn the
    /// escrowed hedge tokens. Terminal.
    pub fn confirm_redeem(&mut self, caller: AccountId, hash: &OrderHash) -> Result<()> {
        let order = self.pending_order(caller, hash, OrderKind::Redeem)?;
        let escrow = self.config.escrow_account;

        // Both legs are checked before either moves.
        let held = self.hedge.balance_of(escrow);
        if held < order.amount_in {
            return Err(HedgemintError::InsufficientBalance {
                needed: order.amount_in,
                available: held,
            });
        }
        self.assets
            .ledger_mut(self.config.redemption_asset)?
            .transfer(escrow, order.requester, order.amount_out)?;
        self.hedge.burn(escrow, order.amount_in)?;
        self.registry.resolve(hash, OrderStatus::Confirmed)?;

        tracing::info!(
            hash = %hash,
            requester = %order.requester,
            amount_out = %order.amount_out,
            hedge_supply = %self.hedge.total_supply(),
            "redeem order confirmed"
        );
        Ok(())
    }

    // =====================================================================
    // Administration (operator-only)
    // =====================================================================

    /// Allow an asset to be referenced by new Mint orders.
    ///
    /// # Errors
    /// - `NotOperator` / `UnknownAsset` / `AlreadySupported`
    pub fn add_supported_asset(&mut self, caller: AccountId, asset_id: AssetId) -> Result<()> {
        self.ensure_operator(caller)?;
        if !self.assets.contains(asset_id) {
            return Err(HedgemintError::UnknownAsset(asset_id));
        }
        self.supported.add(asset_id)
    }

    /// Stop accepting new Mint orders for an asset. Orders already recorded
    /// resolve from their stored payload regardless.
    pub fn remove_supported_asset(&mut self, caller: AccountId, asset_id: AssetId) -> Result<()> {
        self.ensure_operator(caller)?;
        self.supported.remove(asset_id)
    }

    /// Replace the designated signer gate.
    pub fn set_signer(&mut self, caller: AccountId, signer: Box<dyn SignerGate>) -> Result<()> {
        self.ensure_operator(caller)?;
        self.signer = signer;
        Ok(())
    }

    /// Hand the operator role to another account.
    pub fn set_operator(&mut self, caller: AccountId, operator: AccountId) -> Result<()> {
        self.ensure_operator(caller)?;
        self.config.operator = operator;
        Ok(())
    }

    /// Change the asset paid out on confirmed redeems.
    ///
    /// # Errors
    /// Returns `UnknownAsset` if the asset is not in the directory.
    pub fn set_redemption_asset(&mut self, caller: AccountId, asset_id: AssetId) -> Result<()> {
        self.ensure_operator(caller)?;
        if !self.assets.contains(asset_id) {
            return Err(HedgemintError::UnknownAsset(asset_id));
        }
        self.config.redemption_asset = asset_id;
        Ok(())
    }

    // =====================================================================
    // Queries
    // =====================================================================

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn operator(&self) -> AccountId {
        self.config.operator
    }

    /// The account requesters must approve as spender to fund submissions.
    #[must_use]
    pub fn escrow_account(&self) -> AccountId {
        self.config.escrow_account
    }

    #[must_use]
    pub fn is_supported(&self, asset_id: AssetId) -> bool {
        self.supported.contains(asset_id)
    }

    /// `None` means the hash was never registered.
    #[must_use]
    pub fn order_status(&self, hash: &OrderHash) -> Option<OrderStatus> {
        self.registry.status(hash)
    }

    #[must_use]
    pub fn order(&self, hash: &OrderHash) -> Option<&OrderRecord> {
        self.registry.get(hash)
    }

    /// The hedge token ledger (engine-owned).
    #[must_use]
    pub fn hedge_ledger(&self) -> &TokenLedger {
        &self.hedge
    }

    /// Mutable hedge ledger access — the token surface requesters use to
    /// approve the escrow account before `apply_redeem`.
    pub fn hedge_ledger_mut(&mut self) -> &mut TokenLedger {
        &mut self.hedge
    }

    #[must_use]
    pub fn assets(&self) -> &AssetDirectory {
        &self.assets
    }

    /// Mutable directory access — the token surface requesters use to fund
    /// balances and approve the escrow account before `apply_mint`.
    pub fn assets_mut(&mut self) -> &mut AssetDirectory {
        &mut self.assets
    }

    // =====================================================================
    // Internal guards
    // =====================================================================

    fn ensure_operator(&self, caller: AccountId) -> Result<()> {
        if caller != self.config.operator {
            return Err(HedgemintError::NotOperator);
        }
        Ok(())
    }

    fn check_submission(&self, caller: AccountId, order: &Order, kind: OrderKind) -> Result<()> {
        if caller != order.requester {
            return Err(HedgemintError::NotRequester);
        }
        if order.kind != kind {
            return Err(HedgemintError::WrongOrderKind {
                expected: kind,
                actual: order.kind,
            });
        }
        Ok(())
    }

    fn validate_submission(
        &self,
        order: &Order,
        claimed_hash: &OrderHash,
        authorization: &[u8],
        now: chrono::DateTime<Utc>,
    ) -> Result<OrderHash> {
        let validator = OrderValidator::new(&self.supported, &self.registry, self.signer.as_ref());
        validator.validate(order, claimed_hash, authorization, now)
    }

    /// Shared resolution guard: operator check, existence, Pending status,
    /// and track (kind) match. Returns a copy of the recorded order —
    /// resolution trusts the recorded payload, not re-validation.
    fn pending_order(
        &self,
        caller: AccountId,
        hash: &OrderHash,
        kind: OrderKind,
    ) -> Result<Order> {
        self.ensure_operator(caller)?;
        let record = self
            .registry
            .get(hash)
            .ok_or(HedgemintError::OrderNotFound(*hash))?;
        if record.status != OrderStatus::Pending {
            return Err(HedgemintError::OrderNotPending {
                hash: *hash,
                status: record.status,
            });
        }
        if record.order.kind != kind {
            return Err(HedgemintError::WrongOrderKind {
                expected: kind,
                actual: record.order.kind,
            });
        }
        Ok(record.order.clone())
    }
}
