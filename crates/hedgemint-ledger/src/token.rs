//! Fungible token ledger — balances, allowances, supply.
//!
//! One `TokenLedger` instance per token class: each asset token, the hedge
//! token, and the redemption asset. The decimal scale is set at construction
//! and never assumed — the hedge token deliberately uses a non-default scale.
//!
//! A `Decimal::MAX` allowance is treated as unlimited and is not decremented
//! on spend.

use std::collections::HashMap;

use hedgemint_types::{AccountId, HedgemintError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Balance, allowance, and supply accounting for a single token class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenLedger {
    symbol: String,
    decimals: u32,
    balances: HashMap<AccountId, Decimal>,
    /// `owner → spender → remaining allowance`.
    allowances: HashMap<AccountId, HashMap<AccountId, Decimal>>,
    total_supply: Decimal,
}

impl TokenLedger {
    /// Create an empty ledger with an explicit decimal scale.
    #[must_use]
    pub fn new(symbol: impl Into<String>, decimals: u32) -> Self {
        Self {
            symbol: symbol.into(),
            decimals,
            balances: HashMap::new(),
            allowances: HashMap::new(),
            total_supply: Decimal::ZERO,
        }
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    #[must_use]
    pub fn total_supply(&self) -> Decimal {
        self.total_supply
    }

    #[must_use]
    pub fn balance_of(&self, account: AccountId) -> Decimal {
        self.balances.get(&account).copied().unwrap_or(Decimal::ZERO)
    }

    #[must_use]
    pub fn allowance(&self, owner: AccountId, spender: AccountId) -> Decimal {
        self.allowances
            .get(&owner)
            .and_then(|spenders| spenders.get(&spender))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Create `amount` new tokens in `to`'s balance.
    pub fn mint(&mut self, to: AccountId, amount: Decimal) {
        *self.balances.entry(to).or_insert(Decimal::ZERO) += amount;
        self.total_supply += amount;
    }

    /// Destroy `amount` tokens from `from`'s balance.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if `from` holds less than `amount`;
    /// nothing changes.
    pub fn burn(&mut self, from: AccountId, amount: Decimal) -> Result<()> {
        let balance = self.balance_of(from);
        if balance < amount {
            return Err(HedgemintError::InsufficientBalance {
                needed: amount,
                available: balance,
            });
        }
        *self.balances.entry(from).or_insert(Decimal::ZERO) -= amount;
        self.total_supply -= amount;
        Ok(())
    }

    /// Move `amount` from `from` to `to`.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if `from` holds less than `amount`;
    /// nothing changes.
    pub fn transfer(&mut self, from: AccountId, to: AccountId, amount: Decimal) -> Result<()> {
        let balance = self.balance_of(from);
        if balance < amount {
            return Err(HedgemintError::InsufficientBalance {
                needed: amount,
                available: balance,
            });
        }
        *self.balances.entry(from).or_insert(Decimal::ZERO) -= amount;
        *self.balances.entry(to).or_insert(Decimal::ZERO) += amount;
        Ok(())
    }

    /// Set `spender`'s allowance over `owner`'s balance. `Decimal::MAX`
    /// means unlimited.
    pub fn approve(&mut self, owner: AccountId, spender: AccountId, amount: Decimal) {
        self.allowances
            .entry(owner)
            .or_default()
            .insert(spender, amount);
    }

    /// Move `amount` from `from` to `to` on behalf of `spender`, consuming
    /// allowance.
    ///
    /// # Errors
    /// - `InsufficientAllowance` if `spender`'s allowance over `from` is
    ///   below `amount` (checked before the balance)
    /// - `InsufficientBalance` if `from` holds less than `amount`
    ///
    /// Either failure leaves balances and allowances untouched.
    pub fn transfer_from(
        &mut self,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    ) -> Result<()> {
        let allowed = self.allowance(from, spender);
        if allowed < amount {
            return Err(HedgemintError::InsufficientAllowance {
                needed: amount,
                available: allowed,
            });
        }

        self.transfer(from, to, amount)?;

        // Unlimited allowances are a standing grant, not a budget.
        if allowed != Decimal::MAX {
            self.allowances
                .entry(from)
                .or_default()
                .insert(spender, allowed - amount);
        }
        Ok(())
    }
}
