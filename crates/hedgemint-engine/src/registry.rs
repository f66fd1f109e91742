//! Order registry — deduplication set and status book.
//!
//! Keyed by content hash. Registration succeeds at most once per hash over
//! the registry's lifetime; the stored order is immutable once accepted.
//! Unlike a bounded idempotency cache, this map never evicts: a forgotten
//! hash would re-open replay, so permanence is the invariant.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use hedgemint_types::{HedgemintError, Order, OrderHash, OrderRecord, OrderStatus, Result};

/// Deduplicated map of accepted orders and their lifecycle state.
#[derive(Debug, Clone, Default)]
pub struct OrderRegistry {
    entries: HashMap<OrderHash, OrderRecord>,
}

impl OrderRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Whether this hash was ever registered (any status).
    #[must_use]
    pub fn contains(&self, hash: &OrderHash) -> bool {
        self.entries.contains_key(hash)
    }

    /// Accept an order as Pending with `accepted_at = now`.
    ///
    /// # Errors
    /// Returns `DuplicateOrder` if the hash was ever registered before.
    pub fn register(&mut self, hash: OrderHash, order: Order, now: DateTime<Utc>) -> Result<()> {
        if self.entries.contains_key(&hash) {
            return Err(HedgemintError::DuplicateOrder(hash));
        }
        self.entries.insert(
            hash,
            OrderRecord {
                order,
                status: OrderStatus::Pending,
                accepted_at: now,
            },
        );
        Ok(())
    }

    /// Move a Pending order to a terminal status. Irreversible.
    ///
    /// # Errors
    /// - `OrderNotFound` if the hash was never registered
    /// - `OrderNotPending` if the order is already terminal
    /// - `InvalidOrder` if `terminal` is not a terminal status
    pub fn resolve(&mut self, hash: &OrderHash, terminal: OrderStatus) -> Result<()> {
        if !terminal.is_terminal() {
            return Err(HedgemintError::InvalidOrder {
                reason: format!("{terminal} is not a terminal status"),
            });
        }
        let record = self
            .entries
            .get_mut(hash)
            .ok_or(HedgemintError::OrderNotFound(*hash))?;

        if !record.status.can_transition_to(terminal) {
            return Err(HedgemintError::OrderNotPending {
                hash: *hash,
                status: record.status,
            });
        }
        record.status = terminal;
        Ok(())
    }

    /// Look up the full record for a hash.
    #[must_use]
    pub fn get(&self, hash: &OrderHash) -> Option<&OrderRecord> {
        self.entries.get(hash)
    }

    /// Status lookup. `None` means the hash was never registered.
    #[must_use]
    pub fn status(&self, hash: &OrderHash) -> Option<OrderStatus> {
        self.entries.get(hash).map(|record| record.status)
    }

    /// Number of orders ever registered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
