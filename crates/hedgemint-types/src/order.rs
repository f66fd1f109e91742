//! Order model for the HedgeMint settlement engine.
//!
//! An [`Order`] is a signed, immutable request to exchange `amount_in` of one
//! token for `amount_out` of another. Its identity is the SHA-256 hash of its
//! full structural content — the engine always recomputes this hash and never
//! trusts a caller-supplied one.
//!
//! ## Status machine
//!
//! ```text
//!   ┌─────────┐  confirm   ┌───────────┐
//!   │ PENDING ├───────────▶│ CONFIRMED │
//!   └────┬────┘            └───────────┘
//!        │ reject
//!        ▼
//!   ┌──────────┐
//!   │ REJECTED │
//!   └──────────┘
//! ```
//!
//! "Never submitted" is not a status — registry lookups for unknown hashes
//! return `None` rather than a sentinel variant.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{AccountId, AssetId, OrderHash};

/// Which conversion direction this order requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum OrderKind {
    /// Asset tokens in, hedge tokens out.
    Mint,
    /// Hedge tokens in, redemption asset out.
    Redeem,
}

impl std::fmt::Display for OrderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mint => write!(f, "MINT"),
            Self::Redeem => write!(f, "REDEEM"),
        }
    }
}

/// Lifecycle status of a registered order.
///
/// Transitions are **monotonic**: `Pending → Confirmed` and
/// `Pending → Rejected` are the only legal moves, and both are irreversible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Escrowed and awaiting operator resolution.
    Pending,
    /// Operator rejected the order. Escrow was returned. **Irreversible.**
    Rejected,
    /// Operator confirmed the order. Escrow was consumed. **Irreversible.**
    Confirmed,
}

impl OrderStatus {
    /// Can this status transition to the given target?
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Rejected | Self::Confirmed)
        )
    }

    /// Whether this status is terminal (no transition leaves it).
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Confirmed)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Rejected => write!(f, "REJECTED"),
            Self::Confirmed => write!(f, "CONFIRMED"),
        }
    }
}

/// A signed order. Immutable once accepted into the registry.
///
/// The `nonce` lets a requester mint otherwise-identical orders that must be
/// treated as distinct instances; all other fields are business content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Mint (asset → hedge) or Redeem (hedge → redemption asset).
    pub kind: OrderKind,
    /// The asset token class. Only meaningful for Mint orders; Redeem orders
    /// carry it for hash coverage.
    pub asset_id: AssetId,
    /// Distinguishes otherwise-identical orders.
    pub nonce: u64,
    /// Amount pulled from the requester into escrow at submission.
    pub amount_in: Decimal,
    /// Amount paid to the requester on confirmation.
    pub amount_out: Decimal,
    /// Latest instant at which the order may be submitted.
    pub deadline: DateTime<Utc>,
    /// The account that must submit (and funds) this order.
    pub requester: AccountId,
}

impl Order {
    /// Canonical hashing payload.
    ///
    /// Format: `"hedgemint:order:v1:" || kind || asset_id || nonce ||
    /// amount_in || amount_out || deadline_ms || requester`
    #[must_use]
    pub fn signing_payload(&self) -> Vec<u8> {
        let mut payload = Vec::with_capacity(128);
        payload.extend_from_slice(b"hedgemint:order:v1:");
        payload.push(match self.kind {
            OrderKind::Mint => 0u8,
            OrderKind::Redeem => 1u8,
        });
        payload.extend_from_slice(&self.asset_id.0.to_le_bytes());
        payload.extend_from_slice(&self.nonce.to_le_bytes());
        payload.extend_from_slice(self.amount_in.to_string().as_bytes());
        payload.push(b'|');
        payload.extend_from_slice(self.amount_out.to_string().as_bytes());
        payload.extend_from_slice(&self.deadline.timestamp_millis().to_le_bytes());
        payload.extend_from_slice(self.requester.0.as_bytes());
        payload
    }

    /// Content hash: SHA-256 over [`signing_payload`](Self::signing_payload).
    ///
    /// Pure and deterministic — identical content always produces the same
    /// hash, and any single field change (including `nonce`) changes it.
    #[must_use]
    pub fn content_hash(&self) -> OrderHash {
        let digest = Sha256::digest(self.signing_payload());
        OrderHash::from_digest(digest.into())
    }

    /// Whether `now` is past the submission deadline.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.deadline
    }
}

/// Registry entry: the accepted order plus its lifecycle state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order: Order,
    pub status: OrderStatus,
    /// When the engine accepted the order (escrow secured).
    pub accepted_at: DateTime<Utc>,
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Order {
    pub fn dummy_mint(requester: AccountId, asset_id: AssetId) -> Self {
        Self {
            kind: OrderKind::Mint,
            asset_id,
            nonce: rand::random::<u64>(),
            amount_in: Decimal::new(100, 0),
            amount_out: Decimal::new(90, 0),
            deadline: Utc::now() + chrono::Duration::hours(1),
            requester,
        }
    }

    pub fn dummy_redeem(requester: AccountId, asset_id: AssetId) -> Self {
        Self {
            kind: OrderKind::Redeem,
            asset_id,
            nonce: rand::random::<u64>(),
            amount_in: Decimal::new(90, 0),
            amount_out: Decimal::new(95, 0),
            deadline: Utc::now() + chrono::Duration::hours(1),
            requester,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_order() -> Order {
        Order {
            kind: OrderKind::Mint,
            asset_id: AssetId(7),
            nonce: 1,
            amount_in: Decimal::new(100, 0),
            amount_out: Decimal::new(90, 0),
            deadline: DateTime::from_timestamp(2_000_000_000, 0).unwrap(),
            requester: AccountId::from_bytes([3u8; 16]),
        }
    }

    #[test]
    fn status_transitions_valid() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Confirmed));
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Rejected));
    }

    #[test]
    fn status_transitions_invalid() {
        assert!(!OrderStatus::Confirmed.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Confirmed.can_transition_to(OrderStatus::Rejected));
        assert!(!OrderStatus::Rejected.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Rejected.can_transition_to(OrderStatus::Confirmed));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Pending));
    }

    #[test]
    fn terminal_statuses() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(OrderStatus::Rejected.is_terminal());
        assert!(OrderStatus::Confirmed.is_terminal());
    }

    #[test]
    fn content_hash_deterministic() {
        let a = make_order();
        let b = make_order();
        assert_eq!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn content_hash_sensitive_to_every_field() {
        let base = make_order();
        let base_hash = base.content_hash();

        let mut o = base.clone();
        o.kind = OrderKind::Redeem;
        assert_ne!(o.content_hash(), base_hash, "kind must affect the hash");

        let mut o = base.clone();
        o.asset_id = AssetId(8);
        assert_ne!(o.content_hash(), base_hash, "asset_id must affect the hash");

        let mut o = base.clone();
        o.nonce = 2;
        assert_ne!(o.content_hash(), base_hash, "nonce must affect the hash");

        let mut o = base.clone();
        o.amount_in = Decimal::new(101, 0);
        assert_ne!(o.content_hash(), base_hash, "amount_in must affect the hash");

        let mut o = base.clone();
        o.amount_out = Decimal::new(91, 0);
        assert_ne!(o.content_hash(), base_hash, "amount_out must affect the hash");

        let mut o = base.clone();
        o.deadline += chrono::Duration::seconds(1);
        assert_ne!(o.content_hash(), base_hash, "deadline must affect the hash");

        let mut o = base.clone();
        o.requester = AccountId::from_bytes([4u8; 16]);
        assert_ne!(o.content_hash(), base_hash, "requester must affect the hash");
    }

    #[test]
    fn amount_fields_not_confusable() {
        // 1|00 vs 10|0 — the separator keeps the two amounts from gluing
        // into the same byte string.
        let mut a = make_order();
        a.amount_in = Decimal::new(1, 0);
        a.amount_out = Decimal::new(900, 0);
        let mut b = make_order();
        b.amount_in = Decimal::new(19, 1); // "1.9"
        b.amount_out = Decimal::new(0, 0);
        assert_ne!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn expiry_check() {
        let order = make_order();
        assert!(!order.is_expired_at(order.deadline));
        assert!(order.is_expired_at(order.deadline + chrono::Duration::milliseconds(1)));
    }

    #[test]
    fn serde_roundtrip() {
        let order = make_order();
        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order, back);
        assert_eq!(order.content_hash(), back.content_hash());
    }
}
