//! Error types for the HedgeMint settlement engine.
//!
//! All errors use the `HM_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Order validation errors
//! - 2xx: Ledger errors
//! - 3xx: Authorization errors
//! - 4xx: Registry / state errors
//! - 5xx: Administration errors
//!
//! Every failure is synchronous and non-retryable by the engine itself: the
//! caller resubmits with corrected inputs. A failure anywhere in a settlement
//! flow guarantees no balance or status change occurred for that call.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{AssetId, OrderHash, OrderKind, OrderStatus};

/// Central error enum for all HedgeMint operations.
#[derive(Debug, Error)]
pub enum HedgemintError {
    // =================================================================
    // Order Validation Errors (1xx)
    // =================================================================
    /// Caller-supplied order hash disagrees with the recomputed content hash.
    #[error("HM_ERR_100: Order hash mismatch: claimed {claimed}, computed {computed}")]
    HashMismatch {
        claimed: OrderHash,
        computed: OrderHash,
    },

    /// The order's deadline has passed.
    #[error("HM_ERR_101: Order expired: deadline {deadline}, now {now}")]
    OrderExpired {
        deadline: DateTime<Utc>,
        now: DateTime<Utc>,
    },

    /// The order's kind doesn't match the flow it was submitted to.
    #[error("HM_ERR_102: Wrong order kind: expected {expected}, got {actual}")]
    WrongOrderKind {
        expected: OrderKind,
        actual: OrderKind,
    },

    /// The caller is not the order's requester.
    #[error("HM_ERR_103: Caller is not the order's requester")]
    NotRequester,

    /// The order failed structural validation (bad amounts, etc.).
    #[error("HM_ERR_104: Invalid order: {reason}")]
    InvalidOrder { reason: String },

    // =================================================================
    // Ledger Errors (2xx)
    // =================================================================
    /// Not enough balance to perform the transfer or burn.
    #[error("HM_ERR_200: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Decimal, available: Decimal },

    /// The spender's allowance doesn't cover the requested pull.
    #[error("HM_ERR_201: Insufficient allowance: need {needed}, have {available}")]
    InsufficientAllowance { needed: Decimal, available: Decimal },

    /// The asset identifier is unknown to the asset directory.
    #[error("HM_ERR_202: Unknown asset: {0}")]
    UnknownAsset(AssetId),

    // =================================================================
    // Authorization Errors (3xx)
    // =================================================================
    /// The designated signer's authorization over the order hash didn't
    /// verify.
    #[error("HM_ERR_300: Order authorization failed signature verification")]
    BadAuthorization,

    // =================================================================
    // Registry / State Errors (4xx)
    // =================================================================
    /// An order with this content hash was already registered (any status —
    /// a resolved order cannot be resubmitted).
    #[error("HM_ERR_400: Duplicate order: {0}")]
    DuplicateOrder(OrderHash),

    /// No registered order under this hash.
    #[error("HM_ERR_401: Order not found: {0}")]
    OrderNotFound(OrderHash),

    /// The order exists but is not Pending.
    #[error("HM_ERR_402: Order {hash} is {status}, not PENDING")]
    OrderNotPending {
        hash: OrderHash,
        status: OrderStatus,
    },

    /// Mint order referencing an asset outside the supported set.
    #[error("HM_ERR_403: Asset not supported: {0}")]
    UnsupportedAsset(AssetId),

    /// The asset is already in the supported set.
    #[error("HM_ERR_404: Asset already supported: {0}")]
    AlreadySupported(AssetId),

    // =================================================================
    // Administration Errors (5xx)
    // =================================================================
    /// The caller is not the privileged operator.
    #[error("HM_ERR_500: Caller is not the operator")]
    NotOperator,
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, HedgemintError>;
