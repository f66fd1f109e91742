//! Order authorization — content hash checking and signature verification.
//!
//! The engine never trusts a caller-supplied order hash: it recomputes the
//! hash from the order content and compares, so an identity/content mismatch
//! is caught before anything else. Authorization is then checked against the
//! designated signer through the [`SignerGate`] trait, which admits both
//! plain ed25519 keys and delegated/contract-style signers.
//!
//! Validation is purely advisory: no side effects, no state changes.

use chrono::{DateTime, Utc};
use ed25519_dalek::{Signature, VerifyingKey};
use hedgemint_types::{HedgemintError, Order, OrderHash, OrderKind, Result};

use crate::registry::OrderRegistry;
use crate::supported::SupportedAssets;

/// Pluggable verification of the designated signer's authorization over an
/// order hash.
pub trait SignerGate: Send + Sync {
    /// Does `authorization` prove the designated signer approved `hash`?
    fn authorizes(&self, hash: &OrderHash, authorization: &[u8]) -> bool;
}

/// Plain-key scheme: an ed25519 signature over the raw order hash bytes.
pub struct Ed25519Gate {
    key: VerifyingKey,
}

impl Ed25519Gate {
    #[must_use]
    pub fn new(key: VerifyingKey) -> Self {
        Self { key }
    }

    /// Build from raw public key bytes.
    ///
    /// # Errors
    /// Returns `InvalidOrder` if the bytes are not a valid curve point.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self> {
        let key = VerifyingKey::from_bytes(bytes).map_err(|e| HedgemintError::InvalidOrder {
            reason: format!("bad signer key: {e}"),
        })?;
        Ok(Self { key })
    }
}

impl SignerGate for Ed25519Gate {
    fn authorizes(&self, hash: &OrderHash, authorization: &[u8]) -> bool {
        let Ok(signature) = Signature::from_slice(authorization) else {
            return false;
        };
        self.key.verify_strict(hash.as_bytes(), &signature).is_ok()
    }
}

/// Delegated scheme: authorization is whatever the wrapped predicate accepts.
/// Covers contract-style signers where verification is a call into another
/// component rather than a curve check.
pub struct DelegatedGate {
    predicate: Box<dyn Fn(&OrderHash, &[u8]) -> bool + Send + Sync>,
}

impl DelegatedGate {
    pub fn new(predicate: impl Fn(&OrderHash, &[u8]) -> bool + Send + Sync + 'static) -> Self {
        Self {
            predicate: Box::new(predicate),
        }
    }
}

impl SignerGate for DelegatedGate {
    fn authorizes(&self, hash: &OrderHash, authorization: &[u8]) -> bool {
        (self.predicate)(hash, authorization)
    }
}

/// Submission-time validation gate. Fail-closed: the first failing check
/// rejects the order.
pub struct OrderValidator<'a> {
    supported: &'a SupportedAssets,
    registry: &'a OrderRegistry,
    gate: &'a dyn SignerGate,
}

impl<'a> OrderValidator<'a> {
    #[must_use]
    pub fn new(
        supported: &'a SupportedAssets,
        registry: &'a OrderRegistry,
        gate: &'a dyn SignerGate,
    ) -> Self {
        Self {
            supported,
            registry,
            gate,
        }
    }

    /// Validate an order for submission. Returns the recomputed content hash.
    ///
    /// Check order:
    /// 1. claimed hash equals the recomputed hash (`HashMismatch`)
    /// 2. amounts are non-negative (`InvalidOrder` — a negative amount would
    ///    invert the escrow pull)
    /// 3. Mint orders reference a supported asset (`UnsupportedAsset`)
    /// 4. deadline not passed at `now` (`OrderExpired`)
    /// 5. hash not already registered, any status (`DuplicateOrder`)
    /// 6. signer gate accepts the authorization (`BadAuthorization`)
    pub fn validate(
        &self,
        order: &Order,
        claimed_hash: &OrderHash,
        authorization: &[u8],
        now: DateTime<Utc>,
    ) -> Result<OrderHash> {
        let computed = order.content_hash();
        if computed != *claimed_hash {
            return Err(HedgemintError::HashMismatch {
                claimed: *claimed_hash,
                computed,
            });
        }

        if order.amount_in.is_sign_negative() || order.amount_out.is_sign_negative() {
            return Err(HedgemintError::InvalidOrder {
                reason: "amounts must not be negative".to_string(),
            });
        }

        if order.kind == OrderKind::Mint && !self.supported.contains(order.asset_id) {
            return Err(HedgemintError::UnsupportedAsset(order.asset_id));
        }

        if order.is_expired_at(now) {
            return Err(HedgemintError::OrderExpired {
                deadline: order.deadline,
                now,
            });
        }

        if self.registry.contains(&computed) {
            return Err(HedgemintError::DuplicateOrder(computed));
        }

        if !self.gate.authorizes(&computed, authorization) {
            return Err(HedgemintError::BadAuthorization);
        }

        Ok(computed)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use ed25519_dalek::{Signer, SigningKey};
    use hedgemint_types::{AccountId, AssetId};

    use super::*;

    fn signed_setup() -> (SigningKey, Ed25519Gate) {
        let signing_key = SigningKey::generate(&mut rand::rngs::OsRng);
        let gate = Ed25519Gate::new(signing_key.verifying_key());
        (signing_key, gate)
    }

    fn sign(key: &SigningKey, hash: &OrderHash) -> Vec<u8> {
        key.sign(hash.as_bytes()).to_bytes().to_vec()
    }

    #[test]
    fn ed25519_gate_accepts_valid_signature() {
        let (key, gate) = signed_setup();
        let hash = OrderHash([9u8; 32]);
        assert!(gate.authorizes(&hash, &sign(&key, &hash)));
    }

    #[test]
    fn ed25519_gate_rejects_wrong_message() {
        let (key, gate) = signed_setup();
        let hash = OrderHash([9u8; 32]);
        let other = OrderHash([10u8; 32]);
        assert!(!gate.authorizes(&other, &sign(&key, &hash)));
    }

    #[test]
    fn ed25519_gate_rejects_wrong_key() {
        let (key, _) = signed_setup();
        let (_, other_gate) = signed_setup();
        let hash = OrderHash([9u8; 32]);
        assert!(!other_gate.authorizes(&hash, &sign(&key, &hash)));
    }

    #[test]
    fn ed25519_gate_rejects_garbage() {
        let (_, gate) = signed_setup();
        let hash = OrderHash([9u8; 32]);
        assert!(!gate.authorizes(&hash, b"not a signature"));
        assert!(!gate.authorizes(&hash, &[0u8; 64]));
    }

    #[test]
    fn delegated_gate_runs_predicate() {
        let gate = DelegatedGate::new(|_, auth| auth == b"approved");
        let hash = OrderHash([1u8; 32]);
        assert!(gate.authorizes(&hash, b"approved"));
        assert!(!gate.authorizes(&hash, b"denied"));
    }

    #[test]
    fn validator_check_ordering() {
        let (key, gate) = signed_setup();
        let mut supported = SupportedAssets::new();
        supported.add(AssetId(7)).unwrap();
        let registry = OrderRegistry::new();
        let validator = OrderValidator::new(&supported, &registry, &gate);
        let now = Utc::now();

        let order = Order::dummy_mint(AccountId::new(), AssetId(7));
        let hash = order.content_hash();
        let auth = sign(&key, &hash);

        // Happy path.
        assert_eq!(validator.validate(&order, &hash, &auth, now).unwrap(), hash);

        // Hash mismatch wins over everything else.
        let wrong = OrderHash([0u8; 32]);
        assert!(matches!(
            validator.validate(&order, &wrong, &auth, now).unwrap_err(),
            HedgemintError::HashMismatch { .. }
        ));

        // Unsupported asset beats expiry and signature.
        let mut unsupported = Order::dummy_mint(AccountId::new(), AssetId(8));
        unsupported.deadline = now - Duration::hours(1);
        let uhash = unsupported.content_hash();
        assert!(matches!(
            validator
                .validate(&unsupported, &uhash, b"junk", now)
                .unwrap_err(),
            HedgemintError::UnsupportedAsset(AssetId(8))
        ));

        // Expiry beats a bad signature.
        let mut expired = Order::dummy_mint(AccountId::new(), AssetId(7));
        expired.deadline = now - Duration::seconds(1);
        let ehash = expired.content_hash();
        assert!(matches!(
            validator
                .validate(&expired, &ehash, b"junk", now)
                .unwrap_err(),
            HedgemintError::OrderExpired { .. }
        ));

        // Bad signature last.
        let fresh = Order::dummy_mint(AccountId::new(), AssetId(7));
        let fhash = fresh.content_hash();
        assert!(matches!(
            validator
                .validate(&fresh, &fhash, b"junk", now)
                .unwrap_err(),
            HedgemintError::BadAuthorization
        ));
    }

    #[test]
    fn validator_rejects_negative_amounts() {
        let (key, gate) = signed_setup();
        let mut supported = SupportedAssets::new();
        supported.add(AssetId(7)).unwrap();
        let registry = OrderRegistry::new();
        let validator = OrderValidator::new(&supported, &registry, &gate);

        let mut order = Order::dummy_mint(AccountId::new(), AssetId(7));
        order.amount_in = rust_decimal::Decimal::new(-100, 0);
        let hash = order.content_hash();
        let auth = sign(&key, &hash);

        assert!(matches!(
            validator
                .validate(&order, &hash, &auth, Utc::now())
                .unwrap_err(),
            HedgemintError::InvalidOrder { .. }
        ));
    }

    #[test]
    fn validator_expiry_ignores_signature_validity() {
        // A perfectly signed order still fails once the deadline passed.
        let (key, gate) = signed_setup();
        let mut supported = SupportedAssets::new();
        supported.add(AssetId(7)).unwrap();
        let registry = OrderRegistry::new();
        let validator = OrderValidator::new(&supported, &registry, &gate);

        let mut order = Order::dummy_mint(AccountId::new(), AssetId(7));
        let now = Utc::now();
        order.deadline = now - Duration::milliseconds(1);
        let hash = order.content_hash();
        let auth = sign(&key, &hash);

        assert!(matches!(
            validator.validate(&order, &hash, &auth, now).unwrap_err(),
            HedgemintError::OrderExpired { .. }
        ));
    }

    #[test]
    fn validator_redeem_skips_supported_set() {
        let (key, gate) = signed_setup();
        let supported = SupportedAssets::new(); // empty
        let registry = OrderRegistry::new();
        let validator = OrderValidator::new(&supported, &registry, &gate);

        let order = Order::dummy_redeem(AccountId::new(), AssetId(42));
        let hash = order.content_hash();
        let auth = sign(&key, &hash);
        assert!(validator.validate(&order, &hash, &auth, Utc::now()).is_ok());
    }

    #[test]
    fn validator_flags_duplicates_in_any_status() {
        let (key, gate) = signed_setup();
        let mut supported = SupportedAssets::new();
        supported.add(AssetId(7)).unwrap();
        let mut registry = OrderRegistry::new();

        let order = Order::dummy_mint(AccountId::new(), AssetId(7));
        let hash = order.content_hash();
        let auth = sign(&key, &hash);
        let now = Utc::now();

        registry.register(hash, order.clone(), now).unwrap();
        {
            let validator = OrderValidator::new(&supported, &registry, &gate);
            assert!(matches!(
                validator.validate(&order, &hash, &auth, now).unwrap_err(),
                HedgemintError::DuplicateOrder(h) if h == hash
            ));
        }

        // Still a duplicate after resolution.
        registry
            .resolve(&hash, hedgemint_types::OrderStatus::Confirmed)
            .unwrap();
        let validator = OrderValidator::new(&supported, &registry, &gate);
        assert!(matches!(
            validator.validate(&order, &hash, &auth, now).unwrap_err(),
            HedgemintError::DuplicateOrder(_)
        ));
    }
}
