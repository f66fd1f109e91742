//! # hedgemint-ledger
//!
//! Token custody for HedgeMint:
//! 1. **TokenLedger**: fungible-token accounting — balances, allowances,
//!    total supply, explicit decimal scale
//! 2. **AssetDirectory**: maps asset identifiers to their ledgers and issuer
//!    accounts, and executes the issuer burn path for confirmed mints
//!
//! Every mutation is a single check-then-apply step: a failed check returns
//! a typed error with no balance change.

pub mod directory;
pub mod token;

pub use directory::AssetDirectory;
pub use token::TokenLedger;
