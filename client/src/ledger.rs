//! The ledger interface boundary.
//!
//! The account tree is owned by the ledger, never by this client; every
//! mutation is a transaction whose acceptance is atomic and externally
//! serialized. Implementations own the signing wallet for `payer`.

use anchor_lang::prelude::Pubkey;
use anchor_lang::solana_program::instruction::Instruction;
use async_trait::async_trait;
use thiserror::Error;

/// Ledger-level failure classification.
///
/// `AccountInUse` is the one classification the protocol handles specially:
/// the bootstrapper absorbs it as "already bootstrapped" and the
/// orchestrator retries submissions once with a fresh offset. Everything
/// else is surfaced verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("account already in use")]
    AccountInUse,
    #[error("rejected: {reason}")]
    Rejected { reason: String },
    #[error("transport: {0}")]
    Transport(String),
}

/// Proof of acceptance for one submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub signature: String,
}

/// The operations this client consumes from the ledger.
///
/// Reads are side-effect free and safe to repeat; a submission has no side
/// effects until the remote call is actually issued.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Raw account bytes at `address`, or `None` if absent.
    async fn get_account(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Signs and submits one transaction built from `instructions`,
    /// resolving once the ledger has accepted it.
    async fn submit_transaction(
        &self,
        instructions: &[Instruction],
    ) -> Result<TxReceipt, LedgerError>;

    /// All accounts owned by `program`, with their raw bytes. Used for
    /// discriminator-prefix enumeration of domain records.
    async fn program_accounts(
        &self,
        program: &Pubkey,
    ) -> Result<Vec<(Pubkey, Vec<u8>)>, LedgerError>;
}
