//! Error taxonomy of the orchestration protocol.
//!
//! Validation failures never reach the network layer; idempotency
//! conditions are absorbed locally; everything else carries enough
//! structure for the caller to decide on retry.

use anchor_lang::prelude::Pubkey;
use thiserror::Error;

use crate::kind::ComputationKind;
use crate::ledger::LedgerError;

/// A value rejected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("rating {0} outside declared range 1..=5")]
    RatingOutOfRange(u8),
    #[error("{field} is {len} bytes, exceeds its {max}-byte slot")]
    TextTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
    #[error("value kind does not match domain {domain:?}")]
    ValueMismatch { domain: crate::kind::Domain },
    #[error("metadata shape does not match domain {domain:?}")]
    MetadataMismatch { domain: crate::kind::Domain },
}

#[derive(Debug, Error)]
pub enum Error {
    /// Local validation failure; no transaction was issued.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The state machine does not permit this operation right now.
    /// Fails fast, without a network call.
    #[error("cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    /// The derived computation address was still in use after the single
    /// offset-regeneration retry.
    #[error("derived computation address already in use after retry")]
    AddressCollision,

    /// Computation-definition bootstrap failed for a reason other than
    /// "already exists". Not retried automatically; the caller decides.
    #[error("bootstrap of {kind} failed: {source}")]
    BootstrapFailed {
        kind: ComputationKind,
        #[source]
        source: LedgerError,
    },

    /// Finalization polling exhausted its wall-clock window. Recoverable:
    /// the computation may still complete, so the caller may re-poll.
    #[error("computation not finalized within {waited_ms} ms")]
    FinalizationTimeout { waited_ms: u64 },

    /// The ledger rejected a transaction; the classification is surfaced
    /// verbatim.
    #[error("transaction rejected: {0}")]
    TransactionRejected(#[source] LedgerError),

    /// A read against the ledger failed.
    #[error("ledger read failed: {0}")]
    Ledger(#[from] LedgerError),

    /// Deterministic address derivation found no valid address. Extremely
    /// rare; surfaced, never retried.
    #[error("address derivation exhausted under program {program}")]
    DerivationExhausted { program: Pubkey },

    /// The record queried by id does not exist on the ledger.
    #[error("record {id} not found")]
    NotFound { id: u64 },

    /// Account bytes did not parse as the expected record layout.
    #[error("malformed record at {address}: {detail}")]
    MalformedRecord { address: Pubkey, detail: String },

    /// Content storage failure while spilling an oversized payload.
    #[error("content storage failed: {0}")]
    Storage(#[from] crate::storage::StorageError),
}
