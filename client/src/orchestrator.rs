//! The computation orchestrator: one state machine per logical record.
//!
//! Drives a survey, poll or post through
//! `Uninitialized → StatsInitializing → StatsReady → ResponseAccepted(n)
//! → Revealing → Revealed`, issuing ledger transactions that request
//! off-chain computation. Single-threaded cooperative per record; multiple
//! records are driven by independent instances. Cross-client ordering is
//! delegated entirely to the ledger's atomic account updates.

use std::fmt;
use std::sync::Arc;

use anchor_lang::prelude::Pubkey;
use anchor_lang::solana_program::instruction::Instruction;
use tracing::{debug, info, warn};

use crate::bootstrap::Bootstrapper;
use crate::config::ClientConfig;
use crate::derive;
use crate::encode::{
    self, Cipher, RecordMetadata, ResponseValue, CONTENT_WIDTH,
};
use crate::error::Error;
use crate::ident;
use crate::instructions;
use crate::kind::{ComputationKind, Domain, Operation};
use crate::ledger::{Ledger, LedgerError, TxReceipt};
use crate::poll::poll_until;
use crate::reader::{AggregateOutcome, ReadOutcome, ResultReader};
use crate::storage::ContentStore;

/// Lifecycle position of one record, as seen by this client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriveState {
    Uninitialized,
    StatsInitializing,
    StatsReady,
    ResponseSubmitting(u32),
    ResponseAccepted(u32),
    Revealing,
    Revealed,
    Aborted(String),
}

impl DriveState {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            DriveState::Uninitialized => "uninitialized",
            DriveState::StatsInitializing => "initializing stats",
            DriveState::StatsReady => "stats ready",
            DriveState::ResponseSubmitting(_) => "submitting a response",
            DriveState::ResponseAccepted(_) => "accepting responses",
            DriveState::Revealing => "revealing",
            DriveState::Revealed => "revealed",
            DriveState::Aborted(_) => "aborted",
        }
    }
}

impl fmt::Display for DriveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Drives one record through its lifecycle.
pub struct Orchestrator<L> {
    config: ClientConfig,
    ledger: Arc<L>,
    bootstrap: Arc<Bootstrapper<L>>,
    cipher: Arc<dyn Cipher>,
    content_store: Option<Arc<dyn ContentStore>>,
    reader: ResultReader<L>,
    domain: Domain,
    record_id: u64,
    state: DriveState,
}

impl<L: Ledger> Orchestrator<L> {
    pub fn new(
        config: ClientConfig,
        ledger: Arc<L>,
        bootstrap: Arc<Bootstrapper<L>>,
        cipher: Arc<dyn Cipher>,
        domain: Domain,
        record_id: u64,
    ) -> Self {
        let reader = ResultReader::new(config.clone(), ledger.clone());
        Self {
            config,
            ledger,
            bootstrap,
            cipher,
            content_store: None,
            reader,
            domain,
            record_id,
            state: DriveState::Uninitialized,
        }
    }

    /// Attaches a blob store for content that exceeds its on-ledger slot.
    pub fn with_content_store(mut self, store: Arc<dyn ContentStore>) -> Self {
        self.content_store = Some(store);
        self
    }

    pub fn state(&self) -> &DriveState {
        &self.state
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn record_id(&self) -> u64 {
        self.record_id
    }

    /// Derived address of the record this orchestrator drives.
    pub fn record_address(&self) -> Result<Pubkey, Error> {
        derive::record_address(&self.config, self.domain, self.record_id)
    }

    fn expect(&self, operation: &'static str, allowed: bool) -> Result<(), Error> {
        if allowed {
            Ok(())
        } else {
            Err(Error::InvalidState {
                operation,
                state: self.state.name(),
            })
        }
    }

    fn abort(&mut self, err: &Error) {
        self.state = DriveState::Aborted(err.to_string());
    }

    /// Creates the record and requests its stats-init computation.
    ///
    /// Advances to `StatsReady` once the ledger accepts the transaction.
    /// The cluster's own write-back is itself a ledger transaction that
    /// later reads will observe; there is nothing to wait for here.
    pub async fn initialize(&mut self, metadata: RecordMetadata) -> Result<TxReceipt, Error> {
        self.expect(
            "initialize",
            matches!(self.state, DriveState::Uninitialized),
        )?;

        // Validation happens before any ledger call.
        let content = self.resolve_content(&metadata).await?;
        let nonce = ident::fresh_nonce();
        let encoded =
            encode::encode_metadata(self.domain, &metadata, &content, &*self.cipher, nonce)?;

        self.bootstrap
            .ensure(ComputationKind::new(Operation::InitStats, self.domain))
            .await?;

        self.state = DriveState::StatsInitializing;
        let result = self
            .submit_queue_op(|offset| {
                instructions::create_record(
                    &self.config,
                    self.domain,
                    self.record_id,
                    offset,
                    &encoded,
                    nonce,
                )
            })
            .await;

        match result {
            Ok(receipt) => {
                info!(
                    domain = ?self.domain,
                    record_id = self.record_id,
                    signature = %receipt.signature,
                    "record initialized"
                );
                self.state = DriveState::StatsReady;
                Ok(receipt)
            }
            Err(err) => {
                self.abort(&err);
                Err(err)
            }
        }
    }

    /// Encrypts and submits one response.
    ///
    /// Out-of-range values are rejected locally, before any network call.
    /// The local response counter advances on ledger acceptance. A failed
    /// submission leaves the record untouched, so the state rolls back and
    /// the caller owns any further retry policy.
    pub async fn submit_response(&mut self, value: ResponseValue) -> Result<TxReceipt, Error> {
        let accepted = match self.state {
            DriveState::StatsReady => 0,
            DriveState::ResponseAccepted(accepted) => accepted,
            _ => {
                return Err(Error::InvalidState {
                    operation: "submit a response",
                    state: self.state.name(),
                })
            }
        };

        let payload = encode::encode_response(self.domain, value, &*self.cipher)?;

        self.bootstrap
            .ensure(ComputationKind::new(Operation::SubmitResponse, self.domain))
            .await?;

        self.state = DriveState::ResponseSubmitting(accepted);
        let result = self
            .submit_queue_op(|offset| {
                instructions::submit_response(
                    &self.config,
                    self.domain,
                    self.record_id,
                    offset,
                    &payload,
                )
            })
            .await;

        match result {
            Ok(receipt) => {
                debug!(
                    domain = ?self.domain,
                    record_id = self.record_id,
                    accepted = accepted + 1,
                    signature = %receipt.signature,
                    "response accepted"
                );
                self.state = DriveState::ResponseAccepted(accepted + 1);
                Ok(receipt)
            }
            Err(err) => {
                self.state = if accepted == 0 {
                    DriveState::StatsReady
                } else {
                    DriveState::ResponseAccepted(accepted)
                };
                Err(err)
            }
        }
    }

    /// Requests aggregate publication and waits for it to land.
    ///
    /// Requires at least one accepted response; fails fast otherwise with
    /// no network call. On [`Error::FinalizationTimeout`] the state stays
    /// `Revealing` and [`Self::wait_for_aggregates`] may be called again.
    pub async fn reveal(&mut self) -> Result<AggregateOutcome, Error> {
        self.expect(
            "reveal",
            matches!(self.state, DriveState::ResponseAccepted(accepted) if accepted > 0),
        )?;

        self.bootstrap
            .ensure(ComputationKind::new(Operation::Reveal, self.domain))
            .await?;

        self.state = DriveState::Revealing;
        let result = self
            .submit_queue_op(|offset| {
                instructions::reveal(&self.config, self.domain, self.record_id, offset)
            })
            .await;

        match result {
            Ok(receipt) => {
                debug!(
                    domain = ?self.domain,
                    record_id = self.record_id,
                    signature = %receipt.signature,
                    "reveal requested"
                );
                self.wait_for_aggregates().await
            }
            Err(err) => {
                self.abort(&err);
                Err(err)
            }
        }
    }

    /// Polls the record until its aggregates are observable.
    ///
    /// The completion predicate is the record's reveal flag, written
    /// on-ledger by the cluster's callback transaction. Valid from
    /// `Revealing`, including after an earlier timeout.
    pub async fn wait_for_aggregates(&mut self) -> Result<AggregateOutcome, Error> {
        self.expect(
            "wait for aggregates",
            matches!(self.state, DriveState::Revealing),
        )?;

        let reader = &self.reader;
        let domain = self.domain;
        let record_id = self.record_id;
        let outcome = poll_until(
            self.config.poll_interval,
            self.config.finalization_timeout,
            move || async move {
                match reader.read(domain, record_id).await? {
                    ReadOutcome::Revealed(outcome) => Ok(Some(outcome)),
                    ReadOutcome::Pending { .. } => Ok(None),
                    ReadOutcome::NotFound => Err(Error::NotFound { id: record_id }),
                }
            },
        )
        .await?;

        info!(
            domain = ?self.domain,
            record_id = self.record_id,
            "aggregates revealed"
        );
        self.state = DriveState::Revealed;
        Ok(outcome)
    }

    /// Submits a queue-computation transaction with a fresh offset,
    /// retrying exactly once on an address collision.
    ///
    /// The single retry is deliberate: regenerating the offset masks a
    /// random collision, while anything repeating past that points at a
    /// systemic problem the caller must see.
    async fn submit_queue_op<F>(&self, build: F) -> Result<TxReceipt, Error>
    where
        F: Fn(u64) -> Result<Instruction, Error>,
    {
        let instruction = build(ident::fresh_offset())?;
        match self.ledger.submit_transaction(&[instruction]).await {
            Ok(receipt) => Ok(receipt),
            Err(LedgerError::AccountInUse) => {
                warn!(
                    domain = ?self.domain,
                    record_id = self.record_id,
                    "derived address in use, retrying with a fresh offset"
                );
                let instruction = build(ident::fresh_offset())?;
                match self.ledger.submit_transaction(&[instruction]).await {
                    Ok(receipt) => Ok(receipt),
                    Err(LedgerError::AccountInUse) => Err(Error::AddressCollision),
                    Err(err) => Err(Error::TransactionRejected(err)),
                }
            }
            Err(err) => Err(Error::TransactionRejected(err)),
        }
    }

    /// Resolves the content bytes to frame, spilling oversized content to
    /// the blob store when one is attached.
    async fn resolve_content(&self, metadata: &RecordMetadata) -> Result<Vec<u8>, Error> {
        match metadata {
            RecordMetadata::Titled { content, .. } => {
                if content.len() > CONTENT_WIDTH {
                    if let Some(store) = &self.content_store {
                        let id = store.upload(content.as_bytes()).await?;
                        debug!(
                            record_id = self.record_id,
                            size = content.len(),
                            "content spilled to blob store"
                        );
                        return Ok(id.0.to_vec());
                    }
                }
                Ok(content.as_bytes().to_vec())
            }
            RecordMetadata::Question(_) => Ok(Vec::new()),
        }
    }
}
