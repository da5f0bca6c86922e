//! Computation-definition bootstrap.
//!
//! Each of the nine computation kinds needs its definition record created
//! exactly once per program deployment. Multiple independent clients may
//! race to do so; only one creation lands, and the rest must read "already
//! exists" as success. That idempotency rule is the heart of this module.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::derive;
use crate::error::Error;
use crate::instructions;
use crate::kind::ComputationKind;
use crate::ledger::{Ledger, LedgerError};
use crate::poll::poll_until;

/// Per-kind bootstrap progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    NotRequested,
    RequestSent,
    Confirmed,
}

/// Ensures computation definitions exist before they are requested.
pub struct Bootstrapper<L> {
    config: ClientConfig,
    ledger: Arc<L>,
    states: Mutex<HashMap<ComputationKind, BootstrapState>>,
}

impl<L: Ledger> Bootstrapper<L> {
    pub fn new(config: ClientConfig, ledger: Arc<L>) -> Self {
        Self {
            config,
            ledger,
            states: Mutex::new(HashMap::new()),
        }
    }

    /// Local view of `kind`'s bootstrap progress.
    pub fn state(&self, kind: ComputationKind) -> BootstrapState {
        self.states
            .lock()
            .map(|states| {
                states
                    .get(&kind)
                    .copied()
                    .unwrap_or(BootstrapState::NotRequested)
            })
            .unwrap_or(BootstrapState::NotRequested)
    }

    fn set_state(&self, kind: ComputationKind, state: BootstrapState) {
        if let Ok(mut states) = self.states.lock() {
            states.insert(kind, state);
        }
    }

    /// Makes sure `kind`'s definition record exists, creating it if needed.
    ///
    /// Idempotent: a record that already exists — whether from an earlier
    /// call, another client, or a lost creation race — confirms silently.
    /// Any other failure surfaces as [`Error::BootstrapFailed`] and is not
    /// retried here; the caller decides.
    pub async fn ensure(&self, kind: ComputationKind) -> Result<(), Error> {
        if self.state(kind) == BootstrapState::Confirmed {
            return Ok(());
        }

        let address = derive::comp_def_address(&self.config, kind)?;

        let existing = self
            .ledger
            .get_account(&address)
            .await
            .map_err(|source| Error::BootstrapFailed { kind, source })?;
        if existing.is_some() {
            debug!(kind = %kind, %address, "computation definition already on ledger");
            self.set_state(kind, BootstrapState::Confirmed);
            return Ok(());
        }

        let instruction = instructions::comp_def_init(&self.config, kind)?;
        self.set_state(kind, BootstrapState::RequestSent);

        match self.ledger.submit_transaction(&[instruction]).await {
            Ok(receipt) => {
                info!(kind = %kind, signature = %receipt.signature, "computation definition created");
            }
            Err(LedgerError::AccountInUse) => {
                // Lost the race to a concurrent bootstrapper; same outcome.
                debug!(kind = %kind, "definition created concurrently, treating as confirmed");
                self.set_state(kind, BootstrapState::Confirmed);
                return Ok(());
            }
            Err(source) => {
                self.set_state(kind, BootstrapState::NotRequested);
                return Err(Error::BootstrapFailed { kind, source });
            }
        }

        // Wait for the definition to become observable before anything
        // queues a computation against it. Recoverable on timeout: the
        // next ensure() re-reads the ledger.
        let ledger = &self.ledger;
        poll_until(
            self.config.poll_interval,
            self.config.finalization_timeout,
            move || async move {
                let present = ledger
                    .get_account(&address)
                    .await
                    .map_err(|source| Error::BootstrapFailed { kind, source })?
                    .is_some();
                Ok(present.then_some(()))
            },
        )
        .await?;

        self.set_state(kind, BootstrapState::Confirmed);
        Ok(())
    }

    /// Walks every computation kind once, in declaration order.
    pub async fn ensure_all(&self) -> Result<(), Error> {
        for kind in ComputationKind::ALL {
            self.ensure(kind).await?;
        }
        Ok(())
    }
}
