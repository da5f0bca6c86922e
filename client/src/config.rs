//! Immutable client configuration.
//!
//! Everything the orchestration layer needs to know about its environment
//! is passed in here at construction; there are no process-wide singletons.

use std::time::Duration;

use anchor_lang::prelude::Pubkey;

/// Cluster offset of the global Arcium devnet cluster.
pub const DEVNET_CLUSTER_OFFSET: u32 = 1_078_779_259;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
const DEFAULT_FINALIZATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Environment description shared by every component of the client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// The opinion program's identity; namespaces all domain records.
    pub program: Pubkey,
    /// The Arcium program that owns computation and definition accounts.
    pub arcium_program: Pubkey,
    /// Fee payer and transaction signer held by the ledger handle.
    pub payer: Pubkey,
    /// Arcium fee pool account.
    pub fee_pool: Pubkey,
    /// Arcium clock account.
    pub clock_account: Pubkey,
    /// Offset selecting the MPC cluster to compute on.
    pub cluster_offset: u32,
    /// Interval between finalization probes.
    pub poll_interval: Duration,
    /// Wall-clock bound on finalization polling. Hitting it is recoverable;
    /// the underlying computation may still complete out-of-band.
    pub finalization_timeout: Duration,
}

impl ClientConfig {
    pub fn new(
        program: Pubkey,
        arcium_program: Pubkey,
        payer: Pubkey,
        fee_pool: Pubkey,
        clock_account: Pubkey,
    ) -> Self {
        Self {
            program,
            arcium_program,
            payer,
            fee_pool,
            clock_account,
            cluster_offset: DEVNET_CLUSTER_OFFSET,
            poll_interval: DEFAULT_POLL_INTERVAL,
            finalization_timeout: DEFAULT_FINALIZATION_TIMEOUT,
        }
    }

    pub fn with_cluster_offset(mut self, offset: u32) -> Self {
        self.cluster_offset = offset;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_finalization_timeout(mut self, timeout: Duration) -> Self {
        self.finalization_timeout = timeout;
        self
    }
}
