//! Deterministic address derivation.
//!
//! Every on-ledger address the protocol touches is a pure function of
//! (program identity, seed prefix, numeric or byte seed); nothing here is
//! ever looked up or hand-copied. The derivation primitive is the ledger's
//! standard program-derived-address scheme.

use anchor_lang::prelude::Pubkey;
use solana_sha256_hasher::hash;

use crate::config::ClientConfig;
use crate::error::Error;
use crate::kind::{ComputationKind, Domain};

const COMP_DEF_SEED: &[u8] = b"ComputationDefinitionAccount";
const COMPUTATION_SEED: &[u8] = b"ComputationAccount";
const MXE_SEED: &[u8] = b"MXEAccount";
const MEMPOOL_SEED: &[u8] = b"Mempool";
const EXEC_POOL_SEED: &[u8] = b"ExecutingPool";
const CLUSTER_SEED: &[u8] = b"Cluster";
const SIGN_SEED: &[u8] = b"SignerAccount";

fn find(seeds: &[&[u8]], program: &Pubkey) -> Result<Pubkey, Error> {
    Pubkey::try_find_program_address(seeds, program)
        .map(|(address, _bump)| address)
        .ok_or(Error::DerivationExhausted { program: *program })
}

/// Stable 4-byte offset of a computation definition, derived from the
/// circuit name.
pub fn comp_def_offset(circuit_name: &str) -> u32 {
    let digest = hash(circuit_name.as_bytes()).to_bytes();
    u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Address of the computation-definition record for `kind`.
pub fn comp_def_address(config: &ClientConfig, kind: ComputationKind) -> Result<Pubkey, Error> {
    let offset = comp_def_offset(kind.circuit_name()).to_le_bytes();
    find(
        &[COMP_DEF_SEED, config.program.as_ref(), &offset],
        &config.arcium_program,
    )
}

/// Address of the transient computation account for one request, keyed by
/// the request's random 64-bit offset.
pub fn computation_address(config: &ClientConfig, offset: u64) -> Result<Pubkey, Error> {
    let offset = offset.to_le_bytes();
    find(
        &[COMPUTATION_SEED, config.program.as_ref(), &offset],
        &config.arcium_program,
    )
}

/// Address of the program's MXE account.
pub fn mxe_address(config: &ClientConfig) -> Result<Pubkey, Error> {
    find(&[MXE_SEED, config.program.as_ref()], &config.arcium_program)
}

/// Address of the program's computation mempool.
pub fn mempool_address(config: &ClientConfig) -> Result<Pubkey, Error> {
    find(
        &[MEMPOOL_SEED, config.program.as_ref()],
        &config.arcium_program,
    )
}

/// Address of the program's executing pool.
pub fn executing_pool_address(config: &ClientConfig) -> Result<Pubkey, Error> {
    find(
        &[EXEC_POOL_SEED, config.program.as_ref()],
        &config.arcium_program,
    )
}

/// Address of the configured MPC cluster.
pub fn cluster_address(config: &ClientConfig) -> Result<Pubkey, Error> {
    let offset = config.cluster_offset.to_le_bytes();
    find(&[CLUSTER_SEED, &offset], &config.arcium_program)
}

/// Address of the program's callback signer PDA.
pub fn sign_address(config: &ClientConfig) -> Result<Pubkey, Error> {
    find(&[SIGN_SEED], &config.program)
}

/// Address of a domain record, keyed by the caller-chosen identifier.
pub fn record_address(config: &ClientConfig, domain: Domain, id: u64) -> Result<Pubkey, Error> {
    let id = id.to_le_bytes();
    find(&[domain.record_seed(), &id], &config.program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::Operation;
    use crate::testing::test_config;

    #[test]
    fn derivation_is_deterministic() {
        let config = test_config();
        let kind = ComputationKind::new(Operation::SubmitResponse, Domain::Opinion);
        assert_eq!(
            comp_def_address(&config, kind).unwrap(),
            comp_def_address(&config, kind).unwrap()
        );
        assert_eq!(
            record_address(&config, Domain::Opinion, 7).unwrap(),
            record_address(&config, Domain::Opinion, 7).unwrap()
        );
    }

    #[test]
    fn different_seeds_give_different_addresses() {
        let config = test_config();
        assert_ne!(
            record_address(&config, Domain::Opinion, 1).unwrap(),
            record_address(&config, Domain::Opinion, 2).unwrap()
        );
        assert_ne!(
            record_address(&config, Domain::Opinion, 1).unwrap(),
            record_address(&config, Domain::Vote, 1).unwrap()
        );
        assert_ne!(
            computation_address(&config, 10).unwrap(),
            computation_address(&config, 11).unwrap()
        );
    }

    #[test]
    fn comp_def_offsets_are_distinct_across_kinds() {
        let mut offsets: Vec<u32> = ComputationKind::ALL
            .iter()
            .map(|k| comp_def_offset(k.circuit_name()))
            .collect();
        offsets.sort_unstable();
        offsets.dedup();
        assert_eq!(offsets.len(), 9);
    }
}
