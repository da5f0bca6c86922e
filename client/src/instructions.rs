//! Instruction construction.
//!
//! Wire format per instruction: an 8-byte opcode discriminator followed by
//! little-endian fixed-width argument encodings. Discriminators are
//! computed from the instruction name, never hand-copied. Each operation
//! enumerates exactly the external references it needs, typed by role.

use anchor_lang::prelude::Pubkey;
use solana_sha256_hasher::hash;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::system_program;

use crate::config::ClientConfig;
use crate::derive;
use crate::encode::{EncodedMetadata, EncryptedPayload};
use crate::error::Error;
use crate::kind::{ComputationKind, Domain, Operation};

/// 8-byte opcode discriminator of a program instruction.
pub fn instruction_discriminator(name: &str) -> [u8; 8] {
    let digest = hash(format!("global:{name}").as_bytes()).to_bytes();
    let mut disc = [0u8; 8];
    disc.copy_from_slice(&digest[..8]);
    disc
}

/// 8-byte discriminator of an on-ledger account type.
pub fn account_discriminator(name: &str) -> [u8; 8] {
    let digest = hash(format!("account:{name}").as_bytes()).to_bytes();
    let mut disc = [0u8; 8];
    disc.copy_from_slice(&digest[..8]);
    disc
}

/// The external references of one computation request, each typed by role.
#[derive(Debug, Clone)]
pub struct OperationAccounts {
    pub payer: Pubkey,
    pub sign_pda: Pubkey,
    pub mxe: Pubkey,
    pub mempool: Pubkey,
    pub executing_pool: Pubkey,
    pub computation: Pubkey,
    pub comp_def: Pubkey,
    pub cluster: Pubkey,
    pub fee_pool: Pubkey,
    pub clock: Pubkey,
    pub record: Pubkey,
}

impl OperationAccounts {
    /// Derives the full account set for one request against `kind`'s
    /// computation definition.
    pub fn resolve(
        config: &ClientConfig,
        kind: ComputationKind,
        record_id: u64,
        computation_offset: u64,
    ) -> Result<Self, Error> {
        Ok(Self {
            payer: config.payer,
            sign_pda: derive::sign_address(config)?,
            mxe: derive::mxe_address(config)?,
            mempool: derive::mempool_address(config)?,
            executing_pool: derive::executing_pool_address(config)?,
            computation: derive::computation_address(config, computation_offset)?,
            comp_def: derive::comp_def_address(config, kind)?,
            cluster: derive::cluster_address(config)?,
            fee_pool: config.fee_pool,
            clock: config.clock_account,
            record: derive::record_address(config, kind.domain, record_id)?,
        })
    }

    /// Account metas in the order the program's accounts struct declares.
    fn metas(&self, config: &ClientConfig) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.payer, true),
            AccountMeta::new(self.sign_pda, false),
            AccountMeta::new_readonly(self.mxe, false),
            AccountMeta::new(self.mempool, false),
            AccountMeta::new(self.executing_pool, false),
            AccountMeta::new(self.computation, false),
            AccountMeta::new_readonly(self.comp_def, false),
            AccountMeta::new(self.cluster, false),
            AccountMeta::new(self.fee_pool, false),
            AccountMeta::new_readonly(self.clock, false),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new_readonly(config.arcium_program, false),
            AccountMeta::new(self.record, false),
        ]
    }
}

/// Builds the one-off instruction registering `kind`'s computation
/// definition.
pub fn comp_def_init(config: &ClientConfig, kind: ComputationKind) -> Result<Instruction, Error> {
    let accounts = vec![
        AccountMeta::new(config.payer, true),
        AccountMeta::new(derive::mxe_address(config)?, false),
        AccountMeta::new(derive::comp_def_address(config, kind)?, false),
        AccountMeta::new_readonly(config.arcium_program, false),
        AccountMeta::new_readonly(system_program::ID, false),
    ];
    Ok(Instruction {
        program_id: config.program,
        accounts,
        data: instruction_discriminator(kind.comp_def_instruction_name()).to_vec(),
    })
}

/// Builds the create instruction for a new record plus its stats-init
/// computation request.
pub(crate) fn create_record(
    config: &ClientConfig,
    domain: Domain,
    record_id: u64,
    computation_offset: u64,
    metadata: &EncodedMetadata,
    nonce: u128,
) -> Result<Instruction, Error> {
    let kind = ComputationKind::new(Operation::InitStats, domain);
    let accounts = OperationAccounts::resolve(config, kind, record_id, computation_offset)?;

    let mut data = Vec::with_capacity(240);
    data.extend_from_slice(&instruction_discriminator(kind.instruction_name()));
    data.extend_from_slice(&computation_offset.to_le_bytes());
    data.extend_from_slice(&record_id.to_le_bytes());
    match metadata {
        EncodedMetadata::Titled {
            title,
            content,
            topic,
        } => {
            data.extend_from_slice(title);
            data.extend_from_slice(content);
            data.extend_from_slice(topic);
        }
        EncodedMetadata::Question(question) => {
            data.extend_from_slice(question);
        }
    }
    data.extend_from_slice(&nonce.to_le_bytes());

    Ok(Instruction {
        program_id: config.program,
        accounts: accounts.metas(config),
        data,
    })
}

/// Builds the submit instruction carrying one encrypted response.
pub fn submit_response(
    config: &ClientConfig,
    domain: Domain,
    record_id: u64,
    computation_offset: u64,
    payload: &EncryptedPayload,
) -> Result<Instruction, Error> {
    let kind = ComputationKind::new(Operation::SubmitResponse, domain);
    let accounts = OperationAccounts::resolve(config, kind, record_id, computation_offset)?;

    let mut data = Vec::with_capacity(104);
    data.extend_from_slice(&instruction_discriminator(kind.instruction_name()));
    data.extend_from_slice(&computation_offset.to_le_bytes());
    data.extend_from_slice(&record_id.to_le_bytes());
    data.extend_from_slice(&payload.ciphertext);
    data.extend_from_slice(&payload.public_key);
    data.extend_from_slice(&payload.nonce.to_le_bytes());

    Ok(Instruction {
        program_id: config.program,
        accounts: accounts.metas(config),
        data,
    })
}

/// Builds the reveal instruction requesting aggregate publication.
pub fn reveal(
    config: &ClientConfig,
    domain: Domain,
    record_id: u64,
    computation_offset: u64,
) -> Result<Instruction, Error> {
    let kind = ComputationKind::new(Operation::Reveal, domain);
    let accounts = OperationAccounts::resolve(config, kind, record_id, computation_offset)?;

    let mut data = Vec::with_capacity(24);
    data.extend_from_slice(&instruction_discriminator(kind.instruction_name()));
    data.extend_from_slice(&computation_offset.to_le_bytes());
    data.extend_from_slice(&record_id.to_le_bytes());

    Ok(Instruction {
        program_id: config.program,
        accounts: accounts.metas(config),
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminators_are_stable_and_distinct() {
        assert_eq!(
            instruction_discriminator("submit_rating"),
            instruction_discriminator("submit_rating")
        );
        assert_ne!(
            instruction_discriminator("submit_rating"),
            instruction_discriminator("cast_ballot")
        );
        assert_ne!(
            instruction_discriminator("submit_rating"),
            account_discriminator("submit_rating")
        );
    }
}
