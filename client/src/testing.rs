//! In-memory test doubles: a ledger with an emulated cluster write-back, a
//! reversible cipher, and a blob store.
//!
//! `MockLedger` understands the program's instruction set well enough to
//! maintain the same record layouts the real program writes, including the
//! response counters and the reveal write-back. Reveal finalization is
//! deferred for a configurable number of reads so the polling path gets
//! exercised; offset collisions are injected rather than organic.

use std::collections::HashMap;
use std::sync::Mutex;

use anchor_lang::prelude::Pubkey;
use solana_sha256_hasher::hash;
use anchor_lang::solana_program::instruction::Instruction;
use async_trait::async_trait;

use crate::config::ClientConfig;
use crate::derive;
use crate::encode::Cipher;
use crate::error::Error;
use crate::instructions::{account_discriminator, instruction_discriminator};
use crate::kind::{ComputationKind, Domain, Operation};
use crate::ledger::{Ledger, LedgerError, TxReceipt};
use crate::reader;
use crate::storage::{ContentId, ContentStore, StorageError};

/// Deterministic configuration for tests; short polling windows.
pub fn test_config() -> ClientConfig {
    use std::time::Duration;
    ClientConfig::new(
        Pubkey::new_from_array([3u8; 32]),
        Pubkey::new_from_array([4u8; 32]),
        Pubkey::new_from_array([5u8; 32]),
        Pubkey::new_from_array([6u8; 32]),
        Pubkey::new_from_array([7u8; 32]),
    )
    .with_poll_interval(Duration::from_millis(5))
    .with_finalization_timeout(Duration::from_millis(250))
}

/// Reversible keystream cipher. Test-only: real deployments implement
/// [`Cipher`] with the cluster's published scheme.
pub struct TestCipher {
    key: [u8; 32],
}

impl TestCipher {
    pub fn new(key: [u8; 32]) -> Self {
        Self { key }
    }

    fn keystream_block(key: &[u8; 32], nonce: u128, index: u32) -> [u8; 32] {
        let mut input = Vec::with_capacity(52);
        input.extend_from_slice(key);
        input.extend_from_slice(&nonce.to_le_bytes());
        input.extend_from_slice(&index.to_le_bytes());
        hash(&input).to_bytes()
    }
}

impl Cipher for TestCipher {
    fn public_key(&self) -> [u8; 32] {
        self.key
    }

    fn seal_word(&self, plaintext: u64, nonce: u128) -> [u8; 32] {
        let mut out = [0u8; 32];
        out[..8].copy_from_slice(&plaintext.to_le_bytes());
        let keystream = Self::keystream_block(&self.key, nonce, 0);
        for (byte, key_byte) in out.iter_mut().zip(keystream) {
            *byte ^= key_byte;
        }
        out
    }

    fn seal_slot(&self, nonce: u128, slot: &mut [u8]) {
        for (index, chunk) in slot.chunks_mut(32).enumerate() {
            let keystream = Self::keystream_block(&self.key, nonce, 1 + index as u32);
            for (byte, key_byte) in chunk.iter_mut().zip(keystream) {
                *byte ^= key_byte;
            }
        }
    }
}

/// Inverts [`TestCipher::seal_word`]; this is what the emulated cluster
/// uses to aggregate.
pub fn unseal_word(key: &[u8; 32], nonce: u128, ciphertext: &[u8; 32]) -> u64 {
    let keystream = TestCipher::keystream_block(key, nonce, 0);
    let mut bytes = [0u8; 8];
    for (i, byte) in bytes.iter_mut().enumerate() {
        *byte = ciphertext[i] ^ keystream[i];
    }
    u64::from_le_bytes(bytes)
}

enum HiddenAggregate {
    Ratings { sum: u32, buckets: [u32; 5] },
    Ballots { yes: u32, no: u32 },
}

struct MockState {
    /// address -> (owning program, raw bytes)
    accounts: HashMap<Pubkey, (Pubkey, Vec<u8>)>,
    /// The cluster's private view of each record's aggregates.
    hidden: HashMap<Pubkey, HiddenAggregate>,
    /// Records whose reveal lands after N more reads.
    pending_reveals: HashMap<Pubkey, u32>,
    transactions: u64,
    comp_def_creations: u64,
    forced_collisions: u32,
    finalize_after_reads: u32,
    never_finalize: bool,
    clock: i64,
}

/// In-memory ledger plus emulated MPC cluster.
pub struct MockLedger {
    config: ClientConfig,
    cipher_key: [u8; 32],
    state: Mutex<MockState>,
}

impl MockLedger {
    pub fn new(config: ClientConfig, cipher_key: [u8; 32]) -> Self {
        Self {
            config,
            cipher_key,
            state: Mutex::new(MockState {
                accounts: HashMap::new(),
                hidden: HashMap::new(),
                pending_reveals: HashMap::new(),
                transactions: 0,
                comp_def_creations: 0,
                forced_collisions: 0,
                finalize_after_reads: 2,
                never_finalize: false,
                clock: 1_700_000_000,
            }),
        }
    }

    /// A cipher sharing this ledger's cluster key.
    pub fn cluster_cipher(&self) -> TestCipher {
        TestCipher::new(self.cipher_key)
    }

    /// Total transactions submitted, including rejected ones.
    pub fn transactions_submitted(&self) -> u64 {
        self.state.lock().map(|state| state.transactions).unwrap_or(0)
    }

    /// How many computation-definition records were actually created.
    pub fn comp_def_creations(&self) -> u64 {
        self.state
            .lock()
            .map(|state| state.comp_def_creations)
            .unwrap_or(0)
    }

    /// Makes the next `count` submissions fail with `AccountInUse`.
    pub fn force_collisions(&self, count: u32) {
        if let Ok(mut state) = self.state.lock() {
            state.forced_collisions = count;
        }
    }

    /// Number of reads of a record before its reveal write-back lands.
    pub fn set_finalize_after_reads(&self, reads: u32) {
        if let Ok(mut state) = self.state.lock() {
            state.finalize_after_reads = reads;
        }
    }

    /// When set, reveal write-backs never land (until unset).
    pub fn set_never_finalize(&self, never: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.never_finalize = never;
        }
    }

    fn derived(result: Result<Pubkey, Error>) -> Result<Pubkey, LedgerError> {
        result.map_err(|err| LedgerError::Rejected {
            reason: err.to_string(),
        })
    }

    fn dispatch(&self, state: &mut MockState, instruction: &Instruction) -> Result<(), LedgerError> {
        if instruction.program_id != self.config.program {
            return Err(LedgerError::Rejected {
                reason: "unknown program".into(),
            });
        }
        let data = &instruction.data;
        if data.len() < 8 {
            return Err(LedgerError::Rejected {
                reason: "missing discriminator".into(),
            });
        }
        for kind in ComputationKind::ALL {
            if data[..8] == instruction_discriminator(kind.comp_def_instruction_name()) {
                return self.apply_comp_def_init(state, kind);
            }
            if data[..8] == instruction_discriminator(kind.instruction_name()) {
                return self.apply_queue_op(state, kind, data);
            }
        }
        Err(LedgerError::Rejected {
            reason: "unknown instruction".into(),
        })
    }

    fn apply_comp_def_init(
        &self,
        state: &mut MockState,
        kind: ComputationKind,
    ) -> Result<(), LedgerError> {
        let address = Self::derived(derive::comp_def_address(&self.config, kind))?;
        if state.accounts.contains_key(&address) {
            return Err(LedgerError::AccountInUse);
        }
        let mut bytes = account_discriminator("ComputationDefinitionAccount").to_vec();
        bytes.extend_from_slice(kind.circuit_name().as_bytes());
        state
            .accounts
            .insert(address, (self.config.arcium_program, bytes));
        state.comp_def_creations += 1;
        Ok(())
    }

    fn apply_queue_op(
        &self,
        state: &mut MockState,
        kind: ComputationKind,
        data: &[u8],
    ) -> Result<(), LedgerError> {
        if state.forced_collisions > 0 {
            state.forced_collisions -= 1;
            return Err(LedgerError::AccountInUse);
        }

        let comp_def = Self::derived(derive::comp_def_address(&self.config, kind))?;
        if !state.accounts.contains_key(&comp_def) {
            return Err(LedgerError::Rejected {
                reason: format!("computation definition {kind} not initialized"),
            });
        }

        let record_id = read_u64(data, 16)?;
        let record = Self::derived(derive::record_address(
            &self.config,
            kind.domain,
            record_id,
        ))?;

        match kind.operation {
            Operation::InitStats => self.apply_create(state, kind.domain, record, record_id, data),
            Operation::SubmitResponse => self.apply_submit(state, kind.domain, record, data),
            Operation::Reveal => self.apply_reveal_request(state, record),
        }
    }

    fn apply_create(
        &self,
        state: &mut MockState,
        domain: Domain,
        record: Pubkey,
        record_id: u64,
        data: &[u8],
    ) -> Result<(), LedgerError> {
        if state.accounts.contains_key(&record) {
            return Err(LedgerError::AccountInUse);
        }
        state.clock += 1;
        let created_at = state.clock;

        let bytes = match domain {
            Domain::Opinion | Domain::Feedback => {
                let mut bytes = vec![0u8; reader::TITLED_RECORD_LEN];
                bytes[..8].copy_from_slice(&account_discriminator(domain.account_name()));
                bytes[reader::TITLED_ID_OFFSET..reader::TITLED_ID_OFFSET + 8]
                    .copy_from_slice(&record_id.to_le_bytes());
                bytes[16..48].copy_from_slice(read_slice(data, 24, 32)?);
                bytes[48..176].copy_from_slice(read_slice(data, 56, 128)?);
                bytes[176..192].copy_from_slice(read_slice(data, 184, 16)?);
                bytes[reader::TITLED_OWNER_OFFSET..reader::TITLED_OWNER_OFFSET + 32]
                    .copy_from_slice(self.config.payer.as_ref());
                bytes[reader::TITLED_CREATED_OFFSET..reader::TITLED_CREATED_OFFSET + 8]
                    .copy_from_slice(&created_at.to_le_bytes());
                state
                    .hidden
                    .insert(record, HiddenAggregate::Ratings { sum: 0, buckets: [0; 5] });
                bytes
            }
            Domain::Vote => {
                let mut bytes = vec![0u8; reader::POLL_RECORD_LEN];
                bytes[..8].copy_from_slice(&account_discriminator(domain.account_name()));
                bytes[reader::POLL_ID_OFFSET..reader::POLL_ID_OFFSET + 8]
                    .copy_from_slice(&record_id.to_le_bytes());
                bytes[16..80].copy_from_slice(read_slice(data, 24, 64)?);
                bytes[reader::POLL_OWNER_OFFSET..reader::POLL_OWNER_OFFSET + 32]
                    .copy_from_slice(self.config.payer.as_ref());
                bytes[reader::POLL_CREATED_OFFSET..reader::POLL_CREATED_OFFSET + 8]
                    .copy_from_slice(&created_at.to_le_bytes());
                state
                    .hidden
                    .insert(record, HiddenAggregate::Ballots { yes: 0, no: 0 });
                bytes
            }
        };

        state.accounts.insert(record, (self.config.program, bytes));
        Ok(())
    }

    fn apply_submit(
        &self,
        state: &mut MockState,
        domain: Domain,
        record: Pubkey,
        data: &[u8],
    ) -> Result<(), LedgerError> {
        let ciphertext: [u8; 32] = read_array(data, 24)?;
        let nonce = read_u128(data, 88)?;
        let word = unseal_word(&self.cipher_key, nonce, &ciphertext);

        let (_, bytes) = state
            .accounts
            .get_mut(&record)
            .ok_or_else(|| LedgerError::Rejected {
                reason: "record not found".into(),
            })?;

        let (counter_offset, revealed_offset) = match domain {
            Domain::Opinion | Domain::Feedback => {
                (reader::TITLED_COUNTER_OFFSET, reader::TITLED_REVEALED_OFFSET)
            }
            Domain::Vote => (reader::POLL_COUNTER_OFFSET, reader::POLL_REVEALED_OFFSET),
        };
        if bytes[revealed_offset] != 0 {
            return Err(LedgerError::Rejected {
                reason: "already revealed".into(),
            });
        }

        match state.hidden.get_mut(&record) {
            Some(HiddenAggregate::Ratings { sum, buckets }) => {
                if !(1..=5).contains(&word) {
                    return Err(LedgerError::Rejected {
                        reason: format!("cluster rejected rating {word}"),
                    });
                }
                *sum += word as u32;
                buckets[(word - 1) as usize] += 1;
            }
            Some(HiddenAggregate::Ballots { yes, no }) => {
                if word > 1 {
                    return Err(LedgerError::Rejected {
                        reason: format!("cluster rejected ballot {word}"),
                    });
                }
                if word == 1 {
                    *yes += 1;
                } else {
                    *no += 1;
                }
            }
            None => {
                return Err(LedgerError::Rejected {
                    reason: "aggregate state missing".into(),
                })
            }
        }

        let counter = u32::from_le_bytes([
            bytes[counter_offset],
            bytes[counter_offset + 1],
            bytes[counter_offset + 2],
            bytes[counter_offset + 3],
        ]) + 1;
        bytes[counter_offset..counter_offset + 4].copy_from_slice(&counter.to_le_bytes());
        Ok(())
    }

    fn apply_reveal_request(
        &self,
        state: &mut MockState,
        record: Pubkey,
    ) -> Result<(), LedgerError> {
        if !state.accounts.contains_key(&record) {
            return Err(LedgerError::Rejected {
                reason: "record not found".into(),
            });
        }
        let after = state.finalize_after_reads;
        if after == 0 && !state.never_finalize {
            Self::apply_reveal_writeback(state, &record);
        } else {
            state.pending_reveals.insert(record, after);
        }
        Ok(())
    }

    fn apply_reveal_writeback(state: &mut MockState, record: &Pubkey) {
        let Some(aggregate) = state.hidden.get(record) else {
            return;
        };
        let Some((_, bytes)) = state.accounts.get_mut(record) else {
            return;
        };
        match aggregate {
            HiddenAggregate::Ratings { sum, buckets } => {
                let count: u32 = buckets.iter().sum();
                let average = (sum * 10) / count.max(1);
                bytes[reader::TITLED_COUNTER_OFFSET..reader::TITLED_COUNTER_OFFSET + 4]
                    .copy_from_slice(&count.to_le_bytes());
                bytes[reader::TITLED_AVERAGE_OFFSET..reader::TITLED_AVERAGE_OFFSET + 4]
                    .copy_from_slice(&average.to_le_bytes());
                for (i, bucket) in buckets.iter().enumerate() {
                    let offset = reader::TITLED_BUCKETS_OFFSET + i * 4;
                    bytes[offset..offset + 4].copy_from_slice(&bucket.to_le_bytes());
                }
                bytes[reader::TITLED_REVEALED_OFFSET] = 1;
            }
            HiddenAggregate::Ballots { yes, no } => {
                let total = yes + no;
                bytes[reader::POLL_COUNTER_OFFSET..reader::POLL_COUNTER_OFFSET + 4]
                    .copy_from_slice(&total.to_le_bytes());
                bytes[reader::POLL_YES_OFFSET..reader::POLL_YES_OFFSET + 4]
                    .copy_from_slice(&yes.to_le_bytes());
                bytes[reader::POLL_NO_OFFSET..reader::POLL_NO_OFFSET + 4]
                    .copy_from_slice(&no.to_le_bytes());
                bytes[reader::POLL_MAJORITY_OFFSET] = u8::from(yes > no);
                bytes[reader::POLL_REVEALED_OFFSET] = 1;
            }
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MockState>, LedgerError> {
        self.state
            .lock()
            .map_err(|_| LedgerError::Transport("mock state poisoned".into()))
    }
}

#[async_trait]
impl Ledger for MockLedger {
    async fn get_account(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, LedgerError> {
        let mut state = self.lock()?;
        if !state.never_finalize {
            if let Some(remaining) = state.pending_reveals.get(address).copied() {
                if remaining <= 1 {
                    state.pending_reveals.remove(address);
                    Self::apply_reveal_writeback(&mut state, address);
                } else {
                    state.pending_reveals.insert(*address, remaining - 1);
                }
            }
        }
        Ok(state.accounts.get(address).map(|(_, bytes)| bytes.clone()))
    }

    async fn submit_transaction(
        &self,
        instructions: &[Instruction],
    ) -> Result<TxReceipt, LedgerError> {
        let mut state = self.lock()?;
        state.transactions += 1;
        for instruction in instructions {
            self.dispatch(&mut state, instruction)?;
        }
        Ok(TxReceipt {
            signature: format!("mock-sig-{}", state.transactions),
        })
    }

    async fn program_accounts(
        &self,
        program: &Pubkey,
    ) -> Result<Vec<(Pubkey, Vec<u8>)>, LedgerError> {
        let state = self.lock()?;
        Ok(state
            .accounts
            .iter()
            .filter(|(_, (owner, _))| owner == program)
            .map(|(address, (_, bytes))| (*address, bytes.clone()))
            .collect())
    }
}

fn read_slice(data: &[u8], offset: usize, len: usize) -> Result<&[u8], LedgerError> {
    data.get(offset..offset + len)
        .ok_or_else(|| LedgerError::Rejected {
            reason: "instruction data truncated".into(),
        })
}

fn read_array<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N], LedgerError> {
    let slice = read_slice(data, offset, N)?;
    let mut out = [0u8; N];
    out.copy_from_slice(slice);
    Ok(out)
}

fn read_u64(data: &[u8], offset: usize) -> Result<u64, LedgerError> {
    Ok(u64::from_le_bytes(read_array(data, offset)?))
}

fn read_u128(data: &[u8], offset: usize) -> Result<u128, LedgerError> {
    Ok(u128::from_le_bytes(read_array(data, offset)?))
}

/// In-memory content-addressed blob store.
#[derive(Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<[u8; 32], Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn upload(&self, bytes: &[u8]) -> Result<ContentId, StorageError> {
        let digest = hash(bytes).to_bytes();
        self.blobs
            .lock()
            .map_err(|_| StorageError::Transport("store poisoned".into()))?
            .insert(digest, bytes.to_vec());
        Ok(ContentId(digest))
    }

    async fn retrieve(&self, id: &ContentId) -> Result<Vec<u8>, StorageError> {
        self.blobs
            .lock()
            .map_err(|_| StorageError::Transport("store poisoned".into()))?
            .get(&id.0)
            .cloned()
            .ok_or(StorageError::NotFound)
    }
}
