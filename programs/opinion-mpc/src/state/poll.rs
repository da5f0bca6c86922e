use anchor_lang::prelude::*;

/// A yes/no poll with an encrypted running tally.
///
/// Field order is load-bearing for the client-side reader; append only.
#[account]
#[derive(InitSpace)]
pub struct PollAccount {
    pub poll_id: u64,
    /// Encrypted poll question, zero-padded before encryption.
    pub encrypted_question: [u8; 64],
    pub owner: Pubkey,
    pub created_at: i64,
    /// Ballots accepted so far, incremented by the cast callback.
    pub total_votes: u32,
    /// Revealed yes count. Zero until revealed.
    pub yes_votes: u32,
    /// Revealed no count. Zero until revealed.
    pub no_votes: u32,
    /// True when yes strictly outnumbered no. A tie is no majority.
    pub majority_yes: bool,
    pub revealed: bool,
    pub bump: u8,
    pub tally_nonce: u128,
    /// MXE-encrypted PollTally: yes and no counters.
    pub enc_tally: [[u8; 32]; 2],
}

impl PollAccount {
    pub const ENC_TALLY_OFFSET: u32 = 8 + 8 + 64 + 32 + 8 + 4 + 4 + 4 + 1 + 1 + 1 + 16;
    pub const ENC_TALLY_LEN: u32 = 32 * 2;
}
