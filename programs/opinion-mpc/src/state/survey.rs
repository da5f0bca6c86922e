use anchor_lang::prelude::*;

/// A survey collecting encrypted 1-5 ratings.
///
/// The field order is fixed: the client-side reader parses this account at
/// known byte offsets, so new fields go at the end.
#[account]
#[derive(InitSpace)]
pub struct SurveyAccount {
    /// Caller-chosen identifier, also the PDA seed.
    pub survey_id: u64,
    /// Encrypted survey title, zero-padded before encryption.
    pub encrypted_title: [u8; 32],
    /// Encrypted survey description or question text.
    pub encrypted_content: [u8; 128],
    /// Encrypted topic tag.
    pub encrypted_topic: [u8; 16],
    /// Creator; the only key allowed to reveal aggregates.
    pub owner: Pubkey,
    pub created_at: i64,
    /// Accepted responses so far, incremented by the submit callback.
    pub total_responses: u32,
    /// Mean rating in tenths (42 = 4.2). Zero until revealed.
    pub average_tenths: u32,
    /// Histogram over ratings 1..=5. Zeroed until revealed.
    pub rating_counts: [u32; 5],
    /// Set by the reveal callback; the client's completion predicate.
    pub revealed: bool,
    pub bump: u8,
    /// Nonce for the encrypted aggregate state below.
    pub stats_nonce: u128,
    /// MXE-encrypted SurveyStats: responses, rating_sum, five buckets.
    pub enc_stats: [[u8; 32]; 7],
}

impl SurveyAccount {
    /// Byte offset of `enc_stats` from the start of the account data,
    /// discriminator included. Passed to the cluster as an account slice.
    pub const ENC_STATS_OFFSET: u32 = 8 + 8 + 32 + 128 + 16 + 32 + 8 + 4 + 4 + 20 + 1 + 1 + 16;
    pub const ENC_STATS_LEN: u32 = 32 * 7;
}
