use anchor_lang::prelude::*;

/// An opinion post collecting encrypted 1-5 feedback ratings.
///
/// Deliberately the same shape as SurveyAccount so both domains share the
/// client-side reader; kept as its own type so they can diverge.
#[account]
#[derive(InitSpace)]
pub struct PostAccount {
    pub post_id: u64,
    pub encrypted_title: [u8; 32],
    pub encrypted_content: [u8; 128],
    pub encrypted_topic: [u8; 16],
    pub owner: Pubkey,
    pub created_at: i64,
    pub total_feedback: u32,
    /// Mean feedback rating in tenths. Zero until revealed.
    pub average_tenths: u32,
    pub rating_counts: [u32; 5],
    pub revealed: bool,
    pub bump: u8,
    pub stats_nonce: u128,
    /// MXE-encrypted FeedbackStats: responses, rating_sum, five buckets.
    pub enc_stats: [[u8; 32]; 7],
}

impl PostAccount {
    pub const ENC_STATS_OFFSET: u32 = 8 + 8 + 32 + 128 + 16 + 32 + 8 + 4 + 4 + 20 + 1 + 1 + 16;
    pub const ENC_STATS_LEN: u32 = 32 * 7;
}
