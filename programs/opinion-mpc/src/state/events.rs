use anchor_lang::prelude::*;

#[event]
pub struct SurveyCreatedEvent {
    pub survey_id: u64,
    pub owner: Pubkey,
}

#[event]
pub struct RatingSubmittedEvent {
    pub survey_id: u64,
    pub total_responses: u32,
}

#[event]
pub struct SurveyStatsRevealedEvent {
    pub survey_id: u64,
    pub total_responses: u32,
    /// Mean rating in tenths (42 = 4.2).
    pub average_tenths: u32,
    pub rating_counts: [u32; 5],
}

#[event]
pub struct PollCreatedEvent {
    pub poll_id: u64,
    pub owner: Pubkey,
}

#[event]
pub struct BallotCastEvent {
    pub poll_id: u64,
    pub total_votes: u32,
}

#[event]
pub struct PollResultRevealedEvent {
    pub poll_id: u64,
    pub yes_votes: u32,
    pub no_votes: u32,
    pub majority_yes: bool,
}

#[event]
pub struct PostCreatedEvent {
    pub post_id: u64,
    pub owner: Pubkey,
}

#[event]
pub struct FeedbackSubmittedEvent {
    pub post_id: u64,
    pub total_feedback: u32,
}

#[event]
pub struct FeedbackStatsRevealedEvent {
    pub post_id: u64,
    pub total_feedback: u32,
    pub average_tenths: u32,
    pub rating_counts: [u32; 5],
}
