use anchor_lang::prelude::*;
use arcium_anchor::prelude::*;
use arcium_client::idl::arcium::types::CallbackAccount;

use crate::{
    error::ErrorCode,
    opinion_mpc::{
        CreateFeedbackStatsCallback, CreateFeedbackStatsOutput, CreatePost,
        InitCreateFeedbackStatsCompDef, InitRevealFeedbackStatsCompDef, InitSubmitFeedbackCompDef,
        RevealFeedback, RevealFeedbackStatsCallback, RevealFeedbackStatsOutput, SubmitFeedback,
        SubmitFeedbackCallback, SubmitFeedbackOutput,
    },
    state::{
        FeedbackStatsRevealedEvent, FeedbackSubmittedEvent, PostAccount, PostCreatedEvent,
    },
};

/// One-off job to register the `create_feedback_stats` circuit on-chain.
pub fn init_create_feedback_stats_comp_def(
    ctx: Context<InitCreateFeedbackStatsCompDef>,
) -> Result<()> {
    init_comp_def(ctx.accounts, true, 0, None, None)?;
    Ok(())
}

/// One-off job to register the `submit_feedback` circuit on-chain.
pub fn init_submit_feedback_comp_def(ctx: Context<InitSubmitFeedbackCompDef>) -> Result<()> {
    init_comp_def(ctx.accounts, true, 0, None, None)?;
    Ok(())
}

/// One-off job to register the `reveal_feedback_stats` circuit on-chain.
pub fn init_reveal_feedback_stats_comp_def(
    ctx: Context<InitRevealFeedbackStatsCompDef>,
) -> Result<()> {
    init_comp_def(ctx.accounts, true, 0, None, None)?;
    Ok(())
}

/// Creates an opinion post and queues the MPC computation that sets up its
/// encrypted feedback aggregates.
pub fn create_post(
    ctx: Context<CreatePost>,
    computation_offset: u64,
    post_id: u64,
    encrypted_title: [u8; 32],
    encrypted_content: [u8; 128],
    encrypted_topic: [u8; 16],
    nonce: u128,
) -> Result<()> {
    msg!("Creating post {}", post_id);

    let post = &mut ctx.accounts.post_account;
    post.post_id = post_id;
    post.encrypted_title = encrypted_title;
    post.encrypted_content = encrypted_content;
    post.encrypted_topic = encrypted_topic;
    post.owner = ctx.accounts.payer.key();
    post.created_at = Clock::get()?.unix_timestamp;
    post.total_feedback = 0;
    post.average_tenths = 0;
    post.rating_counts = [0; 5];
    post.revealed = false;
    post.bump = ctx.bumps.post_account;
    post.stats_nonce = nonce;
    post.enc_stats = [[0; 32]; 7];

    ctx.accounts.sign_pda_account.bump = ctx.bumps.sign_pda_account;

    let args = vec![Argument::PlaintextU128(nonce)];

    queue_computation(
        ctx.accounts,
        computation_offset,
        args,
        None,
        vec![CreateFeedbackStatsCallback::callback_ix(&[CallbackAccount {
            pubkey: ctx.accounts.post_account.key(),
            is_writable: true,
        }])],
    )?;

    emit!(PostCreatedEvent {
        post_id,
        owner: ctx.accounts.payer.key(),
    });

    Ok(())
}

pub fn create_feedback_stats_callback(
    ctx: Context<CreateFeedbackStatsCallback>,
    output: ComputationOutputs<CreateFeedbackStatsOutput>,
) -> Result<()> {
    let stats = match output {
        ComputationOutputs::Success(CreateFeedbackStatsOutput { field_0 }) => field_0,
        _ => return Err(ErrorCode::AbortedComputation.into()),
    };

    let post = &mut ctx.accounts.post_account;
    post.enc_stats = stats.ciphertexts;
    post.stats_nonce = stats.nonce;

    Ok(())
}

/// Queues an encrypted feedback rating into a post's aggregates.
pub fn submit_feedback(
    ctx: Context<SubmitFeedback>,
    computation_offset: u64,
    post_id: u64,
    ciphertext_rating: [u8; 32],
    public_key: [u8; 32],
    nonce: u128,
) -> Result<()> {
    require!(
        !ctx.accounts.post_account.revealed,
        ErrorCode::AlreadyRevealed
    );

    msg!("Queueing feedback for post {}", post_id);

    ctx.accounts.sign_pda_account.bump = ctx.bumps.sign_pda_account;

    let args = vec![
        Argument::ArcisPubkey(public_key),
        Argument::PlaintextU128(nonce),
        Argument::EncryptedU8(ciphertext_rating),
        Argument::PlaintextU128(ctx.accounts.post_account.stats_nonce),
        Argument::Account(
            ctx.accounts.post_account.key(),
            PostAccount::ENC_STATS_OFFSET,
            PostAccount::ENC_STATS_LEN,
        ),
    ];

    queue_computation(
        ctx.accounts,
        computation_offset,
        args,
        None,
        vec![SubmitFeedbackCallback::callback_ix(&[CallbackAccount {
            pubkey: ctx.accounts.post_account.key(),
            is_writable: true,
        }])],
    )?;

    Ok(())
}

pub fn submit_feedback_callback(
    ctx: Context<SubmitFeedbackCallback>,
    output: ComputationOutputs<SubmitFeedbackOutput>,
) -> Result<()> {
    let updated = match output {
        ComputationOutputs::Success(SubmitFeedbackOutput { field_0 }) => field_0,
        _ => return Err(ErrorCode::AbortedComputation.into()),
    };

    let post = &mut ctx.accounts.post_account;
    post.enc_stats = updated.ciphertexts;
    post.stats_nonce = updated.nonce;
    post.total_feedback += 1;

    emit!(FeedbackSubmittedEvent {
        post_id: post.post_id,
        total_feedback: post.total_feedback,
    });

    Ok(())
}

/// Queues the reveal computation for a post's feedback aggregates.
pub fn reveal_feedback(
    ctx: Context<RevealFeedback>,
    computation_offset: u64,
    post_id: u64,
) -> Result<()> {
    let post = &ctx.accounts.post_account;
    require!(
        ctx.accounts.payer.key() == post.owner,
        ErrorCode::InvalidAuthority
    );
    require!(!post.revealed, ErrorCode::AlreadyRevealed);
    require!(post.total_feedback > 0, ErrorCode::NoResponses);

    msg!("Revealing feedback aggregates for post {}", post_id);

    ctx.accounts.sign_pda_account.bump = ctx.bumps.sign_pda_account;

    let args = vec![
        Argument::PlaintextU128(post.stats_nonce),
        Argument::Account(
            post.key(),
            PostAccount::ENC_STATS_OFFSET,
            PostAccount::ENC_STATS_LEN,
        ),
    ];

    queue_computation(
        ctx.accounts,
        computation_offset,
        args,
        None,
        vec![RevealFeedbackStatsCallback::callback_ix(&[CallbackAccount {
            pubkey: ctx.accounts.post_account.key(),
            is_writable: true,
        }])],
    )?;

    Ok(())
}

pub fn reveal_feedback_stats_callback(
    ctx: Context<RevealFeedbackStatsCallback>,
    output: ComputationOutputs<RevealFeedbackStatsOutput>,
) -> Result<()> {
    let stats = match output {
        ComputationOutputs::Success(RevealFeedbackStatsOutput { field_0 }) => field_0,
        _ => return Err(ErrorCode::AbortedComputation.into()),
    };

    let post = &mut ctx.accounts.post_account;
    post.total_feedback = stats.field_0;
    post.average_tenths = (stats.field_1 * 10) / stats.field_0.max(1);
    post.rating_counts = stats.field_2;
    post.revealed = true;

    emit!(FeedbackStatsRevealedEvent {
        post_id: post.post_id,
        total_feedback: post.total_feedback,
        average_tenths: post.average_tenths,
        rating_counts: post.rating_counts,
    });

    Ok(())
}
