use anchor_lang::prelude::*;
use arcium_anchor::prelude::*;
use arcium_client::idl::arcium::types::CallbackAccount;

use crate::{
    error::ErrorCode,
    opinion_mpc::{
        CreateSurvey, CreateSurveyStatsCallback, CreateSurveyStatsOutput,
        InitCreateSurveyStatsCompDef, InitRevealSurveyStatsCompDef, InitSubmitRatingCompDef,
        RevealSurvey, RevealSurveyStatsCallback, RevealSurveyStatsOutput, SubmitRating,
        SubmitRatingCallback, SubmitRatingOutput,
    },
    state::{
        RatingSubmittedEvent, SurveyAccount, SurveyCreatedEvent, SurveyStatsRevealedEvent,
    },
};

/// One-off job to register the `create_survey_stats` circuit on-chain.
/// Must run once before any survey can be created.
pub fn init_create_survey_stats_comp_def(
    ctx: Context<InitCreateSurveyStatsCompDef>,
) -> Result<()> {
    init_comp_def(ctx.accounts, true, 0, None, None)?;
    Ok(())
}

/// One-off job to register the `submit_rating` circuit on-chain.
pub fn init_submit_rating_comp_def(ctx: Context<InitSubmitRatingCompDef>) -> Result<()> {
    init_comp_def(ctx.accounts, true, 0, None, None)?;
    Ok(())
}

/// One-off job to register the `reveal_survey_stats` circuit on-chain.
pub fn init_reveal_survey_stats_comp_def(
    ctx: Context<InitRevealSurveyStatsCompDef>,
) -> Result<()> {
    init_comp_def(ctx.accounts, true, 0, None, None)?;
    Ok(())
}

/// Creates a survey record and queues the MPC computation that sets up its
/// encrypted aggregate state.
///
/// Metadata arrives already encrypted and zero-padded by the client; the
/// program stores it opaquely. Individual ratings submitted later never
/// touch plaintext on-chain.
pub fn create_survey(
    ctx: Context<CreateSurvey>,
    computation_offset: u64,
    survey_id: u64,
    encrypted_title: [u8; 32],
    encrypted_content: [u8; 128],
    encrypted_topic: [u8; 16],
    nonce: u128,
) -> Result<()> {
    msg!("Creating survey {}", survey_id);

    let survey = &mut ctx.accounts.survey_account;
    survey.survey_id = survey_id;
    survey.encrypted_title = encrypted_title;
    survey.encrypted_content = encrypted_content;
    survey.encrypted_topic = encrypted_topic;
    survey.owner = ctx.accounts.payer.key();
    survey.created_at = Clock::get()?.unix_timestamp;
    survey.total_responses = 0;
    survey.average_tenths = 0;
    survey.rating_counts = [0; 5];
    survey.revealed = false;
    survey.bump = ctx.bumps.survey_account;
    survey.stats_nonce = nonce;
    survey.enc_stats = [[0; 32]; 7];

    ctx.accounts.sign_pda_account.bump = ctx.bumps.sign_pda_account;

    let args = vec![Argument::PlaintextU128(nonce)];

    queue_computation(
        ctx.accounts,
        computation_offset,
        args,
        None,
        vec![CreateSurveyStatsCallback::callback_ix(&[CallbackAccount {
            pubkey: ctx.accounts.survey_account.key(),
            is_writable: true,
        }])],
    )?;

    emit!(SurveyCreatedEvent {
        survey_id,
        owner: ctx.accounts.payer.key(),
    });

    Ok(())
}

pub fn create_survey_stats_callback(
    ctx: Context<CreateSurveyStatsCallback>,
    output: ComputationOutputs<CreateSurveyStatsOutput>,
) -> Result<()> {
    let stats = match output {
        ComputationOutputs::Success(CreateSurveyStatsOutput { field_0 }) => field_0,
        _ => return Err(ErrorCode::AbortedComputation.into()),
    };

    let survey = &mut ctx.accounts.survey_account;
    survey.enc_stats = stats.ciphertexts;
    survey.stats_nonce = stats.nonce;

    Ok(())
}

/// Queues an encrypted rating into the survey's aggregate state.
///
/// The ciphertext is handed to the cluster together with the submitter's
/// encryption public key and nonce; the current encrypted aggregates are
/// referenced in place from the survey account.
pub fn submit_rating(
    ctx: Context<SubmitRating>,
    computation_offset: u64,
    survey_id: u64,
    ciphertext_rating: [u8; 32],
    public_key: [u8; 32],
    nonce: u128,
) -> Result<()> {
    require!(
        !ctx.accounts.survey_account.revealed,
        ErrorCode::AlreadyRevealed
    );

    msg!("Queueing rating for survey {}", survey_id);

    ctx.accounts.sign_pda_account.bump = ctx.bumps.sign_pda_account;

    let args = vec![
        Argument::ArcisPubkey(public_key),
        Argument::PlaintextU128(nonce),
        Argument::EncryptedU8(ciphertext_rating),
        Argument::PlaintextU128(ctx.accounts.survey_account.stats_nonce),
        Argument::Account(
            ctx.accounts.survey_account.key(),
            SurveyAccount::ENC_STATS_OFFSET,
            SurveyAccount::ENC_STATS_LEN,
        ),
    ];

    queue_computation(
        ctx.accounts,
        computation_offset,
        args,
        None,
        vec![SubmitRatingCallback::callback_ix(&[CallbackAccount {
            pubkey: ctx.accounts.survey_account.key(),
            is_writable: true,
        }])],
    )?;

    Ok(())
}

pub fn submit_rating_callback(
    ctx: Context<SubmitRatingCallback>,
    output: ComputationOutputs<SubmitRatingOutput>,
) -> Result<()> {
    let updated = match output {
        ComputationOutputs::Success(SubmitRatingOutput { field_0 }) => field_0,
        _ => return Err(ErrorCode::AbortedComputation.into()),
    };

    let survey = &mut ctx.accounts.survey_account;
    survey.enc_stats = updated.ciphertexts;
    survey.stats_nonce = updated.nonce;
    survey.total_responses += 1;

    emit!(RatingSubmittedEvent {
        survey_id: survey.survey_id,
        total_responses: survey.total_responses,
    });

    Ok(())
}

/// Queues the reveal computation for a survey's aggregates.
///
/// Only the survey owner may reveal, and only once. Individual ratings are
/// not recoverable from the revealed count, mean and histogram.
pub fn reveal_survey(
    ctx: Context<RevealSurvey>,
    computation_offset: u64,
    survey_id: u64,
) -> Result<()> {
    let survey = &ctx.accounts.survey_account;
    require!(
        ctx.accounts.payer.key() == survey.owner,
        ErrorCode::InvalidAuthority
    );
    require!(!survey.revealed, ErrorCode::AlreadyRevealed);
    require!(survey.total_responses > 0, ErrorCode::NoResponses);

    msg!("Revealing aggregates for survey {}", survey_id);

    ctx.accounts.sign_pda_account.bump = ctx.bumps.sign_pda_account;

    let args = vec![
        Argument::PlaintextU128(survey.stats_nonce),
        Argument::Account(
            survey.key(),
            SurveyAccount::ENC_STATS_OFFSET,
            SurveyAccount::ENC_STATS_LEN,
        ),
    ];

    queue_computation(
        ctx.accounts,
        computation_offset,
        args,
        None,
        vec![RevealSurveyStatsCallback::callback_ix(&[CallbackAccount {
            pubkey: ctx.accounts.survey_account.key(),
            is_writable: true,
        }])],
    )?;

    Ok(())
}

pub fn reveal_survey_stats_callback(
    ctx: Context<RevealSurveyStatsCallback>,
    output: ComputationOutputs<RevealSurveyStatsOutput>,
) -> Result<()> {
    let stats = match output {
        ComputationOutputs::Success(RevealSurveyStatsOutput { field_0 }) => field_0,
        _ => return Err(ErrorCode::AbortedComputation.into()),
    };

    let survey = &mut ctx.accounts.survey_account;
    survey.total_responses = stats.field_0;
    survey.average_tenths = (stats.field_1 * 10) / stats.field_0.max(1);
    survey.rating_counts = stats.field_2;
    survey.revealed = true;

    emit!(SurveyStatsRevealedEvent {
        survey_id: survey.survey_id,
        total_responses: survey.total_responses,
        average_tenths: survey.average_tenths,
        rating_counts: survey.rating_counts,
    });

    Ok(())
}
