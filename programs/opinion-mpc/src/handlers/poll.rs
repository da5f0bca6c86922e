use anchor_lang::prelude::*;
use arcium_anchor::prelude::*;
use arcium_client::idl::arcium::types::CallbackAccount;

use crate::{
    error::ErrorCode,
    opinion_mpc::{
        CastBallot, CastBallotCallback, CastBallotOutput, CreatePoll, CreatePollTallyCallback,
        CreatePollTallyOutput, InitCastBallotCompDef, InitCreatePollTallyCompDef,
        InitRevealPollResultCompDef, RevealPoll, RevealPollResultCallback, RevealPollResultOutput,
    },
    state::{BallotCastEvent, PollAccount, PollCreatedEvent, PollResultRevealedEvent},
};

/// One-off job to register the `create_poll_tally` circuit on-chain.
pub fn init_create_poll_tally_comp_def(ctx: Context<InitCreatePollTallyCompDef>) -> Result<()> {
    init_comp_def(ctx.accounts, true, 0, None, None)?;
    Ok(())
}

/// One-off job to register the `cast_ballot` circuit on-chain.
pub fn init_cast_ballot_comp_def(ctx: Context<InitCastBallotCompDef>) -> Result<()> {
    init_comp_def(ctx.accounts, true, 0, None, None)?;
    Ok(())
}

/// One-off job to register the `reveal_poll_result` circuit on-chain.
pub fn init_reveal_poll_result_comp_def(
    ctx: Context<InitRevealPollResultCompDef>,
) -> Result<()> {
    init_comp_def(ctx.accounts, true, 0, None, None)?;
    Ok(())
}

/// Creates a poll record and queues the MPC computation that sets up its
/// encrypted yes/no tally.
pub fn create_poll(
    ctx: Context<CreatePoll>,
    computation_offset: u64,
    poll_id: u64,
    encrypted_question: [u8; 64],
    nonce: u128,
) -> Result<()> {
    msg!("Creating poll {}", poll_id);

    let poll = &mut ctx.accounts.poll_account;
    poll.poll_id = poll_id;
    poll.encrypted_question = encrypted_question;
    poll.owner = ctx.accounts.payer.key();
    poll.created_at = Clock::get()?.unix_timestamp;
    poll.total_votes = 0;
    poll.yes_votes = 0;
    poll.no_votes = 0;
    poll.majority_yes = false;
    poll.revealed = false;
    poll.bump = ctx.bumps.poll_account;
    poll.tally_nonce = nonce;
    poll.enc_tally = [[0; 32]; 2];

    ctx.accounts.sign_pda_account.bump = ctx.bumps.sign_pda_account;

    let args = vec![Argument::PlaintextU128(nonce)];

    queue_computation(
        ctx.accounts,
        computation_offset,
        args,
        None,
        vec![CreatePollTallyCallback::callback_ix(&[CallbackAccount {
            pubkey: ctx.accounts.poll_account.key(),
            is_writable: true,
        }])],
    )?;

    emit!(PollCreatedEvent {
        poll_id,
        owner: ctx.accounts.payer.key(),
    });

    Ok(())
}

pub fn create_poll_tally_callback(
    ctx: Context<CreatePollTallyCallback>,
    output: ComputationOutputs<CreatePollTallyOutput>,
) -> Result<()> {
    let tally = match output {
        ComputationOutputs::Success(CreatePollTallyOutput { field_0 }) => field_0,
        _ => return Err(ErrorCode::AbortedComputation.into()),
    };

    let poll = &mut ctx.accounts.poll_account;
    poll.enc_tally = tally.ciphertexts;
    poll.tally_nonce = tally.nonce;

    Ok(())
}

/// Queues an encrypted ballot into the poll's tally.
pub fn cast_ballot(
    ctx: Context<CastBallot>,
    computation_offset: u64,
    poll_id: u64,
    ciphertext_choice: [u8; 32],
    public_key: [u8; 32],
    nonce: u128,
) -> Result<()> {
    require!(
        !ctx.accounts.poll_account.revealed,
        ErrorCode::AlreadyRevealed
    );

    msg!("Queueing ballot for poll {}", poll_id);

    ctx.accounts.sign_pda_account.bump = ctx.bumps.sign_pda_account;

    let args = vec![
        Argument::ArcisPubkey(public_key),
        Argument::PlaintextU128(nonce),
        Argument::EncryptedBool(ciphertext_choice),
        Argument::PlaintextU128(ctx.accounts.poll_account.tally_nonce),
        Argument::Account(
            ctx.accounts.poll_account.key(),
            PollAccount::ENC_TALLY_OFFSET,
            PollAccount::ENC_TALLY_LEN,
        ),
    ];

    queue_computation(
        ctx.accounts,
        computation_offset,
        args,
        None,
        vec![CastBallotCallback::callback_ix(&[CallbackAccount {
            pubkey: ctx.accounts.poll_account.key(),
            is_writable: true,
        }])],
    )?;

    Ok(())
}

pub fn cast_ballot_callback(
    ctx: Context<CastBallotCallback>,
    output: ComputationOutputs<CastBallotOutput>,
) -> Result<()> {
    let updated = match output {
        ComputationOutputs::Success(CastBallotOutput { field_0 }) => field_0,
        _ => return Err(ErrorCode::AbortedComputation.into()),
    };

    let poll = &mut ctx.accounts.poll_account;
    poll.enc_tally = updated.ciphertexts;
    poll.tally_nonce = updated.nonce;
    poll.total_votes += 1;

    emit!(BallotCastEvent {
        poll_id: poll.poll_id,
        total_votes: poll.total_votes,
    });

    Ok(())
}

/// Queues the reveal computation for a poll. Owner-only, once.
pub fn reveal_poll(ctx: Context<RevealPoll>, computation_offset: u64, poll_id: u64) -> Result<()> {
    let poll = &ctx.accounts.poll_account;
    require!(
        ctx.accounts.payer.key() == poll.owner,
        ErrorCode::InvalidAuthority
    );
    require!(!poll.revealed, ErrorCode::AlreadyRevealed);
    require!(poll.total_votes > 0, ErrorCode::NoResponses);

    msg!("Revealing result for poll {}", poll_id);

    ctx.accounts.sign_pda_account.bump = ctx.bumps.sign_pda_account;

    let args = vec![
        Argument::PlaintextU128(poll.tally_nonce),
        Argument::Account(
            poll.key(),
            PollAccount::ENC_TALLY_OFFSET,
            PollAccount::ENC_TALLY_LEN,
        ),
    ];

    queue_computation(
        ctx.accounts,
        computation_offset,
        args,
        None,
        vec![RevealPollResultCallback::callback_ix(&[CallbackAccount {
            pubkey: ctx.accounts.poll_account.key(),
            is_writable: true,
        }])],
    )?;

    Ok(())
}

pub fn reveal_poll_result_callback(
    ctx: Context<RevealPollResultCallback>,
    output: ComputationOutputs<RevealPollResultOutput>,
) -> Result<()> {
    let tally = match output {
        ComputationOutputs::Success(RevealPollResultOutput { field_0 }) => field_0,
        _ => return Err(ErrorCode::AbortedComputation.into()),
    };

    // field_0 = yes count, field_1 = no count, both u64 in the circuit.
    let poll = &mut ctx.accounts.poll_account;
    poll.yes_votes = tally.field_0 as u32;
    poll.no_votes = tally.field_1 as u32;
    poll.total_votes = poll.yes_votes + poll.no_votes;
    poll.majority_yes = poll.yes_votes > poll.no_votes;
    poll.revealed = true;

    emit!(PollResultRevealedEvent {
        poll_id: poll.poll_id,
        yes_votes: poll.yes_votes,
        no_votes: poll.no_votes,
        majority_yes: poll.majority_yes,
    });

    Ok(())
}
