// Stops Rust Analyzer complaining about missing configs
// See https://solana.stackexchange.com/questions/17777
#![allow(unexpected_cfgs)]
#![allow(deprecated)]

use anchor_lang::prelude::*;
use arcium_anchor::prelude::*;

pub mod constants;
pub mod error;
pub mod handlers;
pub mod state;

use constants::*;
pub use error::ErrorCode;
pub use state::{PollAccount, PostAccount, SurveyAccount};

declare_id!("42PNmexkHgVLKHe5mLCWspKhV817fyGTKttyLYq3XysW");

#[arcium_program]
pub mod opinion_mpc {
    use super::*;

    // ---- Survey (encrypted 1-5 ratings) ----

    pub fn init_create_survey_stats_comp_def(
        ctx: Context<InitCreateSurveyStatsCompDef>,
    ) -> Result<()> {
        handlers::survey::init_create_survey_stats_comp_def(ctx)
    }

    pub fn init_submit_rating_comp_def(ctx: Context<InitSubmitRatingCompDef>) -> Result<()> {
        handlers::survey::init_submit_rating_comp_def(ctx)
    }

    pub fn init_reveal_survey_stats_comp_def(
        ctx: Context<InitRevealSurveyStatsCompDef>,
    ) -> Result<()> {
        handlers::survey::init_reveal_survey_stats_comp_def(ctx)
    }

    pub fn create_survey(
        ctx: Context<CreateSurvey>,
        computation_offset: u64,
        survey_id: u64,
        encrypted_title: [u8; 32],
        encrypted_content: [u8; 128],
        encrypted_topic: [u8; 16],
        nonce: u128,
    ) -> Result<()> {
        handlers::survey::create_survey(
            ctx,
            computation_offset,
            survey_id,
            encrypted_title,
            encrypted_content,
            encrypted_topic,
            nonce,
        )
    }

    #[arcium_callback(encrypted_ix = "create_survey_stats")]
    pub fn create_survey_stats_callback(
        ctx: Context<CreateSurveyStatsCallback>,
        output: ComputationOutputs<CreateSurveyStatsOutput>,
    ) -> Result<()> {
        handlers::survey::create_survey_stats_callback(ctx, output)
    }

    pub fn submit_rating(
        ctx: Context<SubmitRating>,
        computation_offset: u64,
        survey_id: u64,
        ciphertext_rating: [u8; 32],
        public_key: [u8; 32],
        nonce: u128,
    ) -> Result<()> {
        handlers::survey::submit_rating(
            ctx,
            computation_offset,
            survey_id,
            ciphertext_rating,
            public_key,
            nonce,
        )
    }

    #[arcium_callback(encrypted_ix = "submit_rating")]
    pub fn submit_rating_callback(
        ctx: Context<SubmitRatingCallback>,
        output: ComputationOutputs<SubmitRatingOutput>,
    ) -> Result<()> {
        handlers::survey::submit_rating_callback(ctx, output)
    }

    pub fn reveal_survey(
        ctx: Context<RevealSurvey>,
        computation_offset: u64,
        survey_id: u64,
    ) -> Result<()> {
        handlers::survey::reveal_survey(ctx, computation_offset, survey_id)
    }

    #[arcium_callback(encrypted_ix = "reveal_survey_stats")]
    pub fn reveal_survey_stats_callback(
        ctx: Context<RevealSurveyStatsCallback>,
        output: ComputationOutputs<RevealSurveyStatsOutput>,
    ) -> Result<()> {
        handlers::survey::reveal_survey_stats_callback(ctx, output)
    }

    // ---- Poll (encrypted yes/no ballots) ----

    pub fn init_create_poll_tally_comp_def(
        ctx: Context<InitCreatePollTallyCompDef>,
    ) -> Result<()> {
        handlers::poll::init_create_poll_tally_comp_def(ctx)
    }

    pub fn init_cast_ballot_comp_def(ctx: Context<InitCastBallotCompDef>) -> Result<()> {
        handlers::poll::init_cast_ballot_comp_def(ctx)
    }

    pub fn init_reveal_poll_result_comp_def(
        ctx: Context<InitRevealPollResultCompDef>,
    ) -> Result<()> {
        handlers::poll::init_reveal_poll_result_comp_def(ctx)
    }

    pub fn create_poll(
        ctx: Context<CreatePoll>,
        computation_offset: u64,
        poll_id: u64,
        encrypted_question: [u8; 64],
        nonce: u128,
    ) -> Result<()> {
        handlers::poll::create_poll(ctx, computation_offset, poll_id, encrypted_question, nonce)
    }

    #[arcium_callback(encrypted_ix = "create_poll_tally")]
    pub fn create_poll_tally_callback(
        ctx: Context<CreatePollTallyCallback>,
        output: ComputationOutputs<CreatePollTallyOutput>,
    ) -> Result<()> {
        handlers::poll::create_poll_tally_callback(ctx, output)
    }

    pub fn cast_ballot(
        ctx: Context<CastBallot>,
        computation_offset: u64,
        poll_id: u64,
        ciphertext_choice: [u8; 32],
        public_key: [u8; 32],
        nonce: u128,
    ) -> Result<()> {
        handlers::poll::cast_ballot(
            ctx,
            computation_offset,
            poll_id,
            ciphertext_choice,
            public_key,
            nonce,
        )
    }

    #[arcium_callback(encrypted_ix = "cast_ballot")]
    pub fn cast_ballot_callback(
        ctx: Context<CastBallotCallback>,
        output: ComputationOutputs<CastBallotOutput>,
    ) -> Result<()> {
        handlers::poll::cast_ballot_callback(ctx, output)
    }

    pub fn reveal_poll(
        ctx: Context<RevealPoll>,
        computation_offset: u64,
        poll_id: u64,
    ) -> Result<()> {
        handlers::poll::reveal_poll(ctx, computation_offset, poll_id)
    }

    #[arcium_callback(encrypted_ix = "reveal_poll_result")]
    pub fn reveal_poll_result_callback(
        ctx: Context<RevealPollResultCallback>,
        output: ComputationOutputs<RevealPollResultOutput>,
    ) -> Result<()> {
        handlers::poll::reveal_poll_result_callback(ctx, output)
    }

    // ---- Post feedback (encrypted 1-5 ratings on a post) ----

    pub fn init_create_feedback_stats_comp_def(
        ctx: Context<InitCreateFeedbackStatsCompDef>,
    ) -> Result<()> {
        handlers::feedback::init_create_feedback_stats_comp_def(ctx)
    }

    pub fn init_submit_feedback_comp_def(ctx: Context<InitSubmitFeedbackCompDef>) -> Result<()> {
        handlers::feedback::init_submit_feedback_comp_def(ctx)
    }

    pub fn init_reveal_feedback_stats_comp_def(
        ctx: Context<InitRevealFeedbackStatsCompDef>,
    ) -> Result<()> {
        handlers::feedback::init_reveal_feedback_stats_comp_def(ctx)
    }

    pub fn create_post(
        ctx: Context<CreatePost>,
        computation_offset: u64,
        post_id: u64,
        encrypted_title: [u8; 32],
        encrypted_content: [u8; 128],
        encrypted_topic: [u8; 16],
        nonce: u128,
    ) -> Result<()> {
        handlers::feedback::create_post(
            ctx,
            computation_offset,
            post_id,
            encrypted_title,
            encrypted_content,
            encrypted_topic,
            nonce,
        )
    }

    #[arcium_callback(encrypted_ix = "create_feedback_stats")]
    pub fn create_feedback_stats_callback(
        ctx: Context<CreateFeedbackStatsCallback>,
        output: ComputationOutputs<CreateFeedbackStatsOutput>,
    ) -> Result<()> {
        handlers::feedback::create_feedback_stats_callback(ctx, output)
    }

    pub fn submit_feedback(
        ctx: Context<SubmitFeedback>,
        computation_offset: u64,
        post_id: u64,
        ciphertext_rating: [u8; 32],
        public_key: [u8; 32],
        nonce: u128,
    ) -> Result<()> {
        handlers::feedback::submit_feedback(
            ctx,
            computation_offset,
            post_id,
            ciphertext_rating,
            public_key,
            nonce,
        )
    }

    #[arcium_callback(encrypted_ix = "submit_feedback")]
    pub fn submit_feedback_callback(
        ctx: Context<SubmitFeedbackCallback>,
        output: ComputationOutputs<SubmitFeedbackOutput>,
    ) -> Result<()> {
        handlers::feedback::submit_feedback_callback(ctx, output)
    }

    pub fn reveal_feedback(
        ctx: Context<RevealFeedback>,
        computation_offset: u64,
        post_id: u64,
    ) -> Result<()> {
        handlers::feedback::reveal_feedback(ctx, computation_offset, post_id)
    }

    #[arcium_callback(encrypted_ix = "reveal_feedback_stats")]
    pub fn reveal_feedback_stats_callback(
        ctx: Context<RevealFeedbackStatsCallback>,
        output: ComputationOutputs<RevealFeedbackStatsOutput>,
    ) -> Result<()> {
        handlers::feedback::reveal_feedback_stats_callback(ctx, output)
    }

    // Account struct definitions - these need to be inside the arcium_program
    // module so they can access the generated SignerAccount type.

    // ---- Survey accounts ----

    #[init_computation_definition_accounts("create_survey_stats", payer)]
    #[derive(Accounts)]
    pub struct InitCreateSurveyStatsCompDef<'info> {
        #[account(mut)]
        pub payer: Signer<'info>,

        #[account(
            mut,
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Box<Account<'info, MXEAccount>>,

        #[account(mut)]
        /// CHECK: comp_def_account, checked by arcium program.
        /// Can't check it here as it's not initialized yet.
        pub comp_def_account: UncheckedAccount<'info>,

        pub arcium_program: Program<'info, Arcium>,

        pub system_program: Program<'info, System>,
    }

    #[init_computation_definition_accounts("submit_rating", payer)]
    #[derive(Accounts)]
    pub struct InitSubmitRatingCompDef<'info> {
        #[account(mut)]
        pub payer: Signer<'info>,

        #[account(
            mut,
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Box<Account<'info, MXEAccount>>,

        #[account(mut)]
        /// CHECK: comp_def_account, checked by arcium program.
        /// Can't check it here as it's not initialized yet.
        pub comp_def_account: UncheckedAccount<'info>,

        pub arcium_program: Program<'info, Arcium>,

        pub system_program: Program<'info, System>,
    }

    #[init_computation_definition_accounts("reveal_survey_stats", payer)]
    #[derive(Accounts)]
    pub struct InitRevealSurveyStatsCompDef<'info> {
        #[account(mut)]
        pub payer: Signer<'info>,

        #[account(
            mut,
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Box<Account<'info, MXEAccount>>,

        #[account(mut)]
        /// CHECK: comp_def_account, checked by arcium program.
        /// Can't check it here as it's not initialized yet.
        pub comp_def_account: UncheckedAccount<'info>,

        pub arcium_program: Program<'info, Arcium>,

        pub system_program: Program<'info, System>,
    }

    #[queue_computation_accounts("create_survey_stats", payer)]
    #[derive(Accounts)]
    #[instruction(computation_offset: u64, survey_id: u64)]
    pub struct CreateSurvey<'info> {
        #[account(mut)]
        pub payer: Signer<'info>,

        #[account(
            init_if_needed,
            space = 9,
            payer = payer,
            seeds = [&SIGN_PDA_SEED],
            bump,
            address = derive_sign_pda!(),
        )]
        pub sign_pda_account: Account<'info, SignerAccount>,

        #[account(
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Account<'info, MXEAccount>,

        #[account(
            mut,
            address = derive_mempool_pda!()
        )]
        /// CHECK: mempool_account, checked by the arcium program
        pub mempool_account: UncheckedAccount<'info>,

        #[account(
            mut,
            address = derive_execpool_pda!()
        )]
        /// CHECK: executing_pool, checked by the arcium program
        pub executing_pool: UncheckedAccount<'info>,

        #[account(
            mut,
            address = derive_comp_pda!(computation_offset)
        )]
        /// CHECK: computation_account, checked by the arcium program.
        pub computation_account: UncheckedAccount<'info>,

        #[account(
            address = derive_comp_def_pda!(COMP_DEF_OFFSET_CREATE_SURVEY_STATS)
        )]
        pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

        #[account(
            mut,
            address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet)
        )]
        pub cluster_account: Account<'info, Cluster>,

        #[account(
            mut,
            address = ARCIUM_FEE_POOL_ACCOUNT_ADDRESS,
        )]
        pub pool_account: Account<'info, FeePool>,

        #[account(
            address = ARCIUM_CLOCK_ACCOUNT_ADDRESS,
        )]
        pub clock_account: Account<'info, ClockAccount>,

        pub system_program: Program<'info, System>,

        pub arcium_program: Program<'info, Arcium>,

        #[account(
            init,
            payer = payer,
            space = 8 + SurveyAccount::INIT_SPACE,
            seeds = [SURVEY_SEED, survey_id.to_le_bytes().as_ref()],
            bump,
        )]
        pub survey_account: Account<'info, SurveyAccount>,
    }

    #[callback_accounts("create_survey_stats")]
    #[derive(Accounts)]
    pub struct CreateSurveyStatsCallback<'info> {
        pub arcium_program: Program<'info, Arcium>,

        #[account(
            address = derive_comp_def_pda!(COMP_DEF_OFFSET_CREATE_SURVEY_STATS)
        )]
        pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

        #[account(address = ::anchor_lang::solana_program::sysvar::instructions::ID)]
        /// CHECK: instructions_sysvar, checked by the account constraint
        pub instructions_sysvar: AccountInfo<'info>,

        /// CHECK: survey_account, checked by the callback account key passed in queue_computation
        #[account(mut)]
        pub survey_account: Account<'info, SurveyAccount>,
    }

    #[queue_computation_accounts("submit_rating", payer)]
    #[derive(Accounts)]
    #[instruction(computation_offset: u64, survey_id: u64)]
    pub struct SubmitRating<'info> {
        #[account(mut)]
        pub payer: Signer<'info>,

        #[account(
            init_if_needed,
            space = 9,
            payer = payer,
            seeds = [&SIGN_PDA_SEED],
            bump,
            address = derive_sign_pda!(),
        )]
        pub sign_pda_account: Account<'info, SignerAccount>,

        #[account(
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Account<'info, MXEAccount>,

        #[account(
            mut,
            address = derive_mempool_pda!()
        )]
        /// CHECK: mempool_account, checked by the arcium program
        pub mempool_account: UncheckedAccount<'info>,

        #[account(
            mut,
            address = derive_execpool_pda!()
        )]
        /// CHECK: executing_pool, checked by the arcium program
        pub executing_pool: UncheckedAccount<'info>,

        #[account(
            mut,
            address = derive_comp_pda!(computation_offset)
        )]
        /// CHECK: computation_account, checked by the arcium program.
        pub computation_account: UncheckedAccount<'info>,

        #[account(
            address = derive_comp_def_pda!(COMP_DEF_OFFSET_SUBMIT_RATING)
        )]
        pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

        #[account(
            mut,
            address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet)
        )]
        pub cluster_account: Account<'info, Cluster>,

        #[account(
            mut,
            address = ARCIUM_FEE_POOL_ACCOUNT_ADDRESS,
        )]
        pub pool_account: Account<'info, FeePool>,

        #[account(
            address = ARCIUM_CLOCK_ACCOUNT_ADDRESS,
        )]
        pub clock_account: Account<'info, ClockAccount>,

        pub system_program: Program<'info, System>,

        pub arcium_program: Program<'info, Arcium>,

        #[account(
            mut,
            seeds = [SURVEY_SEED, survey_id.to_le_bytes().as_ref()],
            bump = survey_account.bump,
        )]
        pub survey_account: Account<'info, SurveyAccount>,
    }

    #[callback_accounts("submit_rating")]
    #[derive(Accounts)]
    pub struct SubmitRatingCallback<'info> {
        pub arcium_program: Program<'info, Arcium>,

        #[account(
            address = derive_comp_def_pda!(COMP_DEF_OFFSET_SUBMIT_RATING)
        )]
        pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

        #[account(address = ::anchor_lang::solana_program::sysvar::instructions::ID)]
        /// CHECK: instructions_sysvar, checked by the account constraint
        pub instructions_sysvar: AccountInfo<'info>,

        #[account(mut)]
        pub survey_account: Account<'info, SurveyAccount>,
    }

    #[queue_computation_accounts("reveal_survey_stats", payer)]
    #[derive(Accounts)]
    #[instruction(computation_offset: u64, survey_id: u64)]
    pub struct RevealSurvey<'info> {
        #[account(mut)]
        pub payer: Signer<'info>,

        #[account(
            init_if_needed,
            space = 9,
            payer = payer,
            seeds = [&SIGN_PDA_SEED],
            bump,
            address = derive_sign_pda!(),
        )]
        pub sign_pda_account: Account<'info, SignerAccount>,

        #[account(
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Account<'info, MXEAccount>,

        #[account(
            mut,
            address = derive_mempool_pda!()
        )]
        /// CHECK: mempool_account, checked by the arcium program
        pub mempool_account: UncheckedAccount<'info>,

        #[account(
            mut,
            address = derive_execpool_pda!()
        )]
        /// CHECK: executing_pool, checked by the arcium program
        pub executing_pool: UncheckedAccount<'info>,

        #[account(
            mut,
            address = derive_comp_pda!(computation_offset)
        )]
        /// CHECK: computation_account, checked by the arcium program.
        pub computation_account: UncheckedAccount<'info>,

        #[account(
            address = derive_comp_def_pda!(COMP_DEF_OFFSET_REVEAL_SURVEY_STATS)
        )]
        pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

        #[account(
            mut,
            address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet)
        )]
        pub cluster_account: Account<'info, Cluster>,

        #[account(
            mut,
            address = ARCIUM_FEE_POOL_ACCOUNT_ADDRESS,
        )]
        pub pool_account: Account<'info, FeePool>,

        #[account(
            address = ARCIUM_CLOCK_ACCOUNT_ADDRESS,
        )]
        pub clock_account: Account<'info, ClockAccount>,

        pub system_program: Program<'info, System>,

        pub arcium_program: Program<'info, Arcium>,

        #[account(
            mut,
            seeds = [SURVEY_SEED, survey_id.to_le_bytes().as_ref()],
            bump = survey_account.bump,
        )]
        pub survey_account: Account<'info, SurveyAccount>,
    }

    #[callback_accounts("reveal_survey_stats")]
    #[derive(Accounts)]
    pub struct RevealSurveyStatsCallback<'info> {
        pub arcium_program: Program<'info, Arcium>,

        #[account(
            address = derive_comp_def_pda!(COMP_DEF_OFFSET_REVEAL_SURVEY_STATS)
        )]
        pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

        #[account(address = ::anchor_lang::solana_program::sysvar::instructions::ID)]
        /// CHECK: instructions_sysvar, checked by the account constraint
        pub instructions_sysvar: AccountInfo<'info>,

        #[account(mut)]
        pub survey_account: Account<'info, SurveyAccount>,
    }

    // ---- Poll accounts ----

    #[init_computation_definition_accounts("create_poll_tally", payer)]
    #[derive(Accounts)]
    pub struct InitCreatePollTallyCompDef<'info> {
        #[account(mut)]
        pub payer: Signer<'info>,

        #[account(
            mut,
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Box<Account<'info, MXEAccount>>,

        #[account(mut)]
        /// CHECK: comp_def_account, checked by arcium program.
        /// Can't check it here as it's not initialized yet.
        pub comp_def_account: UncheckedAccount<'info>,

        pub arcium_program: Program<'info, Arcium>,

        pub system_program: Program<'info, System>,
    }

    #[init_computation_definition_accounts("cast_ballot", payer)]
    #[derive(Accounts)]
    pub struct InitCastBallotCompDef<'info> {
        #[account(mut)]
        pub payer: Signer<'info>,

        #[account(
            mut,
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Box<Account<'info, MXEAccount>>,

        #[account(mut)]
        /// CHECK: comp_def_account, checked by arcium program.
        /// Can't check it here as it's not initialized yet.
        pub comp_def_account: UncheckedAccount<'info>,

        pub arcium_program: Program<'info, Arcium>,

        pub system_program: Program<'info, System>,
    }

    #[init_computation_definition_accounts("reveal_poll_result", payer)]
    #[derive(Accounts)]
    pub struct InitRevealPollResultCompDef<'info> {
        #[account(mut)]
        pub payer: Signer<'info>,

        #[account(
            mut,
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Box<Account<'info, MXEAccount>>,

        #[account(mut)]
        /// CHECK: comp_def_account, checked by arcium program.
        /// Can't check it here as it's not initialized yet.
        pub comp_def_account: UncheckedAccount<'info>,

        pub arcium_program: Program<'info, Arcium>,

        pub system_program: Program<'info, System>,
    }

    #[queue_computation_accounts("create_poll_tally", payer)]
    #[derive(Accounts)]
    #[instruction(computation_offset: u64, poll_id: u64)]
    pub struct CreatePoll<'info> {
        #[account(mut)]
        pub payer: Signer<'info>,

        #[account(
            init_if_needed,
            space = 9,
            payer = payer,
            seeds = [&SIGN_PDA_SEED],
            bump,
            address = derive_sign_pda!(),
        )]
        pub sign_pda_account: Account<'info, SignerAccount>,

        #[account(
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Account<'info, MXEAccount>,

        #[account(
            mut,
            address = derive_mempool_pda!()
        )]
        /// CHECK: mempool_account, checked by the arcium program
        pub mempool_account: UncheckedAccount<'info>,

        #[account(
            mut,
            address = derive_execpool_pda!()
        )]
        /// CHECK: executing_pool, checked by the arcium program
        pub executing_pool: UncheckedAccount<'info>,

        #[account(
            mut,
            address = derive_comp_pda!(computation_offset)
        )]
        /// CHECK: computation_account, checked by the arcium program.
        pub computation_account: UncheckedAccount<'info>,

        #[account(
            address = derive_comp_def_pda!(COMP_DEF_OFFSET_CREATE_POLL_TALLY)
        )]
        pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

        #[account(
            mut,
            address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet)
        )]
        pub cluster_account: Account<'info, Cluster>,

        #[account(
            mut,
            address = ARCIUM_FEE_POOL_ACCOUNT_ADDRESS,
        )]
        pub pool_account: Account<'info, FeePool>,

        #[account(
            address = ARCIUM_CLOCK_ACCOUNT_ADDRESS,
        )]
        pub clock_account: Account<'info, ClockAccount>,

        pub system_program: Program<'info, System>,

        pub arcium_program: Program<'info, Arcium>,

        #[account(
            init,
            payer = payer,
            space = 8 + PollAccount::INIT_SPACE,
            seeds = [POLL_SEED, poll_id.to_le_bytes().as_ref()],
            bump,
        )]
        pub poll_account: Account<'info, PollAccount>,
    }

    #[callback_accounts("create_poll_tally")]
    #[derive(Accounts)]
    pub struct CreatePollTallyCallback<'info> {
        pub arcium_program: Program<'info, Arcium>,

        #[account(
            address = derive_comp_def_pda!(COMP_DEF_OFFSET_CREATE_POLL_TALLY)
        )]
        pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

        #[account(address = ::anchor_lang::solana_program::sysvar::instructions::ID)]
        /// CHECK: instructions_sysvar, checked by the account constraint
        pub instructions_sysvar: AccountInfo<'info>,

        /// CHECK: poll_account, checked by the callback account key passed in queue_computation
        #[account(mut)]
        pub poll_account: Account<'info, PollAccount>,
    }

    #[queue_computation_accounts("cast_ballot", payer)]
    #[derive(Accounts)]
    #[instruction(computation_offset: u64, poll_id: u64)]
    pub struct CastBallot<'info> {
        #[account(mut)]
        pub payer: Signer<'info>,

        #[account(
            init_if_needed,
            space = 9,
            payer = payer,
            seeds = [&SIGN_PDA_SEED],
            bump,
            address = derive_sign_pda!(),
        )]
        pub sign_pda_account: Account<'info, SignerAccount>,

        #[account(
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Account<'info, MXEAccount>,

        #[account(
            mut,
            address = derive_mempool_pda!()
        )]
        /// CHECK: mempool_account, checked by the arcium program
        pub mempool_account: UncheckedAccount<'info>,

        #[account(
            mut,
            address = derive_execpool_pda!()
        )]
        /// CHECK: executing_pool, checked by the arcium program
        pub executing_pool: UncheckedAccount<'info>,

        #[account(
            mut,
            address = derive_comp_pda!(computation_offset)
        )]
        /// CHECK: computation_account, checked by the arcium program.
        pub computation_account: UncheckedAccount<'info>,

        #[account(
            address = derive_comp_def_pda!(COMP_DEF_OFFSET_CAST_BALLOT)
        )]
        pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

        #[account(
            mut,
            address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet)
        )]
        pub cluster_account: Account<'info, Cluster>,

        #[account(
            mut,
            address = ARCIUM_FEE_POOL_ACCOUNT_ADDRESS,
        )]
        pub pool_account: Account<'info, FeePool>,

        #[account(
            address = ARCIUM_CLOCK_ACCOUNT_ADDRESS,
        )]
        pub clock_account: Account<'info, ClockAccount>,

        pub system_program: Program<'info, System>,

        pub arcium_program: Program<'info, Arcium>,

        #[account(
            mut,
            seeds = [POLL_SEED, poll_id.to_le_bytes().as_ref()],
            bump = poll_account.bump,
        )]
        pub poll_account: Account<'info, PollAccount>,
    }

    #[callback_accounts("cast_ballot")]
    #[derive(Accounts)]
    pub struct CastBallotCallback<'info> {
        pub arcium_program: Program<'info, Arcium>,

        #[account(
            address = derive_comp_def_pda!(COMP_DEF_OFFSET_CAST_BALLOT)
        )]
        pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

        #[account(address = ::anchor_lang::solana_program::sysvar::instructions::ID)]
        /// CHECK: instructions_sysvar, checked by the account constraint
        pub instructions_sysvar: AccountInfo<'info>,

        #[account(mut)]
        pub poll_account: Account<'info, PollAccount>,
    }

    #[queue_computation_accounts("reveal_poll_result", payer)]
    #[derive(Accounts)]
    #[instruction(computation_offset: u64, poll_id: u64)]
    pub struct RevealPoll<'info> {
        #[account(mut)]
        pub payer: Signer<'info>,

        #[account(
            init_if_needed,
            space = 9,
            payer = payer,
            seeds = [&SIGN_PDA_SEED],
            bump,
            address = derive_sign_pda!(),
        )]
        pub sign_pda_account: Account<'info, SignerAccount>,

        #[account(
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Account<'info, MXEAccount>,

        #[account(
            mut,
            address = derive_mempool_pda!()
        )]
        /// CHECK: mempool_account, checked by the arcium program
        pub mempool_account: UncheckedAccount<'info>,

        #[account(
            mut,
            address = derive_execpool_pda!()
        )]
        /// CHECK: executing_pool, checked by the arcium program
        pub executing_pool: UncheckedAccount<'info>,

        #[account(
            mut,
            address = derive_comp_pda!(computation_offset)
        )]
        /// CHECK: computation_account, checked by the arcium program.
        pub computation_account: UncheckedAccount<'info>,

        #[account(
            address = derive_comp_def_pda!(COMP_DEF_OFFSET_REVEAL_POLL_RESULT)
        )]
        pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

        #[account(
            mut,
            address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet)
        )]
        pub cluster_account: Account<'info, Cluster>,

        #[account(
            mut,
            address = ARCIUM_FEE_POOL_ACCOUNT_ADDRESS,
        )]
        pub pool_account: Account<'info, FeePool>,

        #[account(
            address = ARCIUM_CLOCK_ACCOUNT_ADDRESS,
        )]
        pub clock_account: Account<'info, ClockAccount>,

        pub system_program: Program<'info, System>,

        pub arcium_program: Program<'info, Arcium>,

        #[account(
            mut,
            seeds = [POLL_SEED, poll_id.to_le_bytes().as_ref()],
            bump = poll_account.bump,
        )]
        pub poll_account: Account<'info, PollAccount>,
    }

    #[callback_accounts("reveal_poll_result")]
    #[derive(Accounts)]
    pub struct RevealPollResultCallback<'info> {
        pub arcium_program: Program<'info, Arcium>,

        #[account(
            address = derive_comp_def_pda!(COMP_DEF_OFFSET_REVEAL_POLL_RESULT)
        )]
        pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

        #[account(address = ::anchor_lang::solana_program::sysvar::instructions::ID)]
        /// CHECK: instructions_sysvar, checked by the account constraint
        pub instructions_sysvar: AccountInfo<'info>,

        #[account(mut)]
        pub poll_account: Account<'info, PollAccount>,
    }

    // ---- Post feedback accounts ----

    #[init_computation_definition_accounts("create_feedback_stats", payer)]
    #[derive(Accounts)]
    pub struct InitCreateFeedbackStatsCompDef<'info> {
        #[account(mut)]
        pub payer: Signer<'info>,

        #[account(
            mut,
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Box<Account<'info, MXEAccount>>,

        #[account(mut)]
        /// CHECK: comp_def_account, checked by arcium program.
        /// Can't check it here as it's not initialized yet.
        pub comp_def_account: UncheckedAccount<'info>,

        pub arcium_program: Program<'info, Arcium>,

        pub system_program: Program<'info, System>,
    }

    #[init_computation_definition_accounts("submit_feedback", payer)]
    #[derive(Accounts)]
    pub struct InitSubmitFeedbackCompDef<'info> {
        #[account(mut)]
        pub payer: Signer<'info>,

        #[account(
            mut,
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Box<Account<'info, MXEAccount>>,

        #[account(mut)]
        /// CHECK: comp_def_account, checked by arcium program.
        /// Can't check it here as it's not initialized yet.
        pub comp_def_account: UncheckedAccount<'info>,

        pub arcium_program: Program<'info, Arcium>,

        pub system_program: Program<'info, System>,
    }

    #[init_computation_definition_accounts("reveal_feedback_stats", payer)]
    #[derive(Accounts)]
    pub struct InitRevealFeedbackStatsCompDef<'info> {
        #[account(mut)]
        pub payer: Signer<'info>,

        #[account(
            mut,
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Box<Account<'info, MXEAccount>>,

        #[account(mut)]
        /// CHECK: comp_def_account, checked by arcium program.
        /// Can't check it here as it's not initialized yet.
        pub comp_def_account: UncheckedAccount<'info>,

        pub arcium_program: Program<'info, Arcium>,

        pub system_program: Program<'info, System>,
    }

    #[queue_computation_accounts("create_feedback_stats", payer)]
    #[derive(Accounts)]
    #[instruction(computation_offset: u64, post_id: u64)]
    pub struct CreatePost<'info> {
        #[account(mut)]
        pub payer: Signer<'info>,

        #[account(
            init_if_needed,
            space = 9,
            payer = payer,
            seeds = [&SIGN_PDA_SEED],
            bump,
            address = derive_sign_pda!(),
        )]
        pub sign_pda_account: Account<'info, SignerAccount>,

        #[account(
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Account<'info, MXEAccount>,

        #[account(
            mut,
            address = derive_mempool_pda!()
        )]
        /// CHECK: mempool_account, checked by the arcium program
        pub mempool_account: UncheckedAccount<'info>,

        #[account(
            mut,
            address = derive_execpool_pda!()
        )]
        /// CHECK: executing_pool, checked by the arcium program
        pub executing_pool: UncheckedAccount<'info>,

        #[account(
            mut,
            address = derive_comp_pda!(computation_offset)
        )]
        /// CHECK: computation_account, checked by the arcium program.
        pub computation_account: UncheckedAccount<'info>,

        #[account(
            address = derive_comp_def_pda!(COMP_DEF_OFFSET_CREATE_FEEDBACK_STATS)
        )]
        pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

        #[account(
            mut,
            address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet)
        )]
        pub cluster_account: Account<'info, Cluster>,

        #[account(
            mut,
            address = ARCIUM_FEE_POOL_ACCOUNT_ADDRESS,
        )]
        pub pool_account: Account<'info, FeePool>,

        #[account(
            address = ARCIUM_CLOCK_ACCOUNT_ADDRESS,
        )]
        pub clock_account: Account<'info, ClockAccount>,

        pub system_program: Program<'info, System>,

        pub arcium_program: Program<'info, Arcium>,

        #[account(
            init,
            payer = payer,
            space = 8 + PostAccount::INIT_SPACE,
            seeds = [POST_SEED, post_id.to_le_bytes().as_ref()],
            bump,
        )]
        pub post_account: Account<'info, PostAccount>,
    }

    #[callback_accounts("create_feedback_stats")]
    #[derive(Accounts)]
    pub struct CreateFeedbackStatsCallback<'info> {
        pub arcium_program: Program<'info, Arcium>,

        #[account(
            address = derive_comp_def_pda!(COMP_DEF_OFFSET_CREATE_FEEDBACK_STATS)
        )]
        pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

        #[account(address = ::anchor_lang::solana_program::sysvar::instructions::ID)]
        /// CHECK: instructions_sysvar, checked by the account constraint
        pub instructions_sysvar: AccountInfo<'info>,

        /// CHECK: post_account, checked by the callback account key passed in queue_computation
        #[account(mut)]
        pub post_account: Account<'info, PostAccount>,
    }

    #[queue_computation_accounts("submit_feedback", payer)]
    #[derive(Accounts)]
    #[instruction(computation_offset: u64, post_id: u64)]
    pub struct SubmitFeedback<'info> {
        #[account(mut)]
        pub payer: Signer<'info>,

        #[account(
            init_if_needed,
            space = 9,
            payer = payer,
            seeds = [&SIGN_PDA_SEED],
            bump,
            address = derive_sign_pda!(),
        )]
        pub sign_pda_account: Account<'info, SignerAccount>,

        #[account(
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Account<'info, MXEAccount>,

        #[account(
            mut,
            address = derive_mempool_pda!()
        )]
        /// CHECK: mempool_account, checked by the arcium program
        pub mempool_account: UncheckedAccount<'info>,

        #[account(
            mut,
            address = derive_execpool_pda!()
        )]
        /// CHECK: executing_pool, checked by the arcium program
        pub executing_pool: UncheckedAccount<'info>,

        #[account(
            mut,
            address = derive_comp_pda!(computation_offset)
        )]
        /// CHECK: computation_account, checked by the arcium program.
        pub computation_account: UncheckedAccount<'info>,

        #[account(
            address = derive_comp_def_pda!(COMP_DEF_OFFSET_SUBMIT_FEEDBACK)
        )]
        pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

        #[account(
            mut,
            address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet)
        )]
        pub cluster_account: Account<'info, Cluster>,

        #[account(
            mut,
            address = ARCIUM_FEE_POOL_ACCOUNT_ADDRESS,
        )]
        pub pool_account: Account<'info, FeePool>,

        #[account(
            address = ARCIUM_CLOCK_ACCOUNT_ADDRESS,
        )]
        pub clock_account: Account<'info, ClockAccount>,

        pub system_program: Program<'info, System>,

        pub arcium_program: Program<'info, Arcium>,

        #[account(
            mut,
            seeds = [POST_SEED, post_id.to_le_bytes().as_ref()],
            bump = post_account.bump,
        )]
        pub post_account: Account<'info, PostAccount>,
    }

    #[callback_accounts("submit_feedback")]
    #[derive(Accounts)]
    pub struct SubmitFeedbackCallback<'info> {
        pub arcium_program: Program<'info, Arcium>,

        #[account(
            address = derive_comp_def_pda!(COMP_DEF_OFFSET_SUBMIT_FEEDBACK)
        )]
        pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

        #[account(address = ::anchor_lang::solana_program::sysvar::instructions::ID)]
        /// CHECK: instructions_sysvar, checked by the account constraint
        pub instructions_sysvar: AccountInfo<'info>,

        #[account(mut)]
        pub post_account: Account<'info, PostAccount>,
    }

    #[queue_computation_accounts("reveal_feedback_stats", payer)]
    #[derive(Accounts)]
    #[instruction(computation_offset: u64, post_id: u64)]
    pub struct RevealFeedback<'info> {
        #[account(mut)]
        pub payer: Signer<'info>,

        #[account(
            init_if_needed,
            space = 9,
            payer = payer,
            seeds = [&SIGN_PDA_SEED],
            bump,
            address = derive_sign_pda!(),
        )]
        pub sign_pda_account: Account<'info, SignerAccount>,

        #[account(
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Account<'info, MXEAccount>,

        #[account(
            mut,
            address = derive_mempool_pda!()
        )]
        /// CHECK: mempool_account, checked by the arcium program
        pub mempool_account: UncheckedAccount<'info>,

        #[account(
            mut,
            address = derive_execpool_pda!()
        )]
        /// CHECK: executing_pool, checked by the arcium program
        pub executing_pool: UncheckedAccount<'info>,

        #[account(
            mut,
            address = derive_comp_pda!(computation_offset)
        )]
        /// CHECK: computation_account, checked by the arcium program.
        pub computation_account: UncheckedAccount<'info>,

        #[account(
            address = derive_comp_def_pda!(COMP_DEF_OFFSET_REVEAL_FEEDBACK_STATS)
        )]
        pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

        #[account(
            mut,
            address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet)
        )]
        pub cluster_account: Account<'info, Cluster>,

        #[account(
            mut,
            address = ARCIUM_FEE_POOL_ACCOUNT_ADDRESS,
        )]
        pub pool_account: Account<'info, FeePool>,

        #[account(
            address = ARCIUM_CLOCK_ACCOUNT_ADDRESS,
        )]
        pub clock_account: Account<'info, ClockAccount>,

        pub system_program: Program<'info, System>,

        pub arcium_program: Program<'info, Arcium>,

        #[account(
            mut,
            seeds = [POST_SEED, post_id.to_le_bytes().as_ref()],
            bump = post_account.bump,
        )]
        pub post_account: Account<'info, PostAccount>,
    }

    #[callback_accounts("reveal_feedback_stats")]
    #[derive(Accounts)]
    pub struct RevealFeedbackStatsCallback<'info> {
        pub arcium_program: Program<'info, Arcium>,

        #[account(
            address = derive_comp_def_pda!(COMP_DEF_OFFSET_REVEAL_FEEDBACK_STATS)
        )]
        pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

        #[account(address = ::anchor_lang::solana_program::sysvar::instructions::ID)]
        /// CHECK: instructions_sysvar, checked by the account constraint
        pub instructions_sysvar: AccountInfo<'info>,

        #[account(mut)]
        pub post_account: Account<'info, PostAccount>,
    }
}

pub use opinion_mpc::{
    CastBallot, CastBallotCallback, CastBallotOutput, CreatePoll, CreatePollTallyCallback,
    CreatePollTallyOutput, CreatePost, CreateFeedbackStatsCallback, CreateFeedbackStatsOutput,
    CreateSurvey, CreateSurveyStatsCallback, CreateSurveyStatsOutput, InitCastBallotCompDef,
    InitCreateFeedbackStatsCompDef, InitCreatePollTallyCompDef, InitCreateSurveyStatsCompDef,
    InitRevealFeedbackStatsCompDef, InitRevealPollResultCompDef, InitRevealSurveyStatsCompDef,
    InitSubmitFeedbackCompDef, InitSubmitRatingCompDef, RevealFeedback,
    RevealFeedbackStatsCallback, RevealFeedbackStatsOutput, RevealPoll, RevealPollResultCallback,
    RevealPollResultOutput, RevealSurvey, RevealSurveyStatsCallback, RevealSurveyStatsOutput,
    SubmitFeedback, SubmitFeedbackCallback, SubmitFeedbackOutput, SubmitRating,
    SubmitRatingCallback, SubmitRatingOutput,
};
