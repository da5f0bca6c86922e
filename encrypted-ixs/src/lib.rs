use arcis_imports::*;

#[encrypted]
mod circuits {
    use arcis_imports::*;

    /// Aggregate state for a survey: response count, running rating sum,
    /// and one bucket per rating value 1..=5.
    pub struct SurveyStats {
        responses: u32,
        rating_sum: u32,
        buckets: [u32; 5],
    }

    /// A single encrypted survey response.
    pub struct RatingSubmission {
        rating: u8,
    }

    /// Encrypted yes/no tallies for a poll.
    pub struct PollTally {
        yes: u64,
        no: u64,
    }

    /// A single encrypted ballot.
    pub struct BallotChoice {
        choice: bool,
    }

    /// Aggregate feedback state for an opinion post. Same shape as
    /// SurveyStats, kept separate so the two domains evolve independently.
    pub struct FeedbackStats {
        responses: u32,
        rating_sum: u32,
        buckets: [u32; 5],
    }

    /// A single encrypted feedback rating on a post.
    pub struct FeedbackSubmission {
        rating: u8,
    }

    /// Creates the zeroed encrypted aggregate state for a new survey.
    ///
    /// The state stays encrypted under the MXE key and is only ever
    /// updated through the `submit_rating` instruction.
    #[instruction]
    pub fn create_survey_stats(mxe: Mxe) -> Enc<Mxe, SurveyStats> {
        let stats = SurveyStats {
            responses: 0,
            rating_sum: 0,
            buckets: [0; 5],
        };
        mxe.from_arcis(stats)
    }

    /// Folds one encrypted rating into the survey aggregates.
    ///
    /// The rating is never revealed; the bucket increment touches every
    /// bucket each call so the update leaks nothing about which one changed.
    #[instruction]
    pub fn submit_rating(
        submission_ctxt: Enc<Shared, RatingSubmission>,
        stats_ctxt: Enc<Mxe, SurveyStats>,
    ) -> Enc<Mxe, SurveyStats> {
        let submission = submission_ctxt.to_arcis();
        let mut stats = stats_ctxt.to_arcis();

        stats.responses += 1;
        stats.rating_sum += submission.rating as u32;

        for i in 0..5 {
            if submission.rating == (i as u8) + 1 {
                stats.buckets[i] += 1;
            }
        }

        stats_ctxt.owner.from_arcis(stats)
    }

    /// Decrypts and returns the survey aggregates. Individual ratings are
    /// gone by this point; only count, sum, and histogram come out.
    #[instruction]
    pub fn reveal_survey_stats(stats_ctxt: Enc<Mxe, SurveyStats>) -> SurveyStats {
        let stats = stats_ctxt.to_arcis();
        stats.reveal()
    }

    /// Creates the zeroed encrypted tally for a new poll.
    #[instruction]
    pub fn create_poll_tally(mxe: Mxe) -> Enc<Mxe, PollTally> {
        let tally = PollTally { yes: 0, no: 0 };
        mxe.from_arcis(tally)
    }

    /// Adds one encrypted ballot to the running tally without revealing
    /// which way it went.
    #[instruction]
    pub fn cast_ballot(
        ballot_ctxt: Enc<Shared, BallotChoice>,
        tally_ctxt: Enc<Mxe, PollTally>,
    ) -> Enc<Mxe, PollTally> {
        let ballot = ballot_ctxt.to_arcis();
        let mut tally = tally_ctxt.to_arcis();

        if ballot.choice {
            tally.yes += 1;
        } else {
            tally.no += 1;
        }

        tally_ctxt.owner.from_arcis(tally)
    }

    /// Reveals the final poll tallies.
    ///
    /// Both counts come out so the program can store and publish the full
    /// outcome; a tie counts as no majority.
    #[instruction]
    pub fn reveal_poll_result(tally_ctxt: Enc<Mxe, PollTally>) -> PollTally {
        let tally = tally_ctxt.to_arcis();
        tally.reveal()
    }

    /// Creates the zeroed encrypted feedback aggregates for a new post.
    #[instruction]
    pub fn create_feedback_stats(mxe: Mxe) -> Enc<Mxe, FeedbackStats> {
        let stats = FeedbackStats {
            responses: 0,
            rating_sum: 0,
            buckets: [0; 5],
        };
        mxe.from_arcis(stats)
    }

    /// Folds one encrypted feedback rating into a post's aggregates.
    #[instruction]
    pub fn submit_feedback(
        submission_ctxt: Enc<Shared, FeedbackSubmission>,
        stats_ctxt: Enc<Mxe, FeedbackStats>,
    ) -> Enc<Mxe, FeedbackStats> {
        let submission = submission_ctxt.to_arcis();
        let mut stats = stats_ctxt.to_arcis();

        stats.responses += 1;
        stats.rating_sum += submission.rating as u32;

        for i in 0..5 {
            if submission.rating == (i as u8) + 1 {
                stats.buckets[i] += 1;
            }
        }

        stats_ctxt.owner.from_arcis(stats)
    }

    /// Decrypts and returns a post's feedback aggregates.
    #[instruction]
    pub fn reveal_feedback_stats(stats_ctxt: Enc<Mxe, FeedbackStats>) -> FeedbackStats {
        let stats = stats_ctxt.to_arcis();
        stats.reveal()
    }
}
