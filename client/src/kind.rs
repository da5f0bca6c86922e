//! The nine computation kinds: three operations across three domains.

use std::fmt;

/// Which step of a record's lifecycle a computation performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Create the record and its encrypted aggregate state.
    InitStats,
    /// Fold one encrypted response into the aggregates.
    SubmitResponse,
    /// Decrypt and publish the aggregates.
    Reveal,
}

/// Which record family a computation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    /// Surveys collecting 1-5 ratings.
    Opinion,
    /// Yes/no polls.
    Vote,
    /// 1-5 feedback ratings on opinion posts.
    Feedback,
}

impl Domain {
    /// PDA seed prefix of the domain's records. Must match the program.
    pub fn record_seed(&self) -> &'static [u8] {
        match self {
            Domain::Opinion => b"survey",
            Domain::Vote => b"poll",
            Domain::Feedback => b"post",
        }
    }

    /// Name of the on-ledger account type, used for discriminator checks.
    pub fn account_name(&self) -> &'static str {
        match self {
            Domain::Opinion => "SurveyAccount",
            Domain::Vote => "PollAccount",
            Domain::Feedback => "PostAccount",
        }
    }
}

/// One concrete computation kind; identifies the computation-definition
/// record and the circuit a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComputationKind {
    pub operation: Operation,
    pub domain: Domain,
}

impl ComputationKind {
    pub const fn new(operation: Operation, domain: Domain) -> Self {
        Self { operation, domain }
    }

    /// All nine kinds, in bootstrap order.
    pub const ALL: [ComputationKind; 9] = [
        Self::new(Operation::InitStats, Domain::Opinion),
        Self::new(Operation::SubmitResponse, Domain::Opinion),
        Self::new(Operation::Reveal, Domain::Opinion),
        Self::new(Operation::InitStats, Domain::Vote),
        Self::new(Operation::SubmitResponse, Domain::Vote),
        Self::new(Operation::Reveal, Domain::Vote),
        Self::new(Operation::InitStats, Domain::Feedback),
        Self::new(Operation::SubmitResponse, Domain::Feedback),
        Self::new(Operation::Reveal, Domain::Feedback),
    ];

    /// Circuit name; the computation-definition offset is derived from it.
    pub fn circuit_name(&self) -> &'static str {
        use Domain::*;
        use Operation::*;
        match (self.operation, self.domain) {
            (InitStats, Opinion) => "create_survey_stats",
            (SubmitResponse, Opinion) => "submit_rating",
            (Reveal, Opinion) => "reveal_survey_stats",
            (InitStats, Vote) => "create_poll_tally",
            (SubmitResponse, Vote) => "cast_ballot",
            (Reveal, Vote) => "reveal_poll_result",
            (InitStats, Feedback) => "create_feedback_stats",
            (SubmitResponse, Feedback) => "submit_feedback",
            (Reveal, Feedback) => "reveal_feedback_stats",
        }
    }

    /// Program instruction that requests this computation.
    pub fn instruction_name(&self) -> &'static str {
        use Domain::*;
        use Operation::*;
        match (self.operation, self.domain) {
            (InitStats, Opinion) => "create_survey",
            (SubmitResponse, Opinion) => "submit_rating",
            (Reveal, Opinion) => "reveal_survey",
            (InitStats, Vote) => "create_poll",
            (SubmitResponse, Vote) => "cast_ballot",
            (Reveal, Vote) => "reveal_poll",
            (InitStats, Feedback) => "create_post",
            (SubmitResponse, Feedback) => "submit_feedback",
            (Reveal, Feedback) => "reveal_feedback",
        }
    }

    /// Program instruction that registers this kind's computation
    /// definition.
    pub fn comp_def_instruction_name(&self) -> &'static str {
        use Domain::*;
        use Operation::*;
        match (self.operation, self.domain) {
            (InitStats, Opinion) => "init_create_survey_stats_comp_def",
            (SubmitResponse, Opinion) => "init_submit_rating_comp_def",
            (Reveal, Opinion) => "init_reveal_survey_stats_comp_def",
            (InitStats, Vote) => "init_create_poll_tally_comp_def",
            (SubmitResponse, Vote) => "init_cast_ballot_comp_def",
            (Reveal, Vote) => "init_reveal_poll_result_comp_def",
            (InitStats, Feedback) => "init_create_feedback_stats_comp_def",
            (SubmitResponse, Feedback) => "init_submit_feedback_comp_def",
            (Reveal, Feedback) => "init_reveal_feedback_stats_comp_def",
        }
    }
}

impl fmt::Display for ComputationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.circuit_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn all_kinds_have_distinct_circuits() {
        let names: HashSet<_> = ComputationKind::ALL.iter().map(|k| k.circuit_name()).collect();
        assert_eq!(names.len(), 9);
    }

    #[test]
    fn all_kinds_have_distinct_instructions() {
        let names: HashSet<_> = ComputationKind::ALL
            .iter()
            .map(|k| k.comp_def_instruction_name())
            .collect();
        assert_eq!(names.len(), 9);
    }
}
