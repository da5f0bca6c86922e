use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("The computation was aborted by the cluster")]
    AbortedComputation,
    #[msg("Cluster not set")]
    ClusterNotSet,
    #[msg("Only the record owner may reveal aggregates")]
    InvalidAuthority,
    #[msg("Cannot reveal a record with no accepted responses")]
    NoResponses,
    #[msg("Aggregates for this record were already revealed")]
    AlreadyRevealed,
}
