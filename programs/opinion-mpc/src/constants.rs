use arcium_anchor::prelude::*;

// Computation definition offsets, one per encrypted instruction in
// encrypted-ixs/src/lib.rs. Derived from the circuit name, never hand-copied.
pub const COMP_DEF_OFFSET_CREATE_SURVEY_STATS: u32 = comp_def_offset("create_survey_stats");
pub const COMP_DEF_OFFSET_SUBMIT_RATING: u32 = comp_def_offset("submit_rating");
pub const COMP_DEF_OFFSET_REVEAL_SURVEY_STATS: u32 = comp_def_offset("reveal_survey_stats");
pub const COMP_DEF_OFFSET_CREATE_POLL_TALLY: u32 = comp_def_offset("create_poll_tally");
pub const COMP_DEF_OFFSET_CAST_BALLOT: u32 = comp_def_offset("cast_ballot");
pub const COMP_DEF_OFFSET_REVEAL_POLL_RESULT: u32 = comp_def_offset("reveal_poll_result");
pub const COMP_DEF_OFFSET_CREATE_FEEDBACK_STATS: u32 = comp_def_offset("create_feedback_stats");
pub const COMP_DEF_OFFSET_SUBMIT_FEEDBACK: u32 = comp_def_offset("submit_feedback");
pub const COMP_DEF_OFFSET_REVEAL_FEEDBACK_STATS: u32 = comp_def_offset("reveal_feedback_stats");

// PDA seed prefixes for the domain records. The client derives the same
// addresses from (prefix, little-endian id) alone.
pub const SURVEY_SEED: &[u8] = b"survey";
pub const POLL_SEED: &[u8] = b"poll";
pub const POST_SEED: &[u8] = b"post";
