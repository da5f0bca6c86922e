//! Read-side parsing of ledger-resident domain records.
//!
//! Records are parsed directly from raw account bytes at fixed offsets;
//! the layouts here mirror the program's account declarations field for
//! field. Reads never mutate and are safe to repeat concurrently, which is
//! what UI polling does.

use std::sync::Arc;

use anchor_lang::prelude::Pubkey;

use crate::config::ClientConfig;
use crate::derive;
use crate::error::Error;
use crate::instructions::account_discriminator;
use crate::kind::Domain;
use crate::ledger::Ledger;

// Survey/post record layout (identical shapes).
pub(crate) const TITLED_ID_OFFSET: usize = 8;
pub(crate) const TITLED_OWNER_OFFSET: usize = 192;
pub(crate) const TITLED_CREATED_OFFSET: usize = 224;
pub(crate) const TITLED_COUNTER_OFFSET: usize = 232;
pub(crate) const TITLED_AVERAGE_OFFSET: usize = 236;
pub(crate) const TITLED_BUCKETS_OFFSET: usize = 240;
pub(crate) const TITLED_REVEALED_OFFSET: usize = 260;
pub(crate) const TITLED_RECORD_LEN: usize = 502;

// Poll record layout.
pub(crate) const POLL_ID_OFFSET: usize = 8;
pub(crate) const POLL_OWNER_OFFSET: usize = 80;
pub(crate) const POLL_CREATED_OFFSET: usize = 112;
pub(crate) const POLL_COUNTER_OFFSET: usize = 120;
pub(crate) const POLL_YES_OFFSET: usize = 124;
pub(crate) const POLL_NO_OFFSET: usize = 128;
pub(crate) const POLL_MAJORITY_OFFSET: usize = 132;
pub(crate) const POLL_REVEALED_OFFSET: usize = 133;
pub(crate) const POLL_RECORD_LEN: usize = 215;

/// Revealed aggregates of a rating record (survey or post).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingAggregate {
    pub total_responses: u32,
    /// Mean rating in tenths: 42 means 4.2.
    pub average_tenths: u32,
    /// Response counts per rating value 1..=5.
    pub distribution: [u32; 5],
}

impl RatingAggregate {
    /// Mean rating as a float, at the encoding's 0.1 precision.
    pub fn average(&self) -> f64 {
        f64::from(self.average_tenths) / 10.0
    }
}

/// Revealed outcome of a poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOutcome {
    pub total_votes: u32,
    pub yes_votes: u32,
    pub no_votes: u32,
    pub majority_yes: bool,
}

/// Revealed aggregates, by domain shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateOutcome {
    Ratings(RatingAggregate),
    Ballots(PollOutcome),
}

/// Result of one read. `Pending` and `NotFound` are states, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// No record at the derived address.
    NotFound,
    /// The record exists but its aggregates are still sealed.
    Pending { responses: u32 },
    /// Aggregates have been written back by the cluster.
    Revealed(AggregateOutcome),
}

/// One row of a record enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSummary {
    pub address: Pubkey,
    pub id: u64,
    pub owner: Pubkey,
    pub created_at: i64,
    pub responses: u32,
    pub revealed: bool,
}

/// Parses domain records out of raw account bytes.
pub struct ResultReader<L> {
    config: ClientConfig,
    ledger: Arc<L>,
}

impl<L: Ledger> ResultReader<L> {
    pub fn new(config: ClientConfig, ledger: Arc<L>) -> Self {
        Self { config, ledger }
    }

    /// Reads the record identified by `id` in `domain`.
    pub async fn read(&self, domain: Domain, id: u64) -> Result<ReadOutcome, Error> {
        let address = derive::record_address(&self.config, domain, id)?;
        match self.ledger.get_account(&address).await? {
            None => Ok(ReadOutcome::NotFound),
            Some(bytes) => parse_record(domain, &address, &bytes),
        }
    }

    /// Enumerates all records of `domain` by discriminator prefix.
    pub async fn list(&self, domain: Domain) -> Result<Vec<RecordSummary>, Error> {
        let expected = account_discriminator(domain.account_name());
        let accounts = self.ledger.program_accounts(&self.config.program).await?;
        let mut summaries = Vec::new();
        for (address, bytes) in accounts {
            if bytes.len() < 8 || bytes[..8] != expected {
                continue;
            }
            summaries.push(parse_summary(domain, &address, &bytes)?);
        }
        summaries.sort_by_key(|summary| summary.created_at);
        Ok(summaries)
    }
}

fn malformed(address: &Pubkey, detail: &str) -> Error {
    Error::MalformedRecord {
        address: *address,
        detail: detail.to_string(),
    }
}

fn read_u32(bytes: &[u8], address: &Pubkey, offset: usize) -> Result<u32, Error> {
    let slice = bytes
        .get(offset..offset + 4)
        .ok_or_else(|| malformed(address, "record truncated"))?;
    Ok(u32::from_le_bytes([slice[0], slice[1], slice[2], slice[3]]))
}

fn read_u64(bytes: &[u8], address: &Pubkey, offset: usize) -> Result<u64, Error> {
    let slice = bytes
        .get(offset..offset + 8)
        .ok_or_else(|| malformed(address, "record truncated"))?;
    let mut arr = [0u8; 8];
    arr.copy_from_slice(slice);
    Ok(u64::from_le_bytes(arr))
}

fn read_i64(bytes: &[u8], address: &Pubkey, offset: usize) -> Result<i64, Error> {
    Ok(read_u64(bytes, address, offset)? as i64)
}

fn read_bool(bytes: &[u8], address: &Pubkey, offset: usize) -> Result<bool, Error> {
    bytes
        .get(offset)
        .map(|byte| *byte != 0)
        .ok_or_else(|| malformed(address, "record truncated"))
}

fn read_pubkey(bytes: &[u8], address: &Pubkey, offset: usize) -> Result<Pubkey, Error> {
    let slice = bytes
        .get(offset..offset + 32)
        .ok_or_else(|| malformed(address, "record truncated"))?;
    let mut arr = [0u8; 32];
    arr.copy_from_slice(slice);
    Ok(Pubkey::new_from_array(arr))
}

fn check_discriminator(domain: Domain, address: &Pubkey, bytes: &[u8]) -> Result<(), Error> {
    let expected = account_discriminator(domain.account_name());
    let actual = bytes
        .get(..8)
        .ok_or_else(|| malformed(address, "record shorter than a discriminator"))?;
    if actual != expected {
        return Err(malformed(address, "account discriminator mismatch"));
    }
    Ok(())
}

pub(crate) fn parse_record(
    domain: Domain,
    address: &Pubkey,
    bytes: &[u8],
) -> Result<ReadOutcome, Error> {
    check_discriminator(domain, address, bytes)?;
    match domain {
        Domain::Opinion | Domain::Feedback => {
            let responses = read_u32(bytes, address, TITLED_COUNTER_OFFSET)?;
            if !read_bool(bytes, address, TITLED_REVEALED_OFFSET)? {
                return Ok(ReadOutcome::Pending { responses });
            }
            let mut distribution = [0u32; 5];
            for (i, bucket) in distribution.iter_mut().enumerate() {
                *bucket = read_u32(bytes, address, TITLED_BUCKETS_OFFSET + i * 4)?;
            }
            Ok(ReadOutcome::Revealed(AggregateOutcome::Ratings(
                RatingAggregate {
                    total_responses: responses,
                    average_tenths: read_u32(bytes, address, TITLED_AVERAGE_OFFSET)?,
                    distribution,
                },
            )))
        }
        Domain::Vote => {
            let responses = read_u32(bytes, address, POLL_COUNTER_OFFSET)?;
            if !read_bool(bytes, address, POLL_REVEALED_OFFSET)? {
                return Ok(ReadOutcome::Pending { responses });
            }
            Ok(ReadOutcome::Revealed(AggregateOutcome::Ballots(
                PollOutcome {
                    total_votes: responses,
                    yes_votes: read_u32(bytes, address, POLL_YES_OFFSET)?,
                    no_votes: read_u32(bytes, address, POLL_NO_OFFSET)?,
                    majority_yes: read_bool(bytes, address, POLL_MAJORITY_OFFSET)?,
                },
            )))
        }
    }
}

fn parse_summary(domain: Domain, address: &Pubkey, bytes: &[u8]) -> Result<RecordSummary, Error> {
    match domain {
        Domain::Opinion | Domain::Feedback => Ok(RecordSummary {
            address: *address,
            id: read_u64(bytes, address, TITLED_ID_OFFSET)?,
            owner: read_pubkey(bytes, address, TITLED_OWNER_OFFSET)?,
            created_at: read_i64(bytes, address, TITLED_CREATED_OFFSET)?,
            responses: read_u32(bytes, address, TITLED_COUNTER_OFFSET)?,
            revealed: read_bool(bytes, address, TITLED_REVEALED_OFFSET)?,
        }),
        Domain::Vote => Ok(RecordSummary {
            address: *address,
            id: read_u64(bytes, address, POLL_ID_OFFSET)?,
            owner: read_pubkey(bytes, address, POLL_OWNER_OFFSET)?,
            created_at: read_i64(bytes, address, POLL_CREATED_OFFSET)?,
            responses: read_u32(bytes, address, POLL_COUNTER_OFFSET)?,
            revealed: read_bool(bytes, address, POLL_REVEALED_OFFSET)?,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn survey_fixture(responses: u32, revealed: bool) -> Vec<u8> {
        let mut bytes = vec![0u8; TITLED_RECORD_LEN];
        bytes[..8].copy_from_slice(&account_discriminator("SurveyAccount"));
        bytes[TITLED_ID_OFFSET..TITLED_ID_OFFSET + 8].copy_from_slice(&1001u64.to_le_bytes());
        bytes[TITLED_COUNTER_OFFSET..TITLED_COUNTER_OFFSET + 4]
            .copy_from_slice(&responses.to_le_bytes());
        if revealed {
            bytes[TITLED_AVERAGE_OFFSET..TITLED_AVERAGE_OFFSET + 4]
                .copy_from_slice(&42u32.to_le_bytes());
            let buckets: [u32; 5] = [0, 0, 1, 2, 2];
            for (i, bucket) in buckets.iter().enumerate() {
                let offset = TITLED_BUCKETS_OFFSET + i * 4;
                bytes[offset..offset + 4].copy_from_slice(&bucket.to_le_bytes());
            }
            bytes[TITLED_REVEALED_OFFSET] = 1;
        }
        bytes
    }

    #[test]
    fn pending_record_reports_response_count() {
        let address = Pubkey::new_unique();
        let bytes = survey_fixture(3, false);
        let outcome = parse_record(Domain::Opinion, &address, &bytes).unwrap();
        assert_eq!(outcome, ReadOutcome::Pending { responses: 3 });
    }

    #[test]
    fn revealed_record_parses_aggregates() {
        let address = Pubkey::new_unique();
        let bytes = survey_fixture(5, true);
        let outcome = parse_record(Domain::Opinion, &address, &bytes).unwrap();
        match outcome {
            ReadOutcome::Revealed(AggregateOutcome::Ratings(aggregate)) => {
                assert_eq!(aggregate.total_responses, 5);
                assert_eq!(aggregate.average_tenths, 42);
                assert!((aggregate.average() - 4.2).abs() < f64::EPSILON);
                assert_eq!(aggregate.distribution, [0, 0, 1, 2, 2]);
                assert_eq!(aggregate.distribution.iter().sum::<u32>(), 5);
            }
            other => panic!("expected revealed ratings, got {other:?}"),
        }
    }

    #[test]
    fn wrong_discriminator_is_malformed() {
        let address = Pubkey::new_unique();
        let mut bytes = survey_fixture(1, false);
        bytes[0] ^= 0xFF;
        assert!(matches!(
            parse_record(Domain::Opinion, &address, &bytes),
            Err(Error::MalformedRecord { .. })
        ));
    }

    #[test]
    fn truncated_record_is_malformed() {
        let address = Pubkey::new_unique();
        let mut bytes = survey_fixture(1, false);
        bytes.truncate(100);
        assert!(matches!(
            parse_record(Domain::Opinion, &address, &bytes),
            Err(Error::MalformedRecord { .. })
        ));
    }
}
