//! End-to-end lifecycle tests against the in-memory ledger: initialize a
//! record, submit encrypted responses, reveal, and read aggregates back.

use std::sync::Arc;

use opinion_mpc_client::testing::{test_config, MemoryStore, MockLedger};
use opinion_mpc_client::{
    AggregateOutcome, Bootstrapper, ClientConfig, Domain, DomainError, DriveState, Error,
    Orchestrator, ReadOutcome, RecordMetadata, ResponseValue, ResultReader,
};

const CLUSTER_KEY: [u8; 32] = [9u8; 32];

fn setup() -> (ClientConfig, Arc<MockLedger>, Arc<Bootstrapper<MockLedger>>) {
    let config = test_config();
    let ledger = Arc::new(MockLedger::new(config.clone(), CLUSTER_KEY));
    let bootstrap = Arc::new(Bootstrapper::new(config.clone(), ledger.clone()));
    (config, ledger, bootstrap)
}

fn orchestrator(
    config: &ClientConfig,
    ledger: &Arc<MockLedger>,
    bootstrap: &Arc<Bootstrapper<MockLedger>>,
    domain: Domain,
    record_id: u64,
) -> Orchestrator<MockLedger> {
    Orchestrator::new(
        config.clone(),
        ledger.clone(),
        bootstrap.clone(),
        Arc::new(ledger.cluster_cipher()),
        domain,
        record_id,
    )
}

fn survey_metadata() -> RecordMetadata {
    RecordMetadata::Titled {
        title: "Team health".into(),
        content: "How satisfied are you with the current setup?".into(),
        topic: "hr".into(),
    }
}

#[tokio::test]
async fn survey_lifecycle_reveals_exact_aggregates() {
    let (config, ledger, bootstrap) = setup();
    let mut survey = orchestrator(&config, &ledger, &bootstrap, Domain::Opinion, 1001);

    survey.initialize(survey_metadata()).await.unwrap();
    assert_eq!(*survey.state(), DriveState::StatsReady);

    for rating in [5u8, 4, 3, 5, 4] {
        survey
            .submit_response(ResponseValue::Rating(rating))
            .await
            .unwrap();
    }
    assert_eq!(*survey.state(), DriveState::ResponseAccepted(5));

    let outcome = survey.reveal().await.unwrap();
    assert_eq!(*survey.state(), DriveState::Revealed);
    match outcome {
        AggregateOutcome::Ratings(aggregate) => {
            assert_eq!(aggregate.total_responses, 5);
            assert_eq!(aggregate.average_tenths, 42);
            assert!((aggregate.average() - 4.2).abs() < 1e-9);
            assert_eq!(aggregate.distribution, [0, 0, 1, 2, 2]);
            assert_eq!(aggregate.distribution.iter().sum::<u32>(), 5);
        }
        other => panic!("expected rating aggregates, got {other:?}"),
    }
}

#[tokio::test]
async fn poll_lifecycle_reveals_tallies_and_majority() {
    let (config, ledger, bootstrap) = setup();
    let mut poll = orchestrator(&config, &ledger, &bootstrap, Domain::Vote, 7);

    poll.initialize(RecordMetadata::Question(
        "Should we adopt the new process?".into(),
    ))
    .await
    .unwrap();

    for choice in [true, true, false, true] {
        poll.submit_response(ResponseValue::Choice(choice))
            .await
            .unwrap();
    }

    let outcome = poll.reveal().await.unwrap();
    match outcome {
        AggregateOutcome::Ballots(result) => {
            assert_eq!(result.total_votes, 4);
            assert_eq!(result.yes_votes, 3);
            assert_eq!(result.no_votes, 1);
            assert!(result.majority_yes);
        }
        other => panic!("expected ballot outcome, got {other:?}"),
    }
}

#[tokio::test]
async fn feedback_lifecycle_mirrors_survey_shape() {
    let (config, ledger, bootstrap) = setup();
    let mut post = orchestrator(&config, &ledger, &bootstrap, Domain::Feedback, 42);

    post.initialize(survey_metadata()).await.unwrap();
    for rating in [2u8, 4] {
        post.submit_response(ResponseValue::Rating(rating))
            .await
            .unwrap();
    }

    match post.reveal().await.unwrap() {
        AggregateOutcome::Ratings(aggregate) => {
            assert_eq!(aggregate.total_responses, 2);
            assert_eq!(aggregate.average_tenths, 30);
            assert_eq!(aggregate.distribution, [0, 1, 0, 1, 0]);
        }
        other => panic!("expected rating aggregates, got {other:?}"),
    }
}

#[tokio::test]
async fn out_of_range_rating_is_rejected_without_a_network_call() {
    let (config, ledger, bootstrap) = setup();
    let mut survey = orchestrator(&config, &ledger, &bootstrap, Domain::Opinion, 2);
    survey.initialize(survey_metadata()).await.unwrap();

    let before = ledger.transactions_submitted();
    for bad in [0u8, 6] {
        let err = survey
            .submit_response(ResponseValue::Rating(bad))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Domain(DomainError::RatingOutOfRange(value)) if value == bad
        ));
    }
    assert_eq!(ledger.transactions_submitted(), before);
    assert_eq!(*survey.state(), DriveState::StatsReady);
}

#[tokio::test]
async fn reveal_is_rejected_before_initialization_without_a_network_call() {
    let (config, ledger, bootstrap) = setup();
    let mut survey = orchestrator(&config, &ledger, &bootstrap, Domain::Opinion, 3);

    let before = ledger.transactions_submitted();
    let err = survey.reveal().await.unwrap_err();
    assert!(matches!(err, Error::InvalidState { .. }));
    assert_eq!(ledger.transactions_submitted(), before);
    assert_eq!(*survey.state(), DriveState::Uninitialized);
}

#[tokio::test]
async fn reveal_requires_at_least_one_response() {
    let (config, ledger, bootstrap) = setup();
    let mut survey = orchestrator(&config, &ledger, &bootstrap, Domain::Opinion, 4);
    survey.initialize(survey_metadata()).await.unwrap();

    let err = survey.reveal().await.unwrap_err();
    assert!(matches!(err, Error::InvalidState { .. }));
    assert_eq!(*survey.state(), DriveState::StatsReady);
}

#[tokio::test]
async fn offset_collision_is_retried_once_and_succeeds() {
    let (config, ledger, bootstrap) = setup();
    let mut survey = orchestrator(&config, &ledger, &bootstrap, Domain::Opinion, 5);
    survey.initialize(survey_metadata()).await.unwrap();
    // First submission also bootstraps the submit computation definition.
    survey
        .submit_response(ResponseValue::Rating(1))
        .await
        .unwrap();

    let before = ledger.transactions_submitted();
    ledger.force_collisions(1);
    survey
        .submit_response(ResponseValue::Rating(4))
        .await
        .unwrap();
    // One rejected attempt plus the retry.
    assert_eq!(ledger.transactions_submitted(), before + 2);
    assert_eq!(*survey.state(), DriveState::ResponseAccepted(2));
}

#[tokio::test]
async fn persistent_collision_surfaces_after_the_single_retry() {
    let (config, ledger, bootstrap) = setup();
    let mut survey = orchestrator(&config, &ledger, &bootstrap, Domain::Opinion, 6);
    survey.initialize(survey_metadata()).await.unwrap();
    survey
        .submit_response(ResponseValue::Rating(5))
        .await
        .unwrap();

    ledger.force_collisions(2);
    let err = survey
        .submit_response(ResponseValue::Rating(5))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::AddressCollision));
    // The record is untouched; the state rolls back and a later attempt
    // goes through.
    assert_eq!(*survey.state(), DriveState::ResponseAccepted(1));
    survey
        .submit_response(ResponseValue::Rating(5))
        .await
        .unwrap();
    assert_eq!(*survey.state(), DriveState::ResponseAccepted(2));
}

#[tokio::test]
async fn finalization_timeout_is_recoverable_by_repolling() {
    let (config, ledger, bootstrap) = setup();
    let mut survey = orchestrator(&config, &ledger, &bootstrap, Domain::Opinion, 8);
    survey.initialize(survey_metadata()).await.unwrap();
    survey
        .submit_response(ResponseValue::Rating(3))
        .await
        .unwrap();

    ledger.set_never_finalize(true);
    let err = survey.reveal().await.unwrap_err();
    assert!(matches!(err, Error::FinalizationTimeout { .. }));
    assert_eq!(*survey.state(), DriveState::Revealing);

    // The computation completes out-of-band; a later poll observes it.
    ledger.set_never_finalize(false);
    let outcome = survey.wait_for_aggregates().await.unwrap();
    assert!(matches!(outcome, AggregateOutcome::Ratings(_)));
    assert_eq!(*survey.state(), DriveState::Revealed);
}

#[tokio::test]
async fn reader_reports_pending_until_reveal_lands() {
    let (config, ledger, bootstrap) = setup();
    let reader = ResultReader::new(config.clone(), ledger.clone());

    assert_eq!(
        reader.read(Domain::Opinion, 9).await.unwrap(),
        ReadOutcome::NotFound
    );

    let mut survey = orchestrator(&config, &ledger, &bootstrap, Domain::Opinion, 9);
    survey.initialize(survey_metadata()).await.unwrap();
    survey
        .submit_response(ResponseValue::Rating(2))
        .await
        .unwrap();

    assert_eq!(
        reader.read(Domain::Opinion, 9).await.unwrap(),
        ReadOutcome::Pending { responses: 1 }
    );

    survey.reveal().await.unwrap();
    assert!(matches!(
        reader.read(Domain::Opinion, 9).await.unwrap(),
        ReadOutcome::Revealed(_)
    ));
}

#[tokio::test]
async fn reader_enumerates_records_by_discriminator() {
    let (config, ledger, bootstrap) = setup();
    for id in [21u64, 22, 23] {
        let mut survey = orchestrator(&config, &ledger, &bootstrap, Domain::Opinion, id);
        survey.initialize(survey_metadata()).await.unwrap();
    }
    // A poll in the same program must not show up in the survey listing.
    let mut poll = orchestrator(&config, &ledger, &bootstrap, Domain::Vote, 24);
    poll.initialize(RecordMetadata::Question("ship it?".into()))
        .await
        .unwrap();

    let reader = ResultReader::new(config.clone(), ledger.clone());
    let surveys = reader.list(Domain::Opinion).await.unwrap();
    let mut ids: Vec<u64> = surveys.iter().map(|summary| summary.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![21, 22, 23]);
    assert!(surveys.iter().all(|summary| !summary.revealed));

    let polls = reader.list(Domain::Vote).await.unwrap();
    assert_eq!(polls.len(), 1);
    assert_eq!(polls[0].id, 24);
}

#[tokio::test]
async fn oversized_content_spills_to_the_blob_store() {
    let (config, ledger, bootstrap) = setup();
    let store = Arc::new(MemoryStore::new());
    let mut post = orchestrator(&config, &ledger, &bootstrap, Domain::Feedback, 30)
        .with_content_store(store.clone());

    post.initialize(RecordMetadata::Titled {
        title: "Long read".into(),
        content: "x".repeat(500),
        topic: "eng".into(),
    })
    .await
    .unwrap();
    assert_eq!(*post.state(), DriveState::StatsReady);
}

#[tokio::test]
async fn oversized_content_without_a_store_fails_locally() {
    let (config, ledger, bootstrap) = setup();
    let mut post = orchestrator(&config, &ledger, &bootstrap, Domain::Feedback, 31);

    let before = ledger.transactions_submitted();
    let err = post
        .initialize(RecordMetadata::Titled {
            title: "Long read".into(),
            content: "x".repeat(500),
            topic: "eng".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Domain(DomainError::TextTooLong { field: "content", .. })
    ));
    assert_eq!(ledger.transactions_submitted(), before);
}

#[tokio::test]
async fn mismatched_metadata_shape_is_a_domain_error() {
    let (config, ledger, bootstrap) = setup();
    let mut poll = orchestrator(&config, &ledger, &bootstrap, Domain::Vote, 32);
    let err = poll.initialize(survey_metadata()).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Domain(DomainError::MetadataMismatch { .. })
    ));
}
