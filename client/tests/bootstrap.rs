//! Bootstrap idempotency: each computation definition is created at most
//! once, no matter how many clients race to create it.

use std::sync::Arc;

use opinion_mpc_client::testing::{test_config, MockLedger};
use opinion_mpc_client::{
    BootstrapState, Bootstrapper, ClientConfig, ComputationKind, Domain, Operation,
};

const CLUSTER_KEY: [u8; 32] = [9u8; 32];

fn setup() -> (ClientConfig, Arc<MockLedger>) {
    let config = test_config();
    let ledger = Arc::new(MockLedger::new(config.clone(), CLUSTER_KEY));
    (config, ledger)
}

#[tokio::test]
async fn ensure_twice_creates_once() {
    let (config, ledger) = setup();
    let bootstrap = Bootstrapper::new(config, ledger.clone());
    let kind = ComputationKind::new(Operation::SubmitResponse, Domain::Opinion);

    assert_eq!(bootstrap.state(kind), BootstrapState::NotRequested);
    bootstrap.ensure(kind).await.unwrap();
    bootstrap.ensure(kind).await.unwrap();

    assert_eq!(bootstrap.state(kind), BootstrapState::Confirmed);
    assert_eq!(ledger.comp_def_creations(), 1);
}

#[tokio::test]
async fn racing_clients_both_confirm_with_one_creation() {
    let (config, ledger) = setup();
    let first = Bootstrapper::new(config.clone(), ledger.clone());
    let second = Bootstrapper::new(config, ledger.clone());
    let kind = ComputationKind::new(Operation::SubmitResponse, Domain::Opinion);

    let (a, b) = tokio::join!(first.ensure(kind), second.ensure(kind));
    a.unwrap();
    b.unwrap();

    assert_eq!(first.state(kind), BootstrapState::Confirmed);
    assert_eq!(second.state(kind), BootstrapState::Confirmed);
    assert_eq!(ledger.comp_def_creations(), 1);
}

#[tokio::test]
async fn late_client_confirms_from_the_ledger_without_a_transaction() {
    let (config, ledger) = setup();
    let first = Bootstrapper::new(config.clone(), ledger.clone());
    let kind = ComputationKind::new(Operation::Reveal, Domain::Vote);
    first.ensure(kind).await.unwrap();

    let submitted = ledger.transactions_submitted();
    let late = Bootstrapper::new(config, ledger.clone());
    late.ensure(kind).await.unwrap();

    assert_eq!(late.state(kind), BootstrapState::Confirmed);
    assert_eq!(ledger.transactions_submitted(), submitted);
}

#[tokio::test]
async fn ensure_all_registers_every_kind_once() {
    let (config, ledger) = setup();
    let bootstrap = Bootstrapper::new(config, ledger.clone());

    bootstrap.ensure_all().await.unwrap();
    assert_eq!(ledger.comp_def_creations(), 9);
    for kind in ComputationKind::ALL {
        assert_eq!(bootstrap.state(kind), BootstrapState::Confirmed);
    }

    bootstrap.ensure_all().await.unwrap();
    assert_eq!(ledger.comp_def_creations(), 9);
}
