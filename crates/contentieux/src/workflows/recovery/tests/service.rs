use super::common::*;
use crate::workflows::recovery::distribution::DistributionError;
use crate::workflows::recovery::domain::{PaymentId, PaymentStatus};
use crate::workflows::recovery::ledger::{Destination, DistributionLedger, LedgerError, PoolKind};
use crate::workflows::recovery::resolver::ResolutionError;
use crate::workflows::recovery::service::RecoveryServiceError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn settle_rejects_non_validated_payments() {
    let (service, directory, _registry, _ledger, _audit) = build_service();
    seed_standard_case(&directory);

    let mut pending = payment("enc-001", dec!(5_000), date(2024, 2, 1));
    pending.status = PaymentStatus::Pending;

    match service.settle(&pending) {
        Err(RecoveryServiceError::PaymentNotValidated { payment_id, status }) => {
            assert_eq!(payment_id.0, "enc-001");
            assert_eq!(status, PaymentStatus::Pending);
        }
        other => panic!("expected PaymentNotValidated, got {other:?}"),
    }
}

#[test]
fn settle_records_ledger_and_publishes_audit_trail() {
    let (service, directory, registry, ledger, audit) = build_service();
    seed_standard_case(&directory);
    registry.appoint(dg_window(date(2024, 1, 1), None));

    let paid = payment("enc-001", dec!(1_000_000), date(2024, 2, 10));
    let result = service.settle(&paid).expect("settles");

    let stored = ledger
        .fetch(&paid.id)
        .expect("ledger reachable")
        .expect("record present");
    assert_eq!(stored.result, result);
    assert_eq!(stored.settled_on, paid.date);

    let trails = audit.trails();
    assert_eq!(trails.len(), 1);
    let trail = &trails[0];
    assert_eq!(trail.payment_id, paid.id);

    // eight pool entries plus 3 chiefs-pool members and 3 seizing agents
    assert_eq!(trail.entries.len(), 8 + 6);

    let treasury = trail
        .entries
        .iter()
        .find(|entry| entry.destination == Destination::Pool(PoolKind::Treasury))
        .expect("treasury entry present");
    assert_eq!(treasury.percentage, dec!(0.15));
    assert_eq!(treasury.amount, dec!(135_000));

    let audited: Decimal = trail
        .entries
        .iter()
        .filter(|entry| matches!(entry.destination, Destination::Pool(_)))
        .map(|entry| entry.amount)
        .sum();
    assert_eq!(audited, dec!(1_000_000));
}

#[test]
fn settling_the_same_payment_twice_conflicts() {
    let (service, directory, _registry, _ledger, _audit) = build_service();
    seed_standard_case(&directory);

    let paid = payment("enc-001", dec!(10_000), date(2024, 2, 10));
    service.settle(&paid).expect("first settlement");

    match service.settle(&paid) {
        Err(RecoveryServiceError::Ledger(LedgerError::Conflict)) => {}
        other => panic!("expected ledger conflict, got {other:?}"),
    }
}

#[test]
fn settle_propagates_negative_amounts_as_invalid() {
    let (service, directory, _registry, _ledger, _audit) = build_service();
    seed_standard_case(&directory);

    let negative = payment("enc-001", dec!(-5), date(2024, 2, 10));
    match service.settle(&negative) {
        Err(RecoveryServiceError::Distribution(DistributionError::InvalidAmount(_))) => {}
        other => panic!("expected InvalidAmount, got {other:?}"),
    }
}

#[test]
fn settle_surfaces_special_role_integrity_conflicts() {
    let (service, directory, registry, _ledger, _audit) = build_service();
    seed_standard_case(&directory);
    registry.appoint(dg_window(date(2024, 1, 1), None));
    let mut second = dg_window(date(2024, 2, 1), None);
    second.agent = agent("agt-902", "M. Bernard", "DIR-GEN", "CTR-HQ");
    registry.appoint(second);

    let paid = payment("enc-001", dec!(10_000), date(2024, 2, 10));
    match service.settle(&paid) {
        Err(RecoveryServiceError::Resolution(ResolutionError::DataIntegrity {
            holders, ..
        })) => assert_eq!(holders.len(), 2),
        other => panic!("expected DataIntegrity, got {other:?}"),
    }
}

#[test]
fn distribution_lookup_propagates_not_found() {
    let (service, _directory, _registry, _ledger, _audit) = build_service();

    match service.distribution(&PaymentId("enc-missing".to_string())) {
        Err(RecoveryServiceError::Ledger(LedgerError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn settled_record_round_trips_through_lookup() {
    let (service, directory, _registry, _ledger, _audit) = build_service();
    seed_standard_case(&directory);

    let paid = payment("enc-001", dec!(250_000), date(2024, 3, 5));
    let result = service.settle(&paid).expect("settles");

    let record = service.distribution(&paid.id).expect("record present");
    assert_eq!(record.result, result);
    assert_eq!(record.payment_id, paid.id);
}
