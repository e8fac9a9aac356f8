mod common;

use std::collections::HashMap;

use chrono::{NaiveDate, TimeZone, Utc};
use coc_api::service::{CertificationRequest, DebitRequest, HistoricalImportRequest};
use coc_api::{CocError, LogStatus, Month};
use coc_db::models::{BatchStatus, LedgerEntryType};
use common::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use uuid::Uuid;

async fn import(
    h: &TestHarness,
    employee_id: &str,
    month: Month,
    year: i32,
    amount: &str,
    valid_until: (i32, u32, u32),
) -> Uuid {
    let batch = h
        .ledger
        .create_historical_batch(HistoricalImportRequest {
            employee_id: employee_id.to_string(),
            month,
            year,
            hours: hours(amount),
            date_of_issuance: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            valid_until: NaiveDate::from_ymd_opt(valid_until.0, valid_until.1, valid_until.2)
                .unwrap(),
            notes: None,
        })
        .await
        .unwrap();
    batch.batch_id
}

#[tokio::test]
async fn test_fifo_debit_with_mixed_expiries() {
    let h = harness();
    seed_employee(&h, "EMP-001").await;

    // B2 expires later but is imported first; FIFO must still pick B1
    let b2 = import(&h, "EMP-001", Month::February, 2025, "4.0", (2026, 6, 30)).await;
    let b1 = import(&h, "EMP-001", Month::January, 2025, "5.0", (2026, 1, 31)).await;

    let outcome = h
        .ledger
        .debit(DebitRequest {
            employee_id: "EMP-001".to_string(),
            hours: hours("7.0"),
            reference_id: Some("travel-order-88".to_string()),
            notes: None,
        })
        .await
        .unwrap();

    assert_eq!(outcome.total_debited, hours("7.0"));
    assert_eq!(outcome.debits.len(), 2);
    assert_eq!(outcome.debits[0].batch_id, b1);
    assert_eq!(outcome.debits[0].hours_consumed, hours("5.0"));
    assert_eq!(outcome.debits[1].batch_id, b2);
    assert_eq!(outcome.debits[1].hours_consumed, hours("2.0"));

    let first = h.batch_repository.find_by_id(b1).await.unwrap().unwrap();
    assert_eq!(first.status, BatchStatus::Used);
    assert!(first.remaining_hours.is_zero());
    assert_eq!(first.used_hours, hours("5.0"));

    let second = h.batch_repository.find_by_id(b2).await.unwrap().unwrap();
    assert_eq!(second.status, BatchStatus::Active);
    assert_eq!(second.remaining_hours, hours("2.0"));

    // one ledger Debit per batch touched
    let debits_b1 = h.ledger_repository.find_by_batch(b1).await.unwrap();
    assert_eq!(
        debits_b1
            .iter()
            .filter(|entry| entry.entry_type == LedgerEntryType::Debit)
            .map(|entry| entry.hours)
            .collect::<Vec<_>>(),
        vec![hours("-5.0")]
    );
    let debits_b2 = h.ledger_repository.find_by_batch(b2).await.unwrap();
    assert_eq!(
        debits_b2
            .iter()
            .filter(|entry| entry.entry_type == LedgerEntryType::Debit)
            .map(|entry| entry.hours)
            .collect::<Vec<_>>(),
        vec![hours("-2.0")]
    );
}

#[tokio::test]
async fn test_overdraw_rejected_without_partial_debit() {
    let h = harness();
    seed_employee(&h, "EMP-001").await;
    let b1 = import(&h, "EMP-001", Month::January, 2025, "5.0", (2026, 1, 31)).await;

    let err = h
        .ledger
        .debit(DebitRequest {
            employee_id: "EMP-001".to_string(),
            hours: hours("5.1"),
            reference_id: None,
            notes: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CocError::PreconditionFailed(_)));

    let batch = h.batch_repository.find_by_id(b1).await.unwrap().unwrap();
    assert_eq!(batch.remaining_hours, hours("5.0"));
    assert!(h
        .ledger_repository
        .find_by_employee("EMP-001")
        .await
        .unwrap()
        .iter()
        .all(|entry| entry.entry_type != LedgerEntryType::Debit));
}

#[tokio::test]
async fn test_expired_batches_are_not_debitable() {
    let h = harness();
    seed_employee(&h, "EMP-001").await;
    import(&h, "EMP-001", Month::January, 2025, "5.0", (2025, 4, 10)).await;
    import(&h, "EMP-001", Month::February, 2025, "3.0", (2026, 6, 30)).await;

    // the January batch lapsed on 2025-04-10; today is 2025-04-15
    let err = h
        .ledger
        .debit(DebitRequest {
            employee_id: "EMP-001".to_string(),
            hours: hours("4.0"),
            reference_id: None,
            notes: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CocError::PreconditionFailed(_)));
}

#[tokio::test]
async fn test_expire_sweep_forfeits_remaining_hours() {
    let h = harness();
    seed_employee(&h, "EMP-001").await;

    // a certified batch that will lapse
    h.overtime
        .log_batch(batch_request(
            "EMP-001",
            Month::March,
            2025,
            vec![weekday_evening("2025-03-10"), weekend_morning("2025-03-15")],
        ))
        .await
        .unwrap();
    h.certification
        .certify(CertificationRequest {
            employee_id: "EMP-001".to_string(),
            month: Month::March,
            year: 2025,
            date_of_issuance: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        })
        .await
        .unwrap();
    let batch_id = h.batch_repository.find_by_employee("EMP-001").await.unwrap()[0].batch_id;

    // partially consume, then jump past the validity window
    h.ledger
        .debit(DebitRequest {
            employee_id: "EMP-001".to_string(),
            hours: hours("2.0"),
            reference_id: None,
            notes: None,
        })
        .await
        .unwrap();
    let after_expiry = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
    h.clock
        .advance_to(Utc.with_ymd_and_hms(2026, 4, 1, 2, 0, 0).unwrap());

    let report = h.ledger.expire_sweep(after_expiry).await.unwrap();
    assert_eq!(report.batches_expired, 1);
    assert_eq!(report.hours_forfeited, hours("4.0"));

    // remaining hours stay on the record; status alone flips
    let batch = h.batch_repository.find_by_id(batch_id).await.unwrap().unwrap();
    assert_eq!(batch.status, BatchStatus::Expired);
    assert_eq!(batch.remaining_hours, hours("4.0"));
    assert_eq!(batch.used_hours, hours("2.0"));

    // an Expiration entry of minus the forfeited amount
    let entries = h.ledger_repository.find_by_batch(batch_id).await.unwrap();
    let expiration: Vec<_> = entries
        .iter()
        .filter(|entry| entry.entry_type == LedgerEntryType::Expiration)
        .collect();
    assert_eq!(expiration.len(), 1);
    assert_eq!(expiration[0].hours, hours("-4.0"));

    // covered logs follow the batch
    let logs = h
        .overtime
        .logs_for_period("EMP-001", Month::March, 2025)
        .await
        .unwrap();
    assert!(logs.iter().all(|log| log.status == LogStatus::Expired));

    // sweep again: nothing newly expired, no duplicate ledger rows
    let report = h.ledger.expire_sweep(after_expiry).await.unwrap();
    assert_eq!(report.batches_expired, 0);
    let entries = h.ledger_repository.find_by_batch(batch_id).await.unwrap();
    assert_eq!(
        entries
            .iter()
            .filter(|entry| entry.entry_type == LedgerEntryType::Expiration)
            .count(),
        1
    );

    // active balance excludes the expired batch despite its remaining hours
    let balance = h.ledger.balance("EMP-001", after_expiry).await.unwrap();
    assert!(balance.active.is_zero());
    assert_eq!(balance.expired, hours("4.0"));
    assert_eq!(balance.used, hours("2.0"));
}

#[tokio::test]
async fn test_debit_marks_certified_logs_used() {
    let h = harness();
    seed_employee(&h, "EMP-001").await;

    h.overtime
        .log_batch(batch_request(
            "EMP-001",
            Month::March,
            2025,
            vec![weekday_evening("2025-03-10")],
        ))
        .await
        .unwrap();
    h.certification
        .certify(CertificationRequest {
            employee_id: "EMP-001".to_string(),
            month: Month::March,
            year: 2025,
            date_of_issuance: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        })
        .await
        .unwrap();

    h.ledger
        .debit(DebitRequest {
            employee_id: "EMP-001".to_string(),
            hours: hours("1.5"),
            reference_id: None,
            notes: None,
        })
        .await
        .unwrap();

    let logs = h
        .overtime
        .logs_for_period("EMP-001", Month::March, 2025)
        .await
        .unwrap();
    assert!(logs.iter().all(|log| log.status == LogStatus::Used));
}

/// ledger-balance: after any sequence of credits, debits and sweeps, the
/// batch-derived active balance equals the signed ledger sum over
/// non-expired batches.
#[tokio::test]
async fn test_ledger_balance_reconstruction_over_random_sequences() {
    let h = harness();
    seed_employee(&h, "EMP-100").await;
    let mut rng = StdRng::seed_from_u64(0xC0C);

    let mut today = NaiveDate::from_ymd_opt(2025, 4, 15).unwrap();
    let mut period = 0u32;

    for _ in 0..40 {
        match rng.gen_range(0..3) {
            // credit: a fresh historical batch in its own period
            0 => {
                let month = Month::from_number(period % 12 + 1).unwrap();
                let year = 2020 + (period / 12) as i32;
                period += 1;
                let amount = Decimal::new(rng.gen_range(10..=200), 1);
                let lifetime_days = rng.gen_range(10..400);
                h.ledger
                    .create_historical_batch(HistoricalImportRequest {
                        employee_id: "EMP-100".to_string(),
                        month,
                        year,
                        hours: amount,
                        date_of_issuance: today,
                        valid_until: today + chrono::Duration::days(lifetime_days),
                        notes: None,
                    })
                    .await
                    .unwrap();
            }
            // debit whatever is available, sometimes in full
            1 => {
                let balance = h.ledger.balance("EMP-100", today).await.unwrap();
                let available_tenths = (balance.active * Decimal::from(10))
                    .trunc()
                    .to_i64()
                    .unwrap_or(0);
                if available_tenths > 0 {
                    let amount = Decimal::new(rng.gen_range(1..=available_tenths), 1);
                    h.ledger
                        .debit(DebitRequest {
                            employee_id: "EMP-100".to_string(),
                            hours: amount,
                            reference_id: None,
                            notes: None,
                        })
                        .await
                        .unwrap();
                }
            }
            // time passes and the sweep runs
            _ => {
                today += chrono::Duration::days(rng.gen_range(5..90));
                h.clock.advance_to(
                    Utc.with_ymd_and_hms(2025, 4, 15, 2, 0, 0).unwrap()
                        + chrono::Duration::days((today
                            - NaiveDate::from_ymd_opt(2025, 4, 15).unwrap())
                        .num_days()),
                );
                h.ledger.expire_sweep(today).await.unwrap();
            }
        }

        // keep the sweep current, then compare the two derivations
        h.ledger.expire_sweep(today).await.unwrap();
        let balance = h.ledger.balance("EMP-100", today).await.unwrap();

        let batches = h.batch_repository.find_by_employee("EMP-100").await.unwrap();
        let status_by_batch: HashMap<Uuid, BatchStatus> = batches
            .iter()
            .map(|batch| (batch.batch_id, batch.status))
            .collect();
        let ledger_sum: Decimal = h
            .ledger_repository
            .find_by_employee("EMP-100")
            .await
            .unwrap()
            .iter()
            .filter(|entry| {
                entry
                    .batch_id
                    .map(|id| status_by_batch.get(&id) != Some(&BatchStatus::Expired))
                    .unwrap_or(true)
            })
            .map(|entry| entry.hours)
            .sum();

        assert_eq!(
            balance.active, ledger_sum,
            "batch-derived active balance diverged from the ledger"
        );
    }
}

/// FIFO-debit: random batch sets are always consumed in valid-until order.
#[tokio::test]
async fn test_fifo_order_over_random_batch_sets() {
    let mut rng = StdRng::seed_from_u64(7);

    for round in 0..10 {
        let h = harness();
        let employee_id = format!("EMP-{round}");
        seed_employee(&h, &employee_id).await;

        let batch_count = rng.gen_range(2..6);
        let mut total = Decimal::ZERO;
        for index in 0..batch_count {
            let amount = Decimal::new(rng.gen_range(10..=80), 1);
            total += amount;
            h.ledger
                .create_historical_batch(HistoricalImportRequest {
                    employee_id: employee_id.clone(),
                    month: Month::from_number(index as u32 + 1).unwrap(),
                    year: 2025,
                    hours: amount,
                    date_of_issuance: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
                    valid_until: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()
                        + chrono::Duration::days(rng.gen_range(0..600)),
                    notes: None,
                })
                .await
                .unwrap();
        }

        let debit_tenths = (total * Decimal::from(10)).trunc().to_i64().unwrap();
        let amount = Decimal::new(rng.gen_range(1..=debit_tenths), 1);
        let outcome = h
            .ledger
            .debit(DebitRequest {
                employee_id: employee_id.clone(),
                hours: amount,
                reference_id: None,
                notes: None,
            })
            .await
            .unwrap();

        // touched batches come back in strictly ascending expiry order and
        // every batch but the last is drained in full
        let batches = h.batch_repository.find_by_employee(&employee_id).await.unwrap();
        let expiry_by_batch: HashMap<Uuid, NaiveDate> = batches
            .iter()
            .map(|batch| (batch.batch_id, batch.valid_until))
            .collect();
        let expiries: Vec<NaiveDate> = outcome
            .debits
            .iter()
            .map(|debit| expiry_by_batch[&debit.batch_id])
            .collect();
        let mut sorted = expiries.clone();
        sorted.sort();
        assert_eq!(expiries, sorted, "debit touched batches out of FIFO order");

        for debit in &outcome.debits[..outcome.debits.len() - 1] {
            let batch = h
                .batch_repository
                .find_by_id(debit.batch_id)
                .await
                .unwrap()
                .unwrap();
            assert!(batch.remaining_hours.is_zero());
        }
        let consumed: Decimal = outcome.debits.iter().map(|debit| debit.hours_consumed).sum();
        assert_eq!(consumed, amount);
    }
}

// two racing debits serialize on the employee lock; together they can
// never take more than the balance
#[tokio::test]
async fn test_concurrent_debits_cannot_overdraw() {
    let h = harness();
    seed_employee(&h, "EMP-001").await;
    import(&h, "EMP-001", Month::January, 2025, "5.0", (2026, 1, 31)).await;

    let first = h.ledger.debit(DebitRequest {
        employee_id: "EMP-001".to_string(),
        hours: hours("3.0"),
        reference_id: None,
        notes: None,
    });
    let second = h.ledger.debit(DebitRequest {
        employee_id: "EMP-001".to_string(),
        hours: hours("3.0"),
        reference_id: None,
        notes: None,
    });
    let (first, second) = tokio::join!(first, second);

    // exactly one side wins; 3.0 + 3.0 would overdraw the 5.0 balance
    assert!(first.is_ok() ^ second.is_ok());

    let balance = h
        .ledger
        .balance("EMP-001", NaiveDate::from_ymd_opt(2025, 4, 15).unwrap())
        .await
        .unwrap();
    assert_eq!(balance.active, hours("2.0"));
}
