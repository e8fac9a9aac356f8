mod common;

use std::sync::Arc;

use chrono::NaiveDate;
use coc_api::service::{CertificationRequest, DebitRequest, HistoricalImportRequest};
use coc_api::{LogStatus, Month};
use coc_db::store::collections::{CREDIT_BATCHES, EMPLOYEES, OVERTIME_LOGS};
use coc_db_document::test_support::{RecordedOp, RecordingStore};
use coc_db_document::MemoryDocumentStore;
use common::*;

async fn seed_history(h: &TestHarness) {
    seed_employee(h, "EMP-001").await;

    h.ledger
        .create_historical_batch(HistoricalImportRequest {
            employee_id: "EMP-001".to_string(),
            month: Month::January,
            year: 2025,
            hours: hours("10.0"),
            date_of_issuance: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            valid_until: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
            notes: Some("spreadsheet carry-over".to_string()),
        })
        .await
        .unwrap();

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

    // an uncertified April log on top
    h.overtime
        .log_batch(batch_request(
            "EMP-001",
            Month::April,
            2025,
            vec![weekday_evening("2025-04-14")],
        ))
        .await
        .unwrap();

    h.ledger
        .debit(DebitRequest {
            employee_id: "EMP-001".to_string(),
            hours: hours("4.0"),
            reference_id: None,
            notes: None,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_employee_detailed_ledger_composition() {
    let h = harness();
    seed_history(&h).await;

    let view = h.queries.employee_detailed_ledger("EMP-001").await.unwrap();

    // historical 10.0 - 4.0 debited (FIFO hits the earlier-expiring
    // historical batch first) + certified 6.0 still active
    assert_eq!(view.active_balance, hours("12.0"));
    assert_eq!(view.uncertified_balance, hours("1.5"));
    assert_eq!(view.total_earned, hours("17.5"));
    assert_eq!(view.used_credits, hours("4.0"));

    // one historical row and three log rows, newest first
    assert_eq!(view.rows.len(), 4);
    assert!(view.rows.iter().any(|row| row.is_historical));
    let dates: Vec<Option<NaiveDate>> = view.rows.iter().map(|row| row.date).collect();
    assert_eq!(dates[0], NaiveDate::from_ymd_opt(2025, 4, 14));

    let historical = view.rows.iter().find(|row| row.is_historical).unwrap();
    assert_eq!(historical.earned, hours("10.0"));
    assert_eq!(historical.used, Some(hours("4.0")));
    assert_eq!(historical.remaining, Some(hours("6.0")));
    assert_eq!(historical.month, Month::January);

    // certified log rows carry the certificate's issuance and validity
    let certified = view
        .rows
        .iter()
        .find(|row| row.date == NaiveDate::from_ymd_opt(2025, 3, 10))
        .unwrap();
    assert_eq!(certified.status, LogStatus::Active);
    assert_eq!(certified.date_of_issuance, NaiveDate::from_ymd_opt(2025, 4, 1));
    assert_eq!(certified.valid_until, NaiveDate::from_ymd_opt(2026, 3, 31));
}

// query-push-down: the detailed ledger runs exactly two predicated queries
// against the big collections, and no unpredicated scans at all
#[tokio::test]
async fn test_detailed_ledger_query_shape() {
    let memory = Arc::new(MemoryDocumentStore::new());
    let recording = Arc::new(RecordingStore::new(memory));
    let h = harness_with_store(recording.clone());
    seed_history(&h).await;

    recording.clear();
    h.queries.employee_detailed_ledger("EMP-001").await.unwrap();

    let ops = recording.recorded();
    let data_queries: Vec<&RecordedOp> = ops
        .iter()
        .filter(|op| match op {
            RecordedOp::FindMatching { collection, .. } => {
                collection == OVERTIME_LOGS || collection == CREDIT_BATCHES
            }
            _ => false,
        })
        .collect();
    assert_eq!(data_queries.len(), 2, "expected exactly two data queries, got {ops:?}");
    for op in &data_queries {
        if let RecordedOp::FindMatching { fields, .. } = op {
            assert!(fields.contains(&"employeeId".to_string()));
        }
    }
    assert!(
        !ops.iter().any(|op| matches!(
            op,
            RecordedOp::GetMany { collection } if collection == OVERTIME_LOGS
                || collection == CREDIT_BATCHES
                || collection == EMPLOYEES
        )),
        "no unpredicated scan may back the detailed ledger: {ops:?}"
    );
}

#[tokio::test]
async fn test_uncertified_queries_push_status_predicate() {
    let memory = Arc::new(MemoryDocumentStore::new());
    let recording = Arc::new(RecordingStore::new(memory));
    let h = harness_with_store(recording.clone());
    seed_history(&h).await;

    recording.clear();
    let stats = h.queries.uncertified_stats().await.unwrap();
    assert_eq!(stats.total_hours, hours("1.5"));
    assert_eq!(stats.log_count, 1);
    assert_eq!(stats.employee_count, 1);
    assert_eq!(stats.oldest_date, NaiveDate::from_ymd_opt(2025, 4, 14));

    let ops = recording.recorded();
    assert!(ops.iter().all(|op| !matches!(op, RecordedOp::GetMany { .. })));
    assert!(ops.iter().any(|op| matches!(
        op,
        RecordedOp::FindMatching { collection, fields }
            if collection == OVERTIME_LOGS && fields == &vec!["status".to_string()]
    )));

    // the name join is two queries and an in-memory merge
    recording.clear();
    let rows = h.queries.uncertified_logs_with_employees().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].employee_name.as_deref(), Some("dela Cruz, Juan"));
    let ops = recording.recorded();
    assert_eq!(
        ops.iter()
            .filter(|op| matches!(op, RecordedOp::FindMatching { .. }))
            .count(),
        2
    );
}

#[tokio::test]
async fn test_certified_months_lookup() {
    let h = harness();
    seed_history(&h).await;

    let months = h.queries.certified_months("EMP-001", 2025).await.unwrap();
    assert_eq!(months.len(), 1);
    assert_eq!(months[0].month, Month::March);
    assert_eq!(months[0].date_of_issuance, NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());

    assert!(h
        .queries
        .certified_months("EMP-001", 2024)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_credit_progress() {
    let h = harness();
    seed_history(&h).await;

    let progress = h
        .queries
        .credit_progress("EMP-001", Month::April, 2025)
        .await
        .unwrap();

    assert_eq!(progress.monthly_total, hours("1.5"));
    assert_eq!(progress.monthly_cap, hours("40.0"));
    assert_eq!(progress.monthly_remaining, hours("38.5"));
    // active 12.0 + uncertified 1.5
    assert_eq!(progress.combined_balance, hours("13.5"));
    assert_eq!(progress.total_cap, hours("120.0"));
    assert_eq!(progress.total_remaining, hours("106.5"));
}

#[tokio::test]
async fn test_inactive_employees_left_out_of_name_join() {
    let h = harness();
    seed_history(&h).await;
    h.employees.deactivate_employee("EMP-001").await.unwrap();

    let rows = h.queries.uncertified_logs_with_employees().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].employee_name.is_none());
}
