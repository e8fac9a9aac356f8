mod common;

use chrono::NaiveDate;
use coc_api::service::{CertificationRequest, HistoricalImportRequest, NewHoliday};
use coc_api::{CocError, DayType, HolidayType, LogStatus, Month, PeriodLockFlavor, ValidationKind};
use common::*;
use rust_decimal::Decimal;

#[tokio::test]
async fn test_weekday_single_session_earns_one_point_five() {
    let h = harness();
    seed_employee(&h, "EMP-001").await;

    let result = h
        .overtime
        .log_batch(batch_request(
            "EMP-001",
            Month::March,
            2025,
            vec![weekday_evening("2025-03-10")],
        ))
        .await
        .unwrap();

    assert_eq!(result.entries_logged, 1);
    assert_eq!(result.total_credit_hours, hours("1.5"));
    assert!(result.skipped_duplicates.is_empty());

    let logs = h
        .overtime
        .logs_for_period("EMP-001", Month::March, 2025)
        .await
        .unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].day_type, DayType::Weekday);
    assert_eq!(logs[0].coc_earned, hours("1.5"));
    assert_eq!(logs[0].status, LogStatus::Uncertified);
    assert!(logs[0].valid_until.is_none());
}

#[tokio::test]
async fn test_weekend_full_day_earns_twelve() {
    let h = harness();
    seed_employee(&h, "EMP-001").await;

    let result = h
        .overtime
        .log_batch(batch_request(
            "EMP-001",
            Month::March,
            2025,
            vec![weekend_full("2025-03-15")],
        ))
        .await
        .unwrap();

    assert_eq!(result.total_credit_hours, hours("12.0"));
    let logs = h
        .overtime
        .logs_for_period("EMP-001", Month::March, 2025)
        .await
        .unwrap();
    assert_eq!(logs[0].day_type, DayType::Weekend);
}

#[tokio::test]
async fn test_holiday_on_weekend_classifies_holiday() {
    let h = harness();
    seed_employee(&h, "EMP-001").await;

    let saturday = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
    h.calendar
        .add_holiday(NewHoliday {
            name: "Araw ng Kagitingan".to_string(),
            date: saturday,
            holiday_type: HolidayType::Special,
        })
        .await
        .unwrap();

    assert_eq!(h.calendar.day_type(saturday).await.unwrap(), DayType::Holiday);

    let result = h
        .overtime
        .log_batch(batch_request(
            "EMP-001",
            Month::March,
            2025,
            vec![weekend_full("2025-03-15")],
        ))
        .await
        .unwrap();
    assert_eq!(result.total_credit_hours, hours("12.0"));

    let logs = h
        .overtime
        .logs_for_period("EMP-001", Month::March, 2025)
        .await
        .unwrap();
    assert_eq!(logs[0].day_type, DayType::Holiday);
}

#[tokio::test]
async fn test_monthly_cap_rejection_leaves_no_logs() {
    let h = harness();
    seed_employee(&h, "EMP-001").await;

    // 2 full weekend days + 7 clamped weekdays = 38.0
    let seed = vec![
        weekend_full("2025-03-15"),
        weekend_full("2025-03-16"),
        weekday_full("2025-03-10"),
        weekday_full("2025-03-11"),
        weekday_full("2025-03-12"),
        weekday_full("2025-03-13"),
        weekday_full("2025-03-14"),
        weekday_full("2025-03-17"),
        weekday_full("2025-03-18"),
    ];
    let seeded = h
        .overtime
        .log_batch(batch_request("EMP-001", Month::March, 2025, seed))
        .await
        .unwrap();
    assert_eq!(seeded.total_credit_hours, hours("38.0"));

    let err = h
        .overtime
        .log_batch(batch_request(
            "EMP-001",
            Month::March,
            2025,
            vec![weekday_evening("2025-03-19"), weekday_evening("2025-03-20")],
        ))
        .await
        .unwrap_err();

    match err {
        CocError::MonthlyCapExceeded { current, delta, limit } => {
            assert_eq!(current, hours("38.0"));
            assert_eq!(delta, hours("3.0"));
            assert_eq!(limit, hours("40.0"));
        }
        other => panic!("expected MonthlyCapExceeded, got {other:?}"),
    }

    // rejected batch persisted nothing
    let logs = h
        .overtime
        .logs_for_period("EMP-001", Month::March, 2025)
        .await
        .unwrap();
    assert_eq!(logs.len(), 9);
    assert!(logs.iter().all(|log| log.date_worked.format("%d").to_string() != "19"));
}

#[tokio::test]
async fn test_total_cap_rejection() {
    let h = harness();
    seed_employee(&h, "EMP-001").await;

    h.ledger
        .create_historical_batch(HistoricalImportRequest {
            employee_id: "EMP-001".to_string(),
            month: Month::January,
            year: 2025,
            hours: hours("118.0"),
            date_of_issuance: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            valid_until: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
            notes: None,
        })
        .await
        .unwrap();

    let err = h
        .overtime
        .log_batch(batch_request(
            "EMP-001",
            Month::March,
            2025,
            vec![weekday_evening("2025-03-10"), weekday_evening("2025-03-11")],
        ))
        .await
        .unwrap_err();

    match err {
        CocError::TotalCapExceeded { current, delta, limit } => {
            assert_eq!(current, hours("118.0"));
            assert_eq!(delta, hours("3.0"));
            assert_eq!(limit, hours("120.0"));
        }
        other => panic!("expected TotalCapExceeded, got {other:?}"),
    }
    assert!(h
        .overtime
        .logs_for_period("EMP-001", Month::March, 2025)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_duplicate_dates_skipped_not_failed() {
    let h = harness();
    seed_employee(&h, "EMP-001").await;

    // intra-batch duplicate
    let result = h
        .overtime
        .log_batch(batch_request(
            "EMP-001",
            Month::March,
            2025,
            vec![weekday_evening("2025-03-10"), weekday_evening("2025-03-10")],
        ))
        .await
        .unwrap();
    assert_eq!(result.entries_logged, 1);
    assert_eq!(
        result.skipped_duplicates,
        vec![NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()]
    );

    // cross-batch duplicate plus one fresh date
    let result = h
        .overtime
        .log_batch(batch_request(
            "EMP-001",
            Month::March,
            2025,
            vec![weekday_evening("2025-03-10"), weekday_evening("2025-03-11")],
        ))
        .await
        .unwrap();
    assert_eq!(result.entries_logged, 1);
    assert_eq!(result.skipped_duplicates.len(), 1);

    // exactly one log persisted per date
    let logs = h
        .overtime
        .logs_for_period("EMP-001", Month::March, 2025)
        .await
        .unwrap();
    assert_eq!(logs.len(), 2);
}

#[tokio::test]
async fn test_all_duplicates_is_nothing_to_do() {
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

    let err = h
        .overtime
        .log_batch(batch_request(
            "EMP-001",
            Month::March,
            2025,
            vec![weekday_evening("2025-03-10")],
        ))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CocError::Validation { kind: ValidationKind::MissingField, .. }
    ));

    let logs = h
        .overtime
        .logs_for_period("EMP-001", Month::March, 2025)
        .await
        .unwrap();
    assert_eq!(logs.len(), 1);
}

#[tokio::test]
async fn test_period_lock_after_certification() {
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

    let err = h
        .overtime
        .log_batch(batch_request(
            "EMP-001",
            Month::March,
            2025,
            vec![weekday_evening("2025-03-11")],
        ))
        .await
        .unwrap_err();
    match err {
        CocError::PeriodLocked { flavor, .. } => assert_eq!(flavor, PeriodLockFlavor::Certified),
        other => panic!("expected PeriodLocked, got {other:?}"),
    }
    assert_eq!(
        h.overtime
            .logs_for_period("EMP-001", Month::March, 2025)
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn test_period_lock_from_historical_import() {
    let h = harness();
    seed_employee(&h, "EMP-001").await;

    h.ledger
        .create_historical_batch(HistoricalImportRequest {
            employee_id: "EMP-001".to_string(),
            month: Month::March,
            year: 2025,
            hours: hours("10.0"),
            date_of_issuance: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            valid_until: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
            notes: Some("spreadsheet balance".to_string()),
        })
        .await
        .unwrap();

    let err = h
        .overtime
        .log_batch(batch_request(
            "EMP-001",
            Month::March,
            2025,
            vec![weekday_evening("2025-03-10")],
        ))
        .await
        .unwrap_err();
    match err {
        CocError::PeriodLocked { flavor, .. } => assert_eq!(flavor, PeriodLockFlavor::Historical),
        other => panic!("expected PeriodLocked, got {other:?}"),
    }
}

#[tokio::test]
async fn test_bad_date_and_month_mismatch() {
    let h = harness();
    seed_employee(&h, "EMP-001").await;

    let err = h
        .overtime
        .log_batch(batch_request(
            "EMP-001",
            Month::March,
            2025,
            vec![weekday_evening("March 10, 2025")],
        ))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CocError::Validation { kind: ValidationKind::BadDate, .. }
    ));

    let err = h
        .overtime
        .log_batch(batch_request(
            "EMP-001",
            Month::March,
            2025,
            vec![weekday_evening("2025-04-10")],
        ))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CocError::Validation { kind: ValidationKind::MonthMismatch, .. }
    ));
}

#[tokio::test]
async fn test_unknown_employee_rejected() {
    let h = harness();
    let err = h
        .overtime
        .log_batch(batch_request(
            "EMP-404",
            Month::March,
            2025,
            vec![weekday_evening("2025-03-10")],
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, CocError::EmployeeNotFound(_)));
}

#[tokio::test]
async fn test_inactive_employee_may_backfill() {
    let h = harness();
    seed_employee(&h, "EMP-001").await;
    h.employees.deactivate_employee("EMP-001").await.unwrap();

    let result = h
        .overtime
        .log_batch(batch_request(
            "EMP-001",
            Month::March,
            2025,
            vec![weekday_evening("2025-03-10")],
        ))
        .await
        .unwrap();
    assert_eq!(result.entries_logged, 1);
}

#[tokio::test]
async fn test_unparseable_punches_earn_zero_but_log() {
    let h = harness();
    seed_employee(&h, "EMP-001").await;

    let result = h
        .overtime
        .log_batch(batch_request(
            "EMP-001",
            Month::March,
            2025,
            vec![
                entry("2025-03-10", Some("8-ish"), Some("around noon maybe"), None, None),
                weekday_evening("2025-03-11"),
            ],
        ))
        .await
        .unwrap();
    assert_eq!(result.entries_logged, 2);
    assert_eq!(result.total_credit_hours, hours("1.5"));

    let logs = h
        .overtime
        .logs_for_period("EMP-001", Month::March, 2025)
        .await
        .unwrap();
    let zero_day = logs
        .iter()
        .find(|log| log.date_worked == NaiveDate::from_ymd_opt(2025, 3, 10).unwrap())
        .unwrap();
    assert_eq!(zero_day.coc_earned, Decimal::ZERO);
}

#[tokio::test]
async fn test_delete_only_uncertified_logs() {
    let h = harness();
    seed_employee(&h, "EMP-001").await;

    h.overtime
        .log_batch(batch_request(
            "EMP-001",
            Month::March,
            2025,
            vec![weekday_evening("2025-03-10"), weekday_evening("2025-03-11")],
        ))
        .await
        .unwrap();
    let logs = h
        .overtime
        .logs_for_period("EMP-001", Month::March, 2025)
        .await
        .unwrap();
    h.overtime.delete_log(logs[0].log_id).await.unwrap();

    h.certification
        .certify(CertificationRequest {
            employee_id: "EMP-001".to_string(),
            month: Month::March,
            year: 2025,
            date_of_issuance: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        })
        .await
        .unwrap();

    let err = h.overtime.delete_log(logs[1].log_id).await.unwrap_err();
    assert!(matches!(err, CocError::PreconditionFailed(_)));
}
