mod common;

use chrono::NaiveDate;
use coc_api::service::CertificationRequest;
use coc_api::{CocError, ConfigKey, DayType, LibraryCategory, Month, WeekendDays};
use common::*;

#[tokio::test]
async fn test_defaults_apply_when_store_is_empty() {
    let h = harness();
    let config = h.configuration.engine_config().await.unwrap();

    assert_eq!(config.weekend_days, WeekendDays::standard());
    assert_eq!(config.monthly_cap, hours("40.0"));
    assert_eq!(config.total_cap, hours("120.0"));
    assert_eq!(config.certificate_validity_months, 12);
    assert_eq!(config.time_zone.name(), "Asia/Manila");
}

#[tokio::test]
async fn test_set_value_round_trip_and_validation() {
    let h = harness();

    h.configuration
        .set_value(ConfigKey::MonthlyCap, "32.0")
        .await
        .unwrap();
    assert_eq!(
        h.configuration.get_value(ConfigKey::MonthlyCap).await.unwrap(),
        Some("32.0".to_string())
    );
    assert_eq!(
        h.configuration.engine_config().await.unwrap().monthly_cap,
        hours("32.0")
    );

    assert!(h
        .configuration
        .set_value(ConfigKey::MonthlyCap, "a lot")
        .await
        .is_err());
    assert!(h
        .configuration
        .set_value(ConfigKey::TimeZone, "Mars/Olympus")
        .await
        .is_err());
    let err = h
        .configuration
        .set_value(ConfigKey::WeekendDays, "5,9")
        .await
        .unwrap_err();
    assert!(matches!(err, CocError::InvalidWeekendDays { .. }));
}

#[tokio::test]
async fn test_weekend_reconfiguration_moves_classification() {
    let h = harness();

    let friday = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
    let sunday = NaiveDate::from_ymd_opt(2025, 3, 16).unwrap();
    assert_eq!(h.calendar.day_type(friday).await.unwrap(), DayType::Weekday);
    assert_eq!(h.calendar.day_type(sunday).await.unwrap(), DayType::Weekend);

    h.calendar
        .set_weekend_days(WeekendDays::from_indices("5,6").unwrap())
        .await
        .unwrap();

    assert_eq!(h.calendar.day_type(friday).await.unwrap(), DayType::Weekend);
    assert_eq!(h.calendar.day_type(sunday).await.unwrap(), DayType::Weekday);
}

#[tokio::test]
async fn test_validity_months_config_drives_certification() {
    let h = harness();
    seed_employee(&h, "EMP-001").await;
    h.configuration
        .set_value(ConfigKey::CertificateValidityMonths, "6")
        .await
        .unwrap();

    h.overtime
        .log_batch(batch_request(
            "EMP-001",
            Month::March,
            2025,
            vec![weekday_evening("2025-03-10")],
        ))
        .await
        .unwrap();
    let result = h
        .certification
        .certify(CertificationRequest {
            employee_id: "EMP-001".to_string(),
            month: Month::March,
            year: 2025,
            date_of_issuance: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        })
        .await
        .unwrap();

    // issuance + 6 months - 1 day
    assert_eq!(result.valid_until, NaiveDate::from_ymd_opt(2025, 9, 30).unwrap());
}

#[tokio::test]
async fn test_library_lists_preserve_order() {
    let h = harness();

    for office in ["Accounting", "Records Section", "Mayor's Office"] {
        h.libraries
            .add_entry(LibraryCategory::Offices, office)
            .await
            .unwrap();
    }
    assert_eq!(
        h.libraries.entries(LibraryCategory::Offices).await.unwrap(),
        vec!["Accounting", "Records Section", "Mayor's Office"]
    );

    let err = h
        .libraries
        .add_entry(LibraryCategory::Offices, "Accounting")
        .await
        .unwrap_err();
    assert!(matches!(err, CocError::AlreadyExists(_)));

    h.libraries
        .remove_entry(LibraryCategory::Offices, "Records Section")
        .await
        .unwrap();
    assert_eq!(
        h.libraries.entries(LibraryCategory::Offices).await.unwrap(),
        vec!["Accounting", "Mayor's Office"]
    );

    let all = h.libraries.all_entries().await.unwrap();
    assert_eq!(all.get_index(0).unwrap().0, "offices");
    assert!(all.get("positions").unwrap().is_empty());
}

#[tokio::test]
async fn test_employee_email_uniqueness_and_soft_delete() {
    let h = harness();
    seed_employee(&h, "EMP-001").await;

    let err = h
        .employees
        .create_employee(coc_api::service::NewEmployee {
            employee_id: "EMP-002".to_string(),
            first_name: "Maria".to_string(),
            middle_name: None,
            last_name: "Reyes".to_string(),
            position: "Clerk".to_string(),
            office: "Accounting".to_string(),
            email: "emp-001@lgu.gov.ph".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CocError::AlreadyExists(_)));

    h.employees.deactivate_employee("EMP-001").await.unwrap();
    let employee = h.employees.find_employee("EMP-001").await.unwrap().unwrap();
    assert_eq!(employee.status, coc_api::EmployeeStatus::Inactive);
    assert!(h.employees.list_active_employees().await.unwrap().is_empty());
    assert_eq!(h.employees.list_employees().await.unwrap().len(), 1);
}
