#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use coc_api::service::{NewEmployee, OvertimeBatchRequest, OvertimeEntryInput};
use coc_api::Month;

// traits re-exported so `use common::*` puts every service and repository
// method in scope for the test files
pub use coc_api::service::{
    CalendarService, CertificationService, Clock, ConfigurationService, CreditLedgerService,
    EmployeeService, LedgerQueryService, LibraryService, OvertimeLogService,
};
pub use coc_db::repository::{
    CalendarRepository, CertificateRepository, CreditBatchRepository, EmployeeRepository,
    LedgerRepository, OvertimeLogRepository,
};
pub use coc_db::store::DocumentStore;
use coc_db_document::{
    DocumentCalendarRepository, DocumentCertificateRepository, DocumentConfigurationRepository,
    DocumentCreditBatchRepository, DocumentEmployeeRepository, DocumentLedgerRepository,
    DocumentLibraryRepository, DocumentLockRepository, DocumentOvertimeLogRepository,
    DocumentUnitOfWork, MemoryDocumentStore,
};
use coc_logic::services::{
    CalendarServiceImpl, CertificationServiceImpl, ConfigurationServiceImpl, CreditLedgerServiceImpl,
    EmployeeServiceImpl, FixedClock, LedgerQueryServiceImpl, LibraryServiceImpl,
    OvertimeLogServiceImpl, StaticIdentity,
};

/// The full service stack over one document store, with a pinned clock.
pub struct TestHarness {
    pub store: Arc<dyn DocumentStore>,
    pub clock: Arc<FixedClock>,
    pub employees: Arc<dyn EmployeeService>,
    pub overtime: Arc<dyn OvertimeLogService>,
    pub certification: Arc<dyn CertificationService>,
    pub ledger: Arc<dyn CreditLedgerService>,
    pub queries: Arc<dyn LedgerQueryService>,
    pub calendar: Arc<dyn CalendarService>,
    pub configuration: Arc<dyn ConfigurationService>,
    pub libraries: Arc<LibraryServiceImpl>,
    // raw repositories for post-state assertions
    pub log_repository: Arc<dyn OvertimeLogRepository>,
    pub batch_repository: Arc<dyn CreditBatchRepository>,
    pub ledger_repository: Arc<dyn LedgerRepository>,
    pub certificate_repository: Arc<dyn CertificateRepository>,
    pub calendar_repository: Arc<dyn CalendarRepository>,
    pub employee_repository: Arc<dyn EmployeeRepository>,
}

/// 2025-04-15 10:00 in Manila.
pub fn default_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 15, 2, 0, 0).unwrap()
}

pub fn harness() -> TestHarness {
    harness_with_store(Arc::new(MemoryDocumentStore::new()))
}

pub fn harness_with_store(store: Arc<dyn DocumentStore>) -> TestHarness {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let clock = Arc::new(FixedClock::at(default_instant()));
    let identity = Arc::new(StaticIdentity::new("hr-admin"));

    let log_repository: Arc<dyn OvertimeLogRepository> =
        Arc::new(DocumentOvertimeLogRepository::new(store.clone()));
    let batch_repository: Arc<dyn CreditBatchRepository> =
        Arc::new(DocumentCreditBatchRepository::new(store.clone()));
    let ledger_repository: Arc<dyn LedgerRepository> =
        Arc::new(DocumentLedgerRepository::new(store.clone()));
    let certificate_repository: Arc<dyn CertificateRepository> =
        Arc::new(DocumentCertificateRepository::new(store.clone()));
    let calendar_repository: Arc<dyn CalendarRepository> =
        Arc::new(DocumentCalendarRepository::new(store.clone()));
    let employee_repository: Arc<dyn EmployeeRepository> =
        Arc::new(DocumentEmployeeRepository::new(store.clone()));
    let configuration_repository = Arc::new(DocumentConfigurationRepository::new(store.clone()));
    let library_repository = Arc::new(DocumentLibraryRepository::new(store.clone()));
    let lock_repository = Arc::new(DocumentLockRepository::new(store.clone()));
    let unit_of_work = Arc::new(DocumentUnitOfWork::new(store.clone()));

    let configuration: Arc<dyn ConfigurationService> = Arc::new(ConfigurationServiceImpl::new(
        configuration_repository,
        clock.clone() as Arc<dyn Clock>,
    ));
    let calendar: Arc<dyn CalendarService> = Arc::new(CalendarServiceImpl::new(
        calendar_repository.clone(),
        configuration.clone(),
    ));
    let employees: Arc<dyn EmployeeService> = Arc::new(EmployeeServiceImpl::new(
        employee_repository.clone(),
        clock.clone(),
    ));
    let overtime: Arc<dyn OvertimeLogService> = Arc::new(OvertimeLogServiceImpl::new(
        log_repository.clone(),
        employee_repository.clone(),
        batch_repository.clone(),
        certificate_repository.clone(),
        calendar_repository.clone(),
        configuration.clone(),
        clock.clone(),
        identity.clone(),
    ));
    let certification: Arc<dyn CertificationService> = Arc::new(CertificationServiceImpl::new(
        log_repository.clone(),
        batch_repository.clone(),
        ledger_repository.clone(),
        certificate_repository.clone(),
        unit_of_work.clone(),
        lock_repository.clone(),
        configuration.clone(),
        clock.clone(),
        identity.clone(),
    ));
    let ledger: Arc<dyn CreditLedgerService> = Arc::new(CreditLedgerServiceImpl::new(
        batch_repository.clone(),
        ledger_repository.clone(),
        log_repository.clone(),
        employee_repository.clone(),
        unit_of_work,
        lock_repository,
        configuration.clone(),
        clock.clone(),
        identity,
    ));
    let queries: Arc<dyn LedgerQueryService> = Arc::new(LedgerQueryServiceImpl::new(
        log_repository.clone(),
        batch_repository.clone(),
        certificate_repository.clone(),
        employee_repository.clone(),
        configuration.clone(),
        clock.clone(),
    ));
    let libraries = Arc::new(LibraryServiceImpl::new(library_repository));

    TestHarness {
        store,
        clock,
        employees,
        overtime,
        certification,
        ledger,
        queries,
        calendar,
        configuration,
        libraries,
        log_repository,
        batch_repository,
        ledger_repository,
        certificate_repository,
        calendar_repository,
        employee_repository,
    }
}

pub async fn seed_employee(harness: &TestHarness, employee_id: &str) {
    harness
        .employees
        .create_employee(NewEmployee {
            employee_id: employee_id.to_string(),
            first_name: "Juan".to_string(),
            middle_name: None,
            last_name: "dela Cruz".to_string(),
            position: "Administrative Officer II".to_string(),
            office: "Records Section".to_string(),
            email: format!("{}@lgu.gov.ph", employee_id.to_lowercase()),
        })
        .await
        .expect("seed employee");
}

pub fn entry(
    date: &str,
    am_in: Option<&str>,
    am_out: Option<&str>,
    pm_in: Option<&str>,
    pm_out: Option<&str>,
) -> OvertimeEntryInput {
    OvertimeEntryInput {
        date_worked: date.to_string(),
        am_in: am_in.map(str::to_string),
        am_out: am_out.map(str::to_string),
        pm_in: pm_in.map(str::to_string),
        pm_out: pm_out.map(str::to_string),
    }
}

/// Weekday evening worth 1.5 h (17:00-18:30 inside the credit window).
pub fn weekday_evening(date: &str) -> OvertimeEntryInput {
    entry(date, Some("8:00 AM"), Some("12:00 PM"), Some("1:00 PM"), Some("6:30 PM"))
}

/// Weekday evening worth the full 2.0 h clamp.
pub fn weekday_full(date: &str) -> OvertimeEntryInput {
    entry(date, None, None, Some("5:00 PM"), Some("7:00 PM"))
}

/// Weekend day worth 12.0 h (both windows, 1.5x).
pub fn weekend_full(date: &str) -> OvertimeEntryInput {
    entry(date, Some("8:00 AM"), Some("12:00 PM"), Some("1:00 PM"), Some("5:00 PM"))
}

/// Weekend morning worth 4.5 h (3 h at 1.5x).
pub fn weekend_morning(date: &str) -> OvertimeEntryInput {
    entry(date, Some("8:00 AM"), Some("11:00 AM"), None, None)
}

pub fn batch_request(
    employee_id: &str,
    month: Month,
    year: i32,
    entries: Vec<OvertimeEntryInput>,
) -> OvertimeBatchRequest {
    OvertimeBatchRequest {
        employee_id: employee_id.to_string(),
        month,
        year,
        entries,
        correlation_id: None,
    }
}

pub fn hours(value: &str) -> rust_decimal::Decimal {
    value.parse().expect("decimal literal")
}
