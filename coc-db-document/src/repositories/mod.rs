pub mod calendar;
pub mod certificate;
pub mod configuration;
pub mod credit_batch;
pub mod employee;
pub(crate) mod id_gen;
pub mod ledger;
pub mod library;
pub mod lock;
pub mod overtime_log;
pub mod unit_of_work;

pub use calendar::DocumentCalendarRepository;
pub use certificate::DocumentCertificateRepository;
pub use configuration::DocumentConfigurationRepository;
pub use credit_batch::DocumentCreditBatchRepository;
pub use employee::DocumentEmployeeRepository;
pub use ledger::DocumentLedgerRepository;
pub use library::DocumentLibraryRepository;
pub use lock::DocumentLockRepository;
pub use overtime_log::DocumentOvertimeLogRepository;
pub use unit_of_work::DocumentUnitOfWork;
