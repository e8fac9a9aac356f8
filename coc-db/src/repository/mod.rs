pub mod calendar_repository;
pub mod certificate_repository;
pub mod configuration_repository;
pub mod credit_batch_repository;
pub mod employee_repository;
pub mod ledger_repository;
pub mod library_repository;
pub mod lock_repository;
pub mod overtime_log_repository;
pub mod unit_of_work;

pub use calendar_repository::*;
pub use certificate_repository::*;
pub use configuration_repository::*;
pub use credit_batch_repository::*;
pub use employee_repository::*;
pub use ledger_repository::*;
pub use library_repository::*;
pub use lock_repository::*;
pub use overtime_log_repository::*;
pub use unit_of_work::*;
