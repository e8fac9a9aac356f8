pub mod calendar_service;
pub mod certification_service;
pub mod configuration_service;
pub mod context;
pub mod employee_service;
pub mod ledger_service;
pub mod library_service;
pub mod overtime_service;
pub mod query_service;

pub use calendar_service::*;
pub use certification_service::*;
pub use configuration_service::*;
pub use context::*;
pub use employee_service::*;
pub use ledger_service::*;
pub use library_service::*;
pub use overtime_service::*;
pub use query_service::*;
