pub mod calendar_mapper;
pub mod certificate_mapper;
pub mod credit_batch_mapper;
pub mod employee_mapper;
pub mod ledger_mapper;
pub mod overtime_log_mapper;

pub use calendar_mapper::*;
pub use certificate_mapper::*;
pub use credit_batch_mapper::*;
pub use employee_mapper::*;
pub use ledger_mapper::*;
pub use overtime_log_mapper::*;
