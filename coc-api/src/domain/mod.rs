pub mod common;
pub mod employee;
pub mod overtime_log;
pub mod calendar;
pub mod credit_batch;
pub mod ledger;
pub mod certificate;
pub mod configuration;
pub mod library;

pub use common::*;
pub use employee::*;
pub use overtime_log::*;
pub use calendar::*;
pub use credit_batch::*;
pub use ledger::*;
pub use certificate::*;
pub use configuration::*;
pub use library::*;
