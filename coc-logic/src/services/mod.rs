pub mod calendar_service_impl;
pub mod certification_service_impl;
pub mod configuration_service_impl;
pub mod context;
pub mod employee_service_impl;
pub mod ledger_service_impl;
pub mod library_service_impl;
pub mod overtime_service_impl;
pub mod query_service_impl;

pub use calendar_service_impl::*;
pub use certification_service_impl::*;
pub use configuration_service_impl::*;
pub use context::*;
pub use employee_service_impl::*;
pub use ledger_service_impl::*;
pub use library_service_impl::*;
pub use overtime_service_impl::*;
pub use query_service_impl::*;
