pub mod accrual;
pub mod constants;
pub mod mappers;
pub mod services;
pub mod validation;

pub use mappers::*;
pub use services::*;
