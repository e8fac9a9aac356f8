pub mod calendar_validation;
pub mod overtime_validation;

pub use calendar_validation::*;
pub use overtime_validation::*;
