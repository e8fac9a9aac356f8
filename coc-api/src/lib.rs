pub mod domain;
pub mod service;
pub mod views;
pub mod error;

pub use domain::*;
pub use service::*;
pub use views::*;
pub use error::*;
