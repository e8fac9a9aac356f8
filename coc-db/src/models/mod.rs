pub mod calendar;
pub mod certificate;
pub mod configuration;
pub mod credit_batch;
pub mod employee;
pub mod ledger;
pub mod library;
pub mod lock;
pub mod overtime_log;

pub use calendar::{HolidayModel, HolidayType};
pub use certificate::CertificateModel;
pub use configuration::ConfigurationModel;
pub use credit_batch::{BatchSource, BatchStatus, CreditBatchModel};
pub use employee::{EmployeeModel, EmployeeStatus};
pub use ledger::{LedgerEntryModel, LedgerEntryType};
pub use library::LibraryListModel;
pub use lock::LockModel;
pub use overtime_log::{DayType, LogStatus, OvertimeLogModel};

use coc_api::{CocError, CocResult};
use heapless::String as HeaplessString;

/// Bound a stored string into its model field width; overflow means the
/// row no longer matches the closed record shape.
pub(crate) fn bounded<const N: usize>(
    collection: &str,
    id: &str,
    field: &str,
    raw: &str,
) -> CocResult<HeaplessString<N>> {
    HeaplessString::try_from(raw).map_err(|_| CocError::SchemaDrift {
        collection: collection.to_string(),
        document_id: id.to_string(),
        field: field.to_string(),
    })
}

pub(crate) fn bounded_opt<const N: usize>(
    collection: &str,
    id: &str,
    field: &str,
    raw: Option<String>,
) -> CocResult<Option<HeaplessString<N>>> {
    match raw {
        Some(s) => bounded(collection, id, field, s.as_str()).map(Some),
        None => Ok(None),
    }
}
