use coc_api::domain::{LedgerEntry, LedgerEntryType as DomainLedgerEntryType};
use coc_db::models::{LedgerEntryModel, LedgerEntryType as ModelLedgerEntryType};

/// Mapper for converting between domain and database ledger entries
pub struct LedgerMapper;

impl LedgerMapper {
    pub fn to_model(entry: LedgerEntry) -> LedgerEntryModel {
        LedgerEntryModel {
            transaction_id: entry.transaction_id,
            employee_id: entry.employee_id,
            entry_type: Self::entry_type_to_model(entry.entry_type),
            hours: entry.hours,
            batch_id: entry.batch_id,
            reference_id: entry.reference_id,
            notes: entry.notes,
            transaction_date: entry.transaction_date,
            performed_by: entry.performed_by,
        }
    }

    pub fn from_model(model: LedgerEntryModel) -> LedgerEntry {
        LedgerEntry {
            transaction_id: model.transaction_id,
            employee_id: model.employee_id,
            entry_type: Self::entry_type_from_model(model.entry_type),
            hours: model.hours,
            batch_id: model.batch_id,
            reference_id: model.reference_id,
            notes: model.notes,
            transaction_date: model.transaction_date,
            performed_by: model.performed_by,
        }
    }

    pub fn entry_type_to_model(entry_type: DomainLedgerEntryType) -> ModelLedgerEntryType {
        match entry_type {
            DomainLedgerEntryType::Credit => ModelLedgerEntryType::Credit,
            DomainLedgerEntryType::Debit => ModelLedgerEntryType::Debit,
            DomainLedgerEntryType::Adjustment => ModelLedgerEntryType::Adjustment,
            DomainLedgerEntryType::Expiration => ModelLedgerEntryType::Expiration,
        }
    }

    pub fn entry_type_from_model(entry_type: ModelLedgerEntryType) -> DomainLedgerEntryType {
        match entry_type {
            ModelLedgerEntryType::Credit => DomainLedgerEntryType::Credit,
            ModelLedgerEntryType::Debit => DomainLedgerEntryType::Debit,
            ModelLedgerEntryType::Adjustment => DomainLedgerEntryType::Adjustment,
            ModelLedgerEntryType::Expiration => DomainLedgerEntryType::Expiration,
        }
    }
}
