use coc_api::domain::{
    BatchSource as DomainBatchSource, BatchStatus as DomainBatchStatus, CreditBatch,
};
use coc_db::models::{
    BatchSource as ModelBatchSource, BatchStatus as ModelBatchStatus, CreditBatchModel,
};

/// Mapper for converting between domain and database credit batches
pub struct CreditBatchMapper;

impl CreditBatchMapper {
    pub fn to_model(batch: CreditBatch) -> CreditBatchModel {
        CreditBatchModel {
            batch_id: batch.batch_id,
            employee_id: batch.employee_id,
            earned_month: batch.earned_month,
            earned_year: batch.earned_year,
            original_hours: batch.original_hours,
            remaining_hours: batch.remaining_hours,
            used_hours: batch.used_hours,
            status: Self::status_to_model(batch.status),
            date_of_issuance: batch.date_of_issuance,
            valid_until: batch.valid_until,
            source: Self::source_to_model(batch.source),
            source_certificate_id: batch.source_certificate_id,
            notes: batch.notes,
        }
    }

    pub fn from_model(model: CreditBatchModel) -> CreditBatch {
        CreditBatch {
            batch_id: model.batch_id,
            employee_id: model.employee_id,
            earned_month: model.earned_month,
            earned_year: model.earned_year,
            original_hours: model.original_hours,
            remaining_hours: model.remaining_hours,
            used_hours: model.used_hours,
            status: Self::status_from_model(model.status),
            date_of_issuance: model.date_of_issuance,
            valid_until: model.valid_until,
            source: Self::source_from_model(model.source),
            source_certificate_id: model.source_certificate_id,
            notes: model.notes,
        }
    }

    pub fn status_to_model(status: DomainBatchStatus) -> ModelBatchStatus {
        match status {
            DomainBatchStatus::Active => ModelBatchStatus::Active,
            DomainBatchStatus::Used => ModelBatchStatus::Used,
            DomainBatchStatus::Expired => ModelBatchStatus::Expired,
        }
    }

    pub fn status_from_model(status: ModelBatchStatus) -> DomainBatchStatus {
        match status {
            ModelBatchStatus::Active => DomainBatchStatus::Active,
            ModelBatchStatus::Used => DomainBatchStatus::Used,
            ModelBatchStatus::Expired => DomainBatchStatus::Expired,
        }
    }

    pub fn source_to_model(source: DomainBatchSource) -> ModelBatchSource {
        match source {
            DomainBatchSource::MonthlyCertificate => ModelBatchSource::MonthlyCertificate,
            DomainBatchSource::HistoricalImport => ModelBatchSource::HistoricalImport,
        }
    }

    pub fn source_from_model(source: ModelBatchSource) -> DomainBatchSource {
        match source {
            ModelBatchSource::MonthlyCertificate => DomainBatchSource::MonthlyCertificate,
            ModelBatchSource::HistoricalImport => DomainBatchSource::HistoricalImport,
        }
    }
}
