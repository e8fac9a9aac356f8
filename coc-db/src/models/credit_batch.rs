use chrono::NaiveDate;
use coc_api::{CocError, CocResult, Month};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{bounded, bounded_opt};
use crate::store::collections::CREDIT_BATCHES;
use crate::store::{opt_str, opt_uuid, req_date, req_hours, req_i64, req_str, Document, FieldValue};

pub mod fields {
    pub const BATCH_ID: &str = "batchId";
    pub const EMPLOYEE_ID: &str = "employeeId";
    pub const EARNED_MONTH: &str = "earnedMonth";
    pub const EARNED_YEAR: &str = "earnedYear";
    pub const ORIGINAL_HOURS: &str = "originalHours";
    pub const REMAINING_HOURS: &str = "remainingHours";
    pub const USED_HOURS: &str = "usedHours";
    pub const STATUS: &str = "status";
    pub const DATE_OF_ISSUANCE: &str = "dateOfIssuance";
    pub const VALID_UNTIL: &str = "validUntil";
    pub const SOURCE_TYPE: &str = "sourceType";
    pub const SOURCE_CERTIFICATE_ID: &str = "sourceCertificateId";
    pub const NOTES: &str = "notes";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditBatchModel {
    pub batch_id: Uuid,
    pub employee_id: HeaplessString<20>,
    pub earned_month: Month,
    pub earned_year: i32,
    pub original_hours: Decimal,
    pub remaining_hours: Decimal,
    pub used_hours: Decimal,
    pub status: BatchStatus,
    pub date_of_issuance: NaiveDate,
    pub valid_until: NaiveDate,
    pub source: BatchSource,
    pub source_certificate_id: Option<Uuid>,
    pub notes: Option<HeaplessString<200>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchStatus {
    Active,
    Used,
    Expired,
}

impl BatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::Active => "Active",
            BatchStatus::Used => "Used",
            BatchStatus::Expired => "Expired",
        }
    }

    pub fn parse(raw: &str) -> Option<BatchStatus> {
        match raw {
            "Active" => Some(BatchStatus::Active),
            "Used" => Some(BatchStatus::Used),
            "Expired" => Some(BatchStatus::Expired),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchSource {
    MonthlyCertificate,
    HistoricalImport,
}

impl BatchSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchSource::MonthlyCertificate => "MonthlyCertificate",
            BatchSource::HistoricalImport => "HistoricalImport",
        }
    }

    pub fn parse(raw: &str) -> Option<BatchSource> {
        match raw {
            "MonthlyCertificate" => Some(BatchSource::MonthlyCertificate),
            "HistoricalImport" => Some(BatchSource::HistoricalImport),
            _ => None,
        }
    }
}

fn drift(id: &str, field: &str) -> CocError {
    CocError::SchemaDrift {
        collection: CREDIT_BATCHES.to_string(),
        document_id: id.to_string(),
        field: field.to_string(),
    }
}

impl CreditBatchModel {
    pub fn document_id(&self) -> String {
        self.batch_id.to_string()
    }

    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.insert(
            fields::BATCH_ID.into(),
            FieldValue::Str(self.batch_id.to_string()),
        );
        doc.insert(
            fields::EMPLOYEE_ID.into(),
            FieldValue::Str(self.employee_id.to_string()),
        );
        doc.insert(
            fields::EARNED_MONTH.into(),
            FieldValue::Str(self.earned_month.name().into()),
        );
        doc.insert(fields::EARNED_YEAR.into(), FieldValue::Int(self.earned_year as i64));
        doc.insert(
            fields::ORIGINAL_HOURS.into(),
            FieldValue::from_hours(self.original_hours),
        );
        doc.insert(
            fields::REMAINING_HOURS.into(),
            FieldValue::from_hours(self.remaining_hours),
        );
        doc.insert(fields::USED_HOURS.into(), FieldValue::from_hours(self.used_hours));
        doc.insert(fields::STATUS.into(), FieldValue::Str(self.status.as_str().into()));
        doc.insert(
            fields::DATE_OF_ISSUANCE.into(),
            FieldValue::from_date(self.date_of_issuance),
        );
        doc.insert(fields::VALID_UNTIL.into(), FieldValue::from_date(self.valid_until));
        doc.insert(
            fields::SOURCE_TYPE.into(),
            FieldValue::Str(self.source.as_str().into()),
        );
        doc.insert(
            fields::SOURCE_CERTIFICATE_ID.into(),
            FieldValue::from_opt_str(self.source_certificate_id.map(|u| u.to_string()).as_deref()),
        );
        doc.insert(
            fields::NOTES.into(),
            FieldValue::from_opt_str(self.notes.as_ref().map(|s| s.as_str())),
        );
        doc
    }

    pub fn from_document(id: &str, doc: &Document) -> CocResult<CreditBatchModel> {
        let month_raw = req_str(doc, CREDIT_BATCHES, id, fields::EARNED_MONTH)?;
        let earned_month =
            Month::parse(&month_raw).ok_or_else(|| drift(id, fields::EARNED_MONTH))?;
        let status_raw = req_str(doc, CREDIT_BATCHES, id, fields::STATUS)?;
        let status = BatchStatus::parse(&status_raw).ok_or_else(|| drift(id, fields::STATUS))?;
        let source_raw = req_str(doc, CREDIT_BATCHES, id, fields::SOURCE_TYPE)?;
        let source = BatchSource::parse(&source_raw).ok_or_else(|| drift(id, fields::SOURCE_TYPE))?;
        let batch_id = id.parse::<Uuid>().map_err(|_| drift(id, fields::BATCH_ID))?;

        Ok(CreditBatchModel {
            batch_id,
            employee_id: bounded(
                CREDIT_BATCHES,
                id,
                fields::EMPLOYEE_ID,
                &req_str(doc, CREDIT_BATCHES, id, fields::EMPLOYEE_ID)?,
            )?,
            earned_month,
            earned_year: req_i64(doc, CREDIT_BATCHES, id, fields::EARNED_YEAR)? as i32,
            original_hours: req_hours(doc, CREDIT_BATCHES, id, fields::ORIGINAL_HOURS)?,
            remaining_hours: req_hours(doc, CREDIT_BATCHES, id, fields::REMAINING_HOURS)?,
            used_hours: req_hours(doc, CREDIT_BATCHES, id, fields::USED_HOURS)?,
            status,
            date_of_issuance: req_date(doc, CREDIT_BATCHES, id, fields::DATE_OF_ISSUANCE)?,
            valid_until: req_date(doc, CREDIT_BATCHES, id, fields::VALID_UNTIL)?,
            source,
            source_certificate_id: opt_uuid(doc, CREDIT_BATCHES, id, fields::SOURCE_CERTIFICATE_ID)?,
            notes: bounded_opt(CREDIT_BATCHES, id, fields::NOTES, opt_str(doc, fields::NOTES))?,
        })
    }
}
