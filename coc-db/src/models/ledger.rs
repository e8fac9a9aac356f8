use chrono::{DateTime, Utc};
use coc_api::{CocError, CocResult};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{bounded, bounded_opt};
use crate::store::collections::LEDGER;
use crate::store::{opt_str, opt_uuid, req_hours, req_i64, req_instant, req_str, Document, FieldValue};

pub mod fields {
    pub const TRANSACTION_ID: &str = "transactionId";
    pub const EMPLOYEE_ID: &str = "employeeId";
    pub const TRANSACTION_TYPE: &str = "transactionType";
    pub const HOURS: &str = "hours";
    pub const BATCH_ID: &str = "batchId";
    pub const REFERENCE_ID: &str = "referenceId";
    pub const NOTES: &str = "notes";
    pub const TRANSACTION_DATE: &str = "transactionDate";
    pub const PERFORMED_BY: &str = "performedBy";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntryModel {
    pub transaction_id: i64,
    pub employee_id: HeaplessString<20>,
    pub entry_type: LedgerEntryType,
    pub hours: Decimal,
    pub batch_id: Option<Uuid>,
    pub reference_id: Option<HeaplessString<100>>,
    pub notes: HeaplessString<200>,
    pub transaction_date: DateTime<Utc>,
    pub performed_by: HeaplessString<50>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEntryType {
    Credit,
    Debit,
    Adjustment,
    Expiration,
}

impl LedgerEntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerEntryType::Credit => "Credit",
            LedgerEntryType::Debit => "Debit",
            LedgerEntryType::Adjustment => "Adjustment",
            LedgerEntryType::Expiration => "Expiration",
        }
    }

    pub fn parse(raw: &str) -> Option<LedgerEntryType> {
        match raw {
            "Credit" => Some(LedgerEntryType::Credit),
            "Debit" => Some(LedgerEntryType::Debit),
            "Adjustment" => Some(LedgerEntryType::Adjustment),
            "Expiration" => Some(LedgerEntryType::Expiration),
            _ => None,
        }
    }
}

impl LedgerEntryModel {
    pub fn document_id(&self) -> String {
        self.transaction_id.to_string()
    }

    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.insert(
            fields::TRANSACTION_ID.into(),
            FieldValue::Int(self.transaction_id),
        );
        doc.insert(
            fields::EMPLOYEE_ID.into(),
            FieldValue::Str(self.employee_id.to_string()),
        );
        doc.insert(
            fields::TRANSACTION_TYPE.into(),
            FieldValue::Str(self.entry_type.as_str().into()),
        );
        doc.insert(fields::HOURS.into(), FieldValue::from_hours(self.hours));
        doc.insert(
            fields::BATCH_ID.into(),
            FieldValue::from_opt_str(self.batch_id.map(|u| u.to_string()).as_deref()),
        );
        doc.insert(
            fields::REFERENCE_ID.into(),
            FieldValue::from_opt_str(self.reference_id.as_ref().map(|s| s.as_str())),
        );
        doc.insert(fields::NOTES.into(), FieldValue::Str(self.notes.to_string()));
        doc.insert(
            fields::TRANSACTION_DATE.into(),
            FieldValue::Timestamp(self.transaction_date),
        );
        doc.insert(
            fields::PERFORMED_BY.into(),
            FieldValue::Str(self.performed_by.to_string()),
        );
        doc
    }

    pub fn from_document(id: &str, doc: &Document) -> CocResult<LedgerEntryModel> {
        let type_raw = req_str(doc, LEDGER, id, fields::TRANSACTION_TYPE)?;
        let entry_type = LedgerEntryType::parse(&type_raw).ok_or_else(|| CocError::SchemaDrift {
            collection: LEDGER.to_string(),
            document_id: id.to_string(),
            field: fields::TRANSACTION_TYPE.to_string(),
        })?;

        Ok(LedgerEntryModel {
            transaction_id: req_i64(doc, LEDGER, id, fields::TRANSACTION_ID)?,
            employee_id: bounded(
                LEDGER,
                id,
                fields::EMPLOYEE_ID,
                &req_str(doc, LEDGER, id, fields::EMPLOYEE_ID)?,
            )?,
            entry_type,
            hours: req_hours(doc, LEDGER, id, fields::HOURS)?,
            batch_id: opt_uuid(doc, LEDGER, id, fields::BATCH_ID)?,
            reference_id: bounded_opt(LEDGER, id, fields::REFERENCE_ID, opt_str(doc, fields::REFERENCE_ID))?,
            notes: bounded(
                LEDGER,
                id,
                fields::NOTES,
                &req_str(doc, LEDGER, id, fields::NOTES)?,
            )?,
            transaction_date: req_instant(doc, LEDGER, id, fields::TRANSACTION_DATE)?,
            performed_by: bounded(
                LEDGER,
                id,
                fields::PERFORMED_BY,
                &req_str(doc, LEDGER, id, fields::PERFORMED_BY)?,
            )?,
        })
    }
}
