use chrono::{DateTime, NaiveDate, Utc};
use coc_api::{CocError, CocResult, Month};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::bounded;
use crate::store::collections::CERTIFICATES;
use crate::store::{req_date, req_hours, req_i64, req_instant, req_str, Document, FieldValue};

pub mod fields {
    pub const CERTIFICATE_ID: &str = "certificateId";
    pub const EMPLOYEE_ID: &str = "employeeId";
    pub const MONTH: &str = "month";
    pub const YEAR: &str = "year";
    pub const TOTAL_HOURS: &str = "totalHours";
    pub const DATE_OF_ISSUANCE: &str = "dateOfIssuance";
    pub const VALID_UNTIL: &str = "validUntil";
    pub const CERTIFIED_BY: &str = "certifiedBy";
    pub const CERTIFIED_AT: &str = "certifiedAt";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateModel {
    pub certificate_id: Uuid,
    pub employee_id: HeaplessString<20>,
    pub month: Month,
    pub year: i32,
    pub total_hours: Decimal,
    pub date_of_issuance: NaiveDate,
    pub valid_until: NaiveDate,
    pub certified_by: HeaplessString<50>,
    pub certified_at: DateTime<Utc>,
}

impl CertificateModel {
    pub fn document_id(&self) -> String {
        self.certificate_id.to_string()
    }

    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.insert(
            fields::CERTIFICATE_ID.into(),
            FieldValue::Str(self.certificate_id.to_string()),
        );
        doc.insert(
            fields::EMPLOYEE_ID.into(),
            FieldValue::Str(self.employee_id.to_string()),
        );
        doc.insert(fields::MONTH.into(), FieldValue::Str(self.month.name().into()));
        doc.insert(fields::YEAR.into(), FieldValue::Int(self.year as i64));
        doc.insert(
            fields::TOTAL_HOURS.into(),
            FieldValue::from_hours(self.total_hours),
        );
        doc.insert(
            fields::DATE_OF_ISSUANCE.into(),
            FieldValue::from_date(self.date_of_issuance),
        );
        doc.insert(fields::VALID_UNTIL.into(), FieldValue::from_date(self.valid_until));
        doc.insert(
            fields::CERTIFIED_BY.into(),
            FieldValue::Str(self.certified_by.to_string()),
        );
        doc.insert(
            fields::CERTIFIED_AT.into(),
            FieldValue::Timestamp(self.certified_at),
        );
        doc
    }

    pub fn from_document(id: &str, doc: &Document) -> CocResult<CertificateModel> {
        let month_raw = req_str(doc, CERTIFICATES, id, fields::MONTH)?;
        let month = Month::parse(&month_raw).ok_or_else(|| CocError::SchemaDrift {
            collection: CERTIFICATES.to_string(),
            document_id: id.to_string(),
            field: fields::MONTH.to_string(),
        })?;
        let certificate_id = id.parse::<Uuid>().map_err(|_| CocError::SchemaDrift {
            collection: CERTIFICATES.to_string(),
            document_id: id.to_string(),
            field: fields::CERTIFICATE_ID.to_string(),
        })?;

        Ok(CertificateModel {
            certificate_id,
            employee_id: bounded(
                CERTIFICATES,
                id,
                fields::EMPLOYEE_ID,
                &req_str(doc, CERTIFICATES, id, fields::EMPLOYEE_ID)?,
            )?,
            month,
            year: req_i64(doc, CERTIFICATES, id, fields::YEAR)? as i32,
            total_hours: req_hours(doc, CERTIFICATES, id, fields::TOTAL_HOURS)?,
            date_of_issuance: req_date(doc, CERTIFICATES, id, fields::DATE_OF_ISSUANCE)?,
            valid_until: req_date(doc, CERTIFICATES, id, fields::VALID_UNTIL)?,
            certified_by: bounded(
                CERTIFICATES,
                id,
                fields::CERTIFIED_BY,
                &req_str(doc, CERTIFICATES, id, fields::CERTIFIED_BY)?,
            )?,
            certified_at: req_instant(doc, CERTIFICATES, id, fields::CERTIFIED_AT)?,
        })
    }
}
