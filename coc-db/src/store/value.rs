use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use coc_api::{CocError, CocResult};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The value types the keyed document store understands. Credit-hours are
/// carried as `Float` at one-decimal precision; civil dates as ISO-8601
/// strings; instants as `Timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
    Array(Vec<FieldValue>),
    Map(BTreeMap<String, FieldValue>),
    Null,
}

pub type Document = BTreeMap<String, FieldValue>;

impl FieldValue {
    pub fn from_date(date: NaiveDate) -> FieldValue {
        FieldValue::Str(date.format("%Y-%m-%d").to_string())
    }

    pub fn from_hours(hours: Decimal) -> FieldValue {
        // one-decimal quantities survive the f64 round trip exactly
        FieldValue::Float(hours.to_f64().unwrap_or(0.0))
    }

    pub fn from_opt_str(value: Option<&str>) -> FieldValue {
        match value {
            Some(s) => FieldValue::Str(s.to_string()),
            None => FieldValue::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

fn drift(collection: &str, id: &str, field: &str) -> CocError {
    CocError::SchemaDrift {
        collection: collection.to_string(),
        document_id: id.to_string(),
        field: field.to_string(),
    }
}

/// Required-field accessors. A missing or mistyped required field is
/// schema drift; closed records never tolerate it.
pub fn req_str(doc: &Document, collection: &str, id: &str, field: &str) -> CocResult<String> {
    match doc.get(field) {
        Some(FieldValue::Str(s)) => Ok(s.clone()),
        _ => Err(drift(collection, id, field)),
    }
}

pub fn opt_str(doc: &Document, field: &str) -> Option<String> {
    match doc.get(field) {
        Some(FieldValue::Str(s)) => Some(s.clone()),
        _ => None,
    }
}

pub fn req_i64(doc: &Document, collection: &str, id: &str, field: &str) -> CocResult<i64> {
    match doc.get(field) {
        Some(FieldValue::Int(v)) => Ok(*v),
        _ => Err(drift(collection, id, field)),
    }
}

pub fn req_bool(doc: &Document, collection: &str, id: &str, field: &str) -> CocResult<bool> {
    match doc.get(field) {
        Some(FieldValue::Bool(v)) => Ok(*v),
        _ => Err(drift(collection, id, field)),
    }
}

pub fn req_hours(doc: &Document, collection: &str, id: &str, field: &str) -> CocResult<Decimal> {
    match doc.get(field) {
        Some(FieldValue::Float(v)) => Decimal::try_from(*v)
            .map(|d| d.round_dp(1))
            .map_err(|_| drift(collection, id, field)),
        Some(FieldValue::Int(v)) => Ok(Decimal::from(*v)),
        _ => Err(drift(collection, id, field)),
    }
}

pub fn req_date(doc: &Document, collection: &str, id: &str, field: &str) -> CocResult<NaiveDate> {
    match doc.get(field) {
        Some(FieldValue::Str(s)) => s
            .parse::<NaiveDate>()
            .map_err(|_| drift(collection, id, field)),
        _ => Err(drift(collection, id, field)),
    }
}

pub fn opt_date(doc: &Document, collection: &str, id: &str, field: &str) -> CocResult<Option<NaiveDate>> {
    match doc.get(field) {
        None | Some(FieldValue::Null) => Ok(None),
        Some(FieldValue::Str(s)) => s
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(|_| drift(collection, id, field)),
        _ => Err(drift(collection, id, field)),
    }
}

pub fn req_instant(
    doc: &Document,
    collection: &str,
    id: &str,
    field: &str,
) -> CocResult<DateTime<Utc>> {
    match doc.get(field) {
        Some(FieldValue::Timestamp(ts)) => Ok(*ts),
        _ => Err(drift(collection, id, field)),
    }
}

pub fn req_uuid(doc: &Document, collection: &str, id: &str, field: &str) -> CocResult<uuid::Uuid> {
    match doc.get(field) {
        Some(FieldValue::Str(s)) => s
            .parse::<uuid::Uuid>()
            .map_err(|_| drift(collection, id, field)),
        _ => Err(drift(collection, id, field)),
    }
}

pub fn opt_uuid(doc: &Document, collection: &str, id: &str, field: &str) -> CocResult<Option<uuid::Uuid>> {
    match doc.get(field) {
        None | Some(FieldValue::Null) => Ok(None),
        Some(FieldValue::Str(s)) => s
            .parse::<uuid::Uuid>()
            .map(Some)
            .map_err(|_| drift(collection, id, field)),
        _ => Err(drift(collection, id, field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours_round_trip_exact_at_one_decimal() {
        for raw in [0i64, 1, 15, 75, 120, 400, 1200] {
            let hours = Decimal::new(raw, 1);
            let mut doc = Document::new();
            doc.insert("hours".to_string(), FieldValue::from_hours(hours));
            let back = req_hours(&doc, "t", "1", "hours").unwrap();
            assert_eq!(back, hours);
        }
    }

    #[test]
    fn test_missing_required_field_is_schema_drift() {
        let doc = Document::new();
        let err = req_str(&doc, "overtimeLogs", "17", "employeeId").unwrap_err();
        assert!(matches!(err, CocError::SchemaDrift { .. }));
    }

    #[test]
    fn test_null_optional_date() {
        let mut doc = Document::new();
        doc.insert("validUntil".to_string(), FieldValue::Null);
        assert_eq!(opt_date(&doc, "t", "1", "validUntil").unwrap(), None);
    }
}
