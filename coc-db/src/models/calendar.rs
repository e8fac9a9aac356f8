use chrono::NaiveDate;
use coc_api::{CocError, CocResult};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::bounded;
use crate::store::collections::HOLIDAYS;
use crate::store::{req_date, req_i64, req_str, Document, FieldValue};

pub mod fields {
    pub const HOLIDAY_ID: &str = "holidayId";
    pub const NAME: &str = "name";
    pub const DATE: &str = "date";
    pub const YEAR: &str = "year";
    pub const TYPE: &str = "type";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayModel {
    pub holiday_id: Uuid,
    pub name: HeaplessString<100>,
    pub date: NaiveDate,
    pub year: i32,
    pub holiday_type: HolidayType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HolidayType {
    Regular,
    Special,
}

impl HolidayType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HolidayType::Regular => "Regular",
            HolidayType::Special => "Special",
        }
    }

    pub fn parse(raw: &str) -> Option<HolidayType> {
        match raw {
            "Regular" => Some(HolidayType::Regular),
            "Special" => Some(HolidayType::Special),
            _ => None,
        }
    }
}

impl HolidayModel {
    pub fn document_id(&self) -> String {
        self.holiday_id.to_string()
    }

    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.insert(
            fields::HOLIDAY_ID.into(),
            FieldValue::Str(self.holiday_id.to_string()),
        );
        doc.insert(fields::NAME.into(), FieldValue::Str(self.name.to_string()));
        doc.insert(fields::DATE.into(), FieldValue::from_date(self.date));
        doc.insert(fields::YEAR.into(), FieldValue::Int(self.year as i64));
        doc.insert(
            fields::TYPE.into(),
            FieldValue::Str(self.holiday_type.as_str().into()),
        );
        doc
    }

    pub fn from_document(id: &str, doc: &Document) -> CocResult<HolidayModel> {
        let type_raw = req_str(doc, HOLIDAYS, id, fields::TYPE)?;
        let holiday_type = HolidayType::parse(&type_raw).ok_or_else(|| CocError::SchemaDrift {
            collection: HOLIDAYS.to_string(),
            document_id: id.to_string(),
            field: fields::TYPE.to_string(),
        })?;
        let holiday_id = id.parse::<Uuid>().map_err(|_| CocError::SchemaDrift {
            collection: HOLIDAYS.to_string(),
            document_id: id.to_string(),
            field: fields::HOLIDAY_ID.to_string(),
        })?;

        Ok(HolidayModel {
            holiday_id,
            name: bounded(
                HOLIDAYS,
                id,
                fields::NAME,
                &req_str(doc, HOLIDAYS, id, fields::NAME)?,
            )?,
            date: req_date(doc, HOLIDAYS, id, fields::DATE)?,
            year: req_i64(doc, HOLIDAYS, id, fields::YEAR)? as i32,
            holiday_type,
        })
    }
}
