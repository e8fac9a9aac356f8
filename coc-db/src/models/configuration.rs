use chrono::{DateTime, Utc};
use coc_api::CocResult;
use serde::{Deserialize, Serialize};

use crate::store::collections::CONFIGURATION;
use crate::store::{req_instant, req_str, Document, FieldValue};

pub mod fields {
    pub const VALUE: &str = "value";
    pub const UPDATED_AT: &str = "updatedAt";
}

/// One configuration document; the key is the document id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurationModel {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

impl ConfigurationModel {
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.insert(fields::VALUE.into(), FieldValue::Str(self.value.clone()));
        doc.insert(fields::UPDATED_AT.into(), FieldValue::Timestamp(self.updated_at));
        doc
    }

    pub fn from_document(id: &str, doc: &Document) -> CocResult<ConfigurationModel> {
        Ok(ConfigurationModel {
            key: id.to_string(),
            value: req_str(doc, CONFIGURATION, id, fields::VALUE)?,
            updated_at: req_instant(doc, CONFIGURATION, id, fields::UPDATED_AT)?,
        })
    }
}
