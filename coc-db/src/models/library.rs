use coc_api::{CocError, CocResult};
use serde::{Deserialize, Serialize};

use crate::store::collections::LIBRARIES;
use crate::store::{Document, FieldValue};

pub mod fields {
    pub const ENTRIES: &str = "entries";
}

/// One library list; the category key is the document id and the entries
/// array preserves display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryListModel {
    pub category: String,
    pub entries: Vec<String>,
}

impl LibraryListModel {
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.insert(
            fields::ENTRIES.into(),
            FieldValue::Array(
                self.entries
                    .iter()
                    .map(|e| FieldValue::Str(e.clone()))
                    .collect(),
            ),
        );
        doc
    }

    pub fn from_document(id: &str, doc: &Document) -> CocResult<LibraryListModel> {
        let drift = || CocError::SchemaDrift {
            collection: LIBRARIES.to_string(),
            document_id: id.to_string(),
            field: fields::ENTRIES.to_string(),
        };
        let raw = match doc.get(fields::ENTRIES) {
            Some(FieldValue::Array(values)) => values,
            _ => return Err(drift()),
        };
        let mut entries = Vec::with_capacity(raw.len());
        for value in raw {
            match value {
                FieldValue::Str(s) => entries.push(s.clone()),
                _ => return Err(drift()),
            }
        }
        Ok(LibraryListModel {
            category: id.to_string(),
            entries,
        })
    }
}
