use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha1::{Digest, Sha1};

use crate::form::form_model::Field;

/// A section after reconstruction: the raw section's attributes with the
/// unordered field list replaced by dense rows. Every row is gap-free; the
/// slots are authored fields or synthesized placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionLayout {
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sortorder: Option<i64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(default)]
    pub rows: Vec<Vec<Field>>,
}

impl SectionLayout {
    pub fn placeholder_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|f| f.is_placeholder())
            .count()
    }
}

/// The reconstructed form: identity attributes copied from the raw payload
/// plus the per-section grids, keyed by section id in stable order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormLayout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(rename = "lastModified", default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,

    #[serde(default)]
    pub sections: BTreeMap<String, SectionLayout>,
}

impl FormLayout {
    /// Stable SHA-1 over the serialized layout. Two payloads that
    /// reconstruct to the same grids get the same fingerprint, which is what
    /// revision tracking in the store compares.
    pub fn fingerprint(&self) -> String {
        let encoded = serde_json::to_string(self).unwrap_or_default();
        let mut hasher = Sha1::new();
        hasher.update(encoded.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    pub fn row_count(&self) -> usize {
        self.sections.values().map(|s| s.rows.len()).sum()
    }

    pub fn placeholder_count(&self) -> usize {
        self.sections.values().map(|s| s.placeholder_count()).sum()
    }
}

/// The reorder projection of one section: just enough to drag sections
/// around without touching their grids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSummary {
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sortorder: Option<i64>,
}
