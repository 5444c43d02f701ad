use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Name of the option entry that carries a field's grid placement.
pub const POSITION_OPTION: &str = "position";

/// One `{name, value}` entry from a field's option list. The value is kept
/// as raw JSON; only the `position` option is ever interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

/// An authored form field as delivered by the service, or a placeholder
/// synthesized during reconstruction.
///
/// Reconstruction only looks at the option list; every other attribute the
/// service sends (label, identifier, validation rules, ...) lands in the
/// flattened `extra` map and passes through to the output untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Field {
    /// Value of the first option with the given name.
    pub fn option_value(&self, name: &str) -> Option<&Value> {
        self.options.iter().find(|o| o.name == name).map(|o| &o.value)
    }

    /// Build the placeholder that fills an unoccupied grid slot. `col` is
    /// 1-based; `row` is omitted from the position when the slot belongs to
    /// the unknown-row bucket.
    pub fn placeholder(col: usize, row: Option<i64>, size: usize) -> Field {
        let mut value = Map::new();
        value.insert("col".to_string(), Value::from(col as u64));
        if let Some(row) = row {
            value.insert("row".to_string(), Value::from(row));
        }
        value.insert("size".to_string(), Value::from(size as u64));

        Field {
            r#type: Some("empty".to_string()),
            options: vec![FieldOption {
                name: POSITION_OPTION.to_string(),
                value: Value::Object(value),
            }],
            extra: Map::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.r#type.as_deref() == Some("empty")
    }

    /// Display label for diagnostics: the first human-readable attribute
    /// the payload carries, falling back to the type tag.
    pub fn display_label(&self) -> String {
        for key in ["label", "name", "id"] {
            if let Some(text) = self.extra.get(key).and_then(Value::as_str) {
                return text.to_string();
            }
        }
        self.r#type.clone().unwrap_or_else(|| "field".to_string())
    }
}

/// A raw section: identity attributes, the unordered authored field list,
/// and whatever else the service attached (kept in `extra` so assembly can
/// pass it through).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSection {
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sortorder: Option<i64>,

    #[serde(
        rename = "tempFields",
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub temp_fields: Vec<Field>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The raw form payload returned by `GET /forms/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawForm {
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

    #[serde(
        rename = "tempSections",
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub temp_sections: Vec<RawSection>,
}

/// Servers send absent lists as `null` as often as they omit them; both
/// deserialize to the empty collection.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value = Option::<Vec<T>>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}
