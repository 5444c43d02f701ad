use serde_json::{json, Value};

use form_grid::form::form_model::{Field, RawForm, RawSection};

/// Deserialize a field from inline JSON, the same path payload fields take.
pub fn field_from(value: Value) -> Field {
    serde_json::from_value(value).expect("field JSON should deserialize")
}

/// An authored field with a complete position descriptor.
pub fn positioned(label: &str, row: i64, col: i64, size: i64) -> Field {
    field_from(json!({
        "label": label,
        "type": "textfield",
        "options": [
            { "name": "position", "value": { "row": row, "col": col, "size": size } }
        ]
    }))
}

/// An authored field with an arbitrary position value.
pub fn with_position(label: &str, position: Value) -> Field {
    field_from(json!({
        "label": label,
        "type": "textfield",
        "options": [
            { "name": "position", "value": position }
        ]
    }))
}

/// An authored field with no position option at all.
pub fn unpositioned(label: &str) -> Field {
    field_from(json!({
        "label": label,
        "type": "textfield",
        "options": []
    }))
}

pub fn section(id: &str, fields: Vec<Field>) -> RawSection {
    RawSection {
        id: id.to_string(),
        name: Some(format!("Section {}", id)),
        sortorder: None,
        temp_fields: fields,
        extra: serde_json::Map::new(),
    }
}

pub fn form_with(sections: Vec<RawSection>) -> RawForm {
    RawForm {
        id: Some("form-1".to_string()),
        label: Some("Test form".to_string()),
        last_modified: None,
        name: Some("test_form".to_string()),
        r#type: Some("standard".to_string()),
        temp_sections: sections,
    }
}

/// Slot labels of one row: the display label for authored fields, a marker
/// for placeholders. Makes row assertions readable.
pub fn row_labels(row: &[Field]) -> Vec<String> {
    row.iter()
        .map(|f| {
            if f.is_placeholder() {
                "(empty)".to_string()
            } else {
                f.display_label()
            }
        })
        .collect()
}

/// The position option value of a slot, for asserting placeholder shapes.
pub fn position_of(field: &Field) -> Value {
    field
        .option_value("position")
        .cloned()
        .expect("slot should carry a position option")
}
