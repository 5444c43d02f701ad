use std::cmp::Ordering;

use serde_json::Value;

use crate::form::form_model::{Field, POSITION_OPTION};

/// Row placement of a field. Fields whose position omits the row (or whose
/// position is missing or malformed) fall into the `Unknown` bucket, which
/// orders after every known row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKey {
    Row(i64),
    Unknown,
}

impl Ord for RowKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (RowKey::Row(a), RowKey::Row(b)) => a.cmp(b),
            (RowKey::Row(_), RowKey::Unknown) => Ordering::Less,
            (RowKey::Unknown, RowKey::Row(_)) => Ordering::Greater,
            (RowKey::Unknown, RowKey::Unknown) => Ordering::Equal,
        }
    }
}

impl PartialOrd for RowKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Column placement of a field, 1-based. `Unknown` orders after every known
/// column, so unplaced fields are handled last when a row is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColKey {
    Col(i64),
    Unknown,
}

impl Ord for ColKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (ColKey::Col(a), ColKey::Col(b)) => a.cmp(b),
            (ColKey::Col(_), ColKey::Unknown) => Ordering::Less,
            (ColKey::Unknown, ColKey::Col(_)) => Ordering::Greater,
            (ColKey::Unknown, ColKey::Unknown) => Ordering::Equal,
        }
    }
}

impl PartialOrd for ColKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn position_value(field: &Field) -> Option<&Value> {
    field.option_value(POSITION_OPTION)
}

/// Row key of a field. Total: any shape of payload maps to a key.
pub fn field_row(field: &Field) -> RowKey {
    match position_value(field).and_then(|v| v.get("row")).and_then(Value::as_i64) {
        Some(row) => RowKey::Row(row),
        None => RowKey::Unknown,
    }
}

/// Column key of a field. Total: a missing position, a position without a
/// `col`, or a non-integer `col` all map to `Unknown`.
pub fn field_col(field: &Field) -> ColKey {
    match position_value(field).and_then(|v| v.get("col")).and_then(Value::as_i64) {
        Some(col) => ColKey::Col(col),
        None => ColKey::Unknown,
    }
}

/// Upper bound on a declared row width. A payload can claim any size it
/// likes; rows are never allocated wider than this.
pub const MAX_ROW_WIDTH: usize = 256;

/// Declared row width of a field, clamped to `MAX_ROW_WIDTH`. Anything
/// below 1, or not an integer at all, degrades to a single slot.
pub fn field_span(field: &Field) -> usize {
    match position_value(field).and_then(|v| v.get("size")).and_then(Value::as_u64) {
        Some(size) if size >= 1 => size.min(MAX_ROW_WIDTH as u64) as usize,
        _ => 1,
    }
}
