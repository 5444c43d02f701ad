use std::collections::BTreeMap;

use crate::form::form_model::Field;
use crate::form::position::{field_col, field_row, RowKey};

/// Split a section's unordered field list into row groups.
///
/// The fields are first stable-sorted by column key, so every group comes
/// out left-to-right with unplaced fields trailing in encounter order. The
/// `BTreeMap` ordering on `RowKey` then yields known rows ascending with the
/// unknown-row bucket last.
pub fn group_rows(fields: &[Field]) -> Vec<(RowKey, Vec<Field>)> {
    let mut sorted: Vec<Field> = fields.to_vec();
    sorted.sort_by_key(field_col);

    let mut groups: BTreeMap<RowKey, Vec<Field>> = BTreeMap::new();
    for field in sorted {
        groups
            .entry(field_row(&field))
            .or_insert_with(Vec::new)
            .push(field);
    }

    groups.into_iter().collect()
}
