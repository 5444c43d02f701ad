use std::collections::BTreeMap;

use crate::form::form_model::{Field, RawForm, RawSection};
use crate::form::position::{field_col, field_span, ColKey, RowKey};
use crate::layout::layout_model::{FormLayout, SectionLayout, SectionSummary};
use crate::layout::rows::group_rows;

/// Fill one row group into its fixed slot sequence.
///
/// The row width is the declared span of the first field in column order.
/// Fields with a known 1-based column land in their slot; a later write to
/// an occupied slot wins. A known column outside 1..=width is rejected and
/// the field is dropped from the row. Fields with no usable column flow into
/// the first still-empty slot, left to right, and are dropped only when the
/// row has no slot left. Whatever remains empty becomes a placeholder
/// carrying its own slot position.
pub fn fill_row(key: RowKey, fields: &[Field]) -> Vec<Field> {
    let width = fields.first().map(field_span).unwrap_or(1);
    let mut slots: Vec<Option<Field>> = vec![None; width];

    for field in fields {
        match field_col(field) {
            ColKey::Col(col) if col >= 1 && col as usize <= width => {
                slots[col as usize - 1] = Some(field.clone());
            }
            // out-of-range column: the write is rejected, never widens the row
            ColKey::Col(_) => {}
            ColKey::Unknown => {
                if let Some(open) = slots.iter_mut().find(|slot| slot.is_none()) {
                    *open = Some(field.clone());
                }
            }
        }
    }

    let row = match key {
        RowKey::Row(n) => Some(n),
        RowKey::Unknown => None,
    };

    slots
        .into_iter()
        .enumerate()
        .map(|(i, slot)| slot.unwrap_or_else(|| Field::placeholder(i + 1, row, width)))
        .collect()
}

fn build_section(section: &RawSection) -> SectionLayout {
    let rows = group_rows(&section.temp_fields)
        .into_iter()
        .map(|(key, fields)| fill_row(key, &fields))
        .collect();

    SectionLayout {
        id: section.id.clone(),
        name: section.name.clone(),
        sortorder: section.sortorder,
        extra: section.extra.clone(),
        rows,
    }
}

/// Reconstruct the full layout for a raw form payload. Pure: the input is
/// never mutated, and the same payload always yields the same layout.
pub fn build_layout(raw: &RawForm) -> FormLayout {
    let mut sections = BTreeMap::new();
    for section in &raw.temp_sections {
        sections.insert(section.id.clone(), build_section(section));
    }

    FormLayout {
        id: raw.id.clone(),
        label: raw.label.clone(),
        last_modified: raw.last_modified.clone(),
        name: raw.name.clone(),
        r#type: raw.r#type.clone(),
        sections,
    }
}

/// Project the raw section list down to the reorder view, keyed by id.
/// When the payload repeats a section id the later entry replaces the
/// earlier one.
pub fn section_summaries(raw: &RawForm) -> BTreeMap<String, SectionSummary> {
    raw.temp_sections
        .iter()
        .fold(BTreeMap::new(), |mut summaries, section| {
            summaries.insert(
                section.id.clone(),
                SectionSummary {
                    id: section.id.clone(),
                    name: section.name.clone(),
                    sortorder: section.sortorder,
                },
            );
            summaries
        })
}
