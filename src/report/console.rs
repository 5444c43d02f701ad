use crate::form::form_model::Field;
use crate::form::position::{field_row, RowKey};
use crate::layout::layout_model::{FormLayout, SectionLayout};

// ============================================================================
// Console renderer — formatted terminal output
// ============================================================================

/// Format a reconstructed layout for terminal output.
///
/// Produces output like:
/// ```text
/// === Form: Contact intake (form-7) ===
///
/// Section contact "Contact details" (2 rows)
///   row 1 | width 2 | First name, Last name
///   row 2 | width 2 | Email, (empty)
///
/// === 1 section, 2 rows, 1 placeholder ===
/// ```
pub fn format_console_layout(form: &FormLayout) -> String {
    let mut out = String::new();

    let title = form
        .label
        .as_deref()
        .or(form.name.as_deref())
        .unwrap_or("untitled");
    match &form.id {
        Some(id) => out.push_str(&format!("=== Form: {} ({}) ===\n\n", title, id)),
        None => out.push_str(&format!("=== Form: {} ===\n\n", title)),
    }

    if form.sections.is_empty() {
        out.push_str("(no sections)\n");
    }

    for section in ordered_sections(form) {
        out.push_str(&format_section(section));
    }

    let sections = form.sections.len();
    let rows = form.row_count();
    let placeholders = form.placeholder_count();
    out.push_str(&format!(
        "\n=== {} {}, {} {}, {} {} ===\n",
        sections,
        plural(sections, "section"),
        rows,
        plural(rows, "row"),
        placeholders,
        plural(placeholders, "placeholder")
    ));

    out
}

fn format_section(section: &SectionLayout) -> String {
    let mut out = String::new();

    let name = section.name.as_deref().unwrap_or("");
    out.push_str(&format!(
        "Section {} \"{}\" ({} {})\n",
        section.id,
        name,
        section.rows.len(),
        plural(section.rows.len(), "row")
    ));

    for row in &section.rows {
        out.push_str(&format!("  {}\n", format_row(row)));
    }

    out
}

fn format_row(row: &[Field]) -> String {
    // Placeholders in the unknown-row bucket carry no row in their
    // position, so the label falls back to "?".
    let row_label = match row.first().map(field_row) {
        Some(RowKey::Row(n)) => n.to_string(),
        _ => "?".to_string(),
    };

    let slots = row
        .iter()
        .map(slot_label)
        .collect::<Vec<_>>()
        .join(", ");

    format!("row {} | width {} | {}", row_label, row.len(), slots)
}

fn slot_label(field: &Field) -> String {
    if field.is_placeholder() {
        "(empty)".to_string()
    } else {
        field.display_label()
    }
}

/// Sections in presentation order: by sortorder ascending, unsorted ones
/// last, ties broken by id.
fn ordered_sections(form: &FormLayout) -> Vec<&SectionLayout> {
    let mut sections: Vec<&SectionLayout> = form.sections.values().collect();
    sections.sort_by(|a, b| match (a.sortorder, b.sortorder) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.id.cmp(&b.id)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    });
    sections
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
