use crate::form::form_model::RawForm;
use crate::layout::builder::{build_layout, section_summaries};
use crate::layout::layout_model::{FormLayout, SectionSummary};
use crate::load_form;
use crate::report::console::format_console_layout;
use crate::service::client::HttpFormService;
use crate::store::form_store::FormStore;
use crate::trace::logger::TraceLogger;

// ============================================================================
// show subcommand
// ============================================================================

pub fn cmd_show(
    file: &str,
    format: &str,
    output: Option<&str>,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_payload(file)?;

    if verbose > 0 {
        eprintln!(
            "Reconstructing {} ({} sections)...",
            file,
            raw.temp_sections.len()
        );
    }

    let layout = build_layout(&raw);
    let content = render_layout(&layout, format)?;
    write_output(output, &content)
}

// ============================================================================
// fetch subcommand
// ============================================================================

pub fn cmd_fetch(
    id: &str,
    endpoint: Option<&str>,
    format: &str,
    output: Option<&str>,
    verbose: u8,
    trace: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let service = match endpoint {
        Some(endpoint) => HttpFormService::new(endpoint),
        None => HttpFormService::default(),
    };

    let mut store = FormStore::new();
    if verbose > 1 {
        store = store.with_debug();
    }
    if let Some(path) = trace {
        store = store.with_tracer(TraceLogger::new(path));
    }

    if verbose > 0 {
        eprintln!("Fetching form {} from {}...", id, service.endpoint);
    }

    load_form(&service, &mut store, id)?;

    let layout = store
        .state
        .form
        .as_ref()
        .ok_or("form loaded but no layout was produced")?;

    if verbose > 0 {
        eprintln!(
            "  revision {}",
            store.state.revision.as_deref().unwrap_or("-")
        );
    }

    let content = render_layout(layout, format)?;
    write_output(output, &content)
}

// ============================================================================
// sections subcommand
// ============================================================================

pub fn cmd_sections(file: &str, verbose: u8) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_payload(file)?;
    let summaries = section_summaries(&raw);

    if verbose > 0 {
        eprintln!("Projecting sections from {}...", file);
    }

    if summaries.is_empty() {
        println!("No sections.");
        return Ok(());
    }

    println!("Sections ({}):", summaries.len());
    for summary in ordered_summaries(&summaries) {
        let order = summary
            .sortorder
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  [{}] {} \"{}\"",
            order,
            summary.id,
            summary.name.as_deref().unwrap_or("")
        );
    }

    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

/// Read and parse a raw form payload from a JSON file.
pub fn read_payload(path: &str) -> Result<RawForm, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let raw: RawForm = serde_json::from_str(&content)?;
    Ok(raw)
}

fn render_layout(layout: &FormLayout, format: &str) -> Result<String, Box<dyn std::error::Error>> {
    match format {
        "json" => Ok(format!("{}\n", serde_json::to_string_pretty(layout)?)),
        _ => Ok(format_console_layout(layout)),
    }
}

fn write_output(output: Option<&str>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => std::fs::write(path, content)?,
        None => print!("{}", content),
    }
    Ok(())
}

/// Summaries in presentation order: sortorder ascending, unsorted last,
/// ties broken by id.
fn ordered_summaries(
    summaries: &std::collections::BTreeMap<String, SectionSummary>,
) -> Vec<&SectionSummary> {
    let mut ordered: Vec<&SectionSummary> = summaries.values().collect();
    ordered.sort_by(|a, b| match (a.sortorder, b.sortorder) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.id.cmp(&b.id)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    });
    ordered
}
