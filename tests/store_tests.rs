use serde_json::json;

use form_grid::layout::builder::build_layout;
use form_grid::service::client::{
    DeleteOutcome, FormService, HttpFormService, MockFormService, UpdateOutcome,
};
use form_grid::service::error::ServiceError;
use form_grid::store::form_store::{reduce, FormStore};
use form_grid::store::store_model::{FormEvent, FormState};
use form_grid::trace::logger::TraceLogger;
use form_grid::{delete_field, load_form, update_details};

use crate::common::forms::{form_with, positioned, row_labels, section, unpositioned};

mod common;

// ============================================================================
// Reducer transitions
// ============================================================================

#[test]
fn load_marks_loading_and_clears_stale_error() {
    let state = FormState {
        error: Some("previous failure".to_string()),
        ..FormState::default()
    };

    let next = reduce(state, &FormEvent::Load { id: "form-1".to_string() });

    assert!(next.loading, "Load must mark the state as loading");
    assert!(next.error.is_none(), "Load must clear a stale error");
}

#[test]
fn receive_installs_form_and_revision() {
    let layout = build_layout(&form_with(vec![section(
        "main",
        vec![positioned("a", 1, 1, 1)],
    )]));
    let state = reduce(FormState::default(), &FormEvent::Load { id: "form-1".to_string() });

    let next = reduce(state, &FormEvent::Receive { form: layout.clone() });

    assert!(!next.loading, "Receive ends the loading phase");
    assert_eq!(next.form.as_ref(), Some(&layout));
    assert_eq!(
        next.revision.as_deref(),
        Some(layout.fingerprint().as_str()),
        "Revision tracks the received layout"
    );
}

#[test]
fn receiving_the_same_layout_keeps_the_revision() {
    let raw = form_with(vec![section("main", vec![unpositioned("floating")])]);

    let state = reduce(
        FormState::default(),
        &FormEvent::Receive { form: build_layout(&raw) },
    );
    let first_revision = state.revision.clone();

    let next = reduce(state, &FormEvent::Receive { form: build_layout(&raw) });

    assert_eq!(
        next.revision, first_revision,
        "Reloading an unchanged form must not move the revision"
    );
}

#[test]
fn receive_sections_replaces_the_projection() {
    let raw_a = form_with(vec![section("alpha", vec![])]);
    let raw_b = form_with(vec![section("beta", vec![]), section("gamma", vec![])]);

    let state = reduce(
        FormState::default(),
        &FormEvent::ReceiveSections {
            sections: form_grid::layout::builder::section_summaries(&raw_a),
        },
    );
    let next = reduce(
        state,
        &FormEvent::ReceiveSections {
            sections: form_grid::layout::builder::section_summaries(&raw_b),
        },
    );

    let ids: Vec<&String> = next.sections.keys().collect();
    assert_eq!(ids, vec!["beta", "gamma"], "Projections replace, never merge");
}

#[test]
fn load_failed_records_the_message() {
    let state = reduce(FormState::default(), &FormEvent::Load { id: "x".to_string() });
    let next = reduce(
        state,
        &FormEvent::LoadFailed { message: "boom".to_string() },
    );

    assert!(!next.loading);
    assert_eq!(next.error.as_deref(), Some("boom"));
}

#[test]
fn details_save_lifecycle() {
    let saving = reduce(
        FormState::default(),
        &FormEvent::UpdateDetails { details: json!({ "label": "Renamed" }) },
    );
    assert!(saving.saving, "UpdateDetails marks the state as saving");

    let accepted = reduce(saving.clone(), &FormEvent::DetailsUpdated);
    assert!(!accepted.saving);
    assert!(accepted.error.is_none());

    let rejected = reduce(
        saving,
        &FormEvent::DetailsNotUpdated { message: "label taken".to_string() },
    );
    assert!(!rejected.saving, "A rejection still ends the saving phase");
    assert_eq!(rejected.error.as_deref(), Some("label taken"));
}

#[test]
fn delete_events_do_not_touch_the_layout() {
    let layout = build_layout(&form_with(vec![section(
        "main",
        vec![positioned("victim", 1, 1, 1)],
    )]));
    let state = reduce(FormState::default(), &FormEvent::Receive { form: layout.clone() });

    let next = reduce(
        state,
        &FormEvent::FieldDeleted { id: "fld-1".to_string() },
    );

    assert_eq!(
        next.form.as_ref(),
        Some(&layout),
        "Grids are only rebuilt from a fresh payload, never patched"
    );
}

#[test]
fn delete_failure_records_the_message() {
    let state = reduce(
        FormState::default(),
        &FormEvent::DeleteField { id: "fld-1".to_string() },
    );
    let next = reduce(
        state,
        &FormEvent::ErrorDeletingField { message: "in use".to_string() },
    );

    assert_eq!(next.error.as_deref(), Some("in use"));
}

// ============================================================================
// load_form orchestration
// ============================================================================

#[test]
fn load_form_feeds_layout_and_sections() {
    let raw = form_with(vec![section(
        "main",
        vec![positioned("b", 1, 2, 2), positioned("a", 1, 1, 2)],
    )]);
    let service = MockFormService::new().with_form("form-1", raw);
    let mut store = FormStore::new();

    load_form(&service, &mut store, "form-1").expect("load should succeed");

    let state = &store.state;
    assert!(!state.loading, "Loading must be over after a successful load");
    assert!(state.error.is_none());
    assert!(state.revision.is_some(), "A loaded form carries a revision");

    let form = state.form.as_ref().expect("layout should be installed");
    assert_eq!(
        row_labels(&form.sections["main"].rows[0]),
        vec!["a", "b"],
        "The installed layout is the reconstructed one"
    );

    assert_eq!(
        state.sections.keys().collect::<Vec<_>>(),
        vec!["main"],
        "The section projection arrives with the load"
    );
}

#[test]
fn load_form_failure_leaves_no_half_loaded_state() {
    let service = MockFormService::new();
    let mut store = FormStore::new();

    let result = load_form(&service, &mut store, "missing");

    assert!(matches!(result, Err(ServiceError::FormNotFound(_))));
    let state = &store.state;
    assert!(!state.loading, "A failed load must end the loading phase");
    assert!(state.form.is_none(), "No layout may appear on failure");
    assert!(state.sections.is_empty());
    assert_eq!(
        state.error.as_deref(),
        Some("No form with id 'missing'"),
        "The failure message lands in the error slot"
    );
}

#[test]
fn reloading_replaces_the_previous_layout() {
    let before = form_with(vec![section("main", vec![positioned("a", 1, 1, 1)])]);
    let after = form_with(vec![section("main", vec![positioned("a", 1, 1, 2)])]);

    let mut store = FormStore::new();

    let service = MockFormService::new().with_form("form-1", before);
    load_form(&service, &mut store, "form-1").expect("first load");
    let first_revision = store.state.revision.clone();

    let service = MockFormService::new().with_form("form-1", after);
    load_form(&service, &mut store, "form-1").expect("second load");

    assert_ne!(
        store.state.revision, first_revision,
        "A changed grid must move the revision"
    );
    assert_eq!(
        store.state.form.as_ref().map(|f| f.sections["main"].rows[0].len()),
        Some(2),
        "The second layout replaces the first"
    );
}

// ============================================================================
// update_details orchestration
// ============================================================================

#[test]
fn accepted_update_clears_saving() {
    let service = MockFormService::new();
    let mut store = FormStore::new();

    let outcome = update_details(&service, &mut store, "form-1", &json!({ "label": "New" }))
        .expect("update should not error");

    assert_eq!(outcome, UpdateOutcome::Updated);
    assert!(!store.state.saving);
    assert!(store.state.error.is_none());
}

#[test]
fn rejected_update_surfaces_the_server_message() {
    let service = MockFormService::new().rejecting_updates("label already in use");
    let mut store = FormStore::new();

    let outcome = update_details(&service, &mut store, "form-1", &json!({ "label": "Dup" }))
        .expect("a rejection is an outcome, not an error");

    assert_eq!(
        outcome,
        UpdateOutcome::Rejected("label already in use".to_string())
    );
    assert!(!store.state.saving);
    assert_eq!(store.state.error.as_deref(), Some("label already in use"));
}

// ============================================================================
// delete_field orchestration
// ============================================================================

#[test]
fn deleted_field_leaves_layout_for_the_next_load() {
    let raw = form_with(vec![section("main", vec![positioned("victim", 1, 1, 1)])]);
    let service = MockFormService::new().with_form("form-1", raw);
    let mut store = FormStore::new();
    load_form(&service, &mut store, "form-1").expect("load");

    let outcome = delete_field(&service, &mut store, "fld-victim").expect("delete");

    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert_eq!(
        store
            .state
            .form
            .as_ref()
            .map(|f| f.sections["main"].rows[0].len()),
        Some(1),
        "The grid still shows the field until the form is reloaded"
    );
    assert!(store.state.error.is_none());
}

#[test]
fn refused_delete_surfaces_the_message() {
    let service = MockFormService::new().refusing_deletes("field is referenced");
    let mut store = FormStore::new();

    let outcome = delete_field(&service, &mut store, "fld-1").expect("refusal is an outcome");

    assert_eq!(
        outcome,
        DeleteOutcome::Refused("field is referenced".to_string())
    );
    assert_eq!(store.state.error.as_deref(), Some("field is referenced"));
}

// ============================================================================
// Service backends
// ============================================================================

#[test]
fn mock_service_fetches_what_it_was_given() {
    let raw = form_with(vec![section("main", vec![])]);
    let service = MockFormService::new().with_form("form-1", raw.clone());

    let fetched = service.fetch_form("form-1").expect("known id");
    assert_eq!(fetched, raw);

    let missing = service.fetch_form("other");
    assert!(matches!(missing, Err(ServiceError::FormNotFound(id)) if id == "other"));
}

#[test]
fn http_backend_defaults_to_the_local_service() {
    assert_eq!(HttpFormService::default().endpoint, "http://localhost:3000");
    assert_eq!(
        HttpFormService::new("http://localhost:3000/").endpoint,
        HttpFormService::default().endpoint,
        "a trailing slash normalizes to the default endpoint"
    );
}

// ============================================================================
// Dispatch tracing
// ============================================================================

#[test]
fn tracer_appends_one_jsonl_line_per_dispatch() {
    let dir = std::env::temp_dir().join("form_grid_store_test");
    std::fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("dispatch_trace.jsonl");
    std::fs::remove_file(&path).ok();

    let raw = form_with(vec![section("main", vec![positioned("a", 1, 1, 1)])]);
    let service = MockFormService::new().with_form("form-1", raw);
    let mut store =
        FormStore::new().with_tracer(TraceLogger::new(path.to_str().expect("utf-8 path")));

    load_form(&service, &mut store, "form-1").expect("load");

    let content = std::fs::read_to_string(&path).expect("trace file should exist");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines.len(),
        3,
        "load, receive and receive_sections each produce a line"
    );

    let first: serde_json::Value =
        serde_json::from_str(lines[0]).expect("trace lines are JSON");
    assert_eq!(first["event"], json!("load"));
    assert_eq!(first["loading"], json!(true));

    let second: serde_json::Value =
        serde_json::from_str(lines[1]).expect("trace lines are JSON");
    assert_eq!(second["event"], json!("receive"));
    assert_eq!(second["has_form"], json!(true));

    // Cleanup
    std::fs::remove_file(&path).ok();
    std::fs::remove_dir(&dir).ok();
}

#[test]
fn log_dispatch_writes_the_event_name_and_state_snapshot() {
    let dir = std::env::temp_dir().join("form_grid_logger_test");
    std::fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("direct_trace.jsonl");
    std::fs::remove_file(&path).ok();

    let tracer = TraceLogger::new(path.to_str().expect("utf-8 path"));
    let event = FormEvent::LoadFailed {
        message: "service unreachable".to_string(),
    };
    let state = reduce(FormState::default(), &event);
    tracer.log_dispatch(&event, &state);

    let content = std::fs::read_to_string(&path).expect("trace file should exist");
    let line: serde_json::Value =
        serde_json::from_str(content.trim()).expect("trace line is JSON");
    assert_eq!(line["event"], json!("load_failed"));
    assert_eq!(line["error"], json!("service unreachable"));
    assert_eq!(line["loading"], json!(false));
    assert_eq!(line["has_form"], json!(false));

    // Cleanup
    std::fs::remove_file(&path).ok();
    std::fs::remove_dir(&dir).ok();
}
