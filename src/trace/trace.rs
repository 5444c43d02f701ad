use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::store::store_model::{FormEvent, FormState};

/// One line of the JSONL dispatch trace: the event that was applied and a
/// summary of the state it produced.
#[derive(Debug, Serialize)]
pub struct DispatchTrace {
    pub timestamp_ms: u128,
    pub event: String,

    pub loading: bool,
    pub saving: bool,
    pub has_form: bool,
    pub section_count: usize,

    pub revision: Option<String>,
    pub error: Option<String>,
}

impl DispatchTrace {
    pub fn now(event: &FormEvent) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_millis(),
            event: event.name().to_string(),
            loading: false,
            saving: false,
            has_form: false,
            section_count: 0,
            revision: None,
            error: None,
        }
    }

    pub fn with_state(mut self, state: &FormState) -> Self {
        self.loading = state.loading;
        self.saving = state.saving;
        self.has_form = state.form.is_some();
        self.section_count = state.sections.len();
        self.revision = state.revision.clone();
        self.error = state.error.clone();
        self
    }
}
