use crate::store::store_model::{FormEvent, FormState};
use crate::trace::logger::TraceLogger;

/// Pure state transition: current state plus one event yields the next
/// state. Layout reconstruction never happens here; `Receive` carries an
/// already-built layout.
pub fn reduce(state: FormState, event: &FormEvent) -> FormState {
    match event {
        FormEvent::Load { .. } => FormState {
            loading: true,
            error: None,
            ..state
        },
        FormEvent::Receive { form } => FormState {
            loading: false,
            revision: Some(form.fingerprint()),
            form: Some(form.clone()),
            error: None,
            ..state
        },
        FormEvent::ReceiveSections { sections } => FormState {
            sections: sections.clone(),
            ..state
        },
        FormEvent::LoadFailed { message } => FormState {
            loading: false,
            error: Some(message.clone()),
            ..state
        },
        FormEvent::UpdateDetails { .. } => FormState {
            saving: true,
            error: None,
            ..state
        },
        FormEvent::DetailsUpdated => FormState {
            saving: false,
            error: None,
            ..state
        },
        FormEvent::DetailsNotUpdated { message } => FormState {
            saving: false,
            error: Some(message.clone()),
            ..state
        },
        // Deletes never patch the grids in place; the layout is only ever
        // rebuilt from a fresh payload on the next load.
        FormEvent::DeleteField { .. } => FormState {
            error: None,
            ..state
        },
        FormEvent::FieldDeleted { .. } => FormState {
            error: None,
            ..state
        },
        FormEvent::ErrorDeletingField { message } => FormState {
            error: Some(message.clone()),
            ..state
        },
    }
}

/// Holds the current `FormState` and funnels every event through `reduce`,
/// optionally narrating transitions to stderr and appending them to a JSONL
/// dispatch trace.
pub struct FormStore {
    pub state: FormState,
    debug: bool,
    tracer: Option<TraceLogger>,
}

impl FormStore {
    pub fn new() -> Self {
        Self {
            state: FormState::default(),
            debug: false,
            tracer: None,
        }
    }

    /// Narrate every dispatch to stderr.
    pub fn with_debug(mut self) -> Self {
        self.debug = true;
        self
    }

    pub fn with_tracer(mut self, tracer: TraceLogger) -> Self {
        self.tracer = Some(tracer);
        self
    }

    pub fn dispatch(&mut self, event: FormEvent) {
        let next = reduce(self.state.clone(), &event);

        if self.debug {
            eprintln!(
                "[store] {}: loading={} saving={} sections={} error={:?}",
                event.name(),
                next.loading,
                next.saving,
                next.sections.len(),
                next.error
            );
        }

        if let Some(tracer) = &self.tracer {
            tracer.log_dispatch(&event, &next);
        }

        self.state = next;
    }
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new()
    }
}
