use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;

use crate::store::store_model::{FormEvent, FormState};
use crate::trace::trace::DispatchTrace;

/// Appends one JSON line per store dispatch to a trace file.
///
/// Tracing is strictly best-effort: the store must keep dispatching when the
/// file cannot be opened or written to, so every failure downgrades to a
/// stderr warning and the line is dropped.
pub struct TraceLogger {
    sink: Option<Mutex<File>>,
}

impl TraceLogger {
    pub fn new(path: &str) -> Self {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Self {
                sink: Some(Mutex::new(file)),
            },
            Err(e) => {
                eprintln!("Warning: could not open trace file '{}': {}", path, e);
                Self { sink: None }
            }
        }
    }

    /// Record one dispatch: the event that was applied and the state the
    /// reducer produced for it.
    pub fn log_dispatch(&self, event: &FormEvent, state: &FormState) {
        let sink = match &self.sink {
            Some(sink) => sink,
            None => return, // tracing disabled
        };

        let trace = DispatchTrace::now(event).with_state(state);
        if let Err(e) = Self::append(sink, &trace) {
            eprintln!(
                "Warning: dropped trace line for '{}': {}",
                event.name(),
                e
            );
        }
    }

    fn append(
        sink: &Mutex<File>,
        trace: &DispatchTrace,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let line = serde_json::to_string(trace)?;
        // a poisoned lock still holds a usable file handle
        let mut file = sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        writeln!(file, "{}", line)?;
        Ok(())
    }
}
