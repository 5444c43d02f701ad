use std::collections::BTreeMap;

use serde_json::Value;

use crate::layout::layout_model::{FormLayout, SectionSummary};

/// One dispatched editor event, covering the load / save-details / delete
/// choreography around the form service.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    Load { id: String },
    Receive { form: FormLayout },
    ReceiveSections { sections: BTreeMap<String, SectionSummary> },
    LoadFailed { message: String },
    UpdateDetails { details: Value },
    DetailsUpdated,
    DetailsNotUpdated { message: String },
    DeleteField { id: String },
    FieldDeleted { id: String },
    ErrorDeletingField { message: String },
}

impl FormEvent {
    /// Short name used in debug lines and dispatch traces.
    pub fn name(&self) -> &'static str {
        match self {
            FormEvent::Load { .. } => "load",
            FormEvent::Receive { .. } => "receive",
            FormEvent::ReceiveSections { .. } => "receive_sections",
            FormEvent::LoadFailed { .. } => "load_failed",
            FormEvent::UpdateDetails { .. } => "update_details",
            FormEvent::DetailsUpdated => "details_updated",
            FormEvent::DetailsNotUpdated { .. } => "details_not_updated",
            FormEvent::DeleteField { .. } => "delete_field",
            FormEvent::FieldDeleted { .. } => "field_deleted",
            FormEvent::ErrorDeletingField { .. } => "error_deleting_field",
        }
    }
}

/// Editor-side view of one form: the reconstructed layout, the reorder
/// projection, and the in-flight / error flags the UI reads.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormState {
    pub loading: bool,
    pub saving: bool,
    pub form: Option<FormLayout>,
    pub sections: BTreeMap<String, SectionSummary>,
    pub revision: Option<String>,
    pub error: Option<String>,
}
