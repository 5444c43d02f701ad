use crate::{
    layout::builder::{build_layout, section_summaries},
    service::client::{DeleteOutcome, FormService, UpdateOutcome},
    service::error::ServiceError,
    store::form_store::FormStore,
    store::store_model::FormEvent,
};
use serde_json::Value;

pub mod cli;
pub mod form;
pub mod layout;
pub mod report;
pub mod service;
pub mod store;
pub mod trace;

/// Load one form through the service and feed the store.
///
/// Dispatches `Load`, then on success reconstructs the layout exactly once
/// and dispatches `Receive` followed by `ReceiveSections`. On failure the
/// store sees `LoadFailed` and reconstruction never runs.
pub fn load_form(
    service: &dyn FormService,
    store: &mut FormStore,
    id: &str,
) -> Result<(), ServiceError> {
    store.dispatch(FormEvent::Load { id: id.to_string() });

    let raw = match service.fetch_form(id) {
        Ok(raw) => raw,
        Err(e) => {
            store.dispatch(FormEvent::LoadFailed {
                message: e.to_string(),
            });
            return Err(e);
        }
    };

    let form = build_layout(&raw);
    let sections = section_summaries(&raw);

    store.dispatch(FormEvent::Receive { form });
    store.dispatch(FormEvent::ReceiveSections { sections });
    Ok(())
}

/// Persist edited form details, mirroring the outcome into the store. A
/// server-side rejection lands in the state's error slot with the message
/// from the rejection body.
pub fn update_details(
    service: &dyn FormService,
    store: &mut FormStore,
    id: &str,
    details: &Value,
) -> Result<UpdateOutcome, ServiceError> {
    store.dispatch(FormEvent::UpdateDetails {
        details: details.clone(),
    });

    match service.update_details(id, details) {
        Ok(UpdateOutcome::Updated) => {
            store.dispatch(FormEvent::DetailsUpdated);
            Ok(UpdateOutcome::Updated)
        }
        Ok(UpdateOutcome::Rejected(message)) => {
            store.dispatch(FormEvent::DetailsNotUpdated {
                message: message.clone(),
            });
            Ok(UpdateOutcome::Rejected(message))
        }
        Err(e) => {
            store.dispatch(FormEvent::DetailsNotUpdated {
                message: e.to_string(),
            });
            Err(e)
        }
    }
}

/// Delete an authored field, mirroring the outcome into the store. The
/// current layout is left untouched: grids are only rebuilt from a fresh
/// payload, so callers re-load to observe the deletion.
pub fn delete_field(
    service: &dyn FormService,
    store: &mut FormStore,
    field_id: &str,
) -> Result<DeleteOutcome, ServiceError> {
    store.dispatch(FormEvent::DeleteField {
        id: field_id.to_string(),
    });

    match service.delete_field(field_id) {
        Ok(DeleteOutcome::Deleted) => {
            store.dispatch(FormEvent::FieldDeleted {
                id: field_id.to_string(),
            });
            Ok(DeleteOutcome::Deleted)
        }
        Ok(DeleteOutcome::Refused(message)) => {
            store.dispatch(FormEvent::ErrorDeletingField {
                message: message.clone(),
            });
            Ok(DeleteOutcome::Refused(message))
        }
        Err(e) => {
            store.dispatch(FormEvent::ErrorDeletingField {
                message: e.to_string(),
            });
            Err(e)
        }
    }
}
