use std::collections::HashMap;

use serde_json::Value;

use crate::form::form_model::RawForm;
use crate::service::error::ServiceError;

/// Outcome of a details save: the server either accepted the new details or
/// rejected them with the message from its error body.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    Updated,
    Rejected(String),
}

/// Outcome of a field delete. A refusal is an outcome, not an error; only
/// transport failures surface as `ServiceError`.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Deleted,
    Refused(String),
}

pub trait FormService {
    fn fetch_form(&self, id: &str) -> Result<RawForm, ServiceError>;
    fn update_details(&self, id: &str, details: &Value) -> Result<UpdateOutcome, ServiceError>;
    fn delete_field(&self, field_id: &str) -> Result<DeleteOutcome, ServiceError>;
}

// ============================================================================
// HTTP Backend
// ============================================================================

pub struct HttpFormService {
    pub endpoint: String,
}

impl Default for HttpFormService {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3000".to_string(),
        }
    }
}

impl HttpFormService {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }
}

impl FormService for HttpFormService {
    fn fetch_form(&self, id: &str) -> Result<RawForm, ServiceError> {
        let url = self.url(&format!("/forms/{}", id));
        let client = reqwest::blocking::Client::new();

        let response = client.get(&url).send().map_err(|e| ServiceError::Transport {
            context: format!("GET {}", url),
            source: e,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status {
                context: format!("GET {}", url),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|e| ServiceError::Transport {
            context: format!("reading GET {}", url),
            source: e,
        })?;

        serde_json::from_str(&body).map_err(|e| ServiceError::JsonParse {
            context: format!("form payload from {}", url),
            source: e,
        })
    }

    fn update_details(&self, id: &str, details: &Value) -> Result<UpdateOutcome, ServiceError> {
        let url = self.url(&format!("/forms/{}", id));
        let client = reqwest::blocking::Client::new();

        let response = client
            .put(&url)
            .json(details)
            .send()
            .map_err(|e| ServiceError::Transport {
                context: format!("PUT {}", url),
                source: e,
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(UpdateOutcome::Updated);
        }

        // Rejections carry `{"error": {"message": ...}}`; anything less
        // informative degrades to the status line.
        let message = response
            .text()
            .ok()
            .and_then(|body| serde_json::from_str::<Value>(&body).ok())
            .and_then(|json| {
                json.get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| format!("update rejected with status {}", status.as_u16()));

        Ok(UpdateOutcome::Rejected(message))
    }

    fn delete_field(&self, field_id: &str) -> Result<DeleteOutcome, ServiceError> {
        let url = self.url(&format!("/tempfields/{}", field_id));
        let client = reqwest::blocking::Client::new();

        let response = client.delete(&url).send().map_err(|e| ServiceError::Transport {
            context: format!("DELETE {}", url),
            source: e,
        })?;

        let status = response.status();
        if status.is_success() {
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::Refused(format!(
                "delete rejected with status {}",
                status.as_u16()
            )))
        }
    }
}

// ============================================================================
// Mock Backend (for tests and offline runs)
// ============================================================================

#[derive(Default)]
pub struct MockFormService {
    forms: HashMap<String, RawForm>,
    update_rejection: Option<String>,
    delete_refusal: Option<String>,
}

impl MockFormService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form(mut self, id: &str, form: RawForm) -> Self {
        self.forms.insert(id.to_string(), form);
        self
    }

    /// Make every details save come back rejected with this message.
    pub fn rejecting_updates(mut self, message: &str) -> Self {
        self.update_rejection = Some(message.to_string());
        self
    }

    /// Make every field delete come back refused with this message.
    pub fn refusing_deletes(mut self, message: &str) -> Self {
        self.delete_refusal = Some(message.to_string());
        self
    }
}

impl FormService for MockFormService {
    fn fetch_form(&self, id: &str) -> Result<RawForm, ServiceError> {
        self.forms
            .get(id)
            .cloned()
            .ok_or_else(|| ServiceError::FormNotFound(id.to_string()))
    }

    fn update_details(&self, _id: &str, _details: &Value) -> Result<UpdateOutcome, ServiceError> {
        match &self.update_rejection {
            Some(message) => Ok(UpdateOutcome::Rejected(message.clone())),
            None => Ok(UpdateOutcome::Updated),
        }
    }

    fn delete_field(&self, _field_id: &str) -> Result<DeleteOutcome, ServiceError> {
        match &self.delete_refusal {
            Some(message) => Ok(DeleteOutcome::Refused(message.clone())),
            None => Ok(DeleteOutcome::Deleted),
        }
    }
}
