use std::fmt;

#[derive(Debug)]
pub enum ServiceError {
    /// Request never completed (connection refused, DNS, body read, ...)
    Transport { context: String, source: reqwest::Error },

    /// Server answered with a non-success status where one was required
    Status { context: String, status: u16 },

    /// Response body was not the JSON shape we expected
    JsonParse { context: String, source: serde_json::Error },

    /// Mock service has no form under the requested id
    FormNotFound(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Transport { context, source } => {
                write!(f, "Request failed ({}): {}", context, source)
            }
            ServiceError::Status { context, status } => {
                write!(f, "Unexpected status {} ({})", status, context)
            }
            ServiceError::JsonParse { context, source } => {
                write!(f, "JSON parse error ({}): {}", context, source)
            }
            ServiceError::FormNotFound(id) => {
                write!(f, "No form with id '{}'", id)
            }
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Transport { source, .. } => Some(source),
            ServiceError::JsonParse { source, .. } => Some(source),
            _ => None,
        }
    }
}
