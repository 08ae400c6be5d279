use std::collections::BTreeMap;

use serde_json::Value;

/// Failure of one gateway call.
///
/// Server-side variants keep the response status and JSON body; a non-JSON
/// body is kept as a string value.
#[derive(Clone, Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("{label}: no response ({message})")]
    Network { label: String, message: String },

    #[error("unauthorized ({status})")]
    Auth { status: u16, body: Value },

    #[error("validation failed ({status})")]
    Validation { status: u16, body: Value },

    #[error("conflict ({status})")]
    Conflict { status: u16, body: Value },

    #[error("not found ({status})")]
    NotFound { status: u16, body: Value },

    #[error("request failed ({status})")]
    Http { status: u16, body: Value },

    #[error("{label}: unexpected response ({message})")]
    Decode { label: String, message: String },

    #[error("{0} is not supported by this resource")]
    Unsupported(&'static str),
}

impl GatewayError {
    pub fn network(label: &str, err: impl std::fmt::Display) -> Self {
        GatewayError::Network {
            label: label.to_string(),
            message: err.to_string(),
        }
    }

    pub fn decode(label: &str, err: impl std::fmt::Display) -> Self {
        GatewayError::Decode {
            label: label.to_string(),
            message: err.to_string(),
        }
    }

    /// Maps a non-success status to its error kind.
    pub fn classify(status: u16, body: Value) -> Self {
        match status {
            400 | 422 => GatewayError::Validation { status, body },
            401 => GatewayError::Auth { status, body },
            404 => GatewayError::NotFound { status, body },
            409 => GatewayError::Conflict { status, body },
            _ => GatewayError::Http { status, body },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Auth { status, .. }
            | GatewayError::Validation { status, .. }
            | GatewayError::Conflict { status, .. }
            | GatewayError::NotFound { status, .. }
            | GatewayError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&Value> {
        match self {
            GatewayError::Auth { body, .. }
            | GatewayError::Validation { body, .. }
            | GatewayError::Conflict { body, .. }
            | GatewayError::NotFound { body, .. }
            | GatewayError::Http { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, GatewayError::Network { .. })
    }

    /// Field-level messages from a validation body (`{"field": ["msg", ..]}`).
    pub fn field_errors(&self) -> BTreeMap<String, Vec<String>> {
        let mut out = BTreeMap::new();
        let GatewayError::Validation { body, .. } = self else {
            return out;
        };
        let Some(obj) = body.as_object() else {
            return out;
        };
        for (field, v) in obj {
            if field == "detail" {
                continue;
            }
            let msgs = match v {
                Value::String(s) => vec![s.clone()],
                Value::Array(items) => items
                    .iter()
                    .map(|m| m.as_str().map(str::to_string).unwrap_or_else(|| m.to_string()))
                    .collect(),
                other => vec![other.to_string()],
            };
            if !msgs.is_empty() {
                out.insert(field.clone(), msgs);
            }
        }
        out
    }

    /// Short human-readable reason for notices.
    pub fn user_message(&self) -> String {
        if let Some(detail) = self.body().and_then(body_detail) {
            return detail.to_string();
        }
        match self {
            GatewayError::Network { .. } => {
                "could not reach the server; check your connection".to_string()
            }
            GatewayError::Auth { .. } => "your session has expired; log in again".to_string(),
            GatewayError::Validation { .. } => match self.field_errors().into_iter().next() {
                Some((field, msgs)) => format!("{}: {}", field, msgs.join(" ")),
                None => "the server rejected the request".to_string(),
            },
            GatewayError::Conflict { .. } => "already exists".to_string(),
            GatewayError::NotFound { .. } => "no longer exists on the server".to_string(),
            GatewayError::Http { status, .. } => format!("server error ({})", status),
            GatewayError::Decode { .. } => "the server sent an unexpected response".to_string(),
            GatewayError::Unsupported(op) => format!("{} is not available here", op),
        }
    }
}

fn body_detail(body: &Value) -> Option<&str> {
    body.get("detail")
        .or_else(|| body.get("error"))
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "../tests/remote/error_tests.rs"]
mod tests;
