//! Error payload classification.
//!
//! Tracker failures reach the workflow either with a known HTTP status or as
//! opaque text. Text is parsed once here; callers only ever see the typed
//! result.

use serde::Serialize;
use serde_json::Value;

/// A tracker failure reduced to what the workflow can act on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorPayload {
    /// The failure carries an HTTP status
    Classified {
        /// HTTP status code
        status: u16,
        /// Body or message for diagnostics
        body: String,
    },
    /// Nothing identifies the status
    Unclassified {
        /// Original text
        raw: String,
    },
}

impl ErrorPayload {
    /// Parse text that may hold a structured error object.
    ///
    /// Looks for a numeric `statusCode` or `status` field; anything else is
    /// kept as raw text.
    pub fn parse(raw: &str) -> Self {
        let status = serde_json::from_str::<Value>(raw)
            .ok()
            .and_then(|value| status_of(&value));

        match status {
            Some(status) => ErrorPayload::Classified {
                status,
                body: raw.to_string(),
            },
            None => ErrorPayload::Unclassified {
                raw: raw.to_string(),
            },
        }
    }

    /// Status code, if known.
    pub fn status(&self) -> Option<u16> {
        match self {
            ErrorPayload::Classified { status, .. } => Some(*status),
            ErrorPayload::Unclassified { .. } => None,
        }
    }

    /// Serialized form attached to errors for diagnostics.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self))
    }
}

fn status_of(value: &Value) -> Option<u16> {
    ["statusCode", "status"]
        .iter()
        .filter_map(|field| value.get(*field))
        .find_map(|v| match v {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        })
        .and_then(|n| u16::try_from(n).ok())
}

impl std::fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorPayload::Classified { status, body } => write!(f, "status {}: {}", status, body),
            ErrorPayload::Unclassified { raw } => f.write_str(raw),
        }
    }
}
