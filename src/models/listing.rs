//! Response envelopes and fetch outcomes.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::Record;

/// Response shapes the backend uses for listings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Envelope {
    /// A bare JSON array
    Bare(Vec<Record>),

    /// Paginated `{"results": [...]}` envelope
    Paginated {
        results: Vec<Record>,
        #[serde(default)]
        #[allow(dead_code)]
        count: Option<u64>,
    },

    /// `{"success": bool, "data": ..., "error": ...}` from the about service
    Wrapped {
        success: bool,
        #[serde(default)]
        data: Value,
        #[serde(default)]
        error: Option<String>,
    },
}

/// Decode a listing body into records.
pub fn decode_listing(endpoint: &str, body: &[u8]) -> Result<Vec<Record>> {
    let envelope: Envelope =
        serde_json::from_slice(body).map_err(|e| AppError::envelope(endpoint, e))?;

    match envelope {
        Envelope::Bare(records) | Envelope::Paginated { results: records, .. } => Ok(records),
        Envelope::Wrapped {
            success: false,
            error,
            ..
        } => Err(AppError::envelope(
            endpoint,
            error.unwrap_or_else(|| "request was not successful".to_string()),
        )),
        Envelope::Wrapped { data, .. } => match data {
            Value::Null => Ok(Vec::new()),
            Value::Array(_) => {
                serde_json::from_value(data).map_err(|e| AppError::envelope(endpoint, e))
            }
            Value::Object(map) => Ok(vec![Record::from(map)]),
            other => Err(AppError::envelope(
                endpoint,
                format!("expected a list or object in \"data\", got {}", kind(&other)),
            )),
        },
    }
}

/// Decode a single-record body, unwrapping `{"success": true, "data": {..}}`.
pub fn decode_detail(endpoint: &str, body: &[u8]) -> Result<Record> {
    let value: Value = serde_json::from_slice(body).map_err(|e| AppError::envelope(endpoint, e))?;

    let value = match value {
        Value::Object(mut map) if map.get("success").is_some_and(Value::is_boolean) => {
            if map.get("success") == Some(&Value::Bool(false)) {
                let message = map
                    .get("error")
                    .and_then(Value::as_str)
                    .unwrap_or("request was not successful")
                    .to_string();
                return Err(AppError::envelope(endpoint, message));
            }
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };

    Record::try_from(value).map_err(|other| {
        AppError::envelope(endpoint, format!("expected an object, got {}", kind(&other)))
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// What a fetch produced.
///
/// Keeps "nothing published" apart from "could not fetch"; no placeholder
/// content is ever substituted for a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Loaded(Vec<T>),
    Empty,
    Failed { reason: String },
}

impl<T> FetchOutcome<T> {
    pub fn from_result(result: Result<Vec<T>>) -> Self {
        match result {
            Ok(items) if items.is_empty() => FetchOutcome::Empty,
            Ok(items) => FetchOutcome::Loaded(items),
            Err(e) => FetchOutcome::Failed {
                reason: e.to_string(),
            },
        }
    }

    /// Loaded items; empty for `Empty` and `Failed`.
    pub fn items(&self) -> &[T] {
        match self {
            FetchOutcome::Loaded(items) => items,
            _ => &[],
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            FetchOutcome::Loaded(items) => items,
            _ => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            FetchOutcome::Loaded(_) => "loaded",
            FetchOutcome::Empty => "empty",
            FetchOutcome::Failed { .. } => "failed",
        }
    }
}
