//! Credential labels and the fallback label list
//!
//! A [`Label`] addresses one stored secret by its (service, account) pair.
//! [`fallback_labels`] builds the ordered list of alternates tried when an
//! exact lookup misses: labels supplied through the environment first, then
//! the "Safe Storage" entries used by Chromium-family browsers.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// A (service, account) pair identifying one stored secret
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Label {
    /// Service identifier
    pub service: String,
    /// Account identifier
    pub account: String,
}

impl Label {
    /// Create a new label
    #[must_use]
    pub fn new(service: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            account: account.into(),
        }
    }

    /// Whether this label addresses exactly the given pair
    #[must_use]
    pub fn matches(&self, service: &str, account: &str) -> bool {
        self.service == service && self.account == account
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.service, self.account)
    }
}

/// Built-in fallback labels, tried after any environment-supplied ones
pub const DEFAULT_LABELS: [(&str, &str); 5] = [
    ("Chrome Safe Storage", "Chrome"),
    ("Chromium Safe Storage", "Chromium"),
    ("Microsoft Edge Safe Storage", "Microsoft Edge"),
    ("Brave Safe Storage", "Brave"),
    ("Vivaldi Safe Storage", "Vivaldi"),
];

/// Ordered list of alternate labels
pub type FallbackLabels = Vec<Label>;

/// Build the fallback label list from the raw value of the labels variable.
///
/// Environment labels come first, in their original order, followed by
/// [`DEFAULT_LABELS`]. An absent value, invalid JSON, or JSON that is not an
/// array contributes nothing. Array entries that are not objects with
/// non-empty string `service` and `account` fields are dropped.
#[must_use]
pub fn fallback_labels(raw: Option<&str>) -> FallbackLabels {
    let mut labels = raw.map(parse_env_labels).unwrap_or_default();
    labels.extend(
        DEFAULT_LABELS
            .iter()
            .map(|(service, account)| Label::new(*service, *account)),
    );
    labels
}

fn parse_env_labels(raw: &str) -> Vec<Label> {
    // Invalid payloads are ignored rather than surfaced.
    let entries = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(entries)) => entries,
        Ok(other) => {
            debug!(kind = json_kind(&other), "Ignoring non-array fallback labels");
            return Vec::new();
        }
        Err(e) => {
            debug!(error = %e, "Ignoring unparseable fallback labels");
            return Vec::new();
        }
    };

    entries.iter().filter_map(label_from_value).collect()
}

fn label_from_value(value: &Value) -> Option<Label> {
    let object = value.as_object()?;
    let service = non_empty_str(object.get("service"))?;
    let account = non_empty_str(object.get("account"))?;
    Some(Label::new(service, account))
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
