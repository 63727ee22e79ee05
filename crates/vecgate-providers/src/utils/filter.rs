//! `key=value` metadata filters

use serde_json::Value;
use std::collections::HashMap;
use vecgate_domain::error::{Error, Result};

/// Equality constraint on one metadata field
///
/// The value side is read as JSON when it is a number or a boolean
/// (`page=3`, `draft=false`); anything else is taken as a plain string.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataFilter {
    /// Metadata key
    pub key: String,
    /// Expected value
    pub value: Value,
}

impl MetadataFilter {
    /// Parse an optional filter expression
    pub fn parse(filter: Option<&str>) -> Result<Option<Self>> {
        let Some(expr) = filter.map(str::trim).filter(|expr| !expr.is_empty()) else {
            return Ok(None);
        };

        let (key, raw) = expr.split_once('=').ok_or_else(|| {
            Error::invalid_argument(format!("Filter '{expr}' is not of the form key=value"))
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::invalid_argument(format!(
                "Filter '{expr}' has an empty key"
            )));
        }

        let raw = raw.trim();
        let value = match serde_json::from_str::<Value>(raw) {
            Ok(parsed @ (Value::Number(_) | Value::Bool(_))) => parsed,
            _ => Value::String(raw.to_string()),
        };

        Ok(Some(Self {
            key: key.to_string(),
            value,
        }))
    }

    /// Whether `metadata` satisfies the constraint
    pub fn matches(&self, metadata: &HashMap<String, Value>) -> bool {
        metadata.get(&self.key) == Some(&self.value)
    }
}
