//! JSON Value Extension
//!
//! Accessor methods for JSON values with default fallbacks.

use serde_json::Value;
use std::collections::HashMap;

/// Extension trait for JSON containers with convenient accessor methods
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use vecgate_providers::utils::JsonExt;
///
/// let meta = json!({"status": "green", "points_count": 42});
/// assert_eq!(meta.str_or("status", "unknown"), "green");
/// assert_eq!(meta.u64_or("points_count", 0), 42);
/// assert_eq!(meta.opt_str("missing"), None);
/// ```
pub trait JsonExt {
    /// Get string value or default
    fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str;

    /// Get u64 value or default
    fn u64_or(&self, key: &str, default: u64) -> u64;

    /// Get optional string
    fn opt_str(&self, key: &str) -> Option<&str>;
}

/// Internal trait for types that can be used as JSON-like containers
trait JsonContainer {
    fn get_value(&self, key: &str) -> Option<&Value>;
}

impl JsonContainer for Value {
    #[inline]
    fn get_value(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl JsonContainer for HashMap<String, Value> {
    #[inline]
    fn get_value(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl JsonContainer for serde_json::Map<String, Value> {
    #[inline]
    fn get_value(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

/// Macro to implement JsonExt for types that implement JsonContainer
macro_rules! impl_json_ext {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl JsonExt for $ty {
                #[inline]
                fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
                    self.get_value(key).and_then(|v| v.as_str()).unwrap_or(default)
                }

                #[inline]
                fn u64_or(&self, key: &str, default: u64) -> u64 {
                    self.get_value(key).and_then(|v| v.as_u64()).unwrap_or(default)
                }

                #[inline]
                fn opt_str(&self, key: &str) -> Option<&str> {
                    self.get_value(key).and_then(|v| v.as_str())
                }
            }
        )+
    };
}

impl_json_ext!(Value, HashMap<String, Value>, serde_json::Map<String, Value>);
