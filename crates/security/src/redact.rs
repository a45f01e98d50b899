//! Record redaction: drop sensitive top-level keys before a record is exposed.
//!
//! Only exact key names are matched. Nested values and value contents are
//! left untouched.

use defenselab_config::{default_sensitive_keys, LabConfig};
use defenselab_core::Record;

/// Removes a fixed list of key names from records.
#[derive(Debug, Clone, PartialEq)]
pub struct Redactor {
    keys: Vec<String>,
}

impl Redactor {
    /// Build from raw key names. Names are trimmed and blanks dropped,
    /// keeping the configured order.
    pub fn new<I>(keys: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let keys = keys
            .into_iter()
            .map(|k| k.as_ref().trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keys }
    }

    pub fn from_config(config: &LabConfig) -> Self {
        Self::new(&config.sensitive_keys)
    }

    /// Redactor for the key set the environment defines right now.
    pub fn from_env() -> Self {
        Self::from_config(&LabConfig::from_env())
    }

    /// The sensitive key names, in configured order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn is_sensitive(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    /// Return a copy of `data` without any sensitive key.
    ///
    /// The input is never modified; remaining entries keep their order and
    /// values.
    pub fn redact(&self, data: &Record) -> Record {
        data.iter()
            .filter(|(key, _)| !self.is_sensitive(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Sensitive keys actually present in `data`.
    pub fn removed_keys<'a>(&'a self, data: &Record) -> Vec<&'a str> {
        self.keys
            .iter()
            .filter(|k| data.contains_key(k.as_str()))
            .map(String::as_str)
            .collect()
    }
}

impl Default for Redactor {
    fn default() -> Self {
        Self::new(default_sensitive_keys())
    }
}
