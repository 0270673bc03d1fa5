//! Field-equality criteria for store lookups.

use serde_json::Value;

use super::vacancy::{Record, Vacancy};
use crate::error::{AppError, Result};

/// A set of `field = value` conditions; a record matches when all hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria(Record);

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition, replacing any earlier one on the same field.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Parse `key=value` pairs.
    ///
    /// A value that is valid JSON (`120000`, `null`, `"quoted"`) is taken as
    /// that JSON value; anything else is a plain string.
    pub fn parse_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut criteria = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, raw) = pair.split_once('=').ok_or_else(|| {
                AppError::validation(format!("expected key=value, got '{pair}'"))
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(AppError::validation(format!("empty field name in '{pair}'")));
            }
            let value: Value = serde_json::from_str(raw).unwrap_or_else(|_| Value::from(raw));
            criteria.0.insert(key.to_string(), value);
        }
        Ok(criteria)
    }

    /// Whether every condition equals the record's field.
    ///
    /// A field the record lacks compares as `null`.
    pub fn matches(&self, record: &Record) -> bool {
        self.0
            .iter()
            .all(|(key, value)| record.get(key).unwrap_or(&Value::Null) == value)
    }
}

impl From<Record> for Criteria {
    fn from(record: Record) -> Self {
        Self(record)
    }
}

impl From<&Vacancy> for Criteria {
    fn from(vacancy: &Vacancy) -> Self {
        Self(vacancy.to_record())
    }
}
