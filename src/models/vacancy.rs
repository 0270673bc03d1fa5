//! Vacancy data structure.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AppError, Result};

/// Fallback for a missing role name or work format.
pub const NOT_SPECIFIED: &str = "not specified";

/// Stand-in for a missing lower salary bound.
pub const SALARY_FROM_UNSPECIFIED: &str = "starting salary not specified";

/// Stand-in for a missing upper salary bound.
pub const SALARY_TO_UNSPECIFIED: &str = "final salary not specified";

/// A vacancy as persisted in the store: a flat JSON object.
pub type Record = Map<String, Value>;

/// A salary bound: either an amount or a placeholder text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Salary {
    Amount(i64),
    Unspecified(String),
}

impl Salary {
    /// Numeric amount, if this bound has one.
    pub fn amount(&self) -> Option<i64> {
        match self {
            Salary::Amount(value) => Some(*value),
            Salary::Unspecified(_) => None,
        }
    }
}

impl fmt::Display for Salary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Salary::Amount(value) => write!(f, "{value}"),
            Salary::Unspecified(text) => f.write_str(text),
        }
    }
}

impl From<i64> for Salary {
    fn from(value: i64) -> Self {
        Salary::Amount(value)
    }
}

impl From<i32> for Salary {
    fn from(value: i32) -> Self {
        Salary::Amount(i64::from(value))
    }
}

impl From<&str> for Salary {
    fn from(text: &str) -> Self {
        Salary::Unspecified(text.to_string())
    }
}

impl From<&Salary> for Value {
    fn from(salary: &Salary) -> Self {
        match salary {
            Salary::Amount(value) => Value::from(*value),
            Salary::Unspecified(text) => Value::from(text.as_str()),
        }
    }
}

/// A normalized job listing.
///
/// Name and URL are checked on construction, including when a vacancy is
/// read back from a stored [`Record`]. Equality covers every field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "VacancyFields")]
pub struct Vacancy {
    name_vacancy: String,
    url: String,
    salary_from: Salary,
    salary_to: Salary,
    city: String,
    requirement: Option<String>,
    work_format: String,
}

/// Unchecked field set, the deserialization target for [`Vacancy`].
#[derive(Deserialize)]
struct VacancyFields {
    name_vacancy: String,
    url: String,
    salary_from: Salary,
    salary_to: Salary,
    #[serde(default)]
    city: String,
    #[serde(default)]
    requirement: Option<String>,
    #[serde(default = "not_specified")]
    work_format: String,
}

fn not_specified() -> String {
    NOT_SPECIFIED.to_string()
}

impl TryFrom<VacancyFields> for Vacancy {
    type Error = AppError;

    fn try_from(fields: VacancyFields) -> Result<Self> {
        Vacancy::new(
            fields.name_vacancy,
            fields.url,
            fields.salary_from,
            fields.salary_to,
            fields.city,
            fields.requirement,
            fields.work_format,
        )
    }
}

impl Vacancy {
    /// Build a vacancy, rejecting an empty name or URL.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name_vacancy: impl Into<String>,
        url: impl Into<String>,
        salary_from: impl Into<Salary>,
        salary_to: impl Into<Salary>,
        city: impl Into<String>,
        requirement: Option<String>,
        work_format: impl Into<String>,
    ) -> Result<Self> {
        let vacancy = Self {
            name_vacancy: name_vacancy.into(),
            url: url.into(),
            salary_from: salary_from.into(),
            salary_to: salary_to.into(),
            city: city.into(),
            requirement,
            work_format: work_format.into(),
        };
        vacancy.validate()?;
        Ok(vacancy)
    }

    fn validate(&self) -> Result<()> {
        if self.name_vacancy.is_empty() || self.url.is_empty() {
            return Err(AppError::validation("vacancy name and URL are required"));
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name_vacancy
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn salary_from(&self) -> &Salary {
        &self.salary_from
    }

    pub fn salary_to(&self) -> &Salary {
        &self.salary_to
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn requirement(&self) -> Option<&str> {
        self.requirement.as_deref()
    }

    pub fn work_format(&self) -> &str {
        &self.work_format
    }

    /// Mean of the numeric salary bounds, `None` when neither bound is known.
    pub fn average_salary(&self) -> Option<f64> {
        match (self.salary_from.amount(), self.salary_to.amount()) {
            (Some(from), Some(to)) => Some((from as f64 + to as f64) / 2.0),
            (Some(only), None) | (None, Some(only)) => Some(only as f64),
            (None, None) => None,
        }
    }

    /// Flat record as written to the store.
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("name_vacancy".into(), Value::from(self.name_vacancy.as_str()));
        record.insert("url".into(), Value::from(self.url.as_str()));
        record.insert("salary_from".into(), Value::from(&self.salary_from));
        record.insert("salary_to".into(), Value::from(&self.salary_to));
        record.insert("city".into(), Value::from(self.city.as_str()));
        record.insert("requirement".into(), Value::from(self.requirement.clone()));
        record.insert("work_format".into(), Value::from(self.work_format.as_str()));
        record
    }
}

impl TryFrom<Record> for Vacancy {
    type Error = AppError;

    fn try_from(record: Record) -> Result<Self> {
        let fields: VacancyFields = serde_json::from_value(Value::Object(record))?;
        Vacancy::try_from(fields)
    }
}

impl fmt::Display for Vacancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Vacancy: {}", self.name_vacancy)?;
        writeln!(f, "Link: {}", self.url)?;
        writeln!(f, "Salary: {} - {}", self.salary_from, self.salary_to)?;
        writeln!(f, "City: {}", self.city)?;
        writeln!(
            f,
            "Requirements: {}",
            self.requirement.as_deref().unwrap_or(NOT_SPECIFIED)
        )?;
        write!(f, "Work format: {}", self.work_format)
    }
}
