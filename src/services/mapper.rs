// src/services/mapper.rs

//! Conversion of raw API items into [`Vacancy`] values.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{
    NOT_SPECIFIED, SALARY_FROM_UNSPECIFIED, SALARY_TO_UNSPECIFIED, Salary, Vacancy,
};

/// The subset of an API item the mapper reads.
#[derive(Debug, Deserialize)]
struct RawVacancy {
    #[serde(default)]
    professional_roles: Option<Vec<NamedRef>>,
    #[serde(default)]
    area: Option<RawArea>,
    #[serde(default)]
    snippet: Option<RawSnippet>,
    #[serde(default)]
    work_format: Option<Vec<NamedRef>>,
    #[serde(default)]
    salary: Option<RawSalary>,
}

#[derive(Debug, Deserialize)]
struct NamedRef {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawArea {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSnippet {
    #[serde(default)]
    requirement: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSalary {
    #[serde(default)]
    from: Option<Value>,
    #[serde(default)]
    to: Option<Value>,
}

/// An item that could not be turned into a vacancy.
#[derive(Debug)]
pub struct Rejected {
    /// Position of the item in the input
    pub index: usize,
    pub error: AppError,
}

/// Result of mapping a batch of raw items.
#[derive(Debug, Default)]
pub struct MapOutcome {
    pub vacancies: Vec<Vacancy>,
    pub rejected: Vec<Rejected>,
}

/// Map every raw item, collecting failures instead of stopping at the first.
pub fn map_vacancies(items: &[Value]) -> MapOutcome {
    let mut outcome = MapOutcome::default();
    for (index, item) in items.iter().enumerate() {
        match map_vacancy(item) {
            Ok(vacancy) => outcome.vacancies.push(vacancy),
            Err(error) => {
                log::warn!("Skipping vacancy #{}: {}", index, error);
                outcome.rejected.push(Rejected { index, error });
            }
        }
    }
    outcome
}

/// Map a single raw item.
pub fn map_vacancy(item: &Value) -> Result<Vacancy> {
    let raw = RawVacancy::deserialize(item)?;

    let name = first_name(raw.professional_roles);
    let (url, city) = match raw.area {
        Some(area) => (area.url.unwrap_or_default(), area.name.unwrap_or_default()),
        None => (String::new(), String::new()),
    };
    let requirement = raw.snippet.and_then(|s| s.requirement);
    let work_format = first_name(raw.work_format);

    let (salary_from, salary_to) = match raw.salary {
        Some(salary) => (
            salary_bound(salary.from, SALARY_FROM_UNSPECIFIED),
            salary_bound(salary.to, SALARY_TO_UNSPECIFIED),
        ),
        None => (
            Salary::from(SALARY_FROM_UNSPECIFIED),
            Salary::from(SALARY_TO_UNSPECIFIED),
        ),
    };

    Vacancy::new(
        name,
        url,
        salary_from,
        salary_to,
        city,
        requirement,
        work_format,
    )
}

/// Name of the first entry, or the "not specified" fallback.
fn first_name(refs: Option<Vec<NamedRef>>) -> String {
    refs.and_then(|refs| refs.into_iter().next())
        .map(|r| r.name.unwrap_or_else(|| NOT_SPECIFIED.to_string()))
        .unwrap_or_else(|| NOT_SPECIFIED.to_string())
}

/// A non-zero integer bound, or the given placeholder.
fn salary_bound(value: Option<Value>, placeholder: &str) -> Salary {
    match value.as_ref().and_then(Value::as_i64) {
        Some(amount) if amount != 0 => Salary::Amount(amount),
        _ => Salary::from(placeholder),
    }
}
