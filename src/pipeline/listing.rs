// src/pipeline/listing.rs

//! Ranking and filtering of stored vacancies.

use std::cmp::Ordering;

use crate::models::{Record, Vacancy};

/// Rebuild vacancies from stored records, skipping invalid ones.
pub fn to_vacancies(records: Vec<Record>) -> Vec<Vacancy> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match Vacancy::try_from(record) {
            Ok(vacancy) => Some(vacancy),
            Err(e) => {
                log::warn!("Skipping stored record #{}: {}", index, e);
                None
            }
        })
        .collect()
}

/// The `n` best-paid vacancies by average salary, highest first.
///
/// Vacancies without any numeric bound come last, in stored order.
pub fn top_by_salary(records: Vec<Record>, n: usize) -> Vec<Vacancy> {
    let mut vacancies = to_vacancies(records);
    vacancies.sort_by(|a, b| match (a.average_salary(), b.average_salary()) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    vacancies.truncate(n);
    vacancies
}

/// Vacancies whose requirement text contains `keyword`, ignoring case.
pub fn filter_by_requirement(records: Vec<Record>, keyword: &str) -> Vec<Vacancy> {
    let needle = keyword.to_lowercase();
    to_vacancies(records)
        .into_iter()
        .filter(|v| {
            v.requirement()
                .is_some_and(|text| text.to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NOT_SPECIFIED, SALARY_FROM_UNSPECIFIED, SALARY_TO_UNSPECIFIED, Salary};
    use serde_json::json;

    fn record(name: &str, from: Salary, to: Salary, requirement: Option<&str>) -> Record {
        Vacancy::new(
            name,
            format!("https://hh.ru/vacancy/{name}"),
            from,
            to,
            "Moscow",
            requirement.map(str::to_string),
            NOT_SPECIFIED,
        )
        .unwrap()
        .to_record()
    }

    fn names(vacancies: &[Vacancy]) -> Vec<&str> {
        vacancies.iter().map(Vacancy::name).collect()
    }

    #[test]
    fn test_top_by_salary_orders_descending() {
        let records = vec![
            record("low", 50000.into(), 70000.into(), None),
            record("none", SALARY_FROM_UNSPECIFIED.into(), SALARY_TO_UNSPECIFIED.into(), None),
            record("high", 200000.into(), 300000.into(), None),
            record("mid", 150000.into(), SALARY_TO_UNSPECIFIED.into(), None),
        ];

        let top = top_by_salary(records.clone(), 10);
        assert_eq!(names(&top), vec!["high", "mid", "low", "none"]);

        let top_two = top_by_salary(records, 2);
        assert_eq!(names(&top_two), vec!["high", "mid"]);
    }

    #[test]
    fn test_invalid_records_are_skipped() {
        let mut broken = record("broken", 1.into(), 2.into(), None);
        broken.insert("name_vacancy".into(), json!(""));
        let records = vec![broken, record("ok", 1.into(), 2.into(), None)];

        assert_eq!(names(&to_vacancies(records)), vec!["ok"]);
    }

    #[test]
    fn test_filter_by_requirement_ignores_case() {
        let records = vec![
            record("a", 1.into(), 2.into(), Some("Experience with PostgreSQL")),
            record("b", 1.into(), 2.into(), Some("Knowledge of Rust")),
            record("c", 1.into(), 2.into(), None),
        ];

        let found = filter_by_requirement(records, "postgresql");
        assert_eq!(names(&found), vec!["a"]);
    }

    #[test]
    fn test_filter_by_requirement_no_match() {
        let records = vec![record("a", 1.into(), 2.into(), Some("Go"))];
        assert!(filter_by_requirement(records, "haskell").is_empty());
    }
}
