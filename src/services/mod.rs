//! Service layer for the vacancies application.
//!
//! This module contains the business logic for:
//! - Page-by-page listing retrieval (`VacancyFetcher`)
//! - Raw item normalization (`map_vacancies`)

mod fetcher;
mod mapper;

pub use fetcher::VacancyFetcher;
pub use mapper::{MapOutcome, Rejected, map_vacancies, map_vacancy};

#[cfg(test)]
pub(crate) use fetcher::tests as fetcher_tests;
