// src/pipeline/search.rs

//! Search pipeline: fetch, map, store.

use crate::services::{VacancyFetcher, map_vacancies};
use crate::storage::VacancyStorage;
use crate::utils::http::HttpTransport;

/// Counts reported by a search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchSummary {
    /// Raw items received from the API
    pub fetched: usize,
    /// Items turned into vacancies
    pub mapped: usize,
    /// Items that failed validation
    pub rejected: usize,
    /// Vacancies not previously stored
    pub added: usize,
}

/// Search `keyword` over `pages` pages and store the resulting vacancies.
pub fn run_search<T: HttpTransport>(
    fetcher: &VacancyFetcher<T>,
    storage: &dyn VacancyStorage,
    keyword: &str,
    pages: u32,
) -> SearchSummary {
    log::info!("Searching '{}' across up to {} page(s)", keyword, pages);

    let items = fetcher.fetch(keyword, pages);
    let outcome = map_vacancies(&items);
    let added = storage.add(&outcome.vacancies);

    let summary = SearchSummary {
        fetched: items.len(),
        mapped: outcome.vacancies.len(),
        rejected: outcome.rejected.len(),
        added,
    };
    log::info!(
        "Search '{}': {} fetched, {} mapped, {} rejected, {} new",
        keyword,
        summary.fetched,
        summary.mapped,
        summary.rejected,
        summary.added
    );
    summary
}
