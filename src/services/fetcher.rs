// src/services/fetcher.rs

//! Listings fetcher service.
//!
//! Walks the search result pages for a keyword one request at a time and
//! collects the raw `items` of every page. A failed request or a non-200
//! status ends the walk; whatever was collected so far is returned.

use serde::Deserialize;
use serde_json::Value;

use crate::models::ApiConfig;
use crate::utils::http::{HttpTransport, PageRequest};

/// Decoded body of a successful page response.
#[derive(Debug, Deserialize)]
struct PageBody {
    #[serde(default)]
    items: Vec<Value>,
    /// Total page count reported by the API
    #[serde(default)]
    pages: Option<u32>,
}

/// Service for fetching raw vacancy items from the listings API.
pub struct VacancyFetcher<T> {
    transport: T,
    per_page: u32,
}

impl<T: HttpTransport> VacancyFetcher<T> {
    /// Create a fetcher requesting `per_page` items per page.
    pub fn new(transport: T, per_page: u32) -> Self {
        Self {
            transport,
            per_page,
        }
    }

    /// Create a fetcher using the page size from configuration.
    pub fn from_config(transport: T, config: &ApiConfig) -> Self {
        Self::new(transport, config.per_page)
    }

    /// Fetch up to `pages` pages of results for `keyword`.
    pub fn fetch(&self, keyword: &str, pages: u32) -> Vec<Value> {
        let mut items = Vec::new();

        for page in 0..pages {
            let request = PageRequest {
                keyword,
                page,
                per_page: self.per_page,
            };

            let response = match self.transport.get_page(&request) {
                Ok(response) => response,
                Err(error) => {
                    log::warn!("Request for page {} failed: {}", page, error);
                    break;
                }
            };

            if response.status != 200 {
                log::warn!("Received status {} for page {}", response.status, page);
                break;
            }

            let body: PageBody = match serde_json::from_str(&response.body) {
                Ok(body) => body,
                Err(error) => {
                    log::warn!("Page {} has an unreadable body: {}", page, error);
                    break;
                }
            };

            log::debug!("Page {}: {} items", page, body.items.len());
            items.extend(body.items);

            if body.pages.is_some_and(|total| page + 1 >= total) {
                log::debug!("Reached the last page reported by the API");
                break;
            }
        }

        log::info!("Fetched {} raw vacancies for '{}'", items.len(), keyword);
        items
    }
}
