//! Pipeline entry points for vacancy operations.
//!
//! - `run_search`: Fetch listings for a keyword and store them
//! - `top_by_salary` / `filter_by_requirement`: Rank and filter stored vacancies

pub mod listing;
pub mod search;

pub use listing::{filter_by_requirement, to_vacancies, top_by_salary};
pub use search::{SearchSummary, run_search};
