//! Storage abstractions for vacancy persistence.
//!
//! A backend only has to read and write the whole record list; lookups,
//! de-duplicating inserts and deletes are built on top of that.
//!
//! ## Directory Structure
//!
//! ```text
//! data/
//! ├── config.toml           # Application configuration
//! └── vacancies.json        # Array of flat vacancy records
//! ```

pub mod json;

use crate::models::{Criteria, Record, Vacancy};

// Re-export for convenience
pub use json::JsonStorage;

/// Trait for vacancy storage backends.
///
/// Every operation is a full load, an in-memory change and a full save.
/// There is no locking; concurrent writers race and the last one wins.
pub trait VacancyStorage {
    /// Read all stored records. Unreadable storage counts as empty.
    fn load(&self) -> Vec<Record>;

    /// Replace the stored records. Failures are logged, not returned.
    fn save(&self, records: &[Record]);

    /// Append vacancies whose record is not already stored.
    ///
    /// Returns how many records were appended.
    fn add(&self, vacancies: &[Vacancy]) -> usize {
        let mut records = self.load();
        let mut added = 0;
        for vacancy in vacancies {
            let record = vacancy.to_record();
            if !records.contains(&record) {
                records.push(record);
                added += 1;
            }
        }
        self.save(&records);
        added
    }

    /// Records matching every field of `criteria`.
    fn get_by_criteria(&self, criteria: &Criteria) -> Vec<Record> {
        self.load()
            .into_iter()
            .filter(|record| criteria.matches(record))
            .collect()
    }

    /// Remove records matching every field of `criteria`.
    ///
    /// Returns how many records were removed.
    fn delete_by_criteria(&self, criteria: &Criteria) -> usize {
        let records = self.load();
        let before = records.len();
        let kept: Vec<Record> = records
            .into_iter()
            .filter(|record| !criteria.matches(record))
            .collect();
        let removed = before - kept.len();
        self.save(&kept);
        removed
    }
}
