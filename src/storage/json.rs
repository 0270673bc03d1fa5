//! Local JSON file storage implementation.
//!
//! The whole record list lives in one pretty-printed JSON array. Writes go
//! to a sibling `.tmp` file which is flushed and renamed over the target, so
//! an interrupted write leaves the previous contents in place.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::{AppError, Result};
use crate::models::Record;
use crate::storage::VacancyStorage;

/// JSON file storage backend.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    /// Open the store at `path`, creating it as `[]` if it does not exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let storage = Self { path: path.into() };
        if !storage.path.exists() {
            log::debug!("Creating empty store at {}", storage.path.display());
            storage.save(&[]);
        }
        storage
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the file; a missing or blank file is an empty list.
    fn read_records(&self) -> Result<Vec<Record>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(AppError::Io(e)),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Write atomically (write to temp, then rename).
    ///
    /// On failure the temp file is removed and the target is left untouched.
    fn write_records(&self, records: &[Record]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        let result = write_pretty(&tmp, records)
            .and_then(|()| fs::rename(&tmp, &self.path).map_err(AppError::Io));
        if result.is_err() && tmp.exists() {
            if let Err(e) = fs::remove_file(&tmp) {
                log::warn!("Failed to remove {}: {}", tmp.display(), e);
            }
        }
        result
    }
}

/// Serialize `records` to `path` with a four-space indent and sync to disk.
fn write_pretty(path: &Path, records: &[Record]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    records.serialize(&mut serializer)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(())
}

impl VacancyStorage for JsonStorage {
    fn load(&self) -> Vec<Record> {
        self.read_records().unwrap_or_else(|e| {
            log::error!("Failed to read {}: {}", self.path.display(), e);
            Vec::new()
        })
    }

    fn save(&self, records: &[Record]) {
        match self.write_records(records) {
            Ok(()) => log::debug!("Saved {} records to {}", records.len(), self.path.display()),
            Err(e) => log::error!("Failed to write {}: {}", self.path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Criteria, SALARY_TO_UNSPECIFIED, Vacancy};
    use serde_json::{Value, json};
    use tempfile::TempDir;

    fn vacancy_a() -> Vacancy {
        Vacancy::new(
            "Python Developer",
            "https://hh.ru/vacancy/123456",
            100000,
            300000,
            "Moscow",
            Some("Basic programming skills.".to_string()),
            "Remote",
        )
        .unwrap()
    }

    fn vacancy_b() -> Vacancy {
        Vacancy::new(
            "Python",
            "https://hh.ru/vacancy/123789",
            200000,
            SALARY_TO_UNSPECIFIED,
            "Yekaterinburg",
            None,
            "Hybrid",
        )
        .unwrap()
    }

    fn storage_in(tmp: &TempDir) -> JsonStorage {
        JsonStorage::new(tmp.path().join("vacancies.json"))
    }

    #[test]
    fn test_new_creates_empty_array() {
        let tmp = TempDir::new().unwrap();
        let storage = storage_in(&tmp);

        let content = fs::read_to_string(storage.path()).unwrap();
        assert_eq!(content.trim(), "[]");
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_new_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let storage = JsonStorage::new(tmp.path().join("nested/dir/vacancies.json"));
        assert!(storage.path().exists());
    }

    #[test]
    fn test_new_keeps_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("vacancies.json");
        fs::write(&path, r#"[{"name_vacancy": "Kept"}]"#).unwrap();

        let storage = JsonStorage::new(path.clone());
        assert_eq!(storage.load().len(), 1);
    }

    #[test]
    fn test_save_then_load() {
        let tmp = TempDir::new().unwrap();
        let storage = storage_in(&tmp);
        let records = vec![vacancy_a().to_record(), vacancy_b().to_record()];

        storage.save(&records);
        assert_eq!(storage.load(), records);
    }

    #[test]
    fn test_save_is_pretty_and_keeps_non_ascii() {
        let tmp = TempDir::new().unwrap();
        let storage = storage_in(&tmp);
        let record = match json!({"city": "Москва"}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };

        storage.save(&[record]);
        let content = fs::read_to_string(storage.path()).unwrap();
        assert!(content.contains("Москва"));
        assert!(content.contains("\n        \"city\""));
        assert!(!tmp.path().join("vacancies.tmp").exists());
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = TempDir::new().unwrap();
        let storage = storage_in(&tmp);
        fs::remove_file(storage.path()).unwrap();
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_load_blank_file() {
        let tmp = TempDir::new().unwrap();
        let storage = storage_in(&tmp);
        fs::write(storage.path(), "  \n").unwrap();
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_load_invalid_content() {
        let tmp = TempDir::new().unwrap();
        let storage = storage_in(&tmp);

        fs::write(storage.path(), "{not json").unwrap();
        assert!(storage.load().is_empty());

        fs::write(storage.path(), r#"{"name_vacancy": "object, not array"}"#).unwrap();
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_add_single() {
        let tmp = TempDir::new().unwrap();
        let storage = storage_in(&tmp);

        assert_eq!(storage.add(std::slice::from_ref(&vacancy_a())), 1);
        let records = storage.load();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["name_vacancy"], "Python Developer");
    }

    #[test]
    fn test_add_multiple_keeps_order() {
        let tmp = TempDir::new().unwrap();
        let storage = storage_in(&tmp);

        assert_eq!(storage.add(&[vacancy_a(), vacancy_b()]), 2);
        let records = storage.load();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["name_vacancy"], "Python Developer");
        assert_eq!(records[1]["name_vacancy"], "Python");
    }

    #[test]
    fn test_add_duplicate() {
        let tmp = TempDir::new().unwrap();
        let storage = storage_in(&tmp);

        storage.add(&[vacancy_a()]);
        assert_eq!(storage.add(&[vacancy_a()]), 0);
        assert_eq!(storage.load().len(), 1);
    }

    #[test]
    fn test_add_duplicate_within_batch() {
        let tmp = TempDir::new().unwrap();
        let storage = storage_in(&tmp);

        assert_eq!(storage.add(&[vacancy_a(), vacancy_a()]), 1);
        assert_eq!(storage.load().len(), 1);
    }

    #[test]
    fn test_get_by_criteria() {
        let tmp = TempDir::new().unwrap();
        let storage = storage_in(&tmp);
        storage.add(&[vacancy_a(), vacancy_b()]);

        let criteria = Criteria::new().with("name_vacancy", "Python Developer");
        let found = storage.get_by_criteria(&criteria);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["name_vacancy"], "Python Developer");

        let by_vacancy = storage.get_by_criteria(&Criteria::from(&vacancy_b()));
        assert_eq!(by_vacancy, vec![vacancy_b().to_record()]);
    }

    #[test]
    fn test_get_by_criteria_no_match() {
        let tmp = TempDir::new().unwrap();
        let storage = storage_in(&tmp);
        storage.add(&[vacancy_a()]);

        let criteria = Criteria::new().with("city", "Kazan");
        assert!(storage.get_by_criteria(&criteria).is_empty());
    }

    #[test]
    fn test_delete_by_criteria() {
        let tmp = TempDir::new().unwrap();
        let storage = storage_in(&tmp);
        storage.add(&[vacancy_a(), vacancy_b()]);

        let criteria = Criteria::new().with("name_vacancy", "Python Developer");
        assert_eq!(storage.delete_by_criteria(&criteria), 1);

        let remaining = storage.load();
        assert_eq!(remaining, vec![vacancy_b().to_record()]);
        assert!(remaining.iter().all(|r| !criteria.matches(r)));
    }

    #[test]
    fn test_delete_nonexistent() {
        let tmp = TempDir::new().unwrap();
        let storage = storage_in(&tmp);
        storage.add(&[vacancy_a()]);
        let before = storage.load();

        let criteria = Criteria::new().with("name_vacancy", "Nonexistent Job");
        assert_eq!(storage.delete_by_criteria(&criteria), 0);
        assert_eq!(storage.load(), before);
    }

    #[test]
    fn test_delete_from_empty_store() {
        let tmp = TempDir::new().unwrap();
        let storage = storage_in(&tmp);

        let criteria = Criteria::new().with("name_vacancy", "Nonexistent Job");
        storage.delete_by_criteria(&criteria);
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_failed_write_removes_temp_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("vacancies.json");
        // A non-empty directory at the target makes the final rename fail.
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();
        let storage = JsonStorage::new(&path);

        assert!(storage.write_records(&[vacancy_a().to_record()]).is_err());
        assert!(!path.with_extension("tmp").exists());
        assert!(path.join("keep").exists());
    }

    #[test]
    fn test_file_keeps_field_order() {
        let tmp = TempDir::new().unwrap();
        let storage = storage_in(&tmp);
        storage.add(&[vacancy_a()]);

        let content = fs::read_to_string(storage.path()).unwrap();
        let positions: Vec<usize> = [
            "name_vacancy",
            "url",
            "salary_from",
            "salary_to",
            "city",
            "requirement",
            "work_format",
        ]
        .iter()
        .map(|key| content.find(&format!("\"{key}\"")).unwrap())
        .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
