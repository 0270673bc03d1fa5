// src/models/mod.rs

//! Domain models for the vacancies application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod criteria;
mod vacancy;

// Re-export all public types
pub use config::{ApiConfig, Config, StorageConfig};
pub use criteria::Criteria;
pub use vacancy::{
    NOT_SPECIFIED, Record, SALARY_FROM_UNSPECIFIED, SALARY_TO_UNSPECIFIED, Salary, Vacancy,
};
