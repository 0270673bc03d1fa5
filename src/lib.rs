// src/lib.rs

//! Vacancies Library

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod shell;
pub mod storage;
pub mod utils;
