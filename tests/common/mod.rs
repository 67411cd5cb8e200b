#![allow(dead_code)]

use anyhow::{Result, bail};
use chrono::NaiveDate;
use cyclepredict::core::generator::TextGenerator;
use cyclepredict::db::Database;
use cyclepredict::models::cycle::{CycleEntry, FlowIntensity};
use std::cell::RefCell;
use tempfile::TempDir;

/// Create a temporary database for testing.
pub fn setup_db() -> (TempDir, Database) {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("test.db");
    let db = Database::open(&db_path).unwrap();
    (dir, db)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn entry(start: NaiveDate) -> CycleEntry {
    CycleEntry::new(start, FlowIntensity::Normal)
}

/// Generator that always answers with the same text and remembers the
/// last prompt it saw.
pub struct StaticGenerator {
    pub answer: String,
    pub last_prompt: RefCell<String>,
}

impl StaticGenerator {
    pub fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            last_prompt: RefCell::new(String::new()),
        }
    }
}

impl TextGenerator for StaticGenerator {
    fn generate(&self, prompt: &str) -> Result<String> {
        *self.last_prompt.borrow_mut() = prompt.to_string();
        Ok(self.answer.clone())
    }
}

/// Generator whose call always fails, as a network error would.
pub struct FailingGenerator;

impl TextGenerator for FailingGenerator {
    fn generate(&self, _prompt: &str) -> Result<String> {
        bail!("connection refused")
    }
}
