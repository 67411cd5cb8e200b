use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::io::{self, Write};

use cyclepredict::db::Database;
use cyclepredict::models::config::{Config, MAX_LENGTH_DAYS};
use cyclepredict::models::cycle::{
    CycleEntry, DEFAULT_CYCLE_LENGTH, DEFAULT_PERIOD_LENGTH, FlowIntensity,
};

pub fn run(skip: bool, today: Option<NaiveDate>) -> Result<()> {
    let mut config = Config::load().unwrap_or_default();

    if !skip {
        println!("CyclePredict — Initial Setup\n");

        config.profile.cycle_length = Some(prompt_days("Average cycle length in days", 28)?);
        config.profile.period_length = Some(prompt_days("Average period length in days", 5)?);
        let last_start = prompt_date("Last period start (YYYY-MM-DD, or empty)", today)?;

        config.save()?;

        let db = Database::open(&Config::db_path())?;
        if let Some(start) = last_start {
            db.insert_cycle_entry(&CycleEntry::new(start, FlowIntensity::Normal))?;
        }

        println!("\nSetup complete. Data stored in {:?}", Config::data_dir());
    } else {
        config
            .profile
            .cycle_length
            .get_or_insert(DEFAULT_CYCLE_LENGTH);
        config
            .profile
            .period_length
            .get_or_insert(DEFAULT_PERIOD_LENGTH);
        config.save()?;
        Database::open(&Config::db_path())?;
        println!("Config initialized with defaults at {:?}", Config::path());
    }

    Ok(())
}

fn prompt_string(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf.trim().to_string())
}

fn prompt_days(label: &str, default: u32) -> Result<u32> {
    loop {
        let s = prompt_string(&format!("{} [{}]", label, default))?;
        if s.is_empty() {
            return Ok(default);
        }
        match s.parse::<u32>() {
            Ok(v) if v > 0 && v <= MAX_LENGTH_DAYS => return Ok(v),
            _ => println!("Please enter a whole number from 1 to {}.", MAX_LENGTH_DAYS),
        }
    }
}

fn prompt_date(label: &str, today: Option<NaiveDate>) -> Result<Option<NaiveDate>> {
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    loop {
        let s = prompt_string(label)?;
        if s.is_empty() {
            return Ok(None);
        }
        match NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
            Ok(d) if d <= today => return Ok(Some(d)),
            Ok(_) => println!("That date is in the future."),
            Err(_) => println!("Please enter a date like 2025-10-28."),
        }
    }
}
