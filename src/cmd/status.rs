use anyhow::Result;
use chrono::{Local, NaiveDate};

use cyclepredict::core::predict;
use cyclepredict::db::Database;
use cyclepredict::models::config::Config;
use cyclepredict::output;
use cyclepredict::output::human;

pub fn run(date: Option<NaiveDate>, human_flag: bool) -> Result<()> {
    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;
    let today = date.unwrap_or_else(|| Local::now().date_naive());

    let entries = db.list_cycle_entries(Some(1))?;
    let profile = config.profile.cycle_profile();
    let status = predict::cycle_status(profile.as_ref(), &entries, today)?;

    if human_flag {
        println!("{}", human::format_status(&status));
    } else {
        output::print_success("status", &status)?;
    }
    Ok(())
}
