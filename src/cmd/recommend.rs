use anyhow::Result;
use chrono::{Local, NaiveDate};
use serde_json::json;

use cyclepredict::core::{generator, predict, recommend};
use cyclepredict::db::Database;
use cyclepredict::models::config::Config;
use cyclepredict::models::cycle::Phase;
use cyclepredict::output;
use cyclepredict::output::human;

pub fn run(date: Option<NaiveDate>, human_flag: bool) -> Result<()> {
    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;
    let today = date.unwrap_or_else(|| Local::now().date_naive());

    let entries = db.list_cycle_entries(Some(predict::HISTORY_LIMIT as u32))?;
    let profile = config.profile.cycle_profile();

    // Prefer the phase of the latest stored prediction, then today's status.
    let phase: Option<Phase> = match db.latest_prediction()?.and_then(|p| p.predicted_phase) {
        Some(p) => Some(p),
        None => predict::cycle_status(profile.as_ref(), &entries, today)
            .ok()
            .map(|s| s.phase),
    };
    let has_bills = db.count_bills()? > 0;

    let generator = generator::from_config(&config.generator.command);
    let recommendations = recommend::generate(phase, &entries, has_bills, generator.as_ref())?;

    if human_flag {
        println!("{}", human::format_recommendations(&recommendations));
    } else {
        let out = output::success(
            "recommend",
            json!({ "phase": phase, "recommendations": recommendations }),
        );
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
