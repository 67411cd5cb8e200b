use anyhow::Result;
use chrono::{Local, NaiveDate};
use serde_json::json;

use cyclepredict::core::{generator, predict};
use cyclepredict::db::Database;
use cyclepredict::models::config::Config;
use cyclepredict::models::prediction::PredictionRecord;
use cyclepredict::output;
use cyclepredict::output::human;

pub fn run(date: Option<NaiveDate>, save: bool, human_flag: bool) -> Result<()> {
    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;
    let today = date.unwrap_or_else(|| Local::now().date_naive());

    let entries = db.list_cycle_entries(Some(predict::HISTORY_LIMIT as u32))?;
    let generator = generator::from_config(&config.generator.command);
    let profile = config.profile.cycle_profile();
    let prediction =
        predict::predict_from_history(profile.as_ref(), &entries, today, generator.as_ref())?;

    let prediction_id = if save {
        let record = PredictionRecord::from_history(today, &prediction);
        db.insert_prediction(&record)?;
        Some(record.id)
    } else {
        None
    };

    if human_flag {
        println!("{}", human::format_history_prediction(&prediction));
    } else {
        let out = output::success(
            "predict",
            json!({ "prediction_id": prediction_id, "prediction": prediction }),
        );
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_list(last: Option<u32>, human_flag: bool) -> Result<()> {
    let db = Database::open(&Config::db_path())?;
    let records = db.list_predictions(last)?;

    if human_flag {
        println!("{}", human::format_prediction_list(&records));
    } else {
        let count = records.len();
        let out = output::success(
            "predictions",
            json!({ "predictions": records, "count": count }),
        );
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
