use anyhow::Result;
use chrono::NaiveDate;
use serde_json::json;

use cyclepredict::db::Database;
use cyclepredict::models::config::Config;
use cyclepredict::models::cycle::{CycleEntry, FlowIntensity};
use cyclepredict::output;
use cyclepredict::output::human;

pub fn run_log(
    start: NaiveDate,
    flow: &str,
    symptoms: Option<&str>,
    human_flag: bool,
) -> Result<()> {
    let flow: FlowIntensity = flow.parse()?;
    let db = Database::open(&Config::db_path())?;

    let mut entry = CycleEntry::new(start, flow);
    if let Some(s) = symptoms {
        entry = entry.with_symptoms(s.split(','));
    }
    db.insert_cycle_entry(&entry)?;

    if human_flag {
        let symptoms = if entry.symptoms.is_empty() {
            String::new()
        } else {
            format!("  [{}]", entry.symptoms.join(", "))
        };
        println!(
            "Logged period start {} ({} flow){}",
            entry.period_start_date, entry.flow_intensity, symptoms
        );
    } else {
        let out = output::success("cycle_log", json!({ "entry": entry }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_list(last: Option<u32>, human_flag: bool) -> Result<()> {
    let db = Database::open(&Config::db_path())?;
    let entries = db.list_cycle_entries(last)?;

    if human_flag {
        println!("{}", human::format_cycle_list(&entries));
    } else {
        let count = entries.len();
        let out = output::success("cycle_list", json!({ "entries": entries, "count": count }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_remove(id: &str, human_flag: bool) -> Result<()> {
    let db = Database::open(&Config::db_path())?;
    if !db.delete_cycle_entry(id)? {
        anyhow::bail!("Cycle entry '{}' not found.", id);
    }

    if human_flag {
        println!("Removed cycle entry {}", id);
    } else {
        let out = output::success("cycle_remove", json!({ "id": id, "removed": true }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
