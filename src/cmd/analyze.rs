use anyhow::{Result, bail};
use chrono::{Local, NaiveDate};
use serde_json::json;
use std::path::Path;
use tracing::info;

use cyclepredict::core::{analyze, extract, predict};
use cyclepredict::db::Database;
use cyclepredict::models::bill::Bill;
use cyclepredict::models::config::Config;
use cyclepredict::models::prediction::PredictionRecord;
use cyclepredict::output;
use cyclepredict::output::human;

pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "pdf", "jpg", "jpeg", "png"];

/// Read a bill file. There is no OCR step: the bytes are decoded as text
/// and passed through as-is.
fn read_bill_file(path: &Path) -> Result<String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        bail!(
            "unsupported file type '{}' (expected one of: {})",
            ext,
            SUPPORTED_EXTENSIONS.join(", ")
        );
    }
    let size = std::fs::metadata(path)?.len();
    if size > MAX_FILE_SIZE {
        bail!("file is {} bytes; the limit is {} bytes", size, MAX_FILE_SIZE);
    }
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn run(
    file: Option<&Path>,
    text: Option<&str>,
    last_period: Option<NaiveDate>,
    date: Option<NaiveDate>,
    save: bool,
    human_flag: bool,
) -> Result<()> {
    let (raw, file_name) = match (text, file) {
        (Some(t), _) => (t.to_string(), None),
        (None, Some(p)) => (
            read_bill_file(p)?,
            p.file_name().map(|n| n.to_string_lossy().into_owned()),
        ),
        (None, None) => bail!("No extracted text provided"),
    };
    if raw.trim().is_empty() {
        bail!("No extracted text provided");
    }

    let today = date.unwrap_or_else(|| Local::now().date_naive());
    let extracted = extract::extract(&raw);
    let analysis = analyze::analyze(&extracted.medicines);
    let prediction = predict::predict_from(&analysis, last_period.unwrap_or(today))?;
    info!(
        medicines = extracted.medicines.len(),
        confidence = prediction.confidence,
        "bill analyzed"
    );

    let mut bill_id = None;
    let mut prediction_id = None;
    if save {
        let db = Database::open(&Config::db_path())?;
        let bill = Bill::new(file_name.as_deref(), &raw, extracted.clone());
        db.insert_bill(&bill)?;
        let record = PredictionRecord::from_bill(Some(&bill.id), today, &prediction);
        db.insert_prediction(&record)?;
        bill_id = Some(bill.id);
        prediction_id = Some(record.id);
    }

    if human_flag {
        println!("{}", human::format_extracted(&extracted));
        println!();
        println!("{}", human::format_prediction(&prediction));
    } else {
        let out = output::success(
            "analyze",
            json!({
                "bill_id": bill_id,
                "prediction_id": prediction_id,
                "extracted": extracted,
                "analysis": analysis,
                "prediction": prediction,
            }),
        );
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_list(last: Option<u32>, human_flag: bool) -> Result<()> {
    let db = Database::open(&Config::db_path())?;
    let bills = db.list_bills(last)?;

    if human_flag {
        println!("{}", human::format_bill_list(&bills));
    } else {
        let count = bills.len();
        let out = output::success("bills", json!({ "bills": bills, "count": count }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
