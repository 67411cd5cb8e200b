use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::params;

use crate::models::cycle::Phase;
use crate::models::prediction::{PredictionRecord, PredictionSource};

use super::{Database, decode_list, encode_list};

struct PredictionRow {
    id: String,
    bill_id: Option<String>,
    prediction_date: String,
    next_period_date: String,
    cycle_length: u32,
    confidence: u32,
    predicted_phase: Option<String>,
    fertile_window_start: Option<String>,
    fertile_window_end: Option<String>,
    insights: Option<String>,
    recommendations: Option<String>,
    source: String,
    created_at: String,
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
}

fn parse_opt_date(s: Option<String>) -> Result<Option<NaiveDate>> {
    s.as_deref().map(parse_date).transpose()
}

fn row_to_record(r: PredictionRow) -> Result<PredictionRecord> {
    let predicted_phase = r
        .predicted_phase
        .as_deref()
        .map(str::parse::<Phase>)
        .transpose()?;
    let source: PredictionSource = r.source.parse()?;
    let created_at: DateTime<Utc> =
        DateTime::parse_from_rfc3339(&r.created_at)?.with_timezone(&Utc);

    Ok(PredictionRecord {
        id: r.id,
        bill_id: r.bill_id,
        prediction_date: parse_date(&r.prediction_date)?,
        next_period_date: parse_date(&r.next_period_date)?,
        cycle_length: r.cycle_length,
        confidence: r.confidence,
        predicted_phase,
        fertile_window_start: parse_opt_date(r.fertile_window_start)?,
        fertile_window_end: parse_opt_date(r.fertile_window_end)?,
        insights: decode_list(r.insights),
        recommendations: decode_list(r.recommendations),
        source,
        created_at,
    })
}

const SELECT_COLS: &str = "id, bill_id, prediction_date, next_period_date, cycle_length, confidence, predicted_phase, fertile_window_start, fertile_window_end, insights, recommendations, source, created_at";

macro_rules! map_row {
    ($row:expr) => {
        Ok(PredictionRow {
            id: $row.get(0)?,
            bill_id: $row.get(1)?,
            prediction_date: $row.get(2)?,
            next_period_date: $row.get(3)?,
            cycle_length: $row.get(4)?,
            confidence: $row.get(5)?,
            predicted_phase: $row.get(6)?,
            fertile_window_start: $row.get(7)?,
            fertile_window_end: $row.get(8)?,
            insights: $row.get(9)?,
            recommendations: $row.get(10)?,
            source: $row.get(11)?,
            created_at: $row.get(12)?,
        })
    };
}

fn fmt_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

impl Database {
    pub fn insert_prediction(&self, p: &PredictionRecord) -> Result<()> {
        self.conn.execute(
            "INSERT INTO predictions (id, bill_id, prediction_date, next_period_date, cycle_length, confidence, predicted_phase, fertile_window_start, fertile_window_end, insights, recommendations, source, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                p.id,
                p.bill_id,
                fmt_date(p.prediction_date),
                fmt_date(p.next_period_date),
                p.cycle_length,
                p.confidence,
                p.predicted_phase.map(|ph| ph.to_string()),
                p.fertile_window_start.map(fmt_date),
                p.fertile_window_end.map(fmt_date),
                encode_list(&p.insights)?,
                encode_list(&p.recommendations)?,
                p.source.to_string(),
                p.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Stored predictions, newest first.
    pub fn list_predictions(&self, limit: Option<u32>) -> Result<Vec<PredictionRecord>> {
        let sql =
            format!("SELECT {SELECT_COLS} FROM predictions ORDER BY created_at DESC LIMIT ?1");
        let limit = limit.map_or(-1, i64::from);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![limit], |row| map_row!(row))?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row_to_record(row?)?);
        }
        Ok(records)
    }

    pub fn latest_prediction(&self) -> Result<Option<PredictionRecord>> {
        Ok(self.list_predictions(Some(1))?.into_iter().next())
    }
}
