use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::params;

use crate::models::cycle::{CycleEntry, FlowIntensity};

use super::{Database, decode_list, encode_list};

struct CycleRow {
    id: String,
    period_start_date: String,
    flow_intensity: String,
    symptoms: Option<String>,
    created_at: String,
}

fn row_to_entry(r: CycleRow) -> Result<CycleEntry> {
    let period_start_date = NaiveDate::parse_from_str(&r.period_start_date, "%Y-%m-%d")?;
    let flow_intensity: FlowIntensity = r.flow_intensity.parse()?;
    let created_at: DateTime<Utc> =
        DateTime::parse_from_rfc3339(&r.created_at)?.with_timezone(&Utc);
    Ok(CycleEntry {
        id: r.id,
        period_start_date,
        flow_intensity,
        symptoms: decode_list(r.symptoms),
        created_at,
    })
}

impl Database {
    pub fn insert_cycle_entry(&self, entry: &CycleEntry) -> Result<()> {
        let symptoms = if entry.symptoms.is_empty() {
            None
        } else {
            Some(encode_list(&entry.symptoms)?)
        };
        self.conn.execute(
            "INSERT INTO cycle_entries (id, period_start_date, flow_intensity, symptoms, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.id,
                entry.period_start_date.format("%Y-%m-%d").to_string(),
                entry.flow_intensity.to_string(),
                symptoms,
                entry.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Cycle entries ordered by period start, most recent first.
    pub fn list_cycle_entries(&self, limit: Option<u32>) -> Result<Vec<CycleEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, period_start_date, flow_intensity, symptoms, created_at
             FROM cycle_entries ORDER BY period_start_date DESC, created_at DESC LIMIT ?1",
        )?;
        let limit = limit.map_or(-1, i64::from);
        let rows = stmt.query_map(params![limit], |row| {
            Ok(CycleRow {
                id: row.get(0)?,
                period_start_date: row.get(1)?,
                flow_intensity: row.get(2)?,
                symptoms: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row_to_entry(row?)?);
        }
        Ok(entries)
    }

    pub fn delete_cycle_entry(&self, id: &str) -> Result<bool> {
        let count = self
            .conn
            .execute("DELETE FROM cycle_entries WHERE id = ?1", params![id])?;
        Ok(count > 0)
    }
}
