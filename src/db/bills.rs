use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::params;

use crate::models::bill::Bill;

use super::{Database, decode_list, encode_list};

struct BillRow {
    id: String,
    file_name: Option<String>,
    extracted_text: String,
    dates: Option<String>,
    medicines: Option<String>,
    amounts: Option<String>,
    created_at: String,
}

fn row_to_bill(r: BillRow) -> Result<Bill> {
    let created_at: DateTime<Utc> =
        DateTime::parse_from_rfc3339(&r.created_at)?.with_timezone(&Utc);
    Ok(Bill {
        id: r.id,
        file_name: r.file_name,
        extracted_text: r.extracted_text,
        dates: decode_list(r.dates),
        medicines: decode_list(r.medicines),
        amounts: decode_list(r.amounts),
        created_at,
    })
}

const SELECT_COLS: &str = "id, file_name, extracted_text, dates, medicines, amounts, created_at";

macro_rules! map_row {
    ($row:expr) => {
        Ok(BillRow {
            id: $row.get(0)?,
            file_name: $row.get(1)?,
            extracted_text: $row.get(2)?,
            dates: $row.get(3)?,
            medicines: $row.get(4)?,
            amounts: $row.get(5)?,
            created_at: $row.get(6)?,
        })
    };
}

impl Database {
    pub fn insert_bill(&self, bill: &Bill) -> Result<()> {
        self.conn.execute(
            "INSERT INTO bills (id, file_name, extracted_text, dates, medicines, amounts, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                bill.id,
                bill.file_name,
                bill.extracted_text,
                encode_list(&bill.dates)?,
                encode_list(&bill.medicines)?,
                encode_list(&bill.amounts)?,
                bill.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn get_bill(&self, id: &str) -> Result<Option<Bill>> {
        let sql = format!("SELECT {SELECT_COLS} FROM bills WHERE id = ?1");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query_map(params![id], |row| map_row!(row))?;
        match rows.next() {
            Some(row) => Ok(Some(row_to_bill(row?)?)),
            None => Ok(None),
        }
    }

    /// Bills, newest first.
    pub fn list_bills(&self, limit: Option<u32>) -> Result<Vec<Bill>> {
        let sql = format!("SELECT {SELECT_COLS} FROM bills ORDER BY created_at DESC LIMIT ?1");
        let limit = limit.map_or(-1, i64::from);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![limit], |row| map_row!(row))?;

        let mut bills = Vec::new();
        for row in rows {
            bills.push(row_to_bill(row?)?);
        }
        Ok(bills)
    }

    pub fn count_bills(&self) -> Result<u32> {
        let count: u32 = self
            .conn
            .query_row("SELECT COUNT(*) FROM bills", [], |row| row.get(0))?;
        Ok(count)
    }
}
