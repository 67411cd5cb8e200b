use anyhow::Result;
use rusqlite::Connection;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS bills (
            id             TEXT PRIMARY KEY,
            file_name      TEXT,
            extracted_text TEXT NOT NULL,
            dates          TEXT NOT NULL DEFAULT '[]',
            medicines      TEXT NOT NULL DEFAULT '[]',
            amounts        TEXT NOT NULL DEFAULT '[]',
            created_at     TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_bills_created ON bills(created_at);

        CREATE TABLE IF NOT EXISTS cycle_entries (
            id                TEXT PRIMARY KEY,
            period_start_date TEXT NOT NULL,
            flow_intensity    TEXT NOT NULL,
            symptoms          TEXT,
            created_at        TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_cycle_start ON cycle_entries(period_start_date);

        CREATE TABLE IF NOT EXISTS predictions (
            id                   TEXT PRIMARY KEY,
            bill_id              TEXT REFERENCES bills(id),
            prediction_date      TEXT NOT NULL,
            next_period_date     TEXT NOT NULL,
            cycle_length         INTEGER NOT NULL,
            confidence           INTEGER NOT NULL,
            predicted_phase      TEXT,
            fertile_window_start TEXT,
            fertile_window_end   TEXT,
            insights             TEXT NOT NULL DEFAULT '[]',
            recommendations      TEXT NOT NULL DEFAULT '[]',
            source               TEXT NOT NULL,
            created_at           TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_predictions_created ON predictions(created_at);",
    )?;
    Ok(())
}
