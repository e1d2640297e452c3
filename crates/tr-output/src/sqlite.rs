//! SQLite output backend (feature `sqlite`).
//!
//! Creates `diagnostics.db` in the configured output directory with two
//! tables: `deadline_series` and `skipped_vehicles`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{DeadlineRow, OutputResult, SkipRow};

pub const DB_FILE: &str = "diagnostics.db";

/// Writes diagnostics to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `diagnostics.db` in `dir` and initialise the schema.
    ///
    /// Tables left by an earlier run are dropped, so each run starts empty
    /// like the CSV files do.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join(DB_FILE))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             DROP TABLE IF EXISTS deadline_series;
             DROP TABLE IF EXISTS skipped_vehicles;
             CREATE TABLE deadline_series (
                 tick          INTEGER PRIMARY KEY,
                 time_secs     REAL    NOT NULL,
                 vehicles      INTEGER NOT NULL,
                 mean_deadline REAL    NOT NULL,
                 fallbacks     INTEGER NOT NULL,
                 skipped       INTEGER NOT NULL
             );
             CREATE TABLE skipped_vehicles (
                 tick       INTEGER NOT NULL,
                 vehicle_id TEXT    NOT NULL,
                 edge       INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_deadline(&mut self, row: &DeadlineRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO deadline_series \
             (tick, time_secs, vehicles, mean_deadline, fallbacks, skipped) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                row.tick as i64,
                row.time_secs,
                row.vehicles as i64,
                row.mean_deadline,
                row.fallbacks as i64,
                row.skipped as i64,
            ],
        )?;
        Ok(())
    }

    fn write_skips(&mut self, rows: &[SkipRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO skipped_vehicles (tick, vehicle_id, edge) VALUES (?1, ?2, ?3)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![row.tick as i64, row.vehicle_id, row.edge])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
