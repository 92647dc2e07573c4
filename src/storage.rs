use rusqlite::{params, Connection};
use std::path::Path;
use tracing::warn;

use crate::error::Result;
use crate::models::StudyPlan;

// The whole plan collection lives under this one key as a JSON array; every
// save overwrites it in full.
const PLANS_KEY: &str = "study_plans";

pub struct Storage {
    conn: Connection,
}

impl Storage {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;
        Ok(Self { conn })
    }

    // A missing key means no plans yet. An unreadable value is logged and
    // treated the same, without deleting the stored bytes.
    pub fn load(&self) -> Result<Vec<StudyPlan>> {
        let raw = match self.read_value()? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };

        match serde_json::from_str(&raw) {
            Ok(plans) => Ok(plans),
            Err(e) => {
                warn!("stored plans under '{}' are unreadable, starting empty: {}", PLANS_KEY, e);
                Ok(Vec::new())
            }
        }
    }

    pub fn save(&self, plans: &[StudyPlan]) -> Result<()> {
        let json = serde_json::to_string(plans)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![PLANS_KEY, json],
        )?;
        Ok(())
    }

    fn read_value(&self) -> Result<Option<String>> {
        let value = self.conn.query_row(
            "SELECT value FROM kv WHERE key = ?1",
            params![PLANS_KEY],
            |row| row.get(0),
        );

        match value {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
