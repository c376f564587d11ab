//! SQLite complaint store.
//!
//! Persistence collaborator for assembled decision records. The core only
//! depends on three operations: add, lookup by ticket id, and list all.
//! Records are flattened to columns; keywords are stored as a JSON array.

use crate::error::Result;
use crate::types::{Category, DecisionRecord, PriorityLevel, SentimentLabel, SentimentResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use std::path::Path;
use tracing::info;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS complaints (
    ticket_id TEXT PRIMARY KEY,
    citizen_name TEXT NOT NULL,
    citizen_email TEXT NOT NULL,
    complaint_text TEXT NOT NULL,
    category TEXT NOT NULL,
    priority TEXT NOT NULL,
    department TEXT NOT NULL,
    sentiment_label TEXT NOT NULL,
    sentiment_compound REAL NOT NULL,
    sentiment_positive REAL NOT NULL,
    sentiment_negative REAL NOT NULL,
    sentiment_neutral REAL NOT NULL,
    keywords TEXT NOT NULL,
    resolution_estimate TEXT NOT NULL,
    submitted_at TEXT NOT NULL,
    status TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_complaints_priority ON complaints(priority);
CREATE INDEX IF NOT EXISTS idx_complaints_submitted_at ON complaints(submitted_at);
"#;

pub struct ComplaintStore {
    conn: Connection,
}

impl ComplaintStore {
    /// Open (creating if needed) the store at `path`.
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(SCHEMA_SQL)?;
        info!("Complaint store opened at {}", path.display());
        Ok(Self { conn })
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self { conn })
    }

    /// Persist one assembled record.
    pub fn add(&self, record: &DecisionRecord) -> Result<()> {
        let keywords = serde_json::to_string(&record.keywords)?;
        self.conn.execute(
            "INSERT INTO complaints (
                ticket_id, citizen_name, citizen_email, complaint_text,
                category, priority, department,
                sentiment_label, sentiment_compound, sentiment_positive,
                sentiment_negative, sentiment_neutral,
                keywords, resolution_estimate, submitted_at, status
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
            params![
                record.ticket_id,
                record.citizen_name,
                record.citizen_email,
                record.complaint_text,
                record.category.label(),
                record.priority.as_str(),
                record.department,
                record.sentiment.label.as_str(),
                record.sentiment.compound,
                record.sentiment.positive,
                record.sentiment.negative,
                record.sentiment.neutral,
                keywords,
                record.resolution_estimate,
                record.submitted_at,
                record.status,
            ],
        )?;
        Ok(())
    }

    /// Look up one record by ticket id.
    pub fn get_by_id(&self, ticket_id: &str) -> Result<Option<DecisionRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM complaints WHERE ticket_id = ?1")?;
        let mut rows = stmt.query_map(params![ticket_id], row_to_record)?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    /// All records, newest first.
    pub fn get_all(&self) -> Result<Vec<DecisionRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM complaints ORDER BY submitted_at DESC")?;
        let rows = stmt.query_map([], row_to_record)?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Number of stored complaints.
    pub fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM complaints", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<DecisionRecord> {
    let category: String = row.get("category")?;
    let priority: String = row.get("priority")?;
    let sentiment_label: String = row.get("sentiment_label")?;
    let keywords_json: String = row.get("keywords")?;
    let submitted_at: DateTime<Utc> = row.get("submitted_at")?;

    Ok(DecisionRecord {
        ticket_id: row.get("ticket_id")?,
        citizen_name: row.get("citizen_name")?,
        citizen_email: row.get("citizen_email")?,
        complaint_text: row.get("complaint_text")?,
        category: Category::from_label(&category),
        priority: PriorityLevel::parse(&priority).unwrap_or_default(),
        department: row.get("department")?,
        sentiment: SentimentResult {
            label: SentimentLabel::parse(&sentiment_label).unwrap_or_default(),
            compound: row.get("sentiment_compound")?,
            positive: row.get("sentiment_positive")?,
            negative: row.get("sentiment_negative")?,
            neutral: row.get("sentiment_neutral")?,
        },
        keywords: serde_json::from_str(&keywords_json).unwrap_or_default(),
        resolution_estimate: row.get("resolution_estimate")?,
        submitted_at,
        status: row.get("status")?,
    })
}
