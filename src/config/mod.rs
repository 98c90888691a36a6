//! Key-value configuration storage backed by SQLite.
//!
//! Shares a database with [`SqliteStore`](crate::store::SqliteStore), so pass
//! the same path to both. Per-source overrides live under
//! `source.<name>.enabled` and `source.<name>.url`.

use anyhow::{Context, Result, bail};
use rusqlite::Connection;
use std::sync::Mutex;

use crate::sources::SourceEntry;

/// Persistent key-value configuration store.
pub struct Config {
    conn: Mutex<Connection>,
}

fn enabled_key(name: &str) -> String {
    format!("source.{name}.enabled")
}

fn url_key(name: &str) -> String {
    format!("source.{name}.url")
}

impl Config {
    /// Open or create the config table in the given database.
    /// Use `":memory:"` for tests.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path).context("failed to open config database")?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS config (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )
        .context("failed to create config table")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Get a config value by key.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT value FROM config WHERE key = ?1")?;
        let mut rows = stmt.query([key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    /// Set a config value (upsert).
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO config (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }

    /// Remove a config key.
    pub fn remove(&self, key: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM config WHERE key = ?1", [key])?;
        Ok(())
    }

    /// Stored on/off override for a source, if any.
    pub fn source_enabled(&self, name: &str) -> Result<Option<bool>> {
        match self.get(&enabled_key(name))?.as_deref() {
            None => Ok(None),
            Some("true") => Ok(Some(true)),
            Some("false") => Ok(Some(false)),
            Some(other) => bail!("bad value {other:?} for {}", enabled_key(name)),
        }
    }

    pub fn set_source_enabled(&self, name: &str, enabled: bool) -> Result<()> {
        self.set(&enabled_key(name), if enabled { "true" } else { "false" })
    }

    /// Stored section-front override for a source, if any.
    pub fn source_url(&self, name: &str) -> Result<Option<String>> {
        self.get(&url_key(name))
    }

    pub fn set_source_url(&self, name: &str, url: &str) -> Result<()> {
        url::Url::parse(url).with_context(|| format!("invalid URL {url:?}"))?;
        self.set(&url_key(name), url)
    }

    /// The default source list with stored overrides applied.
    pub fn entries(&self, defaults: Vec<SourceEntry>) -> Result<Vec<SourceEntry>> {
        defaults
            .into_iter()
            .map(|mut entry| {
                if let Some(enabled) = self.source_enabled(&entry.name)? {
                    entry.enabled = enabled;
                }
                if let Some(url) = self.source_url(&entry.name)? {
                    entry.url = url;
                }
                Ok(entry)
            })
            .collect()
    }
}
