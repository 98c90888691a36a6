use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::{Connection, params};
use std::collections::HashSet;
use std::sync::Mutex;

use super::ArticleStore;
use crate::article::Article;

/// SQLite-backed article store.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path).context("failed to open article database")?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS articles (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                key TEXT NOT NULL UNIQUE,
                source TEXT NOT NULL,
                stored_at TEXT NOT NULL DEFAULT (datetime('now')),
                article TEXT NOT NULL
            );",
        )
        .context("failed to create articles table")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn in_memory() -> Result<Self> {
        Self::new(":memory:")
    }
}

fn decode(jsons: Vec<String>) -> Result<Vec<Article>> {
    jsons
        .iter()
        .map(|json| serde_json::from_str(json).context("corrupt article row"))
        .collect()
}

#[async_trait]
impl ArticleStore for SqliteStore {
    async fn store(&self, articles: &[Article]) -> Result<usize> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        let mut keys = HashSet::new();
        // A re-scraped article moves to the end of the history.
        for article in articles {
            let key = article.key();
            let json = serde_json::to_string(article)?;
            tx.execute("DELETE FROM articles WHERE key = ?1", [&key])?;
            tx.execute(
                "INSERT INTO articles (key, source, article) VALUES (?1, ?2, ?3)",
                params![&key, article.source, json],
            )?;
            keys.insert(key);
        }
        tx.commit()?;
        Ok(keys.len())
    }

    async fn history(&self, limit: usize) -> Result<Vec<Article>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT article FROM (
                SELECT article, id FROM articles ORDER BY id DESC LIMIT ?1
            ) ORDER BY id ASC",
        )?;
        let jsons = stmt
            .query_map([i64::try_from(limit).unwrap_or(i64::MAX)], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        decode(jsons)
    }

    async fn recall(&self, query: &str) -> Result<Vec<Article>> {
        // Literal, case-insensitive substring over the text fields only.
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT article FROM articles
             WHERE instr(lower(json_extract(article, '$.title')), lower(?1)) > 0
                OR instr(lower(json_extract(article, '$.subtitle')), lower(?1)) > 0
                OR instr(lower(json_extract(article, '$.author')), lower(?1)) > 0
                OR EXISTS (
                    SELECT 1 FROM json_each(article, '$.content')
                    WHERE instr(lower(value), lower(?1)) > 0
                )
             ORDER BY id ASC",
        )?;
        let jsons = stmt
            .query_map([query], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        decode(jsons)
    }

    async fn count(&self) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM articles", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    async fn clear(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM articles", [])?;
        Ok(())
    }
}
