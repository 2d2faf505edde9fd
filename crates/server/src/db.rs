// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Database types for persisting played hands.
use anyhow::Result;
use log::error;
use parking_lot::Mutex;
use rusqlite::{Connection, params};
use std::{path::Path, sync::Arc};

use holdem_core::snapshot::HandSummary;

/// Records the summary of settled hands.
///
/// Recording must not block the caller, the table task calls this while
/// processing commands.
pub trait RoundRecorder: Send + Sync {
    /// Records a settled hand.
    fn record(&self, summary: HandSummary);
}

/// Database for persisting hand summaries.
#[derive(Debug, Clone)]
pub struct Db {
    db: Arc<Mutex<Connection>>,
}

impl Db {
    /// Open a database.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_connection(Connection::open(path)?)
    }

    /// Open an in memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        // Create tables
        conn.execute(
            "CREATE TABLE IF NOT EXISTS hands (
               id INTEGER PRIMARY KEY AUTOINCREMENT,
               played_at INTEGER NOT NULL,
               pot INTEGER NOT NULL,
               summary BLOB NOT NULL
            )",
            (),
        )?;

        Ok(Db {
            db: Arc::new(Mutex::new(conn)),
        })
    }

    /// Saves a hand summary.
    pub async fn save_hand(&self, summary: HandSummary) -> Result<()> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let buf = summary.to_bytes()?;
            let db = db.lock();
            db.execute(
                "INSERT INTO hands (played_at, pot, summary) VALUES (?1, ?2, ?3)",
                params![summary.played_at as i64, summary.pot.amount(), buf],
            )?;

            Ok(())
        })
        .await?
    }

    /// Loads the last `limit` hands, newest first.
    pub async fn load_hands(&self, limit: usize) -> Result<Vec<HandSummary>> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let db = db.lock();

            let mut stmt = db.prepare(
                "SELECT summary
                 FROM hands
                 ORDER BY id DESC
                 LIMIT ?1",
            )?;

            let rows = stmt.query_map(params![limit as i64], |row| row.get::<usize, Vec<u8>>(0))?;

            let mut hands = Vec::new();
            for buf in rows {
                hands.push(HandSummary::from_bytes(&buf?)?);
            }

            Ok(hands)
        })
        .await?
    }
}

impl RoundRecorder for Db {
    fn record(&self, summary: HandSummary) {
        let db = self.clone();
        tokio::spawn(async move {
            if let Err(e) = db.save_hand(summary).await {
                error!("Failed to save hand {e}");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_core::poker::{Chips, TableId};

    fn summary(played_at: u64, pot: u32) -> HandSummary {
        HandSummary {
            played_at,
            table_id: TableId::new_id(),
            dealer: Some(0),
            small_blind_pos: Some(0),
            big_blind_pos: Some(1),
            pot: Chips::new(pot),
            board: vec![],
            seats: vec![],
            winners: vec![],
        }
    }

    #[tokio::test]
    async fn save_and_load_hands() {
        let db = Db::open_in_memory().unwrap();
        assert!(db.load_hands(10).await.unwrap().is_empty());

        for idx in 0..5 {
            db.save_hand(summary(1_000 + idx, 100 + idx as u32))
                .await
                .unwrap();
        }

        let hands = db.load_hands(3).await.unwrap();
        let pots = hands.iter().map(|h| h.pot.amount()).collect::<Vec<_>>();
        assert_eq!(pots, vec![104, 103, 102]);
        assert_eq!(hands[0].played_at, 1_004);
        assert_eq!(hands[0].dealer, Some(0));
    }

    #[tokio::test]
    async fn recorder_saves_in_background() {
        let db = Db::open_in_memory().unwrap();
        db.record(summary(1, 30));

        // Give the recording task a chance to run.
        let mut hands = vec![];
        for _ in 0..100 {
            hands = db.load_hands(10).await.unwrap();
            if !hands.is_empty() {
                break;
            }

            tokio::task::yield_now().await;
        }

        assert_eq!(hands.len(), 1);
        assert_eq!(hands[0].pot, Chips::new(30));
    }
}
