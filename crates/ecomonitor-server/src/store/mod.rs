// SPDX-License-Identifier: Apache-2.0

//! SQLite connection admission for the server.
//!
//! One read-write connection serializes like toggles; reads open their own
//! read-only connection under a bounded semaphore so they never queue behind
//! the writer.

mod adapter;

pub use adapter::SqliteNewsAdapter;

use crate::config::StoreConfig;
use ecomonitor_query::{apply_schema, QueryError};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Semaphore};
use tokio::time::timeout;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("schema error: {0}")]
    Schema(#[from] QueryError),
    #[error("store connection not admitted within {0:?}")]
    OpenTimeout(Duration),
    #[error("store is shutting down")]
    Closed,
    #[error("blocking store task failed: {0}")]
    Join(String),
}

pub struct NewsStore {
    cfg: StoreConfig,
    writer: Arc<Mutex<Connection>>,
    read_permits: Arc<Semaphore>,
}

fn open_writer(path: &Path, busy_timeout: Duration) -> Result<Connection, StoreError> {
    let conn = Connection::open(path)?;
    conn.busy_timeout(busy_timeout)?;
    let mode: String = conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
    conn.pragma_update(None, "foreign_keys", true)?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    apply_schema(&conn)?;
    debug!(journal_mode = %mode, "writer connection opened");
    Ok(conn)
}

fn open_reader(path: &Path, busy_timeout: Duration) -> Result<Connection, StoreError> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    conn.busy_timeout(busy_timeout)?;
    conn.set_prepared_statement_cache_capacity(64);
    conn.execute_batch("PRAGMA query_only=ON; PRAGMA temp_store=MEMORY;")?;
    Ok(conn)
}

impl NewsStore {
    /// Opens the writer connection, switches the file to WAL and applies the
    /// schema. Blocking; call it off the async runtime.
    pub fn open(cfg: StoreConfig) -> Result<Self, StoreError> {
        let writer = open_writer(&cfg.db_path, cfg.busy_timeout)?;
        info!(
            db_path = %cfg.db_path.display(),
            max_connections = cfg.max_connections,
            "news store opened"
        );
        let read_permits = Arc::new(Semaphore::new(cfg.max_connections.max(1)));
        Ok(Self {
            cfg,
            writer: Arc::new(Mutex::new(writer)),
            read_permits,
        })
    }

    #[must_use]
    pub fn available_read_permits(&self) -> usize {
        self.read_permits.available_permits()
    }

    /// Runs `op` on a fresh read-only connection on the blocking pool.
    ///
    /// Admission (permit plus open) is bounded by the configured open
    /// timeout; `op` itself is not.
    pub async fn read<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Connection) -> T + Send + 'static,
        T: Send + 'static,
    {
        let open_timeout = self.cfg.open_timeout;
        let permit = timeout(open_timeout, Arc::clone(&self.read_permits).acquire_owned())
            .await
            .map_err(|_| StoreError::OpenTimeout(open_timeout))?
            .map_err(|_| StoreError::Closed)?;

        let path = self.cfg.db_path.clone();
        let busy_timeout = self.cfg.busy_timeout;
        let opened = timeout(
            open_timeout,
            tokio::task::spawn_blocking(move || open_reader(&path, busy_timeout)),
        )
        .await;
        let mut conn = match opened {
            Ok(Ok(conn)) => conn?,
            Ok(Err(join)) => return Err(StoreError::Join(join.to_string())),
            Err(_) => return Err(StoreError::OpenTimeout(open_timeout)),
        };

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            op(&mut conn)
        })
        .await
        .map_err(|e| StoreError::Join(e.to_string()))
    }

    /// Runs `op` on the single read-write connection on the blocking pool.
    ///
    /// Only the wait for the writer is bounded (open timeout here, SQLite's
    /// busy timeout inside `op`). Once `op` starts, this waits for it to
    /// finish so the caller always learns whether it committed.
    pub async fn write<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Connection) -> T + Send + 'static,
        T: Send + 'static,
    {
        let open_timeout = self.cfg.open_timeout;
        let mut guard = timeout(open_timeout, Arc::clone(&self.writer).lock_owned())
            .await
            .map_err(|_| StoreError::OpenTimeout(open_timeout))?;
        tokio::task::spawn_blocking(move || op(&mut *guard))
            .await
            .map_err(|e| StoreError::Join(e.to_string()))
    }

    /// Stops admitting new readers. In-flight operations finish normally.
    pub fn close(&self) {
        self.read_permits.close();
    }
}
