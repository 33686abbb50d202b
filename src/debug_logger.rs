// Debug logging module for asynchronous turn logging
//
// Fire-and-forget writes so the protocol loop never waits on disk.
// Each answered turn becomes one JSONL line that the replay tool can read back.

use log::error;
use serde::Serialize;
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tokio::task::JoinSet;

use crate::types::{Direction, GameState};

/// Represents a single debug log entry
#[derive(Debug, Serialize)]
struct DebugLogEntry {
    sequence: usize,
    turn: Option<u32>,
    chosen_move: Direction,
    fallback: bool,
    state: GameState,
    timestamp: String,
}

/// Shared debug logger state
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    pending: Arc<parking_lot::Mutex<JoinSet<()>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(file))),
                    pending: Arc::new(parking_lot::Mutex::new(JoinSet::new())),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            pending: Arc::new(parking_lot::Mutex::new(JoinSet::new())),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Logs an answered turn asynchronously (fire-and-forget)
    pub fn log_move(
        &self,
        sequence: usize,
        state: GameState,
        chosen_move: Direction,
        fallback: bool,
    ) {
        if !self.enabled {
            return;
        }

        let entry = DebugLogEntry {
            sequence,
            turn: state.turn,
            chosen_move,
            fallback,
            state,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        let file_handle = self.file.clone();

        let mut pending = self.pending.lock();
        // Reap finished writes so the set stays bounded over a long match
        while pending.try_join_next().is_some() {}
        pending.spawn(Self::log_move_internal(file_handle, entry));
    }

    /// Waits for every queued write; called once input is exhausted
    pub async fn finish(&self) {
        let mut tasks = std::mem::take(&mut *self.pending.lock());
        while tasks.join_next().await.is_some() {}
    }

    /// Internal async function that performs the actual file write
    async fn log_move_internal(file_handle: Arc<Mutex<Option<File>>>, entry: DebugLogEntry) {
        let mut file_guard = file_handle.lock().await;

        if let Some(file) = file_guard.as_mut() {
            match serde_json::to_string(&entry) {
                Ok(json_line) => {
                    let line_with_newline = format!("{}\n", json_line);
                    if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                        error!("Failed to write debug log entry: {}", e);
                    } else if let Err(e) = file.flush().await {
                        error!("Failed to flush debug log: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize debug log entry: {}", e);
                }
            }
        }
    }
}
