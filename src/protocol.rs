// Turn protocol over two byte streams
//
// One newline-terminated JSON record in, at most one `{"move":...}` line out, flushed
// before the next record is read. Blank lines and lines that are not JSON at all are
// skipped silently; anything that is JSON gets an answer, falling back to the default
// move when the record or the decision fails. Only end of input stops the loop.

use std::future::Future;
use std::time::Duration;

use log::{debug, info, warn};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::runtime::Runtime;

use crate::bot::Bot;
use crate::debug_logger::DebugLogger;
use crate::error::TurnError;
use crate::types::{Direction, GameState, MoveResponse};

/// What the loop does with one input record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Blank or non-JSON line: no response
    Skipped,
    /// The strategy produced the move
    Decided(Direction),
    /// The record or the decision failed; the fallback move is sent
    Fallback(Direction),
}

impl TurnOutcome {
    pub fn response(&self) -> Option<MoveResponse> {
        match self {
            TurnOutcome::Skipped => None,
            TurnOutcome::Decided(dir) | TurnOutcome::Fallback(dir) => Some(MoveResponse::new(*dir)),
        }
    }
}

/// Counters reported when the input stream closes
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub answered: usize,
    pub skipped: usize,
    pub fallbacks: usize,
}

/// How long shutdown waits for decisions abandoned after their budget ran out
pub const SHUTDOWN_GRACE: Duration = Duration::from_millis(100);

/// Parses one record and asks the bot for a move.
///
/// The parsed state is handed back only when `keep_state` is set (the turn log wants it).
pub async fn handle_record(
    bot: &Bot,
    record: &str,
    keep_state: bool,
) -> (TurnOutcome, Option<GameState>) {
    let record = record.trim();
    if record.is_empty() {
        return (TurnOutcome::Skipped, None);
    }

    debug!("Received: {}", record);

    let value: Value = match serde_json::from_str(record) {
        Ok(value) => value,
        Err(e) => {
            warn!("Skipping unparseable record: {}", e);
            return (TurnOutcome::Skipped, None);
        }
    };

    let state: GameState = match serde_json::from_value(value) {
        Ok(state) => state,
        Err(e) => return (fallback(bot, TurnError::from(e)), None),
    };

    let kept = keep_state.then(|| state.clone());
    match bot.get_move(state).await {
        Ok(dir) => (TurnOutcome::Decided(dir), kept),
        Err(e) => (fallback(bot, e), kept),
    }
}

fn fallback(bot: &Bot, error: TurnError) -> TurnOutcome {
    let dir = bot.fallback_move();
    warn!("Turn failed ({}), answering {}", error, dir);
    TurnOutcome::Fallback(dir)
}

/// Writes one response line and flushes it
pub async fn write_response<W>(writer: &mut W, response: &MoveResponse) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_string(response)?;
    line.push('\n');
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await
}

/// Runs the turn loop until `reader` reaches end of input.
///
/// Input bytes that are not valid UTF-8 are decoded lossily and then fail JSON parsing,
/// so they are skipped like any other garbage line. I/O errors on either stream end the loop.
pub async fn run<R, W>(
    bot: &Bot,
    reader: R,
    writer: &mut W,
    turn_log: &DebugLogger,
) -> std::io::Result<SessionStats>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = reader;
    let mut stats = SessionStats::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let record = String::from_utf8_lossy(&buf);
        let (outcome, state) = handle_record(bot, &record, turn_log.is_enabled()).await;

        let Some(response) = outcome.response() else {
            stats.skipped += 1;
            continue;
        };

        write_response(writer, &response).await?;
        stats.answered += 1;

        let is_fallback = matches!(outcome, TurnOutcome::Fallback(_));
        if is_fallback {
            stats.fallbacks += 1;
        }

        if let Some(state) = state {
            turn_log.log_move(stats.answered, state, response.direction, is_fallback);
        }
    }

    info!(
        "Input closed: {} turns answered, {} lines skipped, {} fallback moves",
        stats.answered, stats.skipped, stats.fallbacks
    );
    Ok(stats)
}

/// Runtime the agent runs on: one thread for the loop, the blocking pool for decisions
pub fn build_runtime() -> std::io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Drives `session` to completion, then shuts `runtime` down.
///
/// A decision that overran its budget is still running on the blocking pool. Dropping
/// the runtime would wait for it, so shutdown gives up after `SHUTDOWN_GRACE` instead.
pub fn run_session<F: Future>(runtime: Runtime, session: F) -> F::Output {
    let output = runtime.block_on(session);
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    output
}
