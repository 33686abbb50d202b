// Replay module for analyzing logged turns and debugging decision-making
//
// This module provides functionality to:
// 1. Parse JSONL turn logs written by the debug logger
// 2. Replay the configured strategy on the logged states
// 3. Compare logged vs replayed moves
// 4. Generate summary reports

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::bot::Bot;
use crate::config::Config;
use crate::types::{Direction, GameState};

/// Represents a single entry from the JSONL turn log
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogEntry {
    pub sequence: usize,
    #[serde(default)]
    pub turn: Option<u32>,
    pub chosen_move: Direction,
    #[serde(default)]
    pub fallback: bool,
    pub state: GameState,
    pub timestamp: String,
}

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub sequence: usize,
    pub original_move: Direction,
    pub replayed_move: Direction,
    pub matches: bool,
    pub computation_time_us: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing turn logs
pub struct ReplayEngine {
    bot: Bot,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine {
            bot: Bot::new(config),
            verbose,
        }
    }

    /// Loads all log entries from a JSONL file, ordered by sequence number
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, String> {
        let file =
            File::open(log_path.as_ref()).map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        // Writes are asynchronous, so file order may differ from answer order
        entries.sort_by_key(|e| e.sequence);

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Replays the strategy on a single logged state
    pub fn replay_turn(&self, state: &GameState) -> Result<(Direction, u128), String> {
        let start_time = Instant::now();
        let direction = self.bot.decide(state).map_err(|e| e.to_string())?;
        Ok((direction, start_time.elapsed().as_micros()))
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &LogEntry) -> Result<ReplayResult, String> {
        if self.verbose {
            info!("Replaying answer #{}...", entry.sequence);
        }

        let (replayed_move, computation_time) = self.replay_turn(&entry.state)?;
        let matches = entry.chosen_move == replayed_move;

        if self.verbose {
            if matches {
                info!(
                    "#{}: ✓ MATCH - {} ({}us)",
                    entry.sequence, replayed_move, computation_time
                );
            } else {
                warn!(
                    "#{}: ✗ MISMATCH - Original: {}, Replayed: {} ({}us)",
                    entry.sequence, entry.chosen_move, replayed_move, computation_time
                );
            }
        }

        Ok(ReplayResult {
            sequence: entry.sequence,
            original_move: entry.chosen_move,
            replayed_move,
            matches,
            computation_time_us: computation_time,
        })
    }

    /// Replays all entries; entries that were answered with the fallback move are skipped
    pub fn replay_all(&self, entries: &[LogEntry]) -> Vec<ReplayResult> {
        let mut results = Vec::new();

        for entry in entries.iter().filter(|e| !e.fallback) {
            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay #{}: {}", entry.sequence, e);
                }
            }
        }

        results
    }

    /// Replays specific entries by sequence number
    pub fn replay_sequences(
        &self,
        entries: &[LogEntry],
        sequences: &[usize],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for seq in sequences {
            let entry = entries
                .iter()
                .find(|e| e.sequence == *seq)
                .ok_or_else(|| format!("Entry #{} not found in log file", seq))?;

            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay #{}: {}", seq, e);
                }
            }
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total_turns - matches;
        let match_rate = if total_turns > 0 {
            (matches as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            matches,
            mismatches,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Strategy:       {}", self.bot.strategy_name());
        println!("Total Turns:    {}", stats.total_turns);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_us as f64)
                .sum::<f64>()
                / results.len() as f64;
            println!("Average Computation Time:   {:.1}us\n", avg_time);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "#{}: {} → {} ({}us)",
                    result.sequence,
                    result.original_move,
                    result.replayed_move,
                    result.computation_time_us
                );
            }
            println!();
        }
    }

    /// Validates that specific expected moves were logged
    pub fn validate_expected_moves(
        &self,
        entries: &[LogEntry],
        expected_moves: &[(usize, Vec<Direction>)], // (sequence, acceptable_moves)
    ) -> Result<(), String> {
        for (seq, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.sequence == *seq)
                .ok_or_else(|| format!("Entry #{} not found in log", seq))?;

            if !acceptable.contains(&entry.chosen_move) {
                return Err(format!(
                    "#{}: Expected one of {:?}, but got {}",
                    seq,
                    acceptable.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    entry.chosen_move
                ));
            }
        }

        Ok(())
    }
}
