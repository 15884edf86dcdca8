//! Statistics aggregation over round history files.
//!
//! Reads JSONL round histories written by `play --history` (plain or
//! `.jsonl.zst`, a single file or a directory tree) and reports rounds,
//! wins, pushes, losses and net chips for the main wager.

use crate::error::CliError;
use crate::io_utils::read_text_auto;
use crate::ui;
use hilo_engine::logger::RoundRecord;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Default)]
struct StatsState {
    rounds: u64,
    wins: u64,
    pushes: u64,
    losses: u64,
    net: i64,
    doubled: u64,
    insured: u64,
    corrupted: u64,
}

impl StatsState {
    fn consume(&mut self, content: &str) {
        for line in content.lines().filter(|l| !l.trim().is_empty()) {
            let rec: RoundRecord = parse_json_or_continue!(line, self.corrupted);
            self.record(&rec);
        }
    }

    fn record(&mut self, rec: &RoundRecord) {
        self.rounds += 1;
        if rec.outcome.is_player_win() {
            self.wins += 1;
        } else if rec.outcome.is_push() {
            self.pushes += 1;
        } else {
            self.losses += 1;
        }
        self.net += rec.net();
        if rec.doubled_down {
            self.doubled += 1;
        }
        if rec.insurance_bet > 0 {
            self.insured += 1;
        }
    }
}

/// Aggregates statistics from JSONL round history files.
///
/// # Arguments
///
/// * `input` - Path to a JSONL file or a directory containing histories
/// * `out` - Output stream for the JSON summary
/// * `err` - Output stream for errors and warnings
///
/// # Returns
///
/// `Ok(())` when a summary was produced. Corrupt lines are skipped with a
/// warning; a single file with no readable record at all is an error.
pub fn handle_stats_command(
    input: String,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let path = Path::new(&input);
    let mut state = StatsState::default();

    if path.is_dir() {
        let mut stack = vec![path.to_path_buf()];
        while let Some(d) = stack.pop() {
            let rd = match std::fs::read_dir(&d) {
                Ok(v) => v,
                Err(_) => continue,
            };
            for e in rd.filter_map(Result::ok) {
                let p = e.path();
                if p.is_dir() {
                    stack.push(p);
                    continue;
                }
                let is_history = p
                    .file_name()
                    .and_then(|f| f.to_str())
                    .is_some_and(|f| f.ends_with(".jsonl") || f.ends_with(".jsonl.zst"));
                if is_history {
                    match read_text_auto(&p.to_string_lossy()) {
                        Ok(content) => state.consume(&content),
                        Err(e) => ui::display_warning(
                            err,
                            &format!("Failed to read {}: {}", p.display(), e),
                        )?,
                    }
                }
            }
        }
    } else {
        match read_text_auto(&input) {
            Ok(content) => state.consume(&content),
            Err(e) => {
                ui::write_error(err, &format!("Failed to read {}: {}", input, e))?;
                return Err(CliError::InvalidInput(format!(
                    "Failed to read {}: {}",
                    input, e
                )));
            }
        }
    }

    if state.corrupted > 0 {
        ui::display_warning(
            err,
            &format!("Skipped {} corrupted record(s)", state.corrupted),
        )?;
    }
    if !path.is_dir() && state.rounds == 0 && state.corrupted > 0 {
        ui::write_error(err, "Invalid record")?;
        return Err(CliError::InvalidInput("Invalid record".to_string()));
    }

    let summary = serde_json::json!({
        "rounds": state.rounds,
        "wins": state.wins,
        "pushes": state.pushes,
        "losses": state.losses,
        "net": state.net,
        "doubled": state.doubled,
        "insured": state.insured,
    });
    let json_output = serde_json::to_string_pretty(&summary)
        .map_err(|e| CliError::InvalidInput(format!("Failed to serialize stats: {}", e)))?;
    writeln!(out, "{}", json_output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hilo_engine::engine::RoundEngine;
    use hilo_engine::logger::format_round_id;

    /// Plays `n` rounds standing on every hand and returns their JSONL lines.
    fn history_lines(n: u32, seed: u64) -> (String, Vec<RoundRecord>) {
        let mut eng = RoundEngine::new(10_000, Some(seed)).unwrap();
        let mut text = String::new();
        let mut records = Vec::new();
        for i in 1..=n {
            eng.start_round(10).unwrap();
            if eng.round_in_progress() {
                eng.stand().unwrap();
            }
            let rec = eng.round_record(format_round_id("20250101", i)).unwrap();
            text.push_str(&serde_json::to_string(&rec).unwrap());
            text.push('\n');
            records.push(rec);
        }
        (text, records)
    }

    fn run(path: &Path) -> (Result<(), CliError>, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = handle_stats_command(path.to_string_lossy().into_owned(), &mut out, &mut err);
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_stats_empty_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let (result, out, _) = run(temp.path());
        assert!(result.is_ok());
        assert!(out.contains("\"rounds\": 0"));
    }

    #[test]
    fn test_stats_tallies_outcomes_and_net() {
        let (text, records) = history_lines(6, 17);
        let mut temp = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut temp, text.as_bytes()).unwrap();

        let (result, out, err) = run(temp.path());
        assert!(result.is_ok());
        assert!(err.is_empty());
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["rounds"], 6);
        let wins = records.iter().filter(|r| r.outcome.is_player_win()).count() as u64;
        let pushes = records.iter().filter(|r| r.outcome.is_push()).count() as u64;
        assert_eq!(json["wins"], wins);
        assert_eq!(json["pushes"], pushes);
        assert_eq!(json["losses"], 6 - wins - pushes);
        let net: i64 = records.iter().map(RoundRecord::net).sum();
        assert_eq!(json["net"], net);
    }

    #[test]
    fn test_stats_skips_corrupted_record() {
        let (text, _) = history_lines(2, 5);
        let mut lines: Vec<&str> = text.lines().collect();
        lines.insert(1, "{invalid json}");
        let mut temp = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut temp, lines.join("\n").as_bytes()).unwrap();

        let (result, out, err) = run(temp.path());
        assert!(result.is_ok());
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["rounds"], 2);
        assert!(err.contains("Skipped 1 corrupted record(s)"));
    }

    #[test]
    fn test_stats_all_corrupted_is_error() {
        let mut temp = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut temp, b"not json\n").unwrap();
        let (result, _, err) = run(temp.path());
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
        assert!(err.contains("Invalid record"));
    }

    #[test]
    fn test_stats_reads_zst_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        let (plain, _) = history_lines(3, 1);
        let (packed, _) = history_lines(2, 2);
        std::fs::write(dir.path().join("a.jsonl"), plain).unwrap();
        let nested = dir.path().join("older");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(
            nested.join("b.jsonl.zst"),
            zstd::bulk::compress(packed.as_bytes(), 3).unwrap(),
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let (result, out, _) = run(dir.path());
        assert!(result.is_ok());
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["rounds"], 5);
    }

    #[test]
    fn test_stats_nonexistent_file() {
        let (result, _, _) = run(Path::new("/nonexistent/path/to/file.jsonl"));
        assert!(result.is_err());
    }
}
