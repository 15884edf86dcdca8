use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::events::GameEvent;
use crate::game::Outcome;

/// Complete record of one settled round.
/// Serialized to JSONL for session history and the `stats` report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Unique identifier for this round (format: YYYYMMDD-NNNNNN)
    pub round_id: String,
    /// Shuffle seed of the session's shoe, when known
    pub seed: Option<u64>,
    /// Final main wager (already doubled after a double down)
    pub bet: u32,
    pub insurance_bet: u32,
    pub doubled_down: bool,
    pub player_hand: Vec<Card>,
    pub dealer_hand: Vec<Card>,
    pub player_total: u8,
    pub dealer_total: u8,
    pub outcome: Outcome,
    /// Chips returned for the main wager (insurance payouts excluded)
    pub payout: u32,
    pub chips_after: u32,
    /// Running count once every card of the round was revealed
    pub running_count: i32,
    /// Timestamp when the round was recorded (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
    #[serde(default)]
    pub events: Vec<GameEvent>,
}

impl RoundRecord {
    /// Chip change caused by the round's main wager.
    pub fn net(&self) -> i64 {
        i64::from(self.payout) - i64::from(self.bet)
    }
}

pub fn format_round_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends [`RoundRecord`]s to a JSON Lines file, one per line with LF endings.
pub struct RoundLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl RoundLogger {
    /// Opens `path` for appending, creating it and its parent directory if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_round_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
