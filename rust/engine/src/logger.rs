use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::rules::Outcome;
use crate::strategy::{Tally, Verdict};

/// One graded player decision within a round.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// Player total before the action was applied
    pub player_score: u32,
    /// Whether that total was soft
    pub soft: bool,
    pub dealer_up: Card,
    #[serde(flatten)]
    pub verdict: Verdict,
}

/// Complete history of one round, written as a single JSONL line.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Unique identifier for this round (format: YYYYMMDD-NNNNNN)
    pub round_id: String,
    /// Seed of the shoe's RNG, when the game was seeded
    pub seed: Option<u64>,
    /// Graded decisions in the order they were made
    pub decisions: Vec<DecisionRecord>,
    pub player_hand: Vec<Card>,
    /// Full dealer hand, hole card included
    pub dealer_hand: Vec<Card>,
    pub player_score: u32,
    pub dealer_score: u32,
    /// `None` when the round was abandoned before it resolved
    pub outcome: Option<Outcome>,
    /// Game-wide tally after this round
    pub tally: Tally,
    /// Timestamp when the round was written (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

pub fn format_round_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends [`RoundRecord`]s to a JSONL file and hands out round ids.
pub struct RoundLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl RoundLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// Logger that only numbers rounds, for callers without an output file.
    pub fn detached(date: &str) -> Self {
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
