use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::elo::Outcome;
use crate::game::{GameResult, LogEntry, Reason};
use crate::summary::{summarize_turns, TurnSummary};

/// Everything worth keeping about a finished game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameRecording {
    pub players: [String; 2],
    pub winner: Option<String>,
    pub reason: Reason,
    pub turns: usize,
    pub summaries: Vec<TurnSummary>,
    pub log: Vec<LogEntry>,
}

impl GameRecording {
    pub fn new(players: [&str; 2], result: &GameResult) -> Self {
        Self {
            players: players.map(String::from),
            winner: result.winner.map(|idx| String::from(players[idx])),
            reason: result.reason,
            turns: result.turns,
            summaries: summarize_turns(&result.log, result.reason, result.turns),
            log: result.log.clone(),
        }
    }
}

/// One line of the outcomes file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    #[serde(flatten)]
    pub outcome: Outcome,
    pub reason: Reason,
    pub turns: usize,
}

impl OutcomeRecord {
    pub fn new(players: [&str; 2], result: &GameResult) -> Self {
        Self {
            outcome: Outcome {
                player_a: String::from(players[0]),
                player_b: String::from(players[1]),
                winner: result.winner.map(|idx| String::from(players[idx])),
            },
            reason: result.reason,
            turns: result.turns,
        }
    }
}

/// Writes numbered game files into a directory.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self { num: 1, directory })
    }

    /// Writes `game_000001.json`, `game_000002.json` and so on. Returns the
    /// path of the file that was written.
    pub fn write_game_recording(&mut self, recording: &GameRecording) -> anyhow::Result<PathBuf> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let mut writer = BufWriter::new(File::create(&filepath)?);
        serde_json::to_writer_pretty(&mut writer, recording)?;
        writer.flush()?;
        self.num += 1;
        Ok(filepath)
    }
}

/// Reads all records from an outcomes file. A missing file holds no records.
pub fn load_outcomes(path: &Path) -> anyhow::Result<Vec<OutcomeRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let reader = BufReader::new(File::open(path)?);
    let records = serde_json::from_reader(reader)
        .with_context(|| format!("Invalid outcomes file '{}'", path.display()))?;
    Ok(records)
}

/// Adds records to an outcomes file, creating it if needed. Returns the
/// total number of records in the file.
pub fn append_outcomes(path: &Path, records: &[OutcomeRecord]) -> anyhow::Result<usize> {
    let mut all = load_outcomes(path)?;
    all.extend_from_slice(records);
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &all)?;
    writer.flush()?;
    Ok(all.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("judge-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn result(winner: Option<usize>, reason: Reason) -> GameResult {
        GameResult {
            winner,
            reason,
            turns: 7,
            log: Vec::new(),
        }
    }

    #[test]
    fn missing_directory() {
        let dir = std::env::temp_dir().join("judge-does-not-exist-at-all");
        assert!(Recorder::new(dir).is_err());
    }

    #[test]
    fn numbered_recordings() {
        let dir = scratch_dir("recordings");
        let mut recorder = Recorder::new(dir.clone()).unwrap();
        let game = GameRecording::new(["a", "b"], &result(Some(1), Reason::Forfeit));
        let first = recorder.write_game_recording(&game).unwrap();
        let second = recorder.write_game_recording(&game).unwrap();
        assert_eq!(first, dir.join("game_000001.json"));
        assert_eq!(second, dir.join("game_000002.json"));

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(first).unwrap()).unwrap();
        assert_eq!(json["winner"], "b");
        assert_eq!(json["reason"], "forfeit");
        assert_eq!(json["players"][0], "a");
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn outcomes_accumulate() {
        let dir = scratch_dir("outcomes");
        let path = dir.join("outcomes.json");
        assert!(load_outcomes(&path).unwrap().is_empty());

        let win = OutcomeRecord::new(["a", "b"], &result(Some(0), Reason::Win));
        let draw = OutcomeRecord::new(["b", "a"], &result(None, Reason::MaxTurns));
        assert_eq!(append_outcomes(&path, &[win.clone()]).unwrap(), 1);
        assert_eq!(append_outcomes(&path, &[draw.clone()]).unwrap(), 2);
        assert_eq!(load_outcomes(&path).unwrap(), [win, draw]);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            json[1],
            serde_json::json!({
                "player_a": "b",
                "player_b": "a",
                "winner": null,
                "reason": "max_turns",
                "turns": 7,
            })
        );
        std::fs::remove_dir_all(dir).unwrap();
    }
}
