use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use anyhow::Context;
use chutes::{Action, Okay, PlayerIdx, Request, ToolCall};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::error::ProtocolError;

/// Anything that can take part in a game.
///
/// Errors are reserved for failures of the player itself, such as a crashed
/// bot process. They abort the game. Bad actions are not errors, they are
/// judged by the game runner.
pub trait Player {
    fn name(&self) -> &str;

    /// Called once before the first turn of every game.
    fn new_game(&mut self, _player_idx: PlayerIdx) -> anyhow::Result<()> {
        Ok(())
    }

    /// Asks for the next action, given the latest observation.
    fn next_action(&mut self, observation: &str) -> anyhow::Result<ToolCall>;

    /// Reports the result of the player's last action, if it didn't end the turn.
    fn observe(&mut self, message: &str) -> anyhow::Result<()>;
}

/// How to launch a bot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Short name shown in results.
    pub nick: String,
    /// The bot executable.
    pub cmd: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl PlayerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read player config '{}'", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid player config '{}'", path.display()))?;
        Ok(config)
    }
}

/// A bot running in a child process, speaking line-delimited JSON over
/// stdin/stdout.
pub struct ProcessPlayer {
    pub name: String,
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    // A re-usable buffer for IO.
    // Should always be empty before and after perform_request().
    buf: String,
}

impl ProcessPlayer {
    pub fn new(name: &str, executable_path: &str, args: &[String]) -> anyhow::Result<Self> {
        let mut child = Command::new(executable_path)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .with_context(|| format!("Could not start '{}'", executable_path))?;

        let missing_pipe = |pipe| ProtocolError::MissingPipe {
            player: String::from(name),
            pipe,
        };
        let stdin = child.stdin.take().ok_or_else(|| missing_pipe("stdin"))?;
        let stdout = child.stdout.take().ok_or_else(|| missing_pipe("stdout"))?;

        Ok(Self {
            name: String::from(name),
            child,
            stdin,
            stdout: BufReader::new(stdout),
            buf: String::new(),
        })
    }

    pub fn from_config(config: &PlayerConfig) -> anyhow::Result<Self> {
        Self::new(&config.nick, &config.cmd, &config.args)
    }

    fn send(&mut self, req: &Request) -> anyhow::Result<()> {
        let mut req_json = serde_json::to_string(req)?;
        trace!(name: "Sending request", player = %self.name, request = %req_json);
        req_json.push('\n');
        self.stdin.write_all(req_json.as_bytes())?;
        self.stdin.flush()?;
        Ok(())
    }

    fn perform_request<T: serde::de::DeserializeOwned>(
        &mut self,
        req: &Request,
    ) -> anyhow::Result<T> {
        self.send(req)?;
        self.buf.clear();
        let num_bytes_read = self.stdout.read_line(&mut self.buf)?;
        if num_bytes_read == 0 {
            return Err(ProtocolError::BotExited {
                player: self.name.clone(),
            }
            .into());
        }
        let serialized_response = self.buf.trim_end();
        trace!(name: "Received response", player = %self.name, response = %serialized_response);
        let response = serde_json::from_str::<T>(serialized_response).map_err(|_| {
            ProtocolError::UnexpectedResponse {
                player: self.name.clone(),
                response: String::from(serialized_response),
            }
        });
        self.buf.clear();
        Ok(response?)
    }
}

impl Player for ProcessPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn new_game(&mut self, player_idx: PlayerIdx) -> anyhow::Result<()> {
        let _: Okay = self.perform_request(&Request::NewGame { player_idx })?;
        Ok(())
    }

    fn next_action(&mut self, observation: &str) -> anyhow::Result<ToolCall> {
        self.perform_request(&Request::NextAction {
            observation: String::from(observation),
        })
    }

    fn observe(&mut self, message: &str) -> anyhow::Result<()> {
        let _: Okay = self.perform_request(&Request::Observe {
            message: String::from(message),
        })?;
        Ok(())
    }
}

impl Drop for ProcessPlayer {
    fn drop(&mut self) {
        if let Err(err) = self.send(&Request::Bye) {
            warn!(player = %self.name, "Could not say goodbye: {}", err);
        }
        if let Err(err) = self.child.wait() {
            warn!(player = %self.name, "Could not wait for bot to exit: {}", err);
        }
    }
}

/// Plays a fixed list of actions, then forfeits. Useful for tests and replays.
#[derive(Clone, Debug)]
pub struct ScriptedPlayer {
    name: String,
    script: VecDeque<ToolCall>,
    /// Every observation and message this player received, in order.
    pub seen: Vec<String>,
}

impl ScriptedPlayer {
    pub fn new(name: &str, script: impl IntoIterator<Item = ToolCall>) -> Self {
        Self {
            name: String::from(name),
            script: script.into_iter().collect(),
            seen: Vec::new(),
        }
    }

    pub fn from_actions<'a>(name: &str, actions: impl IntoIterator<Item = &'a Action>) -> Self {
        Self::new(name, actions.into_iter().map(Action::tool_call))
    }

    /// The number of scripted actions not yet played.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Player for ScriptedPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_action(&mut self, observation: &str) -> anyhow::Result<ToolCall> {
        self.seen.push(String::from(observation));
        Ok(self
            .script
            .pop_front()
            .unwrap_or_else(|| Action::Forfeit.tool_call()))
    }

    fn observe(&mut self, message: &str) -> anyhow::Result<()> {
        self.seen.push(String::from(message));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_without_args() {
        let config: PlayerConfig =
            serde_json::from_str(r#"{"nick": "direct", "cmd": "target/release/direct_bot"}"#)
                .unwrap();
        assert_eq!(config.nick, "direct");
        assert!(config.args.is_empty());
    }

    #[test]
    fn missing_config_file() {
        let err = PlayerConfig::load(Path::new("no/such/bot.json")).unwrap_err();
        assert!(err.to_string().contains("no/such/bot.json"));
    }

    #[test]
    fn scripted_player_forfeits_when_done() {
        let mut player = ScriptedPlayer::from_actions("s", &[Action::Spin]);
        assert_eq!(player.next_action("first").unwrap(), Action::Spin.tool_call());
        player.observe("You spun a 3.").unwrap();
        assert_eq!(player.remaining(), 0);
        assert_eq!(player.next_action("again").unwrap(), Action::Forfeit.tool_call());
        assert_eq!(player.seen, ["first", "You spun a 3.", "again"]);
    }

    #[test]
    fn missing_executable() {
        assert!(ProcessPlayer::new("ghost", "./no-such-bot-executable", &[]).is_err());
    }
}
