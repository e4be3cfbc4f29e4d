use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::PlayerIdx;

/// Request from the judge to a bot.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Request to reset the bot's state for a new game.
    ///
    /// The response should be an [`Okay`].
    NewGame {
        /// The bot's seat. Player 0 moves first.
        player_idx: PlayerIdx,
    },
    /// Request for the bot's next action.
    ///
    /// The response should be a [`ToolCall`].
    NextAction {
        /// At the start of a turn this describes both pawns. Within a turn it
        /// is the message produced by the bot's previous action.
        observation: String,
    },
    /// Informs the bot about the result of its last action.
    ///
    /// The response should be an [`Okay`].
    Observe { message: String },
    /// The bot should shut down. No response is expected.
    Bye,
}

/// Dummy struct for use in bot communication.
///
/// Used to signal an acknowledgement without data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Okay();

/// An action as sent by an agent: a tool name and its arguments.
///
/// This is deliberately untyped, since agents can and do send anything.
/// See [`Action::from_tool_call()`](crate::Action::from_tool_call) for the
/// typed version.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub tool: String,
    /// When empty, this can be omitted from the JSON serialization.
    #[serde(default)]
    pub args: Map<String, Value>,
}

impl ToolCall {
    pub fn new(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            args: Map::new(),
        }
    }

    pub fn with_arg(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.args.insert(String::from(name), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_call_json() {
        let call: ToolCall =
            serde_json::from_str(r#"{"tool": "move_pawn_to_square", "args": {"square": 5}}"#)
                .unwrap();
        assert_eq!(call, ToolCall::new("move_pawn_to_square").with_arg("square", 5));

        let call: ToolCall = serde_json::from_str(r#"{"tool": "end_turn"}"#).unwrap();
        assert!(call.args.is_empty());
    }

    #[test]
    fn request_is_tagged() {
        let json = serde_json::to_string(&Request::NextAction {
            observation: String::from("Your turn."),
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"NextAction","observation":"Your turn."}"#);
    }
}
