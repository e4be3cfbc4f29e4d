use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{IllegalAction, ToolCall};

pub const SPIN_SPINNER: &str = "spin_spinner";
pub const MOVE_PAWN_TO_SQUARE: &str = "move_pawn_to_square";
pub const ASCEND_LADDER_TO_SQUARE: &str = "ascend_ladder_to_square";
pub const DESCEND_CHUTE_TO_SQUARE: &str = "descend_chute_to_square";
pub const END_TURN: &str = "end_turn";
pub const SEND_MESSAGE: &str = "send_message";
pub const FORFEIT: &str = "forfeit";
pub const OFFER_DRAW: &str = "offer_draw";
pub const ACCEPT_DRAW: &str = "accept_draw";
pub const PLAN: &str = "plan";

/// All tool names an agent may call, in the order they are documented.
pub const TOOL_NAMES: [&str; 10] = [
    SPIN_SPINNER,
    MOVE_PAWN_TO_SQUARE,
    ASCEND_LADDER_TO_SQUARE,
    DESCEND_CHUTE_TO_SQUARE,
    END_TURN,
    SEND_MESSAGE,
    FORFEIT,
    OFFER_DRAW,
    ACCEPT_DRAW,
    PLAN,
];

/// A single action of a player.
///
/// Squares are kept as sent by the agent (possibly negative or way off the
/// board); the validator decides whether they make sense.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Spin,
    MoveTo { square: i64 },
    AscendLadder { square: i64 },
    DescendChute { square: i64 },
    EndTurn,
    SendMessage { message: String },
    Forfeit,
    OfferDraw,
    AcceptDraw,
    /// Agent-side reasoning, no effect on the game.
    Plan { thought: String },
}

/// Agents sometimes send `14.0` for `14`.
fn integral_float(value: &Value) -> Option<i64> {
    let float = value.as_f64()?;
    let in_range = float >= i64::MIN as f64 && float <= i64::MAX as f64;
    (float.fract() == 0.0 && in_range).then_some(float as i64)
}

fn square_arg(call: &ToolCall) -> Result<i64, IllegalAction> {
    match call.args.get("square") {
        None | Some(Value::Null) => Err(IllegalAction::MissingSquare),
        Some(value) => value
            .as_i64()
            .or_else(|| integral_float(value))
            .ok_or_else(|| IllegalAction::InvalidSquare {
                value: value.to_string(),
            }),
    }
}

fn text_arg(call: &ToolCall, name: &str) -> String {
    match call.args.get(name) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

impl Action {
    /// Interprets a raw tool call. Unknown tool names and unusable squares
    /// are illegal actions.
    pub fn from_tool_call(call: &ToolCall) -> Result<Self, IllegalAction> {
        let action = match call.tool.as_str() {
            SPIN_SPINNER => Action::Spin,
            MOVE_PAWN_TO_SQUARE => Action::MoveTo {
                square: square_arg(call)?,
            },
            ASCEND_LADDER_TO_SQUARE => Action::AscendLadder {
                square: square_arg(call)?,
            },
            DESCEND_CHUTE_TO_SQUARE => Action::DescendChute {
                square: square_arg(call)?,
            },
            END_TURN => Action::EndTurn,
            SEND_MESSAGE => Action::SendMessage {
                message: text_arg(call, "message"),
            },
            FORFEIT => Action::Forfeit,
            OFFER_DRAW => Action::OfferDraw,
            ACCEPT_DRAW => Action::AcceptDraw,
            PLAN => Action::Plan {
                thought: text_arg(call, "thought"),
            },
            name => {
                return Err(IllegalAction::UnknownTool {
                    name: String::from(name),
                })
            }
        };
        Ok(action)
    }

    pub fn tool_name(&self) -> &'static str {
        match self {
            Action::Spin => SPIN_SPINNER,
            Action::MoveTo { .. } => MOVE_PAWN_TO_SQUARE,
            Action::AscendLadder { .. } => ASCEND_LADDER_TO_SQUARE,
            Action::DescendChute { .. } => DESCEND_CHUTE_TO_SQUARE,
            Action::EndTurn => END_TURN,
            Action::SendMessage { .. } => SEND_MESSAGE,
            Action::Forfeit => FORFEIT,
            Action::OfferDraw => OFFER_DRAW,
            Action::AcceptDraw => ACCEPT_DRAW,
            Action::Plan { .. } => PLAN,
        }
    }

    pub fn tool_call(&self) -> ToolCall {
        let call = ToolCall::new(self.tool_name());
        match self {
            Action::MoveTo { square }
            | Action::AscendLadder { square }
            | Action::DescendChute { square } => call.with_arg("square", *square),
            Action::SendMessage { message } => call.with_arg("message", message.as_str()),
            Action::Plan { thought } => call.with_arg("thought", thought.as_str()),
            _ => call,
        }
    }
}

/// The outcome of validating one action.
///
/// At most one of `won`, `turn_over`, `forfeit` and `draw` is set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    /// `false` means the action broke the rules.
    pub ok: bool,
    /// What happened, or why the action was rejected.
    pub message: String,
    pub won: bool,
    pub turn_over: bool,
    pub forfeit: bool,
    pub draw: bool,
    /// The spin overshot the final square and the pawn stays put.
    pub bounced: bool,
    /// The pawn stands at the foot of a ladder and must climb it.
    pub requires_ladder: bool,
    /// The pawn stands at the top of a chute and must slide down.
    pub requires_chute: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub spin_value: Option<u8>,
}

impl ActionResult {
    pub fn legal(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn illegal(err: &IllegalAction) -> Self {
        Self {
            ok: false,
            message: err.to_string(),
            ..Self::default()
        }
    }

    /// Whether this result ends the game or the player's turn.
    pub fn is_terminal(&self) -> bool {
        !self.ok || self.won || self.turn_over || self.forfeit || self.draw
    }
}

impl From<IllegalAction> for ActionResult {
    fn from(err: IllegalAction) -> ActionResult {
        ActionResult::illegal(&err)
    }
}
