//! Descriptions of the game for agents: the tool schemas in the OpenAI
//! function-calling format, and the rules.

use serde_json::{json, Value};

use crate::action::*;
use crate::shortcuts;

fn square_param(description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "square": { "type": "integer", "description": description }
        },
        "required": ["square"],
    })
}

fn text_param(name: &str, description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            name: { "type": "string", "description": description }
        },
        "required": [name],
    })
}

fn no_params() -> Value {
    json!({ "type": "object", "properties": {}, "required": [] })
}

fn tool_description(name: &str) -> (&'static str, Value) {
    match name {
        SPIN_SPINNER => (
            "Spin the spinner to get a value 1-6. Must be called once at the start of your turn.",
            no_params(),
        ),
        MOVE_PAWN_TO_SQUARE => (
            "Move your pawn to the target square (current position + spin value). \
             If the spin would take you past 100 you stay put: pass your current square.",
            square_param("The square to move to."),
        ),
        ASCEND_LADDER_TO_SQUARE => (
            "Take a ladder from your current square to its destination. \
             Only valid when you just landed on a ladder base.",
            square_param("The destination square at the top of the ladder."),
        ),
        DESCEND_CHUTE_TO_SQUARE => (
            "Slide down a chute from your current square to its destination. \
             Only valid when you just landed on a chute top.",
            square_param("The destination square at the bottom of the chute."),
        ),
        END_TURN => ("Signal that your turn is over.", no_params()),
        SEND_MESSAGE => (
            "Send a chat message to your opponent.",
            text_param("message", "The message to send."),
        ),
        FORFEIT => ("Forfeit the game (automatic loss).", no_params()),
        OFFER_DRAW => ("Offer a draw to your opponent.", no_params()),
        ACCEPT_DRAW => ("Accept an offered draw.", no_params()),
        _ => (
            "Think step-by-step about your next actions. This tool has no side effects.",
            text_param("thought", "Your internal reasoning or plan for this turn."),
        ),
    }
}

/// The schemas of all tools, in the order of [`TOOL_NAMES`].
pub fn tool_schemas() -> Vec<Value> {
    TOOL_NAMES
        .iter()
        .map(|&name| {
            let (description, parameters) = tool_description(name);
            json!({
                "type": "function",
                "function": {
                    "name": name,
                    "description": description,
                    "parameters": parameters,
                }
            })
        })
        .collect()
}

/// The rules of the game, including the map of chutes and ladders.
pub fn rules_text() -> String {
    let mut table: Vec<String> = shortcuts()
        .map(|s| (s.from, format!("  {} -> {}", s.from, s.to)))
        .collect::<std::collections::BTreeMap<_, _>>()
        .into_values()
        .collect();
    table.insert(0, String::from("Chutes & Ladders map:"));

    format!(
        "You are playing Chutes & Ladders on a 10x10 board (squares 1-100).

Rules:
- Spinner gives 1-6.
- Your first spin puts you on that square number.
- You must land EXACTLY on 100 to win. If the spin would take you past 100, you stay put.
- No extra turn for spinning 6.
- If you land on a chute/ladder base, you MUST take it.
- An illegal move is an automatic loss.

{}

Turn sequence:
1. Call {} to get your spin value.
2. Call {} with (your current square + spin value).
   - If the spin overshoots 100, pass your current square (you stay put).
3. If you landed on a ladder base, call {} with the destination.
   If you landed on a chute top, call {} with the destination.
4. Call {}.

You may also call {}, {}, {} or {} at any time.
You may call {} at any time to think step-by-step before acting. It has no side effects.
",
        table.join("\n"),
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
    )
}
