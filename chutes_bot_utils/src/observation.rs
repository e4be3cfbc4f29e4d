use chutes::Square;

/// What the judge tells a bot at the start of each of its turns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnStart {
    /// `0` if the bot's pawn is not on the board yet.
    pub my_position: Square,
    pub opponent_position: Square,
    pub draw_offered: bool,
    /// Chat messages from the opponent's last turn.
    pub opponent_messages: Vec<String>,
}

const MESSAGE_PREFIX: &str = " Your opponent says: \"";

/// Parses a turn-start observation. Returns `None` for any other message.
pub fn parse_turn_start(observation: &str) -> Option<TurnStart> {
    let rest = observation.strip_prefix("Your turn. ")?;
    let (my_position, rest) = match rest.strip_prefix("You are not yet on the board. ") {
        Some(rest) => (0, rest),
        None => {
            let rest = rest.strip_prefix("You are on square ")?;
            let (square, rest) = rest.split_once(". ")?;
            (square.parse().ok()?, rest)
        }
    };
    let rest = rest.strip_prefix("Opponent is on square ")?;
    let (opponent_position, mut rest) = rest.split_once('.')?;
    let opponent_position = opponent_position.parse().ok()?;

    let mut draw_offered = false;
    if let Some(after) = rest.strip_prefix(" Your opponent has offered a draw.") {
        draw_offered = true;
        rest = after;
    }

    // Messages may contain quotes themselves, so split on the prefix only
    let mut opponent_messages = Vec::new();
    if let Some(all) = rest.strip_prefix(MESSAGE_PREFIX) {
        for message in all.split(MESSAGE_PREFIX) {
            let message = message.strip_suffix('"').unwrap_or(message);
            opponent_messages.push(String::from(message));
        }
    }

    Some(TurnStart {
        my_position,
        opponent_position,
        draw_offered,
        opponent_messages,
    })
}

/// Parses the reply to a spin, like `"You spun a 4."`.
pub fn parse_spin(message: &str) -> Option<u8> {
    message
        .strip_prefix("You spun a ")?
        .strip_suffix('.')?
        .parse()
        .ok()
}
