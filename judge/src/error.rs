#[derive(Debug)]
/// Error type for talking to a bot process.
pub enum ProtocolError {
    MissingPipe { player: String, pipe: &'static str },
    BotExited { player: String },
    UnexpectedResponse { player: String, response: String },
}

impl std::error::Error for ProtocolError {}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolError::MissingPipe { player, pipe } => {
                write!(f, "Could not access {} of player {}", pipe, player)
            }
            ProtocolError::BotExited { player } => {
                write!(f, "Player {} closed its output before responding", player)
            }
            ProtocolError::UnexpectedResponse { player, response } => write!(
                f,
                "Player {} sent a response that doesn't fit the request: {}",
                player, response
            ),
        }
    }
}
