use crate::Square;

#[derive(Debug, Clone, PartialEq, Eq)]
/// The reason an action was rejected.
///
/// Rejections are ordinary results, not failures of the referee: the player
/// who sent the action loses the game.
pub enum IllegalAction {
    UnknownTool { name: String },
    MissingSquare,
    InvalidSquare { value: String },
    AlreadySpun,
    NotSpun,
    AlreadyAtFinalSquare,
    MustStayPut { start: Square },
    MovedBackward { current: Square, target: i64 },
    PastLandingSquare { landing: Square, target: i64 },
    NoLadder,
    NoChute,
    WrongLadderDestination { expected: Square, got: i64 },
    WrongChuteDestination { expected: Square, got: i64 },
    EndedTurnWithoutMoving,
    EndedTurnEarly { current: Square },
    NoDrawOffered,
}

impl std::error::Error for IllegalAction {}

impl std::fmt::Display for IllegalAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalAction::UnknownTool { name } => write!(f, "Unknown tool: {}", name),
            IllegalAction::MissingSquare => write!(f, "Missing 'square' argument."),
            IllegalAction::InvalidSquare { value } => {
                write!(f, "The 'square' argument must be an integer, got {}.", value)
            }
            IllegalAction::AlreadySpun => write!(f, "Already spun this turn."),
            IllegalAction::NotSpun => write!(f, "You must spin first."),
            IllegalAction::AlreadyAtFinalSquare => write!(f, "Already at final position."),
            IllegalAction::MustStayPut { start } => {
                write!(f, "Spin overshoots 100. You must stay on {}.", start)
            }
            IllegalAction::MovedBackward { current, target } => write!(
                f,
                "Can't move backward. Current position is {}, tried {}.",
                current, target
            ),
            IllegalAction::PastLandingSquare { landing, target } => write!(
                f,
                "Square {} is past your landing square {}.",
                target, landing
            ),
            IllegalAction::NoLadder => write!(f, "No ladder to ascend."),
            IllegalAction::NoChute => write!(f, "No chute to descend."),
            IllegalAction::WrongLadderDestination { expected, got } => write!(
                f,
                "Wrong ladder destination. Expected {}, got {}.",
                expected, got
            ),
            IllegalAction::WrongChuteDestination { expected, got } => write!(
                f,
                "Wrong chute destination. Expected {}, got {}.",
                expected, got
            ),
            IllegalAction::EndedTurnWithoutMoving => {
                write!(f, "You must move before ending your turn.")
            }
            IllegalAction::EndedTurnEarly { current } => write!(
                f,
                "You haven't reached your final square yet. Currently on {}.",
                current
            ),
            IllegalAction::NoDrawOffered => write!(f, "No draw has been offered."),
        }
    }
}
