use crate::{
    shortcut_destination, shortcut_kind, Action, ActionResult, Board, IllegalAction, PlayerIdx,
    ShortcutKind, Spinner, Square, ToolCall, TurnPhase, FINAL_SQUARE,
};

/// Parses and validates a raw tool call in one go.
pub fn validate_tool_call(
    board: &Board,
    player: PlayerIdx,
    call: &ToolCall,
    phase: &mut TurnPhase,
    spinner: &mut impl Spinner,
) -> ActionResult {
    match Action::from_tool_call(call) {
        Ok(action) => validate_action(board, player, &action, phase, spinner),
        Err(err) => err.into(),
    }
}

/// Judges one action against the board and the turn so far.
///
/// Updates `phase` to track the turn's progress, but never the board: the
/// game runner commits the final position when the turn ends. A rejected
/// action leaves `phase` untouched.
pub fn validate_action(
    board: &Board,
    player: PlayerIdx,
    action: &Action,
    phase: &mut TurnPhase,
    spinner: &mut impl Spinner,
) -> ActionResult {
    let outcome = match action {
        Action::Plan { .. } => Ok(ActionResult::legal("Plan noted.")),
        Action::SendMessage { message } => {
            Ok(ActionResult::legal(format!("Message sent: {}", message)))
        }
        Action::Forfeit => Ok(ActionResult {
            forfeit: true,
            ..ActionResult::legal("Player forfeits.")
        }),
        Action::OfferDraw => Ok(ActionResult::legal("Draw offered.")),
        Action::AcceptDraw => accept_draw(phase),
        Action::Spin => spin(board, player, phase, spinner),
        Action::MoveTo { square } => move_pawn(phase, *square),
        Action::AscendLadder { square } => take_shortcut(phase, ShortcutKind::Ladder, *square),
        Action::DescendChute { square } => take_shortcut(phase, ShortcutKind::Chute, *square),
        Action::EndTurn => end_turn(phase),
    };
    outcome.unwrap_or_else(|err| err.into())
}

fn accept_draw(phase: &TurnPhase) -> Result<ActionResult, IllegalAction> {
    if !phase.draw_offered_to_me {
        return Err(IllegalAction::NoDrawOffered);
    }
    Ok(ActionResult {
        draw: true,
        ..ActionResult::legal("Draw accepted.")
    })
}

fn spin(
    board: &Board,
    player: PlayerIdx,
    phase: &mut TurnPhase,
    spinner: &mut impl Spinner,
) -> Result<ActionResult, IllegalAction> {
    if phase.has_spun() {
        return Err(IllegalAction::AlreadySpun);
    }
    let value = spinner.spin();
    phase.spin_value = Some(value);
    phase.start_position = board.position(player);
    Ok(ActionResult {
        spin_value: Some(value),
        ..ActionResult::legal(format!("You spun a {}.", value))
    })
}

/// Marks the turn's final square as reached and reports a win on square 100.
fn arrive(phase: &mut TurnPhase, square: Square, message: String) -> ActionResult {
    phase.current_position = Some(square);
    phase.reached_final = true;
    ActionResult {
        won: square == FINAL_SQUARE,
        ..ActionResult::legal(message)
    }
}

fn move_pawn(phase: &mut TurnPhase, target: i64) -> Result<ActionResult, IllegalAction> {
    let (Some(spin), Some(final_square)) = (phase.spin_value, phase.final_resting_square())
    else {
        return Err(IllegalAction::NotSpun);
    };
    if phase.reached_final {
        return Err(IllegalAction::AlreadyAtFinalSquare);
    }

    let Some(landing) = phase.landing_square() else {
        // The spin overshoots, so the only legal move is staying put.
        let start = phase.start_position;
        if target != i64::from(start) {
            return Err(IllegalAction::MustStayPut { start });
        }
        return Ok(ActionResult {
            bounced: true,
            ..arrive(
                phase,
                start,
                format!("Spin of {} overshoots 100. You stay put.", spin),
            )
        });
    };

    // Jumping straight through a shortcut in one call.
    if target == i64::from(final_square) && final_square != landing {
        return Ok(arrive(phase, final_square, format!("Moved to {}.", final_square)));
    }

    let current = phase.position();
    if target <= i64::from(current) {
        return Err(IllegalAction::MovedBackward { current, target });
    }
    if target > i64::from(landing) {
        return Err(IllegalAction::PastLandingSquare { landing, target });
    }
    // current < target <= landing <= 100
    let target = target as Square;

    if target < landing {
        phase.current_position = Some(target);
        return Ok(ActionResult::legal(format!("Moved to {}.", target)));
    }

    match shortcut_kind(landing) {
        Some(ShortcutKind::Ladder) => {
            phase.current_position = Some(landing);
            Ok(ActionResult {
                requires_ladder: true,
                ..ActionResult::legal(format!("Moved to {}. There's a ladder here!", landing))
            })
        }
        Some(ShortcutKind::Chute) => {
            phase.current_position = Some(landing);
            Ok(ActionResult {
                requires_chute: true,
                ..ActionResult::legal(format!("Moved to {}. There's a chute here!", landing))
            })
        }
        None => Ok(arrive(phase, landing, format!("Moved to {}.", landing))),
    }
}

fn take_shortcut(
    phase: &mut TurnPhase,
    kind: ShortcutKind,
    target: i64,
) -> Result<ActionResult, IllegalAction> {
    let no_shortcut = match kind {
        ShortcutKind::Ladder => IllegalAction::NoLadder,
        ShortcutKind::Chute => IllegalAction::NoChute,
    };
    let landing = match phase.landing_square() {
        Some(landing) if phase.pending_shortcut() == Some(kind) => landing,
        _ => return Err(no_shortcut),
    };
    let Some(expected) = shortcut_destination(landing) else {
        return Err(no_shortcut);
    };
    if target != i64::from(expected) {
        return Err(match kind {
            ShortcutKind::Ladder => IllegalAction::WrongLadderDestination {
                expected,
                got: target,
            },
            ShortcutKind::Chute => IllegalAction::WrongChuteDestination {
                expected,
                got: target,
            },
        });
    }
    let message = match kind {
        ShortcutKind::Ladder => format!("Climbed ladder from {} to {}!", landing, expected),
        ShortcutKind::Chute => format!("Slid down chute from {} to {}.", landing, expected),
    };
    Ok(arrive(phase, expected, message))
}

fn end_turn(phase: &TurnPhase) -> Result<ActionResult, IllegalAction> {
    let Some(current) = phase.current_position else {
        return Err(IllegalAction::EndedTurnWithoutMoving);
    };
    if !phase.reached_final {
        return Err(IllegalAction::EndedTurnEarly { current });
    }
    Ok(ActionResult {
        turn_over: true,
        ..ActionResult::legal("Turn over.")
    })
}
