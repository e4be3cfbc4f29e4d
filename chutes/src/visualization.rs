use crate::{shortcut_kind, Board, ShortcutKind, Square, FINAL_SQUARE};

const ROW_LEN: Square = 10;

fn cell(board: &Board, square: Square) -> String {
    let pawns: Vec<String> = (0..2)
        .filter(|&player| board.position(player) == square)
        .map(|player| player.to_string())
        .collect();
    if !pawns.is_empty() {
        return format!("{:>4}", format!("P{}", pawns.join("")));
    }
    let marker = match shortcut_kind(square) {
        Some(ShortcutKind::Ladder) => '^',
        Some(ShortcutKind::Chute) => 'v',
        None => ' ',
    };
    format!("{:>3}{}", square, marker)
}

/// Draws the board the way it is printed on the box: square 1 in the bottom
/// left corner, rows alternating direction, square 100 in the top left.
///
/// Ladder feet are marked with `^`, chute tops with `v`, and pawns with
/// `P0`/`P1`.
pub fn visualize_board(board: &Board) -> String {
    let border = format!("╭{}╮", "─".repeat(4 * ROW_LEN as usize));
    let mut result = border;
    for row in (0..FINAL_SQUARE / ROW_LEN).rev() {
        let mut squares: Vec<Square> = (1..=ROW_LEN).map(|i| row * ROW_LEN + i).collect();
        if row % 2 == 1 {
            squares.reverse();
        }
        result += "\n│";
        for square in squares {
            result += &cell(board, square);
        }
        result += "│";
    }
    result += &format!("\n╰{}╯", "─".repeat(4 * ROW_LEN as usize));

    let waiting: Vec<String> = (0..2)
        .filter(|&player| board.position(player) == 0)
        .map(|player| format!("P{}", player))
        .collect();
    if !waiting.is_empty() {
        result += &format!("\nNot yet on the board: {}", waiting.join(", "));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout() {
        let board = Board::new([14, 0]);
        let rendered = visualize_board(&board);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 13);
        // Top row runs from 100 down to 91
        assert!(lines[1].starts_with("│100 "));
        assert!(lines[1].contains(" 91 "));
        // Bottom row runs from 1 to 10, with the ladder at 1 and 4
        assert!(lines[10].starts_with("│  1^  2   3   4^"));
        // Second row from the bottom runs from 20 down to 11, with player 0 on 14
        assert!(lines[9].starts_with("│ 20  19  18  17  16v"));
        assert!(lines[9].contains("  P0 13 "));
        assert_eq!(lines[12], "Not yet on the board: P1");
    }

    #[test]
    fn shared_square() {
        let rendered = visualize_board(&Board::new([42, 42]));
        assert!(rendered.contains(" P01"));
        assert!(!rendered.contains("Not yet"));
    }
}
