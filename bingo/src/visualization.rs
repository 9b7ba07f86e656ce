use crate::{Board, Cell, GameState, Player, BOARD_SIZE, PAIR_TYPES};

/// Draws the board as a box of cells.
///
/// Every tile is shown as its front color letter, its back color as a
/// lowercase letter, and the owner's number, e.g. `Yr1`. Empty cells are
/// shown as ` . `.
pub fn visualize_board(board: &Board) -> String {
    let mut result = String::from("     ");
    for col in 0..BOARD_SIZE {
        result += &format!("{:<4}", col);
    }
    result += "\n   ╭";
    for _ in 0..BOARD_SIZE {
        result += "────";
    }
    result += "╮\n";
    for row in 0..BOARD_SIZE {
        result += &format!("{:>2} │", row);
        for col in 0..BOARD_SIZE {
            match board.get(Cell::new(row, col)) {
                Some(tile) => result += &format!(" {}", tile),
                None => result += "  . ",
            }
        }
        result += "│\n";
    }
    result += "   ╰";
    for _ in 0..BOARD_SIZE {
        result += "────";
    }
    result += "╯";
    result
}

/// The board plus everything else a player needs to know: turn, phase,
/// targets, stocks and the winner.
pub fn visualize_game(state: &GameState) -> String {
    let mut result = visualize_board(state.board());
    result += &format!(
        "\nPlacements: {}, phase: {:?}",
        state.move_counter(),
        state.phase()
    );
    for player in Player::BOTH {
        let stock = state.stock(player);
        let counts: Vec<String> = PAIR_TYPES
            .iter()
            .map(|&pair| format!("{} ×{}", pair, stock.remaining(pair)))
            .collect();
        result += &format!(
            "\n{} (target {}): {}",
            player,
            state.target(player),
            counts.join(", ")
        );
    }
    match state.winner() {
        Some(winner) => result += &format!("\n{} won!", winner),
        None => result += &format!("\nIt's {}'s turn", state.turn()),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{action, Color};

    #[test]
    fn draws_tiles_with_front_back_and_owner() {
        let mut state = GameState::with_targets(Color::Red, Color::Blue);
        state.apply(action!("place 0,1 yellow-red")).unwrap();
        state.apply(action!("place 3,3 red-blue flipped")).unwrap();
        let drawing = visualize_board(state.board());
        let lines: Vec<&str> = drawing.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[2], " 0 │  .  Yr1  .   . │");
        assert_eq!(lines[5], " 3 │  .   .   .  Br2│");
        assert!(visualize_game(&state).ends_with("It's player 1's turn"));
    }
}
