use bingo::{Board, Color, LINES};

/// The score of a position where `mine` has a complete line.
///
/// The negated value is used when `theirs` has one. No heuristic score
/// comes close to these.
pub const WIN_SCORE: f64 = 10000.0;

/// How much more blocking the opponent's lines is worth than building our own.
pub const DEFENSE_WEIGHT: f64 = 1.2;

/// Scores the board from the point of view of the player with target color `mine`.
///
/// Every row, column and diagonal that the opponent hasn't entered counts
/// `m³ + 2e` for us, where `m` is the number of our colored fronts and `e`
/// the number of empty cells in it. Lines we haven't entered count the same
/// way for the opponent, weighted with [`DEFENSE_WEIGHT`]. Fronts of the
/// third color neither block nor count.
pub fn evaluate(board: &Board, mine: Color, theirs: Color) -> f64 {
    if board.check_win(mine) {
        return WIN_SCORE;
    }
    if board.check_win(theirs) {
        return -WIN_SCORE;
    }

    let my_fronts = board.fronts(mine);
    let their_fronts = board.fronts(theirs);
    let empty = board.empty_cells();

    let mut my_score = 0.0;
    let mut their_score = 0.0;
    for line in LINES {
        let m = f64::from((my_fronts & line).num_entries());
        let t = f64::from((their_fronts & line).num_entries());
        let e = f64::from((empty & line).num_entries());
        if t == 0.0 {
            my_score += m.powi(3) + 2.0 * e;
        }
        if m == 0.0 {
            their_score += t.powi(3) + 2.0 * e;
        }
    }
    my_score - DEFENSE_WEIGHT * their_score
}
