use bingo::{GameState, Player, Rejection};
use tracing::debug;

use crate::search::candidates;
use crate::{choose_move, evaluate, SearchConfig, SearchOutcome};

/// How a computer player picks its actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Takes the action with the best evaluation one ply ahead.
    Greedy,
    /// Alpha-beta search, see [`choose_move()`].
    Minimax(SearchConfig),
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Minimax(SearchConfig::default())
    }
}

impl Strategy {
    /// Picks an action for `player`, who must be the player to move.
    ///
    /// [`Rejection::NoLegalMove`] means the player has to pass.
    pub fn choose(&self, state: &GameState, player: Player) -> Result<SearchOutcome, Rejection> {
        match self {
            Strategy::Greedy => choose_greedy(state, player),
            Strategy::Minimax(config) => choose_move(state, player, config),
        }
    }
}

/// Evaluates every legal action one ply ahead and keeps the first best one.
pub fn choose_greedy(state: &GameState, player: Player) -> Result<SearchOutcome, Rejection> {
    let mine = state.target(player);
    let theirs = state.target(player.opponent());
    let mut best: Option<SearchOutcome> = None;
    let mut nodes = 0;
    for action in candidates(state, player)? {
        let Ok(next) = state.after(action) else {
            continue;
        };
        nodes += 1;
        let score = evaluate(next.board(), mine, theirs);
        if best.map_or(true, |b| score > b.score) {
            best = Some(SearchOutcome {
                action,
                score,
                nodes,
            });
        }
    }
    let best = best.ok_or(Rejection::NoLegalMove)?;
    debug!(action = %best.action, score = best.score, nodes, "Greedy choice");
    Ok(SearchOutcome { nodes, ..best })
}

#[cfg(test)]
mod tests {
    use bingo::{action, Action, Cell, Color, PairType};

    use super::*;

    #[test]
    fn greedy_takes_immediate_win() {
        let mut state = GameState::with_targets(Color::Red, Color::Blue);
        for a in [
            "place 0,0 red-blue",
            "place 3,0 blue-yellow",
            "place 1,1 red-blue",
            "place 3,1 blue-yellow",
            "place 2,2 red-blue",
            "place 2,3 yellow-red",
        ] {
            state.apply(a.parse().unwrap()).unwrap();
        }
        let outcome = Strategy::Greedy.choose(&state, Player::One).unwrap();
        assert_eq!(
            outcome.action,
            Action::Place {
                cell: Cell::new(3, 3),
                pair: PairType::YellowRed,
                flipped: true
            }
        );
        assert_eq!(outcome.score, crate::WIN_SCORE);
    }

    #[test]
    fn default_strategy_is_minimax() {
        assert_eq!(
            Strategy::default(),
            Strategy::Minimax(SearchConfig::default())
        );
        let mut state = GameState::with_targets(Color::Red, Color::Blue);
        state.apply(action!("place 0,0 red-blue")).unwrap();
        assert!(Strategy::default().choose(&state, Player::Two).is_ok());
    }
}
