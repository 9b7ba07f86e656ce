use bingo::{Action, Color, GameState, Player, Rejection};
use tracing::{debug, trace};

use crate::evaluator::{evaluate, WIN_SCORE};

/// Limits of the minimax search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Search depth in plies during the opening.
    pub shallow_depth: u8,
    /// Search depth in plies once `deepen_after` tiles have been placed.
    pub deep_depth: u8,
    pub deepen_after: u8,
    /// At every node, only this many actions are searched, taken in
    /// generation order.
    pub branching_cap: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            shallow_depth: 3,
            deep_depth: 4,
            deepen_after: 10,
            branching_cap: 30,
        }
    }
}

impl SearchConfig {
    pub fn depth_for(&self, state: &GameState) -> u8 {
        if state.move_counter() < self.deepen_after {
            self.shallow_depth
        } else {
            self.deep_depth
        }
    }
}

/// The action picked by a computer player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchOutcome {
    pub action: Action,
    /// Evaluation of the action from the computer player's point of view.
    pub score: f64,
    /// Number of positions that were evaluated or expanded.
    pub nodes: u64,
}

/// Picks an action for `ai` with a depth-limited minimax search with
/// alpha-beta pruning.
///
/// `ai` must be the player to move. Fails with [`Rejection::GameAlreadyWon`]
/// on a decided game and with [`Rejection::NoLegalMove`] if `ai` has nothing
/// to do. An action that wins on the spot is taken without searching.
/// Among equally good actions, the first one in generation order wins.
///
/// The search only ever works on copies of `state`.
pub fn choose_move(
    state: &GameState,
    ai: Player,
    config: &SearchConfig,
) -> Result<SearchOutcome, Rejection> {
    debug_assert_eq!(state.turn(), ai);
    let candidates = candidates(state, ai)?;

    let mut search = Search {
        ai,
        mine: state.target(ai),
        theirs: state.target(ai.opponent()),
        branching_cap: config.branching_cap.max(1),
        nodes: 0,
    };

    for &action in &candidates {
        let Ok(next) = state.after(action) else {
            continue;
        };
        search.nodes += 1;
        if evaluate(next.board(), search.mine, search.theirs) >= WIN_SCORE {
            debug!(%action, "Taking immediate win");
            return Ok(SearchOutcome {
                action,
                score: WIN_SCORE,
                nodes: search.nodes,
            });
        }
    }

    let depth = config.depth_for(state);
    let mut alpha = f64::NEG_INFINITY;
    let mut best: Option<(Action, f64)> = None;
    for &action in candidates.iter().take(search.branching_cap) {
        let Ok(next) = state.after(action) else {
            continue;
        };
        let score = search.minimax(&next, depth.saturating_sub(1), alpha, f64::INFINITY);
        trace!(%action, score, "Searched root action");
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((action, score));
        }
        alpha = alpha.max(score);
    }

    let (action, score) = best.ok_or(Rejection::NoLegalMove)?;
    debug!(%action, score, nodes = search.nodes, depth, "Search finished");
    Ok(SearchOutcome {
        action,
        score,
        nodes: search.nodes,
    })
}

/// The legal actions of `player`, or the reason there are none.
pub(crate) fn candidates(state: &GameState, player: Player) -> Result<Vec<Action>, Rejection> {
    if let Some(winner) = state.winner() {
        return Err(Rejection::GameAlreadyWon { winner });
    }
    let actions = state.legal_actions(player);
    if actions.is_empty() {
        Err(Rejection::NoLegalMove)
    } else {
        Ok(actions)
    }
}

struct Search {
    ai: Player,
    mine: Color,
    theirs: Color,
    branching_cap: usize,
    nodes: u64,
}

impl Search {
    fn minimax(&mut self, state: &GameState, depth: u8, mut alpha: f64, mut beta: f64) -> f64 {
        self.nodes += 1;
        if depth == 0 || state.winner().is_some() {
            return evaluate(state.board(), self.mine, self.theirs);
        }
        let to_move = state.turn();
        let actions = state.legal_actions(to_move);
        if actions.is_empty() {
            return evaluate(state.board(), self.mine, self.theirs);
        }

        let maximizing = to_move == self.ai;
        let mut value = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        for action in actions.into_iter().take(self.branching_cap) {
            let Ok(child) = state.after(action) else {
                continue;
            };
            let score = self.minimax(&child, depth - 1, alpha, beta);
            if maximizing {
                value = value.max(score);
                alpha = alpha.max(value);
            } else {
                value = value.min(score);
                beta = beta.min(value);
            }
            if alpha >= beta {
                break;
            }
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use bingo::{action, Cell, PairType};

    use super::*;

    fn play(state: &mut GameState, actions: &[&str]) {
        for a in actions {
            state.apply(a.parse().unwrap()).unwrap();
        }
    }

    #[test]
    fn takes_immediate_win() {
        let mut state = GameState::with_targets(Color::Yellow, Color::Red);
        play(
            &mut state,
            &[
                "place 3,0 yellow-red",
                "place 0,0 red-blue",
                "place 3,1 yellow-red",
                "place 0,1 red-blue",
                "place 3,2 yellow-red",
                "place 1,0 red-blue",
            ],
        );
        let outcome = choose_move(&state, Player::One, &SearchConfig::default()).unwrap();
        assert_eq!(
            outcome.action,
            Action::Place {
                cell: Cell::new(3, 3),
                pair: PairType::BlueYellow,
                flipped: true
            }
        );
        assert_eq!(outcome.score, WIN_SCORE);
    }

    #[test]
    fn blocks_opponents_line() {
        let mut state = GameState::with_targets(Color::Yellow, Color::Red);
        play(
            &mut state,
            &[
                "place 3,0 yellow-red",
                "place 0,1 yellow-red flipped",
                "place 3,1 blue-yellow",
                "place 0,2 yellow-red flipped",
                "place 3,2 blue-yellow",
                "place 0,3 yellow-red flipped",
            ],
        );
        let outcome = choose_move(&state, Player::One, &SearchConfig::default()).unwrap();
        match outcome.action {
            Action::Place {
                cell,
                pair,
                flipped,
            } => {
                assert_eq!(cell, Cell::new(0, 0));
                assert_ne!(pair.faces(flipped).0, Color::Red);
            }
            other => panic!("Expected a placement on 0,0, got {}", other),
        }
        assert!(outcome.score > -WIN_SCORE);
    }

    #[test]
    fn search_is_deterministic_and_leaves_state_alone() {
        let mut state = GameState::with_targets(Color::Blue, Color::Red);
        play(
            &mut state,
            &["place 1,1 red-blue flipped", "place 2,2 red-blue"],
        );
        let before = state;
        let config = SearchConfig::default();
        let first = choose_move(&state, Player::One, &config).unwrap();
        let second = choose_move(&state, Player::One, &config).unwrap();
        assert_eq!(first, second);
        assert_eq!(state, before);
        assert!(state.after(first.action).is_ok());
    }

    #[test]
    fn no_move_in_won_game() {
        let mut state = GameState::with_targets(Color::Yellow, Color::Red);
        play(
            &mut state,
            &[
                "place 0,0 yellow-red",
                "place 1,0 red-blue",
                "place 0,1 yellow-red",
                "place 1,1 red-blue",
                "place 0,2 yellow-red",
                "place 1,2 red-blue",
            ],
        );
        state.apply(action!("place 0,3 blue-yellow flipped")).unwrap();
        assert_eq!(
            choose_move(&state, Player::One, &SearchConfig::default()),
            Err(Rejection::GameAlreadyWon {
                winner: Player::One
            })
        );
    }

    #[test]
    fn depth_grows_after_ten_placements() {
        let config = SearchConfig::default();
        let mut state = GameState::with_targets(Color::Yellow, Color::Red);
        let placements = [
            "place 0,0 yellow-red",
            "place 0,1 yellow-red",
            "place 0,2 blue-yellow",
            "place 0,3 blue-yellow",
            "place 1,0 red-blue",
            "place 1,1 red-blue",
            "place 1,2 blue-yellow",
            "place 1,3 red-blue flipped",
            "place 2,0 red-blue flipped",
            "place 2,1 red-blue flipped",
        ];
        for (idx, a) in placements.iter().enumerate() {
            assert_eq!(config.depth_for(&state), 3, "after {} placements", idx);
            state.apply(a.parse().unwrap()).unwrap();
        }
        assert_eq!(state.move_counter(), 10);
        assert_eq!(config.depth_for(&state), 4);
    }

    // Player two threatens to complete row 3 on the last empty cell.
    fn threat_on_last_cell() -> GameState {
        let mut state = GameState::with_targets(Color::Yellow, Color::Red);
        play(
            &mut state,
            &[
                "place 0,0 blue-yellow",
                "place 3,0 yellow-red flipped",
                "place 0,1 blue-yellow",
                "place 3,1 yellow-red flipped",
                "place 1,1 blue-yellow",
                "place 3,2 red-blue",
            ],
        );
        state
    }

    #[test]
    fn wide_search_finds_the_block() {
        let state = threat_on_last_cell();
        let config = SearchConfig {
            shallow_depth: 2,
            deep_depth: 2,
            branching_cap: 1000,
            ..SearchConfig::default()
        };
        let outcome = choose_move(&state, Player::One, &config).unwrap();
        let next = state.after(outcome.action).unwrap();
        let front = next.board().front(Cell::new(3, 3));
        assert!(matches!(front, Some(color) if color != Color::Red), "{}", outcome.action);
        assert!(outcome.score > -WIN_SCORE);
    }

    #[test]
    fn branching_cap_limits_the_candidates() {
        let state = threat_on_last_cell();
        let config = SearchConfig {
            shallow_depth: 2,
            deep_depth: 2,
            branching_cap: 2,
            ..SearchConfig::default()
        };
        let outcome = choose_move(&state, Player::One, &config).unwrap();
        let candidates = state.legal_actions(Player::One);
        assert!(candidates[..2].contains(&outcome.action), "{}", outcome.action);
        let next = state.after(outcome.action).unwrap();
        assert!(!next.board().is_occupied(Cell::new(3, 3)));
    }

    #[test]
    fn ties_go_to_the_first_generated_action() {
        let state = GameState::with_targets(Color::Red, Color::Blue);
        let config = SearchConfig {
            shallow_depth: 1,
            deep_depth: 1,
            ..SearchConfig::default()
        };
        let outcome = choose_move(&state, Player::One, &config).unwrap();
        assert_eq!(outcome.action, action!("place 0,0 yellow-red flipped"));

        let value = |action| evaluate(state.after(action).unwrap().board(), Color::Red, Color::Blue);
        assert_eq!(outcome.score, value(outcome.action));
        for equal in [
            action!("place 0,0 red-blue"),
            action!("place 0,3 yellow-red flipped"),
            action!("place 1,1 red-blue"),
        ] {
            assert_eq!(value(equal), outcome.score, "{}", equal);
        }
        assert!(state
            .legal_actions(Player::One)
            .into_iter()
            .take(config.branching_cap)
            .all(|action| value(action) <= outcome.score));
    }
}
