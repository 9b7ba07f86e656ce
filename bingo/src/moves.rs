use crate::{Action, Cell, GameState, Player};

impl GameState {
    /// Returns all legal actions for `player`, in a fixed order.
    ///
    /// First come placements (empty cells in row-major order, then the pair
    /// types left in the player's stock, then unflipped before flipped), then
    /// moves of the player's own tiles onto empty neighbors, then flips of
    /// the player's own tiles.
    ///
    /// Moves and flips are generated in both phases. A won game has no
    /// legal actions.
    pub fn legal_actions(&self, player: Player) -> Vec<Action> {
        if self.winner().is_some() {
            return Vec::new();
        }
        let board = self.board();
        let stock = self.stock(player);
        let empty = board.empty_cells();
        let owned = board.owned_by(player);

        let placements = empty.into_iter().flat_map(move |cell| {
            stock.available().flat_map(move |pair| {
                [false, true].map(|flipped| Action::Place {
                    cell,
                    pair,
                    flipped,
                })
            })
        });
        let moves = owned.into_iter().flat_map(move |from| {
            from.neighbors()
                .filter(move |&to| empty.contains(to))
                .map(move |to| Action::Move { from, to })
        });
        let flips = owned.into_iter().map(|cell: Cell| Action::Flip { cell });

        placements.chain(moves).chain(flips).collect()
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::{action, Color, PairType};

    quickcheck! {
        fn generated_actions_are_accepted(state: GameState) -> bool {
            state
                .legal_actions(state.turn())
                .into_iter()
                .all(|action| state.after(action).is_ok())
        }
    }

    #[test]
    fn empty_board_only_has_placements() {
        let state = GameState::with_targets(Color::Red, Color::Blue);
        let actions = state.legal_actions(Player::One);
        assert_eq!(actions.len(), 16 * 3 * 2);
        assert_eq!(actions[0], action!("place 0,0 yellow-red"));
        assert_eq!(actions[1], action!("place 0,0 yellow-red flipped"));
        assert_eq!(actions[2], action!("place 0,0 blue-yellow"));
        assert!(actions
            .iter()
            .all(|action| matches!(action, Action::Place { .. })));
    }

    #[test]
    fn moves_and_flips_only_for_own_tiles() {
        let mut state = GameState::with_targets(Color::Red, Color::Blue);
        state.apply(action!("place 0,0 red-blue")).unwrap();

        let own = state.legal_actions(Player::One);
        assert_eq!(own.len(), 15 * 6 + 2 + 1);
        assert_eq!(
            &own[own.len() - 3..],
            &[
                action!("move 0,0 1,0"),
                action!("move 0,0 0,1"),
                action!("flip 0,0"),
            ]
        );

        let other = state.legal_actions(Player::Two);
        assert_eq!(other.len(), 15 * 6);
    }

    #[test]
    fn exhausted_pair_types_are_skipped() {
        let mut state = GameState::with_targets(Color::Red, Color::Blue);
        for a in [
            "place 0,0 yellow-red",
            "place 3,3 red-blue",
            "place 0,2 yellow-red",
            "place 3,1 red-blue",
            "place 2,0 yellow-red",
            "place 1,3 red-blue",
        ] {
            state.apply(a.parse().unwrap()).unwrap();
        }
        let actions = state.legal_actions(Player::One);
        assert!(actions.iter().all(|action| !matches!(
            action,
            Action::Place {
                pair: PairType::YellowRed,
                ..
            }
        )));
        assert_eq!(
            actions
                .iter()
                .filter(|action| matches!(action, Action::Place { .. }))
                .count(),
            10 * 2 * 2
        );
    }

    #[test]
    fn won_game_has_no_actions() {
        let mut state = GameState::with_targets(Color::Yellow, Color::Red);
        for a in [
            "place 0,0 yellow-red",
            "place 1,0 red-blue",
            "place 0,1 yellow-red",
            "place 1,1 red-blue",
            "place 0,2 yellow-red",
            "place 1,2 red-blue",
            "place 0,3 blue-yellow flipped",
        ] {
            state.apply(a.parse().unwrap()).unwrap();
        }
        assert_eq!(state.winner(), Some(Player::One));
        assert!(state.legal_actions(Player::One).is_empty());
        assert!(state.legal_actions(Player::Two).is_empty());
    }
}
