use quickcheck::{Arbitrary, Gen};

use crate::{Cell, Color, GameState, PairType, BOARD_SIZE, COLORS, PAIR_TYPES};

/// Random game states reachable from the start by playing random legal actions.
///
/// Some of them are won, most are not.
impl Arbitrary for GameState {
    fn arbitrary(g: &mut Gen) -> Self {
        let target_one = Color::arbitrary(g);
        let target_two = loop {
            let c = Color::arbitrary(g);
            if c != target_one {
                break c;
            }
        };
        let mut state = GameState::with_targets(target_one, target_two);

        let num_actions = usize::arbitrary(g) % 40;
        for _ in 0..num_actions {
            let actions = state.legal_actions(state.turn());
            let Some(&action) = g.choose(&actions) else {
                break;
            };
            state
                .apply(action)
                .expect("Generated action was rejected");
        }
        state
    }
}

impl Arbitrary for Cell {
    fn arbitrary(g: &mut Gen) -> Self {
        Cell::new(u8::arbitrary(g) % BOARD_SIZE, u8::arbitrary(g) % BOARD_SIZE)
    }
}

impl Arbitrary for Color {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&COLORS).unwrap()
    }
}

impl Arbitrary for PairType {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&PAIR_TYPES).unwrap()
    }
}
