use bingo::{Player, TurnOutcome};

use crate::{AiTurn, ControllerError, GameController};

/// Games between computer players can go on forever by moving tiles back
/// and forth, so they are cut off after this many actions.
pub const MAX_ACTIONS_PER_GAME: usize = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    WonByPlayer { player: Player },
    Draw,
}

/// Starts a new game and lets the computer players play it out.
///
/// Both seats must be computer players, otherwise
/// [`ControllerError::NotComputerTurn`] is returned.
pub fn play_game(controller: &mut GameController) -> Result<GameResult, ControllerError> {
    controller.new_game();
    for _ in 0..MAX_ACTIONS_PER_GAME {
        controller.request_ai_move()?;
        if let AiTurn::Applied {
            outcome: TurnOutcome::Won { winner },
            ..
        } = controller.wait_for_ai_move()?
        {
            return Ok(GameResult::WonByPlayer { player: winner });
        }
    }
    Ok(GameResult::Draw)
}

#[cfg(test)]
mod tests {
    use minimax_bot::Strategy;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::{Config, Seat};

    #[test]
    fn greedy_self_play_finishes() {
        let mut controller = GameController::new(Config {
            rng: StdRng::seed_from_u64(7),
            seats: [
                Seat::Computer(Strategy::Greedy),
                Seat::Computer(Strategy::Greedy),
            ],
        });
        let result = play_game(&mut controller).unwrap();
        let state = controller.state();
        match result {
            GameResult::WonByPlayer { player } => assert_eq!(state.winner(), Some(player)),
            GameResult::Draw => assert_eq!(state.winner(), None),
        }
        assert!(!controller.is_ai_thinking());
    }

    #[test]
    fn self_play_needs_computer_seats() {
        let mut controller = GameController::new(Config {
            rng: StdRng::seed_from_u64(7),
            seats: [Seat::Human, Seat::Computer(Strategy::Greedy)],
        });
        assert_eq!(
            play_game(&mut controller),
            Err(ControllerError::NotComputerTurn)
        );
    }
}
