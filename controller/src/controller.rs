use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::Instant;

use bingo::{Action, Cell, GameState, PairType, Player, Rejection, TurnOutcome};
use minimax_bot::SearchOutcome;
use rand::rngs::StdRng;
use tracing::{debug, info, trace};

use crate::{Config, ControllerError, Seat};

/// What a finished computer turn did to the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AiTurn {
    Applied { action: Action, outcome: TurnOutcome },
    /// The computer player had no legal action, so the turn went to `next`.
    Passed { next: Player },
}

enum AiJob {
    Idle,
    Thinking {
        player: Player,
        receiver: Receiver<Result<SearchOutcome, Rejection>>,
        start_time: Instant,
    },
}

/// Owns the current game and mediates between the players and the rules.
///
/// Computer moves are computed on a background thread. While one is in
/// flight, no other action is accepted. Starting a new game drops the
/// pending computation, and its result is never applied.
pub struct GameController {
    state: GameState,
    seats: [Seat; 2],
    rng: StdRng,
    game_idx: u64,
    ai_job: AiJob,
}

impl GameController {
    pub fn new(config: Config) -> Self {
        let Config { mut rng, seats } = config;
        let state = GameState::new(&mut rng);
        let controller = Self {
            state,
            seats,
            rng,
            game_idx: 0,
            ai_job: AiJob::Idle,
        };
        controller.log_game_start();
        controller
    }

    /// Abandons the current game and starts a fresh one with new targets.
    pub fn new_game(&mut self) -> GameState {
        if let AiJob::Thinking { player, .. } = self.ai_job {
            debug!(%player, game_idx = self.game_idx, "Discarding pending computer move");
        }
        self.ai_job = AiJob::Idle;
        self.state = GameState::new(&mut self.rng);
        self.game_idx += 1;
        self.log_game_start();
        self.state
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn seat(&self, player: Player) -> Seat {
        self.seats[player.index()]
    }

    /// Counts the games started by this controller, starting at 0.
    pub fn game_idx(&self) -> u64 {
        self.game_idx
    }

    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_job, AiJob::Thinking { .. })
    }

    /// Whether the game is undecided and a computer player is to move.
    pub fn is_computer_turn(&self) -> bool {
        self.state.winner().is_none() && matches!(self.seat(self.state.turn()), Seat::Computer(_))
    }

    pub fn place(
        &mut self,
        cell: Cell,
        pair: PairType,
        flipped: bool,
    ) -> Result<TurnOutcome, ControllerError> {
        self.apply(Action::Place {
            cell,
            pair,
            flipped,
        })
    }

    pub fn move_tile(&mut self, from: Cell, to: Cell) -> Result<TurnOutcome, ControllerError> {
        self.apply(Action::Move { from, to })
    }

    pub fn flip(&mut self, cell: Cell) -> Result<TurnOutcome, ControllerError> {
        self.apply(Action::Flip { cell })
    }

    /// Applies an action on behalf of the human player to move.
    pub fn apply(&mut self, action: Action) -> Result<TurnOutcome, ControllerError> {
        if self.is_ai_thinking() {
            return Err(ControllerError::AiThinking);
        }
        self.ensure_not_won()?;
        let player = self.state.turn();
        if let Seat::Computer(_) = self.seat(player) {
            return Err(ControllerError::NotHumanTurn);
        }
        let outcome = self.state.apply(action)?;
        debug!(%player, %action, "Applied action");
        self.log_outcome(outcome);
        Ok(outcome)
    }

    /// Starts computing the move of the computer player to move.
    ///
    /// The result is picked up with [`Self::poll_ai_move()`] or
    /// [`Self::wait_for_ai_move()`].
    pub fn request_ai_move(&mut self) -> Result<(), ControllerError> {
        if self.is_ai_thinking() {
            return Err(ControllerError::AiThinking);
        }
        self.ensure_not_won()?;
        let player = self.state.turn();
        let Seat::Computer(strategy) = self.seat(player) else {
            return Err(ControllerError::NotComputerTurn);
        };

        let snapshot = self.state;
        let (sender, receiver) = channel();
        thread::spawn(move || {
            let choice = strategy.choose(&snapshot, player);
            // Fails if the game was reset in the meantime
            let _ = sender.send(choice);
        });
        trace!(%player, game_idx = self.game_idx, "Computer player started thinking");
        self.ai_job = AiJob::Thinking {
            player,
            receiver,
            start_time: Instant::now(),
        };
        Ok(())
    }

    /// Applies the pending computer move if it is ready.
    ///
    /// Returns `None` while the computer player is still thinking.
    pub fn poll_ai_move(&mut self) -> Option<Result<AiTurn, ControllerError>> {
        let choice = match &self.ai_job {
            AiJob::Idle => return Some(Err(ControllerError::NoPendingAiMove)),
            AiJob::Thinking { receiver, .. } => match receiver.try_recv() {
                Ok(choice) => choice,
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => {
                    self.ai_job = AiJob::Idle;
                    return Some(Err(ControllerError::AiWorkerLost));
                }
            },
        };
        Some(self.finish_ai_move(choice))
    }

    /// Blocks until the pending computer move is ready, then applies it.
    pub fn wait_for_ai_move(&mut self) -> Result<AiTurn, ControllerError> {
        let received = match &self.ai_job {
            AiJob::Idle => return Err(ControllerError::NoPendingAiMove),
            AiJob::Thinking { receiver, .. } => receiver.recv(),
        };
        match received {
            Ok(choice) => self.finish_ai_move(choice),
            Err(_) => {
                self.ai_job = AiJob::Idle;
                Err(ControllerError::AiWorkerLost)
            }
        }
    }

    fn finish_ai_move(
        &mut self,
        choice: Result<SearchOutcome, Rejection>,
    ) -> Result<AiTurn, ControllerError> {
        let AiJob::Thinking {
            player, start_time, ..
        } = std::mem::replace(&mut self.ai_job, AiJob::Idle)
        else {
            return Err(ControllerError::NoPendingAiMove);
        };
        let elapsed_ms = start_time.elapsed().as_millis() as u64;
        match choice {
            Ok(SearchOutcome {
                action,
                score,
                nodes,
            }) => {
                let outcome = self.state.apply(action)?;
                debug!(%player, %action, score, nodes, elapsed_ms, "Applied computer action");
                self.log_outcome(outcome);
                Ok(AiTurn::Applied { action, outcome })
            }
            Err(Rejection::NoLegalMove) => {
                self.state.pass_turn()?;
                debug!(%player, elapsed_ms, "Computer player has no legal action and passes");
                Ok(AiTurn::Passed {
                    next: self.state.turn(),
                })
            }
            Err(rejection) => Err(rejection.into()),
        }
    }

    fn ensure_not_won(&self) -> Result<(), ControllerError> {
        match self.state.winner() {
            Some(winner) => Err(Rejection::GameAlreadyWon { winner }.into()),
            None => Ok(()),
        }
    }

    fn log_game_start(&self) {
        info!(
            game_idx = self.game_idx,
            target_one = %self.state.target(Player::One),
            target_two = %self.state.target(Player::Two),
            "Starting game"
        );
    }

    fn log_outcome(&self, outcome: TurnOutcome) {
        if let TurnOutcome::Won { winner } = outcome {
            info!(
                game_idx = self.game_idx,
                %winner,
                actions = self.state.move_counter(),
                "Game over"
            );
        }
    }
}
