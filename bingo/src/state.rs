use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Action, Board, Cell, Color, PairType, Player, Rejection, Tile, TileStock, COLORS};

/// After this many placements, the game enters the [movement phase](Phase::Movement).
pub const PLACEMENTS_BEFORE_MOVEMENT: u8 = 14;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Placement,
    /// Entered once and never left.
    Movement,
}

/// Summarizes the outcome of a successful action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The game goes on, and it is now `next`'s turn.
    Normal { next: Player },
    /// The action completed a line of the winner's target color.
    Won { winner: Player },
}

/// The complete state of one game.
///
/// All mutation goes through [`Self::place()`], [`Self::move_tile()`],
/// [`Self::flip()`] and [`Self::pass_turn()`], which validate the action
/// first and leave the state untouched when they reject it.
///
/// The state is [`Copy`]: search works on independent snapshots obtained
/// with [`Self::after()`], and never aliases the live game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    stocks: [TileStock; 2],
    targets: [Color; 2],
    phase: Phase,
    turn: Player,
    /// Number of successful placements. Moves and flips don't count.
    move_counter: u8,
    winner: Option<Player>,
}

impl GameState {
    /// Starts a new game with randomly drawn, distinct target colors.
    ///
    /// This is the only place where randomness enters the game.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let first = COLORS[rng.gen_range(0..COLORS.len())];
        let others: Vec<Color> = COLORS.into_iter().filter(|&c| c != first).collect();
        let second = others[rng.gen_range(0..others.len())];
        Self::with_targets(first, second)
    }

    /// Starts a new game with the given target colors.
    ///
    /// Panics if both targets are the same color.
    pub fn with_targets(target_one: Color, target_two: Color) -> Self {
        assert_ne!(target_one, target_two, "Targets must be distinct");
        Self {
            board: Board::new(),
            stocks: [TileStock::full(); 2],
            targets: [target_one, target_two],
            phase: Phase::Placement,
            turn: Player::One,
            move_counter: 0,
            winner: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn stock(&self, player: Player) -> TileStock {
        self.stocks[player.index()]
    }

    pub fn target(&self, player: Player) -> Color {
        self.targets[player.index()]
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The player who acts next.
    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn move_counter(&self) -> u8 {
        self.move_counter
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn check_win(&self, color: Color) -> bool {
        self.board.check_win(color)
    }

    /// Puts a tile from the acting player's stock onto an empty cell.
    pub fn place(
        &mut self,
        cell: Cell,
        pair: PairType,
        flipped: bool,
    ) -> Result<TurnOutcome, Rejection> {
        self.ensure_not_won()?;
        ensure_in_bounds(cell)?;
        if self.board.is_occupied(cell) {
            return Err(Rejection::OccupiedCell { cell });
        }
        let stock = self
            .stock(self.turn)
            .take(pair)
            .ok_or(Rejection::InsufficientStock { pair })?;

        self.board
            .set(cell, Some(Tile::new(pair, flipped, self.turn)));
        self.stocks[self.turn.index()] = stock;
        self.move_counter += 1;
        if self.move_counter >= PLACEMENTS_BEFORE_MOVEMENT {
            self.phase = Phase::Movement;
        }
        Ok(self.finish_action())
    }

    /// Slides a tile one step onto an empty neighboring cell.
    ///
    /// This is allowed in either phase, and for any tile on the board.
    pub fn move_tile(&mut self, from: Cell, to: Cell) -> Result<TurnOutcome, Rejection> {
        self.ensure_not_won()?;
        ensure_in_bounds(from)?;
        ensure_in_bounds(to)?;
        let tile = self
            .board
            .get(from)
            .ok_or(Rejection::EmptyCell { cell: from })?;
        if self.board.is_occupied(to) {
            return Err(Rejection::OccupiedCell { cell: to });
        }
        if !from.is_adjacent_to(to) {
            return Err(Rejection::IllegalAdjacency { from, to });
        }

        self.board.set(from, None);
        self.board.set(to, Some(tile));
        Ok(self.finish_action())
    }

    /// Turns a tile over. Like [`Self::move_tile()`], this is not restricted by phase.
    pub fn flip(&mut self, cell: Cell) -> Result<TurnOutcome, Rejection> {
        self.ensure_not_won()?;
        ensure_in_bounds(cell)?;
        let tile = self.board.get(cell).ok_or(Rejection::EmptyCell { cell })?;

        self.board.set(cell, Some(tile.flipped()));
        Ok(self.finish_action())
    }

    pub fn apply(&mut self, action: Action) -> Result<TurnOutcome, Rejection> {
        match action {
            Action::Place {
                cell,
                pair,
                flipped,
            } => self.place(cell, pair, flipped),
            Action::Move { from, to } => self.move_tile(from, to),
            Action::Flip { cell } => self.flip(cell),
        }
    }

    /// The state after applying the action, leaving `self` as it is.
    pub fn after(&self, action: Action) -> Result<GameState, Rejection> {
        let mut next = *self;
        next.apply(action)?;
        Ok(next)
    }

    /// Hands the turn to the opponent without changing the board.
    ///
    /// Used when the acting player has no legal move.
    pub fn pass_turn(&mut self) -> Result<TurnOutcome, Rejection> {
        self.ensure_not_won()?;
        self.turn = self.turn.opponent();
        Ok(TurnOutcome::Normal { next: self.turn })
    }

    // Player one is checked first, so they win if an action completes
    // lines for both targets.
    fn finish_action(&mut self) -> TurnOutcome {
        if let Some(winner) = Player::BOTH
            .into_iter()
            .find(|&player| self.check_win(self.target(player)))
        {
            self.winner = Some(winner);
            TurnOutcome::Won { winner }
        } else {
            self.turn = self.turn.opponent();
            TurnOutcome::Normal { next: self.turn }
        }
    }

    fn ensure_not_won(&self) -> Result<(), Rejection> {
        match self.winner {
            Some(winner) => Err(Rejection::GameAlreadyWon { winner }),
            None => Ok(()),
        }
    }
}

fn ensure_in_bounds(cell: Cell) -> Result<(), Rejection> {
    if cell.is_in_bounds() {
        Ok(())
    } else {
        Err(Rejection::OutOfBounds { cell })
    }
}
