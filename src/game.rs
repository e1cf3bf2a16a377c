//! Core game state and logic

use crate::board::Board;
use crate::collision::collide;
use crate::figure::Figure;
use crate::kick::rotate_piece;
use crate::piece::Piece;
use crate::settings::Settings;
use crate::snapshot::Snapshot;
use crate::timer::DropTimer;
use rand::distributions::Standard;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use tracing::{debug, info};

/// Game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Running,
    /// A new piece had no room; terminal
    Over,
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Rotate,
    Drop,
    Accelerate,
    Decelerate,
}

/// The main game struct
pub struct Game {
    /// The game board
    pub board: Board,
    /// Current falling piece
    pub piece: Piece,
    /// Current game state
    pub state: GameState,
    /// Gravity accumulator
    timer: DropTimer,
    /// Timestamp of the previous tick
    last_tick: Duration,
    /// Figure randomizer
    rng: ChaCha8Rng,
    /// Total rows swept this session
    lines_cleared: usize,
}

impl Game {
    /// Create a new game, seeded from settings or from entropy
    pub fn new(settings: &Settings) -> Self {
        let seed = settings.gameplay.seed.unwrap_or_else(rand::random);
        Self::with_seed(settings, seed)
    }

    /// Create a new game with a fixed seed (reproducible figure sequence)
    pub fn with_seed(settings: &Settings, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let first: Figure = rng.sample(Standard);
        let gameplay = &settings.gameplay;

        let mut game = Self {
            board: Board::new(settings.board.cols, settings.board.rows),
            piece: Piece::new(first),
            state: GameState::Running,
            timer: DropTimer::new(gameplay.drop_interval(), gameplay.fast_drop_divisor),
            last_tick: Duration::ZERO,
            rng,
            lines_cleared: 0,
        };
        info!(
            seed,
            cols = settings.board.cols,
            rows = settings.board.rows,
            "New game"
        );
        game.spawn_figure(first);
        game
    }

    /// Process an action
    pub fn process_action(&mut self, action: Action) {
        if self.is_over() {
            return;
        }
        match action {
            Action::MoveLeft => self.move_piece(-1),
            Action::MoveRight => self.move_piece(1),
            Action::Rotate => self.rotate(),
            Action::Drop => self.force_drop(),
            Action::Accelerate => self.set_accelerated(),
            Action::Decelerate => self.set_normal(),
        }
    }

    /// Advance the clock to `timestamp` (time since the tick source started)
    pub fn tick(&mut self, timestamp: Duration) {
        if self.is_over() {
            return;
        }
        let delta = timestamp.saturating_sub(self.last_tick);
        self.last_tick = timestamp;
        if self.timer.advance(delta) {
            self.force_drop();
        }
    }

    /// Shift the piece sideways by `dir` columns unless it would collide
    pub fn move_piece(&mut self, dir: i32) {
        if self.is_over() {
            return;
        }
        self.piece.x += dir;
        if collide(&self.board, &self.piece) {
            self.piece.x -= dir;
        }
    }

    pub fn rotate(&mut self) {
        if self.is_over() {
            return;
        }
        rotate_piece(&mut self.piece, &self.board);
    }

    /// Move the piece down one row, locking it if it cannot go further
    pub fn force_drop(&mut self) {
        if self.is_over() {
            return;
        }
        self.piece.y += 1;
        if collide(&self.board, &self.piece) {
            self.piece.y -= 1;
            self.lock_piece();
        }
        self.timer.reset();
    }

    pub fn set_accelerated(&mut self) {
        if self.is_over() {
            return;
        }
        self.timer.set_accelerated();
    }

    pub fn set_normal(&mut self) {
        if self.is_over() {
            return;
        }
        self.timer.set_normal();
    }

    /// Lock the current piece, clear rows and spawn the next
    fn lock_piece(&mut self) {
        debug!(
            figure = self.piece.figure.name(),
            x = self.piece.x,
            y = self.piece.y,
            "Piece locked"
        );
        self.board.merge(&self.piece);

        let cleared = self.board.sweep();
        if cleared > 0 {
            self.lines_cleared += cleared;
            info!(cleared, total = self.lines_cleared, "Rows cleared");
        }

        self.spawn();
    }

    /// Spawn a uniformly random figure
    fn spawn(&mut self) {
        let figure: Figure = self.rng.sample(Standard);
        self.spawn_figure(figure);
    }

    /// Place `figure` at the top center; no room ends the game
    fn spawn_figure(&mut self, figure: Figure) {
        self.piece = Piece::spawn(figure, self.board.width());

        if collide(&self.board, &self.piece) {
            self.board.clear();
            self.state = GameState::Over;
            info!(
                figure = figure.name(),
                lines = self.lines_cleared,
                "Game over"
            );
            return;
        }

        debug!(figure = figure.name(), x = self.piece.x, "Spawned piece");
    }

    pub fn is_over(&self) -> bool {
        self.state == GameState::Over
    }

    pub fn lines_cleared(&self) -> usize {
        self.lines_cleared
    }

    pub fn is_accelerated(&self) -> bool {
        self.timer.is_accelerated()
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            board: &self.board,
            piece: &self.piece,
            over: self.is_over(),
            accelerated: self.is_accelerated(),
        }
    }
}
