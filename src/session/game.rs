//! The game session state machine

use std::fmt;
use std::time::Instant;

use log::{debug, info, warn};

use crate::board::{Board, Move, Player, Pos};
use crate::config::{Difficulty, DifficultyProfile, GameConfig};
use crate::engine::{AIEngine, MoveResult};
use crate::error::{AiMoveError, IllegalMove, MoveError};
use crate::rules::{find_winning_path, has_connection};

use super::{AiTicket, GameMode, GameStatus, RewardEvent};

/// Host callback invoked when the human wins a solo game.
pub type RewardHook = Box<dyn FnMut(RewardEvent)>;

/// AI computation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AiState {
    Idle,
    Scheduled { ticket: AiTicket, due: Instant },
}

/// What an AI move did to the session.
#[derive(Debug, Clone)]
pub struct AiMoveReport {
    pub player: Player,
    pub result: MoveResult,
    pub status: GameStatus,
}

/// One game of Hex between a human and the AI, or two humans.
///
/// # Example
///
/// ```
/// use hex::{GameConfig, GameMode, GameSession, GameStatus, Player};
///
/// let config = GameConfig { board_size: 5, ..GameConfig::default() };
/// let mut session = GameSession::new(config, GameMode::Duo);
///
/// for col in 0..5 {
///     session.apply_move(2, col).unwrap();
///     if col < 4 {
///         session.apply_move(0, col).unwrap();
///     }
/// }
/// assert_eq!(session.status(), GameStatus::Won(Player::Red));
/// ```
pub struct GameSession {
    config: GameConfig,
    board: Board,
    mode: GameMode,
    difficulty: Difficulty,
    current: Player,
    status: GameStatus,
    last_move: Option<Move>,
    generation: u64,
    ai_state: AiState,
    engine: AIEngine,
    reward_hook: Option<RewardHook>,
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("size", &self.board.size())
            .field("mode", &self.mode)
            .field("difficulty", &self.difficulty)
            .field("current", &self.current)
            .field("status", &self.status)
            .field("last_move", &self.last_move)
            .field("generation", &self.generation)
            .field("ai_state", &self.ai_state)
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// Fresh session on a `config.board_size` board at the configured
    /// difficulty. If the AI owns Red it is scheduled to open at once.
    /// An out-of-range size is clamped to the nearest supported one.
    pub fn new(mut config: GameConfig, mode: GameMode) -> Self {
        let board = Board::new(config.board_size);
        if board.size() != config.board_size {
            warn!(
                "board size {} out of range, using {}",
                config.board_size,
                board.size()
            );
            config.board_size = board.size();
        }
        let difficulty = config.difficulty;
        let mut session = Self {
            config,
            board,
            mode,
            difficulty,
            current: Player::Red,
            status: GameStatus::Ready,
            last_move: None,
            generation: 0,
            ai_state: AiState::Idle,
            engine: AIEngine::new(),
            reward_hook: None,
        };
        info!(
            "new {0}x{0} session, {1:?}, {2}",
            session.board.size(),
            mode,
            difficulty
        );
        session.request_ai_move();
        session
    }

    /// Rebuild a session from validated parts. Used by snapshot restore.
    pub(super) fn from_parts(
        config: GameConfig,
        board: Board,
        mode: GameMode,
        difficulty: Difficulty,
        current: Player,
        status: GameStatus,
        last_move: Option<Move>,
    ) -> Self {
        let mut session = Self {
            config,
            board,
            mode,
            difficulty,
            current,
            status,
            last_move,
            generation: 0,
            ai_state: AiState::Idle,
            engine: AIEngine::new(),
            reward_hook: None,
        };
        session.request_ai_move();
        session
    }

    #[must_use]
    pub fn with_reward_hook(mut self, hook: impl FnMut(RewardEvent) + 'static) -> Self {
        self.set_reward_hook(hook);
        self
    }

    /// Install the host callback for human wins. Survives resets.
    pub fn set_reward_hook(&mut self, hook: impl FnMut(RewardEvent) + 'static) {
        self.reward_hook = Some(Box::new(hook));
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Search profile of the active difficulty
    pub fn profile(&self) -> DifficultyProfile {
        self.config.profile(self.difficulty)
    }

    /// Side to move
    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Bumped by every reset, mode change and difficulty change
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_human_turn(&self) -> bool {
        !self.status.is_over() && self.mode.is_human(self.current)
    }

    pub fn is_ai_turn(&self) -> bool {
        !self.status.is_over() && !self.mode.is_human(self.current)
    }

    pub fn is_ai_pending(&self) -> bool {
        matches!(self.ai_state, AiState::Scheduled { .. })
    }

    pub fn pending_ticket(&self) -> Option<AiTicket> {
        match self.ai_state {
            AiState::Scheduled { ticket, .. } => Some(ticket),
            AiState::Idle => None,
        }
    }

    /// When the pending AI move becomes due
    pub fn ai_due(&self) -> Option<Instant> {
        match self.ai_state {
            AiState::Scheduled { due, .. } => Some(due),
            AiState::Idle => None,
        }
    }

    /// Chain of winning stones from start edge to far edge, once decided.
    pub fn winning_path(&self) -> Option<Vec<Pos>> {
        self.status
            .winner()
            .and_then(|winner| find_winning_path(&self.board, winner))
    }

    /// Place a stone for the side to move on behalf of a human.
    ///
    /// Rejected moves leave the session untouched. In solo mode a successful
    /// move that hands the turn to the AI schedules its reply.
    pub fn apply_move(&mut self, row: usize, col: usize) -> Result<GameStatus, MoveError> {
        let pos = self.board.pos(row, col)?;

        if self.status.is_over() {
            return Err(IllegalMove::GameOver.into());
        }
        if self.is_ai_pending() {
            return Err(IllegalMove::AwaitingAi.into());
        }
        if !self.is_human_turn() {
            return Err(IllegalMove::NotYourTurn.into());
        }
        if !self.board.is_empty_at(pos) {
            return Err(IllegalMove::Occupied.into());
        }

        let status = self.place(pos);
        self.request_ai_move();
        Ok(status)
    }

    /// Schedule the AI's move if it is the AI's turn. Returns the ticket of
    /// the pending move, which is the existing one if already scheduled.
    pub fn request_ai_move(&mut self) -> Option<AiTicket> {
        self.request_ai_move_at(Instant::now())
    }

    /// [`request_ai_move`](Self::request_ai_move) with an explicit clock.
    pub fn request_ai_move_at(&mut self, now: Instant) -> Option<AiTicket> {
        if let AiState::Scheduled { ticket, .. } = self.ai_state {
            return Some(ticket);
        }
        if !self.is_ai_turn() {
            return None;
        }

        let ticket = AiTicket {
            generation: self.generation,
        };
        let due = now + self.profile().think_delay();
        self.ai_state = AiState::Scheduled { ticket, due };
        debug!(
            "AI move scheduled for {} (generation {}, delay {}ms)",
            self.current.name(),
            self.generation,
            self.profile().think_delay_ms
        );
        Some(ticket)
    }

    /// Fire the pending AI move if its delay has elapsed.
    pub fn poll(&mut self) -> Option<AiMoveReport> {
        self.poll_at(Instant::now())
    }

    /// [`poll`](Self::poll) with an explicit clock.
    pub fn poll_at(&mut self, now: Instant) -> Option<AiMoveReport> {
        match self.ai_state {
            AiState::Scheduled { ticket, due } if now >= due => self.run_ai_move(ticket).ok(),
            _ => None,
        }
    }

    /// Run the AI move for `ticket` now, ignoring its delay.
    ///
    /// Fails if the ticket was issued before the last reset, mode change or
    /// difficulty change, or if nothing is pending.
    pub fn run_ai_move(&mut self, ticket: AiTicket) -> Result<AiMoveReport, AiMoveError> {
        if ticket.generation != self.generation {
            return Err(AiMoveError::StaleTicket {
                ticket: ticket.generation,
                current: self.generation,
            });
        }
        if !self.is_ai_pending() {
            return Err(AiMoveError::NothingPending);
        }
        self.ai_state = AiState::Idle;

        let player = self.current;
        let profile = self.profile();
        let result = self.engine.choose_move(&self.board, player, &profile);

        let status = match result.best_move {
            Some(pos) => self.place(pos),
            None => {
                info!("{} has no move, game drawn", player.name());
                self.status = GameStatus::Draw;
                self.status
            }
        };

        Ok(AiMoveReport {
            player,
            result,
            status,
        })
    }

    /// Start over with an empty board, keeping mode and difficulty.
    pub fn reset(&mut self) {
        self.rebuild();
    }

    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
        self.rebuild();
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.rebuild();
    }

    /// Fresh board at the current size; any pending AI move is dropped and
    /// its ticket goes stale.
    fn rebuild(&mut self) {
        if self.is_ai_pending() {
            debug!("cancelling pending AI move (generation {})", self.generation);
        }
        self.generation += 1;
        self.board = Board::new(self.board.size());
        self.current = Player::Red;
        self.status = GameStatus::Ready;
        self.last_move = None;
        self.ai_state = AiState::Idle;
        info!(
            "session rebuilt: {:?}, {} (generation {})",
            self.mode, self.difficulty, self.generation
        );
        self.request_ai_move();
    }

    /// Put the side to move's stone on `pos` and advance the state machine.
    fn place(&mut self, pos: Pos) -> GameStatus {
        let mover = self.current;
        self.board.put(pos, mover.to_cell());
        self.last_move = Some(Move::new(pos, mover));
        self.status = GameStatus::InProgress;

        if has_connection(&self.board, mover) {
            self.status = GameStatus::Won(mover);
            info!("{} wins with {}", mover.name(), pos);
            self.reward(mover);
        } else if self.board.is_full() {
            self.status = GameStatus::Draw;
            info!("board full, game drawn");
        } else {
            self.current = mover.opponent();
        }
        self.status
    }

    fn reward(&mut self, winner: Player) {
        if !matches!(self.mode, GameMode::Solo { human } if human == winner) {
            return;
        }
        let event = RewardEvent {
            winner,
            difficulty: self.difficulty,
            tier: self.profile().reward_tier,
        };
        if let Some(hook) = self.reward_hook.as_mut() {
            debug!("reward: {:?}", event);
            hook(event);
        }
    }
}
