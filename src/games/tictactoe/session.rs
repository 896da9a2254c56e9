//! Tic-tac-toe session: turn handling, opponent think time, scoreboard.

use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::ai::compute_opponent_move;
use super::board::{evaluate, winning_line, Board, Mark, Outcome};
use crate::core::{GameKind, GameRng, RandomSource, Scheduler, TaskHandle, TimedSession, Timings};
use crate::leaderboard::{LeaderboardStore, NamePrompt, PendingPrompt, PromptSlot, Storage};

/// Delayed steps owned by a tic-tac-toe session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Task {
    OpponentMove,
}

/// Reported when a delayed step fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicTacToeEvent {
    /// The opponent marked `index`.
    OpponentMoved { index: usize },
    /// The opponent's move ended the game.
    Finished(Outcome),
}

/// Read-only view for rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToeSnapshot {
    pub board: Board,
    pub turn: Mark,
    pub outcome: Outcome,
    pub winning_line: Option<[usize; 3]>,
    /// The opponent's move is scheduled but not yet placed.
    pub thinking: bool,
    pub player_wins: u32,
    pub opponent_wins: u32,
    pub prompt: Option<PendingPrompt>,
}

/// One tic-tac-toe session. The player (`X`) always moves first.
pub struct TicTacToe<R: RandomSource = GameRng> {
    board: Board,
    turn: Mark,
    outcome: Outcome,
    player_wins: u32,
    opponent_wins: u32,
    think: Duration,
    /// Scheduled opponent move, while the opponent is thinking.
    pending_move: Option<TaskHandle>,
    rng: R,
    scheduler: Scheduler<Task>,
    prompt: PromptSlot,
    torn_down: bool,
}

impl<R: RandomSource> TicTacToe<R> {
    #[must_use]
    pub fn new(rng: R, timings: &Timings) -> Self {
        Self {
            board: Board::new(),
            turn: Mark::Player,
            outcome: Outcome::InProgress,
            player_wins: 0,
            opponent_wins: 0,
            think: timings.think(),
            pending_move: None,
            rng,
            scheduler: Scheduler::new(),
            prompt: PromptSlot::new(),
            torn_down: false,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn turn(&self) -> Mark {
        self.turn
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[must_use]
    pub fn player_wins(&self) -> u32 {
        self.player_wins
    }

    #[must_use]
    pub fn opponent_wins(&self) -> u32 {
        self.opponent_wins
    }

    /// Whether the opponent's move is scheduled but not yet placed.
    #[must_use]
    pub fn is_thinking(&self) -> bool {
        self.pending_move
            .map_or(false, |handle| self.scheduler.is_pending(handle))
    }

    #[must_use]
    pub fn pending_prompt(&self) -> Option<PendingPrompt> {
        self.prompt.pending()
    }

    #[must_use]
    pub fn snapshot(&self) -> TicTacToeSnapshot {
        TicTacToeSnapshot {
            board: self.board,
            turn: self.turn,
            outcome: self.outcome,
            winning_line: winning_line(&self.board),
            thinking: self.is_thinking(),
            player_wins: self.player_wins,
            opponent_wins: self.opponent_wins,
            prompt: self.prompt.pending(),
        }
    }

    /// Mark `index` for the player and hand the turn to the opponent.
    ///
    /// Ignored (returns `false`) if the cell is taken or off the board, the
    /// game is decided, or it is not the player's turn.
    pub fn apply_player_move(&mut self, index: usize) -> bool {
        if self.torn_down || self.outcome.is_decided() || self.turn != Mark::Player {
            return false;
        }
        if !self.board.place(index, Mark::Player) {
            return false;
        }
        debug!(target: "tictactoe", "Player marked {}", index);

        let outcome = evaluate(&self.board);
        if outcome.is_decided() {
            self.finish(outcome);
        } else {
            self.turn = Mark::Opponent;
            let handle = self.scheduler.schedule(self.think, Task::OpponentMove);
            debug!(target: "tictactoe", "Opponent moves at {:?}", handle.due());
            self.pending_move = Some(handle);
        }
        true
    }

    /// Clear the board for a new game. Session scores and any open name
    /// prompt are kept; a scheduled opponent move is cancelled.
    pub fn reset(&mut self) {
        if self.torn_down {
            return;
        }
        if let Some(handle) = self.pending_move.take() {
            self.scheduler.cancel(handle);
        }
        self.board = Board::new();
        self.turn = Mark::Player;
        self.outcome = Outcome::InProgress;
        debug!(target: "tictactoe", "Board reset");
    }

    /// Save a name for the open prompt (one win on the leaderboard).
    pub fn save_name<S: Storage>(&mut self, store: &mut LeaderboardStore<S>, name: &str) -> bool {
        self.prompt.save(store, name)
    }

    /// Ask `prompter` for a name and save it.
    pub fn resolve_prompt<S: Storage, P: NamePrompt + ?Sized>(
        &mut self,
        store: &mut LeaderboardStore<S>,
        prompter: &mut P,
    ) -> bool {
        self.prompt.resolve(store, prompter)
    }

    pub fn dismiss_prompt(&mut self) -> Option<PendingPrompt> {
        self.prompt.dismiss()
    }

    fn run(&mut self, task: Task, events: &mut Vec<TicTacToeEvent>) {
        match task {
            Task::OpponentMove => {
                self.pending_move = None;
                if self.outcome.is_decided() || self.turn != Mark::Opponent {
                    return;
                }
                if let Some(index) = compute_opponent_move(&self.board, &mut self.rng) {
                    self.board.place(index, Mark::Opponent);
                    debug!(target: "tictactoe", "Opponent marked {}", index);
                    events.push(TicTacToeEvent::OpponentMoved { index });
                }
                self.turn = Mark::Player;

                let outcome = evaluate(&self.board);
                if outcome.is_decided() {
                    self.finish(outcome);
                    events.push(TicTacToeEvent::Finished(outcome));
                }
            }
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.outcome = outcome;
        match outcome {
            Outcome::PlayerWins => {
                self.player_wins += 1;
                self.prompt.offer(GameKind::TicTacToe, 1);
            }
            Outcome::OpponentWins => self.opponent_wins += 1,
            Outcome::Draw | Outcome::InProgress => {}
        }
        debug!(target: "tictactoe", "Game over: {:?}", outcome);
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, turn: Mark) {
        self.board = board;
        self.turn = turn;
        self.outcome = evaluate(&board);
    }
}

impl<R: RandomSource> TimedSession for TicTacToe<R> {
    type Event = TicTacToeEvent;

    fn advance(&mut self, elapsed: Duration) -> Vec<TicTacToeEvent> {
        let mut events = Vec::new();
        if self.torn_down {
            return events;
        }
        let until = self.scheduler.now() + elapsed;
        while let Some(task) = self.scheduler.pop_due(until) {
            self.run(task, &mut events);
        }
        self.scheduler.settle(until);
        events
    }

    fn teardown(&mut self) {
        self.scheduler.cancel_all();
        self.torn_down = true;
        debug!(target: "tictactoe", "Session torn down");
    }

    fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn is_busy(&self) -> bool {
        !self.scheduler.is_idle()
    }
}
