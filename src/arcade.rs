//! The arcade: one session of each game plus the shared leaderboards.
//!
//! `Arcade` is the explicit view-state object a front end holds. It creates
//! each game with its own random stream and forwards time to every session.
//! The coin flip advances against the arcade's store, which keeps its best
//! streak persisted. Name prompts are answered through it so every game
//! credits the same store.
//!
//! ```
//! use std::time::Duration;
//! use pocket_arcade::{Arcade, ArcadeConfig, GameKind, Timings};
//!
//! let config = ArcadeConfig::default().with_seed(7).with_timings(Timings::instant());
//! let mut arcade = Arcade::in_memory(config);
//!
//! arcade.tictactoe_mut().apply_player_move(0);
//! arcade.advance(Duration::ZERO);
//! assert_eq!(arcade.tictactoe().board().count(pocket_arcade::Mark::Opponent), 1);
//! assert!(arcade.leaderboard(GameKind::TicTacToe).is_empty());
//! ```

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::{ArcadeConfig, GameKind, GameRng, TimedSession};
use crate::games::coinflip::{CoinFlip, CoinFlipEvent, CoinFlipSnapshot, CoinSide};
use crate::games::shell::{ShellEvent, ShellGame, ShellSnapshot};
use crate::games::tictactoe::{TicTacToe, TicTacToeEvent, TicTacToeSnapshot};
use crate::leaderboard::{LeaderboardEntry, LeaderboardStore, MemoryStorage, NamePrompt, PendingPrompt, Storage};

/// Something a session reported during `Arcade::advance`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArcadeEvent {
    TicTacToe(TicTacToeEvent),
    Shell(ShellEvent),
    CoinFlip(CoinFlipEvent),
}

impl ArcadeEvent {
    #[must_use]
    pub fn game(&self) -> GameKind {
        match self {
            ArcadeEvent::TicTacToe(_) => GameKind::TicTacToe,
            ArcadeEvent::Shell(_) => GameKind::ShellGame,
            ArcadeEvent::CoinFlip(_) => GameKind::CoinFlip,
        }
    }
}

/// One game's leaderboard as shown on screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardView {
    pub game: GameKind,
    pub entries: Vec<LeaderboardEntry>,
}

/// Everything a front end needs to draw the arcade.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArcadeSnapshot {
    pub tictactoe: TicTacToeSnapshot,
    pub shell: ShellSnapshot,
    pub coinflip: CoinFlipSnapshot,
    pub leaderboards: Vec<LeaderboardView>,
}

pub struct Arcade<S: Storage = MemoryStorage> {
    config: ArcadeConfig,
    store: LeaderboardStore<S>,
    tictactoe: TicTacToe,
    shell: ShellGame,
    coinflip: CoinFlip,
    torn_down: bool,
}

impl Arcade<MemoryStorage> {
    /// Arcade with leaderboards kept in memory only.
    #[must_use]
    pub fn in_memory(config: ArcadeConfig) -> Self {
        Self::new(MemoryStorage::new(), config)
    }
}

impl<S: Storage> Arcade<S> {
    /// Open the arcade over `storage`.
    ///
    /// The coin-flip session starts from the persisted best streak.
    #[must_use]
    pub fn new(storage: S, config: ArcadeConfig) -> Self {
        let store = LeaderboardStore::with_config(storage, &config);
        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        let best_streak = store.best_streak();

        let tictactoe = TicTacToe::new(rng.for_context(GameKind::TicTacToe.namespace()), &config.timings);
        let shell = ShellGame::new(rng.for_context(GameKind::ShellGame.namespace()), &config);
        let coinflip = CoinFlip::new(rng.for_context(GameKind::CoinFlip.namespace()), &config.timings, best_streak);

        info!(target: "arcade", "Arcade opened (seed {}, best streak {})", rng.seed(), best_streak);
        Self {
            config,
            store,
            tictactoe,
            shell,
            coinflip,
            torn_down: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ArcadeConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &LeaderboardStore<S> {
        &self.store
    }

    #[must_use]
    pub fn tictactoe(&self) -> &TicTacToe {
        &self.tictactoe
    }

    pub fn tictactoe_mut(&mut self) -> &mut TicTacToe {
        &mut self.tictactoe
    }

    #[must_use]
    pub fn shell(&self) -> &ShellGame {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut ShellGame {
        &mut self.shell
    }

    #[must_use]
    pub fn coinflip(&self) -> &CoinFlip {
        &self.coinflip
    }

    /// Toss the coin on `guess`. See [`CoinFlip::flip`].
    pub fn flip_coin(&mut self, guess: CoinSide) -> bool {
        self.coinflip.flip(guess)
    }

    /// Zero the coin-flip streak. See [`CoinFlip::reset`].
    pub fn reset_coin_flip(&mut self) {
        self.coinflip.reset();
    }

    /// Current leaderboard for `game`, best first.
    #[must_use]
    pub fn leaderboard(&self, game: GameKind) -> Vec<LeaderboardEntry> {
        self.store.load(game.namespace())
    }

    #[must_use]
    pub fn best_streak(&self) -> u32 {
        self.store.best_streak()
    }

    #[must_use]
    pub fn pending_prompt(&self, game: GameKind) -> Option<PendingPrompt> {
        match game {
            GameKind::TicTacToe => self.tictactoe.pending_prompt(),
            GameKind::ShellGame => self.shell.pending_prompt(),
            GameKind::CoinFlip => self.coinflip.pending_prompt(),
        }
    }

    /// Save `name` for `game`'s open prompt. See [`PromptSlot::save`].
    ///
    /// [`PromptSlot::save`]: crate::leaderboard::PromptSlot::save
    pub fn save_name(&mut self, game: GameKind, name: &str) -> bool {
        let store = &mut self.store;
        match game {
            GameKind::TicTacToe => self.tictactoe.save_name(store, name),
            GameKind::ShellGame => self.shell.save_name(store, name),
            GameKind::CoinFlip => self.coinflip.save_name(store, name),
        }
    }

    pub fn dismiss_prompt(&mut self, game: GameKind) -> Option<PendingPrompt> {
        match game {
            GameKind::TicTacToe => self.tictactoe.dismiss_prompt(),
            GameKind::ShellGame => self.shell.dismiss_prompt(),
            GameKind::CoinFlip => self.coinflip.dismiss_prompt(),
        }
    }

    /// Ask `prompter` for a name for every open prompt, in game order.
    ///
    /// Returns how many names were saved.
    pub fn resolve_prompts<P: NamePrompt + ?Sized>(&mut self, prompter: &mut P) -> usize {
        let store = &mut self.store;
        let saved = [
            self.tictactoe.resolve_prompt(store, prompter),
            self.shell.resolve_prompt(store, prompter),
            self.coinflip.resolve_prompt(store, prompter),
        ];
        saved.iter().filter(|&&s| s).count()
    }

    /// Move every session's clock forward by `elapsed`.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<ArcadeEvent> {
        let mut events = Vec::new();
        if self.torn_down {
            return events;
        }
        events.extend(self.tictactoe.advance(elapsed).into_iter().map(ArcadeEvent::TicTacToe));
        events.extend(self.shell.advance(elapsed).into_iter().map(ArcadeEvent::Shell));
        events.extend(
            self.coinflip
                .advance(&mut self.store, elapsed)
                .into_iter()
                .map(ArcadeEvent::CoinFlip),
        );
        events
    }

    /// Whether any session has a delayed step waiting.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.tictactoe.is_busy() || self.shell.is_busy() || self.coinflip.is_busy()
    }

    /// End every session. Pending steps never fire and input is ignored.
    pub fn teardown(&mut self) {
        self.tictactoe.teardown();
        self.shell.teardown();
        self.coinflip.teardown();
        self.torn_down = true;
        debug!(target: "arcade", "Arcade torn down");
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    #[must_use]
    pub fn snapshot(&self) -> ArcadeSnapshot {
        ArcadeSnapshot {
            tictactoe: self.tictactoe.snapshot(),
            shell: self.shell.snapshot(),
            coinflip: self.coinflip.snapshot(),
            leaderboards: GameKind::ALL
                .iter()
                .map(|&game| LeaderboardView {
                    game,
                    entries: self.leaderboard(game),
                })
                .collect(),
        }
    }

    /// Close the arcade and hand back the storage backend.
    #[must_use]
    pub fn into_storage(mut self) -> S {
        self.teardown();
        self.store.into_storage()
    }
}
