use serde::{Deserialize, Serialize};

use crate::*;

/// Win and loss totals, kept for the whole session and never cleared by resets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    wins: u32,
    losses: u32,
}

impl Scoreboard {
    pub const fn wins(self) -> u32 {
        self.wins
    }

    pub const fn losses(self) -> u32 {
        self.losses
    }

    fn record(&mut self, won: bool) {
        if won {
            self.wins = self.wins.saturating_add(1);
        } else {
            self.losses = self.losses.saturating_add(1);
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// No round had ended, nothing changed.
    Idle,
    /// Countdown advanced, this many ticks remain.
    Counting(u8),
    /// Countdown ran out and a new round started.
    Reset,
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Everything one player sees across rounds: the current round, score, auto-reset countdown and
/// the reset confirmation gate.
#[derive(Clone, Debug)]
pub struct GameSession<S = SeededSource> {
    config: GameConfig,
    engine: RoundEngine,
    scoreboard: Scoreboard,
    countdown: Countdown,
    confirming_reset: bool,
    source: S,
}

impl GameSession<SeededSource> {
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::new(config, SeededSource::new(seed))
    }
}

impl<S: BombSource> GameSession<S> {
    /// Starts the first round. Sizes below [`GameConfig::MIN_GRID_SIZE`] are raised to it.
    pub fn new(mut config: GameConfig, mut source: S) -> Self {
        if config.grid_size < GameConfig::MIN_GRID_SIZE {
            log::warn!(
                "grid size {} is too small, using {}",
                config.grid_size,
                GameConfig::MIN_GRID_SIZE
            );
            config.grid_size = GameConfig::MIN_GRID_SIZE;
        }
        let layout = config.ruleset.generate_layout(
            config.grid_size,
            config.initial_bomb_location,
            &mut source,
        );
        Self {
            engine: RoundEngine::new(layout, config.ruleset),
            config,
            scoreboard: Default::default(),
            countdown: Default::default(),
            confirming_reset: false,
            source,
        }
    }

    /// Reveals a cell, scoring and starting the countdown when this ends the round.
    ///
    /// Revealing after the round ended is a no-op rather than an error.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let outcome = match self.engine.reveal(coords) {
            Err(GameError::AlreadyEnded) => {
                log::debug!("ignoring reveal at {:?}, round is over", coords);
                return Ok(RevealOutcome::NoChange);
            }
            result => result?,
        };

        if outcome.ends_round() {
            let won = matches!(outcome, RevealOutcome::Won);
            self.scoreboard.record(won);
            self.countdown.start();
            log::debug!(
                "round {} ({} wins, {} losses)",
                if won { "won" } else { "lost" },
                self.scoreboard.wins(),
                self.scoreboard.losses()
            );
        }

        Ok(outcome)
    }

    /// Advances the auto-reset countdown by one tick.
    pub fn tick(&mut self) -> TickOutcome {
        match self.countdown.tick() {
            CountdownTick::Idle => TickOutcome::Idle,
            CountdownTick::Remaining(remaining) => TickOutcome::Counting(remaining),
            CountdownTick::Expired => {
                log::debug!("countdown expired, starting a new round");
                self.new_round();
                TickOutcome::Reset
            }
        }
    }

    /// Opens the reset confirmation, returns whether anything changed.
    pub fn request_reset(&mut self) -> bool {
        !core::mem::replace(&mut self.confirming_reset, true)
    }

    pub fn cancel_reset(&mut self) -> bool {
        core::mem::replace(&mut self.confirming_reset, false)
    }

    /// Starts a new round at the current size, only when a reset was requested first.
    pub fn confirm_reset(&mut self) -> bool {
        if !self.confirming_reset {
            log::debug!("reset confirmed without a pending request, ignoring");
            return false;
        }
        self.new_round();
        true
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.set_grid_size(difficulty.grid_size());
    }

    /// Switches grid size and starts a new round right away, no confirmation needed.
    pub fn set_grid_size(&mut self, grid_size: Coord) {
        self.config.grid_size = grid_size.max(GameConfig::MIN_GRID_SIZE);
        log::debug!("grid size set to {}", self.config.grid_size);
        self.new_round();
    }

    fn new_round(&mut self) {
        // a fixed bomb location only seeds the first round
        let layout = self
            .config
            .ruleset
            .generate_layout(self.config.grid_size, None, &mut self.source);
        self.engine = RoundEngine::new(layout, self.config.ruleset);
        self.countdown.clear();
        self.confirming_reset = false;
    }
}

impl<S> GameSession<S> {
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn engine(&self) -> &RoundEngine {
        &self.engine
    }

    pub fn scoreboard(&self) -> Scoreboard {
        self.scoreboard
    }

    pub fn countdown(&self) -> Option<u8> {
        self.countdown.remaining()
    }

    pub fn is_confirming_reset(&self) -> bool {
        self.confirming_reset
    }

    pub fn is_game_over(&self) -> bool {
        self.engine.is_over()
    }

    pub fn is_game_won(&self) -> bool {
        self.engine.state().is_won()
    }

    pub fn grid_size(&self) -> Coord {
        self.engine.size()
    }

    /// The preset matching the current size, if any.
    pub fn difficulty(&self) -> Option<Difficulty> {
        Difficulty::from_grid_size(self.grid_size())
    }
}
