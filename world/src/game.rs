//! Timer and progress state of a single run.

use std::time::Duration;

use tracing::{info, warn};

/// Lifecycle of a run. Timestamps are measured on the in-game clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GamePhase {
    /// No run has started since the last reset.
    #[default]
    Unstarted,
    /// A run is in progress.
    Running {
        /// Execution time at which the run started.
        started_at: Duration,
    },
    /// The run ended because its time ran out.
    Finished {
        /// Execution time at which the run started.
        started_at: Duration,
    },
}

/// Timer and floor-count state for the current run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    phase: GamePhase,
    floor_number: u32,
    time_limit: Duration,
}

impl Game {
    /// Creates an unstarted game whose runs last `time_limit`.
    #[must_use]
    pub const fn new(time_limit: Duration) -> Self {
        Self {
            phase: GamePhase::Unstarted,
            floor_number: 1,
            time_limit,
        }
    }

    /// Returns to the unstarted phase and clears progress.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Unstarted;
        self.floor_number = 1;
    }

    /// Starts a new run at `now`, beginning on floor one.
    pub fn start(&mut self, now: Duration) {
        self.phase = GamePhase::Running { started_at: now };
        self.floor_number = 1;
        info!(started_at = ?now, "game started");
    }

    /// Counts one more floor reached. Only valid while running.
    pub fn increment_floor_number(&mut self) {
        if !self.is_running() {
            warn!(phase = ?self.phase, "ignored floor increment outside a running game");
            return;
        }
        self.floor_number += 1;
        info!(floor = self.floor_number, "hero ascended");
    }

    /// Ends the running game. Terminal until the next reset and start.
    pub fn finish(&mut self) {
        let GamePhase::Running { started_at } = self.phase else {
            warn!(phase = ?self.phase, "ignored finish outside a running game");
            return;
        };
        self.phase = GamePhase::Finished { started_at };
        info!(floor = self.floor_number, "game finished");
    }

    /// Time left in the run at `now`, never below zero.
    ///
    /// Returns the full time limit when no run has started.
    #[must_use]
    pub fn calculate_remaining_time(&self, now: Duration) -> Duration {
        match self.started_at() {
            Some(started_at) => self
                .time_limit
                .saturating_sub(now.saturating_sub(started_at)),
            None => self.time_limit,
        }
    }

    /// Reports whether a run has started, whether or not it has finished since.
    #[must_use]
    pub const fn is_started(&self) -> bool {
        !matches!(self.phase, GamePhase::Unstarted)
    }

    /// Reports whether the run has finished.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self.phase, GamePhase::Finished { .. })
    }

    /// Reports whether a run is in progress.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.phase, GamePhase::Running { .. })
    }

    /// Highest floor reached in the current run; the score.
    #[must_use]
    pub const fn floor_number(&self) -> u32 {
        self.floor_number
    }

    /// Execution time at which the current run started.
    #[must_use]
    pub const fn started_at(&self) -> Option<Duration> {
        match self.phase {
            GamePhase::Unstarted => None,
            GamePhase::Running { started_at } | GamePhase::Finished { started_at } => {
                Some(started_at)
            }
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Length of a single run.
    #[must_use]
    pub const fn time_limit(&self) -> Duration {
        self.time_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: Duration = Duration::from_secs(30);

    #[test]
    fn new_game_is_unstarted() {
        let game = Game::new(LIMIT);
        assert!(!game.is_started());
        assert!(!game.is_finished());
        assert_eq!(game.started_at(), None);
        assert_eq!(game.floor_number(), 1);
    }

    #[test]
    fn start_records_timestamp_and_first_floor() {
        let mut game = Game::new(LIMIT);
        game.start(Duration::from_secs(5));
        assert!(game.is_running());
        assert_eq!(game.started_at(), Some(Duration::from_secs(5)));
        assert_eq!(game.floor_number(), 1);
    }

    #[test]
    fn increment_only_counts_while_running() {
        let mut game = Game::new(LIMIT);
        game.increment_floor_number();
        assert_eq!(game.floor_number(), 1);

        game.start(Duration::ZERO);
        game.increment_floor_number();
        game.increment_floor_number();
        assert_eq!(game.floor_number(), 3);

        game.finish();
        game.increment_floor_number();
        assert_eq!(game.floor_number(), 3);
    }

    #[test]
    fn finish_requires_running_game() {
        let mut game = Game::new(LIMIT);
        game.finish();
        assert!(!game.is_finished());
        assert_eq!(game.phase(), GamePhase::Unstarted);
    }

    #[test]
    fn finished_game_keeps_start_timestamp() {
        let mut game = Game::new(LIMIT);
        game.start(Duration::from_secs(2));
        game.finish();
        assert!(game.is_started());
        assert!(game.is_finished());
        assert_eq!(game.started_at(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn reset_is_idempotent() {
        let mut game = Game::new(LIMIT);
        game.start(Duration::from_secs(1));
        game.increment_floor_number();
        game.reset();
        let once = game.clone();
        game.reset();
        assert_eq!(game, once);
        assert_eq!(game, Game::new(LIMIT));
    }

    #[test]
    fn remaining_time_is_full_limit_before_start() {
        let game = Game::new(LIMIT);
        assert_eq!(game.calculate_remaining_time(Duration::from_secs(100)), LIMIT);
    }

    #[test]
    fn remaining_time_counts_down_and_clamps_at_zero() {
        let mut game = Game::new(LIMIT);
        let started_at = Duration::from_secs(10);
        game.start(started_at);

        assert_eq!(
            game.calculate_remaining_time(started_at + Duration::from_secs(12)),
            Duration::from_secs(18)
        );
        assert_eq!(game.calculate_remaining_time(started_at + LIMIT), Duration::ZERO);
        assert_eq!(
            game.calculate_remaining_time(started_at + LIMIT * 2),
            Duration::ZERO
        );
    }
}
