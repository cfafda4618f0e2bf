//! Game configuration.
//!
//! `GameConfig` carries everything the engine needs to know about a game
//! before it starts: board dimensions, deck size, the matching-set size,
//! countdown and freeze durations, and the artificial placement delay used
//! to make slot races observable in tests.
//!
//! The engine never interprets card contents; the matching predicate does.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::ConfigError;

/// Complete game configuration.
///
/// Build with `GameConfig::new(players, rows, columns)` and the `with_*`
/// methods, then `validate()` before handing it to the engine.
///
/// ## Example
///
/// ```
/// use std::time::Duration;
/// use matchboard::core::GameConfig;
///
/// let config = GameConfig::new(2, 3, 4)
///     .with_deck_size(81)
///     .with_feature_size(3)
///     .with_turn_timeout(Duration::from_secs(60));
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.table_size(), 12);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    /// Total number of players (human + synthetic).
    pub players: usize,

    /// Number of human players; ids `0..human_players` receive no
    /// synthetic-action sibling thread.
    pub human_players: usize,

    /// Board rows.
    pub rows: usize,

    /// Board columns.
    pub columns: usize,

    /// Number of distinct cards in the deck.
    pub deck_size: usize,

    /// Size of a matching set (and of each player's token selection).
    pub feature_size: usize,

    /// Countdown duration before a forced board rotation.
    pub turn_timeout: Duration,

    /// Remaining-time threshold below which the countdown display warns.
    pub turn_timeout_warning: Duration,

    /// Freeze duration after a successful claim.
    pub point_freeze: Duration,

    /// Freeze duration after a failed claim.
    pub penalty_freeze: Duration,

    /// Artificial delay applied inside card placement/removal while the slot
    /// lock is held. Zero in production; nonzero widens race windows so they
    /// can be exercised by tests.
    pub table_delay: Duration,

    /// Pacing interval between generated actions of a synthetic player.
    pub synthetic_action_interval: Duration,

    /// Seed for the deterministic RNG (dealing order, synthetic actions).
    pub seed: u64,
}

impl GameConfig {
    /// Create a configuration with the given player count and board shape.
    ///
    /// All players are synthetic by default; durations get conventional
    /// defaults (60s countdown, 5s warning, 1s/3s freezes, no table delay).
    #[must_use]
    pub fn new(players: usize, rows: usize, columns: usize) -> Self {
        Self {
            players,
            human_players: 0,
            rows,
            columns,
            deck_size: 81,
            feature_size: 3,
            turn_timeout: Duration::from_secs(60),
            turn_timeout_warning: Duration::from_secs(5),
            point_freeze: Duration::from_secs(1),
            penalty_freeze: Duration::from_secs(3),
            table_delay: Duration::ZERO,
            synthetic_action_interval: Duration::from_millis(1),
            seed: 0,
        }
    }

    /// Number of slots on the board.
    #[must_use]
    pub fn table_size(&self) -> usize {
        self.rows * self.columns
    }

    /// Set the number of human players (ids `0..n`).
    #[must_use]
    pub fn with_human_players(mut self, n: usize) -> Self {
        self.human_players = n;
        self
    }

    /// Set the deck size.
    #[must_use]
    pub fn with_deck_size(mut self, deck_size: usize) -> Self {
        self.deck_size = deck_size;
        self
    }

    /// Set the matching-set size.
    #[must_use]
    pub fn with_feature_size(mut self, feature_size: usize) -> Self {
        self.feature_size = feature_size;
        self
    }

    /// Set the countdown duration.
    #[must_use]
    pub fn with_turn_timeout(mut self, timeout: Duration) -> Self {
        self.turn_timeout = timeout;
        self
    }

    /// Set the countdown warning threshold.
    #[must_use]
    pub fn with_turn_timeout_warning(mut self, warning: Duration) -> Self {
        self.turn_timeout_warning = warning;
        self
    }

    /// Set the award and penalty freeze durations.
    #[must_use]
    pub fn with_freezes(mut self, point: Duration, penalty: Duration) -> Self {
        self.point_freeze = point;
        self.penalty_freeze = penalty;
        self
    }

    /// Set the artificial placement delay.
    #[must_use]
    pub fn with_table_delay(mut self, delay: Duration) -> Self {
        self.table_delay = delay;
        self
    }

    /// Set the synthetic-action pacing interval.
    #[must_use]
    pub fn with_synthetic_action_interval(mut self, interval: Duration) -> Self {
        self.synthetic_action_interval = interval;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the configuration for internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players == 0 {
            return Err(ConfigError::NoPlayers);
        }
        if self.players > 255 {
            return Err(ConfigError::TooManyPlayers { players: self.players });
        }
        if self.human_players > self.players {
            return Err(ConfigError::TooManyHumans {
                human_players: self.human_players,
                players: self.players,
            });
        }
        if self.table_size() == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if self.table_size() > u16::MAX as usize {
            return Err(ConfigError::BoardTooLarge { slots: self.table_size() });
        }
        if self.feature_size == 0 {
            return Err(ConfigError::ZeroFeatureSize);
        }
        if self.feature_size > self.table_size() {
            return Err(ConfigError::FeatureSizeExceedsBoard {
                feature_size: self.feature_size,
                slots: self.table_size(),
            });
        }
        if self.deck_size < self.feature_size {
            return Err(ConfigError::DeckTooSmall {
                deck_size: self.deck_size,
                feature_size: self.feature_size,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::new(4, 3, 4);
        assert!(config.validate().is_ok());
        assert_eq!(config.table_size(), 12);
        assert_eq!(config.feature_size, 3);
    }

    #[test]
    fn test_zero_players_rejected() {
        let config = GameConfig::new(0, 3, 4);
        assert!(matches!(config.validate(), Err(ConfigError::NoPlayers)));
    }

    #[test]
    fn test_empty_board_rejected() {
        let config = GameConfig::new(2, 0, 4);
        assert!(matches!(config.validate(), Err(ConfigError::EmptyBoard)));
    }

    #[test]
    fn test_feature_size_must_fit_board() {
        let config = GameConfig::new(1, 1, 1).with_feature_size(2).with_deck_size(4);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FeatureSizeExceedsBoard { feature_size: 2, slots: 1 })
        ));
    }

    #[test]
    fn test_deck_must_cover_one_set() {
        let config = GameConfig::new(2, 3, 4).with_deck_size(2);
        assert!(matches!(config.validate(), Err(ConfigError::DeckTooSmall { .. })));
    }

    #[test]
    fn test_humans_bounded_by_players() {
        let config = GameConfig::new(2, 3, 4).with_human_players(3);
        assert!(matches!(config.validate(), Err(ConfigError::TooManyHumans { .. })));
    }

    #[test]
    fn test_builder_chain() {
        let config = GameConfig::new(1, 1, 1)
            .with_feature_size(1)
            .with_deck_size(1)
            .with_turn_timeout(Duration::from_millis(500))
            .with_freezes(Duration::from_millis(10), Duration::from_millis(20))
            .with_seed(7);

        assert!(config.validate().is_ok());
        assert_eq!(config.turn_timeout, Duration::from_millis(500));
        assert_eq!(config.point_freeze, Duration::from_millis(10));
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = GameConfig::new(3, 3, 4).with_seed(42);
        let json = serde_json::to_string(&config).unwrap();
        let restored: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.players, 3);
        assert_eq!(restored.seed, 42);
        assert_eq!(restored.turn_timeout, config.turn_timeout);
    }
}
