//! Difficulty presets and TOML configuration.
//!
//! Each named [`Difficulty`] maps to a [`DifficultyProfile`] that bounds the
//! search (depth and branching) and sets the artificial thinking delay.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::board::{DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::error::ConfigError;

/// Fewest candidates searched at any node, however deep.
pub const CANDIDATE_FLOOR: usize = 3;

/// Deepest search a profile may request.
pub const MAX_SEARCH_DEPTH: u8 = 6;

/// Named difficulty presets exposed to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    /// Built-in profile for this preset.
    pub fn preset(self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                search_depth: 1,
                max_candidates: 8,
                think_delay_ms: 350,
                reward_tier: 1,
            },
            Difficulty::Normal => DifficultyProfile {
                search_depth: 2,
                max_candidates: 12,
                think_delay_ms: 500,
                reward_tier: 2,
            },
            Difficulty::Hard => DifficultyProfile {
                search_depth: 3,
                max_candidates: 16,
                think_delay_ms: 700,
                reward_tier: 3,
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            other => Err(ConfigError::Validation(format!(
                "unknown difficulty '{other}' (expected easy, normal or hard)"
            ))),
        }
    }
}

/// Search and pacing parameters for one difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Plies searched, root move included
    pub search_depth: u8,
    /// Candidates searched at the root; halves with every ply below it
    pub max_candidates: usize,
    /// Artificial delay before the AI answers
    pub think_delay_ms: u64,
    /// Passed to the reward hook when the human wins
    pub reward_tier: u32,
}

impl DifficultyProfile {
    #[inline]
    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }

    /// How many candidates to search at a node with `remaining_depth` plies
    /// left. Full width at the root, halving per ply below it, never below
    /// [`CANDIDATE_FLOOR`] (or `max_candidates` if that is smaller).
    pub fn candidate_limit(&self, remaining_depth: u8) -> usize {
        let below_root = u32::from(self.search_depth.saturating_sub(remaining_depth));
        let floor = CANDIDATE_FLOOR.min(self.max_candidates);
        self.max_candidates
            .checked_shr(below_root)
            .unwrap_or(0)
            .max(floor)
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if self.search_depth == 0 || self.search_depth > MAX_SEARCH_DEPTH {
            return Err(ConfigError::Validation(format!(
                "{name}.search_depth must be in 1..={MAX_SEARCH_DEPTH}"
            )));
        }
        if self.max_candidates == 0 {
            return Err(ConfigError::Validation(format!(
                "{name}.max_candidates must be > 0"
            )));
        }
        if self.think_delay_ms > 10_000 {
            return Err(ConfigError::Validation(format!(
                "{name}.think_delay_ms must be <= 10000"
            )));
        }
        Ok(())
    }
}

/// Top-level game configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_size: usize,
    /// Preset selected for new sessions
    pub difficulty: Difficulty,
    pub easy: DifficultyProfile,
    pub normal: DifficultyProfile,
    pub hard: DifficultyProfile,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board_size: DEFAULT_BOARD_SIZE,
            difficulty: Difficulty::default(),
            easy: Difficulty::Easy.preset(),
            normal: Difficulty::Normal.preset(),
            hard: Difficulty::Hard.preset(),
        }
    }
}

impl GameConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(ConfigError::Validation(format!(
                "board_size must be in {MIN_BOARD_SIZE}..={MAX_BOARD_SIZE}"
            )));
        }
        for difficulty in Difficulty::ALL {
            self.profile(difficulty).validate(difficulty.name())?;
        }
        Ok(())
    }

    /// Active profile for a preset.
    pub fn profile(&self, difficulty: Difficulty) -> DifficultyProfile {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Normal => self.normal,
            Difficulty::Hard => self.hard,
        }
    }
}
