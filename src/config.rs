//! Engine and game configuration
//!
//! Every field has a default, so a TOML file only needs the keys it changes:
//!
//! ```toml
//! board_size = 15
//! restricted = "white"
//! vct_depth = 2
//!
//! [weights]
//! bagua = 500
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::board::{Stone, BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::error::ConfigError;
use crate::eval::Weights;
use crate::rules::Rules;
use crate::search::threat::DEFAULT_TOP_K;

/// Who plays under the forbidden-move rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Restricted {
    #[default]
    Black,
    White,
    /// Free gomoku
    None,
}

impl Restricted {
    pub fn stone(self) -> Option<Stone> {
        match self {
            Restricted::Black => Some(Stone::Black),
            Restricted::White => Some(Stone::White),
            Restricted::None => None,
        }
    }
}

impl FromStr for Restricted {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "black" => Ok(Restricted::Black),
            "white" => Ok(Restricted::White),
            "none" => Ok(Restricted::None),
            other => Err(format!("unknown player '{}', expected black, white or none", other)),
        }
    }
}

impl fmt::Display for Restricted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Restricted::Black => "black",
            Restricted::White => "white",
            Restricted::None => "none",
        };
        f.write_str(name)
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Board edge length (5..=16)
    pub board_size: usize,
    pub restricted: Restricted,
    /// Colour that moves first
    pub first_player: Stone,
    /// The opening book is used while fewer stones than this are on the board
    pub opening_plies: u32,
    /// Ply depth of the threat sequence search
    pub vct_depth: i32,
    /// Follow-up threats examined per forced reply
    pub vct_top_k: usize,
    /// Threat search only runs once this many stones are on the board
    pub vct_min_stones: u32,
    /// Seed for the random fallback; entropy when absent
    pub seed: Option<u64>,
    pub weights: Weights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            restricted: Restricted::Black,
            first_player: Stone::Black,
            opening_plies: 4,
            vct_depth: 3,
            vct_top_k: DEFAULT_TOP_K,
            vct_min_stones: 10,
            seed: None,
            weights: Weights::default(),
        }
    }
}

impl EngineConfig {
    /// Rule set implied by [`restricted`](Self::restricted)
    #[inline]
    pub fn rules(&self) -> Rules {
        Rules {
            restricted: self.restricted.stone(),
        }
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        info!(
            board_size = config.board_size,
            restricted = %config.restricted,
            "Config loaded"
        );
        Ok(config)
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(ConfigError::Invalid(format!(
                "board_size must be between {} and {}, got {}",
                MIN_BOARD_SIZE, MAX_BOARD_SIZE, self.board_size
            )));
        }
        if self.first_player == Stone::Empty {
            return Err(ConfigError::Invalid("first_player must be black or white".into()));
        }
        if self.vct_top_k == 0 {
            return Err(ConfigError::Invalid("vct_top_k must be at least 1".into()));
        }
        Ok(())
    }
}
