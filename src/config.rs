/// Tunable constants for a run.
///
/// Every struct here is plain data with a `Default` matching the classic
/// 800×600 layout.  A RON document may override any subset of fields;
/// anything it leaves out keeps its default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Errors ────────────────────────────────────────────────────────────────────

/// Failures while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// RON parsing failed.
    #[error("config parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// A value parsed fine but describes impossible geometry.
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

// ── Sections ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self { width: 800.0, height: 600.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    /// Horizontal distance covered per frame while a move intent is held.
    pub speed: f32,
    /// Gap between the player's top edge and the arena bottom.
    pub bottom_margin: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self { width: 40.0, height: 20.0, speed: 5.0, bottom_margin: 60.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub pool_size: usize,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Minimum time between two successful shots.
    pub cooldown_ms: u64,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self { pool_size: 20, width: 5.0, height: 10.0, speed: 7.0, cooldown_ms: 500 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub rows: usize,
    pub cols: usize,
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    /// Formation speed, applied to every active enemy each frame.
    pub speed: f32,
    /// How far the formation drops when it bounces off a wall.
    pub descent_step: f32,
    /// One-frame correction applied after a bounce so the grid leaves the wall.
    pub edge_nudge: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            rows: 4,
            cols: 8,
            width: 40.0,
            height: 20.0,
            padding: 10.0,
            offset_x: 60.0,
            offset_y: 50.0,
            speed: 1.0,
            descent_step: 20.0,
            edge_nudge: 1.0,
        }
    }
}

// ── Whole config ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub arena: ArenaConfig,
    pub player: PlayerConfig,
    pub bullets: BulletConfig,
    pub enemies: EnemyConfig,
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason: format!("must be positive, got {value}") })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason: format!("must not be negative, got {value}") })
    }
}

fn nonzero(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if value > 0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason: "must be at least 1".to_string() })
    }
}

impl GameConfig {
    /// Parse a (possibly partial) RON document and validate it.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron_str(&text)
    }

    /// Check that every size and count describes real geometry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("arena.width", self.arena.width)?;
        positive("arena.height", self.arena.height)?;

        positive("player.width", self.player.width)?;
        positive("player.height", self.player.height)?;
        non_negative("player.speed", self.player.speed)?;
        positive("player.bottom_margin", self.player.bottom_margin)?;
        if self.player.width > self.arena.width {
            return Err(ConfigError::Invalid {
                field: "player.width",
                reason: "player is wider than the arena".to_string(),
            });
        }
        if self.player.bottom_margin > self.arena.height {
            return Err(ConfigError::Invalid {
                field: "player.bottom_margin",
                reason: "player would start above the arena".to_string(),
            });
        }

        nonzero("bullets.pool_size", self.bullets.pool_size)?;
        positive("bullets.width", self.bullets.width)?;
        positive("bullets.height", self.bullets.height)?;
        positive("bullets.speed", self.bullets.speed)?;

        nonzero("enemies.rows", self.enemies.rows)?;
        nonzero("enemies.cols", self.enemies.cols)?;
        positive("enemies.width", self.enemies.width)?;
        positive("enemies.height", self.enemies.height)?;
        non_negative("enemies.padding", self.enemies.padding)?;
        non_negative("enemies.speed", self.enemies.speed)?;
        non_negative("enemies.descent_step", self.enemies.descent_step)?;
        non_negative("enemies.edge_nudge", self.enemies.edge_nudge)?;
        Ok(())
    }
}
