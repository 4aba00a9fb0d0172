//! Level configuration: grid layout and wave definitions.
//!
//! Levels are produced by external tooling and loaded once, either from one
//! of the built-in constructors or from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{CellKind, EnemyKind};
use crate::error::ConfigError;
use crate::types::CellCoord;

/// A batch of identical enemies spawned one after another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyGroup {
    pub enemy_kind: EnemyKind,
    pub count: u32,
    /// Delay after each spawn in this group.
    pub spawn_delay_secs: f64,
}

/// One wave: groups spawned strictly in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveDefinition {
    pub groups: Vec<EnemyGroup>,
    /// Delay after a group finishes before the next one starts.
    #[serde(default = "default_delay_between_groups")]
    pub delay_between_groups_secs: f64,
}

fn default_delay_between_groups() -> f64 {
    DEFAULT_DELAY_BETWEEN_GROUPS_SECS
}

impl WaveDefinition {
    /// Total number of enemies this wave will spawn.
    pub fn total_enemy_count(&self) -> u32 {
        self.groups.iter().map(|g| g.count).sum()
    }
}

/// Everything needed to set up one level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub level_number: u32,
    pub name: String,
    pub grid_width: u32,
    pub grid_height: u32,
    #[serde(default = "default_cell_size")]
    pub cell_size: f64,
    /// Cell kinds, flattened as `x + z * grid_width`.
    pub cells: Vec<CellKind>,
    pub waves: Vec<WaveDefinition>,
    #[serde(default = "default_starting_currency")]
    pub starting_currency: u32,
    #[serde(default = "default_starting_lives")]
    pub starting_lives: u32,
    #[serde(default = "default_time_between_waves")]
    pub time_between_waves_secs: f64,
}

fn default_cell_size() -> f64 {
    DEFAULT_CELL_SIZE
}

fn default_starting_currency() -> u32 {
    STARTING_CURRENCY
}

fn default_starting_lives() -> u32 {
    STARTING_LIVES
}

fn default_time_between_waves() -> f64 {
    DEFAULT_TIME_BETWEEN_WAVES_SECS
}

impl LevelConfig {
    /// An all-Empty level of the given size with no waves.
    pub fn blank(level_number: u32, name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            level_number,
            name: name.into(),
            grid_width: width,
            grid_height: height,
            cell_size: DEFAULT_CELL_SIZE,
            cells: vec![CellKind::Empty; (width * height) as usize],
            waves: Vec::new(),
            starting_currency: STARTING_CURRENCY,
            starting_lives: STARTING_LIVES,
            time_between_waves_secs: DEFAULT_TIME_BETWEEN_WAVES_SECS,
        }
    }

    /// The stock level: a straight path across the middle row and three
    /// escalating waves.
    pub fn default_level() -> Self {
        let mut level = Self::blank(1, "Level 1", DEFAULT_GRID_WIDTH, DEFAULT_GRID_HEIGHT);
        let row = (DEFAULT_GRID_HEIGHT / 2) as i32;
        let last = DEFAULT_GRID_WIDTH as i32 - 1;

        level.set_cell(CellCoord::new(0, row), CellKind::SpawnPoint);
        for x in 1..last {
            level.set_cell(CellCoord::new(x, row), CellKind::Path);
        }
        level.set_cell(CellCoord::new(last, row), CellKind::ExitPoint);

        level.waves = (0..3).map(default_wave).collect();
        level
    }

    /// Parse a level from JSON and check it is internally consistent.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let level: Self = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// Load a level from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the cell array matches the grid and the level has somewhere to
    /// spawn enemies.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let expected = self.grid_width as usize * self.grid_height as usize;
        if self.cells.len() != expected {
            return Err(ConfigError::GridSizeMismatch {
                expected,
                actual: self.cells.len(),
            });
        }
        if !self.cells.contains(&CellKind::SpawnPoint) {
            return Err(ConfigError::NoSpawnPoints);
        }
        if !(self.cell_size > 0.0) {
            return Err(ConfigError::InvalidStat(
                "cell_size must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Kind of the cell at `coord`, or Empty outside the grid.
    pub fn cell(&self, coord: CellCoord) -> CellKind {
        self.index_of(coord)
            .and_then(|i| self.cells.get(i).copied())
            .unwrap_or_default()
    }

    /// Set the kind of the cell at `coord`. Out-of-bounds writes are ignored.
    pub fn set_cell(&mut self, coord: CellCoord, kind: CellKind) {
        if let Some(slot) = self.index_of(coord).and_then(|i| self.cells.get_mut(i)) {
            *slot = kind;
        }
    }

    fn index_of(&self, coord: CellCoord) -> Option<usize> {
        if coord.x < 0
            || coord.z < 0
            || coord.x >= self.grid_width as i32
            || coord.z >= self.grid_height as i32
        {
            return None;
        }
        Some(coord.x as usize + coord.z as usize * self.grid_width as usize)
    }

    /// Total enemies across all waves.
    pub fn total_enemy_count(&self) -> u32 {
        self.waves.iter().map(WaveDefinition::total_enemy_count).sum()
    }
}

/// Wave `index` of the stock level: `2 + index` groups alternating Basic
/// with a heavier kind, each `5 + 3 * index` strong.
fn default_wave(index: u32) -> WaveDefinition {
    let heavier = [EnemyKind::Fast, EnemyKind::Tank, EnemyKind::TowerAttacker];
    let groups = (0..2 + index)
        .map(|g| EnemyGroup {
            enemy_kind: if g % 2 == 0 {
                EnemyKind::Basic
            } else {
                heavier[(index as usize) % heavier.len()]
            },
            count: 5 + 3 * index,
            spawn_delay_secs: 1.0,
        })
        .collect();
    WaveDefinition {
        groups,
        delay_between_groups_secs: 5.0,
    }
}
