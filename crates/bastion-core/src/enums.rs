//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// What occupies a grid cell's terrain.
///
/// Serialized as its integer code so level files stay compact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum CellKind {
    /// Buildable ground.
    #[default]
    Empty,
    /// Part of the enemy path.
    Path,
    /// Where enemies enter.
    SpawnPoint,
    /// Where enemies leave (and cost the player lives).
    ExitPoint,
    /// Blocked, not buildable.
    Obstacle,
}

impl CellKind {
    /// Cells enemies may walk on.
    pub fn is_walkable(self) -> bool {
        matches!(self, Self::Path | Self::SpawnPoint | Self::ExitPoint)
    }
}

impl From<CellKind> for u8 {
    fn from(kind: CellKind) -> u8 {
        match kind {
            CellKind::Empty => 0,
            CellKind::Path => 1,
            CellKind::SpawnPoint => 2,
            CellKind::ExitPoint => 3,
            CellKind::Obstacle => 4,
        }
    }
}

impl TryFrom<u8> for CellKind {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Empty),
            1 => Ok(Self::Path),
            2 => Ok(Self::SpawnPoint),
            3 => Ok(Self::ExitPoint),
            4 => Ok(Self::Obstacle),
            other => Err(format!("unknown cell code {other}")),
        }
    }
}

/// Enemy archetypes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Basic,
    /// Light and quick, with a periodic speed boost.
    Fast,
    /// Armored, and bursts on death damaging nearby enemies.
    Tank,
    /// Stuns towers in reach while walking.
    TowerAttacker,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [Self::Basic, Self::Fast, Self::Tank, Self::TowerAttacker];
}

/// Tower archetypes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TowerKind {
    /// Instant direct damage.
    #[default]
    Basic,
    /// Area-of-effect shells.
    AoeCannon,
    /// Long range, slow rate, critical hits.
    Sniper,
    /// Slowing projectiles.
    Slow,
}

impl TowerKind {
    pub const ALL: [TowerKind; 4] = [Self::Basic, Self::AoeCannon, Self::Sniper, Self::Slow];
}

/// Enemy lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyPhase {
    /// Created this tick, not yet moved.
    #[default]
    Spawned,
    /// Following the path.
    Walking,
    /// Following the path while periodically attacking a tower.
    AttackingTower,
    /// Health reached zero; awaiting removal.
    Dead,
    /// Reached the final path vertex.
    ReachedExit,
}

impl EnemyPhase {
    /// Dead and ReachedExit are terminal.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Dead | Self::ReachedExit)
    }
}

/// Tower lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TowerPhase {
    /// No target.
    #[default]
    Idle,
    /// Target acquired this tick; cooldown starts next tick.
    Acquiring,
    /// Tracking a target and firing on cooldown.
    Engaging,
    /// Disabled by an enemy; cooldown frozen.
    Stunned,
    /// Health reached zero; can be repaired.
    Destroyed,
}

/// Wave scheduler phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    /// No level started.
    #[default]
    Idle,
    /// Waiting out the delay before the next wave.
    CountingDown,
    /// Spawning or waiting for the current wave's enemies to resolve.
    Spawning,
    /// Every wave has completed.
    AllComplete,
}

/// Overall game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    Active,
    Paused,
    Victory,
    Defeat,
}

impl GamePhase {
    /// Whether the level has ended one way or the other.
    pub fn is_over(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat)
    }
}

/// Built-in scenario presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioId {
    /// Straight path, three waves.
    #[default]
    Easy,
    /// L-shaped path, more waves.
    Medium,
    /// L-shaped path with obstacles and heavy waves.
    Hard,
}

impl ScenarioId {
    pub const ALL: [ScenarioId; 3] = [Self::Easy, Self::Medium, Self::Hard];
}
