//! Game state snapshot: the complete visible state handed out after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{CellCoord, EnemyHandle, Position, SimTime, TowerHandle};

/// Complete game state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub scenario: Option<ScenarioId>,
    pub time_scale: f64,
    pub wave: WaveView,
    pub enemies: Vec<EnemyView>,
    pub towers: Vec<TowerView>,
    pub projectiles: Vec<ProjectileView>,
    pub currency: u32,
    pub lives: u32,
    pub score: u32,
    /// Events emitted during this tick, in emission order.
    pub events: Vec<GameEvent>,
}

/// Wave scheduler status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub phase: WavePhase,
    /// 1-based number of the current wave, 0 before the first.
    pub current_wave: u32,
    pub total_waves: u32,
    pub enemies_remaining: u32,
    pub spawning: bool,
    /// Seconds until the next wave while counting down.
    pub countdown_secs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub handle: EnemyHandle,
    pub kind: EnemyKind,
    pub phase: EnemyPhase,
    pub position: Position,
    pub health: u32,
    pub max_health: u32,
    /// Effective speed this tick.
    pub speed: f64,
    pub slowed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerView {
    pub handle: TowerHandle,
    pub kind: TowerKind,
    pub phase: TowerPhase,
    pub cell: CellCoord,
    pub position: Position,
    pub target: Option<EnemyHandle>,
    pub health: u32,
    pub max_health: u32,
    pub stun_remaining_secs: f64,
    /// Facing angle in the ground plane (radians, 0 = +x).
    pub facing: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Position,
    pub target: EnemyHandle,
}
