//! ECS components for the simulation.
//!
//! These are plain data structs attached to hecs entities. Behavior lives in
//! `bastion-enemy-ai` (pure functions) and the systems in `bastion-sim`.
//! Optional capabilities (speed boost, death splash, tower attack) are
//! separate components, so an entity's kind shows up as which components it
//! carries.

use std::sync::Arc;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::catalog::{AttackMode, CriticalHit, DeathSplash, Resolution, SpeedBoost, TowerAttack};
use crate::enums::*;
use crate::types::{CellCoord, Countdown, EnemyHandle, TowerHandle};

// --- Enemy components ---

/// Core enemy state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyState {
    pub kind: EnemyKind,
    pub phase: EnemyPhase,
    pub health: u32,
    pub max_health: u32,
    /// Unmodified speed in world units per second.
    pub base_speed: f64,
    pub contact_damage: u32,
    pub bounty: u32,
    pub score_value: u32,
    /// Fraction of incoming damage ignored.
    pub damage_resistance: f64,
}

impl EnemyState {
    /// Alive means not terminal and with health left.
    pub fn is_alive(&self) -> bool {
        !self.phase.is_terminal() && self.health > 0
    }
}

/// Position along a shared, read-only path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathFollower {
    pub path: Arc<[DVec3]>,
    /// Index of the vertex currently being walked toward.
    pub next_vertex: usize,
}

impl PathFollower {
    pub fn new(path: Arc<[DVec3]>) -> Self {
        Self {
            path,
            next_vertex: 0,
        }
    }

    pub fn target(&self) -> Option<DVec3> {
        self.path.get(self.next_vertex).copied()
    }

    pub fn is_finished(&self) -> bool {
        self.next_vertex >= self.path.len()
    }
}

/// A timed multiplicative slow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlowEffect {
    /// Speed multiplier while active, `1 - factor`.
    pub multiplier: f64,
    pub remaining: Countdown,
}

/// Where a speed-boosting enemy is in its boost cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BoostPhase {
    /// Waiting for the next boost.
    Charging(Countdown),
    /// Boost active.
    Boosting(Countdown),
}

/// Periodic speed boost state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoostCycle {
    pub params: SpeedBoost,
    pub phase: BoostPhase,
}

impl BoostCycle {
    pub fn new(params: SpeedBoost) -> Self {
        Self {
            params,
            phase: BoostPhase::Charging(Countdown::from_secs(params.interval_secs)),
        }
    }
}

/// Active movement modifiers on an enemy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusEffects {
    pub slow: Option<SlowEffect>,
    pub boost: Option<BoostCycle>,
}

/// On-death splash capability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Splash(pub DeathSplash);

/// Tower-attacking capability and its sub-state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TowerAssault {
    pub params: TowerAttack,
    pub target: Option<TowerHandle>,
    /// Time until the next attack may land. Starts expired.
    pub cooldown: Countdown,
    /// Time until the next search for a tower.
    pub scan: Countdown,
}

impl TowerAssault {
    pub fn new(params: TowerAttack) -> Self {
        Self {
            params,
            target: None,
            cooldown: Countdown::expired(),
            scan: Countdown::expired(),
        }
    }
}

/// Death grace period; the entity is removed when it runs out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dying(pub Countdown);

// --- Tower components ---

/// Core tower state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TowerState {
    pub kind: TowerKind,
    pub phase: TowerPhase,
    pub cell: CellCoord,
    pub target: Option<EnemyHandle>,
    /// Time until the next shot. Only advances while engaging.
    pub cooldown: Countdown,
    /// Remaining stun. Only meaningful while Stunned.
    pub stun: Countdown,
    pub health: u32,
    pub max_health: u32,
    /// Unit vector toward the current target (presentation only).
    pub facing: DVec3,
}

impl TowerState {
    pub fn is_destroyed(&self) -> bool {
        self.phase == TowerPhase::Destroyed
    }
}

/// Weapon parameters copied from the catalog at placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Armament {
    pub range: f64,
    pub fire_rate: f64,
    pub damage: u32,
    pub attack: AttackMode,
    pub critical: Option<CriticalHit>,
}

impl Armament {
    pub fn fire_interval_secs(&self) -> f64 {
        1.0 / self.fire_rate
    }
}

// --- Projectile components ---

/// A projectile in flight toward an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub source: TowerHandle,
    pub target: EnemyHandle,
    /// World units per second.
    pub speed: f64,
    pub damage: u32,
    pub resolution: Resolution,
    pub lifetime: Countdown,
}
