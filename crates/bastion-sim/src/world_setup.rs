//! Entity spawn factories.
//!
//! Creates enemies, towers, and projectiles with their component bundles.
//! Kind-specific behavior is attached as capability components taken from
//! the catalog stats.

use std::sync::Arc;

use glam::DVec3;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bastion_core::catalog::{Catalog, EnemyStats, Resolution, TowerStats};
use bastion_core::components::*;
use bastion_core::constants::PROJECTILE_LIFETIME_SECS;
use bastion_core::enums::*;
use bastion_core::error::SpawnError;
use bastion_core::types::{CellCoord, Countdown, EnemyHandle, Position, TowerHandle};
use bastion_grid::Grid;

use crate::registry;
use crate::systems::wave_spawner::EnemySpawner;

/// Spawn an enemy at the start of `path`.
pub fn spawn_enemy(
    world: &mut World,
    kind: EnemyKind,
    stats: &EnemyStats,
    path: Arc<[DVec3]>,
) -> Entity {
    let start = path.first().copied().unwrap_or(DVec3::ZERO);
    let state = EnemyState {
        kind,
        phase: EnemyPhase::Spawned,
        health: stats.max_health,
        max_health: stats.max_health,
        base_speed: stats.speed,
        contact_damage: stats.contact_damage,
        bounty: stats.bounty,
        score_value: stats.score_value,
        damage_resistance: stats.damage_resistance,
    };
    let effects = StatusEffects {
        slow: None,
        boost: stats.speed_boost.map(BoostCycle::new),
    };

    let entity = world.spawn((Position(start), state, PathFollower::new(path), effects));
    if let Some(splash) = stats.death_splash {
        let _ = world.insert_one(entity, Splash(splash));
    }
    if let Some(attack) = stats.tower_attack {
        let _ = world.insert_one(entity, TowerAssault::new(attack));
    }
    entity
}

/// Spawn a tower on `cell`. The first shot comes one full fire interval
/// after the tower starts engaging.
pub fn spawn_tower(
    world: &mut World,
    kind: TowerKind,
    stats: &TowerStats,
    cell: CellCoord,
    position: DVec3,
) -> Entity {
    let state = TowerState {
        kind,
        phase: TowerPhase::Idle,
        cell,
        target: None,
        cooldown: Countdown::from_secs(stats.fire_interval_secs()),
        stun: Countdown::expired(),
        health: stats.max_health,
        max_health: stats.max_health,
        facing: DVec3::X,
    };
    let armament = Armament {
        range: stats.range,
        fire_rate: stats.fire_rate,
        damage: stats.damage,
        attack: stats.attack,
        critical: stats.critical,
    };
    world.spawn((Position(position), state, armament))
}

/// Launch a projectile from `origin` at `target`.
pub fn spawn_projectile(
    world: &mut World,
    origin: DVec3,
    source: TowerHandle,
    target: EnemyHandle,
    speed: f64,
    damage: u32,
    resolution: Resolution,
) -> Entity {
    world.spawn((
        Position(origin),
        Projectile {
            source,
            target,
            speed,
            damage,
            resolution,
            lifetime: Countdown::from_secs(PROJECTILE_LIFETIME_SECS),
        },
    ))
}

/// Spawns wave enemies into the world at a randomly chosen spawn point.
pub struct WorldSpawner<'a> {
    pub world: &'a mut World,
    pub grid: &'a Grid,
    pub catalog: &'a Catalog,
    pub rng: &'a mut ChaCha8Rng,
}

impl EnemySpawner for WorldSpawner<'_> {
    fn spawn(&mut self, kind: EnemyKind) -> Result<EnemyHandle, SpawnError> {
        let spawn_points = self.grid.spawn_points();
        if spawn_points.is_empty() {
            return Err(SpawnError::NoSpawnPoints);
        }
        let spawn = spawn_points[self.rng.gen_range(0..spawn_points.len())];
        let path = self.grid.path_from(spawn).ok_or(SpawnError::NoPath(spawn))?;
        let stats = self
            .catalog
            .enemy(kind)
            .map_err(|_| SpawnError::UnknownEnemyKind(kind))?;
        let entity = spawn_enemy(self.world, kind, stats, path);
        Ok(registry::enemy_handle(entity))
    }
}
