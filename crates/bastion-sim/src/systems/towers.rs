//! Tower system: stun recovery, target acquisition, cooldowns, and firing.
//!
//! Per tower, per tick:
//! - Stunned: only the stun timer advances; on expiry the tower goes Idle.
//! - A held target that died, left, or moved out of range is dropped and a
//!   new one is sought in the same tick.
//! - A newly acquired target puts the tower in Acquiring; the cooldown
//!   starts advancing on the next tick, in Engaging.
//! - Engaging: the cooldown advances, and on expiry the tower fires and the
//!   cooldown resets to one full interval.
//!
//! Direct damage is applied as each tower fires, so a later tower in the
//! same pass sees the result and retargets.

use glam::DVec3;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use bastion_core::catalog::AttackMode;
use bastion_core::components::{Armament, EnemyState, TowerState};
use bastion_core::enums::TowerPhase;
use bastion_core::events::GameEvent;
use bastion_core::types::{Countdown, Position};

use crate::collaborators::Collaborators;
use crate::combat;
use crate::registry::{self, SpatialQuery};
use crate::world_setup;

/// Run every tower for one tick. Returns how many enemies died to direct
/// hits.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    collaborators: &mut Collaborators,
    events: &mut Vec<GameEvent>,
) -> u32 {
    let towers: Vec<(Entity, DVec3, TowerState, Armament)> = world
        .query::<(&Position, &TowerState, &Armament)>()
        .iter()
        .map(|(entity, (pos, state, arm))| (entity, pos.0, *state, *arm))
        .collect();

    let mut killed = 0;
    for (entity, position, mut state, armament) in towers {
        let shot = update_tower(world, entity, position, &mut state, &armament, events);
        if let Ok(mut slot) = world.get::<&mut TowerState>(entity) {
            *slot = state;
        }
        if let Some(target) = shot {
            killed += fire(
                world,
                rng,
                entity,
                position,
                target,
                &armament,
                collaborators,
                events,
            );
        }
    }
    killed
}

/// Advance one tower's state machine. Returns the enemy to fire at, if the
/// tower fires this tick.
fn update_tower(
    world: &World,
    entity: Entity,
    position: DVec3,
    state: &mut TowerState,
    armament: &Armament,
    events: &mut Vec<GameEvent>,
) -> Option<Entity> {
    match state.phase {
        TowerPhase::Destroyed => return None,
        TowerPhase::Stunned => {
            if state.stun.tick() {
                state.phase = TowerPhase::Idle;
                let tower = registry::tower_handle(entity);
                debug!(?tower, "tower recovered from stun");
                events.push(GameEvent::TowerUnstunned { tower });
            }
            return None;
        }
        TowerPhase::Idle | TowerPhase::Acquiring | TowerPhase::Engaging => {}
    }

    let held = state
        .target
        .and_then(|handle| registry::living_enemy(world, handle))
        .filter(|&enemy| in_range(world, enemy, position, armament.range));

    let Some(target) = held else {
        state.target = None;
        let found = world.nearest_enemy(position, armament.range, |_, e: &EnemyState| {
            e.is_alive()
        });
        match found {
            Some(enemy) => {
                state.target = Some(registry::enemy_handle(enemy));
                state.phase = TowerPhase::Acquiring;
                face(world, state, position, enemy);
            }
            None => state.phase = TowerPhase::Idle,
        }
        return None;
    };

    state.phase = TowerPhase::Engaging;
    face(world, state, position, target);
    if state.cooldown.tick() {
        state.cooldown = Countdown::from_secs(armament.fire_interval_secs());
        return Some(target);
    }
    None
}

fn in_range(world: &World, enemy: Entity, from: DVec3, range: f64) -> bool {
    registry::position_of(world, enemy).is_some_and(|p| p.distance_squared(from) <= range * range)
}

fn face(world: &World, state: &mut TowerState, from: DVec3, enemy: Entity) {
    if let Some(p) = registry::position_of(world, enemy) {
        let dir = (p - from).normalize_or_zero();
        if dir != DVec3::ZERO {
            state.facing = dir;
        }
    }
}

/// Fire at `target`: direct damage lands now, projectile kinds launch a
/// projectile. Returns how many enemies the shot killed outright.
#[allow(clippy::too_many_arguments)]
fn fire(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    tower: Entity,
    origin: DVec3,
    target: Entity,
    armament: &Armament,
    collaborators: &mut Collaborators,
    events: &mut Vec<GameEvent>,
) -> u32 {
    let mut damage = armament.damage;
    if let Some(crit) = armament.critical {
        if rng.gen_bool(crit.chance.clamp(0.0, 1.0)) {
            damage = (damage as f64 * crit.multiplier).round() as u32;
            trace!(tower = ?registry::tower_handle(tower), damage, "critical hit");
        }
    }

    let tower_handle = registry::tower_handle(tower);
    let target_handle = registry::enemy_handle(target);
    trace!(tower = ?tower_handle, target = ?target_handle, damage, "tower fired");
    events.push(GameEvent::TowerFired {
        tower: tower_handle,
        target: target_handle,
    });

    match armament.attack {
        AttackMode::Direct => combat::apply_hit(world, target, damage, collaborators, events),
        AttackMode::Projectile { speed, resolution } => {
            world_setup::spawn_projectile(
                world,
                origin,
                tower_handle,
                target_handle,
                speed,
                damage,
                resolution,
            );
            0
        }
    }
}
