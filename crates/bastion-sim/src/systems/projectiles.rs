//! Projectile system: homing flight and impact resolution.

use hecs::{Entity, World};
use tracing::trace;

use bastion_core::catalog::Resolution;
use bastion_core::components::{EnemyState, Projectile, StatusEffects};
use bastion_core::events::GameEvent;
use bastion_core::types::Position;
use bastion_enemy_ai::status;

use crate::collaborators::Collaborators;
use crate::combat::{self, Hit};
use crate::registry::{self, SpatialQuery};

/// Move every projectile toward its target's current position. A projectile
/// that can reach the target this tick resolves instead of overshooting.
/// Projectiles whose target is gone, or whose lifetime runs out, vanish
/// without effect. Returns how many enemies died.
pub fn run(
    world: &mut World,
    dt: f64,
    collaborators: &mut Collaborators,
    events: &mut Vec<GameEvent>,
    despawn_buffer: &mut Vec<Entity>,
) -> u32 {
    despawn_buffer.clear();

    let projectiles: Vec<(Entity, Projectile)> = world
        .query::<&Projectile>()
        .iter()
        .map(|(entity, p)| (entity, *p))
        .collect();

    let mut killed = 0;
    for (entity, mut projectile) in projectiles {
        let Some(target) = registry::living_enemy(world, projectile.target) else {
            despawn_buffer.push(entity);
            continue;
        };
        let (Some(from), Some(to)) = (
            registry::position_of(world, entity),
            registry::position_of(world, target),
        ) else {
            despawn_buffer.push(entity);
            continue;
        };

        let travel = projectile.speed * dt;
        if from.distance(to) <= travel {
            if let Ok(mut pos) = world.get::<&mut Position>(entity) {
                pos.0 = to;
            }
            killed += resolve(world, target, &projectile, collaborators, events);
            despawn_buffer.push(entity);
            continue;
        }

        if projectile.lifetime.tick() {
            trace!(target = ?projectile.target, "projectile expired");
            despawn_buffer.push(entity);
            continue;
        }
        let next = from + (to - from).normalize_or_zero() * travel;
        if let Ok(mut pos) = world.get::<&mut Position>(entity) {
            pos.0 = next;
        }
        if let Ok(mut slot) = world.get::<&mut Projectile>(entity) {
            *slot = projectile;
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    killed
}

/// Apply a projectile's effect at its target.
fn resolve(
    world: &mut World,
    target: Entity,
    projectile: &Projectile,
    collaborators: &mut Collaborators,
    events: &mut Vec<GameEvent>,
) -> u32 {
    match projectile.resolution {
        Resolution::Direct => {
            combat::apply_hit(world, target, projectile.damage, collaborators, events)
        }
        Resolution::Area { radius } => {
            let Some(impact) = registry::position_of(world, target) else {
                return 0;
            };
            let victims = world.enemies_within(impact, radius, |_, e: &EnemyState| e.is_alive());
            trace!(victims = victims.len(), radius, "area impact");
            let hits: Vec<Hit> = victims
                .into_iter()
                .map(|target| Hit {
                    target,
                    amount: projectile.damage,
                })
                .collect();
            combat::apply_hits(world, hits, collaborators, events)
        }
        Resolution::Slow {
            factor,
            duration_secs,
        } => {
            let killed =
                combat::apply_hit(world, target, projectile.damage, collaborators, events);
            let alive = world.get::<&EnemyState>(target).is_ok_and(|e| e.is_alive());
            if alive {
                if let Ok(mut effects) = world.get::<&mut StatusEffects>(target) {
                    status::apply_slow(&mut effects, factor, duration_secs);
                }
            }
            killed
        }
    }
}
