//! Enemy behavior system: tower-attacking enemies search for, stun, and
//! (when towers are destructible) damage towers in reach.
//!
//! Attackers keep walking while they attack; the AttackingTower phase only
//! marks that a tower is held as a target.

use glam::DVec3;
use hecs::{Entity, World};
use tracing::trace;

use bastion_core::catalog::TowerAttack;
use bastion_core::components::{EnemyState, TowerAssault, TowerState};
use bastion_core::enums::EnemyPhase;
use bastion_core::events::GameEvent;
use bastion_core::types::{Position, TowerHandle};
use bastion_enemy_ai::assault::{self, TargetCheck};

use crate::combat;
use crate::registry::{self, SpatialQuery};

/// Run the tower-attack cycle for every living attacker.
pub fn run(world: &mut World, destructible_towers: bool, events: &mut Vec<GameEvent>) {
    let attackers: Vec<(Entity, DVec3, TowerAssault)> = world
        .query::<(&Position, &EnemyState, &TowerAssault)>()
        .iter()
        .filter(|(_, (_, state, _))| state.is_alive())
        .map(|(entity, (pos, _, assault))| (entity, pos.0, *assault))
        .collect();

    let mut strikes: Vec<(Entity, TowerHandle, TowerAttack)> = Vec::new();

    for (entity, position, mut plan) in attackers {
        let check = match plan.target {
            None => TargetCheck::NoTarget,
            Some(tower) if tower_in_reach(world, tower, position, plan.params.range) => {
                TargetCheck::InReach
            }
            Some(_) => TargetCheck::Lost,
        };

        if assault::advance(&mut plan, check) {
            let found = world.nearest_tower(position, plan.params.range, |_, t| {
                !t.is_destroyed()
            });
            if let Some(tower) = found {
                assault::engage(&mut plan, registry::tower_handle(tower));
            }
        }

        if let Some(tower) = assault::ready_strike(&mut plan) {
            strikes.push((entity, tower, plan.params));
        }

        let engaged = plan.target.is_some();
        if let Ok(mut slot) = world.get::<&mut TowerAssault>(entity) {
            *slot = plan;
        }
        if let Ok(mut state) = world.get::<&mut EnemyState>(entity) {
            state.phase = match (engaged, state.phase) {
                (true, _) => EnemyPhase::AttackingTower,
                (false, EnemyPhase::AttackingTower) => EnemyPhase::Walking,
                (false, phase) => phase,
            };
        }
    }

    for (attacker, tower, params) in strikes {
        let Some(tower_entity) = registry::resolve_tower(world, tower) else {
            continue;
        };
        let enemy = registry::enemy_handle(attacker);
        trace!(?enemy, ?tower, "enemy strikes tower");
        events.push(GameEvent::EnemyAttackedTower { enemy, tower });

        if destructible_towers && params.damage > 0 {
            combat::damage_tower(world, tower_entity, params.damage, events);
        }
        combat::stun_tower(world, tower_entity, params.stun_secs, events);
    }
}

/// Whether `tower` still exists, is standing, and is within `range`.
fn tower_in_reach(world: &World, tower: TowerHandle, from: DVec3, range: f64) -> bool {
    let Some(entity) = registry::resolve_tower(world, tower) else {
        return false;
    };
    let standing = world
        .get::<&TowerState>(entity)
        .is_ok_and(|t| !t.is_destroyed());
    standing
        && registry::position_of(world, entity).is_some_and(|p| p.distance(from) <= range)
}
