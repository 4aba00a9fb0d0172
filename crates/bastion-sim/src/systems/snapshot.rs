//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use bastion_core::components::*;
use bastion_core::enums::*;
use bastion_core::events::GameEvent;
use bastion_core::state::*;
use bastion_core::types::{Position, SimTime};
use bastion_enemy_ai::status;

use crate::collaborators::{Collaborators, Currency, PlayerLives, ScoreSink};
use crate::registry;
use crate::systems::wave_spawner::WaveScheduler;

/// Build a complete GameStateSnapshot from the current world state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    scenario: Option<ScenarioId>,
    time_scale: f64,
    waves: &WaveScheduler,
    collaborators: &Collaborators,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        scenario,
        time_scale,
        wave: waves.view(),
        enemies: build_enemies(world),
        towers: build_towers(world),
        projectiles: build_projectiles(world),
        currency: collaborators.currency.balance(),
        lives: collaborators.lives.lives(),
        score: collaborators.score.score(),
        events,
    }
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Position, &EnemyState, &StatusEffects)>()
        .iter()
        .map(|(entity, (pos, state, effects))| EnemyView {
            handle: registry::enemy_handle(entity),
            kind: state.kind,
            phase: state.phase,
            position: *pos,
            health: state.health,
            max_health: state.max_health,
            speed: status::effective_speed(state.base_speed, effects),
            slowed: effects.slow.is_some(),
        })
        .collect();
    enemies.sort_by_key(|e| e.handle);
    enemies
}

fn build_towers(world: &World) -> Vec<TowerView> {
    let mut towers: Vec<TowerView> = world
        .query::<(&Position, &TowerState)>()
        .iter()
        .map(|(entity, (pos, state))| TowerView {
            handle: registry::tower_handle(entity),
            kind: state.kind,
            phase: state.phase,
            cell: state.cell,
            position: *pos,
            target: state.target,
            health: state.health,
            max_health: state.max_health,
            stun_remaining_secs: if state.phase == TowerPhase::Stunned {
                state.stun.remaining_secs()
            } else {
                0.0
            },
            facing: state.facing.z.atan2(state.facing.x),
        })
        .collect();
    towers.sort_by_key(|t| t.handle);
    towers
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Position, &Projectile)>()
        .iter()
        .map(|(_, (pos, projectile))| ProjectileView {
            position: *pos,
            target: projectile.target,
        })
        .collect()
}
