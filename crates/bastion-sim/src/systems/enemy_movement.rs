//! Enemy movement system: path following, status timers, and exits.

use hecs::{Entity, World};
use tracing::debug;

use bastion_core::components::{EnemyState, PathFollower, StatusEffects};
use bastion_core::enums::EnemyPhase;
use bastion_core::events::GameEvent;
use bastion_core::types::Position;
use bastion_enemy_ai::movement::{self, StepOutcome};
use bastion_enemy_ai::status;

use crate::collaborators::{Collaborators, PlayerLives};
use crate::registry;

/// Move every living enemy along its path, then advance its slow and boost
/// timers. Enemies that run out of path cost the player lives and are left
/// in ReachedExit for cleanup. Returns how many enemies left this tick.
pub fn run(
    world: &mut World,
    dt: f64,
    collaborators: &mut Collaborators,
    events: &mut Vec<GameEvent>,
) -> u32 {
    let mut exits: Vec<(Entity, u32)> = Vec::new();

    for (entity, (pos, state, follower, effects)) in world.query_mut::<(
        &mut Position,
        &mut EnemyState,
        &mut PathFollower,
        &mut StatusEffects,
    )>() {
        if !state.is_alive() {
            continue;
        }
        if state.phase == EnemyPhase::Spawned {
            state.phase = EnemyPhase::Walking;
        }

        let speed = status::effective_speed(state.base_speed, effects);
        match movement::step_along_path(pos.0, follower, speed, dt) {
            StepOutcome::Moving(next) => pos.0 = next,
            StepOutcome::ReachedExit(next) => {
                pos.0 = next;
                state.phase = EnemyPhase::ReachedExit;
                exits.push((entity, state.contact_damage));
                continue;
            }
        }

        let changes = status::tick(effects);
        if changes.boost_started {
            debug!(enemy = ?registry::enemy_handle(entity), "speed boost");
        }
    }

    for &(entity, damage) in &exits {
        let remaining = collaborators.lives.reduce_lives(damage);
        let enemy = registry::enemy_handle(entity);
        debug!(?enemy, damage, remaining, "enemy reached exit");
        events.push(GameEvent::EnemyReachedExit { enemy, damage });
        events.push(GameEvent::LivesChanged { remaining });
    }

    exits.len() as u32
}
