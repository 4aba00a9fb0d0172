//! Cleanup system: removes enemies that left the board or finished dying.

use hecs::{Entity, World};

use bastion_core::components::{Dying, EnemyState};
use bastion_core::enums::EnemyPhase;

/// Despawn enemies in ReachedExit, and dead enemies whose death grace period
/// has run out. Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, state) in world.query_mut::<&EnemyState>() {
        if state.phase == EnemyPhase::ReachedExit {
            despawn_buffer.push(entity);
        }
    }

    for (entity, dying) in world.query_mut::<&mut Dying>() {
        if dying.0.tick() {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
