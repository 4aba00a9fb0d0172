//! Entity registry: handle resolution and spatial queries over the world.
//!
//! The hecs `World` is the registry. Handles carry the entity's generation
//! bits, so resolving a handle to a despawned entity yields `None` even after
//! its slot has been reused.

use glam::DVec3;
use hecs::{Entity, World};

use bastion_core::components::{EnemyState, TowerState};
use bastion_core::types::{EnemyHandle, Position, TowerHandle};

pub fn enemy_handle(entity: Entity) -> EnemyHandle {
    EnemyHandle::from_bits(entity.to_bits().get())
}

pub fn tower_handle(entity: Entity) -> TowerHandle {
    TowerHandle::from_bits(entity.to_bits().get())
}

/// The live enemy entity behind `handle`, if it still exists.
pub fn resolve_enemy(world: &World, handle: EnemyHandle) -> Option<Entity> {
    let entity = Entity::from_bits(handle.to_bits())?;
    world.get::<&EnemyState>(entity).is_ok().then_some(entity)
}

/// The live tower entity behind `handle`, if it still exists.
pub fn resolve_tower(world: &World, handle: TowerHandle) -> Option<Entity> {
    let entity = Entity::from_bits(handle.to_bits())?;
    world.get::<&TowerState>(entity).is_ok().then_some(entity)
}

/// Resolve a handle to an enemy that is still alive.
pub fn living_enemy(world: &World, handle: EnemyHandle) -> Option<Entity> {
    let entity = resolve_enemy(world, handle)?;
    let alive = world.get::<&EnemyState>(entity).is_ok_and(|s| s.is_alive());
    alive.then_some(entity)
}

pub fn position_of(world: &World, entity: Entity) -> Option<DVec3> {
    world.get::<&Position>(entity).ok().map(|p| p.0)
}

/// Radius queries used by towers seeking enemies and enemies seeking towers.
///
/// Radii are inclusive. Ties on distance go to the lowest entity bits so
/// results never depend on storage order.
pub trait SpatialQuery {
    fn nearest_enemy<F>(&self, origin: DVec3, radius: f64, filter: F) -> Option<Entity>
    where
        F: Fn(Entity, &EnemyState) -> bool;

    fn nearest_tower<F>(&self, origin: DVec3, radius: f64, filter: F) -> Option<Entity>
    where
        F: Fn(Entity, &TowerState) -> bool;

    /// Every matching enemy within `radius`, ordered by entity bits.
    fn enemies_within<F>(&self, origin: DVec3, radius: f64, filter: F) -> Vec<Entity>
    where
        F: Fn(Entity, &EnemyState) -> bool;
}

/// Linear scan; entity counts stay in the low hundreds.
impl SpatialQuery for World {
    fn nearest_enemy<F>(&self, origin: DVec3, radius: f64, filter: F) -> Option<Entity>
    where
        F: Fn(Entity, &EnemyState) -> bool,
    {
        let radius_sq = radius * radius;
        self.query::<(&Position, &EnemyState)>()
            .iter()
            .filter(|(entity, (_, state))| filter(*entity, *state))
            .map(|(entity, (pos, _))| (entity, pos.0.distance_squared(origin)))
            .filter(|(_, d)| *d <= radius_sq)
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.to_bits().cmp(&b.0.to_bits())))
            .map(|(entity, _)| entity)
    }

    fn nearest_tower<F>(&self, origin: DVec3, radius: f64, filter: F) -> Option<Entity>
    where
        F: Fn(Entity, &TowerState) -> bool,
    {
        let radius_sq = radius * radius;
        self.query::<(&Position, &TowerState)>()
            .iter()
            .filter(|(entity, (_, state))| filter(*entity, *state))
            .map(|(entity, (pos, _))| (entity, pos.0.distance_squared(origin)))
            .filter(|(_, d)| *d <= radius_sq)
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.to_bits().cmp(&b.0.to_bits())))
            .map(|(entity, _)| entity)
    }

    fn enemies_within<F>(&self, origin: DVec3, radius: f64, filter: F) -> Vec<Entity>
    where
        F: Fn(Entity, &EnemyState) -> bool,
    {
        let radius_sq = radius * radius;
        let mut found: Vec<Entity> = self
            .query::<(&Position, &EnemyState)>()
            .iter()
            .filter(|(entity, (pos, state))| {
                pos.0.distance_squared(origin) <= radius_sq && filter(*entity, *state)
            })
            .map(|(entity, _)| entity)
            .collect();
        found.sort_by_key(|e| e.to_bits());
        found
    }
}
