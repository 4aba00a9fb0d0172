//! Damage application, enemy death, and effects on towers.
//!
//! Hits go through a worklist rather than recursion: a death splash pushes
//! more hits onto the same queue, so chains of exploding tanks resolve in
//! one pass without unbounded stack depth. Every hit re-checks that its
//! target is still alive before doing anything.

use std::collections::VecDeque;

use hecs::{Entity, World};
use tracing::debug;

use bastion_core::components::{Dying, EnemyState, Splash, TowerState};
use bastion_core::constants::DEATH_GRACE_SECS;
use bastion_core::enums::TowerPhase;
use bastion_core::events::GameEvent;
use bastion_core::types::Countdown;
use bastion_enemy_ai::damage::{self, DamageOutcome};

use crate::collaborators::{Collaborators, Currency, ScoreSink};
use crate::registry::{self, SpatialQuery};

/// A pending hit on an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub target: Entity,
    pub amount: u32,
}

/// Apply `hits` in order, including any splash damage they cause.
/// Returns the number of enemies killed.
pub fn apply_hits(
    world: &mut World,
    hits: impl IntoIterator<Item = Hit>,
    collaborators: &mut Collaborators,
    events: &mut Vec<GameEvent>,
) -> u32 {
    let mut queue: VecDeque<Hit> = hits.into_iter().collect();
    let mut killed = 0;

    while let Some(hit) = queue.pop_front() {
        let (outcome, state) = {
            let Ok(mut state) = world.get::<&mut EnemyState>(hit.target) else {
                continue;
            };
            (damage::apply_damage(&mut state, hit.amount), *state)
        };
        let enemy = registry::enemy_handle(hit.target);

        match outcome {
            DamageOutcome::Ignored => {}
            DamageOutcome::Hurt { current, max } => {
                events.push(GameEvent::EnemyHealthChanged {
                    enemy,
                    current,
                    max,
                });
            }
            DamageOutcome::Killed { max } => {
                events.push(GameEvent::EnemyHealthChanged {
                    enemy,
                    current: 0,
                    max,
                });
                killed += 1;
                on_enemy_killed(world, hit.target, &state, collaborators, events, &mut queue);
            }
        }
    }
    killed
}

/// Shorthand for a single hit.
pub fn apply_hit(
    world: &mut World,
    target: Entity,
    amount: u32,
    collaborators: &mut Collaborators,
    events: &mut Vec<GameEvent>,
) -> u32 {
    apply_hits(world, [Hit { target, amount }], collaborators, events)
}

/// Pay out, notify, start the death grace period, and queue any splash.
fn on_enemy_killed(
    world: &mut World,
    entity: Entity,
    state: &EnemyState,
    collaborators: &mut Collaborators,
    events: &mut Vec<GameEvent>,
    queue: &mut VecDeque<Hit>,
) {
    let enemy = registry::enemy_handle(entity);
    debug!(?enemy, kind = ?state.kind, "enemy defeated");

    collaborators.currency.add(state.bounty);
    events.push(GameEvent::CurrencyChanged {
        balance: collaborators.currency.balance(),
    });
    collaborators
        .score
        .on_enemy_defeated(state.kind, state.score_value);
    events.push(GameEvent::EnemyDefeated {
        enemy,
        kind: state.kind,
    });

    let splash = world.get::<&Splash>(entity).ok().map(|s| s.0);
    let origin = registry::position_of(world, entity);
    let _ = world.insert_one(entity, Dying(Countdown::from_secs(DEATH_GRACE_SECS)));

    if let (Some(splash), Some(origin)) = (splash, origin) {
        let victims = world.enemies_within(origin, splash.radius, |other, s| {
            other != entity && s.is_alive()
        });
        debug!(?enemy, victims = victims.len(), "death splash");
        queue.extend(victims.into_iter().map(|target| Hit {
            target,
            amount: splash.damage,
        }));
    }
}

/// Stun a tower. A longer stun already running is kept; stuns never add up.
/// Destroyed towers cannot be stunned. Returns whether the stun landed.
pub fn stun_tower(
    world: &mut World,
    tower: Entity,
    duration_secs: f64,
    events: &mut Vec<GameEvent>,
) -> bool {
    let Ok(mut state) = world.get::<&mut TowerState>(tower) else {
        return false;
    };
    if state.is_destroyed() {
        return false;
    }
    let incoming = Countdown::from_secs(duration_secs);
    if incoming.is_expired() {
        return false;
    }
    if state.phase != TowerPhase::Stunned
        || incoming.remaining_ticks() > state.stun.remaining_ticks()
    {
        state.stun = incoming;
    }
    state.phase = TowerPhase::Stunned;
    state.target = None;

    let handle = registry::tower_handle(tower);
    debug!(tower = ?handle, duration_secs, "tower stunned");
    events.push(GameEvent::TowerStunned {
        tower: handle,
        duration_secs,
    });
    true
}

/// Structural damage to a tower. At zero health the tower is destroyed: it
/// stops targeting but keeps its cell. Returns whether this destroyed it.
pub fn damage_tower(
    world: &mut World,
    tower: Entity,
    amount: u32,
    events: &mut Vec<GameEvent>,
) -> bool {
    let Ok(mut state) = world.get::<&mut TowerState>(tower) else {
        return false;
    };
    if state.is_destroyed() || amount == 0 {
        return false;
    }
    state.health = state.health.saturating_sub(amount);
    let handle = registry::tower_handle(tower);
    events.push(GameEvent::TowerHealthChanged {
        tower: handle,
        current: state.health,
        max: state.max_health,
    });
    if state.health > 0 {
        return false;
    }
    state.phase = TowerPhase::Destroyed;
    state.target = None;
    state.stun = Countdown::expired();
    debug!(tower = ?handle, "tower destroyed");
    events.push(GameEvent::TowerDestroyed { tower: handle });
    true
}
