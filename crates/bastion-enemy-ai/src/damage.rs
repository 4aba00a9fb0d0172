//! Incoming damage and death.

use bastion_core::components::EnemyState;
use bastion_core::enums::EnemyPhase;

/// Result of applying damage to an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// The enemy was already dead or gone; nothing changed.
    Ignored,
    /// Health dropped but the enemy lives.
    Hurt { current: u32, max: u32 },
    /// This hit killed the enemy.
    Killed { max: u32 },
}

/// Scale `amount` by `1 - resistance`, rounded, never below 1 for a
/// non-zero hit.
pub fn mitigate(amount: u32, resistance: f64) -> u32 {
    if amount == 0 {
        return 0;
    }
    let scaled = (amount as f64 * (1.0 - resistance.clamp(0.0, 1.0))).round() as u32;
    scaled.max(1)
}

/// Apply a hit after resistance. Health clamps at zero, and zero health
/// moves the enemy to Dead. A dead enemy ignores further damage.
pub fn apply_damage(state: &mut EnemyState, amount: u32) -> DamageOutcome {
    if !state.is_alive() {
        return DamageOutcome::Ignored;
    }
    let dealt = mitigate(amount, state.damage_resistance);
    state.health = state.health.saturating_sub(dealt);
    if state.health == 0 {
        state.phase = EnemyPhase::Dead;
        DamageOutcome::Killed {
            max: state.max_health,
        }
    } else {
        DamageOutcome::Hurt {
            current: state.health,
            max: state.max_health,
        }
    }
}
