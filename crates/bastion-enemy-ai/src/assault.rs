//! Tower-attack cycle for enemies that can stun towers.
//!
//! The caller owns the world: it reports whether the held target is still
//! valid, runs the tower search when asked, and applies the stun when a
//! strike is ready.

use bastion_core::components::TowerAssault;
use bastion_core::constants::TOWER_SCAN_INTERVAL_SECS;
use bastion_core::types::{Countdown, TowerHandle};

/// State of the held target as seen by the caller this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetCheck {
    NoTarget,
    /// Target exists, is not destroyed, and is within reach.
    InReach,
    /// Target is gone, destroyed, or out of reach.
    Lost,
}

/// Advance the assault timers. Returns true when the caller should search
/// for a tower this tick.
pub fn advance(assault: &mut TowerAssault, check: TargetCheck) -> bool {
    assault.cooldown.tick();

    if check == TargetCheck::Lost {
        assault.target = None;
    }
    if assault.target.is_some() {
        return false;
    }
    if assault.scan.tick() {
        assault.scan = Countdown::from_secs(TOWER_SCAN_INTERVAL_SECS);
        return true;
    }
    false
}

/// Take a tower found by a search as the new target.
pub fn engage(assault: &mut TowerAssault, tower: TowerHandle) {
    assault.target = Some(tower);
}

/// If a target is held and the cooldown has run out, reset the cooldown and
/// return the tower to strike.
pub fn ready_strike(assault: &mut TowerAssault) -> Option<TowerHandle> {
    let target = assault.target?;
    if !assault.cooldown.is_expired() {
        return None;
    }
    assault.cooldown = Countdown::from_secs(1.0 / assault.params.attack_rate);
    Some(target)
}
