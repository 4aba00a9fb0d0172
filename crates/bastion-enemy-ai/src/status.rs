//! Timed movement modifiers: slows and the periodic speed boost.
//!
//! The slow and the boost are independent factors. Effective speed is
//! `base * slow * boost`, and each factor reverts to exactly 1 when its
//! timer runs out, so expiry always restores the unmodified base speed.

use bastion_core::components::{BoostCycle, BoostPhase, SlowEffect, StatusEffects};
use bastion_core::types::Countdown;

/// What changed during one status tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTick {
    pub slow_expired: bool,
    pub boost_started: bool,
    pub boost_ended: bool,
}

/// Slow to `1 - factor` of normal speed for `duration_secs`. A new slow
/// replaces any slow already running.
pub fn apply_slow(effects: &mut StatusEffects, factor: f64, duration_secs: f64) {
    let remaining = Countdown::from_secs(duration_secs);
    if remaining.is_expired() {
        return;
    }
    effects.slow = Some(SlowEffect {
        multiplier: 1.0 - factor.clamp(0.0, 1.0),
        remaining,
    });
}

/// Current slow factor contribution (1 when not slowed).
pub fn slow_multiplier(effects: &StatusEffects) -> f64 {
    effects.slow.map_or(1.0, |s| s.multiplier)
}

/// Current boost factor contribution (1 when not boosting).
pub fn boost_multiplier(effects: &StatusEffects) -> f64 {
    match effects.boost {
        Some(BoostCycle {
            params,
            phase: BoostPhase::Boosting(_),
        }) => params.multiplier,
        _ => 1.0,
    }
}

/// Speed after all active modifiers.
pub fn effective_speed(base_speed: f64, effects: &StatusEffects) -> f64 {
    base_speed * slow_multiplier(effects) * boost_multiplier(effects)
}

/// Advance every status timer by one tick.
pub fn tick(effects: &mut StatusEffects) -> StatusTick {
    let mut out = StatusTick::default();

    if let Some(slow) = effects.slow.as_mut() {
        if slow.remaining.tick() {
            effects.slow = None;
            out.slow_expired = true;
        }
    }

    if let Some(cycle) = effects.boost.as_mut() {
        match &mut cycle.phase {
            BoostPhase::Charging(wait) => {
                if wait.tick() {
                    cycle.phase =
                        BoostPhase::Boosting(Countdown::from_secs(cycle.params.duration_secs));
                    out.boost_started = true;
                }
            }
            BoostPhase::Boosting(left) => {
                if left.tick() {
                    cycle.phase =
                        BoostPhase::Charging(Countdown::from_secs(cycle.params.interval_secs));
                    out.boost_ended = true;
                }
            }
        }
    }

    out
}
