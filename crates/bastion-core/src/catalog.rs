//! Static per-kind stats for enemies and towers.
//!
//! Variant behavior is expressed as optional capability blocks on the stats
//! (a speed boost, a death splash, a tower attack) rather than per-kind code.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::PROJECTILE_SPEED;
use crate::enums::{EnemyKind, TowerKind};
use crate::error::ConfigError;

/// Periodic self speed-up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedBoost {
    /// Time between the end of one boost and the start of the next.
    pub interval_secs: f64,
    pub duration_secs: f64,
    pub multiplier: f64,
}

/// Damage dealt to other living enemies nearby when this enemy dies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeathSplash {
    pub radius: f64,
    pub damage: u32,
}

/// Ability to stun (and optionally damage) towers in reach.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TowerAttack {
    pub range: f64,
    /// Attacks per second.
    pub attack_rate: f64,
    pub stun_secs: f64,
    /// Structural damage per attack; only applies when towers are destructible.
    #[serde(default)]
    pub damage: u32,
}

/// Static enemy stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub max_health: u32,
    /// World units per second.
    pub speed: f64,
    /// Lives lost when this enemy reaches the exit.
    pub contact_damage: u32,
    /// Currency paid out on death.
    pub bounty: u32,
    /// Score awarded on death.
    pub score_value: u32,
    /// Fraction of incoming damage ignored (0..1).
    #[serde(default)]
    pub damage_resistance: f64,
    #[serde(default)]
    pub speed_boost: Option<SpeedBoost>,
    #[serde(default)]
    pub death_splash: Option<DeathSplash>,
    #[serde(default)]
    pub tower_attack: Option<TowerAttack>,
}

/// What a projectile does when it arrives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Resolution {
    /// Damage the target only.
    Direct,
    /// Damage every living enemy within `radius` of the impact point.
    Area { radius: f64 },
    /// Damage the target, then slow it.
    Slow { factor: f64, duration_secs: f64 },
}

/// How a tower delivers its damage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum AttackMode {
    /// Damage lands on the target the tick the tower fires.
    Direct,
    /// A projectile is launched at the target.
    Projectile { speed: f64, resolution: Resolution },
}

/// Chance to multiply a shot's damage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriticalHit {
    pub chance: f64,
    pub multiplier: f64,
}

/// Static tower stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerStats {
    pub cost: u32,
    pub range: f64,
    /// Shots per second.
    pub fire_rate: f64,
    pub damage: u32,
    pub attack: AttackMode,
    #[serde(default)]
    pub critical: Option<CriticalHit>,
    pub max_health: u32,
    pub repairable: bool,
    pub repair_cost: u32,
}

impl TowerStats {
    /// Seconds between shots.
    pub fn fire_interval_secs(&self) -> f64 {
        1.0 / self.fire_rate
    }
}

/// All enemy and tower stats, keyed by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub enemies: BTreeMap<EnemyKind, EnemyStats>,
    pub towers: BTreeMap<TowerKind, TowerStats>,
}

impl Catalog {
    pub fn enemy(&self, kind: EnemyKind) -> Result<&EnemyStats, ConfigError> {
        self.enemies
            .get(&kind)
            .ok_or(ConfigError::UnknownEnemyKind(kind))
    }

    pub fn tower(&self, kind: TowerKind) -> Result<&TowerStats, ConfigError> {
        self.towers
            .get(&kind)
            .ok_or(ConfigError::UnknownTowerKind(kind))
    }

    /// Reject stats that would stall or break the simulation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (kind, stats) in &self.enemies {
            if stats.max_health == 0 {
                return Err(invalid(format!("{kind:?} max_health must be positive")));
            }
            if !(stats.speed >= 0.0) {
                return Err(invalid(format!("{kind:?} speed must not be negative")));
            }
            if !(0.0..1.0).contains(&stats.damage_resistance) {
                return Err(invalid(format!(
                    "{kind:?} damage_resistance must be in [0, 1)"
                )));
            }
            if let Some(attack) = &stats.tower_attack {
                if !(attack.attack_rate > 0.0) {
                    return Err(invalid(format!("{kind:?} attack_rate must be positive")));
                }
            }
            if let Some(boost) = &stats.speed_boost {
                if !(boost.interval_secs > 0.0 && boost.duration_secs > 0.0) {
                    return Err(invalid(format!(
                        "{kind:?} speed boost timings must be positive"
                    )));
                }
            }
        }
        for (kind, stats) in &self.towers {
            if !(stats.fire_rate > 0.0) {
                return Err(invalid(format!("{kind:?} fire_rate must be positive")));
            }
            if !(stats.range > 0.0) {
                return Err(invalid(format!("{kind:?} range must be positive")));
            }
            if stats.max_health == 0 {
                return Err(invalid(format!("{kind:?} max_health must be positive")));
            }
            if let AttackMode::Projectile { speed, .. } = stats.attack {
                if !(speed > 0.0) {
                    return Err(invalid(format!(
                        "{kind:?} projectile speed must be positive"
                    )));
                }
            }
        }
        Ok(())
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::InvalidStat(message)
}

impl Default for Catalog {
    fn default() -> Self {
        let mut enemies = BTreeMap::new();
        enemies.insert(
            EnemyKind::Basic,
            EnemyStats {
                max_health: 100,
                speed: 3.0,
                contact_damage: 1,
                bounty: 20,
                score_value: 10,
                damage_resistance: 0.0,
                speed_boost: None,
                death_splash: None,
                tower_attack: None,
            },
        );
        enemies.insert(
            EnemyKind::Fast,
            EnemyStats {
                max_health: 50,
                speed: 6.0,
                contact_damage: 1,
                bounty: 30,
                score_value: 15,
                damage_resistance: 0.0,
                speed_boost: Some(SpeedBoost {
                    interval_secs: 5.0,
                    duration_secs: 2.0,
                    multiplier: 1.5,
                }),
                death_splash: None,
                tower_attack: None,
            },
        );
        enemies.insert(
            EnemyKind::Tank,
            EnemyStats {
                max_health: 300,
                speed: 1.5,
                contact_damage: 2,
                bounty: 50,
                score_value: 25,
                damage_resistance: 0.25,
                speed_boost: None,
                death_splash: Some(DeathSplash {
                    radius: 2.0,
                    damage: 50,
                }),
                tower_attack: None,
            },
        );
        enemies.insert(
            EnemyKind::TowerAttacker,
            EnemyStats {
                max_health: 150,
                speed: 2.5,
                contact_damage: 1,
                bounty: 40,
                score_value: 30,
                damage_resistance: 0.0,
                speed_boost: None,
                death_splash: None,
                tower_attack: Some(TowerAttack {
                    range: 2.0,
                    attack_rate: 1.0,
                    stun_secs: 3.0,
                    damage: 20,
                }),
            },
        );

        let mut towers = BTreeMap::new();
        let tower = |cost, range, fire_rate, damage, attack, critical| TowerStats {
            cost,
            range,
            fire_rate,
            damage,
            attack,
            critical,
            max_health: 100,
            repairable: true,
            repair_cost: 25,
        };
        towers.insert(
            TowerKind::Basic,
            tower(100, 3.0, 1.0, 10, AttackMode::Direct, None),
        );
        towers.insert(
            TowerKind::AoeCannon,
            tower(
                200,
                2.5,
                0.5,
                15,
                AttackMode::Projectile {
                    speed: PROJECTILE_SPEED,
                    resolution: Resolution::Area { radius: 2.0 },
                },
                None,
            ),
        );
        towers.insert(
            TowerKind::Sniper,
            tower(
                250,
                6.0,
                0.25,
                40,
                AttackMode::Projectile {
                    speed: PROJECTILE_SPEED,
                    resolution: Resolution::Direct,
                },
                Some(CriticalHit {
                    chance: 0.25,
                    multiplier: 2.0,
                }),
            ),
        );
        towers.insert(
            TowerKind::Slow,
            tower(
                150,
                3.5,
                0.75,
                5,
                AttackMode::Projectile {
                    speed: PROJECTILE_SPEED,
                    resolution: Resolution::Slow {
                        factor: 0.5,
                        duration_secs: 3.0,
                    },
                },
                None,
            ),
        );

        Self { enemies, towers }
    }
}
